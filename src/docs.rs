// src/docs.rs

use utoipa::OpenApi;
use crate::common::validation::FieldError;
use crate::handlers::{self, resource};
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Contatos ---
        resource::contacts::list,
        resource::contacts::get_one,
        resource::contacts::create,
        resource::contacts::update,
        resource::contacts::delete,

        // --- Negócios ---
        resource::leads::list,
        resource::leads::get_one,
        resource::leads::create,
        resource::leads::update,
        resource::leads::delete,

        // --- Atividades ---
        resource::activities::list,
        resource::activities::get_one,
        resource::activities::create,
        resource::activities::update,
        resource::activities::delete,

        // --- Usuários ---
        resource::users::list,
        resource::users::get_one,
        resource::users::create,
        resource::users::update,
        resource::users::delete,

        // --- Orçamentos ---
        resource::quotes::list,
        resource::quotes::get_one,
        resource::quotes::create,
        resource::quotes::update,
        resource::quotes::delete,

        // --- Faturas ---
        resource::invoices::list,
        resource::invoices::get_one,
        resource::invoices::create,
        resource::invoices::update,
        resource::invoices::delete,

        // --- Busca ---
        handlers::search::search,

        // --- Dashboard ---
        handlers::stats::get_stats,

        // --- Health ---
        handlers::health::health,
    ),
    components(
        schemas(
            // --- Contatos ---
            models::contact::ContactType,
            models::contact::ContactStatus,
            models::contact::Address,
            models::contact::Contact,

            // --- Negócios ---
            models::lead::LeadStatus,
            models::lead::LeadStage,
            models::lead::Lead,

            // --- Atividades ---
            models::activity::ActivityType,
            models::activity::RelatedKind,
            models::activity::RelatedTo,
            models::activity::Activity,

            // --- Usuários ---
            models::user::UserRole,
            models::user::User,

            // --- Orçamentos e faturas ---
            models::finance::QuoteStatus,
            models::finance::LineItem,
            models::finance::Quote,
            models::finance::InvoiceStatus,
            models::finance::Invoice,

            // --- Respostas ---
            models::search::SearchResults,
            models::stats::StatsSnapshot,
            handlers::health::HealthStatus,
            FieldError,
        )
    ),
    tags(
        (name = "Contacts", description = "CRUD de contatos"),
        (name = "Leads", description = "CRUD de negócios"),
        (name = "Activities", description = "CRUD de atividades"),
        (name = "Users", description = "CRUD de usuários"),
        (name = "Quotes", description = "CRUD de orçamentos"),
        (name = "Invoices", description = "CRUD de faturas"),
        (name = "Search", description = "Busca global em contatos, negócios e atividades"),
        (name = "Stats", description = "Indicadores do dashboard"),
        (name = "Health", description = "Verificação de disponibilidade")
    )
)]
pub struct ApiDoc;

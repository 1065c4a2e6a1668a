//! Popula o store configurado com dados de demonstração.
//!
//! Tudo passa pelo `ResourceService`, então os dados são validados como se
//! viessem da API. Se já existirem contatos, nada é feito.

use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crm_backend::{
    config::{connect_store, AppState, Config},
    models::{activity::Activity, contact::Contact, lead::Lead, user::User},
};

const DEMO_EMAIL: &str = "admin@crm.local";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();

    let config = Config::from_env()?;
    let app_state = AppState::from_store(connect_store(&config).await?);

    let contacts = app_state.resources::<Contact>();
    if !contacts.list().await?.is_empty() {
        tracing::info!("Já existem contatos no store; seed ignorado.");
        return Ok(());
    }

    // --- Usuário dono dos registros ---
    let owner_id = demo_owner(&app_state).await?;

    // --- Contatos ---
    let mut contact_ids = Vec::new();
    for (first, last, email, phone, company, kind) in [
        ("Alice", "Johnson", "alice@techcorp.com", "555-0101", "TechCorp", "Business"),
        ("Bob", "Smith", "bob@startup.io", "555-0102", "StartupIO", "Private"),
        ("Charlie", "Davis", "charlie@enterprise.net", "555-0103", "EnterpriseNet", "Business"),
    ] {
        let contact = contacts
            .create(json!({
                "firstName": first,
                "lastName": last,
                "email": email,
                "phone": phone,
                "companyName": company,
                "type": kind,
                "owner": owner_id,
            }))
            .await?;
        contact_ids.push(contact.id);
    }
    tracing::info!("Criados {} contatos", contact_ids.len());

    // --- Negócios ---
    let leads = app_state.resources::<Lead>();
    let mut lead_ids = Vec::new();
    for (title, company, status, stage, value, probability) in [
        ("Enterprise License Deal", "TechCorp", "Qualified", "Negotiation", 25000, 75),
        ("Q1 Service Contract", "StartupIO", "New", "Prospecting", 5000, 20),
        ("Legacy System Upgrade", "EnterpriseNet", "Contacted", "Closed Won", 120000, 100),
    ] {
        let lead = leads
            .create(json!({
                "title": title,
                "companyName": company,
                "status": status,
                "stage": stage,
                "estimatedValue": value,
                "probability": probability,
                "assignedTo": owner_id,
            }))
            .await?;
        lead_ids.push(lead.id);
    }
    tracing::info!("Criados {} negócios", lead_ids.len());

    // --- Atividades ---
    let activities = app_state.resources::<Activity>();
    for (kind, description, related_to, related_type) in [
        ("Call", "Initial discovery call with Alice", contact_ids[0], "Contact"),
        ("Meeting", "Demo presentation for TechCorp", lead_ids[0], "Lead"),
        ("Email", "Sent proposal to Bob", contact_ids[1], "Contact"),
    ] {
        activities
            .create(json!({
                "type": kind,
                "description": description,
                "relatedTo": related_to,
                "relatedToType": related_type,
                "createdBy": owner_id,
            }))
            .await?;
    }
    tracing::info!("Criadas 3 atividades");

    tracing::info!("✅ Seed concluído!");
    Ok(())
}

// Reaproveita o usuário demo de uma execução anterior interrompida.
async fn demo_owner(app_state: &AppState) -> anyhow::Result<Uuid> {
    let users = app_state.resources::<User>();
    let existing = users
        .list()
        .await?
        .into_iter()
        .find(|user| user.body.email == DEMO_EMAIL);

    if let Some(user) = existing {
        tracing::info!(id = %user.id, "Usuário demo já existe; reaproveitando");
        return Ok(user.id);
    }
    let created = users
        .create(json!({ "name": "Demo Admin", "email": DEMO_EMAIL, "role": "Admin" }))
        .await?;
    Ok(created.id)
}

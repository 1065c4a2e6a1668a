//! Backend de CRM: contatos, negócios (leads), atividades e financeiro sobre
//! um store de documentos, com busca global e indicadores do dashboard.

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

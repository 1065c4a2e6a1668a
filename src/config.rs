// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{DocumentStore, MemoryStore, PgDocumentStore},
    models::Resource,
    services::{ResourceService, SearchService, StatsService},
};

// =============================================================================
//  CONFIGURAÇÃO (variáveis de ambiente / .env)
// =============================================================================

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    // Sem URL o servidor sobe com o store em memória
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de qualquer fonte chave -> valor.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = non_empty("DATABASE_URL");
        if let Some(url) = &database_url {
            if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
            }
        }

        Ok(Self {
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(non_empty("PORT"), "PORT", 5000)?,
            database_url,
            db_max_connections: parse_or(non_empty("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout: Duration::from_secs(parse_or(
                non_empty("DB_ACQUIRE_TIMEOUT_SECS"),
                "DB_ACQUIRE_TIMEOUT_SECS",
                3,
            )?),
            cors_allowed_origin: non_empty("CORS_ALLOWED_ORIGIN"),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> anyhow::Result<T> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{key} must be a valid number, got '{raw}'")),
    }
}

// =============================================================================
//  ESTADO COMPARTILHADO
// =============================================================================

/// Conecta ao store configurado: Postgres (com migrações) ou memória.
pub async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL não definida; usando store em memória (dados não persistem)");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect(database_url)
        .await
        .context("Falha ao conectar ao banco de dados")?;
    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Falha ao rodar as migrações do banco de dados")?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    Ok(Arc::new(PgDocumentStore::new(pool)))
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub search_service: SearchService,
    pub stats_service: StatsService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store = connect_store(config).await?;
        Ok(Self::from_store(store))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_store(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            search_service: SearchService::new(store.clone()),
            stats_service: StatsService::new(store.clone()),
            store,
        }
    }

    /// Serviço CRUD da entidade `T` sobre o store compartilhado.
    pub fn resources<T: Resource>(&self) -> ResourceService<T> {
        ResourceService::new(self.store.clone())
    }
}

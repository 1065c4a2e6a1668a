// src/services/stats_service.rs

use std::sync::Arc;

use anyhow::anyhow;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::DocumentStore,
    models::{
        document::decode_all,
        lead::{Lead, LeadStage, LeadStatus},
        stats::{Metric, StatsSnapshot},
        Document, Resource,
    },
};

// Janela usada na comparação "período atual x anterior"
pub const COMPARISON_WINDOW_DAYS: i64 = 30;

#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn DocumentStore>,
}

impl StatsService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Indicadores calculados na hora, sem cache.
    pub async fn snapshot(&self) -> Result<StatsSnapshot, AppError> {
        let docs = self.store.find_all(Lead::COLLECTION).await?;
        let leads: Vec<Document<Lead>> = decode_all(docs)?;

        let snapshot = compute_stats(&leads, Utc::now())?;
        tracing::debug!(leads = snapshot.leads.value, win_rate = snapshot.win_rate.value, "stats calculadas");
        Ok(snapshot)
    }
}

// Totais de um conjunto de leads
#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    revenue: Decimal,
    leads: u64,
    open_deals: u64,
    closed_won: u64,
    finished: u64,
}

impl Totals {
    // Soma acima de Decimal::MAX vira erro interno em vez de pânico
    fn of<'a>(leads: impl IntoIterator<Item = &'a Lead>) -> Result<Self, AppError> {
        leads.into_iter().try_fold(Totals::default(), |mut t, lead| {
            t.revenue = t
                .revenue
                .checked_add(lead.estimated_value)
                .ok_or_else(|| AppError::Internal(anyhow!("receita estimada excede o limite de Decimal")))?;
            t.leads += 1;
            if lead.status != LeadStatus::Lost {
                t.open_deals += 1;
            }
            if lead.stage == LeadStage::ClosedWon {
                t.closed_won += 1;
            }
            if lead.is_finished() {
                t.finished += 1;
            }
            Ok(t)
        })
    }

    fn win_rate(&self) -> u64 {
        if self.finished == 0 {
            return 0;
        }
        (self.closed_won as f64 / self.finished as f64 * 100.0).round() as u64
    }
}

/// Calcula o snapshot a partir dos leads, com `now` explícito para os períodos.
pub fn compute_stats(leads: &[Document<Lead>], now: DateTime<Utc>) -> Result<StatsSnapshot, AppError> {
    let window = Duration::days(COMPARISON_WINDOW_DAYS);
    let current_start = now - window;
    let previous_start = current_start - window;

    let all = Totals::of(leads.iter().map(|d| &d.body))?;
    let current = Totals::of(
        leads
            .iter()
            .filter(|d| d.created_at > current_start && d.created_at <= now)
            .map(|d| &d.body),
    )?;
    let previous = Totals::of(
        leads
            .iter()
            .filter(|d| d.created_at > previous_start && d.created_at <= current_start)
            .map(|d| &d.body),
    )?;

    Ok(StatsSnapshot {
        revenue: Metric {
            value: all.revenue,
            change: percent_change(
                current.revenue.to_f64().unwrap_or(0.0),
                previous.revenue.to_f64().unwrap_or(0.0),
            ),
        },
        leads: Metric {
            value: all.leads,
            change: percent_change(current.leads as f64, previous.leads as f64),
        },
        deals: Metric {
            value: all.open_deals,
            change: percent_change(current.open_deals as f64, previous.open_deals as f64),
        },
        win_rate: Metric {
            value: all.win_rate(),
            change: percent_change(current.win_rate() as f64, previous.win_rate() as f64),
        },
    })
}

// Variação percentual com uma casa decimal; sem base de comparação -> None.
fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    let change = (current - previous) / previous * 100.0;
    Some((change * 10.0).round() / 10.0)
}

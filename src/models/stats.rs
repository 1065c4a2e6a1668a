// src/models/stats.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Um indicador e a sua variação contra o período anterior.
///
/// `change` é a variação percentual (uma casa decimal) entre os leads criados
/// nos últimos 30 dias e os 30 dias anteriores; `null` quando não há base de
/// comparação.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Metric<T> {
    pub value: T,
    pub change: Option<f64>,
}

// Os cards do topo do dashboard
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    // Serializado como número (serde-float)
    #[schema(value_type = Metric<f64>)]
    pub revenue: Metric<Decimal>,
    pub leads: Metric<u64>,
    pub deals: Metric<u64>,
    pub win_rate: Metric<u64>,
}

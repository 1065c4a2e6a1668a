/// Propriedades dos indicadores do dashboard (proptest)
use chrono::{Duration, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crm_backend::models::{
    lead::{Lead, LeadStage, LeadStatus},
    Document,
};
use crm_backend::services::stats_service::compute_stats;

fn stage() -> impl Strategy<Value = LeadStage> {
    prop_oneof![
        Just(LeadStage::Prospecting),
        Just(LeadStage::Negotiation),
        Just(LeadStage::ClosedWon),
    ]
}

fn status() -> impl Strategy<Value = LeadStatus> {
    prop_oneof![
        Just(LeadStatus::New),
        Just(LeadStatus::Contacted),
        Just(LeadStatus::Qualified),
        Just(LeadStatus::Lost),
    ]
}

fn lead() -> impl Strategy<Value = Document<Lead>> {
    (0u32..1_000_000, stage(), status(), 0i64..120).prop_map(|(value, stage, status, age_days)| {
        let created_at = Utc::now() - Duration::days(age_days);
        Document {
            id: Uuid::new_v4(),
            body: Lead {
                title: "Deal".into(),
                company_name: "Acme".into(),
                status,
                lead_score: 0.0,
                source: None,
                assigned_to: Uuid::nil(),
                stage,
                estimated_value: Decimal::from(value),
                probability: 0.0,
                expected_close_date: None,
            },
            created_at,
            updated_at: created_at,
        }
    })
}

proptest! {
    #[test]
    fn win_rate_is_a_percentage(leads in prop::collection::vec(lead(), 0..40)) {
        let stats = compute_stats(&leads, Utc::now()).unwrap();
        prop_assert!(stats.win_rate.value <= 100);
    }

    #[test]
    fn revenue_is_the_sum_of_estimates(leads in prop::collection::vec(lead(), 0..40)) {
        let stats = compute_stats(&leads, Utc::now()).unwrap();
        let expected: Decimal = leads.iter().map(|d| d.body.estimated_value).sum();
        prop_assert_eq!(stats.revenue.value, expected);
        prop_assert_eq!(stats.leads.value, leads.len() as u64);
        prop_assert!(stats.deals.value <= stats.leads.value);
    }

    #[test]
    fn all_won_means_full_win_rate(count in 1usize..20) {
        let now = Utc::now();
        let leads: Vec<Document<Lead>> = (0..count)
            .map(|_| Document {
                id: Uuid::new_v4(),
                body: Lead {
                    title: "Won".into(),
                    company_name: "Acme".into(),
                    status: LeadStatus::Qualified,
                    lead_score: 0.0,
                    source: None,
                    assigned_to: Uuid::nil(),
                    stage: LeadStage::ClosedWon,
                    estimated_value: Decimal::ONE,
                    probability: 100.0,
                    expected_close_date: None,
                },
                created_at: now,
                updated_at: now,
            })
            .collect();
        prop_assert_eq!(compute_stats(&leads, now).unwrap().win_rate.value, 100);
    }
}

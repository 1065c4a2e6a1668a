// src/services.rs

pub mod resource_service;
pub use resource_service::ResourceService;
pub mod search_service;
pub use search_service::SearchService;
pub mod stats_service;
pub use stats_service::StatsService;

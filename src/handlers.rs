// src/handlers.rs

pub mod health;
pub mod resource;
pub mod search;
pub mod stats;

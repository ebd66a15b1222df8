//! Detection module - risk scoring and threshold alerts

mod alerts;
mod risk;

pub use alerts::{AlertEntry, AlertLog};
pub use risk::{evaluate, RiskAssessment, RiskBand};

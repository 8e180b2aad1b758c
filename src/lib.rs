//! Event Demand Forecast
//!
//! Forecasts ticket sales and revenue for upcoming live-music events from
//! historical event records using gradient-boosted tabular regression.
//!
//! ## Architecture
//!
//! ```text
//! Loader (CSV/Supabase) → Feature Builder → Trainer (tickets, revenue)
//!                                               ↓
//!                         Reporter ← Predictor ← Evaluator
//! ```
//!
//! Single-shot batch run: fit on a seeded 85/15 split of history, evaluate
//! on the held-out rows, predict the future table, print one JSON document.

pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod report;

#[cfg(test)]
mod integration_tests;

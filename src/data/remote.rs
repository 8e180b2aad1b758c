//! Supabase event store client
//!
//! Fetches the events table plus the two behavioral tables used for
//! enrichment aggregates. Speaks PostgREST: every request carries the
//! service role key as both `apikey` and bearer token.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::RemoteConfig;
use crate::error::{ForecastError, Result};

use super::{split_by_outcomes, BehavioralAggregates, EventRecord, REQUIRED_COLUMNS};

/// Client for the remote event store
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    api_key: String,
}

/// One row of the `scoring_snapshots` table, reduced to the columns the
/// enrichment aggregates need.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSnapshot {
    pub propensity_score: f64,
    pub monetary_value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct InteractionRow {
    #[allow(dead_code)]
    id: String,
}

impl SupabaseClient {
    /// Create a new client from connection settings
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.service_role_key.clone(),
        })
    }

    /// Fetch all events and split them into (history, future) by outcome
    /// null-ness. A required column missing from the store is fatal.
    pub async fn fetch_events(&self) -> Result<(Vec<EventRecord>, Vec<EventRecord>)> {
        let url = format!("{}/rest/v1/events", self.base_url);
        let rows: Vec<serde_json::Value> = self
            .http
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[("select", "*"), ("order", "date.asc")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let (history, future) = parse_events(rows)?;
        debug!(
            history = history.len(),
            future = future.len(),
            "fetched events from store"
        );
        Ok((history, future))
    }

    /// Compute behavioral enrichment aggregates from `scoring_snapshots` and
    /// `interactions`. Empty tables fall back to the documented defaults.
    pub async fn fetch_enrichment(&self) -> Result<BehavioralAggregates> {
        let url = format!("{}/rest/v1/scoring_snapshots", self.base_url);
        let snapshots: Vec<ScoringSnapshot> = self
            .http
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[("select", "propensity_score,monetary_value")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let url = format!("{}/rest/v1/interactions", self.base_url);
        let interactions: Vec<InteractionRow> = self
            .http
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[("select", "id")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let aggregates = BehavioralAggregates::compute(&snapshots, interactions.len());
        debug!(?aggregates, "computed enrichment aggregates");
        Ok(aggregates)
    }
}

/// Validate the store schema against every row, then decode and split by
/// outcome null-ness. An empty events table is logged, not an error; the
/// run fails later with an empty history either way.
pub(crate) fn parse_events(
    rows: Vec<serde_json::Value>,
) -> Result<(Vec<EventRecord>, Vec<EventRecord>)> {
    if rows.is_empty() {
        tracing::warn!("events table returned no rows, nothing to train or predict");
        return Ok((Vec::new(), Vec::new()));
    }
    for row in &rows {
        check_columns(row)?;
    }

    let events = rows
        .into_iter()
        .map(serde_json::from_value::<EventRecord>)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(split_by_outcomes(events))
}

fn check_columns(row: &serde_json::Value) -> Result<()> {
    let Some(object) = row.as_object() else {
        return Ok(());
    };
    for column in REQUIRED_COLUMNS {
        if !object.contains_key(column) {
            return Err(ForecastError::MissingColumn {
                column,
                table: "events".to_string(),
            });
        }
    }
    Ok(())
}

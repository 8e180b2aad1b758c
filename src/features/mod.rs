//! Feature assembly for the regression models
//!
//! Converts raw event records into a fixed feature schema: four categorical
//! columns, ten numerical columns derived from the raw signals plus the
//! calendar decomposition of `date`, and optionally three broadcast
//! enrichment columns. The `date` column itself never reaches the model.

#[cfg(test)]
mod tests;

use chrono::{Datelike, NaiveDate};

use crate::data::{BehavioralAggregates, EventRecord};
use crate::error::{ForecastError, Result};

/// Categorical model inputs, one-hot encoded downstream.
pub const CATEGORICAL_COLUMNS: [&str; 4] = ["city", "venue", "genre", "day_of_week"];

/// Numerical model inputs, passed through unencoded.
pub const NUMERICAL_COLUMNS: [&str; 10] = [
    "ticket_price",
    "marketing_spend",
    "google_trends_genre",
    "instagram_mentions",
    "temp_c",
    "precip_mm",
    "is_holiday_brazil_hint",
    "capacity",
    "month",
    "dow_num",
];

/// Extra numerical inputs appended when enrichment is enabled.
pub const ENRICHMENT_COLUMNS: [&str; 3] =
    ["mean_propensity", "mean_monetary_value", "interaction_count"];

/// One event in model feature space.
///
/// `artist` is deliberately absent: it is part of the required input schema
/// but is not used as a model feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub city: String,
    pub venue: String,
    pub genre: String,
    pub day_of_week: String,
    pub ticket_price: f64,
    pub marketing_spend: f64,
    pub google_trends_genre: f64,
    pub instagram_mentions: f64,
    pub temp_c: f64,
    pub precip_mm: f64,
    pub is_holiday_brazil_hint: f64,
    pub capacity: f64,
    /// Calendar month of the event date, 1-12
    pub month: f64,
    /// Zero-based weekday of the event date, Monday = 0
    pub dow_num: f64,
    /// Broadcast behavioral aggregates, identical on every row of a table
    pub enrichment: Option<BehavioralAggregates>,
}

impl FeatureRow {
    /// Categorical values in `CATEGORICAL_COLUMNS` order
    pub fn categoricals(&self) -> [&str; 4] {
        [&self.city, &self.venue, &self.genre, &self.day_of_week]
    }

    /// Numerical values in `NUMERICAL_COLUMNS` order, enrichment last
    pub fn numericals(&self) -> Vec<f64> {
        let mut values = vec![
            self.ticket_price,
            self.marketing_spend,
            self.google_trends_genre,
            self.instagram_mentions,
            self.temp_c,
            self.precip_mm,
            self.is_holiday_brazil_hint,
            self.capacity,
            self.month,
            self.dow_num,
        ];
        if let Some(enrichment) = self.enrichment {
            values.push(enrichment.mean_propensity);
            values.push(enrichment.mean_monetary_value);
            values.push(enrichment.interaction_count);
        }
        values
    }
}

/// Builds feature tables with a consistent schema.
///
/// History and future tables must be built by the same builder instance so
/// the fit-time and predict-time schemas are identical, enrichment included.
#[derive(Debug, Clone, Default)]
pub struct FeatureBuilder {
    enrichment: Option<BehavioralAggregates>,
}

impl FeatureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that appends the three broadcast enrichment columns
    pub fn with_enrichment(aggregates: BehavioralAggregates) -> Self {
        Self {
            enrichment: Some(aggregates),
        }
    }

    /// Build the feature table for a set of events, one row per event
    pub fn build(&self, events: &[EventRecord]) -> Result<Vec<FeatureRow>> {
        events.iter().map(|event| self.build_row(event)).collect()
    }

    fn build_row(&self, event: &EventRecord) -> Result<FeatureRow> {
        let date = NaiveDate::parse_from_str(&event.date, "%Y-%m-%d")
            .map_err(|_| ForecastError::InvalidDate(event.date.clone()))?;

        Ok(FeatureRow {
            city: event.city.clone(),
            venue: event.venue.clone(),
            genre: event.genre.clone(),
            day_of_week: event.day_of_week.clone(),
            ticket_price: event.ticket_price,
            marketing_spend: event.marketing_spend,
            google_trends_genre: event.google_trends_genre,
            instagram_mentions: event.instagram_mentions,
            temp_c: event.temp_c,
            precip_mm: event.precip_mm,
            is_holiday_brazil_hint: event.is_holiday_brazil_hint,
            capacity: event.capacity as f64,
            month: date.month() as f64,
            dow_num: date.weekday().num_days_from_monday() as f64,
            enrichment: self.enrichment,
        })
    }
}

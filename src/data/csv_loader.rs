//! CSV file loading for file-mode invocations

use std::path::Path;

use crate::error::{ForecastError, Result};

use super::{EventRecord, OUTCOME_COLUMNS, REQUIRED_COLUMNS};

/// Load historical events. All 16 required columns must be present.
pub fn load_history(path: &Path) -> Result<Vec<EventRecord>> {
    load(path, true)
}

/// Load future events. Outcome columns may be absent since these events have
/// no known results yet.
pub fn load_future(path: &Path) -> Result<Vec<EventRecord>> {
    load(path, false)
}

fn load(path: &Path, require_outcomes: bool) -> Result<Vec<EventRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    check_columns(reader.headers()?, path, require_outcomes)?;

    let mut events = Vec::new();
    for record in reader.deserialize() {
        events.push(record?);
    }

    tracing::debug!(path = %path.display(), rows = events.len(), "loaded events from CSV");
    Ok(events)
}

fn check_columns(headers: &csv::StringRecord, path: &Path, require_outcomes: bool) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !require_outcomes && OUTCOME_COLUMNS.contains(&column) {
            continue;
        }
        if !headers.iter().any(|h| h == column) {
            return Err(ForecastError::MissingColumn {
                column,
                table: path.display().to_string(),
            });
        }
    }
    Ok(())
}

//! Remote event store configuration
//!
//! Connection parameters are taken from the process environment. A `.env`
//! file is honored when present (loaded by `main` via dotenvy).

use crate::error::{ForecastError, Result};

/// Settings for the Supabase-backed event store
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base project URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Service role key, sent as both `apikey` and bearer token
    pub service_role_key: String,
}

impl RemoteConfig {
    /// Read connection settings from `SUPABASE_URL` / `SUPABASE_SERVICE_ROLE_KEY`
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("SUPABASE_URL")
            .map_err(|_| ForecastError::MissingEnv("SUPABASE_URL"))?;
        let service_role_key = std::env::var("SUPABASE_SERVICE_ROLE_KEY")
            .map_err(|_| ForecastError::MissingEnv("SUPABASE_SERVICE_ROLE_KEY"))?;
        Ok(Self {
            url,
            service_role_key,
        })
    }
}

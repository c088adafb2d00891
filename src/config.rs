//! Configuration constants and profile loading for cinelist
//!
//! Settings live in an INI file, one section per profile:
//!
//! ```ini
//! [default]
//! source_url = http://localhost:8080/api/
//! row_template = <td>{{name}}</td><td>{{rating}}</td>
//! list_speed = slow
//! detail_speed = fast
//! fetch_latency_ms = 250
//! start_route = movies/2
//! ```
//!
//! A missing file or section is not an error; every key falls back to
//! its default.

use anyhow::{Context, Result};
use ini::{Ini, Properties};
use std::path::Path;
use std::time::Duration;

use crate::app::views::{Speed, DEFAULT_ROW_TEMPLATE};

/// Default profile file path for cinelist
pub const DEFAULT_PROFILE_PATH: &str = "~/.cinelist/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "CINELIST_PROFILE_PATH";

/// Profile section used when none is given on the command line
pub const DEFAULT_PROFILE_NAME: &str = "default";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Settings resolved from one profile section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Base url for [`HttpDataSource`](crate::app::services::HttpDataSource); canned movies when absent
    pub source_url: Option<String>,
    pub row_template: String,
    pub list_speed: Speed,
    pub detail_speed: Speed,
    /// Artificial delay for the canned source
    pub fetch_latency: Duration,
    pub start_route: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            source_url: None,
            row_template: DEFAULT_ROW_TEMPLATE.to_string(),
            list_speed: Speed::Slow,
            detail_speed: Speed::Slow,
            fetch_latency: Duration::ZERO,
            start_route: String::new(),
        }
    }
}

impl AppSettings {
    /// Load `profile_name` from the INI file at `profile_path` (`~` is expanded)
    pub fn load(profile_path: &str, profile_name: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(profile_path);
        let path = Path::new(expanded.as_ref());
        tracing::debug!("Loading profile '{}' from '{}'", profile_name, path.display());

        if !path.exists() {
            tracing::debug!("Profile file not found, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)
            .with_context(|| format!("failed to read profile file '{}'", path.display()))?;
        Self::from_ini(&ini, profile_name)
    }

    /// Resolve `profile_name` from already parsed INI content
    pub fn from_ini(ini: &Ini, profile_name: &str) -> Result<Self> {
        match ini.section(Some(profile_name)) {
            Some(section) => Self::from_section(section, profile_name),
            None => {
                tracing::debug!("Profile '{}' not found, using defaults", profile_name);
                Ok(Self::default())
            }
        }
    }

    fn from_section(section: &Properties, profile_name: &str) -> Result<Self> {
        let mut settings = Self::default();
        let value = |key: &str| {
            section
                .get(key)
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        if let Some(url) = value("source_url") {
            settings.source_url = Some(url.to_string());
        }
        if let Some(template) = value("row_template") {
            settings.row_template = template.to_string();
        }
        if let Some(speed) = value("list_speed") {
            settings.list_speed = speed
                .parse()
                .with_context(|| format!("invalid list_speed in profile '{profile_name}'"))?;
        }
        if let Some(speed) = value("detail_speed") {
            settings.detail_speed = speed
                .parse()
                .with_context(|| format!("invalid detail_speed in profile '{profile_name}'"))?;
        }
        if let Some(ms) = value("fetch_latency_ms") {
            let ms: u64 = ms
                .parse()
                .with_context(|| format!("invalid fetch_latency_ms in profile '{profile_name}'"))?;
            settings.fetch_latency = Duration::from_millis(ms);
        }
        if let Some(route) = value("start_route") {
            settings.start_route = route.to_string();
        }

        tracing::debug!("Profile '{}' resolved to {:?}", profile_name, settings);
        Ok(settings)
    }
}

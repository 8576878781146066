use std::path::PathBuf;

use services::SimulatedLatency;

pub const CONTENT_DIR_VAR: &str = "CODELEARN_CONTENT_DIR";
pub const SIMULATE_LATENCY_VAR: &str = "CODELEARN_SIMULATE_LATENCY";
const DEFAULT_CONTENT_DIR: &str = "assets";

/// Settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding `content/<category>/<lesson>` pages.
    pub content_dir: PathBuf,
    pub simulate_latency: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(DEFAULT_CONTENT_DIR),
            simulate_latency: false,
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(dir) = get(CONTENT_DIR_VAR) {
            config.content_dir = PathBuf::from(dir.trim());
        }
        if let Some(flag) = get(SIMULATE_LATENCY_VAR) {
            config.simulate_latency = parse_flag(&flag);
        }
        config
    }

    #[must_use]
    pub fn latency(&self) -> SimulatedLatency {
        if self.simulate_latency {
            SimulatedLatency::mock_backend()
        } else {
            SimulatedLatency::none()
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub refresh_interval_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".into(),
            refresh_interval_secs: 30,
        }
    }
}

/// Layered lookup: built-in defaults, then `dashboard.toml` in the working
/// directory, then environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("dashboard.toml") {
        apply_file_overrides(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("DASHBOARD_API_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Ok(v) = std::env::var("DASHBOARD_REFRESH_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.refresh_interval_secs = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__REFRESH_INTERVAL_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.refresh_interval_secs = parsed;
        }
    }

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("api_base_url") {
            settings.api_base_url = v.clone();
        }
        if let Some(v) = file_cfg.get("refresh_interval_secs") {
            if let Ok(parsed) = v.parse::<u64>() {
                settings.refresh_interval_secs = parsed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "http://localhost:5000");
        assert_eq!(settings.refresh_interval_secs, 30);
    }

    #[test]
    fn file_overrides_replace_defaults() {
        let mut settings = Settings::default();
        apply_file_overrides(
            &mut settings,
            "api_base_url = \"http://10.0.0.2:8080\"\nrefresh_interval_secs = \"5\"\n",
        );
        assert_eq!(settings.api_base_url, "http://10.0.0.2:8080");
        assert_eq!(settings.refresh_interval_secs, 5);
    }

    #[test]
    fn unparseable_interval_keeps_default() {
        let mut settings = Settings::default();
        apply_file_overrides(&mut settings, "refresh_interval_secs = \"soon\"\n");
        assert_eq!(settings.refresh_interval_secs, 30);
    }
}

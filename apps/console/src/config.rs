use std::{collections::HashMap, fs};

#[derive(Debug)]
pub struct Settings {
    pub server_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8443".into(),
        }
    }
}

/// Layering: defaults, then `client.toml` in the working directory, then
/// the `SURVEY_SERVER_URL` environment variable. A missing or unparsable
/// file is ignored.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("client.toml") {
        apply_file_config(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("SURVEY_SERVER_URL") {
        settings.server_url = v;
    }

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("server_url") {
            settings.server_url = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_config_overrides_default_server_url() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "server_url = \"http://surveys.local:9000\"");
        assert_eq!(settings.server_url, "http://surveys.local:9000");
    }

    #[test]
    fn unparsable_file_config_keeps_defaults() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "server_url = [not toml");
        assert_eq!(settings.server_url, Settings::default().server_url);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "color_scheme = \"dark\"");
        assert_eq!(settings.server_url, Settings::default().server_url);
    }
}

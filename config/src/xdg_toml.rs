//! Load the `[env]` table from `~/.config/<app>/config.toml`.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::LoadError;

fn xdg_config_path(app_name: &str) -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    let path = config_dir.join(app_name).join("config.toml");
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
}

/// Returns key-value pairs from the `[env]` section; a missing file or empty
/// section yields an empty map.
pub fn load_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    let path = match xdg_config_path(app_name) {
        Some(p) => p,
        None => return Ok(HashMap::new()),
    };
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    let config: ConfigFile = toml::from_str(&content)?;
    Ok(config.env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_returns_empty_map() {
        let map = load_env_map("bard-xdg-test-nonexistent-app").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn env_table_parses() {
        let parsed: ConfigFile = toml::from_str(
            r#"
[env]
OPENAI_API_KEY = "sk-from-toml"
TAVILY_API_KEY = "tvly-from-toml"
"#,
        )
        .unwrap();
        assert_eq!(
            parsed.env.get("OPENAI_API_KEY"),
            Some(&"sk-from-toml".to_string())
        );
        assert_eq!(parsed.env.len(), 2);
    }

    #[test]
    fn missing_env_table_is_empty() {
        let parsed: ConfigFile = toml::from_str("").unwrap();
        assert!(parsed.env.is_empty());
    }
}

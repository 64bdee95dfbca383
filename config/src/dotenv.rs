//! Parse `.env` into a key-value map (applied to the environment in lib.rs).

use std::collections::HashMap;
use std::path::Path;

/// Path of `.env`: in `override_dir` when given, else the current directory.
fn dotenv_path(override_dir: Option<&Path>) -> Option<std::path::PathBuf> {
    let dir = override_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())?;
    let path = dir.join(".env");
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Minimal .env parser: `KEY=VALUE` lines, `#` comment lines, trimmed keys and
/// values, surrounding single or double quotes stripped (`\"` escape inside
/// double quotes). No multiline values.
fn parse_dotenv(content: &str) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((k, v)) = line.split_once('=') else {
            continue;
        };
        let key = k.trim().to_string();
        let value = v.trim().to_string();
        let value = if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
            value[1..value.len() - 1].replace("\\\"", "\"")
        } else {
            value
        };
        let value = value
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .map(|s| s.to_string())
            .unwrap_or(value);
        if !key.is_empty() {
            out.insert(key, value);
        }
    }
    out
}

/// Loads `.env` into a map; a missing file yields an empty map.
pub fn load_env_map(override_dir: Option<&Path>) -> std::io::Result<HashMap<String, String>> {
    let path = match dotenv_path(override_dir) {
        Some(p) => p,
        None => return Ok(HashMap::new()),
    };
    let content = std::fs::read_to_string(&path)?;
    Ok(parse_dotenv(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_pairs() {
        let m = parse_dotenv("OPENAI_API_KEY=sk-test\nBARD_MODEL=gpt-4o-mini\n");
        assert_eq!(m.get("OPENAI_API_KEY"), Some(&"sk-test".to_string()));
        assert_eq!(m.get("BARD_MODEL"), Some(&"gpt-4o-mini".to_string()));
    }

    #[test]
    fn skips_comments_blanks_and_bad_lines() {
        let m = parse_dotenv("\n# comment\nKEY=val\nNOT_A_PAIR\n=orphan\n  \n");
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("KEY"), Some(&"val".to_string()));
    }

    #[test]
    fn strips_quotes() {
        let m = parse_dotenv("A=\"hello world\"\nB='single'\nC=\"say \\\"hi\\\"\"\n");
        assert_eq!(m.get("A"), Some(&"hello world".to_string()));
        assert_eq!(m.get("B"), Some(&"single".to_string()));
        assert_eq!(m.get("C"), Some(&"say \"hi\"".to_string()));
    }

    #[test]
    fn empty_values_are_kept() {
        let m = parse_dotenv("A=\nB=\"\"\n");
        assert_eq!(m.get("A"), Some(&String::new()));
        assert_eq!(m.get("B"), Some(&String::new()));
    }

    #[test]
    fn load_env_map_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_map(Some(dir.path())).unwrap().is_empty());
    }

    #[test]
    fn load_env_map_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "A=1\nB=2\n").unwrap();
        let m = load_env_map(Some(dir.path())).unwrap();
        assert_eq!(m.get("A"), Some(&"1".to_string()));
        assert_eq!(m.get("B"), Some(&"2".to_string()));
    }
}

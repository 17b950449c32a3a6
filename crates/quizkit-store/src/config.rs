//! quizkit configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level quizkit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizkitConfig {
    /// Exercise bank file, or a directory of bank files.
    #[serde(default = "default_bank")]
    pub bank: PathBuf,
    /// Where commands write their output files by default.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_bank() -> PathBuf {
    PathBuf::from("./banks")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizkit-results")
}

impl Default for QuizkitConfig {
    fn default() -> Self {
        Self {
            bank: default_bank(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizkit.toml` in the current directory
/// 2. `~/.config/quizkit/config.toml`
///
/// Environment variable override: `QUIZKIT_BANK`.
pub fn load_config() -> Result<QuizkitConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizkitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizkit.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config(
                &std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?,
            )
            .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizkitConfig::default(),
    };

    if let Ok(bank) = std::env::var("QUIZKIT_BANK") {
        config.bank = PathBuf::from(bank);
    }

    config.bank = resolve_path(&config.bank);
    config.output_dir = resolve_path(&config.output_dir);

    Ok(config)
}

fn parse_config(content: &str) -> Result<QuizkitConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizkit"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZKIT_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZKIT_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZKIT_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no_vars"), "no_vars");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_QUIZKIT_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_values() {
        std::env::set_var("_QUIZKIT_SELF_REF", "${_QUIZKIT_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_QUIZKIT_SELF_REF}/x"),
            "${_QUIZKIT_SELF_REF}/x"
        );
        assert_eq!(
            resolve_env_vars("${_QUIZKIT_UNSET_VAR}a/${_QUIZKIT_SELF_REF}"),
            "a/${_QUIZKIT_SELF_REF}"
        );
        std::env::remove_var("_QUIZKIT_SELF_REF");
    }

    #[test]
    fn default_config() {
        let config = QuizkitConfig::default();
        assert_eq!(config.bank, PathBuf::from("./banks"));
        assert_eq!(config.output_dir, PathBuf::from("./quizkit-results"));
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config(r#"bank = "courses/geo.toml""#).unwrap();
        assert_eq!(config.bank, PathBuf::from("courses/geo.toml"));
        assert_eq!(config.output_dir, PathBuf::from("./quizkit-results"));
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizkit.toml");
        std::fs::write(&path, "output_dir = \"${_QUIZKIT_OUT_DIR}/results\"\n").unwrap();
        std::env::set_var("_QUIZKIT_OUT_DIR", "/tmp/qk");

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/qk/results"));
        std::env::remove_var("_QUIZKIT_OUT_DIR");
    }
}

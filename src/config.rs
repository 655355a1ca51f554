use anyhow::{Context, Result, bail};
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// File looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "replace-bazel-deps.toml";

/// Prefix for structured environment overrides, e.g.
/// `REPLACE_BAZEL_DEPS_SUBSTITUTION__ON_MISSING=fail`
pub const ENV_PREFIX: &str = "REPLACE_BAZEL_DEPS";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub substitution: SubstitutionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstitutionConfig {
    pub on_missing: MissingPlaceholder,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// What to do when the template has no placeholder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPlaceholder {
    /// Report it and write the template through unchanged
    #[default]
    Continue,
    /// Report it, skip the write and fail
    Fail,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl FromStr for MissingPlaceholder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "continue" => Ok(MissingPlaceholder::Continue),
            "fail" => Ok(MissingPlaceholder::Fail),
            other => bail!("unknown missing-placeholder policy '{}'", other),
        }
    }
}

impl fmt::Display for MissingPlaceholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingPlaceholder::Continue => write!(f, "continue"),
            MissingPlaceholder::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => bail!("unknown log format '{}'", other),
        }
    }
}

impl Config {
    /// Load configuration with precedence (highest last):
    /// 1. Default values
    /// 2. replace-bazel-deps.toml in the current directory (if exists)
    /// 3. Environment variables (REPLACE_BAZEL_DEPS_*)
    pub fn load() -> Result<Self> {
        Self::load_from_dir(&std::env::current_dir()?)
    }

    /// Load configuration from a specific directory
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        let config_file = dir.join(CONFIG_FILE_NAME);
        if config_file.exists() {
            builder = builder.add_source(File::from(config_file));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let mut config: Config = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        config.merge_env_vars()?;

        Ok(config)
    }

    /// Short single-level environment variables
    fn merge_env_vars(&mut self) -> Result<()> {
        if let Ok(policy) = std::env::var("REPLACE_BAZEL_DEPS_ON_MISSING") {
            self.substitution.on_missing = policy
                .parse()
                .context("REPLACE_BAZEL_DEPS_ON_MISSING")?;
        }
        if let Ok(level) = std::env::var("REPLACE_BAZEL_DEPS_LOG") {
            self.logging.level = level;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs::write;
    use tempfile::TempDir;

    const VARS: [&str; 5] = [
        "REPLACE_BAZEL_DEPS_ON_MISSING",
        "REPLACE_BAZEL_DEPS_LOG",
        "REPLACE_BAZEL_DEPS_SUBSTITUTION__ON_MISSING",
        "REPLACE_BAZEL_DEPS_LOGGING__LEVEL",
        "REPLACE_BAZEL_DEPS_LOGGING__FORMAT",
    ];

    // Helper to create isolated environment for testing
    fn with_isolated_env<T>(f: impl FnOnce() -> T) -> T {
        let saved: Vec<_> = VARS.iter().map(|key| (*key, env::var(key).ok())).collect();

        unsafe {
            for key in VARS {
                env::remove_var(key);
            }
        }

        let result = f();

        unsafe {
            for (key, value) in saved {
                match value {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
        }

        result
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();

        assert_eq!(config.substitution.on_missing, MissingPlaceholder::Continue);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    #[serial]
    fn test_load_no_config_file() -> Result<()> {
        with_isolated_env(|| -> Result<()> {
            let temp_dir = TempDir::new()?;

            let config = Config::load_from_dir(temp_dir.path())?;

            assert_eq!(config, Config::default());
            Ok(())
        })
    }

    #[test]
    #[serial]
    fn test_load_from_toml_file() -> Result<()> {
        with_isolated_env(|| -> Result<()> {
            let temp_dir = TempDir::new()?;
            write(
                temp_dir.path().join(CONFIG_FILE_NAME),
                r#"
[substitution]
on_missing = "fail"

[logging]
level = "debug"
format = "json"
"#,
            )?;

            let config = Config::load_from_dir(temp_dir.path())?;

            assert_eq!(config.substitution.on_missing, MissingPlaceholder::Fail);
            assert_eq!(config.logging.level, "debug");
            assert_eq!(config.logging.format, LogFormat::Json);
            Ok(())
        })
    }

    #[test]
    #[serial]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        with_isolated_env(|| -> Result<()> {
            let temp_dir = TempDir::new()?;
            write(
                temp_dir.path().join(CONFIG_FILE_NAME),
                "[logging]\nformat = \"compact\"\n",
            )?;

            let config = Config::load_from_dir(temp_dir.path())?;

            assert_eq!(config.substitution.on_missing, MissingPlaceholder::Continue);
            assert_eq!(config.logging.level, "warn");
            assert_eq!(config.logging.format, LogFormat::Compact);
            Ok(())
        })
    }

    #[test]
    #[serial]
    fn test_precedence_env_over_file() -> Result<()> {
        with_isolated_env(|| -> Result<()> {
            let temp_dir = TempDir::new()?;
            write(
                temp_dir.path().join(CONFIG_FILE_NAME),
                "[substitution]\non_missing = \"continue\"\n[logging]\nlevel = \"info\"\n",
            )?;

            unsafe {
                env::set_var("REPLACE_BAZEL_DEPS_SUBSTITUTION__ON_MISSING", "fail");
            }

            let config = Config::load_from_dir(temp_dir.path())?;

            assert_eq!(config.substitution.on_missing, MissingPlaceholder::Fail);
            assert_eq!(config.logging.level, "info");
            Ok(())
        })
    }

    #[test]
    #[serial]
    fn test_short_env_vars() -> Result<()> {
        with_isolated_env(|| -> Result<()> {
            let temp_dir = TempDir::new()?;

            unsafe {
                env::set_var("REPLACE_BAZEL_DEPS_ON_MISSING", "FAIL");
                env::set_var("REPLACE_BAZEL_DEPS_LOG", "trace");
            }

            let config = Config::load_from_dir(temp_dir.path())?;

            assert_eq!(config.substitution.on_missing, MissingPlaceholder::Fail);
            assert_eq!(config.logging.level, "trace");
            Ok(())
        })
    }

    #[test]
    #[serial]
    fn test_invalid_policy_in_file_is_rejected() -> Result<()> {
        with_isolated_env(|| -> Result<()> {
            let temp_dir = TempDir::new()?;
            write(
                temp_dir.path().join(CONFIG_FILE_NAME),
                "[substitution]\non_missing = \"abort\"\n",
            )?;

            assert!(Config::load_from_dir(temp_dir.path()).is_err());
            Ok(())
        })
    }

    #[test]
    fn test_parse_policy_and_format() {
        assert_eq!("continue".parse::<MissingPlaceholder>().unwrap(), MissingPlaceholder::Continue);
        assert_eq!("Fail".parse::<MissingPlaceholder>().unwrap(), MissingPlaceholder::Fail);
        assert!("stop".parse::<MissingPlaceholder>().is_err());
        assert_eq!(MissingPlaceholder::Fail.to_string(), "fail");

        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}

//! Configuration file support for maven-clients.
//!
//! Provides YAML-based configuration through `maven-clients.config.yml`
//! files and merges it with command-line overrides.

use anyhow::{bail, Context};
use maven_clients::adapters::outbound::network::{DEFAULT_REPOSITORY_URL, DEFAULT_USAGE_INDEX_URL};
use maven_clients::application::dto::{CollectorSettings, OutputFormat};
use maven_clients::client_discovery::policies::{transient_only, Backoff, RetryPolicy};
use maven_clients::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Args;

const CONFIG_FILENAME: &str = "maven-clients.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub repository_url: Option<String>,
    pub usage_index_url: Option<String>,
    pub metadata_rate: Option<f64>,
    pub usage_index_rate: Option<f64>,
    pub cooldown_secs: Option<u64>,
    pub max_attempts: Option<u32>,
    pub concurrency: Option<usize>,
    pub fail_fast: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    load_config_from_path(&config_path).map(Some)
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(format) = &config.format {
        format
            .parse::<OutputFormat>()
            .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
    }
    for (name, url) in [
        ("repository_url", &config.repository_url),
        ("usage_index_url", &config.usage_index_url),
    ] {
        if let Some(url) = url {
            validate_url(name, url)?;
        }
    }
    for (name, rate) in [
        ("metadata_rate", config.metadata_rate),
        ("usage_index_rate", config.usage_index_rate),
    ] {
        if let Some(rate) = rate {
            validate_rate(name, rate)?;
        }
    }
    if config.max_attempts == Some(0) {
        bail!(
            "Invalid config: max_attempts must be at least 1.\n\n\
             💡 Hint: Leave max_attempts out to retry failed requests forever."
        );
    }
    if config.concurrency == Some(0) {
        bail!("Invalid config: concurrency must be at least 1.");
    }
    Ok(())
}

fn validate_url(name: &str, url: &str) -> Result<()> {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        bail!(
            "Invalid config: {} must be an http(s) URL, got '{}'.",
            name,
            url
        );
    }
    Ok(())
}

fn validate_rate(name: &str, rate: f64) -> Result<()> {
    if !rate.is_finite() || rate <= 0.0 {
        bail!(
            "Invalid config: {} must be a positive number of requests per second, got {}.",
            name,
            rate
        );
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "unknown config field will be ignored");
    }
}

/// Options of one run after merging CLI flags over the config file over defaults.
#[derive(Debug)]
pub struct RunOptions {
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub repository_url: String,
    pub usage_index_url: String,
    pub collector: CollectorSettings,
}

impl RunOptions {
    pub fn resolve(args: &Args, file: Option<ConfigFile>) -> Result<Self> {
        let file = file.unwrap_or_default();
        let defaults = CollectorSettings::default();

        let format = match (args.format, &file.format) {
            (Some(format), _) => format,
            (None, Some(format)) => format.parse().map_err(|e: String| anyhow::anyhow!(e))?,
            (None, None) => OutputFormat::default(),
        };

        let repository_url = args
            .repository_url
            .clone()
            .or(file.repository_url)
            .unwrap_or_else(|| DEFAULT_REPOSITORY_URL.to_string());
        let usage_index_url = args
            .usage_index_url
            .clone()
            .or(file.usage_index_url)
            .unwrap_or_else(|| DEFAULT_USAGE_INDEX_URL.to_string());
        validate_url("repository_url", &repository_url)?;
        validate_url("usage_index_url", &usage_index_url)?;

        let mut retry_policy = RetryPolicy::default();
        if let Some(cooldown) = args.cooldown_secs.or(file.cooldown_secs) {
            retry_policy = retry_policy.with_backoff(Backoff::Fixed(Duration::from_secs(cooldown)));
        }
        if let Some(max_attempts) = args.max_attempts.or(file.max_attempts) {
            if max_attempts == 0 {
                bail!("max_attempts must be at least 1");
            }
            retry_policy = retry_policy.with_max_attempts(max_attempts);
        }
        if args.fail_fast || file.fail_fast.unwrap_or(false) {
            retry_policy = retry_policy.with_predicate(transient_only);
        }

        let collector = CollectorSettings {
            metadata_rate: args
                .metadata_rate
                .or(file.metadata_rate)
                .unwrap_or(defaults.metadata_rate),
            usage_index_rate: args
                .usage_index_rate
                .or(file.usage_index_rate)
                .unwrap_or(defaults.usage_index_rate),
            retry_policy,
            concurrency: args
                .concurrency
                .or(file.concurrency)
                .unwrap_or(defaults.concurrency),
        };
        collector.validate()?;

        Ok(Self {
            format,
            output: args.output.clone(),
            repository_url,
            usage_index_url,
            collector,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["maven-clients"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "config.yml",
            r#"
format: json
repository_url: https://repo.example.com/maven2
usage_index_url: https://index.example.com
metadata_rate: 1.5
usage_index_rate: 2
cooldown_secs: 30
max_attempts: 5
concurrency: 3
fail_fast: true
"#,
        );

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.format.as_deref(), Some("json"));
        assert_eq!(
            config.repository_url.as_deref(),
            Some("https://repo.example.com/maven2")
        );
        assert_eq!(config.metadata_rate, Some(1.5));
        assert_eq!(config.usage_index_rate, Some(2.0));
        assert_eq!(config.cooldown_secs, Some(30));
        assert_eq!(config.max_attempts, Some(5));
        assert_eq!(config.concurrency, Some(3));
        assert_eq!(config.fail_fast, Some(true));
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "config.yml", "format: text\nexclude_packages: [a]\n");

        let config = load_config_from_path(&path).unwrap();
        assert!(config.unknown_fields.contains_key("exclude_packages"));
    }

    #[test]
    fn test_discover_config() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());

        write_config(&dir, CONFIG_FILENAME, "concurrency: 2\n");
        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.concurrency, Some(2));
    }

    #[test]
    fn test_load_config_missing_file() {
        let error = load_config_from_path(Path::new("/nonexistent/config.yml")).unwrap_err();
        assert!(error.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "bad.yml", "invalid: yaml: [[[broken");

        let error = load_config_from_path(&path).unwrap_err();
        assert!(error.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_validation_errors() {
        let dir = TempDir::new().unwrap();
        for (content, expected) in [
            ("metadata_rate: 0\n", "metadata_rate"),
            ("usage_index_rate: -1\n", "usage_index_rate"),
            ("max_attempts: 0\n", "max_attempts"),
            ("concurrency: 0\n", "concurrency"),
            ("format: xml\n", "Invalid format"),
            ("repository_url: ftp://repo\n", "repository_url"),
        ] {
            let path = write_config(&dir, "config.yml", content);
            let error = load_config_from_path(&path).unwrap_err();
            assert!(
                error.to_string().contains(expected),
                "{} should mention {}: {}",
                content.trim(),
                expected,
                error
            );
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let options = RunOptions::resolve(&args(&[]), None).unwrap();

        assert_eq!(options.format, OutputFormat::Text);
        assert_eq!(options.output, None);
        assert_eq!(options.repository_url, DEFAULT_REPOSITORY_URL);
        assert_eq!(options.usage_index_url, DEFAULT_USAGE_INDEX_URL);
        assert_eq!(options.collector.metadata_rate, 2.5);
        assert_eq!(options.collector.usage_index_rate, 4.0);
        assert_eq!(options.collector.concurrency, 1);
        assert_eq!(options.collector.retry_policy.max_attempts(), None);
        assert_eq!(
            options.collector.retry_policy.backoff(),
            Backoff::Fixed(Duration::from_secs(10))
        );
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let file = ConfigFile {
            format: Some("json".to_string()),
            metadata_rate: Some(1.0),
            max_attempts: Some(3),
            concurrency: Some(2),
            cooldown_secs: Some(60),
            ..ConfigFile::default()
        };

        let options = RunOptions::resolve(
            &args(&["--format", "text", "--max-attempts", "7", "--cooldown-secs", "1"]),
            Some(file),
        )
        .unwrap();

        assert_eq!(options.format, OutputFormat::Text);
        assert_eq!(options.collector.metadata_rate, 1.0);
        assert_eq!(options.collector.concurrency, 2);
        assert_eq!(options.collector.retry_policy.max_attempts(), Some(7));
        assert_eq!(
            options.collector.retry_policy.backoff(),
            Backoff::Fixed(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_fail_fast_stops_on_rejected_requests() {
        let rejected: anyhow::Error =
            maven_clients::shared::error::CollectorError::UnexpectedStatus {
                service: "mvnrepository.com",
                status: 403,
                url: "https://mvnrepository.com/artifact/g/lib/1.0/usages?p=1".to_string(),
            }
            .into();

        let fail_fast = RunOptions::resolve(&args(&["--fail-fast"]), None).unwrap();
        assert!(!fail_fast.collector.retry_policy.is_retryable(&rejected));

        let default = RunOptions::resolve(&args(&[]), None).unwrap();
        assert!(default.collector.retry_policy.is_retryable(&rejected));
    }

    #[test]
    fn test_resolve_rejects_invalid_cli_values() {
        assert!(RunOptions::resolve(&args(&["--concurrency", "0"]), None).is_err());
        assert!(RunOptions::resolve(&args(&["--max-attempts", "0"]), None).is_err());
        assert!(RunOptions::resolve(&args(&["--metadata-rate", "0"]), None).is_err());
        assert!(RunOptions::resolve(&args(&["--repository-url", "repo"]), None).is_err());
    }
}

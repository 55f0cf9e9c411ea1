//! Site configuration loader describing the deployment origin and shared metadata.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// File name searched for by [`SiteConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "site.config.json";

/// Environment variable overriding the configured origin.
pub const BASE_URL_ENV: &str = "SITE_BASE_URL";

/// Deployment-wide settings shared by the canonical URL and head metadata helpers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
  /// Origin the site is served from, without a trailing slash.
  pub base_url: String,
  /// Site name used for `og:site_name`.
  pub site_name: String,
  /// Value of the `author` meta tag.
  pub author: String,
  /// Keywords used when a page does not declare its own.
  pub default_keywords: String,
  /// Path of the default social image, relative to the origin.
  pub default_og_image: String,
}

impl Default for SiteConfig {
  fn default() -> Self {
    Self {
      base_url: "https://web.terracloud.fr".into(),
      site_name: "TerraCloud".into(),
      author: "TerraCloud".into(),
      default_keywords: "AWS, Cloud, DevOps, Architecture, Formation, Migration, Terraform, Kubernetes"
        .into(),
      default_og_image: "/logo-orange.png".into(),
    }
  }
}

/// Errors raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The file exists but could not be read.
  #[error("failed to read {}: {source}", path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },
  /// The file is not valid configuration JSON.
  #[error("failed to parse {}: {source}", path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_json::Error,
  },
}

impl SiteConfig {
  /// Load `site.config.json` from `dir`, then apply the environment override.
  ///
  /// A missing or unreadable file yields the defaults so callers can keep going.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    let config = match Self::load_from_path(&candidate) {
      Ok(config) => config,
      Err(err) => {
        warn!(error = %err, "falling back to default site configuration");
        Self::default()
      }
    };
    config.with_env_override(std::env::var(BASE_URL_ENV).ok().as_deref())
  }

  /// Read configuration from a specific JSON file. A missing file yields the defaults.
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
      Ok(contents) => contents,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
        return Ok(Self::default());
      }
      Err(err) => {
        return Err(ConfigError::Io {
          path: path.to_path_buf(),
          source: err,
        });
      }
    };

    let config: SiteConfig = serde_json::from_str(&contents).map_err(|err| ConfigError::Parse {
      path: path.to_path_buf(),
      source: err,
    })?;
    Ok(config.normalised())
  }

  /// Replace the origin with `base_url` when it is set and non-empty.
  pub fn with_env_override(self, base_url: Option<&str>) -> Self {
    match base_url.map(str::trim).filter(|value| !value.is_empty()) {
      Some(value) => Self {
        base_url: value.to_string(),
        ..self
      }
      .normalised(),
      None => self,
    }
  }

  /// Absolute URL of the default social image.
  pub fn default_og_image_url(&self) -> String {
    let base = self.base_url.trim_end_matches('/');
    if self.default_og_image.starts_with('/') {
      format!("{}{}", base, self.default_og_image)
    } else {
      format!("{}/{}", base, self.default_og_image)
    }
  }

  fn normalised(mut self) -> Self {
    let trimmed = self.base_url.trim().trim_end_matches('/');
    self.base_url = trimmed.to_string();
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn missing_file_yields_defaults() {
    let temp = tempdir().expect("failed to create temp dir");
    let config = SiteConfig::load_from_path(temp.path().join(DEFAULT_CONFIG_FILE))
      .expect("missing files should not produce an error");
    assert_eq!(config, SiteConfig::default());
  }

  #[test]
  fn reads_partial_configuration() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join(DEFAULT_CONFIG_FILE);
    fs::write(
      &path,
      r#"{"baseUrl": "https://example.com/", "siteName": "Example"}"#,
    )
    .expect("failed to write config");

    let config = SiteConfig::load_from_path(&path).expect("configuration should load");
    assert_eq!(config.base_url, "https://example.com");
    assert_eq!(config.site_name, "Example");
    assert_eq!(config.author, "TerraCloud");
  }

  #[test]
  fn malformed_file_is_a_parse_error() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join(DEFAULT_CONFIG_FILE);
    fs::write(&path, "{ not json").expect("failed to write config");

    let err = SiteConfig::load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
  }

  #[test]
  fn discover_falls_back_on_parse_errors() {
    let temp = tempdir().expect("failed to create temp dir");
    fs::write(temp.path().join(DEFAULT_CONFIG_FILE), "[]").expect("failed to write config");

    let config = SiteConfig::discover(temp.path());
    assert_eq!(config.site_name, SiteConfig::default().site_name);
  }

  #[test]
  fn env_override_replaces_origin() {
    let config = SiteConfig::default().with_env_override(Some(" https://preview.example/ "));
    assert_eq!(config.base_url, "https://preview.example");

    let config = SiteConfig::default().with_env_override(Some(""));
    assert_eq!(config.base_url, "https://web.terracloud.fr");
  }

  #[test]
  fn default_og_image_is_absolute() {
    let config = SiteConfig::default();
    assert_eq!(
      config.default_og_image_url(),
      "https://web.terracloud.fr/logo-orange.png"
    );
  }

  #[test]
  fn default_og_image_ignores_trailing_slash_on_origin() {
    let config = SiteConfig {
      base_url: "https://example.com/".into(),
      default_og_image: "social/card.png".into(),
      ..SiteConfig::default()
    };
    assert_eq!(config.default_og_image_url(), "https://example.com/social/card.png");

    let config = SiteConfig {
      base_url: "https://example.com/".into(),
      ..SiteConfig::default()
    };
    assert_eq!(config.default_og_image_url(), "https://example.com/logo-orange.png");
  }
}

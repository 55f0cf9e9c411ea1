//! Language tags and the `/en` path prefix convention.
//!
//! French is the default language and lives at the site root; English pages
//! are served from the same paths under `/en`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path prefix carrying English pages.
pub const ENGLISH_PREFIX: &str = "/en";

/// Languages supported by the site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  /// French, the default and canonical language.
  #[default]
  Fr,
  /// English.
  En,
}

impl Language {
  /// Every supported language, default first.
  pub const ALL: [Language; 2] = [Language::Fr, Language::En];

  /// Detect the language from a path prefix.
  pub fn from_path(path: &str) -> Self {
    if has_english_prefix(path) {
      Language::En
    } else {
      Language::Fr
    }
  }

  /// Parse a language tag, falling back to French for unsupported values.
  pub fn parse(tag: &str) -> Self {
    match tag.trim().to_ascii_lowercase().as_str() {
      "en" => Language::En,
      _ => Language::Fr,
    }
  }

  /// Lowercase tag as used in `hreflang` and `lang` attributes.
  pub fn as_str(self) -> &'static str {
    match self {
      Language::Fr => "fr",
      Language::En => "en",
    }
  }

  /// Open Graph locale.
  pub fn og_locale(self) -> &'static str {
    match self {
      Language::Fr => "fr_FR",
      Language::En => "en_US",
    }
  }

  /// Path prefix for this language (empty for French).
  pub fn path_prefix(self) -> &'static str {
    match self {
      Language::Fr => "",
      Language::En => ENGLISH_PREFIX,
    }
  }
}

impl fmt::Display for Language {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// True for `/en` and anything under `/en/`.
pub fn has_english_prefix(path: &str) -> bool {
  path
    .strip_prefix(ENGLISH_PREFIX)
    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Remove the `/en` prefix, yielding the French path (`/en` maps to `/`).
pub fn strip_language_prefix(path: &str) -> &str {
  match path.strip_prefix(ENGLISH_PREFIX) {
    Some("") => "/",
    Some(rest) if rest.starts_with('/') => rest,
    _ => path,
  }
}

/// Path the language switcher navigates to, or `None` when the current path already
/// belongs to `target`.
pub fn switch_language_path(path: &str, target: Language) -> Option<String> {
  match target {
    Language::Fr => has_english_prefix(path).then(|| strip_language_prefix(path).to_string()),
    Language::En => {
      let prefix = Language::En.path_prefix();
      if path.starts_with(prefix) {
        None
      } else if path == "/" {
        Some(format!("{prefix}/"))
      } else {
        Some(format!("{prefix}{path}"))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn detects_language_from_prefix() {
    assert_eq!(Language::from_path("/en"), Language::En);
    assert_eq!(Language::from_path("/en/"), Language::En);
    assert_eq!(Language::from_path("/en/blog"), Language::En);
    assert_eq!(Language::from_path("/"), Language::Fr);
    assert_eq!(Language::from_path("/english"), Language::Fr);
    assert_eq!(Language::from_path("/services"), Language::Fr);
  }

  #[test]
  fn parses_tags_with_french_fallback() {
    assert_eq!(Language::parse("EN"), Language::En);
    assert_eq!(Language::parse(" fr "), Language::Fr);
    assert_eq!(Language::parse("de"), Language::Fr);
    assert_eq!(Language::parse(""), Language::Fr);
  }

  #[test]
  fn strips_english_prefix() {
    assert_eq!(strip_language_prefix("/en"), "/");
    assert_eq!(strip_language_prefix("/en/"), "/");
    assert_eq!(strip_language_prefix("/en/services/devops"), "/services/devops");
    assert_eq!(strip_language_prefix("/english"), "/english");
    assert_eq!(strip_language_prefix("/blog"), "/blog");
  }

  #[test]
  fn switches_to_french() {
    assert_eq!(
      switch_language_path("/en/services", Language::Fr).as_deref(),
      Some("/services")
    );
    assert_eq!(switch_language_path("/en", Language::Fr).as_deref(), Some("/"));
    assert_eq!(switch_language_path("/services", Language::Fr), None);
  }

  #[test]
  fn switches_to_english() {
    assert_eq!(switch_language_path("/", Language::En).as_deref(), Some("/en/"));
    assert_eq!(
      switch_language_path("/a-propos", Language::En).as_deref(),
      Some("/en/a-propos")
    );
    assert_eq!(switch_language_path("/en/blog", Language::En), None);
  }

  #[test]
  fn path_prefixes_and_locales() {
    assert_eq!(Language::Fr.path_prefix(), "");
    assert_eq!(Language::En.path_prefix(), "/en");
    assert_eq!(Language::Fr.og_locale(), "fr_FR");
    assert_eq!(Language::En.og_locale(), "en_US");
  }

  #[test]
  fn serialises_as_lowercase_tag() {
    assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
    let parsed: Language = serde_json::from_str("\"fr\"").unwrap();
    assert_eq!(parsed, Language::Fr);
  }
}

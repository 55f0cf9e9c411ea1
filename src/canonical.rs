//! Canonical and alternate-language URLs for page metadata.

use serde::Serialize;
use url::Url;

use crate::language::{ENGLISH_PREFIX, Language, strip_language_prefix};

/// Per-language alternate URLs (`hreflang`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternates {
  /// French URL, identical to the canonical URL unless an override is used.
  pub fr: String,
  /// English URL.
  pub en: String,
}

impl Alternates {
  /// URL for `language`.
  pub fn get(&self, language: Language) -> &str {
    match language {
      Language::Fr => &self.fr,
      Language::En => &self.en,
    }
  }
}

/// Canonical URL set for the current location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalUrls {
  /// Preferred absolute URL (French path).
  pub canonical: String,
  /// Alternate URLs per language.
  pub alternates: Alternates,
  /// Language of the current path.
  pub language: Language,
}

impl CanonicalUrls {
  /// Derive the canonical URL set for `path` on `base_origin`.
  ///
  /// An explicit `override_url` (e.g. a blog post first published elsewhere) replaces the
  /// canonical URL and both alternates; a path-only override is appended to the origin.
  pub fn resolve(path: &str, override_url: Option<&str>, base_origin: &str) -> Self {
    let base = base_origin.trim_end_matches('/');
    let language = Language::from_path(path);

    if let Some(custom) = override_url.filter(|value| !value.is_empty()) {
      let canonical = absolutize(custom, base);
      return Self {
        alternates: Alternates {
          fr: canonical.clone(),
          en: canonical.clone(),
        },
        canonical,
        language,
      };
    }

    let canonical_path = strip_language_prefix(path);
    let (canonical, en) = if canonical_path == "/" {
      (base.to_string(), format!("{base}{ENGLISH_PREFIX}/"))
    } else {
      (
        format!("{base}{canonical_path}"),
        format!("{base}{ENGLISH_PREFIX}{canonical_path}"),
      )
    };

    Self {
      alternates: Alternates {
        fr: canonical.clone(),
        en,
      },
      canonical,
      language,
    }
  }

  /// Whether the alternates are distinct per-language URLs (false for overrides).
  pub fn has_language_alternates(&self) -> bool {
    self.alternates.fr != self.alternates.en
  }
}

fn absolutize(candidate: &str, base: &str) -> String {
  match Url::parse(candidate) {
    Ok(url) if url.has_host() => candidate.to_string(),
    _ => format!("{base}{candidate}"),
  }
}

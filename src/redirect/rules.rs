//! Static redirect table translating legacy WordPress URLs to site routes.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Exact legacy paths, evaluated before any pattern rule.
///
/// `/en` variants are listed explicitly rather than derived. The trailing-slash keys are
/// shadowed by slash normalisation and kept so the table mirrors the published redirects.
const LEGACY_EXACT: &[(&str, &str)] = &[
  // feeds
  ("/feed", "/blog"),
  ("/feed/", "/blog"),
  ("/en/feed", "/en/blog"),
  ("/en/feed/", "/en/blog"),
  // JSON API
  ("/wp-json", "/"),
  ("/wp-json/", "/"),
  ("/en/wp-json", "/en/"),
  ("/en/wp-json/", "/en/"),
  // comments
  ("/comments", "/nous-contacter"),
  ("/comments/", "/nous-contacter"),
  ("/en/comments", "/en/nous-contacter"),
  ("/en/comments/", "/en/nous-contacter"),
  // uploads
  ("/wp-content", "/"),
  ("/wp-content/", "/"),
  ("/en/wp-content", "/en/"),
  ("/en/wp-content/", "/en/"),
  // admin and login
  ("/wp-admin", "/"),
  ("/wp-admin/", "/"),
  ("/wp-login", "/"),
  ("/wp-login/", "/"),
  ("/en/wp-admin", "/en/"),
  ("/en/wp-admin/", "/en/"),
  ("/en/wp-login", "/en/"),
  ("/en/wp-login/", "/en/"),
  // first pagination page
  ("/blog/page/1", "/blog"),
  ("/blog/page/1/", "/blog"),
  ("/en/blog/page/1", "/en/blog"),
  ("/en/blog/page/1/", "/en/blog"),
  // category index
  ("/blog/category", "/blog"),
  ("/blog/category/", "/blog"),
  ("/en/blog/category", "/en/blog"),
  ("/en/blog/category/", "/en/blog"),
  // tag index
  ("/blog/tag", "/blog"),
  ("/blog/tag/", "/blog"),
  ("/en/blog/tag", "/en/blog"),
  ("/en/blog/tag/", "/en/blog"),
];

/// Pattern rules as `(label, pattern, target)`, tested in order after the exact table.
///
/// Digits are spelled `[0-9]` so archive years only match ASCII numerals.
const LEGACY_PATTERNS: &[(&str, &str, &str)] = &[
  ("blog-pagination", r"^/blog/page/[0-9]+/?$", "/blog"),
  ("blog-pagination-en", r"^/en/blog/page/[0-9]+/?$", "/en/blog"),
  ("blog-category", r"^/blog/category/[^/]+/?$", "/blog"),
  ("blog-category-en", r"^/en/blog/category/[^/]+/?$", "/en/blog"),
  ("blog-tag", r"^/blog/tag/[^/]+/?$", "/blog"),
  ("blog-tag-en", r"^/en/blog/tag/[^/]+/?$", "/en/blog"),
  ("blog-year", r"^/blog/[0-9]{4}/?$", "/blog"),
  ("blog-year-en", r"^/en/blog/[0-9]{4}/?$", "/en/blog"),
  ("blog-year-month", r"^/blog/[0-9]{4}/[0-9]{2}/?$", "/blog"),
  ("blog-year-month-en", r"^/en/blog/[0-9]{4}/[0-9]{2}/?$", "/en/blog"),
  // the `/psantus` branch is a prefix match: anything below it is an old author page
  ("author", r"^(?:/psantus/?|/author/[^/]+/?$)", "/a-propos"),
  ("author-en", r"^/en(?:/psantus/?|/author/[^/]+/?$)", "/en/a-propos"),
];

/// A single redirect rule.
#[derive(Debug, Clone)]
pub enum RedirectRule {
  /// Redirect one specific path.
  Exact {
    /// Legacy path matched verbatim.
    source: String,
    /// Replacement path.
    target: String,
  },
  /// Redirect every path matching a regular expression.
  Pattern {
    /// Short identifier used in listings and logs.
    label: String,
    /// Compiled matcher applied to the whole path.
    matcher: Regex,
    /// Replacement path.
    target: String,
  },
}

impl RedirectRule {
  /// Build an exact-match rule.
  pub fn exact(source: impl Into<String>, target: impl Into<String>) -> Self {
    Self::Exact {
      source: source.into(),
      target: target.into(),
    }
  }

  /// Build a pattern rule, compiling `pattern`.
  pub fn pattern(
    label: impl Into<String>,
    pattern: &str,
    target: impl Into<String>,
  ) -> Result<Self, regex::Error> {
    Ok(Self::Pattern {
      label: label.into(),
      matcher: Regex::new(pattern)?,
      target: target.into(),
    })
  }

  /// Whether this rule applies to `path`.
  pub fn matches(&self, path: &str) -> bool {
    match self {
      Self::Exact { source, .. } => source == path,
      Self::Pattern { matcher, .. } => matcher.is_match(path),
    }
  }

  /// Replacement path for matching requests.
  pub fn target(&self) -> &str {
    match self {
      Self::Exact { target, .. } | Self::Pattern { target, .. } => target,
    }
  }

  /// Serializable description of the rule.
  pub fn summary(&self) -> RuleSummary<'_> {
    match self {
      Self::Exact { source, target } => RuleSummary::Exact { source, target },
      Self::Pattern {
        label,
        matcher,
        target,
      } => RuleSummary::Pattern {
        label,
        pattern: matcher.as_str(),
        target,
      },
    }
  }
}

/// Borrowed, serializable view of a [`RedirectRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSummary<'a> {
  /// Exact-match rule.
  Exact {
    /// Legacy path.
    source: &'a str,
    /// Replacement path.
    target: &'a str,
  },
  /// Pattern rule.
  Pattern {
    /// Rule identifier.
    label: &'a str,
    /// Regular expression source.
    pattern: &'a str,
    /// Replacement path.
    target: &'a str,
  },
}

/// Ordered list of redirect rules; the first matching rule wins.
#[derive(Debug, Clone, Default)]
pub struct RedirectTable {
  rules: Vec<RedirectRule>,
}

impl RedirectTable {
  /// Create a table evaluating `rules` in order.
  pub fn new(rules: Vec<RedirectRule>) -> Self {
    Self { rules }
  }

  /// Process-wide table of legacy WordPress redirects.
  pub fn legacy() -> &'static RedirectTable {
    static TABLE: OnceLock<RedirectTable> = OnceLock::new();
    TABLE.get_or_init(|| {
      let exact = LEGACY_EXACT
        .iter()
        .map(|(source, target)| RedirectRule::exact(*source, *target));
      let patterns = LEGACY_PATTERNS.iter().map(|(label, pattern, target)| {
        RedirectRule::pattern(*label, pattern, *target).expect("invalid legacy redirect regex")
      });
      RedirectTable::new(exact.chain(patterns).collect())
    })
  }

  /// Rules in evaluation order.
  pub fn rules(&self) -> &[RedirectRule] {
    &self.rules
  }

  /// First rule matching `path`.
  pub fn find(&self, path: &str) -> Option<&RedirectRule> {
    self.rules.iter().find(|rule| rule.matches(path))
  }

  /// Serializable listing of every rule, in evaluation order.
  pub fn summaries(&self) -> Vec<RuleSummary<'_>> {
    self.rules.iter().map(RedirectRule::summary).collect()
  }
}

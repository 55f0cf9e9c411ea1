//! Per-navigation redirect decisions and the host navigation seam.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::rules::RedirectTable;

/// Navigation replacement computed for a legacy location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
  /// Canonical path to navigate to.
  pub path: String,
  /// Query string carried over verbatim (with its leading `?`, or empty).
  pub query: String,
}

impl Redirect {
  /// Location handed to the host router: path followed by the query string.
  pub fn location(&self) -> String {
    format!("{}{}", self.path, self.query)
  }
}

impl fmt::Display for Redirect {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}", self.path, self.query)
  }
}

/// Current location as reported by the host router.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
  /// Path component, starting with `/`.
  pub path: String,
  /// Query string including the leading `?`, or empty.
  pub search: String,
  /// Fragment including the leading `#`, or empty.
  pub hash: String,
}

impl Location {
  /// Split a relative href such as `/blog/?ref=x#top` into its components.
  pub fn parse(href: &str) -> Self {
    let (rest, hash) = match href.find('#') {
      Some(index) => href.split_at(index),
      None => (href, ""),
    };
    let (path, search) = match rest.find('?') {
      Some(index) => rest.split_at(index),
      None => (rest, ""),
    };
    let path = if path.is_empty() { "/" } else { path };

    Self {
      path: path.to_string(),
      search: search.to_string(),
      hash: hash.to_string(),
    }
  }
}

/// Host-side history, able to replace the current entry.
pub trait HistoryNavigator {
  /// Replace the current history entry with `location` (no new entry is pushed).
  fn replace(&mut self, location: &str);
}

impl RedirectTable {
  /// Decide whether `path` must be replaced, applying a single rule.
  ///
  /// A trailing slash is stripped before any table rule is consulted. The returned target
  /// is not resolved again; see [`RedirectTable::resolve_chain`].
  pub fn resolve(&self, path: &str, query: &str) -> Option<Redirect> {
    if let Some(trimmed) = strip_trailing_slash(path) {
      return Some(Redirect {
        path: trimmed.to_string(),
        query: query.to_string(),
      });
    }

    self.find(path).map(|rule| Redirect {
      path: rule.target().to_string(),
      query: query.to_string(),
    })
  }

  /// Follow redirects the way the host does after each replace, stopping at a canonical
  /// path or after `max_steps` replacements. Returns `None` when nothing was redirected.
  pub fn resolve_chain(&self, path: &str, query: &str, max_steps: usize) -> Option<Redirect> {
    let mut current: Option<Redirect> = None;

    for _ in 0..max_steps {
      let next = match &current {
        Some(redirect) => self.resolve(&redirect.path, &redirect.query),
        None => self.resolve(path, query),
      };
      match next {
        Some(redirect) => current = Some(redirect),
        None => break,
      }
    }

    current
  }
}

/// Resolve `path` against the legacy redirect table.
pub fn resolve(path: &str, query: &str) -> Option<Redirect> {
  RedirectTable::legacy().resolve(path, query)
}

/// Resolve `path` against the legacy table until it settles.
pub fn resolve_chain(path: &str, query: &str, max_steps: usize) -> Option<Redirect> {
  RedirectTable::legacy().resolve_chain(path, query, max_steps)
}

fn strip_trailing_slash(path: &str) -> Option<&str> {
  if path.len() > 1 {
    path.strip_suffix('/')
  } else {
    None
  }
}

/// Applies redirects on navigation events.
#[derive(Debug, Clone, Copy)]
pub struct RedirectHandler<'a> {
  table: &'a RedirectTable,
}

impl RedirectHandler<'static> {
  /// Handler backed by the legacy WordPress table.
  pub fn legacy() -> Self {
    Self::new(RedirectTable::legacy())
  }
}

impl<'a> RedirectHandler<'a> {
  /// Create a handler evaluating `table`.
  pub fn new(table: &'a RedirectTable) -> Self {
    Self { table }
  }

  /// React to a location change, replacing the history entry at most once.
  ///
  /// The fragment is dropped from the replacement location.
  pub fn on_navigation<N>(&self, location: &Location, navigator: &mut N) -> Option<Redirect>
  where
    N: HistoryNavigator + ?Sized,
  {
    let redirect = self.table.resolve(&location.path, &location.search)?;
    debug!(from = %location.path, to = %redirect, "replacing legacy location");
    navigator.replace(&redirect.location());
    Some(redirect)
  }
}

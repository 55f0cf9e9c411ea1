//! Legacy URL redirects.
//!
//! The rule table lives in [`rules`] and is built once per process; [`resolver`] turns a
//! location into at most one history replacement.

mod resolver;
mod rules;

pub use resolver::{HistoryNavigator, Location, Redirect, RedirectHandler, resolve, resolve_chain};
pub use rules::{RedirectRule, RedirectTable, RuleSummary};

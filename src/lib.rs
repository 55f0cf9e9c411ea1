#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod canonical;
pub mod config;
pub mod language;
pub mod redirect;
pub mod routes;
pub mod seo;

pub use canonical::{Alternates, CanonicalUrls};
pub use config::{ConfigError, SiteConfig};
pub use language::{Language, switch_language_path};
pub use redirect::{HistoryNavigator, Location, Redirect, RedirectHandler, RedirectTable};
pub use routes::{Page, RouteMatch, match_route, static_routes};
pub use seo::{HeadTag, PageMeta, head_tags, render_head};

//! Site page table and path matching.

use serde::Serialize;

use crate::language::{Language, strip_language_prefix};

/// Pages served by the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum Page {
  /// Landing page.
  Home,
  /// Services overview.
  Services,
  /// DevOps service.
  DevOps,
  /// Part-time CTO service.
  PartTimeCto,
  /// Getting started on the cloud.
  CloudStart,
  /// AWS solutions architect service.
  AwsArchitect,
  /// Software architecture service.
  SoftwareArchitecture,
  /// Migration to AWS.
  AwsMigration,
  /// AWS training.
  AwsTraining,
  /// Blog index.
  Blog,
  /// Single blog post.
  BlogPost {
    /// Post slug.
    slug: String,
  },
  /// About page.
  About,
  /// Customer references.
  CustomerReferences,
  /// Contact form.
  Contact,
  /// Appointment booking embed.
  BookAppointment,
  /// Legal notice.
  Legal,
}

const STATIC_PAGES: &[(&str, Page)] = &[
  ("/", Page::Home),
  ("/services", Page::Services),
  ("/services/devops", Page::DevOps),
  (
    "/services/cto-a-temps-partage-a-poitiers-freelance",
    Page::PartTimeCto,
  ),
  ("/services/demarrer-sur-le-cloud", Page::CloudStart),
  ("/services/architecte-solutions-aws", Page::AwsArchitect),
  ("/services/architecture-logicielle", Page::SoftwareArchitecture),
  ("/services/migration-vers-aws", Page::AwsMigration),
  ("/services/formation-aws", Page::AwsTraining),
  ("/blog", Page::Blog),
  ("/a-propos", Page::About),
  ("/a-propos/ils-nous-font-confiance", Page::CustomerReferences),
  ("/nous-contacter", Page::Contact),
  ("/prendre-rendez-vous", Page::BookAppointment),
  ("/mentions-legales", Page::Legal),
];

const BLOG_PREFIX: &str = "/blog/";

impl Page {
  /// French path of the page.
  pub fn french_path(&self) -> String {
    match self {
      Page::BlogPost { slug } => format!("{BLOG_PREFIX}{slug}"),
      page => STATIC_PAGES
        .iter()
        .find(|(_, candidate)| candidate == page)
        .map(|(path, _)| (*path).to_string())
        .unwrap_or_else(|| "/".to_string()),
    }
  }

  /// Path of the page in `language`; the English home page is `/en/`.
  pub fn path(&self, language: Language) -> String {
    let french = self.french_path();
    match language.path_prefix() {
      "" => french,
      prefix if french == "/" => format!("{prefix}/"),
      prefix => format!("{prefix}{french}"),
    }
  }
}

/// Page and language selected by a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
  /// Matched page.
  #[serde(flatten)]
  pub page: Page,
  /// Language implied by the path prefix.
  pub language: Language,
}

/// Match `path` against the page table. `None` means the page does not exist.
///
/// Matching ignores a trailing slash, as the client router does.
pub fn match_route(path: &str) -> Option<RouteMatch> {
  let language = Language::from_path(path);
  let french = strip_language_prefix(path);
  let french = if french.len() > 1 {
    french.strip_suffix('/').unwrap_or(french)
  } else {
    french
  };

  if let Some((_, page)) = STATIC_PAGES.iter().find(|(candidate, _)| *candidate == french) {
    return Some(RouteMatch {
      page: page.clone(),
      language,
    });
  }

  let slug = french.strip_prefix(BLOG_PREFIX)?;
  if slug.is_empty() || slug.contains('/') {
    return None;
  }

  Some(RouteMatch {
    page: Page::BlogPost {
      slug: slug.to_string(),
    },
    language,
  })
}

/// Every non-parameterised route, French pages first, in declaration order.
pub fn static_routes() -> Vec<String> {
  Language::ALL
    .iter()
    .flat_map(|language| STATIC_PAGES.iter().map(|(_, page)| page.path(*language)))
    .collect()
}

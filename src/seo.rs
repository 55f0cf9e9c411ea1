//! `<head>` metadata derived from the canonical URL set.

use std::fmt::Write as _;

use serde::Serialize;

use crate::canonical::CanonicalUrls;
use crate::config::SiteConfig;
use crate::language::Language;

/// Per-page metadata supplied by the page being rendered.
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
  /// Document title.
  pub title: String,
  /// Meta description.
  pub description: String,
  /// Keywords; the site defaults apply when absent.
  pub keywords: Option<String>,
  /// Absolute social image URL; the site default applies when absent.
  pub og_image: Option<String>,
  /// Open Graph type, `website` when absent.
  pub og_type: Option<String>,
  /// Ask crawlers not to index the page.
  pub no_index: bool,
  /// Explicit canonical URL, e.g. for republished blog posts.
  pub canonical: Option<String>,
}

/// One element to emit in `<head>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum HeadTag {
  /// `<html lang>` attribute.
  HtmlLang {
    /// Language tag.
    lang: Language,
  },
  /// `<title>`.
  Title {
    /// Title text.
    text: String,
  },
  /// `<meta name=... content=...>`.
  MetaName {
    /// Meta name.
    name: String,
    /// Meta content.
    content: String,
  },
  /// `<meta property=... content=...>`.
  MetaProperty {
    /// Meta property.
    property: String,
    /// Meta content.
    content: String,
  },
  /// `<link rel="canonical">`.
  Canonical {
    /// Canonical URL.
    href: String,
  },
  /// `<link rel="alternate" hreflang=...>`.
  Alternate {
    /// Language tag or `x-default`.
    hreflang: String,
    /// Alternate URL.
    href: String,
  },
}

impl HeadTag {
  fn name(name: &str, content: impl Into<String>) -> Self {
    Self::MetaName {
      name: name.to_string(),
      content: content.into(),
    }
  }

  fn property(property: &str, content: impl Into<String>) -> Self {
    Self::MetaProperty {
      property: property.to_string(),
      content: content.into(),
    }
  }

  fn alternate(hreflang: &str, href: &str) -> Self {
    Self::Alternate {
      hreflang: hreflang.to_string(),
      href: href.to_string(),
    }
  }
}

/// Build the head tags for `path` rendered with `meta`.
///
/// Hreflang alternates are only emitted without a canonical override, since an override
/// points every language at the same URL.
pub fn head_tags(config: &SiteConfig, path: &str, meta: &PageMeta) -> Vec<HeadTag> {
  let urls = CanonicalUrls::resolve(path, meta.canonical.as_deref(), &config.base_url);
  let og_image = meta
    .og_image
    .clone()
    .unwrap_or_else(|| config.default_og_image_url());
  let keywords = meta
    .keywords
    .clone()
    .unwrap_or_else(|| config.default_keywords.clone());
  let robots = if meta.no_index {
    "noindex, nofollow"
  } else {
    "index, follow"
  };

  let mut tags = vec![
    HeadTag::Title {
      text: meta.title.clone(),
    },
    HeadTag::name("description", meta.description.clone()),
    HeadTag::name("keywords", keywords),
    HeadTag::name("author", config.author.clone()),
    HeadTag::name("robots", robots),
    HeadTag::Canonical {
      href: urls.canonical.clone(),
    },
  ];

  if urls.has_language_alternates() {
    for language in Language::ALL {
      tags.push(HeadTag::alternate(language.as_str(), urls.alternates.get(language)));
    }
    tags.push(HeadTag::alternate("x-default", urls.alternates.get(Language::Fr)));
  }

  tags.extend([
    HeadTag::property("og:title", meta.title.clone()),
    HeadTag::property("og:description", meta.description.clone()),
    HeadTag::property("og:type", meta.og_type.as_deref().unwrap_or("website")),
    HeadTag::property("og:url", urls.canonical.clone()),
    HeadTag::property("og:image", og_image.clone()),
    HeadTag::property("og:locale", urls.language.og_locale()),
    HeadTag::property("og:site_name", config.site_name.clone()),
    HeadTag::name("twitter:card", "summary_large_image"),
    HeadTag::name("twitter:title", meta.title.clone()),
    HeadTag::name("twitter:description", meta.description.clone()),
    HeadTag::name("twitter:image", og_image),
    HeadTag::HtmlLang {
      lang: urls.language,
    },
  ]);

  tags
}

/// Serialise head tags to HTML, one element per line.
///
/// [`HeadTag::HtmlLang`] has no element of its own and is skipped.
pub fn render_head(tags: &[HeadTag]) -> String {
  let mut html = String::new();
  for tag in tags {
    // writing into a String cannot fail
    let _ = match tag {
      HeadTag::HtmlLang { .. } => continue,
      HeadTag::Title { text } => writeln!(html, "<title>{}</title>", escape_text(text)),
      HeadTag::MetaName { name, content } => writeln!(
        html,
        r#"<meta name="{}" content="{}">"#,
        escape_attr(name),
        escape_attr(content)
      ),
      HeadTag::MetaProperty { property, content } => writeln!(
        html,
        r#"<meta property="{}" content="{}">"#,
        escape_attr(property),
        escape_attr(content)
      ),
      HeadTag::Canonical { href } => {
        writeln!(html, r#"<link rel="canonical" href="{}">"#, escape_attr(href))
      }
      HeadTag::Alternate { hreflang, href } => writeln!(
        html,
        r#"<link rel="alternate" hreflang="{}" href="{}">"#,
        escape_attr(hreflang),
        escape_attr(href)
      ),
    };
  }
  html
}

fn escape_text(value: &str) -> String {
  value
    .replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
  escape_text(value)
    .replace('"', "&quot;")
    .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config() -> SiteConfig {
    SiteConfig {
      base_url: "https://example.com".into(),
      ..SiteConfig::default()
    }
  }

  fn meta() -> PageMeta {
    PageMeta {
      title: "Services".into(),
      description: "Cloud consulting".into(),
      ..PageMeta::default()
    }
  }

  fn find_name<'a>(tags: &'a [HeadTag], wanted: &str) -> Option<&'a str> {
    tags.iter().find_map(|tag| match tag {
      HeadTag::MetaName { name, content } if name == wanted => Some(content.as_str()),
      HeadTag::MetaProperty { property, content } if property == wanted => Some(content.as_str()),
      _ => None,
    })
  }

  fn alternates(tags: &[HeadTag]) -> Vec<(&str, &str)> {
    tags
      .iter()
      .filter_map(|tag| match tag {
        HeadTag::Alternate { hreflang, href } => Some((hreflang.as_str(), href.as_str())),
        _ => None,
      })
      .collect()
  }

  #[test]
  fn emits_canonical_and_language_alternates() {
    let tags = head_tags(&config(), "/en/services", &meta());

    assert!(tags.contains(&HeadTag::Canonical {
      href: "https://example.com/services".into()
    }));
    assert_eq!(alternates(&tags), vec![
      ("fr", "https://example.com/services"),
      ("en", "https://example.com/en/services"),
      ("x-default", "https://example.com/services"),
    ]);
    assert_eq!(find_name(&tags, "og:locale"), Some("en_US"));
    assert_eq!(find_name(&tags, "og:url"), Some("https://example.com/services"));
    assert!(tags.contains(&HeadTag::HtmlLang {
      lang: Language::En
    }));
  }

  #[test]
  fn override_suppresses_alternates() {
    let page = PageMeta {
      canonical: Some("https://partner.example/original-post".into()),
      ..meta()
    };
    let tags = head_tags(&config(), "/blog/original-post", &page);

    assert!(alternates(&tags).is_empty());
    assert!(!tags.iter().any(|tag| matches!(tag, HeadTag::Alternate { .. })));
    assert_eq!(
      find_name(&tags, "og:url"),
      Some("https://partner.example/original-post")
    );
  }

  #[test]
  fn applies_site_defaults() {
    let tags = head_tags(&config(), "/", &meta());

    assert_eq!(find_name(&tags, "robots"), Some("index, follow"));
    assert_eq!(find_name(&tags, "og:type"), Some("website"));
    assert_eq!(find_name(&tags, "og:locale"), Some("fr_FR"));
    assert_eq!(
      find_name(&tags, "og:image"),
      Some("https://example.com/logo-orange.png")
    );
    assert_eq!(
      find_name(&tags, "twitter:image"),
      Some("https://example.com/logo-orange.png")
    );
    assert_eq!(
      find_name(&tags, "keywords"),
      Some(SiteConfig::default().default_keywords.as_str())
    );
  }

  #[test]
  fn honours_no_index_and_page_overrides() {
    let page = PageMeta {
      no_index: true,
      og_type: Some("article".into()),
      og_image: Some("https://cdn.example/cover.png".into()),
      keywords: Some("terraform".into()),
      ..meta()
    };
    let tags = head_tags(&config(), "/blog/post", &page);

    assert_eq!(find_name(&tags, "robots"), Some("noindex, nofollow"));
    assert_eq!(find_name(&tags, "og:type"), Some("article"));
    assert_eq!(find_name(&tags, "og:image"), Some("https://cdn.example/cover.png"));
    assert_eq!(find_name(&tags, "keywords"), Some("terraform"));
  }

  #[test]
  fn relative_override_suppresses_alternates_on_trailing_slash_origin() {
    let config = SiteConfig {
      base_url: "https://example.com/".into(),
      ..SiteConfig::default()
    };
    let page = PageMeta {
      canonical: Some("/blog/original".into()),
      ..meta()
    };
    let tags = head_tags(&config, "/en/blog/copy", &page);

    assert!(alternates(&tags).is_empty());
    assert_eq!(find_name(&tags, "og:url"), Some("https://example.com/blog/original"));
    assert_eq!(
      find_name(&tags, "og:image"),
      Some("https://example.com/logo-orange.png")
    );
  }

  #[test]
  fn renders_escaped_html() {
    let page = PageMeta {
      title: "AWS & <DevOps>".into(),
      description: "Say \"hello\"".into(),
      ..PageMeta::default()
    };
    let html = render_head(&head_tags(&config(), "/", &page));

    assert!(html.contains("<title>AWS &amp; &lt;DevOps&gt;</title>"));
    assert!(html.contains(r#"<meta name="description" content="Say &quot;hello&quot;">"#));
    assert!(html.contains(r#"<link rel="canonical" href="https://example.com">"#));
    assert!(html.contains(r#"<link rel="alternate" hreflang="en" href="https://example.com/en/">"#));
    assert!(!html.contains("HtmlLang"));
  }
}

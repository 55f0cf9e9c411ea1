//! Command-line access to the redirect, canonical URL and head metadata helpers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use site_routing::config::BASE_URL_ENV;
use site_routing::redirect::RedirectTable;
use site_routing::{
  CanonicalUrls, Location, PageMeta, SiteConfig, head_tags, match_route, render_head,
  static_routes,
};

/// Upper bound on followed redirects; the legacy table settles in at most three.
const MAX_REDIRECT_STEPS: usize = 8;

#[derive(Debug, Parser)]
#[command(name = "site-routing", version, about)]
struct Cli {
  /// Configuration file (defaults to `site.config.json` in the working directory).
  #[arg(long, global = true)]
  config: Option<PathBuf>,
  /// Origin overriding the configured base URL.
  #[arg(long, global = true)]
  base_url: Option<String>,
  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Show the redirect applied to a location such as `/blog/?ref=x`.
  Resolve {
    location: String,
    /// Follow the redirect chain to its final location.
    #[arg(long)]
    follow: bool,
  },
  /// Print the canonical URL set as JSON.
  Canonical {
    path: String,
    /// Explicit canonical URL declared by the page.
    #[arg(long)]
    canonical: Option<String>,
  },
  /// Show the page a path renders.
  Route { path: String },
  /// Render the head tags for a page.
  Head {
    path: String,
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    keywords: Option<String>,
    #[arg(long)]
    og_image: Option<String>,
    #[arg(long)]
    og_type: Option<String>,
    #[arg(long)]
    no_index: bool,
    #[arg(long)]
    canonical: Option<String>,
  },
  /// Print the redirect table as JSON.
  Rules,
  /// List every static route.
  Routes,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let config = load_config(&cli)?;

  match cli.command {
    Command::Resolve { location, follow } => {
      let location = Location::parse(&location);
      let table = RedirectTable::legacy();
      let redirect = if follow {
        table.resolve_chain(&location.path, &location.search, MAX_REDIRECT_STEPS)
      } else {
        table.resolve(&location.path, &location.search)
      };
      match redirect {
        Some(redirect) => println!("{redirect}"),
        None => println!("no redirect"),
      }
    }
    Command::Canonical { path, canonical } => {
      let urls = CanonicalUrls::resolve(&path, canonical.as_deref(), &config.base_url);
      println!(
        "{}",
        serde_json::to_string_pretty(&urls).context("failed to serialise canonical URLs")?
      );
    }
    Command::Route { path } => match match_route(&path) {
      Some(matched) => println!(
        "{}",
        serde_json::to_string(&matched).context("failed to serialise route")?
      ),
      None => println!("not found"),
    },
    Command::Head {
      path,
      title,
      description,
      keywords,
      og_image,
      og_type,
      no_index,
      canonical,
    } => {
      let meta = PageMeta {
        title,
        description,
        keywords,
        og_image,
        og_type,
        no_index,
        canonical,
      };
      print!("{}", render_head(&head_tags(&config, &path, &meta)));
    }
    Command::Rules => {
      let summaries = RedirectTable::legacy().summaries();
      println!(
        "{}",
        serde_json::to_string_pretty(&summaries).context("failed to serialise redirect rules")?
      );
    }
    Command::Routes => {
      for route in static_routes() {
        println!("{route}");
      }
    }
  }

  Ok(())
}

fn load_config(cli: &Cli) -> Result<SiteConfig> {
  let config = match &cli.config {
    Some(path) => SiteConfig::load_from_path(path)
      .with_context(|| format!("failed to load configuration from {}", path.display()))?
      .with_env_override(std::env::var(BASE_URL_ENV).ok().as_deref()),
    None => {
      let cwd = std::env::current_dir().context("failed to resolve working directory")?;
      SiteConfig::discover(&cwd)
    }
  };
  Ok(config.with_env_override(cli.base_url.as_deref()))
}

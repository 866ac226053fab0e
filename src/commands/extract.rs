use anyhow::{Context, Result};
use std::path::PathBuf;

use wpreport::config::Config;
use wpreport::crawler::session::RequestSession;
use wpreport::crawler::{CollectionOutcome, Crawler};
use wpreport::report;
use wpreport::storage::SnapshotStore;
use wpreport::utils::normalize_target;

/// Command-line overrides for an extraction run
#[derive(Debug, Clone, Default)]
pub struct ExtractParams {
    pub target: String,
    pub output_dir: PathBuf,
    pub config: Option<PathBuf>,
    pub proxy: Option<String>,
    pub cookies: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub insecure: bool,
    pub per_page: Option<u32>,
}

impl ExtractParams {
    /// Load the base configuration and apply the flags on top of it
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::from_env()?,
        };

        if let Some(proxy) = &self.proxy {
            config.session.proxy = Some(proxy.clone());
        }
        if let Some(cookies) = &self.cookies {
            config.session.cookies = Some(cookies.clone());
        }
        if let Some(user) = &self.user {
            config.session.username = Some(user.clone());
        }
        if let Some(password) = &self.password {
            config.session.password = Some(password.clone());
        }
        if self.insecure {
            config.session.ignore_ssl_verify = true;
        }
        if let Some(per_page) = self.per_page {
            config.crawl.per_page = per_page;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

pub async fn extract(params: ExtractParams) -> Result<()> {
    let config = params.resolve_config()?;
    let target = normalize_target(&params.target)?;

    println!("Extracting WordPress data");
    println!("=========================");
    println!("  Target: {target}");
    println!("  Output: {}", params.output_dir.display());

    let session = RequestSession::new(&config.session).context("Failed to create HTTP session")?;
    if let Some(cookies) = &config.session.cookies {
        let stored = session.set_cookies(cookies, &target);
        tracing::debug!(cookies = stored, "Loaded session cookies");
    }

    let crawler = Crawler::new(session, config.crawl.clone())?;
    let store = SnapshotStore::new(&params.output_dir);

    let summary = crawler.crawl(&target, &store).await?;

    if !summary.info_saved {
        println!("  info: unavailable");
    }
    for (collection, outcome) in &summary.collections {
        match outcome {
            CollectionOutcome::Saved { items, pages } => {
                println!("  {collection}: {items} items ({pages} pages)");
            }
            CollectionOutcome::Skipped { status } => match status {
                Some(status) => println!("  {collection}: skipped (HTTP {status})"),
                None => println!("  {collection}: skipped"),
            },
        }
    }

    let path = report::generate(&store).context("Failed to build report")?;
    println!("Report written to {}", path.display());

    Ok(())
}

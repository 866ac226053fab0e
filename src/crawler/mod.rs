//! Snapshot crawling over the WordPress REST API
//!
//! This module walks the public `wp/v2` collections of a site through a
//! [`session::RequestSession`] and mirrors them into a snapshot directory,
//! one JSON document per collection.

pub mod session;

use anyhow::{Context, Result};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde_json::Value;
use std::num::NonZeroU32;
use url::Url;

use crate::config::CrawlConfig;
use crate::models::Collection;
use crate::storage::{SnapshotStore, INFO_FILE};
use crate::utils::error::SessionError;
use crate::utils::join_api_path;

use session::RequestSession;

/// Response header carrying the page count of a collection
const TOTAL_PAGES_HEADER: &str = "x-wp-totalpages";

/// Outcome of one collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionOutcome {
    /// Items fetched and saved
    Saved { items: usize, pages: u32 },
    /// Server refused access; any earlier file is removed
    Skipped { status: Option<u16> },
}

/// Per-collection results of a crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    pub info_saved: bool,
    pub collections: Vec<(Collection, CollectionOutcome)>,
}

impl CrawlSummary {
    pub fn total_items(&self) -> usize {
        self.collections
            .iter()
            .map(|(_, outcome)| match outcome {
                CollectionOutcome::Saved { items, .. } => *items,
                CollectionOutcome::Skipped { .. } => 0,
            })
            .sum()
    }

    pub fn skipped(&self) -> Vec<Collection> {
        self.collections
            .iter()
            .filter(|(_, outcome)| matches!(outcome, CollectionOutcome::Skipped { .. }))
            .map(|(c, _)| *c)
            .collect()
    }

    pub fn outcome(&self, collection: Collection) -> Option<&CollectionOutcome> {
        self.collections
            .iter()
            .find(|(c, _)| *c == collection)
            .map(|(_, outcome)| outcome)
    }
}

/// Sequential, rate-limited crawler for one site
pub struct Crawler {
    session: RequestSession,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    config: CrawlConfig,
}

impl Crawler {
    pub fn new(session: RequestSession, config: CrawlConfig) -> Result<Self> {
        let rate = NonZeroU32::new(config.rate_limit).context("Invalid rate limit value")?;
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));

        Ok(Self {
            session,
            rate_limiter,
            config,
        })
    }

    pub fn session(&self) -> &RequestSession {
        &self.session
    }

    /// Mirror site info and every collection of `target` into `store`
    pub async fn crawl(&self, target: &Url, store: &SnapshotStore) -> Result<CrawlSummary> {
        let mut summary = CrawlSummary::default();

        tracing::info!(target = %target, dir = %store.dir().display(), "Starting extraction");

        summary.info_saved = self.crawl_info(target, store).await?;

        for collection in Collection::all() {
            let outcome = self
                .crawl_collection(target, collection, store)
                .await
                .with_context(|| format!("Failed to extract {collection}"))?;
            summary.collections.push((collection, outcome));
        }

        tracing::info!(
            total_items = summary.total_items(),
            skipped = summary.skipped().len(),
            "Extraction finished"
        );

        Ok(summary)
    }

    /// Save the API index document as `info.json`
    async fn crawl_info(&self, target: &Url, store: &SnapshotStore) -> Result<bool> {
        let url = join_api_path(target, "wp-json/");
        self.rate_limiter.until_ready().await;

        match self.session.get_json::<Value>(&url).await {
            Ok(info) => {
                store.save(INFO_FILE, &info)?;
                Ok(true)
            }
            Err(e) if e.is_access_denied() => {
                tracing::warn!(url = %url, error = %e, "Site info unavailable, skipping");
                store.remove(INFO_FILE)?;
                Ok(false)
            }
            Err(e) => Err(e).context("Failed to fetch site info"),
        }
    }

    /// Fetch every page of one collection and save it
    pub async fn crawl_collection(
        &self,
        target: &Url,
        collection: Collection,
        store: &SnapshotStore,
    ) -> Result<CollectionOutcome> {
        let endpoint = join_api_path(target, &format!("wp-json/wp/v2/{}", collection.as_str()));
        let per_page = self.config.per_page as usize;
        let mut items: Vec<Value> = Vec::new();
        let mut pages = 0u32;

        for page in 1..=self.config.max_pages {
            let url = format!("{endpoint}?per_page={}&page={page}", self.config.per_page);
            self.rate_limiter.until_ready().await;

            let response = match self.session.get(&url).await {
                Ok(response) => response,
                // WordPress answers 400 once the page number runs past the end.
                Err(e)
                    if page > 1
                        && (matches!(e, SessionError::BadRequest { .. })
                            || e.is_access_denied()) =>
                {
                    tracing::debug!(collection = %collection, page, error = %e, "No further pages");
                    break;
                }
                Err(e) if e.is_access_denied() => {
                    tracing::warn!(collection = %collection, error = %e, "Collection not accessible, skipping");
                    store.remove(&collection.file_name())?;
                    return Ok(CollectionOutcome::Skipped {
                        status: e.status(),
                    });
                }
                Err(e) => return Err(e.into()),
            };

            let total_pages = response
                .headers()
                .get(TOTAL_PAGES_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u32>().ok());

            let batch: Vec<Value> = RequestSession::decode_json(response, &url).await?;
            let batch_len = batch.len();
            pages = page;
            items.extend(batch);

            tracing::debug!(
                collection = %collection,
                page,
                batch = batch_len,
                total_pages = ?total_pages,
                "Fetched page"
            );

            let last_page = batch_len < per_page || total_pages.is_some_and(|total| page >= total);
            if last_page {
                break;
            }
        }

        store.save(&collection.file_name(), &items)?;
        tracing::info!(collection = %collection, items = items.len(), pages, "Saved collection");

        Ok(CollectionOutcome::Saved {
            items: items.len(),
            pages,
        })
    }
}

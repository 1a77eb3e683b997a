//! One scrape cycle: sweep, search, parse, dedupe, insert.
//!
//! The steps run independently with no surrounding transaction. A user edit
//! or delete landing between the sweep and the insert is not guarded
//! against; the next cycle sorts it out.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use hackradar_core::hackathon::{dedupe_batch, HackathonCandidate};
use hackradar_core::parser::parse_search_response;
use hackradar_db::repositories::HackathonRepo;
use hackradar_db::DbPool;
use hackradar_search::prompt::hackathon_prompt;
use hackradar_search::SearchBackend;
use serde::Serialize;

use crate::sweeper::sweep_expired;

/// Pipeline step a scrape failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeStage {
    /// The round trip to the search model.
    Search,
    /// Checking candidates against stored records.
    Lookup,
    /// Writing new records.
    Insert,
}

impl fmt::Display for ScrapeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Search => "search",
            Self::Lookup => "lookup",
            Self::Insert => "insert",
        })
    }
}

/// Result of one scrape cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    /// New hackathons were stored.
    Inserted { count: usize, parsed: usize },
    /// The cycle completed but everything parsed was already known (or the
    /// model returned nothing usable).
    NoNew { parsed: usize },
    /// A step failed; the store may hold a partial sweep but no inserts.
    Failed { stage: ScrapeStage, reason: String },
}

/// Runs scrape cycles against one store and one search backend.
///
/// Cheap to clone; the scheduler and the request path share one instance.
#[derive(Clone)]
pub struct ScrapeOrchestrator {
    pool: DbPool,
    search: Arc<dyn SearchBackend>,
}

impl ScrapeOrchestrator {
    pub fn new(pool: DbPool, search: Arc<dyn SearchBackend>) -> Self {
        Self { pool, search }
    }

    /// Run one full cycle for `query`, keeping at most `limit` results.
    pub async fn run(&self, query: &str, limit: usize) -> ScrapeOutcome {
        tracing::info!(query, limit, "Scrape cycle started");

        let now = Utc::now();
        let swept = sweep_expired(&self.pool, now.date_naive()).await.removed();

        let prompt = hackathon_prompt(query, limit);
        let raw = match self.search.search(&prompt).await {
            Ok(raw) => raw,
            Err(e) => return Self::fail(ScrapeStage::Search, e.to_string()),
        };

        let parsed = parse_search_response(&raw, limit, now);
        let parsed_count = parsed.len();
        tracing::debug!(parsed = parsed_count, "Parsed search response");

        let fresh = match self.filter_known(dedupe_batch(parsed)).await {
            Ok(fresh) => fresh,
            Err(e) => return Self::fail(ScrapeStage::Lookup, e.to_string()),
        };

        if fresh.is_empty() {
            tracing::info!(parsed = parsed_count, swept, "Scrape cycle found no new hackathons");
            return ScrapeOutcome::NoNew {
                parsed: parsed_count,
            };
        }

        match HackathonRepo::insert_many(&self.pool, &fresh).await {
            Ok(rows) => {
                tracing::info!(
                    inserted = rows.len(),
                    parsed = parsed_count,
                    swept,
                    "Scrape cycle stored new hackathons"
                );
                ScrapeOutcome::Inserted {
                    count: rows.len(),
                    parsed: parsed_count,
                }
            }
            Err(e) => Self::fail(ScrapeStage::Insert, e.to_string()),
        }
    }

    /// Keep only candidates with no stored record sharing title or url.
    async fn filter_known(
        &self,
        candidates: Vec<HackathonCandidate>,
    ) -> Result<Vec<HackathonCandidate>, sqlx::Error> {
        let mut fresh = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let existing =
                HackathonRepo::find_by_identity(&self.pool, &candidate.title, &candidate.website_url)
                    .await?;
            match existing {
                Some(known) => tracing::debug!(
                    title = %candidate.title,
                    existing_id = known.id,
                    "Skipping already stored hackathon"
                ),
                None => fresh.push(candidate),
            }
        }
        Ok(fresh)
    }

    fn fail(stage: ScrapeStage, reason: String) -> ScrapeOutcome {
        tracing::error!(%stage, error = %reason, "Scrape cycle failed");
        ScrapeOutcome::Failed { stage, reason }
    }
}

//! Repository for the `hackathons` table.

use hackradar_core::end_date::TBD;
use hackradar_core::hackathon::HackathonCandidate;
use hackradar_core::types::DbId;
use sqlx::PgPool;

use crate::models::hackathon::{Hackathon, UpdateHackathon};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, end_date, website_url, platform, status, description, \
    organizer, registration_deadline, event_date, prize_pool, eligibility, tags, source, \
    scraped_at, created_at, updated_at";

/// Latest end date first, `TBD` after every real date.
const LATEST_FIRST: &str = "(end_date = 'TBD'), end_date DESC, id";

/// Provides CRUD and freshness operations for hackathons.
pub struct HackathonRepo;

impl HackathonRepo {
    /// Find a hackathon by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Hackathon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hackathons WHERE id = $1");
        sqlx::query_as::<_, Hackathon>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find any stored hackathon sharing the title OR the website url.
    ///
    /// Blank keys are ignored so half-filled records do not match each other.
    pub async fn find_by_identity(
        pool: &PgPool,
        title: &str,
        website_url: &str,
    ) -> Result<Option<Hackathon>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM hackathons \
             WHERE ($1 <> '' AND title = $1) OR ($2 <> '' AND website_url = $2) \
             ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, Hackathon>(&query)
            .bind(title)
            .bind(website_url)
            .fetch_optional(pool)
            .await
    }

    /// List hackathons that have not ended before `cutoff` (`YYYY-MM-DD`).
    ///
    /// Ordered latest end date first, `TBD` last.
    pub async fn list_active(pool: &PgPool, cutoff: &str) -> Result<Vec<Hackathon>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM hackathons \
             WHERE end_date = $1 OR end_date >= $2 \
             ORDER BY {LATEST_FIRST}"
        );
        sqlx::query_as::<_, Hackathon>(&query)
            .bind(TBD)
            .bind(cutoff)
            .fetch_all(pool)
            .await
    }

    /// Insert a batch of candidates within a transaction, returning the rows.
    pub async fn insert_many(
        pool: &PgPool,
        candidates: &[HackathonCandidate],
    ) -> Result<Vec<Hackathon>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut inserted = Vec::with_capacity(candidates.len());

        let query = format!(
            "INSERT INTO hackathons \
                (title, end_date, website_url, platform, status, description, \
                 organizer, prize_pool, eligibility, tags, source, scraped_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );

        for candidate in candidates {
            let row = sqlx::query_as::<_, Hackathon>(&query)
                .bind(&candidate.title)
                .bind(&candidate.end_date)
                .bind(&candidate.website_url)
                .bind(&candidate.platform)
                .bind(&candidate.status)
                .bind(&candidate.description)
                .bind(&candidate.organizer)
                .bind(&candidate.prize_pool)
                .bind(&candidate.eligibility)
                .bind(&candidate.tags)
                .bind(&candidate.source)
                .bind(candidate.scraped_at)
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(row);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Update a hackathon. Only non-`None` fields are applied and
    /// `updated_at` is set to now.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateHackathon,
    ) -> Result<Option<Hackathon>, sqlx::Error> {
        let query = format!(
            "UPDATE hackathons SET \
                title = COALESCE($2, title), \
                end_date = COALESCE($3, end_date), \
                website_url = COALESCE($4, website_url), \
                platform = COALESCE($5, platform), \
                status = COALESCE($6, status), \
                description = COALESCE($7, description), \
                organizer = COALESCE($8, organizer), \
                registration_deadline = COALESCE($9, registration_deadline), \
                event_date = COALESCE($10, event_date), \
                prize_pool = COALESCE($11, prize_pool), \
                eligibility = COALESCE($12, eligibility), \
                tags = COALESCE($13, tags), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hackathon>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.end_date)
            .bind(&input.website_url)
            .bind(&input.platform)
            .bind(&input.status)
            .bind(&input.description)
            .bind(&input.organizer)
            .bind(&input.registration_deadline)
            .bind(&input.event_date)
            .bind(&input.prize_pool)
            .bind(&input.eligibility)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Delete every hackathon whose end date is before `cutoff`
    /// (`YYYY-MM-DD`). `TBD` rows are never deleted.
    ///
    /// Returns the number of rows removed.
    pub async fn delete_expired(pool: &PgPool, cutoff: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM hackathons WHERE end_date <> $1 AND end_date < $2")
            .bind(TBD)
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Permanently delete a hackathon. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM hackathons WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Hackathon entity model and DTOs.

use hackradar_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `hackathons` table.
///
/// Timestamps serialize as RFC 3339 text.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Hackathon {
    pub id: DbId,
    pub title: String,
    /// `YYYY-MM-DD` or `TBD`.
    pub end_date: String,
    pub website_url: String,
    pub platform: String,
    pub status: String,
    pub description: Option<String>,
    pub organizer: Option<String>,
    pub registration_deadline: Option<String>,
    pub event_date: Option<String>,
    pub prize_pool: Option<String>,
    pub eligibility: Option<String>,
    pub tags: Vec<String>,
    pub source: String,
    pub scraped_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// DTO for editing an existing hackathon. `None` fields keep their value.
///
/// `updated_at` is always refreshed by the repository.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateHackathon {
    pub title: Option<String>,
    pub end_date: Option<String>,
    pub website_url: Option<String>,
    pub platform: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub organizer: Option<String>,
    pub registration_deadline: Option<String>,
    pub event_date: Option<String>,
    pub prize_pool: Option<String>,
    pub eligibility: Option<String>,
    pub tags: Option<Vec<String>>,
}

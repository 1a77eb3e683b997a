//! Freshness sweep: delete hackathons whose end date has passed.

use chrono::NaiveDate;
use hackradar_core::end_date::cutoff_string;
use hackradar_db::repositories::HackathonRepo;
use hackradar_db::DbPool;

/// Result of one sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepOutcome {
    /// Expired rows were deleted (possibly zero).
    Swept { removed: u64 },
    /// The delete failed; nothing is known to be removed.
    Failed { reason: String },
}

impl SweepOutcome {
    /// Rows removed, zero when the sweep failed.
    pub fn removed(&self) -> u64 {
        match self {
            Self::Swept { removed } => *removed,
            Self::Failed { .. } => 0,
        }
    }
}

/// Delete every record ending strictly before `today`. `TBD` records stay.
///
/// Store errors are logged and reported, never returned as `Err`: a failed
/// sweep must not stop the listing or scrape that triggered it.
pub async fn sweep_expired(pool: &DbPool, today: NaiveDate) -> SweepOutcome {
    let cutoff = cutoff_string(today);
    match HackathonRepo::delete_expired(pool, &cutoff).await {
        Ok(removed) => {
            if removed > 0 {
                tracing::info!(removed, %cutoff, "Sweep: removed expired hackathons");
            } else {
                tracing::debug!(%cutoff, "Sweep: nothing expired");
            }
            SweepOutcome::Swept { removed }
        }
        Err(e) => {
            tracing::error!(error = %e, %cutoff, "Sweep: failed to delete expired hackathons");
            SweepOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_sweep_removed_nothing() {
        let outcome = SweepOutcome::Failed {
            reason: "connection reset".into(),
        };
        assert_eq!(outcome.removed(), 0);
        assert_eq!(SweepOutcome::Swept { removed: 3 }.removed(), 3);
    }
}

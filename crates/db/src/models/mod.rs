//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Inserts take the pipeline's `HackathonCandidate` from `hackradar_core`.

pub mod hackathon;

//! Data access layer.

pub mod hackathon_repo;

pub use hackathon_repo::HackathonRepo;

//! Domain types and pure logic for the hackathon radar.
//!
//! This crate has no internal dependencies so it can be shared by the
//! database layer, the scrape pipeline and the HTTP surface alike.

pub mod end_date;
pub mod error;
pub mod hackathon;
pub mod parser;
pub mod search_link;
pub mod types;

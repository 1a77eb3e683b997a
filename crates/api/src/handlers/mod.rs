//! Request handlers.
//!
//! - [`pages`]: server-rendered HTML routes; failures redirect to a safe page.
//! - [`api`]: JSON routes; failures map through [`crate::error::AppError`].

pub mod api;
pub mod pages;

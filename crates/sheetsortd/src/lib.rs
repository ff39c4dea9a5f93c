//! Sheetsort daemon library.
//!
//! Accepts scraped social-media posts over HTTP, classifies them with an
//! LLM, and appends one row per post to a category-specific tab of a shared
//! Google Sheet.

pub mod audit;
pub mod classifier;
pub mod config;
pub mod gemini;
pub mod routes;
pub mod server;
pub mod sheets;

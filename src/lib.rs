//! Rust/Axum website and quote calculator for the RinnenKlar gutter
//! cleaning service.
//!
//! The heart of the crate is [`quote::calculators`], a pure pricing engine
//! with tiered height bands, equipment-selection rules and a price floor.
//! The rest is thin web plumbing: static marketing pages, two JSON API
//! endpoints for the embedded calculator and an email notification to the
//! back office on submission.

pub mod config;
pub mod error;
pub mod notify;
pub mod quote;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::notify::Mailer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub mailer: Mailer,
}

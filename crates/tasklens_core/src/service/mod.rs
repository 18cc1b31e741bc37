//! Host-facing services.
//!
//! # Responsibility
//! - Bundle snapshot reads, search history, and analytics behind one facade.
//! - Offer request throttling that hosts can put in front of the facade.

pub mod insight_service;
pub mod rate_limiter;

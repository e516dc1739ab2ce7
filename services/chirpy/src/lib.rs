// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Chirpy
//!
//! A small public-content API built around the chirp moderation pipeline:
//!
//! - Chirp length validation (140 characters default)
//! - Profanity censoring against a configurable denylist
//! - Static asset hit counting for the admin dashboard
//! - User creation backed by Postgres or memory
//! - Dev-only admin reset of hits and users

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod routes;

pub use config::Config;
pub use db::{MemoryUserStore, PgUserStore, StoreError, UserStore};
pub use error::ApiError;
pub use handlers::AppState;
pub use routes::router;

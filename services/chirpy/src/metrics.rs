// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus counters for the chirp pipeline and user store.
//!
//! Separate from the admin hit counter: these are for scraping, the hit
//! counter drives the admin dashboard and can be reset.

use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// Outcome label for a chirp validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChirpOutcome {
    Accepted,
    TooLong,
    Malformed,
}

impl ChirpOutcome {
    fn as_label(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::TooLong => "too_long",
            Self::Malformed => "malformed",
        }
    }
}

/// Service metrics registered in a private registry.
pub struct ServiceMetrics {
    registry: Registry,
    chirps: IntCounterVec,
    users_created: IntCounter,
    store_failures: IntCounterVec,
    fileserver_hits: IntGauge,
}

impl ServiceMetrics {
    /// Create and register all metrics.
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let chirps = IntCounterVec::new(
            Opts::new("chirpy_chirps_total", "Chirps validated, by outcome"),
            &["outcome"],
        )?;
        let users_created =
            IntCounter::new("chirpy_users_created_total", "Users successfully created")?;
        let store_failures = IntCounterVec::new(
            Opts::new("chirpy_store_failures_total", "Failed user store calls"),
            &["operation"],
        )?;
        let fileserver_hits = IntGauge::new(
            "chirpy_fileserver_hits",
            "Static asset hits since start or last admin reset",
        )?;

        registry.register(Box::new(chirps.clone()))?;
        registry.register(Box::new(users_created.clone()))?;
        registry.register(Box::new(store_failures.clone()))?;
        registry.register(Box::new(fileserver_hits.clone()))?;

        Ok(Self {
            registry,
            chirps,
            users_created,
            store_failures,
            fileserver_hits,
        })
    }

    pub fn record_chirp(&self, outcome: ChirpOutcome) {
        self.chirps.with_label_values(&[outcome.as_label()]).inc();
    }

    pub fn record_user_created(&self) {
        self.users_created.inc();
    }

    /// `operation` is the store method that failed.
    pub fn record_store_failure(&self, operation: &str) {
        self.store_failures.with_label_values(&[operation]).inc();
    }

    /// Render the text exposition format, with the current hit count.
    pub fn render(&self, hits: u64) -> prometheus::Result<String> {
        self.fileserver_hits
            .set(i64::try_from(hits).unwrap_or(i64::MAX));

        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Chirp validator.
//!
//! Enforces the length limit and hands accepted text to the moderator:
//! - Length is counted in Unicode code points
//! - Over-long chirps are rejected before any censoring happens
//! - Undecodable payloads are classified as malformed

use crate::profanity::{Moderator, ProfanityFilter};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Maximum chirp length when nothing else is configured.
pub const DEFAULT_MAX_CHIRP_LENGTH: usize = 140;

/// Why a chirp was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChirpRejection {
    #[error("Chirp is too long: {length} characters, limit is {max}")]
    TooLong { length: usize, max: usize },

    #[error("Chirp payload could not be decoded")]
    Malformed,
}

/// Incoming chirp submission. A missing or null body is an empty chirp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChirpSubmission {
    #[serde(default)]
    pub body: Option<String>,
}

/// Decode a payload that must be a JSON object.
///
/// Derived `Deserialize` also accepts the sequence form of a struct
/// (`["text"]`); request bodies only ever take the map form.
pub fn decode_json_object<T: DeserializeOwned>(payload: &[u8]) -> serde_json::Result<T> {
    match serde_json::from_slice(payload)? {
        value @ serde_json::Value::Object(_) => serde_json::from_value(value),
        _ => Err(serde::de::Error::custom("expected a JSON object")),
    }
}

/// A chirp that passed validation, with profanity censored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accepted {
    pub cleaned_body: String,
}

/// Stateless chirp validator; safe to share across any number of requests.
#[derive(Debug, Clone)]
pub struct ChirpValidator<M = ProfanityFilter> {
    max_length: usize,
    moderator: M,
}

impl Default for ChirpValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHIRP_LENGTH, ProfanityFilter::default())
    }
}

impl<M: Moderator> ChirpValidator<M> {
    /// Create a validator with the given length limit and moderator.
    pub fn new(max_length: usize, moderator: M) -> Self {
        Self {
            max_length,
            moderator,
        }
    }

    /// Configured length limit in code points.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Validate a chirp body.
    pub fn validate(&self, body: &str) -> Result<Accepted, ChirpRejection> {
        let length = body.chars().count();
        if length > self.max_length {
            debug!(length, max = self.max_length, "Chirp too long");
            return Err(ChirpRejection::TooLong {
                length,
                max: self.max_length,
            });
        }

        Ok(Accepted {
            cleaned_body: self.moderator.censor(body),
        })
    }

    /// Decode a JSON `{"body": ...}` payload and validate it.
    pub fn validate_json(&self, payload: &[u8]) -> Result<Accepted, ChirpRejection> {
        let submission: ChirpSubmission = decode_json_object(payload).map_err(|err| {
            debug!(error = %err, "Chirp payload malformed");
            ChirpRejection::Malformed
        })?;
        self.validate(submission.body.as_deref().unwrap_or_default())
    }
}

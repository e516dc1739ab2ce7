// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Chirpy Common
//!
//! The moderation pipeline and request metrics shared by the Chirpy service:
//!
//! - Chirp length validation (140 code points by default)
//! - Denylist profanity censoring
//! - Lock-free hit counter for the admin dashboard

pub mod hits;
pub mod profanity;
pub mod validator;

pub use hits::HitCounter;
pub use profanity::{Moderator, ProfanityFilter, DEFAULT_PROFANE_WORDS};
pub use validator::{
    decode_json_object, Accepted, ChirpRejection, ChirpSubmission, ChirpValidator,
    DEFAULT_MAX_CHIRP_LENGTH,
};

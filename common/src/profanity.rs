// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Profanity censoring for chirp bodies.
//!
//! Text is split on single spaces. Each token is reduced to its letters and
//! digits, lowercased, and compared against the denylist. A match replaces the
//! whole original token with [`CENSORED`]; everything else passes through
//! untouched.

use std::collections::HashSet;

/// Words censored when no explicit list is configured.
pub const DEFAULT_PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Replacement emitted for a censored token.
pub const CENSORED: &str = "****";

/// Turns raw chirp text into publishable text.
pub trait Moderator: Send + Sync {
    fn censor(&self, text: &str) -> String;
}

/// Denylist-based censor.
#[derive(Debug, Clone)]
pub struct ProfanityFilter {
    denylist: HashSet<String>,
}

impl ProfanityFilter {
    /// Build a filter from a list of words. Matching is case-insensitive.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let denylist = words
            .into_iter()
            .map(|w| normalize_token(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { denylist }
    }

    /// Whether a single token would be censored.
    pub fn is_profane(&self, token: &str) -> bool {
        let normalized = normalize_token(token);
        !normalized.is_empty() && self.denylist.contains(&normalized)
    }

    /// Censor every denylisted token in `text`.
    pub fn censor(&self, text: &str) -> String {
        text.split(' ')
            .map(|token| {
                if self.is_profane(token) {
                    CENSORED
                } else {
                    token
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for ProfanityFilter {
    fn default() -> Self {
        Self::new(DEFAULT_PROFANE_WORDS)
    }
}

impl Moderator for ProfanityFilter {
    fn censor(&self, text: &str) -> String {
        ProfanityFilter::censor(self, text)
    }
}

/// Drop everything except letters and digits, then lowercase.
fn normalize_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_word_not_censored() {
        let filter = ProfanityFilter::default();
        assert_eq!(
            filter.censor("I hear Kansas is kerfuffling nobody here"),
            "I hear Kansas is kerfuffling nobody here"
        );
    }

    #[test]
    fn test_exact_word_censored() {
        let filter = ProfanityFilter::default();
        assert_eq!(
            filter.censor("This is a kerfuffle opinion I need to share"),
            "This is a **** opinion I need to share"
        );
    }

    #[test]
    fn test_case_and_punctuation_ignored_for_matching() {
        let filter = ProfanityFilter::default();
        assert_eq!(filter.censor("fornax SHARBERT Kerfuffle!"), "**** **** ****");
        assert_eq!(filter.censor("(Sharbert), ok"), "**** ok");
    }

    #[test]
    fn test_non_matches_keep_original_form() {
        let filter = ProfanityFilter::default();
        assert_eq!(filter.censor("Hello, World!"), "Hello, World!");
    }

    #[test]
    fn test_punctuation_only_token_survives() {
        let filter = ProfanityFilter::default();
        assert_eq!(filter.censor("wait ... fornax"), "wait ... ****");
    }

    #[test]
    fn test_consecutive_spaces_preserved() {
        let filter = ProfanityFilter::default();
        assert_eq!(filter.censor("a  fornax   b"), "a  ****   b");
        assert_eq!(filter.censor(" leading and trailing "), " leading and trailing ");
        assert_eq!(filter.censor(""), "");
    }

    #[test]
    fn test_only_spaces_split() {
        // Tabs and newlines are not separators.
        let filter = ProfanityFilter::default();
        assert_eq!(filter.censor("fornax\tfornax"), "fornax\tfornax");
    }

    #[test]
    fn test_unicode_letters_kept_for_matching() {
        let filter = ProfanityFilter::new(["café"]);
        assert_eq!(filter.censor("un CAFÉ!"), "un ****");
        assert_eq!(filter.censor("un cafe"), "un cafe");
    }

    #[test]
    fn test_censor_is_fixed_point_on_output() {
        let filter = ProfanityFilter::default();
        let once = filter.censor("kerfuffle and a sharbert, please");
        assert_eq!(filter.censor(&once), once);

        let clean = "nothing to see here";
        assert_eq!(filter.censor(clean), clean);
        assert_eq!(filter.censor(&filter.censor(clean)), clean);
    }

    #[test]
    fn test_custom_denylist_normalized() {
        let filter = ProfanityFilter::new(["Gosh!", "", "..."]);
        assert!(filter.is_profane("gosh"));
        assert!(!filter.is_profane("..."));
        assert!(!filter.is_profane(""));
        assert!(!filter.is_profane("fornax"));
    }
}

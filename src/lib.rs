//! CreativePlay Match - founder/designer matching service
//!
//! This library scores designers against a founder's stated needs, records
//! matches, and gates rematches behind a per-designer credit balance.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{score_match, CreditLedger, DeductOutcome, Matcher};
pub use crate::models::{Designer, Founder, Match, MatchStatus, ScoringWeights};
pub use crate::services::{Matchmaker, MemoryStore, Notifier, Store};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        assert_eq!(matcher.weights().keyword, 10.0);
    }
}

// Core algorithm exports
pub mod credits;
pub mod matcher;
pub mod scoring;

pub use credits::{CreditLedger, DeductOutcome};
pub use matcher::{has_matched_before, Matcher};
pub use scoring::{count_keyword_hits, score_match};

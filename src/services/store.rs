use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CreditPurchase, Designer, Founder, Match, MatchDetail, MatchStatus, NewDesigner, NewFounder};

/// Errors that can occur when talking to the data store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Persistence for designers, founders, matches and the credit purchase log
///
/// Every call is one atomic step: it either commits fully or returns an error
/// with nothing written. Lookups of absent rows return `None`, never an error.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a designer, or update name/skills/experience of the row with
    /// the same email. Returns the row and whether it was newly created.
    async fn upsert_designer(&self, designer: NewDesigner) -> Result<(Designer, bool), StoreError>;

    async fn find_designer(&self, id: i64) -> Result<Option<Designer>, StoreError>;

    async fn find_designer_by_email(&self, email: &str) -> Result<Option<Designer>, StoreError>;

    /// All designers in insertion order
    async fn list_designers(&self) -> Result<Vec<Designer>, StoreError>;

    async fn create_founder(&self, founder: NewFounder) -> Result<Founder, StoreError>;

    async fn find_founder(&self, id: i64) -> Result<Option<Founder>, StoreError>;

    /// Insert a match unless the (founder, designer) pair already exists
    async fn insert_match_if_absent(
        &self,
        founder_id: i64,
        designer_id: i64,
        status: MatchStatus,
    ) -> Result<Option<Match>, StoreError>;

    async fn has_match(&self, founder_id: i64, designer_id: i64) -> Result<bool, StoreError>;

    /// Ids of every designer already matched with the founder
    async fn matched_designer_ids(&self, founder_id: i64) -> Result<Vec<i64>, StoreError>;

    /// Newest match overall, or newest for one founder
    async fn latest_match(&self, founder_id: Option<i64>) -> Result<Option<Match>, StoreError>;

    /// All matches with contact details, newest first
    async fn list_matches(&self) -> Result<Vec<MatchDetail>, StoreError>;

    /// Take one credit if the balance is positive. Returns the new balance,
    /// or `None` when the designer is missing or has no credits left.
    async fn decrement_credit(&self, designer_id: i64) -> Result<Option<i32>, StoreError>;

    /// Add `amount` to the balance. Returns the new balance, or `None` when
    /// the designer is missing.
    async fn add_credits(&self, designer_id: i64, amount: i32) -> Result<Option<i32>, StoreError>;

    /// Add credits and append a purchase log row in one transaction
    async fn record_credit_purchase(
        &self,
        designer_id: i64,
        credits: i32,
        amount_cents: Option<i32>,
    ) -> Result<Option<CreditPurchase>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}

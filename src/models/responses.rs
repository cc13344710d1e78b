use serde::{Deserialize, Serialize};
use crate::models::domain::{CreditPurchase, Designer, Founder, Match, MatchDetail};

/// Response for founder submission
#[derive(Debug, Clone, Serialize)]
pub struct FounderResponse {
    /// "matched" or "no_match"
    pub status: String,
    pub founder: Founder,
    #[serde(rename = "match")]
    pub record: Option<Match>,
    pub designer: Option<Designer>,
}

/// Response for designer submission
#[derive(Debug, Clone, Serialize)]
pub struct DesignerResponse {
    pub designer: Designer,
    pub created: bool,
}

/// Response for a rematch request
#[derive(Debug, Clone, Serialize)]
pub struct RematchResponse {
    /// "rematched", "no_match" or "out_of_credits"
    pub status: String,
    pub founder: Option<Founder>,
    pub designers: Vec<Designer>,
    #[serde(rename = "newMatches")]
    pub new_matches: Vec<Match>,
    #[serde(rename = "creditsRemaining")]
    pub credits_remaining: Option<i32>,
}

/// Counterpart shown on the match success screen
#[derive(Debug, Clone, Serialize)]
pub struct CounterpartResponse {
    pub role: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    #[serde(rename = "bgColor")]
    pub bg_color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchDetail>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreditBalanceResponse {
    #[serde(rename = "designerId")]
    pub designer_id: i64,
    pub credits: i32,
    #[serde(rename = "hasCredits")]
    pub has_credits: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreditGrantResponse {
    pub purchase: CreditPurchase,
    pub credits: i32,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

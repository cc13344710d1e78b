// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CreditPurchase, Designer, Founder, Match, MatchDetail, MatchStatus, NewDesigner, NewFounder,
    Role, ScoredDesigner, ScoringWeights, DEFAULT_CREDITS,
};
pub use requests::{DesignerSubmission, FounderSubmission, GrantCreditsRequest, LatestMatchQuery, RematchRequest};
pub use responses::{
    CounterpartResponse, CreditBalanceResponse, CreditGrantResponse, DesignerResponse, ErrorResponse,
    FounderResponse, HealthResponse, MatchListResponse, RematchResponse,
};

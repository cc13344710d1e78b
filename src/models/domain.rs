use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rematch credits every new designer starts with
pub const DEFAULT_CREDITS: i32 = 3;

/// Designer offering skills to founders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Designer {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    pub credits: i32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Designer {
    /// Skills if present, otherwise the experience blurb
    pub fn summary(&self) -> &str {
        match self.skills.as_deref() {
            Some(skills) if !skills.is_empty() => skills,
            _ => self.experience.as_deref().unwrap_or_default(),
        }
    }
}

/// Founder looking for a designer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Founder {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub needs: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "match_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Confirmed,
    Rejected,
}

/// Recorded pairing between one founder and one designer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Match {
    pub id: i64,
    #[serde(rename = "designerId")]
    pub designer_id: i64,
    #[serde(rename = "founderId")]
    pub founder_id: i64,
    pub status: MatchStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Match joined with both parties' contact details, for the admin listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MatchDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub record: Match,
    #[serde(rename = "founderName")]
    pub founder_name: String,
    #[serde(rename = "founderEmail")]
    pub founder_email: String,
    #[serde(rename = "designerName")]
    pub designer_name: String,
    #[serde(rename = "designerEmail")]
    pub designer_email: String,
}

/// Append-only log of credits granted to a designer
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CreditPurchase {
    pub id: i64,
    #[serde(rename = "designerId")]
    pub designer_id: i64,
    #[serde(rename = "creditsAdded")]
    pub credits_added: i32,
    /// Minor currency units
    #[serde(rename = "amountCents")]
    pub amount_cents: Option<i32>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Designer fields accepted on submission; keyed by email
#[derive(Debug, Clone)]
pub struct NewDesigner {
    pub name: String,
    pub email: String,
    pub skills: Option<String>,
    pub experience: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewFounder {
    pub name: String,
    pub email: String,
    pub project: Option<String>,
    pub needs: Option<String>,
}

/// Which side of a match a request is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Designer,
    Founder,
}

impl Role {
    /// Parse a path/query role, accepting the plural form used by rematch links
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "designer" | "designers" => Some(Role::Designer),
            "founder" | "founders" => Some(Role::Founder),
            _ => None,
        }
    }
}

/// Scoring weights
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    /// Added once per founder need found among the designer's skills
    pub keyword: f64,
    /// Multiplied by the character count of the designer's experience
    pub experience_per_char: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword: 10.0,
            experience_per_char: 0.2,
        }
    }
}

/// Designer paired with its score against one founder
#[derive(Debug, Clone, Serialize)]
pub struct ScoredDesigner {
    pub designer: Designer,
    pub score: f64,
}

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Founder signup form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FounderSubmission {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 120), email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub project: String,
    #[validate(length(min = 1, max = 300))]
    pub needs: String,
}

/// Designer signup form; resubmitting the same email updates the profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DesignerSubmission {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 120), email)]
    pub email: String,
    #[validate(length(min = 1, max = 300))]
    pub skills: String,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub experience: Option<String>,
}

/// Rematch request; missing ids fall back to the most recent match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RematchRequest {
    #[serde(default, alias = "founder_id", rename = "founderId")]
    pub founder_id: Option<i64>,
    #[serde(default, alias = "designer_id", rename = "designerId")]
    pub designer_id: Option<i64>,
}

/// Query for the match success lookup
#[derive(Debug, Clone, Deserialize)]
pub struct LatestMatchQuery {
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, rename = "founderId")]
    pub founder_id: Option<i64>,
    #[serde(default, rename = "designerId")]
    pub designer_id: Option<i64>,
}

fn default_role() -> String {
    "designer".to_string()
}

/// Credit grant, logged as a purchase
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GrantCreditsRequest {
    #[validate(range(min = 1, max = 1000))]
    #[serde(default = "default_credits_added")]
    pub credits: i32,
    #[validate(range(min = 0))]
    #[serde(default, alias = "amount_cents", rename = "amountCents")]
    pub amount_cents: Option<i32>,
}

fn default_credits_added() -> i32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_founder_submission_requires_all_fields() {
        let submission = FounderSubmission {
            name: "Fay".to_string(),
            email: "fay@example.com".to_string(),
            project: String::new(),
            needs: "branding".to_string(),
        };

        assert!(submission.validate().is_err());
    }

    #[test]
    fn test_designer_submission_experience_optional() {
        let submission: DesignerSubmission = serde_json::from_str(
            r#"{"name":"Dee","email":"dee@example.com","skills":"branding"}"#,
        )
        .unwrap();

        assert!(submission.validate().is_ok());
        assert!(submission.experience.is_none());
    }

    #[test]
    fn test_grant_defaults_to_one_credit() {
        let req: GrantCreditsRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.credits, 1);
        assert!(req.amount_cents.is_none());
    }

    #[test]
    fn test_fields_capped_at_column_width() {
        let mut submission = DesignerSubmission {
            name: "Dee".to_string(),
            email: "dee@example.com".to_string(),
            skills: "branding".to_string(),
            experience: Some("x".repeat(200)),
        };
        assert!(submission.validate().is_ok());

        submission.experience = Some("x".repeat(201));
        assert!(submission.validate().is_err());

        let founder = FounderSubmission {
            name: "Fay".to_string(),
            email: "fay@example.com".to_string(),
            project: "p".repeat(5000),
            needs: "n".repeat(301),
        };
        assert!(founder.validate().is_err());
    }

    #[test]
    fn test_grant_is_bounded() {
        let req: GrantCreditsRequest = serde_json::from_str(r#"{"credits":2147483647}"#).unwrap();
        assert!(req.validate().is_err());

        let req: GrantCreditsRequest = serde_json::from_str(r#"{"credits":1000}"#).unwrap();
        assert!(req.validate().is_ok());
    }
}

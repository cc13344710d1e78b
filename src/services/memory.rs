use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{
    CreditPurchase, Designer, Founder, Match, MatchDetail, MatchStatus, NewDesigner, NewFounder, DEFAULT_CREDITS,
};
use crate::services::store::{Store, StoreError};

#[derive(Debug, Default)]
struct Tables {
    designers: Vec<Designer>,
    founders: Vec<Founder>,
    matches: Vec<Match>,
    credit_purchases: Vec<CreditPurchase>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn designer_mut(&mut self, id: i64) -> Option<&mut Designer> {
        self.designers.iter_mut().find(|d| d.id == id)
    }
}

/// In-process store for local development and tests
///
/// All tables sit behind a single lock, so every operation is atomic with
/// respect to the others.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn upsert_designer(&self, designer: NewDesigner) -> Result<(Designer, bool), StoreError> {
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables.designers.iter_mut().find(|d| d.email == designer.email) {
            existing.name = designer.name;
            existing.skills = designer.skills;
            existing.experience = designer.experience;
            return Ok((existing.clone(), false));
        }

        let id = tables.next_id();
        let row = Designer {
            id,
            name: designer.name,
            email: designer.email,
            skills: designer.skills,
            experience: designer.experience,
            credits: DEFAULT_CREDITS,
            created_at: Utc::now(),
        };
        tables.designers.push(row.clone());
        Ok((row, true))
    }

    async fn find_designer(&self, id: i64) -> Result<Option<Designer>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.designers.iter().find(|d| d.id == id).cloned())
    }

    async fn find_designer_by_email(&self, email: &str) -> Result<Option<Designer>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.designers.iter().find(|d| d.email == email).cloned())
    }

    async fn list_designers(&self) -> Result<Vec<Designer>, StoreError> {
        Ok(self.tables.read().await.designers.clone())
    }

    async fn create_founder(&self, founder: NewFounder) -> Result<Founder, StoreError> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let row = Founder {
            id,
            name: founder.name,
            email: founder.email,
            project: founder.project,
            needs: founder.needs,
            created_at: Utc::now(),
        };
        tables.founders.push(row.clone());
        Ok(row)
    }

    async fn find_founder(&self, id: i64) -> Result<Option<Founder>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.founders.iter().find(|f| f.id == id).cloned())
    }

    async fn insert_match_if_absent(
        &self,
        founder_id: i64,
        designer_id: i64,
        status: MatchStatus,
    ) -> Result<Option<Match>, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.founders.iter().any(|f| f.id == founder_id)
            || !tables.designers.iter().any(|d| d.id == designer_id)
        {
            return Err(StoreError::InvalidInput(format!(
                "match references unknown founder {} or designer {}",
                founder_id, designer_id
            )));
        }

        if tables
            .matches
            .iter()
            .any(|m| m.founder_id == founder_id && m.designer_id == designer_id)
        {
            return Ok(None);
        }

        let id = tables.next_id();
        let row = Match {
            id,
            designer_id,
            founder_id,
            status,
            created_at: Utc::now(),
        };
        tables.matches.push(row.clone());
        Ok(Some(row))
    }

    async fn has_match(&self, founder_id: i64, designer_id: i64) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .matches
            .iter()
            .any(|m| m.founder_id == founder_id && m.designer_id == designer_id))
    }

    async fn matched_designer_ids(&self, founder_id: i64) -> Result<Vec<i64>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .matches
            .iter()
            .filter(|m| m.founder_id == founder_id)
            .map(|m| m.designer_id)
            .collect())
    }

    async fn latest_match(&self, founder_id: Option<i64>) -> Result<Option<Match>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .matches
            .iter()
            .filter(|m| founder_id.map_or(true, |id| m.founder_id == id))
            .max_by_key(|m| (m.created_at, m.id))
            .cloned())
    }

    async fn list_matches(&self) -> Result<Vec<MatchDetail>, StoreError> {
        let tables = self.tables.read().await;

        let mut details: Vec<MatchDetail> = tables
            .matches
            .iter()
            .filter_map(|m| {
                let founder = tables.founders.iter().find(|f| f.id == m.founder_id)?;
                let designer = tables.designers.iter().find(|d| d.id == m.designer_id)?;
                Some(MatchDetail {
                    record: m.clone(),
                    founder_name: founder.name.clone(),
                    founder_email: founder.email.clone(),
                    designer_name: designer.name.clone(),
                    designer_email: designer.email.clone(),
                })
            })
            .collect();

        details.sort_by(|a, b| {
            b.record
                .created_at
                .cmp(&a.record.created_at)
                .then_with(|| b.record.id.cmp(&a.record.id))
        });

        Ok(details)
    }

    async fn decrement_credit(&self, designer_id: i64) -> Result<Option<i32>, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.designer_mut(designer_id) {
            Some(designer) if designer.credits > 0 => {
                designer.credits -= 1;
                Ok(Some(designer.credits))
            }
            _ => Ok(None),
        }
    }

    async fn add_credits(&self, designer_id: i64, amount: i32) -> Result<Option<i32>, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.designer_mut(designer_id) {
            Some(designer) => {
                designer.credits = adjusted_balance(designer, amount)?;
                Ok(Some(designer.credits))
            }
            None => Ok(None),
        }
    }

    async fn record_credit_purchase(
        &self,
        designer_id: i64,
        credits: i32,
        amount_cents: Option<i32>,
    ) -> Result<Option<CreditPurchase>, StoreError> {
        let mut tables = self.tables.write().await;

        match tables.designer_mut(designer_id) {
            Some(designer) => designer.credits = adjusted_balance(designer, credits)?,
            None => return Ok(None),
        }

        let id = tables.next_id();
        let purchase = CreditPurchase {
            id,
            designer_id,
            credits_added: credits,
            amount_cents,
            created_at: Utc::now(),
        };
        tables.credit_purchases.push(purchase.clone());
        Ok(Some(purchase))
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

/// Balance after adding `amount`, rejected when it leaves the INTEGER range
fn adjusted_balance(designer: &Designer, amount: i32) -> Result<i32, StoreError> {
    designer.credits.checked_add(amount).ok_or_else(|| {
        StoreError::InvalidInput(format!(
            "Credit balance for designer {} would overflow",
            designer.id
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_designer(email: &str, skills: &str) -> NewDesigner {
        NewDesigner {
            name: "Dana".to_string(),
            email: email.to_string(),
            skills: Some(skills.to_string()),
            experience: Some(String::new()),
        }
    }

    fn new_founder() -> NewFounder {
        NewFounder {
            name: "Fay".to_string(),
            email: "fay@example.com".to_string(),
            project: Some("Coffee app".to_string()),
            needs: Some("branding".to_string()),
        }
    }

    #[tokio::test]
    async fn test_upsert_designer_keeps_id_and_credits() {
        let store = MemoryStore::new();

        let (first, created) = store.upsert_designer(new_designer("d@example.com", "branding")).await.unwrap();
        assert!(created);
        assert_eq!(first.credits, DEFAULT_CREDITS);

        store.decrement_credit(first.id).await.unwrap();

        let (second, created) = store.upsert_designer(new_designer("d@example.com", "motion")).await.unwrap();
        assert!(!created);
        assert_eq!(second.id, first.id);
        assert_eq!(second.skills.as_deref(), Some("motion"));
        assert_eq!(second.credits, DEFAULT_CREDITS - 1);
        assert_eq!(store.list_designers().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_match_is_idempotent() {
        let store = MemoryStore::new();
        let (designer, _) = store.upsert_designer(new_designer("d@example.com", "branding")).await.unwrap();
        let founder = store.create_founder(new_founder()).await.unwrap();

        let first = store.insert_match_if_absent(founder.id, designer.id, MatchStatus::Pending).await.unwrap();
        let second = store.insert_match_if_absent(founder.id, designer.id, MatchStatus::Pending).await.unwrap();

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(store.list_matches().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_match_rejects_unknown_founder() {
        let store = MemoryStore::new();
        let (designer, _) = store.upsert_designer(new_designer("d@example.com", "branding")).await.unwrap();

        let result = store.insert_match_if_absent(999, designer.id, MatchStatus::Pending).await;
        assert!(matches!(result, Err(StoreError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_decrement_stops_at_zero() {
        let store = MemoryStore::new();
        let (designer, _) = store.upsert_designer(new_designer("d@example.com", "branding")).await.unwrap();

        for expected in (0..DEFAULT_CREDITS).rev() {
            assert_eq!(store.decrement_credit(designer.id).await.unwrap(), Some(expected));
        }
        assert_eq!(store.decrement_credit(designer.id).await.unwrap(), None);
        assert_eq!(store.find_designer(designer.id).await.unwrap().unwrap().credits, 0);
    }

    #[tokio::test]
    async fn test_latest_match_filters_by_founder() {
        let store = MemoryStore::new();
        let (a, _) = store.upsert_designer(new_designer("a@example.com", "branding")).await.unwrap();
        let (b, _) = store.upsert_designer(new_designer("b@example.com", "branding")).await.unwrap();
        let f1 = store.create_founder(new_founder()).await.unwrap();
        let f2 = store.create_founder(new_founder()).await.unwrap();

        store.insert_match_if_absent(f1.id, a.id, MatchStatus::Pending).await.unwrap();
        store.insert_match_if_absent(f2.id, b.id, MatchStatus::Pending).await.unwrap();

        let overall = store.latest_match(None).await.unwrap().unwrap();
        assert_eq!(overall.founder_id, f2.id);

        let for_f1 = store.latest_match(Some(f1.id)).await.unwrap().unwrap();
        assert_eq!(for_f1.designer_id, a.id);
    }

    #[tokio::test]
    async fn test_purchase_logs_and_adds_credits() {
        let store = MemoryStore::new();
        let (designer, _) = store.upsert_designer(new_designer("d@example.com", "branding")).await.unwrap();

        let purchase = store.record_credit_purchase(designer.id, 5, Some(499)).await.unwrap().unwrap();
        assert_eq!(purchase.credits_added, 5);
        assert_eq!(store.find_designer(designer.id).await.unwrap().unwrap().credits, DEFAULT_CREDITS + 5);

        assert!(store.record_credit_purchase(999, 5, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_credit_overflow_is_rejected() {
        let store = MemoryStore::new();
        let (designer, _) = store.upsert_designer(new_designer("d@example.com", "branding")).await.unwrap();

        let result = store.add_credits(designer.id, i32::MAX).await;
        assert!(matches!(result, Err(StoreError::InvalidInput(_))));

        let result = store.record_credit_purchase(designer.id, i32::MAX, None).await;
        assert!(matches!(result, Err(StoreError::InvalidInput(_))));

        let designer = store.find_designer(designer.id).await.unwrap().unwrap();
        assert_eq!(designer.credits, DEFAULT_CREDITS);
    }
}

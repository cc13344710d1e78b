use std::sync::Arc;

use crate::models::{CreditPurchase, Designer};
use crate::services::store::{Store, StoreError};

/// Result of trying to spend one rematch credit
#[derive(Debug, Clone, PartialEq)]
pub enum DeductOutcome {
    /// One credit taken; `remaining` is the new balance
    Deducted { remaining: i32 },
    /// Balance was zero or below; nothing changed
    Insufficient { designer: Designer },
    DesignerNotFound,
}

impl DeductOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeductOutcome::Deducted { .. })
    }
}

/// Per-designer rematch credit balance
///
/// The balance is only changed through this ledger. Decrements go through
/// the store's conditional decrement, so a balance never drops below zero.
#[derive(Clone)]
pub struct CreditLedger {
    store: Arc<dyn Store>,
}

impl CreditLedger {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// False for unknown designers
    pub async fn has_credits(&self, designer_id: i64) -> Result<bool, StoreError> {
        Ok(self
            .store
            .find_designer(designer_id)
            .await?
            .map_or(false, |designer| designer.credits > 0))
    }

    /// Take one credit
    ///
    /// The caller decides what to do with an `Insufficient` outcome; the
    /// ledger itself sends nothing.
    pub async fn deduct_credit(&self, designer_id: i64) -> Result<DeductOutcome, StoreError> {
        if let Some(remaining) = self.store.decrement_credit(designer_id).await? {
            tracing::info!("Deducted credit from designer {}, {} left", designer_id, remaining);
            return Ok(DeductOutcome::Deducted { remaining });
        }

        match self.store.find_designer(designer_id).await? {
            Some(designer) => {
                tracing::info!("Designer {} has no credits left", designer_id);
                Ok(DeductOutcome::Insufficient { designer })
            }
            None => Ok(DeductOutcome::DesignerNotFound),
        }
    }

    /// Add `amount` to the balance; false for unknown designers
    pub async fn add_credits(&self, designer_id: i64, amount: i32) -> Result<bool, StoreError> {
        let balance = self.store.add_credits(designer_id, amount).await?;
        if let Some(balance) = balance {
            tracing::info!("Added {} credits to designer {}, balance {}", amount, designer_id, balance);
        }
        Ok(balance.is_some())
    }

    /// Grant credits and record them in the purchase log
    pub async fn purchase_credits(
        &self,
        designer_id: i64,
        credits: i32,
        amount_cents: Option<i32>,
    ) -> Result<Option<CreditPurchase>, StoreError> {
        self.store
            .record_credit_purchase(designer_id, credits, amount_cents)
            .await
    }

    /// Current balance, or `None` for unknown designers
    pub async fn balance(&self, designer_id: i64) -> Result<Option<i32>, StoreError> {
        Ok(self
            .store
            .find_designer(designer_id)
            .await?
            .map(|designer| designer.credits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewDesigner, DEFAULT_CREDITS};
    use crate::services::MemoryStore;

    async fn setup() -> (CreditLedger, Arc<MemoryStore>, i64) {
        let store = Arc::new(MemoryStore::new());
        let (designer, _) = store
            .upsert_designer(NewDesigner {
                name: "Dana".to_string(),
                email: "dana@example.com".to_string(),
                skills: Some("branding".to_string()),
                experience: None,
            })
            .await
            .unwrap();

        (CreditLedger::new(store.clone()), store, designer.id)
    }

    #[tokio::test]
    async fn test_new_designer_has_credits() {
        let (ledger, _, id) = setup().await;

        assert!(ledger.has_credits(id).await.unwrap());
        assert_eq!(ledger.balance(id).await.unwrap(), Some(DEFAULT_CREDITS));
    }

    #[tokio::test]
    async fn test_deduct_from_three_leaves_two() {
        let (ledger, _, id) = setup().await;

        let outcome = ledger.deduct_credit(id).await.unwrap();

        assert_eq!(outcome, DeductOutcome::Deducted { remaining: 2 });
        assert!(outcome.is_success());
        assert_eq!(ledger.balance(id).await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_deduct_at_zero_is_insufficient() {
        let (ledger, store, id) = setup().await;
        store.add_credits(id, -DEFAULT_CREDITS).await.unwrap();

        let outcome = ledger.deduct_credit(id).await.unwrap();

        assert!(matches!(outcome, DeductOutcome::Insufficient { ref designer } if designer.id == id));
        assert!(!outcome.is_success());
        assert_eq!(ledger.balance(id).await.unwrap(), Some(0));
        assert!(!ledger.has_credits(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_designer_fails_closed() {
        let (ledger, _, _) = setup().await;

        assert!(!ledger.has_credits(999).await.unwrap());
        assert_eq!(ledger.deduct_credit(999).await.unwrap(), DeductOutcome::DesignerNotFound);
        assert!(!ledger.add_credits(999, 5).await.unwrap());
        assert!(ledger.purchase_credits(999, 5, Some(500)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_credits() {
        let (ledger, _, id) = setup().await;
        ledger.deduct_credit(id).await.unwrap();

        assert!(ledger.add_credits(id, 5).await.unwrap());
        assert_eq!(ledger.balance(id).await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn test_add_credits_past_i32_is_rejected() {
        let (ledger, _, id) = setup().await;

        let result = ledger.add_credits(id, i32::MAX).await;

        assert!(matches!(result, Err(StoreError::InvalidInput(_))));
        assert_eq!(ledger.balance(id).await.unwrap(), Some(DEFAULT_CREDITS));
    }
}

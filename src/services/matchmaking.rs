use std::sync::Arc;

use thiserror::Error;
use validator::Validate;

use crate::core::{CreditLedger, DeductOutcome, Matcher};
use crate::models::{
    CreditPurchase, Designer, DesignerSubmission, Founder, FounderSubmission, Match, MatchDetail, MatchStatus,
    NewDesigner, NewFounder, Role,
};
use crate::services::mailer::{EmailMessage, Notifier};
use crate::services::store::{Store, StoreError};

/// Faults surfaced to the HTTP layer
#[derive(Debug, Error)]
pub enum MatchmakingError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub enum FounderOutcome {
    Matched {
        founder: Founder,
        designer: Designer,
        record: Match,
    },
    NoMatch {
        founder: Founder,
    },
}

#[derive(Debug, Clone)]
pub enum RematchOutcome {
    Rematched {
        founder: Founder,
        designers: Vec<Designer>,
        new_matches: Vec<Match>,
        credits_remaining: Option<i32>,
    },
    NoMatch {
        founder: Founder,
        credits_remaining: Option<i32>,
    },
    OutOfCredits {
        founder: Founder,
        designer_id: i64,
    },
    /// No founder id given and no match to fall back on, or the id is unknown
    FounderNotFound,
}

/// The other side of a match, as shown on the match success screen
#[derive(Debug, Clone)]
pub enum Counterpart {
    Designer(Designer),
    Founder(Founder),
}

/// Orchestrates store writes, matching, credits and email for each use case
#[derive(Clone)]
pub struct Matchmaker {
    store: Arc<dyn Store>,
    notifier: Arc<dyn Notifier>,
    matcher: Matcher,
    ledger: CreditLedger,
    rematch_limit: usize,
}

impl Matchmaker {
    pub fn new(store: Arc<dyn Store>, notifier: Arc<dyn Notifier>, matcher: Matcher, rematch_limit: usize) -> Self {
        let ledger = CreditLedger::new(store.clone());
        Self {
            store,
            notifier,
            matcher,
            ledger,
            rematch_limit,
        }
    }

    pub fn ledger(&self) -> &CreditLedger {
        &self.ledger
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub async fn health_check(&self) -> bool {
        self.store.health_check().await.unwrap_or(false)
    }

    /// Register a founder and pair them with the single best designer
    pub async fn submit_founder(&self, submission: FounderSubmission) -> Result<FounderOutcome, MatchmakingError> {
        submission
            .validate()
            .map_err(|e| MatchmakingError::Validation(e.to_string()))?;

        let founder = self
            .store
            .create_founder(NewFounder {
                name: submission.name,
                email: submission.email,
                project: Some(submission.project),
                needs: Some(submission.needs),
            })
            .await?;

        tracing::info!("Founder {} signed up", founder.id);

        self.notify(EmailMessage::confirmation(&founder.email, Role::Founder)).await;

        let designer = match self.matcher.find_single_best_match(self.store.as_ref(), &founder).await? {
            Some(designer) => designer,
            None => {
                tracing::info!("No designer available for founder {}", founder.id);
                return Ok(FounderOutcome::NoMatch { founder });
            }
        };

        let record = match self
            .store
            .insert_match_if_absent(founder.id, designer.id, MatchStatus::Pending)
            .await?
        {
            Some(record) => record,
            None => {
                // a brand-new founder cannot have prior matches
                tracing::warn!("Match {} -> {} already existed", founder.id, designer.id);
                return Ok(FounderOutcome::NoMatch { founder });
            }
        };

        tracing::info!("Matched founder {} with designer {}", founder.id, designer.id);

        self.notify(EmailMessage::match_found(&founder.email, &designer.name, &designer.email))
            .await;
        self.notify(EmailMessage::match_found(&designer.email, &founder.name, &founder.email))
            .await;

        Ok(FounderOutcome::Matched {
            founder,
            designer,
            record,
        })
    }

    /// Create or update a designer profile keyed by email
    pub async fn submit_designer(&self, submission: DesignerSubmission) -> Result<(Designer, bool), MatchmakingError> {
        submission
            .validate()
            .map_err(|e| MatchmakingError::Validation(e.to_string()))?;

        let (designer, created) = self
            .store
            .upsert_designer(NewDesigner {
                name: submission.name,
                email: submission.email,
                skills: Some(submission.skills),
                experience: Some(submission.experience.unwrap_or_default()),
            })
            .await?;

        tracing::info!(
            "Designer {} {}",
            designer.id,
            if created { "signed up" } else { "updated their profile" }
        );

        self.notify(EmailMessage::confirmation(&designer.email, Role::Designer)).await;

        Ok((designer, created))
    }

    /// Find fresh designers for a founder
    ///
    /// A designer-side rematch spends one of the designer's credits first.
    /// Missing ids fall back to the most recent match.
    pub async fn rematch(
        &self,
        role: Role,
        founder_id: Option<i64>,
        designer_id: Option<i64>,
    ) -> Result<RematchOutcome, MatchmakingError> {
        let founder_id = match founder_id {
            Some(id) => Some(id),
            None => self.store.latest_match(None).await?.map(|m| m.founder_id),
        };

        let founder = match founder_id {
            Some(id) => self.store.find_founder(id).await?,
            None => None,
        };
        let Some(founder) = founder else {
            return Ok(RematchOutcome::FounderNotFound);
        };

        let mut credits_remaining = None;

        if role == Role::Designer {
            let designer_id = match designer_id {
                Some(id) => Some(id),
                None => self
                    .store
                    .latest_match(Some(founder.id))
                    .await?
                    .map(|m| m.designer_id),
            };

            if let Some(designer_id) = designer_id {
                if !self.ledger.has_credits(designer_id).await? {
                    tracing::info!("Rematch for founder {} refused, designer {} has no credits", founder.id, designer_id);
                    return Ok(RematchOutcome::OutOfCredits { founder, designer_id });
                }

                match self.ledger.deduct_credit(designer_id).await? {
                    DeductOutcome::Deducted { remaining } => credits_remaining = Some(remaining),
                    DeductOutcome::Insufficient { designer } => {
                        self.notify(EmailMessage::out_of_credits(&designer.email)).await;
                        return Ok(RematchOutcome::OutOfCredits { founder, designer_id });
                    }
                    DeductOutcome::DesignerNotFound => {}
                }
            }
        }

        let designers = self
            .matcher
            .find_matches_for_founder(self.store.as_ref(), &founder, self.rematch_limit)
            .await?;

        if designers.is_empty() {
            tracing::info!("Rematch for founder {} found no new designers", founder.id);
            return Ok(RematchOutcome::NoMatch {
                founder,
                credits_remaining,
            });
        }

        let mut new_matches = Vec::with_capacity(designers.len());
        for designer in &designers {
            if let Some(record) = self
                .store
                .insert_match_if_absent(founder.id, designer.id, MatchStatus::Pending)
                .await?
            {
                new_matches.push(record);
            }
        }

        tracing::info!(
            "Rematch for founder {} returned {} designers ({} new matches)",
            founder.id,
            designers.len(),
            new_matches.len()
        );

        self.notify(EmailMessage::rematch(&founder.email, &designers)).await;

        Ok(RematchOutcome::Rematched {
            founder,
            designers,
            new_matches,
            credits_remaining,
        })
    }

    /// The party on the `role` side of a match
    ///
    /// Uses the given pair when both ids are present, otherwise the most
    /// recent match.
    pub async fn latest_counterpart(
        &self,
        role: Role,
        founder_id: Option<i64>,
        designer_id: Option<i64>,
    ) -> Result<Option<Counterpart>, MatchmakingError> {
        let (founder_id, designer_id) = match (founder_id, designer_id) {
            (Some(f), Some(d)) => (f, d),
            _ => match self.store.latest_match(None).await? {
                Some(latest) => (latest.founder_id, latest.designer_id),
                None => return Ok(None),
            },
        };

        let counterpart = match role {
            Role::Designer => self.store.find_designer(designer_id).await?.map(Counterpart::Designer),
            Role::Founder => self.store.find_founder(founder_id).await?.map(Counterpart::Founder),
        };

        Ok(counterpart)
    }

    /// Every match, newest first
    pub async fn list_matches(&self) -> Result<Vec<MatchDetail>, MatchmakingError> {
        Ok(self.store.list_matches().await?)
    }

    /// Current balance, or `None` for unknown designers
    pub async fn credit_balance(&self, designer_id: i64) -> Result<Option<i32>, MatchmakingError> {
        Ok(self.ledger.balance(designer_id).await?)
    }

    pub async fn grant_credits(
        &self,
        designer_id: i64,
        credits: i32,
        amount_cents: Option<i32>,
    ) -> Result<Option<(CreditPurchase, i32)>, MatchmakingError> {
        let Some(purchase) = self.ledger.purchase_credits(designer_id, credits, amount_cents).await? else {
            return Ok(None);
        };
        let balance = self.ledger.balance(designer_id).await?.unwrap_or(purchase.credits_added);
        Ok(Some((purchase, balance)))
    }

    /// Delivery failures are logged and never fail the workflow
    async fn notify(&self, message: EmailMessage) {
        if let Err(e) = self.notifier.send(&message).await {
            tracing::warn!("Failed to send '{}' to {}: {}", message.subject, message.to, e);
        }
    }
}

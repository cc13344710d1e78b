use std::collections::HashSet;

use crate::core::scoring::score_match;
use crate::models::{Designer, Founder, ScoredDesigner, ScoringWeights};
use crate::services::store::{Store, StoreError};

/// Ranks designers against a founder's needs
///
/// # Pipeline Stages
/// 1. Drop designers already matched with the founder
/// 2. Score the remainder
/// 3. Stable sort by descending score (ties keep enumeration order)
/// 4. Truncate to the limit
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn score(&self, founder: &Founder, designer: &Designer) -> f64 {
        score_match(founder, designer, &self.weights)
    }

    /// Rank candidates in memory
    ///
    /// # Arguments
    /// * `founder` - The founder whose needs drive the score
    /// * `candidates` - Designers in enumeration order
    /// * `already_matched` - Designer ids to leave out
    /// * `limit` - Maximum number of designers to return
    pub fn rank_designers(
        &self,
        founder: &Founder,
        candidates: Vec<Designer>,
        already_matched: &HashSet<i64>,
        limit: usize,
    ) -> Vec<ScoredDesigner> {
        let mut scored: Vec<ScoredDesigner> = candidates
            .into_iter()
            .filter(|designer| !already_matched.contains(&designer.id))
            .map(|designer| {
                let score = self.score(founder, &designer);
                ScoredDesigner { designer, score }
            })
            .collect();

        // sort_by is stable, so equal scores keep their enumeration order
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored.truncate(limit);
        scored
    }

    /// Best designers for a founder, skipping any already matched with them
    pub async fn find_matches_for_founder(
        &self,
        store: &dyn Store,
        founder: &Founder,
        limit: usize,
    ) -> Result<Vec<Designer>, StoreError> {
        let designers = store.list_designers().await?;
        if designers.is_empty() {
            return Ok(Vec::new());
        }

        let already_matched: HashSet<i64> = store
            .matched_designer_ids(founder.id)
            .await?
            .into_iter()
            .collect();

        let total_candidates = designers.len();
        let ranked = self.rank_designers(founder, designers, &already_matched, limit);

        tracing::debug!(
            "Ranked {} of {} designers for founder {} ({} already matched)",
            ranked.len(),
            total_candidates,
            founder.id,
            already_matched.len()
        );

        Ok(ranked.into_iter().map(|scored| scored.designer).collect())
    }

    /// Single-match mode: the top designer, if any is eligible
    pub async fn find_single_best_match(
        &self,
        store: &dyn Store,
        founder: &Founder,
    ) -> Result<Option<Designer>, StoreError> {
        Ok(self
            .find_matches_for_founder(store, founder, 1)
            .await?
            .into_iter()
            .next())
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Whether this founder and designer have been paired before
pub async fn has_matched_before(
    store: &dyn Store,
    founder_id: i64,
    designer_id: i64,
) -> Result<bool, StoreError> {
    store.has_match(founder_id, designer_id).await
}

//! Knowledge card cache keyed by calendar day

use std::sync::Arc;

use chrono::NaiveDate;
use healthprod_domain::constants::{CARD_DATE_FORMAT, KNOWLEDGE_CARD_DATE_KEY, KNOWLEDGE_CARD_KEY};
use healthprod_domain::{HealthProdError, KnowledgeCard, Result};
use tracing::{debug, warn};

use super::ports::KeyValueStore;
use crate::assistant::AssistantService;

/// One knowledge card per calendar day.
///
/// A card stored under any other date is treated as absent. Storage
/// failures degrade to "absent" and are logged.
#[derive(Clone)]
pub struct KnowledgeCardCache {
    store: Arc<dyn KeyValueStore>,
}

impl KnowledgeCardCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Today's cached card, if any.
    pub async fn cached(&self, today: NaiveDate) -> Option<KnowledgeCard> {
        match self.read(today).await {
            Ok(card) => card,
            Err(err) => {
                warn!(error = %err, "Failed to read cached knowledge card");
                None
            }
        }
    }

    async fn read(&self, today: NaiveDate) -> Result<Option<KnowledgeCard>> {
        let Some(date) = self.store.get(KNOWLEDGE_CARD_DATE_KEY).await? else {
            return Ok(None);
        };
        if date != today.format(CARD_DATE_FORMAT).to_string() {
            debug!(stored = %date, "Cached knowledge card is stale");
            return Ok(None);
        }
        let Some(payload) = self.store.get(KNOWLEDGE_CARD_KEY).await? else {
            return Ok(None);
        };
        serde_json::from_str(&payload)
            .map(Some)
            .map_err(|e| HealthProdError::Storage(format!("Corrupt knowledge card: {e}")))
    }

    /// Persist `card` as today's card.
    pub async fn store(&self, card: &KnowledgeCard, today: NaiveDate) -> Result<()> {
        let payload = serde_json::to_string(card)
            .map_err(|e| {
                HealthProdError::Internal(format!("Failed to encode knowledge card: {e}"))
            })?;
        self.store.set(KNOWLEDGE_CARD_KEY, &payload).await?;
        self.store.set(KNOWLEDGE_CARD_DATE_KEY, &today.format(CARD_DATE_FORMAT).to_string()).await
    }

    /// Today's card from the cache, or freshly generated when online.
    ///
    /// The built-in fallback card is returned but never cached, so a later
    /// call the same day retries the gateway.
    pub async fn today(
        &self,
        assistant: &AssistantService,
        today: NaiveDate,
        online: bool,
    ) -> Option<KnowledgeCard> {
        if let Some(card) = self.cached(today).await {
            return Some(card);
        }
        if !online {
            debug!("Offline and no cached knowledge card");
            return None;
        }

        let card = assistant.knowledge_card().await;
        if card != KnowledgeCard::fallback() {
            if let Err(err) = self.store(&card, today).await {
                warn!(error = %err, "Failed to cache knowledge card");
            }
        }
        Some(card)
    }
}

//! Deal orchestrator implementation.

use super::{
    errors::{DealError, DealResult},
    models::{DealOutcome, DeckColor},
};
use crate::{
    game::{Deck, Hand, SeatLabel, constants::HAND_SIZE},
    session::SessionSelection,
    storage::{KeyValueStore, StorageError},
    table::TableRegistry,
};
use rand::Rng;
use std::{sync::Arc, time::Duration};

/// Runs deal cycles: shuffle, deal 13 cards per seat, sort, score and flip
/// the persisted deck color.
#[derive(Clone)]
pub struct DealOrchestrator {
    registry: TableRegistry,
    store: Arc<dyn KeyValueStore>,
    deck_color_key: String,
}

impl DealOrchestrator {
    /// Create a new deal orchestrator
    ///
    /// # Arguments
    ///
    /// * `registry` - Registry used to resolve the selected table
    /// * `store` - Store holding the last deck color
    /// * `deck_color_key` - Key of the last deck color record
    pub fn new(
        registry: TableRegistry,
        store: Arc<dyn KeyValueStore>,
        deck_color_key: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            store,
            deck_color_key: deck_color_key.into(),
        }
    }

    /// Color of the most recent successful deal
    pub fn last_deck_color(&self) -> Option<DeckColor> {
        match self.store.get(&self.deck_color_key) {
            Ok(raw) => raw.as_deref().and_then(|raw| self.decode_color(raw)),
            Err(e) => {
                log::warn!("Failed to read last deck color, starting over: {}", e);
                None
            }
        }
    }

    fn decode_color(&self, raw: &str) -> Option<DeckColor> {
        let color = DeckColor::decode(raw);
        if color.is_none() {
            log::warn!("Unrecognized deck color record {:?}, starting over", raw);
        }
        color
    }

    /// Persist the color for this deal, swapping against the record it was
    /// derived from so concurrent dealers still alternate.
    fn flip_deck_color(&self) -> DealResult<DeckColor> {
        loop {
            let raw = self.store.get(&self.deck_color_key)?;
            let next = DeckColor::after(raw.as_deref().and_then(|raw| self.decode_color(raw)));
            let encoded = serde_json::to_string(&next).map_err(StorageError::from)?;
            if self
                .store
                .compare_and_set(&self.deck_color_key, raw.as_deref(), &encoded)?
            {
                return Ok(next);
            }
        }
    }

    /// Deal with the thread-local RNG
    ///
    /// # Errors
    ///
    /// * `DealError::NotAuthorized` - Selection role is spectator
    /// * `DealError::Table` - Selected table no longer exists
    /// * `DealError::Storage` - Deck color could not be saved
    pub fn deal(&self, selection: &SessionSelection) -> DealResult<DealOutcome> {
        self.deal_with_rng(selection, &mut rand::rng())
    }

    /// Deal with a caller-supplied RNG, reproducible under a fixed seed
    pub fn deal_with_rng<R: Rng + ?Sized>(
        &self,
        selection: &SessionSelection,
        rng: &mut R,
    ) -> DealResult<DealOutcome> {
        if selection.is_spectator() {
            log::debug!("Deal refused for spectator");
            return Err(DealError::NotAuthorized);
        }

        let table = match selection.table_id.as_deref() {
            Some(id) => Some(self.registry.load_table(id)?),
            None => None,
        };

        let mut deck = Deck::new();
        deck.shuffle_with(rng);

        let mut hands = Vec::with_capacity(SeatLabel::DRAW_ORDER.len());
        for seat in SeatLabel::DRAW_ORDER {
            let cards = deck.deal(HAND_SIZE)?;
            hands.push(Hand::new(seat, &cards));
        }

        let deck_color = self.flip_deck_color()?;

        let occupants = SeatLabel::DRAW_ORDER
            .into_iter()
            .map(|seat| {
                let occupant = table
                    .as_ref()
                    .and_then(|t| t.positions.get(seat))
                    .map(str::to_string);
                (seat, occupant)
            })
            .collect();

        let outcome = DealOutcome {
            table_id: table.map(|t| t.id),
            deck_color,
            hands,
            occupants,
        };

        let points: Vec<String> = outcome
            .hands
            .iter()
            .map(|h| format!("{}={}", h.seat, h.points))
            .collect();
        log::info!(
            "Dealt {} deck at {}: {}",
            outcome.deck_color,
            outcome.table_id.as_deref().unwrap_or("no table"),
            points.join(" ")
        );

        Ok(outcome)
    }

    /// Wait `delay`, then deal. Dropping the future before the delay ends
    /// cancels the deal with no state change.
    pub async fn deal_after(
        &self,
        selection: &SessionSelection,
        delay: Duration,
    ) -> DealResult<DealOutcome> {
        tokio::time::sleep(delay).await;
        self.deal(selection)
    }
}

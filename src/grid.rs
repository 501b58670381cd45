//! The card grid: the rendered snapshot of the registry.
//!
//! Every rebuild replaces all cards with fresh `Loading` cards and bumps the
//! [`Generation`]. Thumbnail tasks carry a [`RenderTicket`] naming the
//! generation and document they were spawned for, so a completion arriving
//! after a rebuild is recognised as stale and dropped instead of touching a
//! card it never belonged to.

use crate::thumbnail::ThumbnailState;
use crate::types::{Document, DocumentId};

/// Identifies one rebuild of the grid. Strictly increasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Address of a card within a specific grid generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTicket {
    pub generation: Generation,
    pub document_id: DocumentId,
}

impl RenderTicket {
    pub fn new(generation: Generation, document_id: DocumentId) -> Self {
        Self {
            generation,
            document_id,
        }
    }
}

/// One rendered document card.
#[derive(Debug, Clone)]
pub struct Card {
    pub document: Document,
    pub thumbnail: ThumbnailState,
}

#[derive(Debug, Default)]
pub struct CardGrid {
    generation: Generation,
    cards: Vec<Card>,
}

impl CardGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every card with a `Loading` card for `documents`.
    ///
    /// Returns the new generation. Tickets from earlier generations are
    /// invalid from this point on.
    pub fn rebuild(&mut self, documents: Vec<Document>) -> Generation {
        self.generation = self.generation.next();
        self.cards = documents
            .into_iter()
            .map(|document| Card {
                document,
                thumbnail: ThumbnailState::Loading,
            })
            .collect();
        tracing::debug!(
            generation = self.generation.value(),
            cards = self.cards.len(),
            "grid rebuilt"
        );
        self.generation
    }

    /// Apply a pipeline outcome.
    ///
    /// Returns `false` (and changes nothing) when the ticket is stale, the
    /// card no longer exists, or the card already left `Loading`.
    pub fn complete(&mut self, ticket: RenderTicket, state: ThumbnailState) -> bool {
        if ticket.generation != self.generation {
            tracing::trace!(
                stale = ticket.generation.value(),
                current = self.generation.value(),
                "ignoring completion from a previous render"
            );
            return false;
        }
        let Some(card) = self
            .cards
            .iter_mut()
            .find(|c| c.document.id == ticket.document_id)
        else {
            return false;
        };
        if card.thumbnail.is_terminal() || state.is_loading() {
            return false;
        }
        card.thumbnail = state;
        true
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: DocumentId) -> Option<&Card> {
        self.cards.iter().find(|c| c.document.id == id)
    }

    /// No cards: the page shows its empty state.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards still waiting on their thumbnail.
    pub fn pending(&self) -> usize {
        self.cards
            .iter()
            .filter(|c| c.thumbnail.is_loading())
            .count()
    }

    /// Drop every card. Later completions become no-ops.
    pub fn clear(&mut self) {
        self.rebuild(Vec::new());
    }
}

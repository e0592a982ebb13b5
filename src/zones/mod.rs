//! Hand/pile store: where the cards are.
//!
//! ## Key Types
//!
//! - `Deck`: shared draw pile, front = next draw
//! - `DiscardPile`: played and consumed cards, in play order
//! - `Hand`: one seat's cards
//! - `ZonePosition`: insertion point for cards returned to the deck
//!
//! Every card in a game lives in exactly one of these collections, so the
//! sum of their sizes never changes.

pub mod piles;

pub use piles::{Deck, DiscardPile, Hand, ZonePosition};

//! Card vocabulary and deck construction.
//!
//! ## Key Types
//!
//! - `CardKind`: The closed set of card kinds (cards are fungible)
//! - `DeckBuilder`: Deals starting hands and builds the draw pile

pub mod deck;
pub mod kind;

pub use deck::DeckBuilder;
pub use kind::CardKind;

//! Game events and the append-only event log.
//!
//! Each state-changing step appends exactly one `GameEvent`. Events carry
//! full information; `GameEvent::describe` renders them for one seat,
//! hiding what that seat is not allowed to see (the opponent's draws, the
//! opponent's view of the future).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardKind;
use crate::core::{PlayerId, PlayerMap};

/// Something that happened in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    /// A single card was played and entered the discard pile.
    Played { player: PlayerId, card: CardKind },
    Skipped { player: PlayerId },
    Attacked { player: PlayerId, target: PlayerId, owed: u32 },
    SawFuture { player: PlayerId, cards: Vec<CardKind> },
    DeckShuffled { player: PlayerId },
    Favored { player: PlayerId, from: PlayerId, card: Option<CardKind> },
    Peeked { player: PlayerId, target: PlayerId, cards: Vec<CardKind> },
    PairPlayed { player: PlayerId, cat: CardKind, stolen: Option<CardKind> },
    TrioPlayed {
        player: PlayerId,
        cat: CardKind,
        requested: CardKind,
        taken: Option<CardKind>,
    },
    Drew { player: PlayerId, card: CardKind },
    Reshuffled { cards: usize },
    Defused { player: PlayerId },
    UnluckyDrawn { player: PlayerId, lost: Option<CardKind> },
    Exploded { player: PlayerId, winner: PlayerId },
    Exhausted { player: PlayerId, winner: PlayerId },
    Noped { by: PlayerId, card: CardKind },
    AwaitingNope { actor: PlayerId, card: CardKind },
    Cancelled { actor: PlayerId, card: CardKind },
    TurnPassed { to: PlayerId, owed: u32 },
    TurnContinues { player: PlayerId, owed: u32 },
}

impl GameEvent {
    /// One human-readable line, from `viewer`'s point of view.
    #[must_use]
    pub fn describe(&self, names: &PlayerMap<String>, viewer: PlayerId) -> String {
        let name = |p: &PlayerId| names[*p].as_str();
        let list = |cards: &[CardKind]| {
            cards
                .iter()
                .map(|c| c.name())
                .collect::<Vec<_>>()
                .join(", ")
        };

        match self {
            GameEvent::GameStarted => "--- New game started ---".to_string(),
            GameEvent::Played { player, card } => format!("{} plays {}.", name(player), card),
            GameEvent::Skipped { player } => format!("{}'s turn is skipped.", name(player)),
            GameEvent::Attacked { target, owed, .. } => {
                format!("Attack played: {} must take {} turns.", name(target), owed)
            }
            GameEvent::SawFuture { player, cards } if *player == viewer => {
                format!("THE FUTURE: [{}]", list(cards))
            }
            GameEvent::SawFuture { player, .. } => format!("{} sees the top cards.", name(player)),
            GameEvent::DeckShuffled { .. } => "Deck shuffled.".to_string(),
            GameEvent::Favored { player, from, card: Some(card) } => {
                format!("{} gives {} {}.", name(from), name(player), card)
            }
            GameEvent::Favored { from, .. } => format!("{} has nothing to give.", name(from)),
            GameEvent::Peeked { player, target, cards } if *player == viewer => {
                format!("You peek at {}'s first cards: [{}]", name(target), list(cards))
            }
            GameEvent::Peeked { player, target, .. } => {
                format!("{} peeks at {}'s cards.", name(player), name(target))
            }
            GameEvent::PairPlayed { player, cat, stolen: Some(card) } => format!(
                "{} played a pair of {}s and stole {}.",
                name(player),
                cat,
                card
            ),
            GameEvent::PairPlayed { player, cat, stolen: None } => format!(
                "{} played a pair of {}s; there was nothing to steal.",
                name(player),
                cat
            ),
            GameEvent::TrioPlayed { player, requested, taken: Some(card), .. } => format!(
                "{} asked for {} and took {}.",
                name(player),
                requested,
                card
            ),
            GameEvent::TrioPlayed { player, requested, taken: None, .. } => format!(
                "{} asked for {}, but there was none.",
                name(player),
                requested
            ),
            GameEvent::Drew { player, card } if *player == viewer => {
                format!("{} drew: {}", name(player), card)
            }
            GameEvent::Drew { player, .. } => format!("{} drew a card.", name(player)),
            GameEvent::Reshuffled { cards } => {
                format!("Shuffled {cards} discarded cards back into the deck.")
            }
            GameEvent::Defused { player } => {
                format!("{} used Defuse. Kitten returned to deck.", name(player))
            }
            GameEvent::UnluckyDrawn { player, lost: Some(card) } => {
                format!("{} drew Unlucky and discarded {}.", name(player), card)
            }
            GameEvent::UnluckyDrawn { player, lost: None } => {
                format!("{} drew Unlucky but had no cards to discard.", name(player))
            }
            GameEvent::Exploded { player, winner } => {
                format!("{} exploded! {} wins.", name(player), name(winner))
            }
            GameEvent::Exhausted { winner, .. } => {
                format!("Deck and discard empty. {} wins.", name(winner))
            }
            GameEvent::Noped { by, card } => format!("{} used Nope on {}!", name(by), card),
            GameEvent::AwaitingNope { actor, card } => {
                format!("Pending: {} -> {} (awaiting Nope decision).", name(actor), card)
            }
            GameEvent::Cancelled { actor, card } => {
                format!("{}'s {} was NOPED.", name(actor), card)
            }
            GameEvent::TurnPassed { to, owed: 0 } => format!("{}'s turn.", name(to)),
            GameEvent::TurnPassed { to, owed } => {
                format!("{}'s turn ({} turns owed).", name(to), owed)
            }
            GameEvent::TurnContinues { player, owed } => {
                format!("{} takes another turn ({} left).", name(player), owed)
            }
        }
    }
}

/// Append-only, ordered list of events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vector<GameEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Events appended after the first `from`.
    pub fn since(&self, from: usize) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().skip(from)
    }

    /// Every event rendered for `viewer`.
    #[must_use]
    pub fn render(&self, names: &PlayerMap<String>, viewer: PlayerId) -> Vec<String> {
        self.events.iter().map(|e| e.describe(names, viewer)).collect()
    }
}

//! A single-player blackjack engine with two front-ends.
//!
//! The crate provides a [`Session`] that manages the full game flow
//! (betting, dealing, the player turn loop, dealer play, and payout
//! resolution), a basic-strategy [`advise`] heuristic sold to the player for
//! a cut of their balance, and a persisted [`Leaderboard`] high-score record.
//!
//! Two binaries present the same engine: `twentyone` (line-oriented console)
//! and `twentyone-tui` (full-screen terminal window).
//!
//! # Example
//!
//! ```no_run
//! use twentyone::{GameOptions, RoundState, Session};
//!
//! let mut session = Session::new(GameOptions::default(), 42);
//! let mut round = session.begin_round(10).unwrap();
//!
//! if round.state() == RoundState::PlayerTurn {
//!     round.stand().unwrap();
//!     round.dealer_play().unwrap();
//! }
//! let result = session.resolve(&mut round).unwrap();
//! let _ = result;
//! ```

pub mod advisor;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod leaderboard;
pub mod options;
pub mod result;

// Re-export main types
pub use advisor::{Advice, advise};
pub use card::{Card, DECK_SIZE, Suit};
pub use deck::Deck;
pub use error::{ActionError, AdviceError, BetError, LeaderboardError, ResolveError};
pub use game::{DEALER_STAND_VALUE, MIN_ADVICE_BALANCE, PurchasedAdvice, Round, RoundState, Session};
pub use hand::{DealerHand, Hand, HandStatus};
pub use leaderboard::{DEFAULT_LEADERBOARD_PATH, LEADERBOARD_ENV, Leaderboard};
pub use options::{GameOptions, RoundingMode};
pub use result::{RoundOutcome, RoundResult};

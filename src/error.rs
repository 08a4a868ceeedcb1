//! Error types for game operations.

use thiserror::Error;

/// Errors that can occur when placing a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
    /// Bet exceeds the current balance.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// The deck cannot cover the opening deal.
    ///
    /// Only reachable with an explicitly stacked deck; a full deck always
    /// covers the deal.
    #[error("not enough cards to deal")]
    NotEnoughCards,
}

/// Errors that can occur during player and dealer actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid round state for this action.
    #[error("invalid round state for this action")]
    InvalidState,
    /// No cards left in the deck.
    ///
    /// A round draws far fewer than 52 cards, so this indicates a broken
    /// invariant rather than a recoverable condition.
    #[error("no cards left in the deck")]
    NoCards,
}

/// Errors that can occur when buying advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AdviceError {
    /// Invalid round state for advice.
    #[error("advice is only available during the player turn")]
    InvalidState,
    /// Balance is too low to pay the advisor fee.
    #[error("insufficient funds for the advisor fee")]
    InsufficientFunds,
}

/// Errors that can occur when resolving a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The round is not over yet.
    #[error("round is not over yet")]
    InvalidState,
}

/// Errors that can occur when persisting the leaderboard.
///
/// Read failures are never surfaced; a missing or malformed record reads as
/// "no prior record". Only write failures propagate, and front-ends report
/// them as a warning without aborting.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// Writing the record file failed.
    #[error("failed to write leaderboard file")]
    Write(#[source] std::io::Error),
    /// Formatting the achievement timestamp failed.
    #[error("failed to format leaderboard timestamp")]
    Timestamp(#[from] time::error::Format),
}

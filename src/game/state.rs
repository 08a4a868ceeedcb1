//! Round state types.

/// State of a round in progress.
///
/// Betting and dealing happen when the round is constructed, so a live round
/// starts in `PlayerTurn` (or directly in `RoundOver` on a natural 21).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Waiting for a player action (hit, stand, or advice).
    PlayerTurn,
    /// The player has finished below 22; the dealer plays out their hand.
    DealerTurn,
    /// The round has ended and can be resolved.
    RoundOver,
    /// The round has been resolved and paid out.
    Done,
}

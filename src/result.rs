//! Round result types.

/// Outcome of a resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Natural 21 on the first two cards; pays the blackjack ratio.
    Blackjack,
    /// Player wins (dealer busts or player has the higher value).
    Win,
    /// Player loses (player busts or dealer has the higher value).
    Lose,
    /// Push (tie); the bet is returned.
    Push,
}

/// Result of a single resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    /// The outcome of the round.
    pub outcome: RoundOutcome,
    /// The escrowed bet amount.
    pub bet: usize,
    /// The amount returned to the balance (escrow plus winnings, if any).
    pub payout: usize,
    /// Net result relative to the pre-bet balance (positive = profit).
    pub net: isize,
    /// The player's final hand value.
    pub player_value: u8,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
}

//! Basic-strategy advisory heuristic.

/// A suggested player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    /// Draw another card.
    Hit,
    /// Keep the current hand.
    Stand,
}

impl Advice {
    /// Returns the label shown to the player.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Stand => "STAND",
        }
    }
}

/// Suggests hit or stand for the given table state.
///
/// `dealer_upcard_value` is the base value of the dealer's visible card
/// (2..=11, Ace = 11). `has_ace` is the soft-hand flag: whether the player's
/// hand contains at least one Ace.
///
/// Soft hands hit up to 17. Hard hands hit up to 11 unconditionally, and on
/// 12 through 16 only against a strong dealer upcard (7 through Ace);
/// everything else stands.
///
/// # Example
///
/// ```
/// use twentyone::{Advice, advise};
///
/// assert_eq!(advise(16, 7, false), Advice::Hit);
/// assert_eq!(advise(16, 6, false), Advice::Stand);
/// assert_eq!(advise(17, 10, true), Advice::Hit);
/// ```
#[must_use]
pub const fn advise(player_score: u8, dealer_upcard_value: u8, has_ace: bool) -> Advice {
    if has_ace {
        if player_score <= 17 {
            Advice::Hit
        } else {
            Advice::Stand
        }
    } else if player_score <= 11 {
        Advice::Hit
    } else if player_score <= 16 && matches!(dealer_upcard_value, 7..=11) {
        Advice::Hit
    } else {
        Advice::Stand
    }
}

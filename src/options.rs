//! Game configuration options.

/// Rounding mode for fractional payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

/// Configuration options for a blackjack session.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use twentyone::GameOptions;
///
/// let options = GameOptions::default()
///     .with_starting_balance(250)
///     .with_blackjack_pays(1.5)
///     .with_auto_bet_percent(10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameOptions {
    /// Starting balance in whole currency units.
    pub starting_balance: usize,
    /// Blackjack payout ratio (typically 1.5).
    pub blackjack_pays: f64,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
    /// Advisor fee as a percentage of the current balance.
    pub advice_fee_percent: usize,
    /// Auto-bet percentage of the current balance.
    ///
    /// When greater than zero, front-ends compute every bet as
    /// `balance * auto_bet_percent / 100` instead of prompting.
    pub auto_bet_percent: usize,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            starting_balance: 100,
            blackjack_pays: 1.5,
            rounding_blackjack: RoundingMode::Down,
            advice_fee_percent: 10,
            auto_bet_percent: 0,
        }
    }
}

impl GameOptions {
    /// Sets the starting balance.
    ///
    /// # Example
    ///
    /// ```
    /// use twentyone::GameOptions;
    ///
    /// let options = GameOptions::default().with_starting_balance(500);
    /// assert_eq!(options.starting_balance, 500);
    /// ```
    #[must_use]
    pub const fn with_starting_balance(mut self, balance: usize) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Sets the blackjack payout ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use twentyone::GameOptions;
    ///
    /// let options = GameOptions::default().with_blackjack_pays(1.2);
    /// assert_eq!(options.blackjack_pays, 1.2);
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    ///
    /// # Example
    ///
    /// ```
    /// use twentyone::{GameOptions, RoundingMode};
    ///
    /// let options = GameOptions::default().with_rounding_blackjack(RoundingMode::Up);
    /// assert_eq!(options.rounding_blackjack, RoundingMode::Up);
    /// ```
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the advisor fee percentage.
    ///
    /// # Example
    ///
    /// ```
    /// use twentyone::GameOptions;
    ///
    /// let options = GameOptions::default().with_advice_fee_percent(5);
    /// assert_eq!(options.advice_fee_percent, 5);
    /// ```
    #[must_use]
    pub const fn with_advice_fee_percent(mut self, percent: usize) -> Self {
        self.advice_fee_percent = percent;
        self
    }

    /// Sets the auto-bet percentage (0 disables auto-betting).
    ///
    /// # Example
    ///
    /// ```
    /// use twentyone::GameOptions;
    ///
    /// let options = GameOptions::default().with_auto_bet_percent(25);
    /// assert_eq!(options.auto_bet_percent, 25);
    /// ```
    #[must_use]
    pub const fn with_auto_bet_percent(mut self, percent: usize) -> Self {
        self.auto_bet_percent = percent;
        self
    }
}

//! Session engine: balance, rounds, advice, and payout resolution.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::advisor::{Advice, advise};
use crate::deck::Deck;
use crate::error::{AdviceError, BetError, ResolveError};
use crate::hand::HandStatus;
use crate::options::{GameOptions, RoundingMode};
use crate::result::{RoundOutcome, RoundResult};

mod round;
pub mod state;

pub use round::{DEALER_STAND_VALUE, Round};
pub use state::RoundState;

/// Minimum balance required to buy advice.
pub const MIN_ADVICE_BALANCE: usize = 10;

fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => amount.ceil() as usize,
        RoundingMode::Down => amount.floor() as usize,
        RoundingMode::Nearest => amount.round() as usize,
    }
}

/// Advice bought from the advisor, with the fee that was charged for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchasedAdvice {
    /// The suggested action.
    pub advice: Advice,
    /// The fee deducted from the balance.
    pub fee: usize,
}

/// A blackjack session: one player's balance across consecutive rounds.
///
/// The session escrows bets, sells advice, resolves finished rounds, and
/// tracks the peak balance. Rounds repeat while the balance stays positive;
/// the front-end persists the peak through
/// [`Leaderboard`](crate::leaderboard::Leaderboard) when the session ends.
///
/// # Example
///
/// ```no_run
/// use twentyone::{GameOptions, Session};
///
/// let mut session = Session::new(GameOptions::default(), 42);
/// let round = session.begin_round(10).unwrap();
/// let _ = round;
/// ```
#[derive(Debug)]
pub struct Session {
    /// Game options.
    options: GameOptions,
    /// Current balance.
    balance: usize,
    /// Peak balance ever reached this session.
    top_score: usize,
    /// Random number generator for deck shuffles.
    rng: ChaCha8Rng,
}

impl Session {
    /// Creates a new session from the given options and shuffle seed.
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        let balance = options.starting_balance;
        Self {
            options,
            balance,
            top_score: balance,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Returns the current balance.
    #[must_use]
    pub const fn balance(&self) -> usize {
        self.balance
    }

    /// Returns the peak balance reached this session.
    #[must_use]
    pub const fn top_score(&self) -> usize {
        self.top_score
    }

    /// Returns the session options.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns whether the session is over (balance exhausted).
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.balance == 0
    }

    /// Returns the automatic bet for the current balance, if auto-betting is
    /// configured (`auto_bet_percent > 0`).
    ///
    /// Never less than 1, so a small balance still produces a placeable bet.
    #[must_use]
    pub const fn auto_bet(&self) -> Option<usize> {
        if self.options.auto_bet_percent > 0 {
            let bet = self.balance * self.options.auto_bet_percent / 100;
            Some(if bet == 0 { 1 } else { bet })
        } else {
            None
        }
    }

    /// Reconfigures the auto-bet percentage mid-session.
    ///
    /// Used by the windowed front-end's settings view; takes effect from the
    /// next round.
    pub const fn set_auto_bet_percent(&mut self, percent: usize) {
        self.options.auto_bet_percent = percent;
    }

    /// Starts a round: escrows the bet and deals from a fresh shuffled deck.
    ///
    /// The bet is deducted from the balance immediately and held for the
    /// round. On a natural 21 the returned round is already over and only
    /// needs [`resolve`](Self::resolve).
    ///
    /// # Errors
    ///
    /// Returns an error if the bet is zero or exceeds the balance.
    pub fn begin_round(&mut self, bet: usize) -> Result<Round, BetError> {
        // Validate before shuffling so a rejected bet leaves the RNG alone.
        self.check_bet(bet)?;
        let deck = Deck::shuffled(&mut self.rng);
        self.begin_round_with(bet, deck)
    }

    /// Starts a round using the given deck instead of shuffling one.
    ///
    /// Intended for deterministic setups with [`Deck::stacked`].
    ///
    /// # Errors
    ///
    /// Returns an error if the bet is zero, exceeds the balance, or the deck
    /// cannot cover the opening deal.
    pub fn begin_round_with(&mut self, bet: usize, deck: Deck) -> Result<Round, BetError> {
        self.check_bet(bet)?;
        if deck.len() < 4 {
            return Err(BetError::NotEnoughCards);
        }

        self.balance -= bet;
        log::debug!("round started: bet {bet}, balance {}", self.balance);

        Ok(Round::deal(deck, bet))
    }

    const fn check_bet(&self, bet: usize) -> Result<(), BetError> {
        if bet == 0 {
            return Err(BetError::ZeroBet);
        }
        if bet > self.balance {
            return Err(BetError::InsufficientFunds);
        }
        Ok(())
    }

    /// Buys a suggestion from the basic-strategy advisor.
    ///
    /// Charges `advice_fee_percent` of the current balance (rounded down,
    /// never more than the balance itself) and consults [`advise`] with the
    /// player's score, the dealer's visible card
    /// value, and the soft-hand flag. Buying advice does not consume the turn.
    ///
    /// # Errors
    ///
    /// Returns an error outside the player turn, or when the balance is below
    /// [`MIN_ADVICE_BALANCE`].
    pub fn buy_advice(&mut self, round: &Round) -> Result<PurchasedAdvice, AdviceError> {
        if round.state() != RoundState::PlayerTurn {
            return Err(AdviceError::InvalidState);
        }
        if self.balance < MIN_ADVICE_BALANCE {
            return Err(AdviceError::InsufficientFunds);
        }

        // A fee percentage above 100 must not underflow the balance.
        let fee = (self.balance * self.options.advice_fee_percent / 100).min(self.balance);
        self.balance -= fee;

        let advice = advise(
            round.player().value(),
            round.dealer().visible_value(),
            round.player().has_ace(),
        );
        log::debug!("advice bought for {fee}: {}", advice.label());

        Ok(PurchasedAdvice { advice, fee })
    }

    /// Resolves a finished round, paying out against the escrowed bet.
    ///
    /// A natural 21 returns the bet plus `blackjack_pays` times the bet
    /// (rounded per the options); a win returns twice the bet; a push returns
    /// the bet; a loss returns nothing. Afterwards the peak balance is
    /// updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not over (for example while the
    /// dealer still has to play) or was already resolved.
    pub fn resolve(&mut self, round: &mut Round) -> Result<RoundResult, ResolveError> {
        if round.state() != RoundState::RoundOver {
            return Err(ResolveError::InvalidState);
        }

        let bet = round.bet();
        let player_value = round.player().value();
        let dealer_value = round.dealer().value();
        let dealer_bust = round.dealer().is_bust();

        let (outcome, payout) = match round.player().status() {
            HandStatus::Blackjack => {
                #[expect(
                    clippy::cast_precision_loss,
                    reason = "f64 has sufficient precision for monetary values"
                )]
                let winnings = (bet as f64) * self.options.blackjack_pays;
                let rounded = round_amount(winnings, self.options.rounding_blackjack);
                (RoundOutcome::Blackjack, bet + rounded)
            }
            HandStatus::Bust => (RoundOutcome::Lose, 0),
            HandStatus::Stand | HandStatus::Active => {
                if dealer_bust || player_value > dealer_value {
                    (RoundOutcome::Win, bet * 2)
                } else if player_value == dealer_value {
                    (RoundOutcome::Push, bet)
                } else {
                    (RoundOutcome::Lose, 0)
                }
            }
        };

        round.mark_done();
        self.balance += payout;
        self.top_score = self.top_score.max(self.balance);

        #[expect(clippy::cast_possible_wrap, reason = "payout values fit in isize")]
        let net = payout as isize - bet as isize;
        log::debug!("round resolved: {outcome:?}, net {net}, balance {}", self.balance);

        Ok(RoundResult {
            outcome,
            bet,
            payout,
            net,
            player_value,
            dealer_value,
            dealer_bust,
        })
    }
}

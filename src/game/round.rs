//! A single round: dealing, the player turn loop, and dealer play.

use crate::card::Card;
use crate::deck::Deck;
use crate::error::ActionError;
use crate::hand::{DealerHand, Hand, HandStatus};

use super::RoundState;

/// The dealer draws until reaching this value, then stands (soft 17 included).
pub const DEALER_STAND_VALUE: u8 = 17;

/// One round of blackjack.
///
/// A round owns its freshly shuffled deck and both hands; money stays with
/// the [`Session`](super::Session), which escrows the bet when the round is
/// created and pays out when it resolves.
#[derive(Debug)]
pub struct Round {
    /// The deck for this round, discarded when the round ends.
    deck: Deck,
    /// The player's hand.
    player: Hand,
    /// The dealer's hand, hole card hidden until the player turn ends.
    dealer: DealerHand,
    /// The escrowed bet.
    bet: usize,
    /// Current state.
    state: RoundState,
}

impl Round {
    /// Deals two cards each to player and dealer, alternating.
    ///
    /// The deck length is validated before the bet is escrowed, so the four
    /// opening draws cannot fail here.
    pub(super) fn deal(mut deck: Deck, bet: usize) -> Self {
        let mut player = Hand::new();
        let mut dealer = DealerHand::new();

        for _ in 0..2 {
            player.add_card(deck.draw().expect("deck length checked before dealing"));
            dealer.add_card(deck.draw().expect("deck length checked before dealing"));
        }

        // A natural 21 ends the round on the spot; the dealer never plays.
        let state = if player.status() == HandStatus::Blackjack {
            dealer.reveal_hole();
            RoundState::RoundOver
        } else {
            RoundState::PlayerTurn
        };

        Self {
            deck,
            player,
            dealer,
            bet,
            state,
        }
    }

    /// Player action: Hit (draw a card).
    ///
    /// A bust ends the round immediately and the dealer turn is skipped.
    /// Reaching exactly 21 stands automatically and hands play to the dealer.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn or the deck is empty.
    pub fn hit(&mut self) -> Result<Card, ActionError> {
        if self.state != RoundState::PlayerTurn {
            return Err(ActionError::InvalidState);
        }

        let card = self.deck.draw().ok_or(ActionError::NoCards)?;
        self.player.add_card(card);

        if self.player.status() == HandStatus::Bust {
            self.dealer.reveal_hole();
            self.state = RoundState::RoundOver;
        } else if self.player.value() == 21 {
            self.player.set_status(HandStatus::Stand);
            self.state = RoundState::DealerTurn;
        }

        Ok(card)
    }

    /// Player action: Stand (keep the current hand).
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn.
    pub fn stand(&mut self) -> Result<(), ActionError> {
        if self.state != RoundState::PlayerTurn {
            return Err(ActionError::InvalidState);
        }

        self.player.set_status(HandStatus::Stand);
        self.state = RoundState::DealerTurn;
        Ok(())
    }

    /// Dealer plays out their hand.
    ///
    /// Reveals the hole card and draws until the hand reaches
    /// [`DEALER_STAND_VALUE`] or busts. Returns the cards drawn.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the dealer turn or the deck
    /// runs out while the dealer must draw.
    pub fn dealer_play(&mut self) -> Result<Vec<Card>, ActionError> {
        if self.state != RoundState::DealerTurn {
            return Err(ActionError::InvalidState);
        }

        self.dealer.reveal_hole();

        let mut drawn = Vec::new();
        while self.dealer.value() < DEALER_STAND_VALUE {
            let card = self.deck.draw().ok_or(ActionError::NoCards)?;
            self.dealer.add_card(card);
            drawn.push(card);
        }

        self.state = RoundState::RoundOver;
        Ok(drawn)
    }

    /// Marks the round as resolved so it cannot pay out twice.
    pub(super) const fn mark_done(&mut self) {
        self.state = RoundState::Done;
    }

    /// Returns the player's hand.
    #[must_use]
    pub const fn player(&self) -> &Hand {
        &self.player
    }

    /// Returns the dealer's hand.
    #[must_use]
    pub const fn dealer(&self) -> &DealerHand {
        &self.dealer
    }

    /// Returns the escrowed bet.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Returns the current round state.
    #[must_use]
    pub const fn state(&self) -> RoundState {
        self.state
    }

    /// Returns the number of cards remaining in this round's deck.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }
}

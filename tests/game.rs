//! Game integration tests.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use twentyone::{
    ActionError, Advice, AdviceError, BetError, Card, DECK_SIZE, Deck, GameOptions, Hand,
    HandStatus, ResolveError, RoundOutcome, RoundState, RoundingMode, Session, Suit, advise,
};

const fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

fn hand_of(ranks: &[u8]) -> Hand {
    let mut hand = Hand::new();
    for &rank in ranks {
        hand.add_card(card(Suit::Hearts, rank));
    }
    hand
}

fn session_with_balance(balance: usize) -> Session {
    Session::new(GameOptions::default().with_starting_balance(balance), 1)
}

#[test]
fn shuffled_deck_is_complete() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let deck = Deck::shuffled(&mut rng);

    assert_eq!(deck.len(), DECK_SIZE);

    let unique: HashSet<(u8, Suit)> = deck.cards().iter().map(|c| (c.rank, c.suit)).collect();
    assert_eq!(unique.len(), DECK_SIZE);

    let ranks: HashSet<u8> = deck.cards().iter().map(|c| c.rank).collect();
    let suits: HashSet<Suit> = deck.cards().iter().map(|c| c.suit).collect();
    assert_eq!(ranks.len(), 13);
    assert_eq!(suits.len(), 4);
}

#[test]
fn scoring_downgrades_aces() {
    // rank 1 = Ace, 13 = King
    assert_eq!(hand_of(&[1, 13]).value(), 21);
    assert_eq!(hand_of(&[1, 1]).value(), 12);
    assert_eq!(hand_of(&[1, 1, 9]).value(), 21);
    assert_eq!(hand_of(&[10, 9, 5]).value(), 24);
    assert_eq!(hand_of(&[1, 9, 1]).value(), 21);
}

#[test]
fn hand_status_tracks_naturals_and_busts() {
    let natural = hand_of(&[1, 13]);
    assert_eq!(natural.status(), HandStatus::Blackjack);

    // 21 on three cards is not a natural
    let slow_21 = hand_of(&[5, 6, 10]);
    assert_eq!(slow_21.value(), 21);
    assert_eq!(slow_21.status(), HandStatus::Active);

    let bust = hand_of(&[10, 9, 5]);
    assert_eq!(bust.status(), HandStatus::Bust);
}

#[test]
fn ace_detection_ignores_downgrades() {
    let soft = hand_of(&[1, 3]);
    assert!(soft.has_ace());
    assert!(soft.is_soft());

    // The ace is forced down to 1 here, but the advisory flag stays on.
    let downgraded = hand_of(&[1, 10, 5]);
    assert_eq!(downgraded.value(), 16);
    assert!(downgraded.has_ace());
    assert!(!downgraded.is_soft());

    assert!(!hand_of(&[10, 7]).has_ace());
}

#[test]
fn advisor_boundaries() {
    // hard hands
    assert_eq!(advise(11, 2, false), Advice::Hit);
    assert_eq!(advise(16, 7, false), Advice::Hit);
    assert_eq!(advise(16, 11, false), Advice::Hit);
    assert_eq!(advise(12, 6, false), Advice::Stand);
    assert_eq!(advise(12, 7, false), Advice::Hit);
    assert_eq!(advise(17, 7, false), Advice::Stand);

    // soft hands hit up to 17
    assert_eq!(advise(17, 10, true), Advice::Hit);
    assert_eq!(advise(17, 2, true), Advice::Hit);
    assert_eq!(advise(18, 7, true), Advice::Stand);
}

#[test]
fn advisor_is_deterministic() {
    for _ in 0..3 {
        assert_eq!(advise(14, 9, false), Advice::Hit);
        assert_eq!(advise(14, 4, false), Advice::Stand);
    }
}

#[test]
fn bet_is_escrowed_on_round_start() {
    let mut session = session_with_balance(100);
    let round = session.begin_round(30).unwrap();

    assert_eq!(session.balance(), 70);
    assert_eq!(round.bet(), 30);
}

#[test]
fn bet_errors_leave_balance_untouched() {
    let mut session = session_with_balance(100);

    assert_eq!(session.begin_round(0).unwrap_err(), BetError::ZeroBet);
    assert_eq!(
        session.begin_round(101).unwrap_err(),
        BetError::InsufficientFunds
    );
    assert_eq!(session.balance(), 100);

    let short_deck = Deck::stacked(&[card(Suit::Hearts, 2)]);
    assert_eq!(
        session.begin_round_with(10, short_deck).unwrap_err(),
        BetError::NotEnoughCards
    );
    assert_eq!(session.balance(), 100);
}

#[test]
fn rejected_bet_does_not_advance_the_shuffle() {
    let mut rejected = session_with_balance(100);
    let mut clean = session_with_balance(100);

    assert_eq!(rejected.begin_round(0).unwrap_err(), BetError::ZeroBet);
    assert_eq!(
        rejected.begin_round(500).unwrap_err(),
        BetError::InsufficientFunds
    );

    // Same seed, so both sessions must deal the same first round.
    let a = rejected.begin_round(10).unwrap();
    let b = clean.begin_round(10).unwrap();
    assert_eq!(a.player().cards(), b.player().cards());
    assert_eq!(a.dealer().cards(), b.dealer().cards());
}

#[test]
fn natural_blackjack_skips_dealer_and_pays_three_to_two() {
    let mut session = session_with_balance(100);

    // Deal order alternates player, dealer, player, dealer.
    let deck = Deck::stacked(&[
        card(Suit::Hearts, 1),   // player
        card(Suit::Clubs, 9),    // dealer up
        card(Suit::Spades, 13),  // player
        card(Suit::Diamonds, 7), // dealer hole
    ]);

    let mut round = session.begin_round_with(10, deck).unwrap();
    assert_eq!(round.state(), RoundState::RoundOver);
    assert_eq!(round.player().status(), HandStatus::Blackjack);

    let result = session.resolve(&mut round).unwrap();
    assert_eq!(result.outcome, RoundOutcome::Blackjack);
    assert_eq!(result.payout, 25);
    assert_eq!(result.net, 15);
    assert_eq!(session.balance(), 115);
    assert_eq!(session.top_score(), 115);
}

#[test]
fn blackjack_payout_rounds_per_options() {
    let play = |options: GameOptions| {
        let mut session = Session::new(options.with_starting_balance(100), 1);
        let deck = Deck::stacked(&[
            card(Suit::Hearts, 1),
            card(Suit::Clubs, 9),
            card(Suit::Spades, 13),
            card(Suit::Diamonds, 7),
        ]);
        let mut round = session.begin_round_with(5, deck).unwrap();
        session.resolve(&mut round).unwrap().net
    };

    // floor(5 * 1.5) = 7 by default, 8 rounding up
    assert_eq!(play(GameOptions::default()), 7);
    assert_eq!(
        play(GameOptions::default().with_rounding_blackjack(RoundingMode::Up)),
        8
    );
}

#[test]
fn standing_win_nets_the_bet() {
    let mut session = session_with_balance(100);

    let deck = Deck::stacked(&[
        card(Suit::Hearts, 10),  // player
        card(Suit::Clubs, 10),   // dealer up
        card(Suit::Spades, 9),   // player: 19
        card(Suit::Diamonds, 8), // dealer hole: 18, stands
    ]);

    let mut round = session.begin_round_with(10, deck).unwrap();
    round.stand().unwrap();
    assert_eq!(round.state(), RoundState::DealerTurn);

    let drawn = round.dealer_play().unwrap();
    assert!(drawn.is_empty());

    let result = session.resolve(&mut round).unwrap();
    assert_eq!(result.outcome, RoundOutcome::Win);
    assert_eq!(result.net, 10);
    assert_eq!(session.balance(), 110);
}

#[test]
fn push_returns_the_bet() {
    let mut session = session_with_balance(100);

    let deck = Deck::stacked(&[
        card(Suit::Hearts, 10),
        card(Suit::Clubs, 10),
        card(Suit::Spades, 8), // player: 18
        card(Suit::Diamonds, 8), // dealer: 18
    ]);

    let mut round = session.begin_round_with(10, deck).unwrap();
    round.stand().unwrap();
    round.dealer_play().unwrap();

    let result = session.resolve(&mut round).unwrap();
    assert_eq!(result.outcome, RoundOutcome::Push);
    assert_eq!(result.net, 0);
    assert_eq!(session.balance(), 100);
}

#[test]
fn dealer_win_forfeits_the_escrow() {
    let mut session = session_with_balance(100);

    let deck = Deck::stacked(&[
        card(Suit::Hearts, 8),    // player
        card(Suit::Clubs, 6),     // dealer up
        card(Suit::Diamonds, 7),  // player: 15
        card(Suit::Spades, 10),   // dealer hole: 16
        card(Suit::Hearts, 4),    // player hit: 19
        card(Suit::Clubs, 5),     // dealer draw: 21
    ]);

    let mut round = session.begin_round_with(10, deck).unwrap();
    let hit_card = round.hit().unwrap();
    assert_eq!(hit_card.rank, 4);

    round.stand().unwrap();
    let drawn = round.dealer_play().unwrap();
    assert_eq!(drawn.len(), 1);

    let result = session.resolve(&mut round).unwrap();
    assert_eq!(result.outcome, RoundOutcome::Lose);
    assert_eq!(result.dealer_value, 21);
    assert_eq!(result.net, -10);
    assert_eq!(session.balance(), 90);
}

#[test]
fn player_bust_short_circuits_the_dealer() {
    let mut session = session_with_balance(100);

    let deck = Deck::stacked(&[
        card(Suit::Hearts, 10),
        card(Suit::Clubs, 5),
        card(Suit::Spades, 6),   // player: 16
        card(Suit::Diamonds, 9), // dealer hole: 14, would have to draw
        card(Suit::Hearts, 13),  // player hit: bust
    ]);

    let mut round = session.begin_round_with(10, deck).unwrap();
    round.hit().unwrap();

    // Bust ends the round on the spot; the dealer never plays.
    assert_eq!(round.state(), RoundState::RoundOver);
    assert_eq!(round.player().status(), HandStatus::Bust);
    assert_eq!(round.dealer_play().unwrap_err(), ActionError::InvalidState);
    assert_eq!(round.dealer().len(), 2);

    let result = session.resolve(&mut round).unwrap();
    assert_eq!(result.outcome, RoundOutcome::Lose);
    assert_eq!(session.balance(), 90);
}

#[test]
fn hitting_to_exactly_21_stands_automatically() {
    let mut session = session_with_balance(100);

    let deck = Deck::stacked(&[
        card(Suit::Hearts, 1),   // player
        card(Suit::Clubs, 10),   // dealer up
        card(Suit::Spades, 5),   // player: soft 16
        card(Suit::Diamonds, 8), // dealer hole: 18
        card(Suit::Hearts, 5),   // player hit: 21
    ]);

    let mut round = session.begin_round_with(10, deck).unwrap();
    round.hit().unwrap();

    assert_eq!(round.player().value(), 21);
    assert_eq!(round.state(), RoundState::DealerTurn);
    assert_eq!(round.hit().unwrap_err(), ActionError::InvalidState);
}

#[test]
fn dealer_draws_to_seventeen() {
    let mut session = session_with_balance(100);

    let deck = Deck::stacked(&[
        card(Suit::Hearts, 10),
        card(Suit::Clubs, 2),
        card(Suit::Spades, 9),   // player: 19
        card(Suit::Diamonds, 3), // dealer hole: 5
        card(Suit::Hearts, 10),  // dealer draw: 15
        card(Suit::Clubs, 4),    // dealer draw: 19, stands
    ]);

    let mut round = session.begin_round_with(10, deck).unwrap();
    round.stand().unwrap();

    let drawn = round.dealer_play().unwrap();
    assert_eq!(drawn.len(), 2);
    assert!(round.dealer().value() >= 17);
    assert_eq!(round.dealer().value(), 19);
}

#[test]
fn dealer_bust_wins_for_the_player() {
    let mut session = session_with_balance(100);

    let deck = Deck::stacked(&[
        card(Suit::Hearts, 10),
        card(Suit::Clubs, 10),
        card(Suit::Spades, 8),   // player: 18
        card(Suit::Diamonds, 6), // dealer hole: 16
        card(Suit::Hearts, 10),  // dealer draw: 26, bust
    ]);

    let mut round = session.begin_round_with(10, deck).unwrap();
    round.stand().unwrap();
    round.dealer_play().unwrap();
    assert!(round.dealer().is_bust());

    let result = session.resolve(&mut round).unwrap();
    assert_eq!(result.outcome, RoundOutcome::Win);
    assert!(result.dealer_bust);
    assert_eq!(session.balance(), 110);
}

#[test]
fn advice_charges_a_tenth_of_the_balance() {
    let mut session = session_with_balance(100);

    let deck = Deck::stacked(&[
        card(Suit::Hearts, 8),
        card(Suit::Clubs, 7),    // dealer up: strong
        card(Suit::Diamonds, 7), // player: hard 15
        card(Suit::Spades, 10),
    ]);

    let round = session.begin_round_with(10, deck).unwrap();
    assert_eq!(session.balance(), 90);

    let purchased = session.buy_advice(&round).unwrap();
    assert_eq!(purchased.fee, 9);
    assert_eq!(purchased.advice, Advice::Hit);
    assert_eq!(session.balance(), 81);

    // Advice consumes neither the turn nor a card.
    assert_eq!(round.state(), RoundState::PlayerTurn);
    assert_eq!(round.player().len(), 2);
}

#[test]
fn advice_fee_is_capped_at_the_balance() {
    let mut session = Session::new(
        GameOptions::default()
            .with_starting_balance(100)
            .with_advice_fee_percent(300),
        1,
    );

    let deck = Deck::stacked(&[
        card(Suit::Hearts, 8),
        card(Suit::Clubs, 7),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 10),
    ]);

    let round = session.begin_round_with(10, deck).unwrap();
    assert_eq!(session.balance(), 90);

    // A percentage above 100 takes the whole balance, never more.
    let purchased = session.buy_advice(&round).unwrap();
    assert_eq!(purchased.fee, 90);
    assert_eq!(session.balance(), 0);
}

#[test]
fn advice_refused_below_minimum_balance() {
    let mut session = session_with_balance(15);

    let deck = Deck::stacked(&[
        card(Suit::Hearts, 8),
        card(Suit::Clubs, 7),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 10),
    ]);

    let round = session.begin_round_with(10, deck).unwrap();
    assert_eq!(session.balance(), 5);

    assert_eq!(
        session.buy_advice(&round).unwrap_err(),
        AdviceError::InsufficientFunds
    );
    assert_eq!(session.balance(), 5);
}

#[test]
fn advice_rejected_outside_player_turn() {
    let mut session = session_with_balance(100);

    let deck = Deck::stacked(&[
        card(Suit::Hearts, 10),
        card(Suit::Clubs, 10),
        card(Suit::Spades, 9),
        card(Suit::Diamonds, 8),
    ]);

    let mut round = session.begin_round_with(10, deck).unwrap();
    round.stand().unwrap();

    assert_eq!(
        session.buy_advice(&round).unwrap_err(),
        AdviceError::InvalidState
    );
}

#[test]
fn resolve_rejects_unfinished_and_repeated_rounds() {
    let mut session = session_with_balance(100);

    let deck = Deck::stacked(&[
        card(Suit::Hearts, 10),
        card(Suit::Clubs, 10),
        card(Suit::Spades, 9),
        card(Suit::Diamonds, 8),
    ]);

    let mut round = session.begin_round_with(10, deck).unwrap();
    assert_eq!(
        session.resolve(&mut round).unwrap_err(),
        ResolveError::InvalidState
    );

    round.stand().unwrap();
    round.dealer_play().unwrap();
    session.resolve(&mut round).unwrap();
    assert_eq!(round.state(), RoundState::Done);
    assert_eq!(session.balance(), 110);

    // A resolved round never pays out twice.
    assert_eq!(
        session.resolve(&mut round).unwrap_err(),
        ResolveError::InvalidState
    );
    assert_eq!(session.balance(), 110);
}

#[test]
fn hit_with_exhausted_deck_is_an_error() {
    let mut session = session_with_balance(100);

    let deck = Deck::stacked(&[
        card(Suit::Hearts, 5),
        card(Suit::Clubs, 9),
        card(Suit::Spades, 6),
        card(Suit::Diamonds, 7),
    ]);

    let mut round = session.begin_round_with(10, deck).unwrap();
    assert_eq!(round.cards_remaining(), 0);
    assert_eq!(round.hit().unwrap_err(), ActionError::NoCards);
}

#[test]
fn session_ends_when_the_balance_is_gone() {
    let mut session = session_with_balance(100);
    assert!(!session.is_over());

    let deck = Deck::stacked(&[
        card(Suit::Hearts, 10),
        card(Suit::Clubs, 5),
        card(Suit::Spades, 6),
        card(Suit::Diamonds, 10),
        card(Suit::Hearts, 13), // player hit: bust
    ]);

    // All-in on a losing round.
    let mut round = session.begin_round_with(100, deck).unwrap();
    round.hit().unwrap();
    session.resolve(&mut round).unwrap();

    assert_eq!(session.balance(), 0);
    assert!(session.is_over());
    assert_eq!(session.top_score(), 100);
}

#[test]
fn auto_bet_follows_the_configured_percentage() {
    let mut session = Session::new(
        GameOptions::default()
            .with_starting_balance(100)
            .with_auto_bet_percent(25),
        1,
    );
    assert_eq!(session.auto_bet(), Some(25));

    session.set_auto_bet_percent(0);
    assert_eq!(session.auto_bet(), None);

    session.set_auto_bet_percent(50);
    assert_eq!(session.auto_bet(), Some(50));

    // A small balance still yields a placeable bet.
    let small = Session::new(
        GameOptions::default()
            .with_starting_balance(3)
            .with_auto_bet_percent(25),
        1,
    );
    assert_eq!(small.auto_bet(), Some(1));
}

#[test]
fn options_builder_sets_fields() {
    let options = GameOptions::default()
        .with_starting_balance(250)
        .with_blackjack_pays(1.2)
        .with_rounding_blackjack(RoundingMode::Nearest)
        .with_advice_fee_percent(5)
        .with_auto_bet_percent(20);

    assert_eq!(options.starting_balance, 250);
    assert!((options.blackjack_pays - 1.2).abs() < f64::EPSILON);
    assert_eq!(options.rounding_blackjack, RoundingMode::Nearest);
    assert_eq!(options.advice_fee_percent, 5);
    assert_eq!(options.auto_bet_percent, 20);
}

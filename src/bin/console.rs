//! Line-oriented console blackjack front-end.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use time::OffsetDateTime;

use twentyone::{
    AdviceError, BetError, Card, DealerHand, GameOptions, HandStatus, Leaderboard, Round,
    RoundOutcome, RoundResult, RoundState, Session,
};

fn main() {
    env_logger::init();
    println!("Welcome to Blackjack! (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut session = Session::new(GameOptions::default(), seed);
    let leaderboard = Leaderboard::from_env();

    while !session.is_over() {
        println!("\nCurrent balance: ${}", session.balance());

        let Some(mut round) = open_round(&mut session) else {
            println!("Goodbye.");
            break;
        };

        if round.player().status() == HandStatus::Blackjack {
            show_table(&round);
            println!("Blackjack! You got a natural 21!");
        } else {
            show_table(&round);
            if !player_turn(&mut session, &mut round) {
                println!("Goodbye.");
                break;
            }
        }

        if round.state() == RoundState::DealerTurn {
            match round.dealer_play() {
                Ok(drawn) if !drawn.is_empty() => {
                    println!("\nDealer draws {} card(s).", drawn.len());
                }
                Ok(_) => {}
                Err(err) => {
                    eprintln!("Dealer error: {err}");
                    break;
                }
            }
        }

        show_final(&round);
        match session.resolve(&mut round) {
            Ok(result) => announce(&result, session.balance()),
            Err(err) => eprintln!("Resolution error: {err}"),
        }
    }

    if session.is_over() {
        println!("\nGame over! You're out of money.");
    }
    persist(&leaderboard, session.top_score());
}

/// Prompts for a bet until one is accepted. `None` means the player quit.
fn open_round(session: &mut Session) -> Option<Round> {
    loop {
        let input = prompt_line(&format!(
            "Enter your bet amount (1-{}): $",
            session.balance()
        ));
        if input == "q" || input == "quit" {
            return None;
        }

        let Ok(bet) = input.parse::<usize>() else {
            println!("Invalid input. Please enter a number.");
            continue;
        };

        match session.begin_round(bet) {
            Ok(round) => return Some(round),
            Err(BetError::ZeroBet | BetError::InsufficientFunds) => {
                println!(
                    "Invalid bet. You must bet between $1 and ${}.",
                    session.balance()
                );
            }
            Err(err) => println!("Bet error: {err}"),
        }
    }
}

/// Runs the hit/stand/advisor loop. Returns `false` when the player quits.
fn player_turn(session: &mut Session, round: &mut Round) -> bool {
    while round.state() == RoundState::PlayerTurn {
        let choice = prompt_line(
            "\nDo you want to hit, stand, or ask the advisor for 10% of your balance? (h/s/ai): ",
        );

        match choice.as_str() {
            "h" | "hit" => match round.hit() {
                Ok(_) => {
                    println!("\nYour hand:");
                    print_cards(round.player().cards());
                    println!("Player's score: {}", round.player().value());
                }
                Err(err) => println!("Action error: {err}"),
            },
            "s" | "stand" => {
                if let Err(err) = round.stand() {
                    println!("Action error: {err}");
                }
            }
            "ai" | "advisor" => match session.buy_advice(round) {
                Ok(purchased) => {
                    println!("\nAdvisor suggests you should: {}", purchased.advice.label());
                    println!(
                        "New balance after the advisor fee of ${}: ${}",
                        purchased.fee,
                        session.balance()
                    );
                }
                Err(AdviceError::InsufficientFunds) => {
                    println!("Not enough balance for the advisor.");
                }
                Err(err) => println!("Advice error: {err}"),
            },
            "q" | "quit" => return false,
            _ => println!("Invalid input, please choose 'h', 's', or 'ai'."),
        }
    }
    true
}

fn announce(result: &RoundResult, balance: usize) {
    match result.outcome {
        RoundOutcome::Blackjack => {
            println!(
                "You win ${}. New balance: ${balance}.",
                result.payout - result.bet
            );
        }
        RoundOutcome::Win => {
            if result.dealer_bust {
                println!(
                    "Dealer busts! You gain ${}. New balance: ${balance}.",
                    result.bet
                );
            } else {
                println!("You win! You gain ${}. New balance: ${balance}.", result.bet);
            }
        }
        RoundOutcome::Push => println!("It's a tie! Your bet is returned."),
        RoundOutcome::Lose => {
            if result.player_value > 21 {
                println!(
                    "Player busts! You lose ${}. New balance: ${balance}.",
                    result.bet
                );
            } else {
                println!(
                    "Dealer wins! You lose ${}. New balance: ${balance}.",
                    result.bet
                );
            }
        }
    }
}

fn persist(leaderboard: &Leaderboard, top_score: usize) {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    match leaderboard.save_if_higher(top_score, now) {
        Ok(true) => println!(
            "New top score of ${top_score} recorded in {}.",
            leaderboard.path().display()
        ),
        Ok(false) => println!(
            "Top score remains ${}. No update necessary.",
            leaderboard.load_top_score()
        ),
        Err(err) => eprintln!("Warning: could not save the leaderboard: {err}"),
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn show_table(round: &Round) {
    println!("\nYour hand:");
    print_cards(round.player().cards());
    println!("Player's score: {}\n", round.player().value());
    println!("Dealer's hand:");
    print_dealer(round.dealer());
}

fn show_final(round: &Round) {
    println!("\nFinal hands:");
    println!("Your hand:");
    print_cards(round.player().cards());
    println!("Player's final score: {}\n", round.player().value());
    println!("Dealer's hand:");
    print_cards(round.dealer().cards());
    println!("Dealer's final score: {}", round.dealer().value());
}

fn card_art(card: Card) -> [String; 5] {
    let label = format!("{}{}", card.rank_label(), card.suit.symbol());
    [
        "┌─────┐".to_string(),
        format!("│{label:<5}│"),
        "│     │".to_string(),
        format!("│{label:>5}│"),
        "└─────┘".to_string(),
    ]
}

fn hidden_art() -> [String; 5] {
    [
        "┌─────┐".to_string(),
        "│??   │".to_string(),
        "│     │".to_string(),
        "│   ??│".to_string(),
        "└─────┘".to_string(),
    ]
}

fn print_rows(arts: &[[String; 5]]) {
    for row in 0..5 {
        let line: Vec<&str> = arts.iter().map(|art| art[row].as_str()).collect();
        println!("{}", line.join(" "));
    }
}

fn print_cards(cards: &[Card]) {
    let arts: Vec<[String; 5]> = cards.iter().map(|card| card_art(*card)).collect();
    print_rows(&arts);
}

fn print_dealer(dealer: &DealerHand) {
    if dealer.is_hole_revealed() {
        print_cards(dealer.cards());
        return;
    }

    let mut arts = Vec::new();
    if let Some(up) = dealer.up_card() {
        arts.push(card_art(*up));
    }
    if dealer.len() > 1 {
        arts.push(hidden_art());
    }
    print_rows(&arts);
}

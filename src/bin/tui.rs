//! Full-screen terminal-window blackjack front-end.
//!
//! Key presses map 1:1 to the round controller actions: typing a bet and
//! pressing Enter places it, `h`/`s`/`a` drive the player turn, and the
//! settings view configures the auto-bet percentage. Each key press runs its
//! handler to completion before the next event is processed.

#![allow(clippy::missing_docs_in_private_items)]

use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{Log, Metadata, Record};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use time::OffsetDateTime;

use twentyone::{
    AdviceError, Card, GameOptions, HandStatus, Leaderboard, Round, RoundOutcome, RoundState,
    Session, Suit,
};

/// Captures `log` records into a shared buffer rendered in the log pane.
struct PaneLogger {
    buffer: Arc<Mutex<Vec<String>>>,
}

impl PaneLogger {
    fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                buffer: buffer.clone(),
            },
            buffer,
        )
    }
}

impl Log for PaneLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(format!("{}", record.args()));
            if buffer.len() > 100 {
                buffer.remove(0);
            }
        }
    }

    fn flush(&self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Betting,
    PlayerTurn,
    RoundOver,
    Settings,
    GameOver,
}

struct App {
    session: Session,
    leaderboard: Leaderboard,
    /// The current round; kept after resolution so the final hands stay on
    /// screen until the next bet is placed.
    round: Option<Round>,
    phase: Phase,
    bet_input: String,
    settings_input: String,
    status: String,
    outcome: Option<(String, Color)>,
    logs: Vec<String>,
    log_buffer: Arc<Mutex<Vec<String>>>,
    should_quit: bool,
}

impl App {
    fn new(session: Session, leaderboard: Leaderboard, log_buffer: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            session,
            leaderboard,
            round: None,
            phase: Phase::Betting,
            bet_input: String::new(),
            settings_input: String::new(),
            status: "Type a bet and press Enter. [O] settings, [Q] quit".to_string(),
            outcome: None,
            logs: vec!["Welcome to Blackjack!".to_string()],
            log_buffer,
            should_quit: false,
        }
    }

    fn sync_logs(&mut self) {
        let messages: Vec<String> = if let Ok(mut buffer) = self.log_buffer.lock() {
            buffer.drain(..).collect()
        } else {
            Vec::new()
        };

        for msg in messages {
            self.add_log(msg);
        }
    }

    fn add_log(&mut self, message: String) {
        self.logs.push(message);
        if self.logs.len() > 20 {
            self.logs.remove(0);
        }
    }

    fn on_key(&mut self, key: KeyCode) {
        match (self.phase, key) {
            (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => self.should_quit = true,

            (Phase::Betting, KeyCode::Char('o')) => {
                self.settings_input.clear();
                self.phase = Phase::Settings;
                self.status = "Auto-bet percentage (0-100), Enter to set".to_string();
            }
            (Phase::Betting, KeyCode::Char(c)) if c.is_ascii_digit() => {
                self.bet_input.push(c);
            }
            (Phase::Betting, KeyCode::Backspace) => {
                self.bet_input.pop();
            }
            (Phase::Betting, KeyCode::Enter) => self.place_bet(),

            (Phase::Settings, KeyCode::Char(c)) if c.is_ascii_digit() => {
                self.settings_input.push(c);
            }
            (Phase::Settings, KeyCode::Backspace) => {
                self.settings_input.pop();
            }
            (Phase::Settings, KeyCode::Enter) => self.apply_settings(),

            (Phase::PlayerTurn, KeyCode::Char('h')) => self.player_hit(),
            (Phase::PlayerTurn, KeyCode::Char('s')) => self.player_stand(),
            (Phase::PlayerTurn, KeyCode::Char('a')) => self.buy_advice(),

            (Phase::RoundOver, KeyCode::Enter) | (Phase::RoundOver, KeyCode::Char(' ')) => {
                self.next_round();
            }

            _ => {}
        }
    }

    fn apply_settings(&mut self) {
        match self.settings_input.parse::<usize>() {
            Ok(percent) if percent <= 100 => {
                self.session.set_auto_bet_percent(percent);
                self.outcome = Some((format!("Auto-bet set to {percent}%"), Color::Blue));
                self.add_log(format!("Auto-bet set to {percent}%"));
            }
            _ => {
                self.outcome = Some(("Enter a valid percentage (0-100).".to_string(), Color::Yellow));
            }
        }
        self.settings_input.clear();
        self.phase = Phase::Betting;
        self.status = "Type a bet and press Enter. [O] settings, [Q] quit".to_string();
    }

    fn place_bet(&mut self) {
        let bet = if let Some(auto) = self.session.auto_bet() {
            auto
        } else {
            match self.bet_input.parse::<usize>() {
                Ok(bet) => bet,
                Err(_) => {
                    self.outcome = Some(("Enter a valid number!".to_string(), Color::Yellow));
                    return;
                }
            }
        };

        match self.session.begin_round(bet) {
            Ok(round) => {
                self.bet_input.clear();
                self.outcome = None;
                self.add_log(format!("Bet placed: ${bet}"));

                let natural = round.state() == RoundState::RoundOver;
                self.round = Some(round);

                if natural {
                    // Natural 21, no player turn.
                    self.add_log("Blackjack! Natural 21.".to_string());
                    self.finish_round();
                } else {
                    self.phase = Phase::PlayerTurn;
                    self.status = "[H]it  [S]tand  [A]dvisor (-10%)".to_string();
                }
            }
            Err(_) => {
                self.outcome = Some(("Invalid bet. Try again.".to_string(), Color::Yellow));
            }
        }
    }

    fn player_hit(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };

        match round.hit() {
            Ok(card) => {
                let state = round.state();
                let player_value = round.player().value();
                self.add_log(format!(
                    "You draw {}{}",
                    card.rank_label(),
                    card.suit.symbol()
                ));
                match state {
                    RoundState::RoundOver => {
                        self.add_log(format!("Bust with {player_value}!"));
                        self.finish_round();
                    }
                    RoundState::DealerTurn => self.run_dealer(),
                    RoundState::PlayerTurn | RoundState::Done => {}
                }
            }
            Err(err) => self.add_log(format!("Action error: {err}")),
        }
    }

    fn player_stand(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };

        match round.stand() {
            Ok(()) => self.run_dealer(),
            Err(err) => self.add_log(format!("Action error: {err}")),
        }
    }

    fn run_dealer(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };

        match round.dealer_play() {
            Ok(drawn) => {
                if !drawn.is_empty() {
                    self.add_log(format!("Dealer draws {} card(s)", drawn.len()));
                }
                self.finish_round();
            }
            Err(err) => self.add_log(format!("Dealer error: {err}")),
        }
    }

    fn buy_advice(&mut self) {
        let Some(round) = self.round.as_ref() else {
            return;
        };

        match self.session.buy_advice(round) {
            Ok(purchased) => {
                self.outcome = Some((
                    format!("Advisor suggests: {}", purchased.advice.label()),
                    Color::Blue,
                ));
                self.add_log(format!(
                    "Advisor fee ${}, balance ${}",
                    purchased.fee,
                    self.session.balance()
                ));
            }
            Err(AdviceError::InsufficientFunds) => {
                self.outcome = Some(("Not enough balance for the advisor.".to_string(), Color::Red));
            }
            Err(err) => self.add_log(format!("Advice error: {err}")),
        }
    }

    fn finish_round(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };

        match self.session.resolve(round) {
            Ok(result) => {
                let (label, color) = match result.outcome {
                    RoundOutcome::Blackjack => ("BLACKJACK", Color::Green),
                    RoundOutcome::Win => ("WIN", Color::Green),
                    RoundOutcome::Push => ("TIE", Color::Gray),
                    RoundOutcome::Lose => ("LOSS", Color::Red),
                };
                self.outcome = Some((label.to_string(), color));
                self.add_log(format!("Round over: {label}, net {}", result.net));
            }
            Err(err) => self.add_log(format!("Resolution error: {err}")),
        }

        if self.session.is_over() {
            self.phase = Phase::GameOver;
            self.status = "Game over! No more balance. [Q] to quit".to_string();
            self.persist();
        } else {
            self.phase = Phase::RoundOver;
            self.status = "Press Enter for the next round".to_string();
        }
    }

    fn next_round(&mut self) {
        self.round = None;
        self.outcome = None;
        self.phase = Phase::Betting;
        self.status = "Type a bet and press Enter. [O] settings, [Q] quit".to_string();
    }

    fn persist(&mut self) {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let top_score = self.session.top_score();
        match self.leaderboard.save_if_higher(top_score, now) {
            Ok(true) => self.add_log(format!("New high score: ${top_score} saved!")),
            Ok(false) => self.add_log(format!(
                "Top score remains ${}.",
                self.leaderboard.load_top_score()
            )),
            Err(err) => self.add_log(format!("Warning: could not save the leaderboard: {err}")),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (logger, log_buffer) = PaneLogger::new();
    log::set_boxed_logger(Box::new(logger))
        .map(|()| log::set_max_level(log::LevelFilter::Info))?;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let session = Session::new(GameOptions::default(), seed);
    let app = App::new(session, Leaderboard::from_env(), log_buffer);

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend + 'static>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.sync_logs();
        terminal.draw(|frame| ui(frame, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key.code);
                }
            }
        }

        if app.should_quit {
            // Quitting early still persists the peak balance.
            if app.phase != Phase::GameOver {
                app.persist();
            }
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Table area
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    let title = Paragraph::new(format!(
        "Blackjack | Balance: ${}  Top: ${}",
        app.session.balance(),
        app.session.top_score()
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, main_chunks[0]);

    let main_horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(main_chunks[1]);

    let table_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_horizontal[0]);

    frame.render_widget(dealer_widget(app), table_area[0]);
    frame.render_widget(player_widget(app), table_area[1]);
    frame.render_widget(log_widget(app), main_horizontal[1]);

    let status = Paragraph::new(app.status.as_str())
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, main_chunks[2]);
}

fn card_spans(cards: &[Card], hide_hole: bool) -> Vec<Span<'static>> {
    cards
        .iter()
        .enumerate()
        .map(|(index, card)| {
            if hide_hole && index > 0 {
                return Span::styled("?? ", Style::default().fg(Color::DarkGray));
            }

            let color = match card.suit {
                Suit::Hearts | Suit::Diamonds => Color::Red,
                Suit::Clubs => Color::Green,
                Suit::Spades => Color::Blue,
            };
            Span::styled(
                format!("{}{} ", card.rank_label(), card.suit.symbol()),
                Style::default().fg(color),
            )
        })
        .collect()
}

fn dealer_widget(app: &App) -> Paragraph<'static> {
    let line = if let Some(round) = &app.round {
        let dealer = round.dealer();
        let mut spans = card_spans(dealer.cards(), !dealer.is_hole_revealed());
        let value_note = if dealer.is_hole_revealed() {
            format!("  ({})", dealer.value())
        } else {
            format!("  (showing {})", dealer.visible_value())
        };
        spans.push(Span::raw(value_note));
        Line::from(spans)
    } else {
        Line::from("No round in progress")
    };

    Paragraph::new(line)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Dealer"))
}

fn player_widget(app: &App) -> Paragraph<'static> {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(round) = &app.round {
        let mut spans = card_spans(round.player().cards(), false);
        spans.push(Span::raw(format!("  ({})", round.player().value())));
        if round.player().status() == HandStatus::Blackjack {
            spans.push(Span::styled(
                "  BLACKJACK",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(format!("Bet: ${}", round.bet())));
    }

    match app.phase {
        Phase::Betting => {
            let entry = if let Some(auto) = app.session.auto_bet() {
                format!("Auto-bet: ${auto} (Enter to place)")
            } else {
                format!("Place your bet: ${}_", app.bet_input)
            };
            lines.push(Line::from(entry));
        }
        Phase::Settings => {
            lines.push(Line::from(format!(
                "Auto-bet percentage: {}_",
                app.settings_input
            )));
        }
        _ => {}
    }

    if let Some((message, color)) = &app.outcome {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        )));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Player"))
}

fn log_widget(app: &App) -> Paragraph<'static> {
    let lines: Vec<Line> = app.logs.iter().map(|log| Line::from(log.clone())).collect();
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Log"))
}

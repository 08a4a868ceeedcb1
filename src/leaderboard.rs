//! Persisted high-score record.
//!
//! A single plain-text record of the best peak balance ever reached:
//!
//! ```text
//! Top Score: $250
//! Date Achieved: 2026-08-30 21:14:03
//! ```
//!
//! A missing or malformed file reads as "no prior record"; only write
//! failures surface, and front-ends report them as a warning.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::LeaderboardError;

/// Environment variable overriding the record file location.
pub const LEADERBOARD_ENV: &str = "TWENTYONE_LEADERBOARD";

/// Default record file, relative to the working directory.
pub const DEFAULT_LEADERBOARD_PATH: &str = "leaderboard.txt";

const SCORE_PREFIX: &str = "Top Score: $";

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// The single-record high-score store.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    path: PathBuf,
}

impl Leaderboard {
    /// Creates a store backed by the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the path named by [`LEADERBOARD_ENV`], falling back
    /// to [`DEFAULT_LEADERBOARD_PATH`].
    #[must_use]
    pub fn from_env() -> Self {
        let path = env::var_os(LEADERBOARD_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_LEADERBOARD_PATH), PathBuf::from);
        Self::new(path)
    }

    /// Returns the record file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted top score.
    ///
    /// Returns 0 when the file is absent, the score field is missing, or the
    /// score is not an integer; none of those are errors.
    #[must_use]
    pub fn load_top_score(&self) -> usize {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return 0;
        };

        parse_top_score(&contents).unwrap_or_else(|| {
            log::debug!("malformed leaderboard file {}, ignoring", self.path.display());
            0
        })
    }

    /// Persists `score` with the given timestamp if it beats the stored one.
    ///
    /// Returns `Ok(true)` when a new record was written, `Ok(false)` when the
    /// existing record stands. The stored score never decreases.
    ///
    /// # Errors
    ///
    /// Returns an error if the record file cannot be written.
    pub fn save_if_higher(
        &self,
        score: usize,
        achieved_at: OffsetDateTime,
    ) -> Result<bool, LeaderboardError> {
        let existing = self.load_top_score();
        if score <= existing {
            log::debug!("top score remains {existing}, no update");
            return Ok(false);
        }

        let stamp = achieved_at.format(TIMESTAMP_FORMAT)?;
        let record = format!("{SCORE_PREFIX}{score}\nDate Achieved: {stamp}\n");
        fs::write(&self.path, record).map_err(LeaderboardError::Write)?;

        log::info!("new top score {score} recorded in {}", self.path.display());
        Ok(true)
    }
}

fn parse_top_score(contents: &str) -> Option<usize> {
    let (_, rest) = contents.split_once(SCORE_PREFIX)?;
    rest.lines().next()?.trim().parse().ok()
}

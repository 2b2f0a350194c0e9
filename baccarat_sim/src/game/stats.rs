//! Running counts and streaks over a stream of three way results. The same tracker records both the
//! game level results (player, banker, tie) and a bettor's results (win, loss, tie).

use baccarat_lib::Outcome;
use std::fmt::Display;

/// Trait for a result with exactly three categories that can be tallied by `Statistics`.
pub trait Category: Copy + Eq + Display {
    /// Every category, ordered by `index()`.
    const ALL: [Self; 3];
    fn index(&self) -> usize;
}

impl Category for Outcome {
    const ALL: [Outcome; 3] = [Outcome::Player, Outcome::Banker, Outcome::Tie];

    fn index(&self) -> usize {
        match self {
            Outcome::Player => 0,
            Outcome::Banker => 1,
            Outcome::Tie => 2,
        }
    }
}

/// The result of a single bet from the bettor's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BetResult {
    Win,
    Loss,
    Tie,
}

impl Display for BetResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BetResult::Win => write!(f, "win"),
            BetResult::Loss => write!(f, "loss"),
            BetResult::Tie => write!(f, "tie"),
        }
    }
}

impl Category for BetResult {
    const ALL: [BetResult; 3] = [BetResult::Win, BetResult::Loss, BetResult::Tie];

    fn index(&self) -> usize {
        match self {
            BetResult::Win => 0,
            BetResult::Loss => 1,
            BetResult::Tie => 2,
        }
    }
}

/// Struct for tracking counts, current streaks and maximum streaks per category.
///
/// A streak only extends when a result repeats the immediately preceding result. Any other result,
/// a tie included, zeroes every current streak before starting its own streak at one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics<C: Category> {
    total: u32,
    counts: [u32; 3],
    current_streaks: [u32; 3],
    max_streaks: [u32; 3],
    last: Option<C>,
}

impl<C: Category> Default for Statistics<C> {
    fn default() -> Self {
        Statistics::new()
    }
}

impl<C: Category> Statistics<C> {
    pub fn new() -> Statistics<C> {
        Statistics {
            total: 0,
            counts: [0; 3],
            current_streaks: [0; 3],
            max_streaks: [0; 3],
            last: None,
        }
    }

    /// Method for recording a single result, updates counts and streaks.
    pub fn record(&mut self, category: C) {
        let i = category.index();
        self.total += 1;
        self.counts[i] += 1;

        if self.last == Some(category) {
            self.current_streaks[i] += 1;
        } else {
            self.current_streaks = [0; 3];
            self.current_streaks[i] = 1;
            self.last = Some(category);
        }

        if self.current_streaks[i] > self.max_streaks[i] {
            self.max_streaks[i] = self.current_streaks[i];
        }
    }

    /// Total number of results recorded.
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn count(&self, category: C) -> u32 {
        self.counts[category.index()]
    }

    pub fn current_streak(&self, category: C) -> u32 {
        self.current_streaks[category.index()]
    }

    pub fn max_streak(&self, category: C) -> u32 {
        self.max_streaks[category.index()]
    }

    /// The most recently recorded result.
    pub fn last(&self) -> Option<C> {
        self.last
    }

    /// Returns the share of results that fell in `category`, or `None` if nothing has been recorded.
    pub fn percentage(&self, category: C) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.count(category) as f64 / self.total as f64)
        }
    }

    pub fn reset(&mut self) {
        *self = Statistics::new();
    }
}

impl Statistics<Outcome> {
    pub fn player_wins(&self) -> u32 {
        self.count(Outcome::Player)
    }

    pub fn banker_wins(&self) -> u32 {
        self.count(Outcome::Banker)
    }

    pub fn ties(&self) -> u32 {
        self.count(Outcome::Tie)
    }

    pub fn player_win_percentage(&self) -> Option<f64> {
        self.percentage(Outcome::Player)
    }

    pub fn banker_win_percentage(&self) -> Option<f64> {
        self.percentage(Outcome::Banker)
    }

    pub fn tie_percentage(&self) -> Option<f64> {
        self.percentage(Outcome::Tie)
    }
}

impl Statistics<BetResult> {
    pub fn wins(&self) -> u32 {
        self.count(BetResult::Win)
    }

    pub fn losses(&self) -> u32 {
        self.count(BetResult::Loss)
    }

    pub fn ties(&self) -> u32 {
        self.count(BetResult::Tie)
    }

    pub fn win_percentage(&self) -> Option<f64> {
        self.percentage(BetResult::Win)
    }

    pub fn loss_percentage(&self) -> Option<f64> {
        self.percentage(BetResult::Loss)
    }

    pub fn tie_percentage(&self) -> Option<f64> {
        self.percentage(BetResult::Tie)
    }
}

/// Formats a percentage getter's result for display, the undefined result is shown as `NaN%`.
pub fn format_percentage(percentage: Option<f64>) -> String {
    match percentage {
        Some(p) => format!("{:.2}%", p * 100.0),
        None => "NaN%".to_string(),
    }
}

impl<C: Category> Display for Statistics<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const width: usize = 80;
        const text_width: usize = 40;
        const num_width: usize = width - text_width;
        writeln!(f, "{:<text_width$}{:>num_width$}", "total hands played", self.total)?;
        for category in C::ALL {
            writeln!(
                f,
                "{:<text_width$}{:>num_width$}",
                format!("{} count", category),
                self.count(category)
            )?;
            writeln!(
                f,
                "{:<text_width$}{:>num_width$}",
                format!("{} max streak", category),
                self.max_streak(category)
            )?;
            writeln!(
                f,
                "{:<text_width$}{:>num_width$}",
                format!("{} percentage", category),
                format_percentage(self.percentage(category))
            )?;
        }
        Ok(())
    }
}

pub mod game;
pub mod write;

pub use game::prelude::*;
use game::strategy::Strategy;
use log::info;
use prelude::PlayerStrategyDyn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::io::Write;
use std::sync::mpsc;
use std::thread;
use thiserror::Error;
use write::OutputFormat;

pub mod prelude {
    pub use super::{
        strategy::prelude::*, BaccaratSimulation, BaccaratSimulator, BaccaratSimulatorConfig,
        BaccaratSimulatorConfigBuilder, MulStrategyBaccaratSimulator,
        MulStrategyBaccaratSimulatorBuilder, SimulationError, SimulationSummary,
    };
}

/// Simple struct for recording all of the interesting data points of one simulated shoe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub label: String,
    pub shoe: u32,
    pub total_hands: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub max_win_streak: u32,
    pub max_loss_streak: u32,
    pub max_tie_streak: u32,
    pub win_percentage: Option<f64>,
    pub loss_percentage: Option<f64>,
    pub tie_percentage: Option<f64>,
    pub max_bet: u64,
    pub bankroll: u64,
    pub player_wins: u32,
    pub banker_wins: u32,
}

impl SimulationSummary {
    /// Builds the summary of a finished session from the player's and the table's statistics.
    pub fn new<S: Strategy>(shoe: u32, game: &BaccaratGameSim<'_, S>) -> SimulationSummary {
        let player = game.player();
        let bets = player.stats();
        let rounds = game.table().stats();
        SimulationSummary {
            label: player.label(),
            shoe,
            total_hands: bets.total(),
            wins: bets.wins(),
            losses: bets.losses(),
            ties: bets.ties(),
            max_win_streak: bets.max_streak(BetResult::Win),
            max_loss_streak: bets.max_streak(BetResult::Loss),
            max_tie_streak: bets.max_streak(BetResult::Tie),
            win_percentage: bets.win_percentage(),
            loss_percentage: bets.loss_percentage(),
            tie_percentage: bets.tie_percentage(),
            max_bet: player.max_bet_seen(),
            bankroll: player.balance(),
            player_wins: rounds.player_wins(),
            banker_wins: rounds.banker_wins(),
        }
    }

    pub fn csv_header() -> &'static str {
        "Strategy,Shoe,TotalHands,WinCount,LossCount,TieCount,MaxWinStreak,MaxLossStreak,MaxTieStreak,WinPercentage,LossPercentage,TiePercentage,MaxBet,Bankroll"
    }

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            self.label,
            self.shoe,
            self.total_hands,
            self.wins,
            self.losses,
            self.ties,
            self.max_win_streak,
            self.max_loss_streak,
            self.max_tie_streak,
            format_percentage(self.win_percentage),
            format_percentage(self.loss_percentage),
            format_percentage(self.tie_percentage),
            self.max_bet,
            self.bankroll
        )
    }
}

impl Display for SimulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const width: usize = 80;
        const text_width: usize = "maximum loss streak".len() + 20;
        const num_width: usize = width - text_width;
        let body = format!(
            "{}{} (shoe #{})\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$}\n\
        {:<text_width$}{:>num_width$}\n",
            "strategy: ",
            self.label,
            self.shoe,
            "hands played",
            self.total_hands,
            "hands won",
            self.wins,
            "hands lost",
            self.losses,
            "hands tied",
            self.ties,
            "maximum win streak",
            self.max_win_streak,
            "maximum loss streak",
            self.max_loss_streak,
            "maximum tie streak",
            self.max_tie_streak,
            "win percentage",
            format_percentage(self.win_percentage),
            "loss percentage",
            format_percentage(self.loss_percentage),
            "tie percentage",
            format_percentage(self.tie_percentage),
            "maximum bet",
            self.max_bet,
            "bankroll",
            self.bankroll,
        );
        write!(f, "{}", body)
    }
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("game error: {0}")]
    Game(#[from] BaccaratGameError),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("sending error: {0}")]
    Sending(String),
    #[error("write error: {0}")]
    Write(#[from] std::io::Error),
}

pub trait BaccaratSimulation: Send {
    /// Required method, the method that will be called to run all simulations.
    fn run(&mut self) -> Result<(), SimulationError>;
    /// Required method, plays one more shoe and returns its summary.
    fn run_single_simulation(&mut self) -> Result<SimulationSummary, SimulationError>;
    /// Required method, the method that will display the stats recorded so far.
    fn display_stats(&self);
    /// Required method, the method that will reset the simulation
    fn reset(&mut self);
    /// Required method, every summary recorded since the last reset.
    fn summaries(&self) -> &[SimulationSummary];
    fn label(&self) -> String;
}

/// Struct for running a number of shoes for a specific strategy. One player carries its bankroll from
/// shoe to shoe, every shoe is a fresh, shuffled and burned game session.
pub struct BaccaratSimulator<S>
where
    S: Strategy,
{
    player: PlayerSim<S>,
    config: BaccaratSimulatorConfig,
    rng: StdRng,
    summaries: Vec<SimulationSummary>,
}

impl<S: Strategy> BaccaratSimulator<S> {
    pub fn new(strategy: S, config: BaccaratSimulatorConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let player_rng = StdRng::seed_from_u64(rng.gen());
        let player = PlayerSim::new(
            config.starting_bankroll,
            config.min_bet,
            config.max_bet,
            strategy,
            player_rng,
        );
        Self {
            player,
            config,
            rng,
            summaries: vec![],
        }
    }

    pub fn player(&self) -> &PlayerSim<S> {
        &self.player
    }
}

impl<S: Strategy + Send> BaccaratSimulation for BaccaratSimulator<S> {
    fn run(&mut self) -> Result<(), SimulationError> {
        for _i in 0..self.config.num_shoes {
            self.run_single_simulation()?;
        }
        if !self.config.silent {
            self.display_stats();
        }
        Ok(())
    }

    fn run_single_simulation(&mut self) -> Result<SimulationSummary, SimulationError> {
        let shoe = self.summaries.len() as u32 + 1;
        let table = BaccaratTableSim::new(self.config.num_decks, &mut self.rng)?;
        let mut game = BaccaratGameSim::new(
            table,
            &mut self.player,
            self.config.start_with_minimum_bet,
        );
        let reason = game.run();
        let summary = SimulationSummary::new(shoe, &game);
        info!(
            "{} shoe #{} stopped ({:?}) after {} hands, bankroll {}",
            summary.label, shoe, reason, summary.total_hands, summary.bankroll
        );
        if !self.config.silent {
            println!("{}", summary);
        }
        self.summaries.push(summary.clone());
        Ok(summary)
    }

    /// Method that will display the accumulated data recorded from all shoes played so far.
    fn display_stats(&self) {
        const width: usize = 80;
        const text_width: usize = "total hands played:".len() + 20;
        const numeric_width: usize = width - text_width;

        let (mut hands, mut wins, mut losses, mut ties) = (0u32, 0u32, 0u32, 0u32);
        for summary in self.summaries.iter() {
            hands += summary.total_hands;
            wins += summary.wins;
            losses += summary.losses;
            ties += summary.ties;
        }

        println!("{}", "-".repeat(width));
        println!(
            "{:-^width$}",
            format!("{} over {} shoes", self.label(), self.summaries.len())
        );
        println!("{:<text_width$}{:>numeric_width$}", "total hands played:", hands);
        println!("{:<text_width$}{:>numeric_width$}", "total wins:", wins);
        println!("{:<text_width$}{:>numeric_width$}", "total losses:", losses);
        println!("{:<text_width$}{:>numeric_width$}", "total ties:", ties);
        println!(
            "{:<text_width$}{:>numeric_width$}",
            "final bankroll:",
            self.player.balance()
        );
        println!("{}", "-".repeat(width));
    }

    /// Method for resetting the state of the simulation, so it can be run again.
    fn reset(&mut self) {
        self.player.reset();
        self.summaries.clear();
    }

    fn summaries(&self) -> &[SimulationSummary] {
        &self.summaries
    }

    fn label(&self) -> String {
        self.player.label()
    }
}

/// This struct is for testing multiple strategies at once. Each strategy plays its own shoes on its own
/// thread, with its own generators, and the summaries are collected by a single writing thread.
pub struct MulStrategyBaccaratSimulator {
    simulations: Vec<Box<dyn BaccaratSimulation>>,
    pub config: BaccaratSimulatorConfig,
}

impl MulStrategyBaccaratSimulator {
    /// Method that returns a new `MulStrategyBaccaratSimulatorBuilder` object.
    pub fn new(config: BaccaratSimulatorConfig) -> MulStrategyBaccaratSimulatorBuilder {
        MulStrategyBaccaratSimulatorBuilder {
            simulations: None,
            config,
        }
    }

    /// Runs every configured simulation in parallel and writes all summaries to `file_out` in `format`,
    /// grouped by simulation in the order they were added.
    pub fn run(
        &mut self,
        file_out: Box<dyn Write + Send + 'static>,
        format: OutputFormat,
    ) -> Result<(), SimulationError> {
        let (write_sender, write_receiver) = mpsc::channel::<(Option<SimulationSummary>, usize)>();

        let mut handles = vec![];
        self.simulations.reverse();
        let mut id = 1usize;

        // Each simulation gets an id so the writing thread knows when all of them are done
        let ids = HashSet::from_iter(1..=self.simulations.len());

        let write_handle =
            thread::spawn(move || write::write_summaries(write_receiver, ids, file_out, format));

        while let Some(mut simulation) = self.simulations.pop() {
            let write_sender_clone = write_sender.clone();
            let num_shoes = self.config.num_shoes;

            let handle = thread::spawn(move || -> Result<(), SimulationError> {
                for _i in 0..num_shoes {
                    let summary = simulation.run_single_simulation()?;
                    write_sender_clone
                        .send((Some(summary), id))
                        .map_err(|e| SimulationError::Sending(e.to_string()))?;
                }
                write_sender_clone
                    .send((None, id))
                    .map_err(|e| SimulationError::Sending(e.to_string()))?;
                Ok(())
            });

            handles.push(handle);
            id += 1;
        }
        drop(write_sender);

        for (i, handle) in handles.into_iter().enumerate() {
            handle
                .join()
                .map_err(|_| SimulationError::Sending(format!("simulation #{} panicked", i + 1)))??;
        }

        write_handle
            .join()
            .map_err(|_| SimulationError::Sending("writing thread panicked".to_string()))??;

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.simulations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simulations.is_empty()
    }
}

/// Struct for building a `MulStrategyBaccaratSimulator` object
pub struct MulStrategyBaccaratSimulatorBuilder {
    simulations: Option<Vec<Box<dyn BaccaratSimulation>>>,
    config: BaccaratSimulatorConfig,
}

impl MulStrategyBaccaratSimulatorBuilder {
    /// Method for adding a new simulation, the only required input is a struct that implements the `Strategy` trait,
    /// the rest of the configuration is taken from the `BaccaratSimulatorConfig` passed during object creation.
    /// When the configuration is seeded, each added simulation is seeded with its own offset of that seed.
    pub fn simulation<S: Strategy + Send + 'static>(&mut self, strategy: S) -> &mut Self {
        let sim_vec = self.simulations.get_or_insert_with(Vec::new);
        let mut config = self.config;
        config.seed = config.seed.map(|seed| seed.wrapping_add(sim_vec.len() as u64));
        sim_vec.push(Box::new(BaccaratSimulator::new(strategy, config)));
        self
    }

    /// Adds a simulation for a strategy trait object.
    pub fn dyn_simulation(&mut self, strategy: Box<PlayerStrategyDyn>) -> &mut Self {
        self.simulation(strategy)
    }

    /// Method that builds a `MulStrategyBaccaratSimulator` object
    pub fn build(&mut self) -> MulStrategyBaccaratSimulator {
        MulStrategyBaccaratSimulator {
            simulations: self.simulations.take().unwrap_or_default(),
            config: self.config,
        }
    }
}

/// Struct for configuring a `BaccaratSimulator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaccaratSimulatorConfig {
    pub starting_bankroll: u64,
    pub min_bet: u64,
    pub max_bet: u64,
    pub num_decks: usize,
    pub num_shoes: u32,
    pub start_with_minimum_bet: bool,
    pub seed: Option<u64>,
    pub silent: bool,
}

impl BaccaratSimulatorConfig {
    /// Associated method for returning a new `BaccaratSimulatorConfigBuilder` object. Allows the user to choose
    /// the parameters of the simulation such as the player's starting bankroll, the number of shoes played,
    /// the bet limits, and how many decks make up a shoe.
    pub fn new() -> BaccaratSimulatorConfigBuilder {
        BaccaratSimulatorConfigBuilder {
            starting_bankroll: None,
            min_bet: None,
            max_bet: None,
            num_decks: None,
            num_shoes: None,
            start_with_minimum_bet: None,
            seed: None,
            silent: None,
        }
    }

    /// Checks that the configuration describes a playable simulation.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.num_decks == 0 {
            return Err(SimulationError::Config(
                "a shoe needs at least one deck".to_string(),
            ));
        }
        if self.num_shoes == 0 {
            return Err(SimulationError::Config(
                "at least one shoe must be played".to_string(),
            ));
        }
        if self.min_bet == 0 {
            return Err(SimulationError::Config(
                "minimum bet must be positive".to_string(),
            ));
        }
        if self.max_bet < self.min_bet {
            return Err(SimulationError::Config(format!(
                "maximum bet {} is below the minimum bet {}",
                self.max_bet, self.min_bet
            )));
        }
        Ok(())
    }
}

impl Default for BaccaratSimulatorConfig {
    fn default() -> Self {
        BaccaratSimulatorConfig::new().build()
    }
}

/// Struct to implement builder pattern for `BaccaratSimulatorConfig`
#[derive(Debug, Clone, Copy, Default)]
pub struct BaccaratSimulatorConfigBuilder {
    starting_bankroll: Option<u64>,
    min_bet: Option<u64>,
    max_bet: Option<u64>,
    num_decks: Option<usize>,
    num_shoes: Option<u32>,
    start_with_minimum_bet: Option<bool>,
    seed: Option<u64>,
    silent: Option<bool>,
}

impl BaccaratSimulatorConfigBuilder {
    /// Method for changing the starting bankroll of the player.
    pub fn starting_bankroll(&mut self, bankroll: u64) -> &mut Self {
        self.starting_bankroll = Some(bankroll);
        self
    }

    pub fn min_bet(&mut self, bet: u64) -> &mut Self {
        self.min_bet = Some(bet);
        self
    }

    /// Method for setting the table maximum, no bet will ever exceed it.
    pub fn max_bet(&mut self, bet: u64) -> &mut Self {
        self.max_bet = Some(bet);
        self
    }

    /// Method for choosing the number of decks in each shoe
    pub fn num_decks(&mut self, decks: usize) -> &mut Self {
        self.num_decks = Some(decks);
        self
    }

    /// Method for setting the number of shoes played by each simulation
    pub fn num_shoes(&mut self, shoes: u32) -> &mut Self {
        self.num_shoes = Some(shoes);
        self
    }

    /// Method for setting whether every shoe opens with the minimum bet, or continues the betting
    /// progression from the previous shoe.
    pub fn start_with_minimum_bet(&mut self, start: bool) -> &mut Self {
        self.start_with_minimum_bet = Some(start);
        self
    }

    /// Method for seeding every generator used in the simulation, making runs reproducible.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    /// Method for setting a boolean flag, if set to false each shoe's summary is printed as it completes.
    pub fn silent(&mut self, silent: bool) -> &mut Self {
        self.silent = Some(silent);
        self
    }

    /// Method for building a `BaccaratSimulatorConfig` object from the given builder.
    pub fn build(&mut self) -> BaccaratSimulatorConfig {
        BaccaratSimulatorConfig {
            starting_bankroll: self.starting_bankroll.unwrap_or(500_000),
            min_bet: self.min_bet.unwrap_or(10),
            max_bet: self.max_bet.unwrap_or(5_000_000),
            num_decks: self.num_decks.unwrap_or(6),
            num_shoes: self.num_shoes.unwrap_or(1500),
            start_with_minimum_bet: self.start_with_minimum_bet.unwrap_or(true),
            seed: self.seed,
            silent: self.silent.unwrap_or(true),
        }
    }
}

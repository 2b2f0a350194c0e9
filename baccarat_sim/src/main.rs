use baccarat_sim::prelude::*;
use baccarat_sim::write::OutputFormat;
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Simulates a betting strategy over many shoes of punto banco baccarat and writes one summary per shoe.
#[derive(Parser, Debug)]
#[command(name = "baccarat_sim", version)]
struct Cli {
    /// JSON configuration file, command line flags take precedence over its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of shoes each strategy plays
    #[arg(long)]
    shoes: Option<u32>,

    /// Number of decks in each shoe
    #[arg(long)]
    decks: Option<usize>,

    /// Starting bankroll of the player
    #[arg(long)]
    bankroll: Option<u64>,

    #[arg(long)]
    min_bet: Option<u64>,

    /// Table maximum
    #[arg(long)]
    max_bet: Option<u64>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Keep the betting progression running from one shoe into the next
    #[arg(long)]
    carry_progression: bool,

    /// Betting strategies to compare, each one is simulated on its own thread
    #[arg(short, long, value_enum, default_values_t = [Betting::Martingale])]
    betting: Vec<Betting>,

    /// Which side the player backs
    #[arg(short, long, value_enum, default_value_t = Guess::Random)]
    guess: Guess,

    /// Write summaries as JSON instead of CSV
    #[arg(long)]
    json: bool,

    /// Output file, defaults to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Betting {
    Martingale,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Guess {
    Random,
    Banker,
    Player,
}

/// Configuration read from a JSON file, every field is optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    starting_bankroll: Option<u64>,
    min_bet: Option<u64>,
    max_bet: Option<u64>,
    num_decks: Option<usize>,
    num_shoes: Option<u32>,
    start_with_minimum_bet: Option<bool>,
    seed: Option<u64>,
}

fn load_config(path: &PathBuf) -> Result<FileConfig, SimulationError> {
    let file = File::open(path)?;
    serde_json::from_reader(file)
        .map_err(|e| SimulationError::Config(format!("{}: {}", path.display(), e)))
}

fn build_config(cli: &Cli) -> Result<BaccaratSimulatorConfig, SimulationError> {
    let file = match &cli.config {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };

    let mut builder = BaccaratSimulatorConfig::new();
    if let Some(bankroll) = cli.bankroll.or(file.starting_bankroll) {
        builder.starting_bankroll(bankroll);
    }
    if let Some(bet) = cli.min_bet.or(file.min_bet) {
        builder.min_bet(bet);
    }
    if let Some(bet) = cli.max_bet.or(file.max_bet) {
        builder.max_bet(bet);
    }
    if let Some(decks) = cli.decks.or(file.num_decks) {
        builder.num_decks(decks);
    }
    if let Some(shoes) = cli.shoes.or(file.num_shoes) {
        builder.num_shoes(shoes);
    }
    if let Some(seed) = cli.seed.or(file.seed) {
        builder.seed(seed);
    }
    let start_with_minimum_bet = if cli.carry_progression {
        false
    } else {
        file.start_with_minimum_bet.unwrap_or(true)
    };
    let config = builder
        .start_with_minimum_bet(start_with_minimum_bet)
        .silent(true)
        .build();
    config.validate()?;
    Ok(config)
}

fn strategy(guess: Guess, betting: Betting) -> Box<PlayerStrategyDyn> {
    match (guess, betting) {
        (Guess::Random, Betting::Martingale) => {
            Box::new(PlayerStrategy::new(RandomGuess::new(), MartingaleBetting::new()))
        }
        (Guess::Random, Betting::Flat) => {
            Box::new(PlayerStrategy::new(RandomGuess::new(), FlatBetting::new()))
        }
        (Guess::Banker, Betting::Martingale) => {
            Box::new(PlayerStrategy::new(AlwaysBanker, MartingaleBetting::new()))
        }
        (Guess::Banker, Betting::Flat) => {
            Box::new(PlayerStrategy::new(AlwaysBanker, FlatBetting::new()))
        }
        (Guess::Player, Betting::Martingale) => {
            Box::new(PlayerStrategy::new(AlwaysPlayer, MartingaleBetting::new()))
        }
        (Guess::Player, Betting::Flat) => {
            Box::new(PlayerStrategy::new(AlwaysPlayer, FlatBetting::new()))
        }
    }
}

fn run(cli: Cli) -> Result<(), SimulationError> {
    let config = build_config(&cli)?;
    log::info!("running with {:?}", config);

    let mut builder = MulStrategyBaccaratSimulator::new(config);
    for betting in cli.betting.iter() {
        builder.dyn_simulation(strategy(cli.guess, *betting));
    }
    let mut simulator = builder.build();

    let writer: Box<dyn Write + Send> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    };
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Csv
    };
    simulator.run(writer, format)
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

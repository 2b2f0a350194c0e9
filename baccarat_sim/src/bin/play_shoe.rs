use baccarat_sim::game::prelude::*;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deals a single shoe round by round and prints every hand.
#[derive(Parser, Debug)]
#[command(name = "play_shoe")]
struct Args {
    /// Number of decks in the shoe
    #[arg(short, long, default_value_t = 6)]
    decks: usize,

    /// Seed for the shuffle
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    if args.decks == 0 {
        eprintln!("error: a shoe needs at least one deck");
        std::process::exit(1);
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut table = match BaccaratTableSim::new(args.decks, &mut rng) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Some(burn) = table.burn() {
        println!(
            "burned {} and discarded {} cards, {} cards left in the shoe",
            burn.top_card,
            burn.discarded,
            table.shoe().len()
        );
        println!();
    }

    let mut round = 1;
    while table.can_continue() {
        let result = match table.play_round() {
            Ok(r) => r,
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        };

        println!("round #{round}");
        println!("player: {}", table.player_hand);
        println!("banker: {}", table.banker_hand);
        println!("result: {} {}", result.outcome, result.score);
        println!();
        round += 1;
    }

    println!("{} cards left undealt", table.shoe().len());
    println!("{}", table.stats());
}

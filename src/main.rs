use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use fleetcommand::{
    init_logging, play_out, Engine, EngineConfig, GameOptions, GameSnapshot, HuntTargeting,
    InMemoryRepository, RandomTargeting, ShipType, Shooter, StartingPlayerPolicy, Targeting,
    UserId,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Strategy {
    Random,
    Hunt,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Opener {
    FirstJoined,
    Random,
}

#[derive(Subcommand)]
enum Commands {
    /// Play automated games against an in-memory engine.
    Simulate {
        #[arg(long, default_value_t = 1, help = "Number of games played concurrently")]
        games: usize,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Let the trailing player answer a fleet-clearing shot")]
        allow_draw: bool,
        #[arg(long, help = "Do not reveal sunk ships on the sinking turn")]
        hide_sinking: bool,
        #[arg(long, value_enum, default_value_t = Opener::Random)]
        starting_player: Opener,
        #[arg(long, value_enum, default_value_t = Strategy::Hunt)]
        strategy: Strategy,
        #[arg(long, help = "Print both boards of every game")]
        show_boards: bool,
        #[arg(long, help = "Print game snapshots as JSON")]
        json: bool,
    },
}

fn targeting(strategy: Strategy) -> Box<dyn Targeting> {
    match strategy {
        Strategy::Random => Box::new(RandomTargeting),
        Strategy::Hunt => Box::new(HuntTargeting),
    }
}

async fn run_game(
    engine: Arc<Engine<InMemoryRepository>>,
    options: GameOptions,
    strategy: Strategy,
    seed: u64,
) -> anyhow::Result<GameSnapshot> {
    let game = engine.create_game(options).await?;
    let p1 = engine.join_game(game.id, UserId::new()).await?;
    let p2 = engine.join_game(game.id, UserId::new()).await?;
    engine.auto_place(p1.id).await?;
    engine.auto_place(p2.id).await?;

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut shooters = [
        Shooter::new(p1.id, targeting(strategy)),
        Shooter::new(p2.id, targeting(strategy)),
    ];
    play_out(&engine, game.id, &mut shooters, &mut rng).await
}

fn ship_list(ships: &[ShipType]) -> String {
    if ships.is_empty() {
        return "none".to_string();
    }
    ships
        .iter()
        .map(ShipType::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

async fn print_game(
    engine: &Engine<InMemoryRepository>,
    snapshot: &GameSnapshot,
    show_boards: bool,
) -> anyhow::Result<()> {
    println!("Game: {}", snapshot.id);
    println!(" State: {}", snapshot.state);
    println!(" Created at: {}", snapshot.created_at);
    println!(" Announce sinking: {}", snapshot.announce_sinking);
    println!(" Allow draw: {}", snapshot.allow_draw);
    println!(" Started at: {:?}", snapshot.started_at);
    println!(" Ended at: {:?}", snapshot.ended_at);
    if let Some(starting) = snapshot.starting_player {
        println!(" Starting player: {}", starting);
    }
    match (snapshot.winner, snapshot.is_draw) {
        (Some(winner), _) => println!(" Winner: {}", winner),
        (None, true) => println!(" Result: draw"),
        (None, false) => {}
    }
    for player in &snapshot.players {
        println!("Player: {}", player.id);
        println!(" User: {}", player.user);
        println!(" Joined at: {}", player.joined_at);
        println!(" Ships: {}", ship_list(&player.ships));
        println!(" Sunk: {}", ship_list(&player.sunk));
        println!(" Turns: {}", player.turns_taken);
        if show_boards {
            if let Some(opponent) = engine.opponent_of(player.id).await? {
                println!("{}", engine.board_view(player.id, opponent.id).await?);
            }
        }
    }
    println!();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            games,
            seed,
            allow_draw,
            hide_sinking,
            starting_player,
            strategy,
            show_boards,
            json,
        } => {
            let mut config = EngineConfig::default().with_starting_player(match starting_player {
                Opener::FirstJoined => StartingPlayerPolicy::FirstJoined,
                Opener::Random => StartingPlayerPolicy::Random,
            });
            if let Some(s) = seed {
                eprintln!("Using fixed seed: {} (a single game will be reproducible)", s);
                config = config.with_seed(s);
            }
            let engine = Arc::new(Engine::new(InMemoryRepository::new(), config));
            let options = GameOptions {
                announce_sinking: !hide_sinking,
                allow_draw,
            };

            let base = seed.unwrap_or_else(rand::random);
            let handles: Vec<_> = (0..games as u64)
                .map(|i| {
                    let engine = Arc::clone(&engine);
                    tokio::spawn(run_game(engine, options, strategy, base.wrapping_add(i)))
                })
                .collect();
            for handle in handles {
                handle.await??;
            }

            let snapshots = engine.list_games().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshots)?);
            } else {
                for snapshot in &snapshots {
                    print_game(&engine, snapshot, show_boards).await?;
                }
            }
        }
    }
    Ok(())
}

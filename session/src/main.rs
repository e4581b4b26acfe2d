use std::path::PathBuf;
use std::time::Duration;

use cardchess::{
    AssetCatalog, GameConfig, GameState, NullRenderer, PlayerKind, RandomBot, Renderer, Side,
};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use session::{load_config, play_game, Participant, Recorder, Session};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to a game config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Let decision makers play both sides
    #[arg(short, long, default_value_t = false)]
    autoplay: bool,

    /// Stop after this many turns
    #[arg(short, long)]
    max_turns: Option<u32>,

    /// Overrides the think delay from the config
    #[arg(long)]
    think_delay_ms: Option<u64>,

    /// Directory that must contain a <texture>.png for every card
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Record the finished game as a JSON file into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let mut config = load_config(args.config.as_deref())?;
    if args.autoplay {
        config.first_player = PlayerKind::Automated;
        config.second_player = PlayerKind::Automated;
    }
    if config.first_player == PlayerKind::Human && config.second_player == PlayerKind::Human {
        anyhow::bail!("Only one side can be played from stdin");
    }
    if let Some(ms) = args.think_delay_ms {
        config.think_delay_ms = ms;
    }

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let recorder = if let Some(dir_path) = args.record_games_to_directory.clone() {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };
    let mut session = Session {
        seed,
        think_delay: Duration::from_millis(config.think_delay_ms),
        max_turns: args.max_turns,
        recorder,
        show_board: config.first_player == PlayerKind::Human
            || config.second_player == PlayerKind::Human,
    };

    match args.assets {
        Some(dir) => run(&config, &mut session, AssetCatalog::new(dir, NullRenderer), &mut rng),
        None => run(&config, &mut session, NullRenderer, &mut rng),
    }
}

fn run<R: Renderer>(
    config: &GameConfig,
    session: &mut Session,
    renderer: R,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    let mut state = GameState::new(config, renderer, rng)?;
    if session.show_board {
        state.set_turn_observer(|side, turn| eprintln!("Turn {}: {} to move", turn, side.label()));
        println!("{}", state.board());
    }

    let mut participants = [Side::First, Side::Second].map(|side| {
        let player = state.player(side);
        match player.kind {
            PlayerKind::Human => Participant::human(
                side.label(),
                player.id,
                Box::new(std::io::stdin().lock()),
            ),
            PlayerKind::Automated => Participant::bot(
                side.label(),
                player.id,
                Box::new(RandomBot::new(StdRng::seed_from_u64(rng.gen()))),
            ),
        }
    });

    let summary = play_game(session, &mut state, &mut participants)?;
    eprintln!(
        "Game over after {} turns ({:?}):\n- {} scored {}\n- {} scored {}",
        summary.turns,
        summary.end,
        participants[0].name,
        summary.scores[0],
        participants[1].name,
        summary.scores[1],
    );
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

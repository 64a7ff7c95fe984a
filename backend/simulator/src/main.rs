use anyhow::Context;
use railroad_barons::map_maker::{read_map, write_map};
use railroad_barons::observer::{ManagerObserver, MapObserver};
use railroad_barons::{FirstClaimable, GameConfig, GamePhase, Manager, Map, Player, Route};

use std::env;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::rc::Rc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Guards against maps on which nobody ever gathers enough cards.
const MAX_TURNS: usize = 10_000;

struct TurnLogger;

impl ManagerObserver for TurnLogger {
    fn turn_started(&self, game: &Manager, player: &Player) {
        info!(
            "{} starts their turn with {} cards and {} pieces ({} cards left in the deck).",
            player.baron(),
            player.hand().len(),
            player.pieces(),
            game.cards_remaining()
        );
    }

    fn game_over(&self, game: &Manager, winner: &Player) {
        for player in game.players() {
            info!(
                "{}: {} points, {} routes.",
                player.baron(),
                player.score(),
                player.claimed_routes().len()
            );
        }
        info!("{} wins!", winner.baron());
    }
}

impl MapObserver for TurnLogger {
    fn route_claimed(&self, map: &Map, route: &Route) {
        let name = |id| map.station(id).map_or("?", |station| station.name());
        info!(
            "{} now owns {} - {}.",
            route.baron(),
            name(route.origin()),
            name(route.destination())
        );
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = env::args().skip(1);
    let map_path = args
        .next()
        .context("usage: simulator <map> [config.json] [output map]")?;
    let config_path = args.next();
    let output_path = args.next();

    let config = match config_path {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("cannot read config file {}", path))?;
            GameConfig::from_json(&json).with_context(|| format!("invalid config file {}", path))?
        }
        None => GameConfig::default(),
    };

    let map_file =
        File::open(&map_path).with_context(|| format!("cannot open map file {}", map_path))?;
    let mut map = read_map(BufReader::new(map_file))?;

    let logger = Rc::new(TurnLogger);
    map.register_observer(logger.clone());

    let mut manager = Manager::new(config)?;
    manager.register_observer(logger);
    manager.start_game(map);

    let mut strategy = FirstClaimable;
    let mut turns = 0;
    while manager.phase() == GamePhase::WaitingForClaim {
        if turns == MAX_TURNS {
            warn!("Stopping the game after {} turns.", MAX_TURNS);
            break;
        }

        manager.play_turn(&mut strategy)?;
        turns += 1;
    }

    println!("{}", serde_json::to_string_pretty(&manager.get_state())?);

    if let (Some(path), Some(map)) = (output_path, manager.map()) {
        let output = File::create(&path)
            .with_context(|| format!("cannot create output map file {}", path))?;
        write_map(map, BufWriter::new(output))?;
        info!("Final map written to {}.", path);
    }

    Ok(())
}

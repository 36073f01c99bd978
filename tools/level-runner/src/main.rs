//! level-runner: play a level definition headlessly and report what happened.
//!
//! Usage:
//!   level-runner levels/sample.json
//!   level-runner levels/sample.json --ticks 20000 --seed 7 --frame-rate 60
//!
//! Waves are started one after another, each as soon as the previous one is
//! done. The run stops when every wave is done, the player runs out of
//! lives, or the tick limit is hit. Set `RUST_LOG=debug` for per-object logs.

use std::cell::RefCell;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;

use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rampart_core::enums::RemovalCause;
use rampart_core::events::WaveEvent;
use rampart_sim::economy::Ledger;
use rampart_sim::engine::{object_id, ObjectEvent};
use rampart_sim::factory::EnemyFactory;
use rampart_sim::level::Level;
use rampart_sim::wave::{SharedWaveListener, Wave, WaveListener};
use rampart_sim::{EngineConfig, GameEngine};

const DEFAULT_TICK_LIMIT: u64 = 100_000;

struct Options {
    level: PathBuf,
    tick_limit: u64,
    config: EngineConfig,
}

/// Collects wave lifecycle events in delivery order.
#[derive(Default)]
struct EventLog {
    events: Vec<WaveEvent>,
}

impl WaveListener for EventLog {
    fn on_wave_started(&mut self, wave: &Wave, _engine: &mut GameEngine) {
        self.events.push(WaveEvent::Started { wave: wave.index() });
    }

    fn on_wave_all_enemies_added(&mut self, wave: &Wave, engine: &mut GameEngine) {
        info!(wave = wave.index(), tick = engine.tick_count(), "all enemies on the field");
        self.events
            .push(WaveEvent::AllEnemiesAdded { wave: wave.index() });
    }

    fn on_wave_enemy_removed(
        &mut self,
        wave: &Wave,
        _engine: &mut GameEngine,
        event: &ObjectEvent,
        cause: RemovalCause,
    ) {
        self.events.push(WaveEvent::EnemyRemoved {
            wave: wave.index(),
            enemy: object_id(event.entity),
            cause,
        });
    }

    fn on_wave_done(&mut self, wave: &Wave, engine: &mut GameEngine) {
        info!(wave = wave.index(), tick = engine.tick_count(), "wave cleared");
        self.events.push(WaveEvent::Done {
            wave: wave.index(),
            reward: wave.reward(),
        });
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || matches!(args[1].as_str(), "help" | "--help" | "-h") {
        print_usage();
        process::exit(1);
    }

    let options = match parse_options(&args[1..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            process::exit(1);
        }
    };

    init_logging();

    if let Err(message) = run(&options) {
        eprintln!("Error: {message}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "level-runner: run a RAMPART level definition headlessly\n\
         \n\
         Usage: level-runner <level.json> [options]\n\
         \n\
           --ticks <N>        Stop after N ticks (default: {DEFAULT_TICK_LIMIT})\n\
           --seed <S>         RNG seed (default: 42)\n\
           --frame-rate <F>   Ticks per second (default: 30)\n\
         \n\
         Logging is controlled by RUST_LOG (default: info).\n"
    );
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        level: PathBuf::from(&args[0]),
        tick_limit: DEFAULT_TICK_LIMIT,
        config: EngineConfig::default(),
    };

    let mut i = 1;
    while i < args.len() {
        let value = args
            .get(i + 1)
            .ok_or_else(|| format!("Missing value for {}", args[i]))?;
        match args[i].as_str() {
            "--ticks" => options.tick_limit = parse_number(&args[i], value)?,
            "--seed" => options.config.seed = parse_number(&args[i], value)?,
            "--frame-rate" => {
                options.config.frame_rate = parse_number(&args[i], value)?;
                if options.config.frame_rate == 0 {
                    return Err("--frame-rate must be positive".into());
                }
            }
            other => return Err(format!("Unknown option: {other}")),
        }
        i += 2;
    }

    Ok(options)
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid value for {flag}: {value}"))
}

fn init_logging() {
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::Layer::new().with_writer(std::io::stderr));
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {err}");
    }
}

fn run(options: &Options) -> Result<(), String> {
    let json = std::fs::read_to_string(&options.level)
        .map_err(|e| format!("Failed to read {}: {e}", options.level.display()))?;
    let level = Level::from_json_str(&json, &EnemyFactory::default())
        .map_err(|e| format!("Failed to load {}: {e}", options.level.display()))?;

    let ledger = Rc::new(RefCell::new(Ledger::new(level.settings())));
    let mut engine = GameEngine::new(options.config, ledger.clone());

    let log = Rc::new(RefCell::new(EventLog::default()));
    let listener: SharedWaveListener = log.clone();
    for wave in level.waves() {
        wave.borrow_mut().add_listener(listener.clone());
    }

    let mut current = 0;
    if level.wave_count() > 0 {
        level.start_wave(current, &mut engine);
    }

    let mut waves_cleared = 0;
    while current < level.wave_count() && engine.tick_count() < options.tick_limit {
        engine.tick();

        if ledger.borrow().is_game_over() {
            warn!(tick = engine.tick_count(), wave = current, "out of lives");
            break;
        }

        let done = level
            .wave(current)
            .is_some_and(|wave| wave.borrow().is_done());
        if done {
            waves_cleared += 1;
            current += 1;
            level.start_wave(current, &mut engine);
        }
    }

    if current < level.wave_count() && engine.tick_count() >= options.tick_limit {
        warn!(limit = options.tick_limit, "tick limit reached");
    }

    let totals = ledger.borrow();
    let summary = serde_json::json!({
        "level": options.level.display().to_string(),
        "ticks": engine.tick_count(),
        "seconds": engine.tick_count() as f64 / engine.frame_rate() as f64,
        "waves": level.wave_count(),
        "wavesCleared": waves_cleared,
        "lives": totals.lives,
        "livesLost": totals.lives_lost,
        "credits": totals.credits,
        "creditsEarned": totals.credits_earned,
        "gameOver": totals.is_game_over(),
        "events": log.borrow().events,
    });
    let text = serde_json::to_string_pretty(&summary)
        .map_err(|e| format!("Failed to encode summary: {e}"))?;
    println!("{text}");

    Ok(())
}

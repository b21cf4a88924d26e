//! Headless autoplayer.
//!
//! Drives the engine with a simple policy (explore, fight, heal and shop at
//! home, resurrect when possible) and prints what happened.
//!
//! Usage:
//!   cargo run --bin autoplay -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin autoplay                      # 500 turns, random seed
//!   cargo run --bin autoplay -- --seed 42 -t 2000 # Reproducible longer run
//!   cargo run --bin autoplay -- --json -vv        # JSON status, debug logging

use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::env;
use wayfarer::character::AttributeType;
use wayfarer::items::{equipment, shop_listing, ConsumableId, EquipmentId, ItemRef, SET_PIECES};
use wayfarer::map::WorldMap;
use wayfarer::{Direction, Game, GameConfig, GameError, GameEvent, GameStatus, TurnReport};

struct Options {
    turns: u32,
    seed: Option<u64>,
    verbosity: u8,
    json: bool,
    quiet: bool,
    config_path: Option<String>,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);
    init_logging(options.verbosity);

    let mut config = match &options.config_path {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    if options.seed.is_some() {
        config.seed = options.seed;
    }

    let mut game = match Game::new(config) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut turns_played = 0;
    let mut outcomes: BTreeMap<&'static str, u32> = BTreeMap::new();
    while turns_played < options.turns && game.state() != GameStatus::GameOver {
        let report = take_turn(&mut game);
        for event in &report.events {
            if let GameEvent::Explored { outcome, .. } = event {
                *outcomes.entry(outcome.name()).or_insert(0) += 1;
            }
        }
        if !options.quiet {
            for message in &report.messages {
                println!("{}", message);
            }
        }
        turns_played += 1;
    }

    let status = game.status();
    if options.json {
        match serde_json::to_string_pretty(&status) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: could not serialize status: {}", e),
        }
        return;
    }

    println!();
    println!("=== Wayfarer autoplay: {} turns ===", turns_played);
    println!("  State:     {:?}", status.status);
    println!(
        "  Level:     {} ({}/{} xp)",
        status.level, status.xp, status.xp_to_next
    );
    println!("  HP:        {}/{}", status.hp, status.max_hp);
    let attributes = game.player().attributes();
    let spread: Vec<String> = AttributeType::all()
        .iter()
        .map(|&attr| format!("{} {}", attr.abbrev(), attributes.get(attr)))
        .collect();
    println!("  Stats:     {}", spread.join("  "));
    println!(
        "  ATK/DEF:   {}/{} (crit {}%)",
        status.attack, status.defense, status.crit_chance
    );
    println!("  Gold:      {}", status.currency);
    println!(
        "  Map:       {}x{}, {}/{} explored",
        status.map_size, status.map_size, status.explored_regions, status.total_regions
    );
    println!("  Armor:     {:?}", status.equipped_armors);
    println!("  Weapon:    {:?}", status.equipped_weapon);
    if !outcomes.is_empty() {
        let tally: Vec<String> = outcomes
            .iter()
            .map(|(name, count)| format!("{} x{}", name, count))
            .collect();
        println!("  Explored:  {}", tally.join(", "));
    }
    println!();
    let pos = game.player().position;
    for line in render_map(game.map(), pos.x, pos.y) {
        println!("  {}", line);
    }
}

/// One line per map row: `@` is the player, `.` an explored wild region,
/// anything else the region's own icon.
fn render_map(map: &WorldMap, player_x: usize, player_y: usize) -> Vec<String> {
    let mut lines = vec![String::new(); map.size()];
    for region in map.regions() {
        let cell = if (region.x, region.y) == (player_x, player_y) {
            '@'
        } else if region.explored && !region.is_home() {
            '.'
        } else {
            region.kind.icon()
        };
        if let Some(line) = lines.get_mut(region.y) {
            line.push(cell);
        }
    }
    lines
}

fn load_config(path: &str) -> Result<GameConfig, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    GameConfig::from_json(&text).map_err(|e| e.to_string())
}

/// One decision of the policy. Always returns a report so the loop advances.
fn take_turn(game: &mut Game<StdRng>) -> TurnReport {
    let result = match game.state() {
        GameStatus::GameOver => return TurnReport::default(),
        GameStatus::Dead => game.resurrect().or_else(|_| game.give_up()),
        GameStatus::InBattle => {
            let player = game.player();
            let fresh = game.battle().is_some_and(|b| !b.has_started());
            if player.hp() * 4 < player.max_hp() && !fresh {
                game.flee()
            } else {
                game.attack()
            }
        }
        GameStatus::Exploring => explore_turn(game),
    };

    result.unwrap_or_else(|e| TurnReport {
        messages: vec![format!("({})", e)],
        events: Vec::new(),
    })
}

fn explore_turn(game: &mut Game<StdRng>) -> Result<TurnReport, GameError> {
    let player = game.player();
    let low_hp = player.hp() * 5 < player.max_hp() * 2;

    if player.is_at_home() {
        if let Some(report) = shop_and_equip(game) {
            return Ok(report);
        }
        if !game.player().is_full_hp() {
            return game.rest();
        }
    } else if low_hp {
        if game.player().consumable_count(ConsumableId::SpicySoup) > 0 {
            return game.use_consumable("spicy_soup");
        }
        if game.player().consumable_count(ConsumableId::SewerHatch) > 0 {
            return game.use_consumable("sewer_hatch");
        }
        return game.move_player(direction_towards_home(game));
    }

    match game.explore() {
        Err(GameError::AlreadyExplored) => game.move_player(direction_towards_unexplored(game)),
        other => other,
    }
}

/// Buys and wears the next affordable upgrade. None when there is nothing
/// worth doing at the shop.
fn shop_and_equip(game: &mut Game<StdRng>) -> Option<TurnReport> {
    // A dropped weapon beats the cruller once it turns up
    let eq = game.player().equipment();
    for id in [EquipmentId::ZhongSword, EquipmentId::FrozenTwist] {
        if eq.is_owned(id) && !eq.is_equipped(id) {
            if let Some(current) = eq.weapon() {
                if equipment(current).attack_bonus >= equipment(id).attack_bonus {
                    continue;
                }
                return game.unequip(equipment(current).key).ok();
            }
            return game.equip(equipment(id).key).ok();
        }
    }

    let mut wanted = SET_PIECES.to_vec();
    if game.player().equipment().weapon().is_none() {
        wanted.push(EquipmentId::SoupCruller);
    }
    for id in wanted {
        let eq = game.player().equipment();
        if eq.is_equipped(id) {
            continue;
        }
        if eq.is_owned(id) {
            return game.equip(equipment(id).key).ok();
        }
        let price = shop_listing()
            .find(|(item, _, _)| *item == ItemRef::Equipment(id))
            .map(|(_, _, price)| price)?;
        if game.player().currency() >= price {
            return game.buy(equipment(id).key).ok();
        }
        break;
    }

    if game.player().consumable_count(ConsumableId::SpicySoup) < 3
        && game.player().currency() >= 60
    {
        return game.buy("spicy_soup").ok();
    }
    None
}

fn direction_towards_home(game: &Game<StdRng>) -> Direction {
    let (hx, hy) = game.map().home_position();
    direction_towards(game, hx, hy)
}

fn direction_towards_unexplored(game: &Game<StdRng>) -> Direction {
    let pos = game.player().position;
    let target = game
        .map()
        .regions()
        .filter(|r| !r.explored)
        .min_by_key(|r| r.x.abs_diff(pos.x) + r.y.abs_diff(pos.y))
        .map(|r| (r.x, r.y));
    match target {
        Some((x, y)) => direction_towards(game, x, y),
        None => Direction::Right,
    }
}

fn direction_towards(game: &Game<StdRng>, x: usize, y: usize) -> Direction {
    let pos = game.player().position;
    if x > pos.x {
        Direction::Right
    } else if x < pos.x {
        Direction::Left
    } else if y > pos.y {
        Direction::Down
    } else {
        Direction::Up
    }
}

fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    builder.filter_level(level);
    builder.init();
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        turns: 500,
        seed: None,
        verbosity: 0,
        json: false,
        quiet: false,
        config_path: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-t" | "--turns" => {
                if i + 1 < args.len() {
                    options.turns = args[i + 1].parse().unwrap_or(500);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    options.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    options.config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "-v" | "--verbose" => options.verbosity += 1,
            "-vv" => options.verbosity += 2,
            "-q" | "--quiet" => options.quiet = true,
            "--json" => {
                options.json = true;
                options.quiet = true;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("autoplay {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    options
}

fn print_help() {
    println!("Wayfarer autoplay");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin autoplay -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -t, --turns <N>     Commands to issue (default: 500)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -c, --config <F>    JSON game config (missing keys use defaults)");
    println!("    -v, --verbose       Log engine events (-vv for per-round detail)");
    println!("    -q, --quiet         Only print the final summary");
    println!("    --json              Print the final status as JSON");
    println!("    -V, --version       Print version");
    println!("    -h, --help          Show this help");
}

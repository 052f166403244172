//! Race autopiloted cars around a track file.
//!
//! Set `RUST_LOG=debug` to follow route planning and per-turn decisions.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use racetrack_core::{Point, Race, Track, TurnOutcome};
use racetrack_paths::SearchCosts;
use racetrack_pilot::{MotionPlanner, PlannerConfig};

#[derive(Parser, Debug)]
#[command(name = "racetrack")]
#[command(about = "Race autopiloted cars around a text track")]
struct Args {
    /// Track file: walls, spaces, finish arrows `^ v < >` and starts `1`-`9`
    track: PathBuf,

    /// Cars to autopilot, by start number (default: all). Other cars coast.
    #[arg(short, long = "car", value_delimiter = ',')]
    cars: Vec<usize>,

    /// Stop after this many turns without a winner
    #[arg(long, default_value_t = 500)]
    max_turns: usize,

    /// Search cost of a cell next to a wall
    #[arg(long)]
    near_wall_cost: Option<f64>,

    /// Search penalty for changing direction
    #[arg(long)]
    direction_penalty: Option<f64>,

    /// Print the track after every turn
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn costs(&self) -> SearchCosts {
        let mut costs = SearchCosts::default();
        if let Some(c) = self.near_wall_cost {
            costs = costs.with_near_wall(c);
        }
        if let Some(p) = self.direction_penalty {
            costs = costs.with_direction_penalty(p);
        }
        costs
    }
}

/// One planner per car; `None` for cars that only coast.
fn pilots(args: &Args, race: &Race) -> Result<Vec<Option<MotionPlanner>>> {
    let count = race.cars().len();
    if let Some(&bad) = args.cars.iter().find(|&&c| c == 0 || c > count) {
        bail!("no car {bad} on this track (cars 1-{count})");
    }
    let costs = args.costs();
    let pilots = race
        .cars()
        .iter()
        .enumerate()
        .map(|(i, car)| {
            let driven = args.cars.is_empty() || args.cars.contains(&(i + 1));
            driven.then(|| {
                let planner = MotionPlanner::plan_with(
                    race.track(),
                    car.position,
                    costs,
                    PlannerConfig::default(),
                );
                if planner.target().is_none() {
                    info!("car {} has no route to the finish", i + 1);
                }
                planner
            })
        })
        .collect();
    Ok(pilots)
}

fn run(args: &Args) -> Result<()> {
    let text = std::fs::read_to_string(&args.track)
        .with_context(|| format!("reading track {}", args.track.display()))?;
    let track: Track = text
        .parse()
        .with_context(|| format!("parsing track {}", args.track.display()))?;
    let mut race = Race::new(track);
    let mut pilots = pilots(args, &race)?;

    let mut turns = 0;
    while !race.is_over() && turns < args.max_turns {
        let idx = race.current();
        let Some(&car) = race.car(idx) else {
            break;
        };
        let accel = match pilots.get_mut(idx).and_then(Option::as_mut) {
            Some(planner) => planner.choose_acceleration(race.track(), car.position, car.velocity),
            None => Point::ZERO,
        };
        if let TurnOutcome::Crashed(at) = race.do_turn(accel) {
            println!("car {} crashed at {at}", idx + 1);
        }
        turns += 1;
        if args.verbose {
            println!("turn {turns}\n{race}");
        }
    }

    println!("{race}");
    match race.winner() {
        Some(w) => println!("car {} wins after {turns} turns", w + 1),
        None if race.is_over() => println!("every car crashed"),
        None => println!("no winner after {turns} turns"),
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let args = Args::parse();
    run(&args)
}

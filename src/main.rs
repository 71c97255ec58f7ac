use docopt::Docopt;
use error_chain::bail;
use maze_chase::{
    cells::{CellState, CompassPrimary},
    config::{SimulationConfig, SimulationConfigBuilder},
    entities::Entity,
    grid::Grid,
    grids,
    pathing,
    simulation::{Outcome, Simulation},
    units::GridDimension,
};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    time::{Duration, Instant},
};

const USAGE: &str = "Maze Chase

Usage:
    maze_chase_driver -h | --help
    maze_chase_driver show [--size=<n>] [--seed=<n>] [--text-out=<path>] [--save-edges=<path>]
    maze_chase_driver play [--size=<n>] [--enemies=<n>] [--tick-ms=<ms>] [--seed=<n>]
    maze_chase_driver autoplay [--size=<n>] [--enemies=<n>] [--tick-ms=<ms>] [--seed=<n>] [--moves-per-tick=<n>]

Options:
    -h --help               Show this screen.
    --size=<n>              The maze is n * n cells [default: 16].
    --enemies=<n>           Number of enemies roaming the maze [default: 4].
    --tick-ms=<ms>          Milliseconds between enemy moves [default: 2000].
    --seed=<n>              Seed every random decision so a session can be replayed.
    --text-out=<path>       Write the maze drawing to a file instead of the terminal.
    --save-edges=<path>     Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --moves-per-tick=<n>    Player moves made for each enemy move when autoplaying [default: 2].

Playing:
    Enter w, a, s or d to move up, left, down or right and q to quit. An empty line just lets
    time pass. Reach E without meeting an attacking enemy (X). Passive enemies (x) are harmless.
";

#[derive(Debug, Deserialize)]
struct ChaseArgs {
    cmd_show: bool,
    cmd_play: bool,
    cmd_autoplay: bool,
    flag_size: usize,
    flag_enemies: usize,
    flag_tick_ms: u64,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_save_edges: String,
    flag_moves_per_tick: u32,
}

mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types.
    // ResultExt adds the `chain_err` trait method.
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() {
    if let Err(ref e) = run() {
        eprintln!("error: {}", e);
        for cause in e.iter().skip(1) {
            eprintln!("caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {

    let args: ChaseArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    if args.flag_size == 0 {
        bail!("The maze needs at least one cell, --size must be positive.");
    }

    let config = SimulationConfigBuilder::new()
        .dimension(GridDimension(args.flag_size))
        .enemy_count(args.flag_enemies)
        .enemy_tick(Duration::from_millis(args.flag_tick_ms))
        .seed(args.flag_seed)
        .build();

    if args.cmd_show {
        show(&config, &args)
    } else if args.cmd_play {
        play(config)
    } else if args.cmd_autoplay {
        if args.flag_moves_per_tick == 0 {
            bail!("--moves-per-tick must be positive.");
        }
        autoplay(config, args.flag_moves_per_tick)
    } else {
        Ok(())
    }
}

fn show(config: &SimulationConfig, args: &ChaseArgs) -> Result<()> {

    let maze_grid = match config.seed {
        Some(seed) => grids::seeded_maze(config.dimension, seed),
        None => grids::new_maze(config.dimension),
    };

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    if args.flag_text_out.is_empty() {
        println!("{}", maze_grid);
    } else {
        write_text_to_file(&format!("{}", maze_grid), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

/// Each line read from stdin is one iteration of the game loop. Time passes between lines, so
/// the enemies keep moving however slowly the player types.
fn play(config: SimulationConfig) -> Result<()> {

    let mut session = Simulation::new(config);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut last_poll = Instant::now();

    println!("{}", session);

    while let Some(line) = lines.next() {
        let line = line.chain_err(|| "Failed to read a move from stdin")?;
        let input = match line.trim() {
            "q" => break,
            "w" => Some(CompassPrimary::North),
            "d" => Some(CompassPrimary::East),
            "s" => Some(CompassPrimary::South),
            "a" => Some(CompassPrimary::West),
            _ => None,
        };

        let now = Instant::now();
        let outcome = session.step(input, now.duration_since(last_poll));
        last_poll = now;

        println!("{}", session);
        if outcome == Outcome::InProgress {
            continue;
        }

        print_outcome(outcome);
        println!("Play again? (y/n)");
        match lines.next() {
            Some(answer) => {
                if answer.chain_err(|| "Failed to read from stdin")?.trim() != "y" {
                    break;
                }
            }
            None => break,
        }

        session.restart();
        last_poll = Instant::now();
        println!("{}", session);
    }

    Ok(())
}

/// The player walks the shortest route from start to end, taking `moves_per_tick` steps for
/// every enemy move.
fn autoplay(config: SimulationConfig, moves_per_tick: u32) -> Result<()> {

    let move_time = config.enemy_tick / moves_per_tick;
    let mut session = Simulation::new(config);

    let start = session.player().cell_index();
    let end = session.grid()
        .find_state(CellState::End)
        .ok_or("The maze has no end cell")?;
    let distances = pathing::Distances::for_grid(session.grid(), start)
        .ok_or("The player is not on the maze")?;
    let path = pathing::shortest_path(session.grid(), &distances, end)
        .ok_or("There is no route from start to end")?;
    let directions = pathing::path_directions(session.grid(), &path)
        .ok_or("The route crosses a wall")?;

    println!("{}", session);
    println!("Route from {} to {} is {} moves long.", start, end, directions.len());

    let mut outcome = session.evaluate();
    for (moves, direction) in directions.into_iter().enumerate() {
        if outcome != Outcome::InProgress {
            break;
        }
        outcome = session.step(Some(direction), move_time);
        if (moves + 1) % moves_per_tick as usize == 0 {
            println!("{}", session);
        }
    }

    println!("{}", session);
    print_outcome(outcome);
    Ok(())
}

fn print_outcome(outcome: Outcome) {
    match outcome {
        Outcome::Won => println!("You reached the end. You win!"),
        Outcome::Lost { enemy } => println!("Caught by enemy {}. You lose.", enemy),
        Outcome::InProgress => println!("Still running."),
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", maze_grid.size(), maze_grid.links_count()));

    for (src, dst) in maze_grid.iter_links() {
        graph_data.push_str(&format!("{} {}\n", src + 1, dst + 1));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}

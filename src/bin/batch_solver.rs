use clap::Parser;
use eight_puzzle_solver::interrupt;
use eight_puzzle_solver::solver::{create_searcher, rejection_message, SearchParam};
use eight_puzzle_solver::utils::{board_from_digit_str, init_logging, read_puzzle_file};
use std::path::PathBuf;
use std::process::ExitCode;

/// Solve every Eight Puzzle listed in a file and report averages.
///
/// Ctrl-C abandons the puzzle currently being searched and moves on to the next one.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// File with one nine-digit board per line
    puzzle_file: PathBuf,

    /// Search algorithm: random, BFS, DFS, Greedy or A*
    algorithm: String,

    /// Depth limit for random/BFS/DFS (-1 for none), or heuristic h0/h1/h2 for Greedy/A*
    #[clap(allow_hyphen_values = true)]
    param: String,

    /// Seed for the random strategy; puzzle `i` uses `seed + i`
    #[clap(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let param: SearchParam = match args.param.parse() {
        Ok(param) => param,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if create_searcher(&args.algorithm, param).is_none() {
        println!("{}", rejection_message(&args.algorithm, &args.param));
        return ExitCode::FAILURE;
    }
    let puzzles = match read_puzzle_file(&args.puzzle_file) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let flag = interrupt::install_handler();
    let mut solved = 0u64;
    let mut total_moves = 0u64;
    let mut total_tested = 0u64;

    for (i, line) in puzzles.iter().enumerate() {
        let board = match board_from_digit_str(line) {
            Ok(board) => board,
            Err(e) => {
                println!("{}: invalid puzzle ({})", line, e);
                continue;
            }
        };

        // A fresh searcher per puzzle, as statistics are per run.
        let Some(mut searcher) = create_searcher(&args.algorithm, param) else {
            return ExitCode::FAILURE;
        };
        if let Some(seed) = args.seed {
            searcher = searcher.with_seed(seed.wrapping_add(i as u64));
        }
        interrupt::reset(&flag);
        let mut searcher = searcher.with_interrupt(flag.clone());

        let outcome = searcher.find_solution(board);
        if outcome.interrupted {
            println!("{}: search terminated", line);
            continue;
        }
        match outcome.solution {
            None => println!("{}: no solution", line),
            Some(solution) => {
                println!(
                    "{}: {} moves, {} states tested",
                    line,
                    solution.depth(),
                    outcome.nodes_tested
                );
                solved += 1;
                total_moves += u64::from(solution.depth());
                total_tested += outcome.nodes_tested;
            }
        }
    }

    println!();
    println!("solved {} puzzles", solved);
    if solved != 0 {
        println!(
            "averages: {:.2} moves, {:.2} states tested",
            total_moves as f64 / solved as f64,
            total_tested as f64 / solved as f64
        );
    }
    ExitCode::SUCCESS
}

use clap::Parser;
use eight_puzzle_solver::interrupt;
use eight_puzzle_solver::solver::{create_searcher, rejection_message, SearchParam};
use eight_puzzle_solver::utils::{board_from_digit_str, format_elapsed, init_logging};
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Instant;

/// Solve one Eight Puzzle with state-space search.
///
/// Press Ctrl-C during a long search to stop it and see how many states were tested.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Initial board as nine digits in row-major order, 0 for the blank (e.g. 142358607)
    board: String,

    /// Search algorithm: random, BFS, DFS, Greedy or A*
    algorithm: String,

    /// Depth limit for random/BFS/DFS (-1 for none), or heuristic h0/h1/h2 for Greedy/A*
    #[clap(allow_hyphen_values = true)]
    param: String,

    /// Seed for the random strategy
    #[clap(long)]
    seed: Option<u64>,

    /// Print the moves without asking
    #[clap(long, conflicts_with = "no_prompt")]
    show_moves: bool,

    /// Never ask to print the moves
    #[clap(long)]
    no_prompt: bool,
}

fn ask_show_moves() -> bool {
    print!("Show the moves (y/n)? ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(_) => input.trim() == "y",
        Err(_) => false,
    }
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let board = match board_from_digit_str(&args.board) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Invalid board '{}': {}", args.board, e);
            return ExitCode::FAILURE;
        }
    };
    let param: SearchParam = match args.param.parse() {
        Ok(param) => param,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let Some(mut searcher) = create_searcher(&args.algorithm, param) else {
        println!("{}", rejection_message(&args.algorithm, &args.param));
        return ExitCode::FAILURE;
    };
    if let Some(seed) = args.seed {
        searcher = searcher.with_seed(seed);
    }
    let mut searcher = searcher.with_interrupt(interrupt::install_handler());

    let started = Instant::now();
    let outcome = searcher.find_solution(board);
    let elapsed = started.elapsed();
    // Ctrl-C at the prompt below should end the program.
    interrupt::restore_default();

    if outcome.interrupted {
        println!("Search terminated.");
    }
    println!("{}, {} states", format_elapsed(elapsed), outcome.nodes_tested);

    match outcome.solution {
        None => println!("Failed to find a solution."),
        Some(solution) => {
            println!("Found a solution requiring {} moves.", solution.depth());
            let show = args.show_moves || (!args.no_prompt && ask_show_moves());
            if show {
                print!("{}", solution.render_moves());
            }
        }
    }
    ExitCode::SUCCESS
}

//! The search engine.
//!
//! One loop serves every strategy: pop a node, test it against the goal,
//! otherwise expand it and admit its successors. Admission is the same for all
//! strategies (depth limit, then cycle check); only the [`Frontier`] ordering
//! changes with the [`Strategy`].
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::engine::{Board, Move};
use crate::error::PuzzleError;
use crate::frontier::{Frontier, PriorityRule};
use crate::heuristics::Heuristic;
use crate::node::{NodeId, SearchNode, SearchTree};

/// The five search algorithms and the parameter each one takes.
///
/// Uninformed strategies take an optional depth limit; informed ones take a
/// heuristic and never limit depth.
#[derive(Clone, Copy, Debug)]
pub enum Strategy {
    Random { depth_limit: Option<u32> },
    Bfs { depth_limit: Option<u32> },
    Dfs { depth_limit: Option<u32> },
    Greedy { heuristic: Heuristic },
    AStar { heuristic: Heuristic },
}

impl Strategy {
    pub fn depth_limit(&self) -> Option<u32> {
        match *self {
            Strategy::Random { depth_limit }
            | Strategy::Bfs { depth_limit }
            | Strategy::Dfs { depth_limit } => depth_limit,
            Strategy::Greedy { .. } | Strategy::AStar { .. } => None,
        }
    }

    pub fn heuristic(&self) -> Option<Heuristic> {
        match *self {
            Strategy::Greedy { heuristic } | Strategy::AStar { heuristic } => Some(heuristic),
            _ => None,
        }
    }

    /// The name used when reporting a searcher, e.g. `"BFSearcher"`.
    pub fn searcher_name(&self) -> &'static str {
        match self {
            Strategy::Random { .. } => "Searcher",
            Strategy::Bfs { .. } => "BFSearcher",
            Strategy::Dfs { .. } => "DFSearcher",
            Strategy::Greedy { .. } => "GreedySearcher",
            Strategy::AStar { .. } => "AStarSearcher",
        }
    }

    /// A fresh, empty frontier ordered the way this strategy requires.
    fn frontier(&self, rng: SmallRng) -> Frontier {
        match *self {
            Strategy::Random { .. } => Frontier::random(rng),
            Strategy::Bfs { .. } => Frontier::fifo(),
            Strategy::Dfs { .. } => Frontier::lifo(),
            Strategy::Greedy { heuristic } => Frontier::priority(PriorityRule::Greedy(heuristic)),
            Strategy::AStar { heuristic } => Frontier::priority(PriorityRule::AStar(heuristic)),
        }
    }
}

/// The parameter accompanying an algorithm selector.
#[derive(Clone, Copy, Debug)]
pub enum SearchParam {
    /// `None` means no limit.
    DepthLimit(Option<u32>),
    Heuristic(Heuristic),
}

impl FromStr for SearchParam {
    type Err = PuzzleError;

    /// Parses `"-1"` or a non-negative integer as a depth limit, and `"h0"`,
    /// `"h1"` or `"h2"` as a heuristic.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(heuristic) = Heuristic::by_name(s) {
            return Ok(SearchParam::Heuristic(heuristic));
        }
        match s.parse::<i64>() {
            Ok(-1) => Ok(SearchParam::DepthLimit(None)),
            Ok(n) => u32::try_from(n)
                .map(|limit| SearchParam::DepthLimit(Some(limit)))
                .map_err(|_| PuzzleError::InvalidParam {
                    param: s.to_string(),
                }),
            Err(_) => Err(PuzzleError::InvalidParam {
                param: s.to_string(),
            }),
        }
    }
}

/// The algorithm selectors accepted by [`create_searcher`].
pub const ALGORITHMS: [&str; 5] = ["random", "BFS", "DFS", "Greedy", "A*"];

/// True if `algorithm` is one of [`ALGORITHMS`], whatever its parameter.
pub fn is_algorithm(algorithm: &str) -> bool {
    ALGORITHMS.contains(&algorithm)
}

/// The message a driver prints when [`create_searcher`] returns `None`.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::solver::rejection_message;
///
/// assert_eq!(rejection_message("IDA*", "h1"), "unknown algorithm: IDA*");
/// assert_eq!(
///     rejection_message("A*", "5"),
///     "parameter 5 does not fit algorithm A*"
/// );
/// ```
pub fn rejection_message(algorithm: &str, param: &str) -> String {
    if is_algorithm(algorithm) {
        format!("parameter {} does not fit algorithm {}", param, algorithm)
    } else {
        format!("unknown algorithm: {}", algorithm)
    }
}

/// Creates a searcher for one of the selectors `"random"`, `"BFS"`, `"DFS"`,
/// `"Greedy"` or `"A*"`.
///
/// Returns `None` for an unknown selector, or when the parameter is of the wrong
/// kind (a heuristic for an uninformed search, or a depth limit for an informed
/// one). Callers must check for `None` before searching.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::solver::{create_searcher, SearchParam};
/// use eight_puzzle_solver::heuristics::H1;
///
/// assert!(create_searcher("BFS", SearchParam::DepthLimit(None)).is_some());
/// assert!(create_searcher("A*", SearchParam::Heuristic(H1)).is_some());
/// assert!(create_searcher("IDA*", SearchParam::Heuristic(H1)).is_none());
/// ```
pub fn create_searcher(algorithm: &str, param: SearchParam) -> Option<Searcher> {
    let strategy = match (algorithm, param) {
        ("random", SearchParam::DepthLimit(depth_limit)) => Strategy::Random { depth_limit },
        ("BFS", SearchParam::DepthLimit(depth_limit)) => Strategy::Bfs { depth_limit },
        ("DFS", SearchParam::DepthLimit(depth_limit)) => Strategy::Dfs { depth_limit },
        ("Greedy", SearchParam::Heuristic(heuristic)) => Strategy::Greedy { heuristic },
        ("A*", SearchParam::Heuristic(heuristic)) => Strategy::AStar { heuristic },
        (_, param) if is_algorithm(algorithm) => {
            warn!(algorithm, ?param, "parameter does not fit algorithm");
            return None;
        }
        _ => {
            warn!(algorithm, "unknown algorithm");
            return None;
        }
    };
    Some(Searcher::new(strategy))
}

/// A goal node together with the tree it was found in.
#[derive(Clone, Debug)]
pub struct Solution {
    tree: SearchTree,
    goal: NodeId,
}

impl Solution {
    /// Number of moves from the initial board to the goal.
    pub fn depth(&self) -> u32 {
        self.node().depth()
    }

    pub fn node(&self) -> &SearchNode {
        self.tree.get(self.goal)
    }

    /// The solution path, initial board first. The first entry has no move.
    pub fn moves_to_root(&self) -> Vec<(Option<Move>, Board)> {
        self.tree.moves_to_root(self.goal)
    }

    /// Every node admitted during the search that produced this solution.
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// The step-by-step listing shown by the drivers.
    pub fn render_moves(&self) -> String {
        let mut out = String::new();
        for (last_move, board) in self.moves_to_root() {
            match last_move {
                None => out.push_str("initial state:\n"),
                Some(m) => out.push_str(&format!("move the blank {}:\n", m)),
            }
            out.push_str(&format!("{}\n", board));
        }
        out
    }
}

/// Result of one [`Searcher::find_solution`] run.
#[derive(Debug)]
pub struct SearchOutcome {
    /// `None` when the frontier emptied or the run was interrupted.
    pub solution: Option<Solution>,
    /// Nodes popped and goal-tested during the run.
    pub nodes_tested: u64,
    pub interrupted: bool,
}

/// Runs state-space searches with a fixed strategy.
pub struct Searcher {
    strategy: Strategy,
    rng: SmallRng,
    interrupt: Option<Arc<AtomicBool>>,
    num_tested: u64,
    untested: usize,
}

impl Searcher {
    /// Creates a searcher whose random strategy draws from OS entropy.
    pub fn new(strategy: Strategy) -> Self {
        Searcher {
            strategy,
            rng: SmallRng::from_entropy(),
            interrupt: None,
            num_tested: 0,
            untested: 0,
        }
    }

    /// Reseeds the random source so runs of the random strategy are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Attaches a cancellation flag, checked once per loop iteration.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Nodes tested by the most recent run.
    pub fn num_tested(&self) -> u64 {
        self.num_tested
    }

    fn is_interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::SeqCst))
    }

    /// Admission policy shared by every strategy.
    fn should_add(&self, tree: &SearchTree, candidate: &SearchNode) -> bool {
        if let Some(limit) = self.strategy.depth_limit() {
            if candidate.depth() > limit {
                return false;
            }
        }
        !tree.creates_cycle(candidate)
    }

    /// Searches from `root` until a goal is found, the frontier is exhausted,
    /// or the interrupt flag is raised.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::solver::{Searcher, Strategy};
    ///
    /// let mut searcher = Searcher::new(Strategy::Bfs { depth_limit: None });
    /// let outcome = searcher.find_solution("312045678".parse().unwrap());
    /// let solution = outcome.solution.unwrap();
    /// assert_eq!(solution.depth(), 1);
    /// assert_eq!(outcome.nodes_tested, 2);
    /// ```
    pub fn find_solution(&mut self, root: Board) -> SearchOutcome {
        let mut tree = SearchTree::new(root);
        let mut frontier = self.strategy.frontier(SmallRng::seed_from_u64(self.rng.gen()));
        let root_id = tree.root();
        frontier.push(root_id, tree.get(root_id));
        self.num_tested = 0;

        debug!(
            searcher = self.strategy.searcher_name(),
            root = %root.digit_string(),
            "starting search"
        );

        loop {
            if self.is_interrupted() {
                self.untested = frontier.len();
                warn!(nodes_tested = self.num_tested, "search interrupted");
                return SearchOutcome {
                    solution: None,
                    nodes_tested: self.num_tested,
                    interrupted: true,
                };
            }

            let Some(id) = frontier.pop() else {
                break;
            };
            self.num_tested += 1;

            let node = tree.get(id);
            if node.board().is_goal() {
                self.untested = frontier.len();
                debug!(
                    depth = node.depth(),
                    nodes_tested = self.num_tested,
                    admitted = tree.len(),
                    "goal found"
                );
                return SearchOutcome {
                    solution: Some(Solution { tree, goal: id }),
                    nodes_tested: self.num_tested,
                    interrupted: false,
                };
            }

            let board = *node.board();
            trace!(board = %board.digit_string(), depth = node.depth(), "expanding");
            for (m, next) in board.successors() {
                let candidate = tree.child(id, m, next);
                if self.should_add(&tree, &candidate) {
                    let child = tree.insert(candidate);
                    frontier.push(child, tree.get(child));
                }
            }
        }

        self.untested = 0;
        debug!(nodes_tested = self.num_tested, "frontier exhausted");
        SearchOutcome {
            solution: None,
            nodes_tested: self.num_tested,
            interrupted: false,
        }
    }
}

impl fmt::Display for Searcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} untested, {} tested, ",
            self.strategy.searcher_name(),
            self.untested,
            self.num_tested
        )?;
        match (self.strategy.heuristic(), self.strategy.depth_limit()) {
            (Some(h), _) => write!(f, "heuristic {}", h),
            (None, Some(limit)) => write!(f, "depth limit = {}", limit),
            (None, None) => write!(f, "no depth limit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GOAL;
    use crate::heuristics::{H0, H1, H2};

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn all_strategies() -> Vec<Strategy> {
        vec![
            Strategy::Random { depth_limit: None },
            Strategy::Bfs { depth_limit: None },
            Strategy::Dfs { depth_limit: Some(20) },
            Strategy::Greedy { heuristic: H1 },
            Strategy::AStar { heuristic: H1 },
        ]
    }

    /// Applies `moves` to the goal, giving a board at most `moves.len()` moves away.
    fn scramble(moves: &[Move]) -> Board {
        moves
            .iter()
            .fold(GOAL, |b, &m| b.move_blank(m).expect("scramble move off the grid"))
    }

    /// Checks that a returned path is a legal move sequence ending at the goal.
    fn assert_valid_path(root: Board, solution: &Solution) {
        let path = solution.moves_to_root();
        assert_eq!(path[0], (None, root));
        assert_eq!(path.len() as u32, solution.depth() + 1);
        for pair in path.windows(2) {
            let (_, from) = pair[0];
            let (m, to) = pair[1];
            assert_eq!(from.move_blank(m.unwrap()), Some(to));
        }
        assert!(path.last().unwrap().1.is_goal());
    }

    #[test]
    fn test_goal_root_every_strategy() {
        for strategy in all_strategies() {
            let mut searcher = Searcher::new(strategy).with_seed(1);
            let outcome = searcher.find_solution(GOAL);
            let solution = outcome.solution.expect("goal root must be solved");
            assert_eq!(solution.depth(), 0, "{}", strategy.searcher_name());
            assert_eq!(outcome.nodes_tested, 1);
            assert_eq!(searcher.num_tested(), 1);
        }
    }

    #[test]
    fn test_bfs_one_move_first_successor() {
        let mut searcher = Searcher::new(Strategy::Bfs { depth_limit: None });
        let outcome = searcher.find_solution(board("312045678"));
        let solution = outcome.solution.unwrap();
        assert_eq!(solution.depth(), 1);
        assert_eq!(outcome.nodes_tested, 2);
        assert_eq!(solution.moves_to_root()[1].0, Some(Move::Up));
    }

    #[test]
    fn test_bfs_one_move_second_successor() {
        // successors in order: down, left (goal), right
        let mut searcher = Searcher::new(Strategy::Bfs { depth_limit: None });
        let outcome = searcher.find_solution(board("102345678"));
        assert_eq!(outcome.solution.unwrap().depth(), 1);
        assert_eq!(outcome.nodes_tested, 3);
    }

    #[test]
    fn test_bfs_and_a_star_are_optimal() {
        let walks: [&[Move]; 3] = [
            &[Move::Right, Move::Down, Move::Left, Move::Down, Move::Right, Move::Right],
            &[Move::Down, Move::Down, Move::Right, Move::Up, Move::Right, Move::Down, Move::Left],
            &[Move::Right, Move::Right, Move::Down, Move::Left, Move::Left, Move::Down, Move::Right, Move::Up],
        ];
        for walk in walks {
            let root = scramble(walk);
            let bfs = Searcher::new(Strategy::Bfs { depth_limit: None })
                .find_solution(root)
                .solution
                .unwrap();
            assert!(bfs.depth() as usize <= walk.len());
            assert_valid_path(root, &bfs);

            for heuristic in [H0, H1] {
                let a_star = Searcher::new(Strategy::AStar { heuristic })
                    .find_solution(root)
                    .solution
                    .unwrap();
                assert_eq!(a_star.depth(), bfs.depth(), "A* with {}", heuristic);
                assert_valid_path(root, &a_star);
            }
        }
    }

    #[test]
    fn test_admitted_nodes_are_cycle_free_and_within_limit() {
        let root = scramble(&[Move::Right, Move::Down, Move::Left, Move::Down, Move::Right]);
        for strategy in [
            Strategy::Dfs { depth_limit: Some(7) },
            Strategy::Random { depth_limit: Some(7) },
            Strategy::Bfs { depth_limit: Some(7) },
            Strategy::Greedy { heuristic: H1 },
            Strategy::AStar { heuristic: H1 },
            Strategy::AStar { heuristic: H2 },
        ] {
            let mut searcher = Searcher::new(strategy).with_seed(3);
            let solution = searcher.find_solution(root).solution.unwrap();
            let limit = strategy.depth_limit().unwrap_or(u32::MAX);
            assert!(solution.depth() <= limit);
            assert_valid_path(root, &solution);

            let tree = solution.tree();
            for id in tree.ids() {
                let node = tree.get(id);
                assert!(node.depth() <= limit, "{}", strategy.searcher_name());
                assert!(!tree.creates_cycle(node));
                assert_eq!(tree.ancestors(id).count() as u32, node.depth());
            }
        }
    }

    #[test]
    fn test_greedy_solves() {
        let root = board("142358607");
        for heuristic in [H1, H2] {
            let outcome = Searcher::new(Strategy::Greedy { heuristic }).find_solution(root);
            let solution = outcome.solution.unwrap();
            assert_valid_path(root, &solution);
        }
    }

    #[test]
    fn test_random_is_reproducible() {
        let root = scramble(&[Move::Right, Move::Down, Move::Left]);
        let run = || {
            let mut searcher = Searcher::new(Strategy::Random { depth_limit: Some(5) }).with_seed(99);
            let outcome = searcher.find_solution(root);
            (outcome.nodes_tested, outcome.solution.map(|s| s.moves_to_root()))
        };
        let first = run();
        assert!(first.1.is_some());
        assert_eq!(first, run());
    }

    #[test]
    fn test_unsolvable_with_depth_limit_exhausts() {
        // swapping two tiles flips the permutation parity
        let root = board("021345678");
        let mut searcher = Searcher::new(Strategy::Dfs { depth_limit: Some(4) });
        let outcome = searcher.find_solution(root);
        assert!(outcome.solution.is_none());
        assert!(!outcome.interrupted);
        assert!(outcome.nodes_tested > 1);
        assert_eq!(searcher.to_string(), format!(
            "DFSearcher: 0 untested, {} tested, depth limit = 4",
            outcome.nodes_tested
        ));
    }

    #[test]
    fn test_depth_limit_zero_tests_only_root() {
        let mut searcher = Searcher::new(Strategy::Bfs { depth_limit: Some(0) });
        let outcome = searcher.find_solution(board("312045678"));
        assert!(outcome.solution.is_none());
        assert_eq!(outcome.nodes_tested, 1);
    }

    #[test]
    fn test_interrupt_returns_partial_result() {
        let flag = Arc::new(AtomicBool::new(true));
        let mut searcher =
            Searcher::new(Strategy::Bfs { depth_limit: None }).with_interrupt(Arc::clone(&flag));
        let outcome = searcher.find_solution(board("312045678"));
        assert!(outcome.interrupted);
        assert!(outcome.solution.is_none());
        assert_eq!(outcome.nodes_tested, 0);
        assert_eq!(searcher.to_string(), "BFSearcher: 1 untested, 0 tested, no depth limit");

        flag.store(false, Ordering::SeqCst);
        let outcome = searcher.find_solution(board("312045678"));
        assert!(!outcome.interrupted);
        assert_eq!(outcome.solution.unwrap().depth(), 1);
    }

    #[test]
    fn test_create_searcher_selectors() {
        let depth = SearchParam::DepthLimit(Some(3));
        let heuristic = SearchParam::Heuristic(H1);
        assert!(matches!(
            create_searcher("random", depth).unwrap().strategy(),
            Strategy::Random { depth_limit: Some(3) }
        ));
        assert!(matches!(
            create_searcher("BFS", depth).unwrap().strategy(),
            Strategy::Bfs { .. }
        ));
        assert!(matches!(
            create_searcher("DFS", depth).unwrap().strategy(),
            Strategy::Dfs { .. }
        ));
        assert!(matches!(
            create_searcher("Greedy", heuristic).unwrap().strategy(),
            Strategy::Greedy { .. }
        ));
        assert!(matches!(
            create_searcher("A*", heuristic).unwrap().strategy(),
            Strategy::AStar { .. }
        ));
    }

    #[test]
    fn test_create_searcher_unknown_or_mismatched() {
        assert!(create_searcher("bfs", SearchParam::DepthLimit(None)).is_none());
        assert!(create_searcher("hill-climb", SearchParam::DepthLimit(None)).is_none());
        assert!(create_searcher("BFS", SearchParam::Heuristic(H1)).is_none());
        assert!(create_searcher("A*", SearchParam::DepthLimit(Some(5))).is_none());
    }

    #[test]
    fn test_rejection_message_tells_mismatch_from_unknown() {
        for algorithm in ALGORITHMS {
            assert!(is_algorithm(algorithm));
        }
        assert!(!is_algorithm("astar"));
        assert_eq!(
            rejection_message("BFS", "h2"),
            "parameter h2 does not fit algorithm BFS"
        );
        assert_eq!(rejection_message("Greedy", "-1"), "parameter -1 does not fit algorithm Greedy");
        assert_eq!(rejection_message("bfs", "-1"), "unknown algorithm: bfs");
    }

    #[test]
    fn test_search_param_parse() {
        assert!(matches!("-1".parse::<SearchParam>(), Ok(SearchParam::DepthLimit(None))));
        assert!(matches!("0".parse::<SearchParam>(), Ok(SearchParam::DepthLimit(Some(0)))));
        assert!(matches!("25".parse::<SearchParam>(), Ok(SearchParam::DepthLimit(Some(25)))));
        assert!(matches!("h2".parse::<SearchParam>(), Ok(SearchParam::Heuristic(h)) if h.name() == "h2"));
        assert!("-2".parse::<SearchParam>().is_err());
        assert!("deep".parse::<SearchParam>().is_err());
    }

    #[test]
    fn test_searcher_display() {
        let searcher = create_searcher("A*", SearchParam::Heuristic(H2)).unwrap();
        assert_eq!(searcher.to_string(), "AStarSearcher: 0 untested, 0 tested, heuristic h2");
        let searcher = create_searcher("random", SearchParam::DepthLimit(Some(10))).unwrap();
        assert_eq!(searcher.to_string(), "Searcher: 0 untested, 0 tested, depth limit = 10");
    }

    #[test]
    fn test_render_moves() {
        let solution = Searcher::new(Strategy::Bfs { depth_limit: None })
            .find_solution(board("312045678"))
            .solution
            .unwrap();
        assert_eq!(
            solution.render_moves(),
            "initial state:\n3 1 2 \n_ 4 5 \n6 7 8 \n\nmove the blank up:\n_ 1 2 \n3 4 5 \n6 7 8 \n\n"
        );
    }
}

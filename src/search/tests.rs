use super::*;
use crate::game_state::{GameMove, StateFlags};
use crate::games::{
    Mark, Nim, NimMoves, RandomTree, RandomTreeMoves, Seat, Take, TicTacToe, TicTacToeMoves,
};
use crate::successors::count_positions;

/// Side of a hand-built tree. The root is always `Root`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Root,
    Other,
}

#[derive(Debug, PartialEq)]
struct Node {
    player: Side,
    score: Score,
    terminal: bool,
    /// `None` marks a move that is rejected as illegal.
    children: &'static [Option<usize>],
}

const fn inner(player: Side, score: Score, children: &'static [Option<usize>]) -> Node {
    Node {
        player,
        score,
        terminal: false,
        children,
    }
}

const fn leaf(player: Side, score: Score) -> Node {
    Node {
        player,
        score,
        terminal: true,
        children: &[],
    }
}

/// A position in a hand-built tree; `id` is `None` for the illegal state.
#[derive(Clone, Copy, Debug, PartialEq)]
struct TreeState {
    tree: &'static [Node],
    id: Option<usize>,
}

impl TreeState {
    fn root(tree: &'static [Node]) -> Self {
        Self { tree, id: Some(0) }
    }

    fn node(&self) -> Option<&'static Node> {
        self.id.map(|id| &self.tree[id])
    }
}

impl GameState for TreeState {
    type Player = Side;

    fn initial() -> Self {
        Self::root(CUTOFF_TREE)
    }

    fn score(&self) -> Score {
        self.node().map_or(0, |node| node.score)
    }

    fn flags(&self) -> StateFlags {
        match self.node() {
            None => StateFlags::ILLEGAL,
            Some(node) if node.terminal => StateFlags::TERMINAL,
            Some(_) => StateFlags::NONE,
        }
    }

    fn player(&self) -> Side {
        self.node().map_or(Side::Root, |node| node.player)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Edge(usize);

impl GameMove for Edge {
    type State = TreeState;

    fn successor(&self, state: &TreeState) -> TreeState {
        let id = state
            .node()
            .filter(|node| !node.terminal)
            .and_then(|node| node.children.get(self.0).copied().flatten());
        TreeState {
            tree: state.tree,
            id,
        }
    }
}

struct TreeMoves;

impl MoveGenerator<TreeState> for TreeMoves {
    type Move = Edge;

    fn candidate(&self, state: &TreeState, index: usize) -> Edge {
        let count = state.node().map_or(0, |node| node.children.len());
        Edge(index % count.max(1))
    }
}

// Root picks among three min nodes. The second is refuted by its first leaf and the
// third by its last, so alpha-beta skips two leaves.
static CUTOFF_TREE: &[Node] = &[
    inner(Side::Root, 0, &[Some(1), Some(2), Some(3)]),
    inner(Side::Other, 0, &[Some(4), Some(5), Some(6)]),
    inner(Side::Other, 0, &[Some(7), Some(8), Some(9)]),
    inner(Side::Other, 0, &[Some(10), Some(11), Some(12)]),
    leaf(Side::Root, 3),
    leaf(Side::Root, 12),
    leaf(Side::Root, 8),
    leaf(Side::Root, 2),
    leaf(Side::Root, 4),
    leaf(Side::Root, 6),
    leaf(Side::Root, 14),
    leaf(Side::Root, 5),
    leaf(Side::Root, 2),
];

// Children 1 and 2 both reach 5, at any depth; the first one must be chosen.
static TIE_TREE: &[Node] = &[
    inner(Side::Root, 0, &[Some(1), Some(2), Some(3)]),
    inner(Side::Other, -5, &[Some(4), Some(5)]),
    leaf(Side::Root, 5),
    leaf(Side::Root, 1),
    leaf(Side::Root, 5),
    leaf(Side::Root, 7),
];

// Child 1 is live but every move from it is illegal. Its own score, credited to the
// opponent, is worth 4 to the root and beats the terminal 3.
static LIVE_LEAF_TREE: &[Node] = &[
    inner(Side::Root, 0, &[None, Some(1), Some(2)]),
    inner(Side::Other, -4, &[None, None]),
    leaf(Side::Root, 3),
];

static ALL_ILLEGAL_TREE: &[Node] = &[inner(Side::Root, 0, &[None, None, None])];

// Terminal scores are credited to different players: 10 for the opponent is -10 for
// the root, so the root prefers its own -5.
static PERSPECTIVE_TREE: &[Node] = &[
    inner(Side::Root, 0, &[Some(1), Some(2)]),
    leaf(Side::Other, 10),
    leaf(Side::Root, -5),
];

// The root player moves twice in a row through child 1, which then maximizes.
static EXTRA_TURN_TREE: &[Node] = &[
    inner(Side::Root, 0, &[Some(1), Some(2)]),
    inner(Side::Root, 7, &[Some(3), Some(4)]),
    leaf(Side::Root, 6),
    leaf(Side::Root, 1),
    leaf(Side::Root, 9),
];

// Child 1 looks good on its own score but only leads to a 0. A depth of zero trusts
// the score, any deeper search sees through it.
static HORIZON_TREE: &[Node] = &[
    inner(Side::Root, 0, &[Some(1), Some(2)]),
    inner(Side::Other, -7, &[Some(3)]),
    leaf(Side::Root, 5),
    leaf(Side::Root, 0),
];

// Both children are the worst outcome for the root: its own `Score::MIN` is read as
// `-Score::MAX`, which is also what the opponent's `Score::MAX` is worth.
static ROOT_WORST_TREE: &[Node] = &[
    inner(Side::Root, 0, &[Some(1), Some(2)]),
    leaf(Side::Root, Score::MIN),
    leaf(Side::Other, Score::MAX),
];

// The opponent's `Score::MIN` and `Score::MIN + 1` are both worth `Score::MAX`.
static OPPONENT_WORST_TREE: &[Node] = &[
    inner(Side::Root, 0, &[Some(1), Some(2)]),
    leaf(Side::Other, Score::MIN),
    leaf(Side::Other, Score::MIN + 1),
];

fn run<S, G>(config: SearchConfig, move_generator: &G, state: &S) -> (S, SearchContext)
where
    S: GameState,
    G: MoveGenerator<S>,
{
    let mut context = SearchContext::new(config);
    let child = search(&mut context, move_generator, state).unwrap();
    (child, context)
}

fn chosen(tree: &'static [Node], config: SearchConfig) -> Option<usize> {
    run(config, &TreeMoves, &TreeState::root(tree)).0.id
}

fn all_configs() -> Vec<SearchConfig> {
    let mut configs = vec![SearchConfig::naive(), SearchConfig::pruned()];
    for plies in 0..4 {
        configs.push(SearchConfig::depth_bounded(Depth::new(plies)));
        configs.push(SearchConfig::pruned_depth_bounded(Depth::new(plies)));
    }
    configs
}

#[test]
fn test_cutoff_tree_best_move() {
    for config in all_configs() {
        assert_eq!(chosen(CUTOFF_TREE, config), Some(1), "{:?}", config);
    }

    let (_, context) = run(SearchConfig::naive(), &TreeMoves, &TreeState::root(CUTOFF_TREE));
    assert_eq!(context.last_score(), Some(3));
}

#[test]
fn test_pruning_skips_refuted_leaves() {
    let root = TreeState::root(CUTOFF_TREE);
    let (_, naive) = run(SearchConfig::naive(), &TreeMoves, &root);
    let (_, pruned) = run(SearchConfig::pruned(), &TreeMoves, &root);

    assert_eq!(naive.searched_position_count(), 12);
    assert_eq!(naive.cutoff_count(), 0);
    assert_eq!(pruned.searched_position_count(), 10);
    assert_eq!(pruned.cutoff_count(), 2);
    assert_eq!(pruned.last_score(), naive.last_score());
}

#[test]
fn test_ties_go_to_first_child() {
    for config in all_configs() {
        assert_eq!(chosen(TIE_TREE, config), Some(1), "{:?}", config);
    }

    let mut context = SearchContext::with_parallel(SearchConfig::pruned(), true);
    let child = search(&mut context, &TreeMoves, &TreeState::root(TIE_TREE)).unwrap();
    assert_eq!(child.id, Some(1));
}

#[test]
fn test_live_state_without_legal_children_is_a_leaf() {
    for config in all_configs() {
        assert_eq!(chosen(LIVE_LEAF_TREE, config), Some(1), "{:?}", config);
    }

    let (_, context) = run(SearchConfig::naive(), &TreeMoves, &TreeState::root(LIVE_LEAF_TREE));
    assert_eq!(context.last_score(), Some(4));
    // One illegal root child and two below the live leaf.
    assert_eq!(context.illegal_count(), 3);
}

#[test]
fn test_all_illegal_children_is_an_error() {
    let root = TreeState::root(ALL_ILLEGAL_TREE);
    assert_eq!(search_naive(&TreeMoves, &root).unwrap_err(), SearchError::NoAvailableMoves);
    assert_eq!(search_prune(&TreeMoves, &root).unwrap_err(), SearchError::NoAvailableMoves);
    assert_eq!(search_depth(&TreeMoves, &root, 2).unwrap_err(), SearchError::NoAvailableMoves);

    let mut context = SearchContext::with_parallel(SearchConfig::naive(), true);
    assert_eq!(
        search(&mut context, &TreeMoves, &root).unwrap_err(),
        SearchError::NoAvailableMoves
    );
    assert_eq!(context.illegal_count(), 3);
}

#[test]
fn test_scores_follow_credited_player() {
    for config in all_configs() {
        assert_eq!(chosen(PERSPECTIVE_TREE, config), Some(2), "{:?}", config);
        assert_eq!(chosen(EXTRA_TURN_TREE, config), Some(1), "{:?}", config);
    }
}

#[test]
fn test_extreme_scores_negate_symmetrically() {
    for config in all_configs() {
        assert_eq!(chosen(ROOT_WORST_TREE, config), Some(1), "{:?}", config);
        assert_eq!(chosen(OPPONENT_WORST_TREE, config), Some(1), "{:?}", config);
    }

    let (_, context) = run(SearchConfig::pruned(), &TreeMoves, &TreeState::root(ROOT_WORST_TREE));
    assert_eq!(context.last_score(), Some(-Score::MAX));

    let (_, context) = run(
        SearchConfig::naive(),
        &TreeMoves,
        &TreeState::root(OPPONENT_WORST_TREE),
    );
    assert_eq!(context.last_score(), Some(Score::MAX));
}

#[test]
fn test_depth_bound_uses_state_score() {
    assert_eq!(chosen(HORIZON_TREE, SearchConfig::depth_bounded(Depth::ZERO)), Some(1));
    assert_eq!(
        chosen(HORIZON_TREE, SearchConfig::pruned_depth_bounded(Depth::ZERO)),
        Some(1)
    );
    assert_eq!(chosen(HORIZON_TREE, SearchConfig::depth_bounded(Depth::new(1))), Some(2));
    assert_eq!(chosen(HORIZON_TREE, SearchConfig::naive()), Some(2));
}

#[test]
fn test_negative_depth_is_rejected() {
    let state = Nim::with_pile(5);
    assert_eq!(
        search_depth(&NimMoves, &state, -1).unwrap_err(),
        SearchError::NegativeDepth(-1)
    );
    assert_eq!(
        search_prune_depth(&NimMoves, &state, -3).unwrap_err(),
        SearchError::NegativeDepth(-3)
    );
}

#[test]
fn test_terminal_and_illegal_roots_have_no_moves() {
    let terminal = Take(3).successor(&Nim::with_pile(3));
    assert!(terminal.is_terminal());
    assert_eq!(search_naive(&NimMoves, &terminal).unwrap_err(), SearchError::NoAvailableMoves);
    assert_eq!(search_depth(&NimMoves, &terminal, 3).unwrap_err(), SearchError::NoAvailableMoves);
    assert_eq!(
        search_prune(&NimMoves, &Nim::illegal()).unwrap_err(),
        SearchError::NoAvailableMoves
    );
}

#[test]
fn test_nim_takes_to_multiple_of_four() {
    for pile in 1..=12 {
        let state = Nim::with_pile(pile);
        let (child, context) = run(SearchConfig::naive(), &NimMoves, &state);

        if pile % 4 == 0 {
            // Every move loses; the first one is kept.
            assert_eq!(child.pile(), pile - 1, "pile {}", pile);
            assert_eq!(context.last_score(), Some(-1), "pile {}", pile);
        } else {
            assert_eq!(child.pile() % 4, 0, "pile {}", pile);
            assert_eq!(context.last_score(), Some(1), "pile {}", pile);
        }
    }
}

#[test]
fn test_pruned_matches_naive_on_nim() {
    for pile in 1..=12 {
        let state = Nim::with_pile(pile);
        let (naive, naive_context) = run(SearchConfig::naive(), &NimMoves, &state);
        let (pruned, pruned_context) = run(SearchConfig::pruned(), &NimMoves, &state);

        assert_eq!(naive, pruned, "pile {}", pile);
        assert_eq!(naive_context.last_score(), pruned_context.last_score());
        assert!(pruned_context.searched_position_count() <= naive_context.searched_position_count());
    }
}

#[test]
fn test_naive_visits_every_position() {
    for pile in 1..=10 {
        let state = Nim::with_pile(pile);
        let (_, context) = run(SearchConfig::naive(), &NimMoves, &state);
        assert_eq!(
            context.searched_position_count(),
            count_positions(&NimMoves, &state, u8::MAX)
        );
    }
}

#[test]
fn test_strategies_agree_on_random_trees() {
    for seed in 0..40 {
        let root = RandomTree::new(seed, 4, 6);
        let (naive, naive_context) = run(SearchConfig::naive(), &RandomTreeMoves, &root);
        let (pruned, pruned_context) = run(SearchConfig::pruned(), &RandomTreeMoves, &root);
        let deep = search_depth(&RandomTreeMoves, &root, 10).unwrap();

        assert_eq!(naive, pruned, "seed {}", seed);
        assert_eq!(naive, deep, "seed {}", seed);
        assert_eq!(naive_context.last_score(), pruned_context.last_score());
        assert_eq!(
            naive_context.searched_position_count(),
            count_positions(&RandomTreeMoves, &root, u8::MAX)
        );
        assert!(pruned_context.searched_position_count() <= naive_context.searched_position_count());
    }
}

#[test]
fn test_pruned_depth_matches_depth_on_random_trees() {
    for seed in 0..25 {
        let root = RandomTree::new(seed, 5, 6);
        for depth in 0..5 {
            let bounded = search_depth(&RandomTreeMoves, &root, depth).unwrap();
            let pruned = search_prune_depth(&RandomTreeMoves, &root, depth).unwrap();
            assert_eq!(bounded, pruned, "seed {}, depth {}", seed, depth);
        }
    }
}

#[test]
fn test_parallel_matches_sequential() {
    for seed in 0..20 {
        let root = RandomTree::new(seed, 5, 5);
        for config in all_configs() {
            let (sequential, sequential_context) = run(config, &RandomTreeMoves, &root);

            let mut context = SearchContext::with_parallel(config, true);
            let parallel = search(&mut context, &RandomTreeMoves, &root).unwrap();

            assert_eq!(sequential, parallel, "seed {}, {:?}", seed, config);
            assert_eq!(sequential_context.last_score(), context.last_score());
        }
    }
}

#[test]
fn test_tictactoe_takes_immediate_win() {
    // The winning cell is the last open one in enumeration order.
    let state: TicTacToe = ".../oo./xx.".parse().unwrap();
    for config in all_configs() {
        let (child, context) = run(config, &TicTacToeMoves, &state);
        assert_eq!(child.get(2, 2), Some(Mark::X), "{:?}", config);
        assert!(child.is_terminal());
        assert_eq!(context.last_score(), Some(1));
    }
}

#[test]
fn test_tictactoe_pruned_matches_naive_midgame() {
    for position in ["x../.o./...", "x../..o/...", ".x./.../..o", "xo./.../..."] {
        let state: TicTacToe = position.parse().unwrap();
        let naive = search_naive(&TicTacToeMoves, &state).unwrap();
        let pruned = search_prune(&TicTacToeMoves, &state).unwrap();
        assert_eq!(naive, pruned, "{}", position);
    }
}

#[test]
fn test_tictactoe_perfect_play_is_a_draw() {
    let mut context = SearchContext::new(SearchConfig::pruned());
    let states = play_out(&mut context, &TicTacToeMoves, &TicTacToe::initial()).unwrap();

    let last = states.last().unwrap();
    assert!(last.is_terminal());
    assert_eq!(last.score(), 0);
    assert_eq!(states.len(), 10);
}

#[test]
fn test_play_out_nim_winner_moves_first() {
    let mut context = SearchContext::new(SearchConfig::naive());
    let states = play_out(&mut context, &NimMoves, &Nim::with_pile(9)).unwrap();

    let last = states.last().unwrap();
    assert!(last.is_terminal());
    assert_eq!(last.player(), Seat::First);
    assert_eq!(last.score(), 1);
}

#[test]
fn test_play_out_from_terminal_state() {
    let mut context = SearchContext::default();
    let terminal = Take(2).successor(&Nim::with_pile(2));
    let states = play_out(&mut context, &NimMoves, &terminal).unwrap();
    assert_eq!(states, vec![terminal]);
}

#[test]
fn test_play_out_stops_on_live_leaf() {
    // From child 1 of the live-leaf tree nothing is legal.
    let mut context = SearchContext::new(SearchConfig::naive());
    let start = Edge(1).successor(&TreeState::root(LIVE_LEAF_TREE));
    let states = play_out(&mut context, &TreeMoves, &start).unwrap();
    assert_eq!(states, vec![start]);
}

#[test]
fn test_stats_reset_between_searches() {
    let mut context = SearchContext::new(SearchConfig::naive());
    let state = Nim::with_pile(6);
    search(&mut context, &NimMoves, &state).unwrap();
    let first = context.searched_position_count();
    search(&mut context, &NimMoves, &state).unwrap();
    assert_eq!(context.searched_position_count(), first);
    assert!(context.leaf_count() > 0);
    assert!(context.last_search_duration().is_some());
}

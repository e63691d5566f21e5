use super::board::Board;
use super::types::{Mark, NUM_CELLS, Outcome, SearchResult};
use super::win_detector::outcome;

/// Score of an immediate win. Every reachable score lies in
/// `-WIN_BASE..=WIN_BASE`, since a game never runs past 9 plies.
pub const WIN_BASE: i32 = 10;

/// Deepest ply a search may start from; a game has at most 9 moves.
const MAX_DEPTH: u32 = NUM_CELLS as u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    Exhaustive,
    /// Same cell and score as `Exhaustive`, fewer nodes.
    AlphaBeta,
}

/// Moves the side to play may choose from. A decided board has none even
/// if empty cells remain.
pub fn legal_moves(board: &Board) -> Vec<usize> {
    if outcome(board).is_terminal() {
        Vec::new()
    } else {
        board.available_moves()
    }
}

fn validate_mark(mark: Mark) -> Result<Mark, String> {
    mark.opponent()
        .ok_or_else(|| format!("Mark to move must be X or O, got {:?}", mark))
}

fn validate_depth(depth: u32) -> Result<u32, String> {
    if depth > MAX_DEPTH {
        return Err(format!(
            "Search depth must be at most {}, got {}",
            MAX_DEPTH, depth
        ));
    }
    Ok(depth)
}

// `depth` never exceeds `2 * MAX_DEPTH`: entry points bound the start depth
// and a board holds at most `NUM_CELLS` further moves.
fn terminal_score(outcome: Outcome, maximizing: Mark, depth: u32) -> Option<i32> {
    let depth = depth as i32;
    match outcome {
        Outcome::Ongoing => None,
        Outcome::Draw => Some(0),
        Outcome::XWins | Outcome::OWins => {
            if outcome.winner() == Some(maximizing) {
                Some(WIN_BASE - depth)
            } else {
                Some(-WIN_BASE + depth)
            }
        }
    }
}

struct Search {
    maximizing: Mark,
    mode: SearchMode,
    nodes: u64,
}

impl Search {
    fn new(maximizing: Mark, mode: SearchMode) -> Self {
        Self {
            maximizing,
            mode,
            nodes: 0,
        }
    }

    // `board` is restored to its entry state before returning.
    fn score(
        &mut self,
        board: &mut Board,
        mover: Mark,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if let Some(score) = terminal_score(outcome(board), self.maximizing, depth) {
            return score;
        }

        // marks are checked by every public entry point
        let Some(next) = mover.opponent() else {
            return 0;
        };
        let is_maximizing = mover == self.maximizing;
        let mut best = if is_maximizing { i32::MIN } else { i32::MAX };

        for cell in board.available_moves() {
            board.place(cell, mover);
            let eval = self.score(board, next, depth + 1, alpha, beta);
            board.clear(cell);

            if is_maximizing {
                best = best.max(eval);
                alpha = alpha.max(eval);
            } else {
                best = best.min(eval);
                beta = beta.min(eval);
            }

            if self.mode == SearchMode::AlphaBeta && beta <= alpha {
                break;
            }
        }

        best
    }
}

/// Exhaustive minimax over `board` with `mover` to play, scored for
/// `maximizing`. The board is used as scratch space and handed back
/// unchanged.
pub fn minimax(
    board: &mut Board,
    maximizing: Mark,
    mover: Mark,
    depth: u32,
) -> Result<i32, String> {
    validate_mark(maximizing)?;
    validate_mark(mover)?;
    let depth = validate_depth(depth)?;
    let mut search = Search::new(maximizing, SearchMode::Exhaustive);
    Ok(search.score(board, mover, depth, i32::MIN, i32::MAX))
}

/// Game-theoretic value of `board` for `maximizing` with `mover` to play.
pub fn evaluate(board: &Board, maximizing: Mark, mover: Mark) -> Result<i32, String> {
    let mut scratch = *board;
    minimax(&mut scratch, maximizing, mover, 0)
}

pub fn find_best_move(board: &Board, mark: Mark) -> Result<SearchResult, String> {
    find_best_move_with(board, mark, SearchMode::Exhaustive)
}

/// Picks the highest-scoring move for `mark`, preferring the lowest cell
/// index among equals. On a decided board there is no cell and the score
/// is the terminal score for `mark`.
pub fn find_best_move_with(
    board: &Board,
    mark: Mark,
    mode: SearchMode,
) -> Result<SearchResult, String> {
    let opponent = validate_mark(mark)?;

    let mut scratch = *board;
    let moves = legal_moves(&scratch);
    if moves.is_empty() {
        let score = terminal_score(outcome(&scratch), mark, 0).unwrap_or(0);
        return Ok(SearchResult {
            cell: None,
            score,
            nodes: 0,
        });
    }

    let mut search = Search::new(mark, mode);
    let mut best_cell = None;
    let mut best_score = i32::MIN;

    for cell in moves {
        scratch.place(cell, mark);
        // Only strict improvements replace the current best, so a bounded
        // result at or below `best_score` can never be picked.
        let score = search.score(&mut scratch, opponent, 0, best_score, i32::MAX);
        scratch.clear(cell);

        if score > best_score {
            best_score = score;
            best_cell = Some(cell);
        }
    }

    Ok(SearchResult {
        cell: best_cell,
        score: best_score,
        nodes: search.nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    fn best(text: &str, mark: Mark) -> SearchResult {
        find_best_move(&board(text), mark).unwrap()
    }

    #[test]
    fn test_completes_own_row() {
        let result = best("XX.OO....", Mark::X);
        assert_eq!(result.cell, Some(2));
        assert_eq!(result.score, WIN_BASE);
        assert_eq!(result.nodes, 156);
    }

    #[test]
    fn test_blocks_opponent_row() {
        let result = best("XX.O.....", Mark::O);
        assert_eq!(result.cell, Some(2));
        // X still forks after the block; losing later beats losing now
        assert_eq!(result.score, -7);
    }

    #[test]
    fn test_prefers_faster_win() {
        let b = board("....X.OOX");
        let result = find_best_move(&b, Mark::X).unwrap();
        assert_eq!(result.cell, Some(0));
        assert_eq!(result.score, 10);

        let mut slower = b;
        slower.set(2, Mark::X).unwrap();
        assert_eq!(evaluate(&slower, Mark::X, Mark::O).unwrap(), 8);
    }

    #[test]
    fn test_prefers_slower_loss() {
        let b = board("XX.O.....");
        let mut quick_loss = b;
        quick_loss.set(4, Mark::O).unwrap();
        assert_eq!(evaluate(&quick_loss, Mark::O, Mark::X).unwrap(), -9);

        let mut blocked = b;
        blocked.set(2, Mark::O).unwrap();
        assert_eq!(evaluate(&blocked, Mark::O, Mark::X).unwrap(), -7);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        assert_eq!(best("X........", Mark::O).cell, Some(4));
        assert_eq!(best("....X....", Mark::O).cell, Some(0));
        assert_eq!(best("X...O...X", Mark::O).cell, Some(1));
    }

    #[test]
    fn test_empty_board_is_a_draw_from_the_corner() {
        let result = best(".........", Mark::X);
        assert_eq!(result.cell, Some(0));
        assert_eq!(result.score, 0);
        assert_eq!(result.nodes, 549_945);
    }

    #[test]
    fn test_full_board_has_no_move() {
        let b = board("XOX/XOO/OXX");
        assert_eq!(outcome(&b), Outcome::Draw);
        assert_eq!(
            find_best_move(&b, Mark::X).unwrap(),
            SearchResult {
                cell: None,
                score: 0,
                nodes: 0
            }
        );
        assert_eq!(evaluate(&b, Mark::X, Mark::X).unwrap(), 0);
    }

    #[test]
    fn test_decided_board_with_empty_cells_has_no_move() {
        let b = board("XXX/OO./...");
        assert!(legal_moves(&b).is_empty());
        let lost = find_best_move(&b, Mark::O).unwrap();
        assert_eq!(lost.cell, None);
        assert_eq!(lost.score, -WIN_BASE);
        assert_eq!(lost.nodes, 0);
        let won = find_best_move_with(&b, Mark::X, SearchMode::AlphaBeta).unwrap();
        assert_eq!((won.cell, won.score), (None, WIN_BASE));
        assert_eq!(evaluate(&b, Mark::X, Mark::O).unwrap(), WIN_BASE);
        assert_eq!(evaluate(&b, Mark::O, Mark::O).unwrap(), -WIN_BASE);
    }

    #[test]
    fn test_empty_mark_is_rejected() {
        assert!(find_best_move(&Board::new(), Mark::Empty).is_err());
        assert!(evaluate(&Board::new(), Mark::Empty, Mark::X).is_err());
        assert!(evaluate(&Board::new(), Mark::X, Mark::Empty).is_err());
    }

    #[test]
    fn test_depth_beyond_a_full_game_is_rejected() {
        let mut won = board("XXX/OO./...");
        let before = won;
        assert!(minimax(&mut won, Mark::X, Mark::O, u32::MAX / 2 + 10).is_err());
        assert!(minimax(&mut Board::new(), Mark::X, Mark::X, u32::MAX - 3).is_err());
        assert!(minimax(&mut won, Mark::X, Mark::O, 10).is_err());
        assert_eq!(won, before);

        // a won board at the deepest allowed ply still scores
        assert_eq!(minimax(&mut won, Mark::X, Mark::O, 9).unwrap(), 1);
        assert_eq!(minimax(&mut won, Mark::O, Mark::O, 9).unwrap(), -1);
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let b = board("X.O.X....");
        let before = b;
        let first = find_best_move(&b, Mark::O).unwrap();
        let second = find_best_move(&b, Mark::O).unwrap();
        assert_eq!(first, second);
        assert_eq!(b, before);

        let mut scratch = b;
        minimax(&mut scratch, Mark::O, Mark::O, 0).unwrap();
        assert_eq!(scratch, before);
    }

    #[test]
    fn test_perfect_play_ends_in_draw() {
        for mode in [SearchMode::Exhaustive, SearchMode::AlphaBeta] {
            let mut b = Board::new();
            let mut mark = Mark::X;
            while let Some(cell) = find_best_move_with(&b, mark, mode).unwrap().cell {
                b.set(cell, mark).unwrap();
                mark = mark.opponent().unwrap();
            }
            assert_eq!(outcome(&b), Outcome::Draw, "{:?}\n{}", mode, b);
        }
    }

    #[test]
    fn test_alpha_beta_matches_exhaustive() {
        // every position reachable from a few two-mark openings
        let mut frontier = vec![board("X...O...."), board("XO......."), board(".X..O....")];
        let mut checked = 0;
        while let Some(b) = frontier.pop() {
            let Some(mark) = b.side_to_move() else { continue };
            let full = find_best_move_with(&b, mark, SearchMode::Exhaustive).unwrap();
            let pruned = find_best_move_with(&b, mark, SearchMode::AlphaBeta).unwrap();
            assert_eq!((full.cell, full.score), (pruned.cell, pruned.score), "{}", b);
            assert!(pruned.nodes <= full.nodes);
            checked += 1;
            for cell in legal_moves(&b) {
                let mut child = b;
                child.set(cell, mark).unwrap();
                frontier.push(child);
            }
        }
        assert!(checked > 1000);
    }
}

use super::board::Board;
use super::types::{Mark, Outcome, WinningLine};

/// Every way to get three in a row: rows, columns, then diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

fn line_owner(board: &Board, line: &[usize; 3]) -> Option<Mark> {
    let [a, b, c] = *line;
    let cells = board.cells();
    let mark = cells[a];
    if mark != Mark::Empty && cells[b] == mark && cells[c] == mark {
        Some(mark)
    } else {
        None
    }
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    WINNING_LINES
        .iter()
        .find_map(|line| line_owner(board, line).map(|mark| WinningLine::new(mark, *line)))
}

/// Union of all completed lines, ascending. A single move can finish two
/// lines at once, so this may hold up to five cells.
pub fn winning_cells(board: &Board) -> Vec<usize> {
    let mut cells: Vec<usize> = WINNING_LINES
        .iter()
        .filter(|line| line_owner(board, line).is_some())
        .flatten()
        .copied()
        .collect();
    cells.sort_unstable();
    cells.dedup();
    cells
}

pub fn outcome(board: &Board) -> Outcome {
    if let Some(won) = check_win(board).and_then(Outcome::won_by) {
        return won;
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn test_empty_board_is_ongoing() {
        assert_eq!(outcome(&Board::new()), Outcome::Ongoing);
        assert!(winning_cells(&Board::new()).is_empty());
    }

    #[test]
    fn test_top_row_x_wins() {
        let b = board("XXX/OO./...");
        assert_eq!(outcome(&b), Outcome::XWins);
        assert_eq!(
            check_win_with_line(&b),
            Some(WinningLine::new(Mark::X, [0, 1, 2]))
        );
    }

    #[test]
    fn test_every_line_is_detected() {
        for line in WINNING_LINES {
            let mut b = Board::new();
            for cell in line {
                b.set(cell, Mark::O).unwrap();
            }
            assert_eq!(outcome(&b), Outcome::OWins, "line {:?}", line);
            assert_eq!(winning_cells(&b), line.to_vec());
        }
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let b = board("XOX/XOO/OXX");
        assert!(b.is_full());
        assert_eq!(check_win(&b), None);
        assert_eq!(outcome(&b), Outcome::Draw);
    }

    #[test]
    fn test_win_takes_precedence_over_full_board() {
        let b = board("XXX/OOX/XOO");
        assert!(b.is_full());
        assert_eq!(outcome(&b), Outcome::XWins);
    }

    #[test]
    fn test_double_line_cells_are_merged() {
        // X completes row 0 and column 0 through cell 0
        let b = board("XXX/XOO/XOO");
        assert_eq!(winning_cells(&b), vec![0, 1, 2, 3, 6]);
    }

    #[test]
    fn test_diagonal_o_wins() {
        let b = board("XXO/XO./O..");
        assert_eq!(outcome(&b), Outcome::OWins);
        assert_eq!(winning_cells(&b), vec![2, 4, 6]);
    }
}

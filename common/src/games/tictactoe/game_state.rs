use super::board::Board;
use super::types::{Mark, NUM_CELLS, Outcome};
use super::win_detector::{outcome, winning_cells};

/// The authoritative board of a game in progress. X always moves first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub current_mark: Mark,
    pub status: Outcome,
    pub last_move: Option<usize>,
    pub move_count: usize,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeGameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_mark: Mark::X,
            status: Outcome::Ongoing,
            last_move: None,
            move_count: 0,
        }
    }

    pub fn place_mark(&mut self, cell: usize) -> Result<Outcome, String> {
        if self.status.is_terminal() {
            return Err("Game is already over".to_string());
        }

        if cell >= NUM_CELLS {
            return Err(format!("Cell {} is out of range 0..{}", cell, NUM_CELLS));
        }

        if self.board.get(cell) != Some(Mark::Empty) {
            return Err(format!("Cell {} is already marked", cell));
        }

        self.board.set(cell, self.current_mark)?;
        self.last_move = Some(cell);
        self.move_count += 1;
        self.status = outcome(&self.board);

        if self.status == Outcome::Ongoing {
            self.switch_turn();
        }

        Ok(self.status)
    }

    fn switch_turn(&mut self) {
        if let Some(next) = self.current_mark.opponent() {
            self.current_mark = next;
        }
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn winner(&self) -> Option<Mark> {
        self.status.winner()
    }

    pub fn winning_cells(&self) -> Vec<usize> {
        winning_cells(&self.board)
    }

    pub fn restart(&mut self) {
        *self = Self::new();
    }
}

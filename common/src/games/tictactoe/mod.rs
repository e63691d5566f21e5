mod board;
mod bot_controller;
mod game_state;
mod search;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{BotInput, calculate_minimax_move, calculate_move};
pub use game_state::TicTacToeGameState;
pub use search::{
    SearchMode, WIN_BASE, evaluate, find_best_move, find_best_move_with, legal_moves, minimax,
};
pub use types::{
    BOARD_SIZE, BotType, Mark, NUM_CELLS, Outcome, SearchResult, WinningLine, cell_to_row_col,
};
pub use win_detector::{WINNING_LINES, check_win, check_win_with_line, outcome, winning_cells};

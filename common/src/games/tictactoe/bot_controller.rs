use crate::games::SessionRng;
use super::board::Board;
use super::game_state::TicTacToeGameState;
use super::search::{SearchMode, find_best_move_with, legal_moves};
use super::types::{BotType, Mark};

pub struct BotInput {
    pub board: Board,
    pub current_mark: Mark,
}

impl BotInput {
    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: state.board,
            current_mark: state.current_mark,
        }
    }
}

pub fn calculate_move(bot_type: BotType, input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    if input.current_mark == Mark::Empty {
        return None;
    }
    match bot_type {
        BotType::Random => calculate_random_move(input, rng),
        BotType::Minimax => calculate_minimax_move(input),
    }
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Option<usize> {
    let available_moves = legal_moves(&input.board);
    if available_moves.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..available_moves.len());
    Some(available_moves[idx])
}

pub fn calculate_minimax_move(input: &BotInput) -> Option<usize> {
    find_best_move_with(&input.board, input.current_mark, SearchMode::AlphaBeta)
        .ok()
        .and_then(|result| result.cell)
}

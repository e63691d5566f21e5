use std::io::Write;

use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{
    BotInput, BotType, Outcome, TicTacToeGameState, calculate_move, cell_to_row_col,
};
use tictactoe_common::log;

use crate::play::render_board;

/// Bot against itself from an empty board; prints every move.
pub fn run_self_play<W: Write>(
    bot_type: BotType,
    rng: &mut SessionRng,
    output: &mut W,
) -> Result<Outcome, String> {
    let write_err = |e: std::io::Error| format!("Failed to write output: {}", e);
    let mut state = TicTacToeGameState::new();
    log!("Self-play with {:?} bots, seed {}", bot_type, rng.seed());

    while !state.is_over() {
        let input = BotInput::from_game_state(&state);
        let cell = calculate_move(bot_type, &input, rng)
            .ok_or_else(|| "Bot found no move on an unfinished board".to_string())?;
        state.place_mark(cell)?;

        let (row, col) = cell_to_row_col(cell);
        writeln!(
            output,
            "{} plays {} (row {}, column {})",
            input.current_mark,
            cell + 1,
            row + 1,
            col + 1
        )
        .map_err(write_err)?;
    }

    writeln!(output, "{}", render_board(&state.board)).map_err(write_err)?;
    writeln!(output, "Result: {}", state.status).map_err(write_err)?;
    log!("Self-play finished after {} moves: {}", state.move_count, state.status);
    Ok(state.status)
}

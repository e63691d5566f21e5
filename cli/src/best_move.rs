use std::io::Write;

use tictactoe_common::games::tictactoe::{
    Board, Mark, SearchMode, SearchResult, cell_to_row_col, find_best_move_with, outcome,
};

pub fn parse_mark(value: &str) -> Result<Mark, String> {
    let mut chars = value.trim().chars();
    match (chars.next().and_then(Mark::from_symbol), chars.next()) {
        (Some(mark @ (Mark::X | Mark::O)), None) => Ok(mark),
        _ => Err(format!("Expected X or O, got '{}'", value)),
    }
}

/// Prints the best move for `mark` (or the side inferred from the counts)
/// on the board given as text.
pub fn run_best_move<W: Write>(
    board_text: &str,
    mark: Option<Mark>,
    mode: SearchMode,
    output: &mut W,
) -> Result<SearchResult, String> {
    let write_err = |e: std::io::Error| format!("Failed to write output: {}", e);
    let board: Board = board_text.parse()?;
    let mark = match mark {
        Some(mark) => mark,
        None => board
            .side_to_move()
            .ok_or_else(|| "Cannot tell whose turn it is; pass --mark".to_string())?,
    };

    writeln!(output, "{}", board).map_err(write_err)?;

    let result = find_best_move_with(&board, mark, mode)?;
    match result.cell {
        Some(cell) => {
            let (row, col) = cell_to_row_col(cell);
            writeln!(
                output,
                "{} to move: cell {} (row {}, column {}), score {}, {} nodes",
                mark, cell, row, col, result.score, result.nodes
            )
            .map_err(write_err)?;
        }
        None => {
            writeln!(
                output,
                "No move: {}, score {} for {}",
                outcome(&board),
                result.score,
                mark
            )
            .map_err(write_err)?;
        }
    }
    Ok(result)
}

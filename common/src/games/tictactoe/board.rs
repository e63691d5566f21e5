use std::fmt;
use std::str::FromStr;

use super::types::{BOARD_SIZE, Mark, NUM_CELLS};

/// A 3x3 board in row-major order: cell index = row * 3 + column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; NUM_CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Mark::Empty; NUM_CELLS],
        }
    }

    pub fn from_cells(cells: &[Mark]) -> Result<Self, String> {
        let cells: [Mark; NUM_CELLS] = cells.try_into().map_err(|_| {
            format!(
                "Board must have exactly {} cells, got {}",
                NUM_CELLS,
                cells.len()
            )
        })?;
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[Mark; NUM_CELLS] {
        &self.cells
    }

    pub fn get(&self, cell: usize) -> Option<Mark> {
        self.cells.get(cell).copied()
    }

    pub fn set(&mut self, cell: usize, mark: Mark) -> Result<(), String> {
        let slot = self
            .cells
            .get_mut(cell)
            .ok_or_else(|| format!("Cell {} is out of range 0..{}", cell, NUM_CELLS))?;
        *slot = mark;
        Ok(())
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    /// Empty cells in ascending index order.
    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Mark::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    /// Infers whose turn it is from the mark counts, with X moving first.
    /// `None` when the counts cannot come from a legal game.
    pub fn side_to_move(&self) -> Option<Mark> {
        let x = self.count(Mark::X);
        let o = self.count(Mark::O);
        if x == o {
            Some(Mark::X)
        } else if x == o + 1 {
            Some(Mark::O)
        } else {
            None
        }
    }

    pub(super) fn place(&mut self, cell: usize, mark: Mark) {
        self.cells[cell] = mark;
    }

    pub(super) fn clear(&mut self, cell: usize) {
        self.cells[cell] = Mark::Empty;
    }
}

impl FromStr for Board {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(NUM_CELLS);
        for symbol in s.chars() {
            if symbol.is_whitespace() || symbol == '/' || symbol == '|' {
                continue;
            }
            let mark = Mark::from_symbol(symbol)
                .ok_or_else(|| format!("Unknown board symbol '{}'", symbol))?;
            cells.push(mark);
        }
        Self::from_cells(&cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(BOARD_SIZE).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for mark in chunk {
                write!(f, "{}", mark)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_offers_every_cell() {
        let board = Board::new();
        assert_eq!(board.available_moves(), (0..9).collect::<Vec<_>>());
        assert_eq!(board.side_to_move(), Some(Mark::X));
        assert!(!board.is_full());
    }

    #[test]
    fn test_available_moves_are_ascending_empty_cells() {
        let board: Board = "X.O/.X./O..".parse().unwrap();
        assert_eq!(board.available_moves(), vec![1, 3, 5, 7, 8]);
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        assert!(board.available_moves().is_empty());
        assert!(board.is_full());
    }

    #[test]
    fn test_from_cells_rejects_wrong_size() {
        let err = Board::from_cells(&[Mark::Empty; 8]).unwrap_err();
        assert_eq!(err, "Board must have exactly 9 cells, got 8");
        assert!(Board::from_cells(&[Mark::X; 10]).is_err());
    }

    #[test]
    fn test_parse_accepts_separators_and_lowercase() {
        let board: Board = "x x _ | o o - | . . .".parse().unwrap();
        assert_eq!(board.get(0), Some(Mark::X));
        assert_eq!(board.get(1), Some(Mark::X));
        assert_eq!(board.get(3), Some(Mark::O));
        assert_eq!(board.count(Mark::Empty), 5);
    }

    #[test]
    fn test_parse_rejects_unknown_symbol() {
        let result: Result<Board, _> = "XX?OO....".parse();
        assert_eq!(result.unwrap_err(), "Unknown board symbol '?'");
    }

    #[test]
    fn test_display_is_three_rows() {
        let board: Board = "XX.OO....".parse().unwrap();
        assert_eq!(board.to_string(), "XX.\nOO.\n...");
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_set_out_of_range_fails() {
        let mut board = Board::new();
        assert!(board.set(9, Mark::X).is_err());
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_side_to_move_from_counts() {
        assert_eq!("X........".parse::<Board>().unwrap().side_to_move(), Some(Mark::O));
        assert_eq!("XX.......".parse::<Board>().unwrap().side_to_move(), None);
        assert_eq!("O........".parse::<Board>().unwrap().side_to_move(), None);
    }
}

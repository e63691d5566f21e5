use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use tictactoe_common::games::SessionRng;
use tictactoe_common::games::tictactoe::{
    BOARD_SIZE, Board, BotInput, Mark, NUM_CELLS, Outcome, TicTacToeGameState, calculate_move,
};
use tictactoe_common::log;

use crate::config::{FirstPlayerMode, GameConfig, GameMode};

/// Board with 1-based numbers in the empty cells, as typed by the player.
pub fn render_board(board: &Board) -> String {
    board
        .cells()
        .chunks(BOARD_SIZE)
        .enumerate()
        .map(|(row, chunk)| {
            chunk
                .iter()
                .enumerate()
                .map(|(col, mark)| match mark {
                    Mark::Empty => format!(" {} ", row * BOARD_SIZE + col + 1),
                    mark => format!(" {} ", mark),
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect::<Vec<_>>()
        .join("\n---+---+---\n")
}

enum PlayerCommand {
    Place(usize),
    NewGame,
    Quit,
}

fn parse_command(line: &str) -> Option<PlayerCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Some(PlayerCommand::Quit),
        "n" | "new" => Some(PlayerCommand::NewGame),
        other => other
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=NUM_CELLS).contains(n))
            .map(|n| PlayerCommand::Place(n - 1)),
    }
}

struct PlaySession<'a, W: Write> {
    config: &'a GameConfig,
    rng: &'a mut SessionRng,
    output: &'a mut W,
    state: TicTacToeGameState,
    bot_mark: Option<Mark>,
}

impl<'a, W: Write> PlaySession<'a, W> {
    fn say(&mut self, text: &str) -> Result<(), String> {
        writeln!(self.output, "{}", text).map_err(|e| format!("Failed to write output: {}", e))
    }

    fn pick_bot_mark(&mut self) -> Option<Mark> {
        match self.config.mode {
            GameMode::PvP => None,
            GameMode::VsBot => Some(match self.config.first_player {
                FirstPlayerMode::Human => Mark::O,
                FirstPlayerMode::Bot => Mark::X,
                FirstPlayerMode::Random => {
                    if self.rng.random_bool() {
                        Mark::X
                    } else {
                        Mark::O
                    }
                }
            }),
        }
    }

    fn show_board(&mut self) -> Result<(), String> {
        let rendered = render_board(&self.state.board);
        self.say(&rendered)
    }

    fn start_game(&mut self) -> Result<(), String> {
        self.state.restart();
        self.bot_mark = self.pick_bot_mark();
        log!(
            "New game: mode {:?}, bot {:?} playing {:?}",
            self.config.mode,
            self.config.bot_type,
            self.bot_mark
        );

        match self.bot_mark.and_then(|mark| mark.opponent()) {
            Some(human_mark) => self.say(&format!("New game. You play {}.", human_mark))?,
            None => self.say("New game. X moves first.")?,
        }
        self.show_board()
    }

    fn prompt(&mut self) -> Result<(), String> {
        if self.state.is_over() {
            return self.say("Type 'new' to play again or 'quit' to exit.");
        }
        let text = match self.config.mode {
            GameMode::VsBot => format!("Your move ({}):", self.state.current_mark),
            GameMode::PvP => format!("Player {}'s turn:", self.state.current_mark),
        };
        self.say(&text)
    }

    fn bot_turn(&mut self) -> Result<(), String> {
        self.say("Bot is thinking...")?;
        if self.config.bot_delay_ms > 0 {
            thread::sleep(Duration::from_millis(self.config.bot_delay_ms));
        }

        let input = BotInput::from_game_state(&self.state);
        let cell = calculate_move(self.config.bot_type, &input, self.rng)
            .ok_or_else(|| "Bot found no move on an unfinished board".to_string())?;
        self.state.place_mark(cell)?;
        log!("Bot played {:?} at cell {}", input.current_mark, cell);

        self.say(&format!("Bot plays {}.", cell + 1))?;
        self.show_board()
    }

    fn human_move(&mut self, cell: usize) -> Result<(), String> {
        if self.state.is_over() {
            return self.say("Game is over.");
        }
        match self.state.place_mark(cell) {
            Ok(_) => self.show_board(),
            Err(_) => self.say(&format!("Cell {} is not available.", cell + 1)),
        }
    }

    fn announce_result(&mut self) -> Result<Outcome, String> {
        let status = self.state.status;
        let text = match (status.winner(), self.bot_mark) {
            (Some(winner), Some(bot_mark)) if winner == bot_mark => "You lose.".to_string(),
            (Some(_), Some(_)) => "You win!".to_string(),
            (Some(winner), None) => format!("Player {} wins!", winner),
            (None, _) => "Draw!".to_string(),
        };
        self.say(&text)?;

        let cells = self.state.winning_cells();
        if !cells.is_empty() {
            let listed = cells
                .iter()
                .map(|cell| (cell + 1).to_string())
                .collect::<Vec<_>>()
                .join(", ");
            self.say(&format!("Winning cells: {}", listed))?;
        }

        log!("Game over after {} moves: {}", self.state.move_count, status);
        Ok(status)
    }

    fn run<R: BufRead>(&mut self, input: R) -> Result<Vec<Outcome>, String> {
        let mut finished = Vec::new();
        let mut lines = input.lines();
        self.start_game()?;

        loop {
            if !self.state.is_over() && Some(self.state.current_mark) == self.bot_mark {
                self.bot_turn()?;
                if self.state.is_over() {
                    finished.push(self.announce_result()?);
                }
                continue;
            }

            self.prompt()?;
            let Some(line) = lines.next() else {
                break;
            };
            let line = line.map_err(|e| format!("Failed to read input: {}", e))?;

            match parse_command(&line) {
                Some(PlayerCommand::Quit) => break,
                Some(PlayerCommand::NewGame) => self.start_game()?,
                Some(PlayerCommand::Place(cell)) => {
                    let was_over = self.state.is_over();
                    self.human_move(cell)?;
                    if !was_over && self.state.is_over() {
                        finished.push(self.announce_result()?);
                    }
                }
                None => self.say("Enter a cell 1-9, 'new' or 'quit'.")?,
            }
        }

        Ok(finished)
    }
}

/// Runs games against the configured opponent until the input ends or the
/// player quits. Returns the outcome of every finished game.
pub fn run_play<R: BufRead, W: Write>(
    config: &GameConfig,
    rng: &mut SessionRng,
    input: R,
    output: &mut W,
) -> Result<Vec<Outcome>, String> {
    let mut session = PlaySession {
        config,
        rng,
        output,
        state: TicTacToeGameState::new(),
        bot_mark: None,
    };
    session.run(input)
}

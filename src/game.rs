use std::{thread::sleep, time::{Duration, Instant}};

use crate::{Coords, TermCoords, TermInt};
use crate::clock::Clock;
use crate::error::{ErrorConversion, ErrorType, Result};
use crate::input::{self, Command};
use crate::state::{GameState, RunState, Snapshot, TickOutcome, DOT_SIZE, HEIGHT, WIDTH};
use crate::term::{Glyph, TermManager};

use crossterm::style::Color;

const POLL_INTERVAL_MS: u64 = 5;

const CELLS_X: usize = (WIDTH / DOT_SIZE) as usize;
const CELLS_Y: usize = (HEIGHT / DOT_SIZE) as usize;

// Every cell is two characters wide so it reads as a square
const FRAME_WIDTH: TermInt = CELLS_X as TermInt * 2 + 2;
const FRAME_HEIGHT: TermInt = CELLS_Y as TermInt + 2;
const STATUS_LINES: TermInt = 3;
const STATUS_WIDTH: usize = 24;

const SNAKE_GLYPH: Glyph = Glyph { ch: '█', color: Color::Green };
const FOOD_GLYPH: Glyph = Glyph { ch: '█', color: Color::Red };

const INSTRUCTIONS: &[&str] = &[
    "Snake Lite - Game Instructions",
    "",
    "Welcome to Snake Lite!",
    "Use the arrow keys to move the snake.",
    "Press 'P' to pause/resume the game.",
    "Press 'R' to restart the game.",
    "Avoid the walls and your own tail!",
    "Press 'W' to increase speed.",
    "Press 'S' to decrease speed.",
    "Press Esc or 'Q' to quit.",
    "",
    "Press any key to begin",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Cell {
    Empty,
    Snake,
    Food,
}

pub struct SnakeGame {
    term: TermManager,
    state: GameState,
    clock: Clock,
    origin: TermCoords,
    overlay: Option<RunState>,
}

impl SnakeGame {
    pub fn new(seed: u64) -> Result<Self> {
        let state = GameState::new(seed);
        let clock = Clock::new(state.speed_ms());
        let term = TermManager::new().with_trace_step("opening the terminal")?;
        Ok(SnakeGame { term, state, clock, origin: (0, 0), overlay: None })
    }

    pub fn run(&mut self, skip_intro: bool) -> Result {
        self.initialize().with_trace_step("initialize")?;

        if !skip_intro && !self.show_intro().with_trace_step("show_intro")? {
            log!("Quit from the instructions screen");
            return Ok(());
        }

        self.play().with_trace_step("play")
    }

    pub fn shutdown(&mut self) -> Result {
        self.term.restore()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn initialize(&mut self) -> Result {
        let (w, h) = self.term.get_terminal_size();
        let needed = (FRAME_WIDTH, FRAME_HEIGHT + STATUS_LINES);
        if w < needed.0 || h < needed.1 {
            return Err(ErrorType::TerminalTooSmall { needed, actual: (w, h) }.into());
        }

        self.origin = ((w - needed.0) / 2, (h - needed.1) / 2);
        self.term.setup()
    }

    /// Returns false when the player chose to quit instead of starting.
    fn show_intro(&mut self) -> Result<bool> {
        self.term.clear()?;
        self.term.show_message(INSTRUCTIONS)?;

        let key = self.term.read_key_blocking()?;
        if input::command_for(&key) == Some(Command::Quit) {
            return Ok(false);
        }

        self.term.hide_message()?;
        Ok(true)
    }

    fn play(&mut self) -> Result {
        self.term.clear()?;
        self.term.draw_borders(self.origin, FRAME_WIDTH, FRAME_HEIGHT)?;
        self.overlay = None;

        self.clock.start(Instant::now());
        log!("Game started at {} ms per tick", self.state.speed_ms());
        self.draw()?;

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));
            let mut dirty = false;

            for key_ev in self.term.read_key_events_queue()? {
                match input::command_for(&key_ev) {
                    Some(Command::Quit) => {
                        log!("Quit with score {}", self.state.fruits_eaten());
                        return Ok(());
                    }
                    Some(Command::Turn(dir)) => self.state.set_direction(dir),
                    Some(Command::TogglePause) => {
                        self.state.toggle_pause();
                        log!("Pause toggled, now {:?}", self.state.run_state());
                        dirty = true;
                    }
                    Some(Command::Restart) => {
                        self.restart();
                        dirty = true;
                    }
                    Some(Command::ChangeSpeed(delta)) => {
                        let speed = self.state.change_speed(delta);
                        self.clock.set_interval(speed);
                        log!("Speed set to {} ms per tick", speed);
                        dirty = true;
                    }
                    None => {}
                }
            }

            if self.clock.poll(Instant::now()) {
                let outcome = self.state.tick();
                if outcome.stops_clock() {
                    self.clock.stop();
                }
                if outcome == TickOutcome::Ate {
                    log!("Food eaten, score {}", self.state.fruits_eaten());
                }
                dirty = true;
            }

            if dirty {
                self.draw()?;
            }
        }
    }

    fn restart(&mut self) {
        self.state.reset();
        self.clock.set_interval(self.state.speed_ms());
        self.clock.start(Instant::now());
        log!("Game restarted");
    }

    fn draw(&mut self) -> Result {
        let snap = self.state.snapshot();

        if snap.state == RunState::Running && self.overlay.is_some() {
            self.term.hide_message()?;
            self.overlay = None;
        }

        self.print_board(&snap)?;
        self.print_status(&snap)?;

        match snap.state {
            RunState::Paused if self.overlay != Some(RunState::Paused) => {
                self.term.show_message(&["Paused", "", "Press 'P' to resume", "or Esc to quit"])?;
                self.overlay = Some(RunState::Paused);
            }
            RunState::GameOver if self.overlay != Some(RunState::GameOver) => {
                let score = format!("Score: {}", snap.fruits_eaten);
                let high_score = format!("High Score: {}", snap.high_score);
                self.term.show_message(&[
                    "Game Over",
                    score.as_str(),
                    high_score.as_str(),
                    "",
                    "Press 'R' to play again,",
                    "or Esc to quit.",
                ])?;
                self.overlay = Some(RunState::GameOver);
            }
            _ => {}
        }

        self.term.flush()
    }

    fn print_board(&mut self, snap: &Snapshot) -> Result {
        let cells = layout_board(snap);

        for (i, cell) in cells.iter().enumerate() {
            let (col, row) = ((i % CELLS_X) as TermInt, (i / CELLS_X) as TermInt);
            let pos = (self.origin.0 + 1 + col * 2, self.origin.1 + 1 + row);
            let glyph = match cell {
                Cell::Empty => Glyph::BLANK,
                Cell::Snake => SNAKE_GLYPH,
                Cell::Food => FOOD_GLYPH,
            };
            self.term.print_at(pos, glyph)?;
            self.term.print_at((pos.0 + 1, pos.1), glyph)?;
        }

        Ok(())
    }

    fn print_status(&mut self, snap: &Snapshot) -> Result {
        let lines = [
            format!("Score: {}", snap.fruits_eaten),
            format!("High Score: {}", snap.high_score),
            format!("Speed: {} ms", snap.speed_ms),
        ];

        for (i, line) in lines.iter().enumerate() {
            let pos = (self.origin.0, self.origin.1 + FRAME_HEIGHT + i as TermInt);
            let padded = format!("{:<width$}", line, width = STATUS_WIDTH);
            self.term.print_str_at(pos, &padded, Color::White)?;
        }

        Ok(())
    }
}

/// Board cell holding a pixel position, if it lies on the field.
fn cell_of(pos: Coords) -> Option<(usize, usize)> {
    if pos.0 < 0 || pos.0 >= WIDTH || pos.1 < 0 || pos.1 >= HEIGHT {
        return None;
    }
    Some(((pos.0 / DOT_SIZE) as usize, (pos.1 / DOT_SIZE) as usize))
}

/// Food is drawn over the snake, same as when both share a cell.
fn layout_board(snap: &Snapshot) -> Vec<Cell> {
    let mut cells = vec![Cell::Empty; CELLS_X * CELLS_Y];

    for (col, row) in snap.segments.iter().filter_map(|pos| cell_of(*pos)) {
        cells[row * CELLS_X + col] = Cell::Snake;
    }
    if let Some((col, row)) = cell_of(snap.food) {
        cells[row * CELLS_X + col] = Cell::Food;
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(segments: Vec<Coords>, food: Coords) -> Snapshot {
        Snapshot {
            state: RunState::Running,
            segments,
            food,
            fruits_eaten: 0,
            high_score: 0,
            speed_ms: 120,
        }
    }

    #[test]
    fn test_cell_of_maps_pixels_to_cells() {
        assert_eq!(cell_of((50, 50)), Some((2, 2)));
        assert_eq!(cell_of((10, 590)), Some((0, 29)));
        // Food anchors sit half a cell in and still map to their index
        assert_eq!(cell_of((570, 10)), Some((28, 0)));
        assert_eq!(cell_of((-10, 50)), None);
        assert_eq!(cell_of((600, 50)), None);
    }

    #[test]
    fn test_layout_board_places_snake_and_food() {
        let snap = snapshot(vec![(70, 50), (50, 50), (30, 50)], (410, 410));
        let cells = layout_board(&snap);

        assert_eq!(cells.iter().filter(|c| **c == Cell::Snake).count(), 3);
        assert_eq!(cells[2 * CELLS_X + 3], Cell::Snake);
        assert_eq!(cells[2 * CELLS_X + 1], Cell::Snake);
        assert_eq!(cells[20 * CELLS_X + 20], Cell::Food);
    }

    #[test]
    fn test_layout_board_skips_head_past_wall() {
        let snap = snapshot(vec![(50, -10), (50, 10), (50, 30)], (410, 410));
        let cells = layout_board(&snap);
        assert_eq!(cells.iter().filter(|c| **c == Cell::Snake).count(), 2);
    }

    #[test]
    fn test_frame_fits_board() {
        assert_eq!(FRAME_WIDTH, 62);
        assert_eq!(FRAME_HEIGHT, 32);
    }
}

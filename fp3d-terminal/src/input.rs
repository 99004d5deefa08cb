/// Crossterm events folded into per-tick control state
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use fp3d_core::{InputSource, Key, Vec2};
use std::collections::HashSet;

use crate::renderer::PIXEL_ROWS_PER_CELL;

/// Terminals only report presses (and auto-repeats), so a key counts as
/// held for the tick in which one of its events arrived.
#[derive(Debug, Default)]
pub struct TerminalInput {
    held: HashSet<Key>,
    previous: HashSet<Key>,
    cursor: Vec2,
    wheel: f64,
    clicked: bool,
    quit: bool,
}

pub fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char('w') => Key::Forward,
        KeyCode::Char('s') => Key::Back,
        KeyCode::Char('a') => Key::StrafeLeft,
        KeyCode::Char('d') => Key::StrafeRight,
        KeyCode::Char(' ') => Key::Rise,
        KeyCode::Char('c') => Key::Sink,
        KeyCode::Char('q') => Key::YawLeft,
        KeyCode::Char('e') => Key::YawRight,
        KeyCode::Up => Key::PitchUp,
        KeyCode::Down => Key::PitchDown,
        KeyCode::Char('1') => Key::SnapTilt,
        KeyCode::Char('2') => Key::SnapAngle,
        KeyCode::Enter => Key::Reset,
        _ => return None,
    };
    Some(key)
}

/// Centre of a terminal cell in renderer pixels
pub fn cell_to_pixel(column: u16, row: u16) -> Vec2 {
    let rows = PIXEL_ROWS_PER_CELL as f64;
    Vec2::new(column as f64 + 0.5, (row as f64 + 0.5) * rows)
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start collecting a new tick.
    pub fn begin_tick(&mut self) {
        self.previous = std::mem::take(&mut self.held);
        self.wheel = 0.0;
        self.clicked = false;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) => {
                if *kind == KeyEventKind::Release {
                    return;
                }
                match code {
                    KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => self.quit = true,
                    code => {
                        if let Some(key) = map_key(*code) {
                            self.held.insert(key);
                        }
                    }
                }
            }
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => {
                self.cursor = cell_to_pixel(*column, *row);
                match kind {
                    MouseEventKind::Down(MouseButton::Left) => self.clicked = true,
                    MouseEventKind::ScrollUp => self.wheel += 1.0,
                    MouseEventKind::ScrollDown => self.wheel -= 1.0,
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

impl InputSource for TerminalInput {
    fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Pick => self.clicked,
            key => self.held.contains(&key),
        }
    }

    fn just_pressed(&self, key: Key) -> bool {
        match key {
            Key::Pick => self.clicked,
            key => self.held.contains(&key) && !self.previous.contains(&key),
        }
    }

    fn cursor(&self) -> Vec2 {
        self.cursor
    }

    fn wheel_delta(&self) -> f64 {
        self.wheel
    }
}

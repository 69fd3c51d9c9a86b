use std::io;
use std::sync::mpsc::Receiver;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::orbs::Orb;

/// Control byte a raw terminal delivers for Ctrl+C
pub const CTRL_C: char = '\u{3}';

/// What a single raw character asks the drill to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Orb(Orb),
    Invoke,
    Clear,
    Quit,
    Interrupt,
    Ignored,
}

impl Command {
    pub fn from_char(c: char) -> Self {
        if c == CTRL_C {
            return Command::Interrupt;
        }
        if let Some(orb) = Orb::from_char(c) {
            return Command::Orb(orb);
        }
        match c.to_ascii_uppercase() {
            'R' => Command::Invoke,
            'C' => Command::Clear,
            'X' => Command::Quit,
            _ => Command::Ignored,
        }
    }
}

/// Source of raw, unbuffered characters
pub trait KeySource {
    /// Block until the next character arrives. There is no timeout.
    fn next_char(&mut self) -> io::Result<char>;
}

/// Production source reading key presses through crossterm.
/// Expects the terminal to already be in raw mode.
#[derive(Debug, Default)]
pub struct CrosstermKeySource;

impl CrosstermKeySource {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for CrosstermKeySource {
    fn next_char(&mut self) -> io::Result<char> {
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(c) = key_to_char(&key) {
                    return Ok(c);
                }
            }
        }
    }
}

/// Map a key press to the byte a raw tty would have delivered for it
fn key_to_char(key: &KeyEvent) -> Option<char> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => control_byte(c),
        KeyCode::Char(c) => Some(c),
        KeyCode::Enter => Some('\r'),
        KeyCode::Tab => Some('\t'),
        KeyCode::Backspace => Some('\u{7f}'),
        KeyCode::Esc => Some('\u{1b}'),
        _ => None,
    }
}

/// Ctrl+A is 0x01 through Ctrl+Z at 0x1a
fn control_byte(c: char) -> Option<char> {
    if !c.is_ascii_alphabetic() {
        return None;
    }
    let offset = c.to_ascii_lowercase() as u8 - b'a';
    Some(char::from(offset + 1))
}

/// Test source fed through a channel. Once every sender is dropped and the
/// buffer is drained, reads fail the way a closed tty would.
#[derive(Debug)]
pub struct ChannelKeySource {
    rx: Receiver<char>,
}

impl ChannelKeySource {
    pub fn new(rx: Receiver<char>) -> Self {
        Self { rx }
    }
}

impl KeySource for ChannelKeySource {
    fn next_char(&mut self) -> io::Result<char> {
        self.rx
            .recv()
            .map_err(|_| io::Error::new(io::ErrorKind::UnexpectedEof, "key source closed"))
    }
}

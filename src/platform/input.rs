//! Keyboard input sources

use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// Player commands decoded from keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Quit,
}

impl Command {
    /// Lane delta for movement commands
    pub fn lane_delta(&self) -> i32 {
        match self {
            Command::Left => -1,
            Command::Right => 1,
            Command::Quit => 0,
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'q' | 'Q' => Some(Command::Quit),
            'a' | 'A' => Some(Command::Left),
            'd' | 'D' => Some(Command::Right),
            _ => None,
        }
    }
}

/// A source of player commands, polled once per frame without blocking
pub trait InputSource {
    fn name(&self) -> &'static str;

    /// Commands received since the last poll, oldest first
    fn poll(&mut self) -> Result<Vec<Command>>;

    /// Block until any key is pressed (or the source closes)
    fn wait_for_key(&mut self) -> Result<()>;
}

/// Key events from crossterm; needs raw mode to see single keypresses
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl CrosstermInput {
    fn decode(event: Event) -> Option<Command> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind == KeyEventKind::Release {
            return None;
        }
        // Raw mode swallows SIGINT
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Command::Quit);
        }
        match key.code {
            KeyCode::Left => Some(Command::Left),
            KeyCode::Right => Some(Command::Right),
            KeyCode::Char(ch) => Command::from_char(ch),
            _ => None,
        }
    }
}

impl InputSource for CrosstermInput {
    fn name(&self) -> &'static str {
        "crossterm"
    }

    fn poll(&mut self) -> Result<Vec<Command>> {
        let mut commands = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Some(command) = Self::decode(event::read()?) {
                commands.push(command);
            }
        }
        Ok(commands)
    }

    fn wait_for_key(&mut self) -> Result<()> {
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind != KeyEventKind::Release
            {
                return Ok(());
            }
        }
    }
}

/// Decodes a byte stream into commands, including `ESC [ C` / `ESC [ D` arrows
#[derive(Debug, Default)]
pub struct KeyDecoder {
    pending: Vec<u8>,
}

impl KeyDecoder {
    pub fn push(&mut self, byte: u8) -> Option<Command> {
        if !self.pending.is_empty() {
            self.pending.push(byte);
            return match self.pending.as_slice() {
                [0x1b, b'['] => None,
                [0x1b, b'[', b'D'] => {
                    self.pending.clear();
                    Some(Command::Left)
                }
                [0x1b, b'[', b'C'] => {
                    self.pending.clear();
                    Some(Command::Right)
                }
                _ => {
                    self.pending.clear();
                    None
                }
            };
        }
        if byte == 0x1b {
            self.pending.push(byte);
            return None;
        }
        Command::from_char(byte as char)
    }
}

/// Bytes read from stdin on a background thread
///
/// Stdin is usually line-buffered here, so keys arrive when Enter is pressed.
pub struct StdinInput {
    rx: Receiver<u8>,
    decoder: KeyDecoder,
    closed: bool,
}

impl StdinInput {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("kerplunk-stdin".into())
            .spawn(move || {
                let stdin = io::stdin();
                for byte in stdin.lock().bytes() {
                    match byte {
                        Ok(byte) => {
                            if tx.send(byte).is_err() {
                                break;
                            }
                        }
                        Err(err) => {
                            log::warn!("stdin read failed: {}", err);
                            break;
                        }
                    }
                }
            });
        if let Err(err) = spawned {
            log::warn!("failed to spawn stdin reader: {}", err);
        }
        Self::from_receiver(rx)
    }

    pub fn from_receiver(rx: Receiver<u8>) -> Self {
        Self {
            rx,
            decoder: KeyDecoder::default(),
            closed: false,
        }
    }
}

impl InputSource for StdinInput {
    fn name(&self) -> &'static str {
        "stdin"
    }

    fn poll(&mut self) -> Result<Vec<Command>> {
        let mut commands = Vec::new();
        while !self.closed {
            match self.rx.try_recv() {
                Ok(byte) => commands.extend(self.decoder.push(byte)),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::debug!("stdin closed");
                    self.closed = true;
                }
            }
        }
        Ok(commands)
    }

    fn wait_for_key(&mut self) -> Result<()> {
        if !self.closed {
            let _ = self.rx.recv();
        }
        Ok(())
    }
}

//! Platform abstraction layer
//!
//! Keyboard input comes from one of two sources, picked once at startup:
//! - `crossterm`: key events while the terminal is in raw mode
//! - `stdin`: raw bytes from a reader thread, for consoles without raw mode

pub mod input;

pub use input::{Command, CrosstermInput, InputSource, KeyDecoder, StdinInput};

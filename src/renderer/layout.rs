//! Backend-independent frame composition
//!
//! Both renderers paint the same character grid; they only differ in how the
//! grid reaches the screen.

use crate::consts::{MIN_HEIGHT, MIN_WIDTH, PLAYER_ART};
use crate::sim::SimState;

/// X center of each lane for a field `width` columns wide
pub fn lane_x_positions(width: u16, lane_count: usize) -> Vec<i32> {
    let width = width as i32;
    let usable = (width - 10).max(20);
    let gap = (usable / (lane_count as i32 * 2)).max(6);
    let total_span = gap * (lane_count as i32 - 1).max(0);
    let start = (width - total_span).div_euclid(2);
    (0..lane_count as i32).map(|i| start + gap * i).collect()
}

/// HUD line shown on the bottom row
pub fn hud_line(state: &SimState) -> String {
    format!(
        " Passed: {}  Speed: {:.2}  (q to quit)",
        state.passed_count(),
        state.speed_multiplier()
    )
}

pub fn too_small_message(width: u16, height: u16) -> String {
    format!(
        "Terminal too small: need {}x{}, got {}x{}",
        MIN_WIDTH, MIN_HEIGHT, width, height
    )
}

pub fn game_over_message(passed: u32) -> String {
    format!("Game over! Plunks passed: {}.", passed)
}

/// Game-over message for a display that waits for a key before closing
pub fn game_over_prompt(passed: u32) -> String {
    format!("{} Press any key to exit.", game_over_message(passed))
}

/// A fixed-size character grid
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Vec<char>>,
}

impl Frame {
    pub fn blank(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![' '; width as usize]; height as usize],
        }
    }

    /// Write one character; off-grid writes are dropped
    pub fn put(&mut self, x: i32, y: i32, ch: char) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.cells[y as usize][x as usize] = ch;
    }

    /// Write a string starting at `x`, clipping at the edges
    pub fn put_str(&mut self, x: i32, y: i32, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.put(x + i as i32, y, ch);
        }
    }

    /// Write `text` centered on column `x`
    pub fn put_centered(&mut self, x: i32, y: i32, text: &str) {
        let len = text.chars().count() as i32;
        self.put_str(x - len / 2, y, text);
    }

    /// Write `text` from the top-left corner, wrapping onto following rows
    pub fn put_wrapped(&mut self, text: &str) {
        let width = (self.width as i32).max(1);
        for (i, ch) in text.chars().enumerate() {
            let i = i as i32;
            self.put(i % width, i / width, ch);
        }
    }

    pub fn row(&self, y: usize) -> String {
        self.cells[y].iter().collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.iter().map(|row| row.iter().collect())
    }
}

/// Paint the field, traffic, player and HUD for the current state
pub fn compose(state: &SimState, lane_count: usize, width: u16, height: u16) -> Frame {
    let mut frame = Frame::blank(width, height);
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        frame.put_wrapped(&too_small_message(width, height));
        return frame;
    }

    let xs = lane_x_positions(width, lane_count);
    let field_rows = height as i32 - 1;

    // Lane separators
    for pair in xs.windows(2) {
        let sep_x = (pair[0] + pair[1]) / 2;
        for y in 0..field_rows {
            frame.put(sep_x, y, '|');
        }
    }

    for obstacle in state.obstacles() {
        let y = obstacle.nearest_row();
        if (0..field_rows).contains(&y) {
            frame.put_centered(xs[obstacle.lane], y, obstacle.kind.art());
        }
    }

    frame.put_centered(xs[state.player_lane()], state.player_row(), PLAYER_ART);

    let hud: String = hud_line(state)
        .chars()
        .take(width.saturating_sub(1) as usize)
        .collect();
    frame.put_str(0, field_rows, &hud);

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimConfig, initialize_seeded};

    #[test]
    fn test_lane_positions_centered() {
        let xs = lane_x_positions(80, 5);
        // usable 70, gap max(6, 7) = 7, span 28, start 26
        assert_eq!(xs, vec![26, 33, 40, 47, 54]);

        let xs = lane_x_positions(40, 5);
        assert_eq!(xs, vec![8, 14, 20, 26, 32]);
    }

    #[test]
    fn test_too_small() {
        let config = SimConfig::default();
        let state = initialize_seeded(&config, 10, 1);
        let frame = compose(&state, 5, 30, 10);
        // 41 characters wrap onto the second row
        let text = format!("{}{}", frame.row(0), frame.row(1));
        assert!(text.starts_with("Terminal too small: need 40x12, got 30x10"));
        assert!(frame.row(2).trim().is_empty());
    }

    #[test]
    fn test_wrapped_text() {
        let mut frame = Frame::blank(4, 2);
        frame.put_wrapped("abcdefghij");
        assert_eq!(frame.row(0), "abcd");
        assert_eq!(frame.row(1), "efgh");
    }

    #[test]
    fn test_player_and_hud() {
        let config = SimConfig::default();
        let state = initialize_seeded(&config, 24, 1);
        let frame = compose(&state, 5, 80, 24);

        let player_row = frame.row(21);
        assert_eq!(&player_row[39..42], "<P>");
        assert!(frame.row(23).starts_with(" Passed: 0  Speed: 1.00  (q to quit)"));
        // Separator between lanes 0 and 1
        assert_eq!(frame.row(0).chars().nth(29), Some('|'));
    }

    #[test]
    fn test_clipping() {
        let mut frame = Frame::blank(4, 1);
        frame.put_str(-1, 0, "abcdef");
        assert_eq!(frame.row(0), "bcde");
        frame.put_str(0, 5, "zz");
        assert_eq!(frame.rows().count(), 1);
    }
}

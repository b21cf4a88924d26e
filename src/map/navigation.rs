//! Movement on the toroidal grid.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }

    /// (dx, dy) offsets; y grows downward
    pub fn offset(&self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" | "north" => Ok(Direction::Up),
            "down" | "d" | "south" => Ok(Direction::Down),
            "left" | "l" | "west" => Ok(Direction::Left),
            "right" | "r" | "east" => Ok(Direction::Right),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// Steps one cell from (x, y), wrapping around the grid edges.
pub fn step(size: usize, x: usize, y: usize, direction: Direction) -> (usize, usize) {
    if size == 0 {
        return (x, y);
    }
    let size = size as i64;
    let (dx, dy) = direction.offset();
    let nx = (x as i64 + dx).rem_euclid(size);
    let ny = (y as i64 + dy).rem_euclid(size);
    (nx as usize, ny as usize)
}

use std::fmt;

use crate::Floor;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl Direction {
    pub fn as_string(self) -> String {
        match self {
            Direction::Up => String::from("UP"),
            Direction::Down => String::from("DOWN"),
            Direction::Idle => String::from("IDLE"),
        }
    }

    /// Direction of travel needed to get from `from` to `to`.
    pub fn towards(from: Floor, to: Floor) -> Self {
        if to > from {
            Direction::Up
        } else if to < from {
            Direction::Down
        } else {
            Direction::Idle
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.to_ascii_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "idle" => Some(Direction::Idle),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn towards_picks_travel_direction() {
        assert_eq!(Direction::towards(3, 7), Direction::Up);
        assert_eq!(Direction::towards(7, 3), Direction::Down);
        assert_eq!(Direction::towards(4, 4), Direction::Idle);
    }

    #[test]
    fn parse_accepts_console_spellings() {
        assert_eq!(Direction::parse("UP"), Some(Direction::Up));
        assert_eq!(Direction::parse("d"), Some(Direction::Down));
        assert_eq!(Direction::parse("sideways"), None);
    }
}

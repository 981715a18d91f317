//! Typewriter banner behind the hero
//!
//! Types each line one character per tick with a jittered delay, holds the
//! full line, deletes it quickly, then moves on to the next line.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Lines cycled by the hero banner
pub const CODE_LINES: &[&str] = &[
    "// Passionate about high-impact engineering",
    "const stack = ['C++', 'Python', 'C#/.NET', 'SQL', 'Java'];",
    "function solve(hardProblems) {",
    "  return hardProblems.map(rigor + creativity);",
    "}",
    "// Always learning. Always shipping.",
];

/// Shortest per-character typing delay
pub const TYPE_MIN_MS: u32 = 55;
/// Exclusive upper bound of the typing delay
pub const TYPE_MAX_MS: u32 = 135;
/// Pause with the full line shown
pub const HOLD_MS: u32 = 1500;
/// Per-character deleting delay
pub const DELETE_MS: u32 = 30;

/// Output of one tick
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tick {
    /// Text to display now
    pub text: String,
    /// Milliseconds until the next tick
    pub next_delay_ms: u32,
}

pub struct Typewriter {
    lines: Vec<String>,
    line: usize,
    /// Characters of the current line shown
    shown: usize,
    deleting: bool,
    rng: SmallRng,
}

impl Typewriter {
    pub fn new(lines: &[&str], seed: u64) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            line: 0,
            shown: 0,
            deleting: false,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Typewriter over [`CODE_LINES`]
    pub fn code_stream(seed: u64) -> Self {
        Self::new(CODE_LINES, seed)
    }

    /// Index of the line being typed or deleted
    pub fn line_index(&self) -> usize {
        self.line
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Advance by one character
    pub fn tick(&mut self) -> Tick {
        if self.lines.is_empty() {
            return Tick {
                text: String::new(),
                next_delay_ms: HOLD_MS,
            };
        }

        let len = self.lines[self.line].chars().count();
        if len == 0 {
            self.line = (self.line + 1) % self.lines.len();
            return Tick {
                text: String::new(),
                next_delay_ms: HOLD_MS,
            };
        }

        let delay = if !self.deleting {
            self.shown += 1;
            if self.shown == len {
                self.deleting = true;
                HOLD_MS
            } else {
                self.type_delay()
            }
        } else {
            self.shown -= 1;
            if self.shown == 0 {
                self.deleting = false;
                self.line = (self.line + 1) % self.lines.len();
                self.type_delay()
            } else {
                DELETE_MS
            }
        };

        let text = if self.shown == 0 {
            String::new()
        } else {
            self.lines[self.line].chars().take(self.shown).collect()
        };
        Tick {
            text,
            next_delay_ms: delay,
        }
    }

    fn type_delay(&mut self) -> u32 {
        self.rng.gen_range(TYPE_MIN_MS..TYPE_MAX_MS)
    }
}

//! Shared helpers for integration tests.
#![allow(dead_code)]

use rand::RngCore;
use std::collections::VecDeque;
use wayfarer::character::Player;
use wayfarer::exploration::{outcome_weights, ExploreOutcome};

/// Raw word that makes `gen_range` return its low end and `gen_bool` true
pub const LOW: u64 = 0;
/// Raw word that makes `gen_bool` false. Never feed it to `gen_range`.
pub const HIGH: u64 = u64::MAX;

/// Replays a fixed list of raw 64-bit words, then yields 0 forever.
///
/// `next_u32` takes the upper half of the next word, so one scripted entry
/// is consumed per draw whatever its width.
pub struct ScriptedRng {
    words: VecDeque<u64>,
}

impl ScriptedRng {
    pub fn new(words: &[u64]) -> Self {
        Self {
            words: words.iter().copied().collect(),
        }
    }

    /// Script made only of 1..=100 percent rolls
    pub fn from_rolls(rolls: &[u32]) -> Self {
        Self {
            words: rolls.iter().map(|&roll| roll_word(roll)).collect(),
        }
    }

    /// Words not yet drawn
    pub fn remaining(&self) -> usize {
        self.words.len()
    }
}

/// The word whose f64 conversion lands in the middle of `roll`'s bucket
pub fn roll_word(roll: u32) -> u64 {
    fraction_word(((roll - 1) as f64 + 0.5) / 100.0)
}

/// The word `gen::<f64>()` turns into `fraction` (0.0..1.0)
pub fn fraction_word(fraction: f64) -> u64 {
    ((fraction * (1u64 << 53) as f64) as u64) << 11
}

/// Word landing in the middle of `outcome`'s slice of the explore table
pub fn outcome_word(player: &Player, distance: u32, outcome: ExploreOutcome) -> u64 {
    let table = outcome_weights(
        distance,
        player.equipment().encounter_reduction(),
        player.curse_probability(),
    );
    let total: f64 = table.iter().map(|(_, weight)| weight).sum();
    let mut start = 0.0;
    for (candidate, weight) in table {
        if candidate == outcome {
            return fraction_word((start + weight / 2.0) / total);
        }
        start += weight;
    }
    panic!("{:?} is not in the table", outcome)
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.words.pop_front().unwrap_or(0)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

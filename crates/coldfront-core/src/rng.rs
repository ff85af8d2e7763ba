//! Randomness abstraction for dice rolls and weighted draws.
//!
//! Play uses the seeded xoshiro generator; tests script exact sequences
//! through the same trait, so resolution logic never touches a global RNG.

use std::collections::VecDeque;

/// Source of every random draw the engine makes.
pub trait Randomness: Send {
    /// Uniform die roll in `[1, 6]`.
    fn roll_die(&mut self) -> i32;

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Deterministic PRNG with 256-bit state, suitable for seeded replays.
///
/// This is `xoshiro256**` seeded via SplitMix64.
#[derive(Clone, Copy, Debug)]
pub struct GameRng {
    state: [u64; 4],
}

impl GameRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        let mut sm = SplitMix64 { state: seed };
        Self {
            state: [sm.next(), sm.next(), sm.next(), sm.next()],
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        // xoshiro256**
        let result = self.state[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);

        let t = self.state[1] << 17;

        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];

        self.state[2] ^= t;

        self.state[3] = self.state[3].rotate_left(45);

        result
    }

    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn gen_range(&mut self, span: u32) -> u32 {
        debug_assert!(span > 0, "empty range");
        let threshold = u32::MAX - (u32::MAX % span);
        loop {
            let x = self.next_u32();
            if x < threshold {
                return x % span;
            }
        }
    }
}

impl Randomness for GameRng {
    fn roll_die(&mut self) -> i32 {
        1 + self.gen_range(6) as i32
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(len as u32) as usize
    }
}

struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn next(&mut self) -> u64 {
        let mut z = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        self.state = z;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }
}

/// Scripted source for tests: rolls and picks are consumed from queues, with
/// fixed fallbacks (roll 1, pick 0) once a queue runs dry.
#[derive(Debug, Default)]
pub struct ScriptedRng {
    rolls: VecDeque<i32>,
    picks: VecDeque<usize>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(rolls: &[i32]) -> Self {
        Self {
            rolls: rolls.iter().copied().collect(),
            picks: VecDeque::new(),
        }
    }

    pub fn queue_roll(&mut self, roll: i32) {
        self.rolls.push_back(roll);
    }

    pub fn queue_pick(&mut self, index: usize) {
        self.picks.push_back(index);
    }
}

impl Randomness for ScriptedRng {
    fn roll_die(&mut self) -> i32 {
        self.rolls.pop_front().unwrap_or(1).clamp(1, 6)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0).min(len.saturating_sub(1))
    }
}

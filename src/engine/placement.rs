//! Spatial placement for mood entries
//!
//! Placement is a cosmetic hint consumed by the visualization layer; the
//! generator is injected so tests can pin positions deterministically.

use serde::{Deserialize, Serialize};

/// A point in the mood visualization volume
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Source of placement positions for new mood entries
pub trait Placement {
    fn place(&mut self) -> Position;
}

/// Uniform placement within a disc of `radius` and a vertical span
pub struct DiscPlacement {
    rng: XorShift,
    radius: f32,
    min_height: f32,
    max_height: f32,
}

impl DiscPlacement {
    pub fn new() -> Self {
        Self::with_volume(2.5, 0.5, 2.0)
    }

    pub fn with_volume(radius: f32, min_height: f32, max_height: f32) -> Self {
        Self {
            rng: XorShift::seeded(),
            radius,
            min_height,
            max_height,
        }
    }
}

impl Default for DiscPlacement {
    fn default() -> Self {
        Self::new()
    }
}

impl Placement for DiscPlacement {
    fn place(&mut self) -> Position {
        // Rejection sampling keeps the distribution uniform over the disc.
        let (x, z) = loop {
            let x = (self.rng.next_f32() * 2.0 - 1.0) * self.radius;
            let z = (self.rng.next_f32() * 2.0 - 1.0) * self.radius;
            if x * x + z * z <= self.radius * self.radius {
                break (x, z);
            }
        };
        let y = self.min_height + self.rng.next_f32() * (self.max_height - self.min_height);
        Position { x, y, z }
    }
}

/// Placement that always returns the same position (for tests)
pub struct FixedPlacement(pub Position);

impl Placement for FixedPlacement {
    fn place(&mut self) -> Position {
        self.0
    }
}

/// Small xorshift generator, seeded from the OS RNG
struct XorShift {
    state: u64,
}

impl XorShift {
    fn seeded() -> Self {
        let mut bytes = [0u8; 8];
        let seed = if getrandom::getrandom(&mut bytes).is_ok() {
            u64::from_le_bytes(bytes)
        } else {
            // Fallback seed if the OS RNG is unavailable
            let nanos = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0);
            nanos ^ (std::process::id() as u64).rotate_left(17)
        };
        Self {
            state: seed | 1, // xorshift must not start at zero
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u32 << 24) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_placement_bounds() {
        let mut gen = DiscPlacement::with_volume(2.0, 0.5, 1.5);
        for _ in 0..200 {
            let p = gen.place();
            assert!(p.x * p.x + p.z * p.z <= 4.0 + 1e-4);
            assert!((0.5..=1.5).contains(&p.y));
        }
    }

    #[test]
    fn test_fixed_placement() {
        let pos = Position { x: 1.0, y: 2.0, z: 3.0 };
        let mut gen = FixedPlacement(pos);
        assert_eq!(gen.place(), pos);
        assert_eq!(gen.place(), pos);
    }
}

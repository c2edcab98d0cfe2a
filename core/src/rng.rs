//! Random number generation for draws
//!
//! Draws only need a fair-enough source, not a cryptographic one. The
//! browser build seeds from `crypto.getRandomValues`, native builds from the
//! OS; tests seed explicitly so results are reproducible.

/// Trait for random number generation in draws
pub trait DrawRng {
    /// Generate a random u32
    fn next_u32(&mut self) -> u32;

    /// Generate a random number in range [0, max)
    fn gen_range(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u32() as usize) % max
    }

    /// Generate a uniform percentage in range [0, 100)
    fn roll_percent(&mut self) -> f64 {
        (f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)) * 100.0
    }
}

/// XorShift32 RNG - simple, fast, deterministic
///
/// The same seed will always produce the same sequence.
#[derive(Debug, Clone)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Create a new RNG from a u64 seed
    ///
    /// The seed is folded into a u32, ensuring state is never 0.
    pub fn seed_from_u64(seed: u64) -> Self {
        let state = ((seed as u32) ^ ((seed >> 32) as u32)).max(1);
        Self { state }
    }

    /// Create a new RNG from a u32 seed
    pub fn seed_from_u32(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    /// Seed from the platform entropy source, falling back to a fixed seed
    /// when none is available
    pub fn from_entropy() -> Self {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => Self::seed_from_u64(u64::from_le_bytes(buf)),
            Err(e) => {
                crate::log::warn(&format!("entropy unavailable ({e}), using fixed seed"));
                Self::seed_from_u64(0x5EED_1A77_E2A1_u64)
            }
        }
    }
}

impl DrawRng for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

use std::{fmt::Write as _, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Source of uniformly distributed integers for figure generation.
///
/// The engine never reaches for a global generator; every random choice goes through the
/// source owned by the session, so tests can inject a scripted sequence.
pub trait RandomSource {
    /// Returns an integer in `[min, max]` (both ends inclusive).
    fn next_int(&mut self, min: i32, max: i32) -> i32;
}

/// Seeded PCG generator used by default.
#[derive(Debug, Clone)]
pub struct FigureRng {
    rng: Pcg32,
}

impl FigureRng {
    /// Creates a generator with a fresh random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible figure sequence.
    #[must_use]
    pub fn with_seed(seed: FigureSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }
}

impl Default for FigureRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for FigureRng {
    fn next_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}

/// Seed for deterministic figure generation.
///
/// This is a 128-bit (16-byte) seed. Using the same seed yields the same sequence of shapes
/// and spawn columns, which makes sessions reproducible for debugging and testing.
///
/// Seeds are written as 32 hexadecimal digits, both on the command line and in JSON.
///
/// # Example
///
/// ```
/// use stackfall_engine::FigureSeed;
///
/// let seed: FigureSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
/// assert_eq!(seed.to_string(), "0123456789abcdef0123456789abcdef");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed: expected 32 hex digits, got {input:?}")]
pub struct SeedParseError {
    input: String,
}

impl FigureSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Display for FigureSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let num = u128::from_be_bytes(self.0);
        write!(f, "{num:032x}")
    }
}

impl FromStr for FigureSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SeedParseError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for FigureSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{self}").map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for FigureSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<FigureSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> FigureSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        FigureSeed(seed)
    }
}

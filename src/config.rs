// src/config.rs

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction of the transform.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    #[default]
    Forward,
    /// Conjugated twiddles, outputs divided by N.
    Inverse,
}

impl Direction {
    #[inline]
    pub fn is_inverse(self) -> bool {
        self == Direction::Inverse
    }
}

/// Number of quarter-cycle steps in the twiddle table.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TableSize {
    /// `180 * 32` below N = 32, `180 * N / 16` from there on.
    #[default]
    Auto,
    Samples(usize),
}

impl TableSize {
    /// Resolves the table size for a transform of length `n`.
    pub fn resolve(self, n: usize) -> usize {
        match self {
            TableSize::Auto if n < 32 => 180 * 32,
            TableSize::Auto => 180 * n / 16,
            TableSize::Samples(size) => size,
        }
    }
}

// A size of zero selects the automatic heuristic.
impl From<usize> for TableSize {
    fn from(size: usize) -> Self {
        match size {
            0 => TableSize::Auto,
            size => TableSize::Samples(size),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CicConfig {
    pub decimation: usize,
    pub integrators: usize,
    pub combs: usize,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FftConfig {
    pub length: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub table_size: TableSize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub direction: Direction,
}

impl FftConfig {
    pub fn forward(length: usize) -> Self {
        Self {
            length,
            table_size: TableSize::Auto,
            direction: Direction::Forward,
        }
    }

    pub fn inverse(length: usize) -> Self {
        Self {
            direction: Direction::Inverse,
            ..Self::forward(length)
        }
    }
}

// src/fixed/core.rs

use alloc::vec::Vec;
use core::f64::consts::PI;

/// Fractional bits of the twiddle table entries (sine scaled by 2^15).
pub const TWIDDLE_FRAC: u32 = 15;

/// Quarter-wave sine table shared by every stage of one pipeline.
///
/// Entry `i` holds `round(sin(PI * i / (2 * size)) * 2^15)` for
/// `i` in `0..=size`, so the first entry is 0 and the last is 32768.
pub struct TwiddleTable {
    samples: Vec<i32>,
}

impl TwiddleTable {
    pub fn new(size: usize) -> Self {
        let scale = (1u32 << TWIDDLE_FRAC) as f64;
        let samples = (0..=size)
            .map(|i| {
                let angle = (PI / size as f64) * i as f64 / 2.0;
                libm::round(libm::sin(angle) * scale) as i32
            })
            .collect();
        Self { samples }
    }

    /// Number of quarter-cycle steps (one less than the stored entries).
    #[inline]
    pub fn size(&self) -> usize {
        self.samples.len() - 1
    }

    #[inline]
    pub fn get(&self, index: usize) -> i32 {
        self.samples[index]
    }
}

/// Fills the bit-reversal table.
pub(crate) fn precompute_bitrev(bitrev: &mut [usize], n: usize) {
    bitrev[0] = 0;
    let mut j = 0;
    for i in 1..n {
        let mut k = n >> 1;
        while j >= k {
            j -= k;
            k >>= 1;
        }
        j += k;
        bitrev[i] = j;
    }
}

/// Applies a bit-reversal permutation in place.
pub(crate) fn bit_reverse_permute<T>(buffer: &mut [T], bitrev: &[usize]) {
    for i in 1..buffer.len().saturating_sub(1) {
        let j = bitrev[i];
        if i < j {
            buffer.swap(i, j);
        }
    }
}

#[cfg(test)]
#[path = "core_tests.rs"]
mod tests;

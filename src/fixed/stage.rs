// src/fixed/stage.rs

use alloc::vec;
use alloc::vec::Vec;
use log::trace;

use super::core::{TwiddleTable, TWIDDLE_FRAC};
use super::types::{ComplexFixed64, Cplx64};

/// Phase of an FFT stage.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StageState {
    /// Filling the first half of the block.
    Initial,
    /// Butterflying the second half against the stored first half.
    Read,
    /// Draining the twiddled differences; real input is refused.
    Output,
}

/// Where a stage sends the values it emits.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Downstream {
    Stage(usize),
    Collector,
}

/// One radix-2 decimation-in-frequency butterfly layer.
///
/// A stage of size N holds N/2 values. It accepts one value per step; the
/// pipeline feeds it zeros while it is not ready.
pub struct FftStage {
    size: usize,
    buffer: Vec<Cplx64>,
    read: usize,
    write: usize,
    state: StageState,
    ready: bool,
    ticks: u64,
    increment: usize,
    inverse: bool,
    next: Downstream,
}

impl FftStage {
    /// `table_size` is the quarter-cycle step count of the shared table.
    /// `4 * table_size` must be a multiple of `size`.
    pub(crate) fn new(size: usize, table_size: usize, inverse: bool, next: Downstream) -> Self {
        Self {
            size,
            buffer: vec![Cplx64::ZERO; size / 2],
            read: 0,
            write: 0,
            state: StageState::Initial,
            ready: true,
            ticks: 0,
            increment: 4 * table_size / size,
            inverse,
            next,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.buffer.fill(Cplx64::ZERO);
        self.read = 0;
        self.write = 0;
        self.state = StageState::Initial;
        self.ready = true;
        self.ticks = 0;
    }

    /// Block size handled by this stage.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn state(&self) -> StageState {
        self.state
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Steps taken since construction or the last reset, dummies included.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn downstream(&self) -> Downstream {
        self.next
    }

    /// Consumes one value and returns the value to send downstream, if any.
    pub(crate) fn step(&mut self, x: Cplx64, table: &TwiddleTable) -> Option<Cplx64> {
        let last = self.size / 2 - 1;

        let emitted = match self.state {
            StageState::Initial => {
                self.buffer[self.write] = x;
                if self.write == last {
                    self.enter(StageState::Read);
                } else {
                    self.write += 1;
                }
                None
            }
            StageState::Read => {
                let held = self.buffer[self.read];
                self.buffer[self.write] = held - x;
                if self.read == last {
                    self.enter(StageState::Output);
                } else {
                    self.read += 1;
                    self.write += 1;
                }
                Some(held + x)
            }
            StageState::Output => {
                let rotated = self.buffer[self.read] * self.twiddle(self.read, table);
                if self.read == last {
                    self.enter(StageState::Initial);
                } else {
                    self.read += 1;
                }
                Some(rotated)
            }
        };

        self.ticks += 1;
        self.ready = self.state != StageState::Output;
        emitted
    }

    fn enter(&mut self, state: StageState) {
        trace!("FFT stage {}: {:?} -> {:?}", self.size, self.state, state);
        self.state = state;
        self.read = 0;
        self.write = 0;
    }

    /// Twiddle factor `W_N^k`, rebuilt from the quarter-wave table by symmetry.
    pub(crate) fn twiddle(&self, k: usize, table: &TwiddleTable) -> ComplexFixed64<TWIDDLE_FRAC> {
        let quarter = self.size / 4;
        let sine = |j: usize| i64::from(table.get(j * self.increment));

        let w = if k > quarter {
            ComplexFixed64::from_bits(-sine(k - quarter), -sine(self.size / 2 - k))
        } else if self.size == 2 {
            ComplexFixed64::from_bits(1 << TWIDDLE_FRAC, 0)
        } else {
            ComplexFixed64::from_bits(sine(quarter - k), -sine(k))
        };

        if self.inverse { w.conj() } else { w }
    }
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;

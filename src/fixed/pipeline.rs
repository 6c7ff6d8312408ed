// src/fixed/pipeline.rs

use alloc::vec;
use alloc::vec::Vec;
use log::debug;

use super::collector::Collector;
use super::core::{bit_reverse_permute, precompute_bitrev, TwiddleTable};
use super::stage::{Downstream, FftStage};
use super::types::{Cplx64, WIDE_FRAC};
use crate::common::{DspError, Sample, StreamElement};
use crate::config::{Direction, FftConfig, TableSize};

/// Streaming radix-2 decimation-in-frequency FFT.
///
/// Samples go in one at a time through [`StreamElement::input`]. Once more
/// than N samples have been consumed, every further input lets exactly one
/// finished value be polled with [`StreamElement::output`]. Each block of N
/// results leaves in bit-reversed order; [`PipelinedFft::reorder`] puts a
/// block back into natural order.
pub struct PipelinedFft {
    length: usize,
    direction: Direction,
    table: TwiddleTable,
    stages: Vec<FftStage>,
    /// Value waiting to enter each stage while the drive loop drains it.
    pending: Vec<Option<Cplx64>>,
    collector: Collector,
    bitrev: Vec<usize>,
    inputs: u64,
    new_input: bool,
}

impl PipelinedFft {
    pub fn new(length: usize, table_size: TableSize, direction: Direction) -> Result<Self, DspError> {
        if length < 2 || !length.is_power_of_two() {
            return Err(DspError::NotPowerOfTwo);
        }

        let table_size = table_size.resolve(length);
        let quarter_aligned = table_size
            .checked_mul(4)
            .is_some_and(|cycle| cycle != 0 && cycle % length == 0);
        if !quarter_aligned {
            return Err(DspError::InvalidTableSize(table_size));
        }

        let stage_count = length.trailing_zeros() as usize;
        let stages = (0..stage_count)
            .map(|i| {
                let next = if i + 1 == stage_count {
                    Downstream::Collector
                } else {
                    Downstream::Stage(i + 1)
                };
                FftStage::new(length >> i, table_size, direction.is_inverse(), next)
            })
            .collect();

        let mut bitrev = vec![0; length];
        precompute_bitrev(&mut bitrev, length);

        debug!(
            "FixedFFT: N = {}, {} stage(s), table size {}, {:?}",
            length, stage_count, table_size, direction
        );

        Ok(Self {
            length,
            direction,
            table: TwiddleTable::new(table_size),
            stages,
            pending: vec![None; stage_count],
            collector: Collector::new(length, direction),
            bitrev,
            inputs: 0,
            new_input: false,
        })
    }

    pub fn from_config(config: &FftConfig) -> Result<Self, DspError> {
        Self::new(config.length, config.table_size, config.direction)
    }

    /// Transform length N.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Samples consumed since construction or the last reset.
    pub fn inputs(&self) -> u64 {
        self.inputs
    }

    pub fn stage(&self, index: usize) -> Option<&FftStage> {
        self.stages.get(index)
    }

    pub fn table(&self) -> &TwiddleTable {
        &self.table
    }

    /// Finished values waiting in the collector.
    pub fn pending(&self) -> usize {
        self.collector.len()
    }

    /// Reorders a block of N consecutive outputs into natural frequency order.
    pub fn reorder(&self, block: &mut [Cplx64]) -> Result<(), DspError> {
        if block.len() != self.length {
            return Err(DspError::SizeMismatch);
        }
        bit_reverse_permute(block, &self.bitrev);
        Ok(())
    }

    /// Delivers one value to the first stage.
    ///
    /// A stage that is not ready is fed zeros until it is. Whatever a stage
    /// emits is delivered to its successor the same way before the stage is
    /// stepped again, so at most one value per stage is ever in flight.
    fn drive(&mut self, value: Cplx64) {
        let Self {
            stages,
            pending,
            collector,
            table,
            ..
        } = self;

        pending[0] = Some(value);
        let mut level = 0;

        loop {
            let Some(value) = pending[level] else {
                return;
            };
            let stage = &mut stages[level];

            let emitted = if stage.is_ready() {
                pending[level] = None;
                stage.step(value, table)
            } else {
                stage.step(Cplx64::ZERO, table)
            };

            if let Some(out) = emitted {
                match stage.downstream() {
                    Downstream::Stage(next) => {
                        pending[next] = Some(out);
                        level = next;
                        continue;
                    }
                    Downstream::Collector => collector.push(out),
                }
            }

            // Climb back to the nearest stage still holding a value.
            while pending[level].is_none() {
                if level == 0 {
                    return;
                }
                level -= 1;
            }
        }
    }
}

impl StreamElement for PipelinedFft {
    fn name(&self) -> &'static str {
        "FixedFFT"
    }

    fn input(&mut self, sample: Sample) -> Result<(), DspError> {
        let x = sample.into_cplx16()?;
        self.drive(x.widen::<WIDE_FRAC>());
        self.inputs += 1;
        self.new_input = true;
        Ok(())
    }

    fn output(&mut self) -> Option<Sample> {
        if !core::mem::take(&mut self.new_input) {
            return None;
        }
        if self.inputs <= self.length as u64 {
            return None;
        }
        self.collector.pop().map(Sample::Cplx64)
    }

    fn reset(&mut self) {
        for stage in self.stages.iter_mut() {
            stage.reset();
        }
        self.pending.fill(None);
        self.collector.clear();
        self.inputs = 0;
        self.new_input = false;
        debug!("FixedFFT: reset");
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;

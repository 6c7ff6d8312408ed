// src/fixed/fir.rs

use alloc::vec;
use alloc::vec::Vec;
use log::debug;

use super::types::Cplx16;
use crate::common::{DspError, Sample, StreamElement};

/// Direct-form FIR filter over a circular delay line.
///
/// Produces one output per input: `y[n] = sum(tap[i] * x[n - i])`.
pub struct FirFilter {
    taps: Vec<Cplx16>,
    delay_line: Vec<Cplx16>,
    position: usize,
    pending: Option<Cplx16>,
}

impl FirFilter {
    pub fn new(taps: Vec<Cplx16>) -> Result<Self, DspError> {
        if taps.is_empty() {
            return Err(DspError::EmptyTaps);
        }

        debug!("FixedFIR: {} tap(s)", taps.len());

        let len = taps.len();
        Ok(Self {
            taps,
            delay_line: vec![Cplx16::ZERO; len],
            position: 0,
            pending: None,
        })
    }

    pub fn taps(&self) -> &[Cplx16] {
        &self.taps
    }

    fn filter(&mut self, x: Cplx16) -> Cplx16 {
        self.delay_line[self.position] = x;

        let len = self.taps.len();
        let mut acc = Cplx16::ZERO;
        for (i, tap) in self.taps.iter().enumerate() {
            let delay_idx = (self.position + len - i) % len;
            acc += *tap * self.delay_line[delay_idx];
        }

        self.position = (self.position + 1) % len;
        acc
    }
}

impl StreamElement for FirFilter {
    fn name(&self) -> &'static str {
        "FixedFIR"
    }

    fn input(&mut self, sample: Sample) -> Result<(), DspError> {
        let x = sample.into_cplx16()?;
        self.pending = Some(self.filter(x));
        Ok(())
    }

    fn output(&mut self) -> Option<Sample> {
        self.pending.take().map(Sample::Cplx16)
    }

    fn reset(&mut self) {
        self.delay_line.fill(Cplx16::ZERO);
        self.position = 0;
        self.pending = None;
    }
}

#[cfg(test)]
#[path = "fir_tests.rs"]
mod tests;

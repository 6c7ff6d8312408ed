// src/fixed/cic.rs

use alloc::vec;
use alloc::vec::Vec;
use log::debug;

use super::types::Cplx16;
use crate::common::{DspError, Sample, StreamElement};
use crate::config::CicConfig;

/// Cascaded integrator-comb decimator.
///
/// Every input runs through the integrator cascade. Inputs whose running
/// count is a multiple of R (starting with the very first one) are also
/// passed through the comb cascade and become the element's output.
/// Register arithmetic wraps, so integrator overflow cancels in the combs.
pub struct CicDecimator {
    decimation: usize,
    integrators: Vec<Cplx16>,
    combs: Vec<Cplx16>,
    samples: u64,
    pending: Option<Cplx16>,
}

impl CicDecimator {
    pub fn new(decimation: usize, integrators: usize, combs: usize) -> Result<Self, DspError> {
        if decimation < 1 {
            return Err(DspError::InvalidDecimation);
        }

        debug!(
            "FixedCIC: R = {}, {} integrator(s), {} comb(s)",
            decimation, integrators, combs
        );

        Ok(Self {
            decimation,
            integrators: vec![Cplx16::ZERO; integrators],
            combs: vec![Cplx16::ZERO; combs],
            samples: 0,
            pending: None,
        })
    }

    pub fn from_config(config: &CicConfig) -> Result<Self, DspError> {
        Self::new(config.decimation, config.integrators, config.combs)
    }

    pub fn decimation(&self) -> usize {
        self.decimation
    }

    /// Number of inputs consumed since construction or the last reset.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    fn filter(&mut self, x: Cplx16) {
        self.pending = None;
        let integrated = self.integrate(x);
        if self.keep_sample() {
            self.pending = Some(self.comb(integrated));
        }
    }

    fn integrate(&mut self, mut running: Cplx16) -> Cplx16 {
        for register in self.integrators.iter_mut() {
            *register += running;
            running = *register;
        }
        running
    }

    fn comb(&mut self, mut running: Cplx16) -> Cplx16 {
        for delay in self.combs.iter_mut() {
            let difference = running - *delay;
            *delay = running;
            running = difference;
        }
        running
    }

    fn keep_sample(&mut self) -> bool {
        let keep = self.samples % self.decimation as u64 == 0;
        self.samples += 1;
        keep
    }
}

impl StreamElement for CicDecimator {
    fn name(&self) -> &'static str {
        "FixedCIC"
    }

    fn input(&mut self, sample: Sample) -> Result<(), DspError> {
        let x = sample.into_cplx16()?;
        self.filter(x);
        Ok(())
    }

    fn output(&mut self) -> Option<Sample> {
        self.pending.take().map(Sample::Cplx16)
    }

    fn reset(&mut self) {
        self.integrators.fill(Cplx16::ZERO);
        self.combs.fill(Cplx16::ZERO);
        self.samples = 0;
        self.pending = None;
    }
}

#[cfg(test)]
#[path = "cic_tests.rs"]
mod tests;

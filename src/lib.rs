#![no_std]

//! Streaming fixed-point DSP elements: a CIC decimator, a FIR filter and a
//! pipelined radix-2 FFT, all driven one sample at a time through
//! [`StreamElement`].

extern crate alloc;

// Enables the standard library only for tests,
// so you can run 'cargo test' on your PC normally.
#[cfg(test)]
extern crate std;

pub mod common;
pub mod config;
pub mod fixed;

pub use common::{DspError, Sample, SampleKind, StreamElement};
pub use config::{CicConfig, Direction, FftConfig, TableSize};

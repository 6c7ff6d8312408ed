// src/common.rs

use crate::fixed::types::{Cplx16, Cplx64};
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum DspError {
    #[error("Sample tag mismatch: expected {expected:?}, got {found:?}")]
    TagMismatch {
        expected: SampleKind,
        found: SampleKind,
    },
    #[error("Size must be a power of 2 and at least 2")]
    NotPowerOfTwo,
    #[error("Decimation factor must be at least 1")]
    InvalidDecimation,
    #[error("Tap sequence must not be empty")]
    EmptyTaps,
    #[error("Twiddle table size {0} does not divide the quarter cycle evenly")]
    InvalidTableSize(usize),
    #[error("Data buffer size does not match FFT size")]
    SizeMismatch,
}

/// Type tag of a [`Sample`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SampleKind {
    Cplx16,
    Cplx64,
}

/// Tagged payload exchanged between streaming elements.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Sample {
    Cplx16(Cplx16),
    Cplx64(Cplx64),
}

impl Sample {
    pub fn kind(&self) -> SampleKind {
        match self {
            Sample::Cplx16(_) => SampleKind::Cplx16,
            Sample::Cplx64(_) => SampleKind::Cplx64,
        }
    }

    /// Reads the narrow payload. Any other tag is a contract violation.
    pub fn into_cplx16(self) -> Result<Cplx16, DspError> {
        match self {
            Sample::Cplx16(value) => Ok(value),
            other => Err(DspError::TagMismatch {
                expected: SampleKind::Cplx16,
                found: other.kind(),
            }),
        }
    }

    /// Reads the wide payload. Any other tag is a contract violation.
    pub fn into_cplx64(self) -> Result<Cplx64, DspError> {
        match self {
            Sample::Cplx64(value) => Ok(value),
            other => Err(DspError::TagMismatch {
                expected: SampleKind::Cplx64,
                found: other.kind(),
            }),
        }
    }
}

impl From<Cplx16> for Sample {
    fn from(value: Cplx16) -> Self {
        Sample::Cplx16(value)
    }
}

impl From<Cplx64> for Sample {
    fn from(value: Cplx64) -> Self {
        Sample::Cplx64(value)
    }
}

/// Contract shared by every streaming element.
///
/// Samples are pushed one at a time with [`input`](Self::input) and results
/// are polled with [`output`](Self::output), which never blocks or allocates.
/// A `TagMismatch` from `input` means the caller wired the element to the
/// wrong channel; the element's state is left untouched.
pub trait StreamElement {
    fn name(&self) -> &'static str;

    /// Feeds one sample. An `Err` is a wiring fault, not a data condition:
    /// callers must treat it as fatal and stop driving the chain. The rejected
    /// sample is not buffered.
    fn input(&mut self, sample: Sample) -> Result<(), DspError>;

    fn output(&mut self) -> Option<Sample>;

    /// Per-cycle bookkeeping. The elements in this crate advance inside
    /// `input`, so the default does nothing.
    fn tick(&mut self) {}

    fn reset(&mut self);
}

mod fixed;
mod fixed_complex;

pub use fixed::{Fixed, Fixed64};
pub use fixed_complex::{ComplexFixed, ComplexFixed64};

/// Fractional bits of the narrow sample path (Q15).
pub const SAMPLE_FRAC: u32 = 15;

/// Fractional bits of the FFT's internal values (Q31 in 64-bit storage).
pub const WIDE_FRAC: u32 = 31;

/// Narrow complex sample consumed by the CIC, the FIR and the FFT input.
pub type Cplx16 = ComplexFixed<SAMPLE_FRAC>;

/// Wide complex value used inside the FFT and on its output.
pub type Cplx64 = ComplexFixed64<WIDE_FRAC>;

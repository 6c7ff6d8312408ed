pub mod types;
mod core;
pub mod cic;
pub mod collector;
pub mod fir;
pub mod pipeline;
pub mod stage;

pub use self::core::{TwiddleTable, TWIDDLE_FRAC};
pub use cic::CicDecimator;
pub use collector::Collector;
pub use fir::FirFilter;
pub use pipeline::PipelinedFft;
pub use stage::{Downstream, FftStage, StageState};
pub use types::{ComplexFixed, ComplexFixed64, Cplx16, Cplx64, Fixed, Fixed64};

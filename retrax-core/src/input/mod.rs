//! Operator and sensor input
//!
//! Debounced sampling of the button lines, the emergency line and the
//! two position sensors.

pub mod frame;
pub mod sampler;

pub use frame::{InputFrame, OperatorInputs, PositionSensors, Snapshot};
pub use sampler::{InputSampler, RawLines, SamplerConfig};

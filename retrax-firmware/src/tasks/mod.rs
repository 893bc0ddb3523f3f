//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
pub mod indicator;
pub mod sampler;
pub mod status;
pub mod storage;
pub mod tick;

pub use controller::controller_task;
pub use indicator::indicator_task;
pub use sampler::{factory_reset_held, sampler_task, InputLines};
pub use status::status_task;
pub use storage::storage_task;
pub use tick::{now_ms, tick_task};

//! Pipeline conversions module
//!
//! Orchestration around the pixel kernels: picking the per-frame conversion
//! once from the configuration, and driving capture -> model input ->
//! display.

mod capture;
mod frame_plan;
mod timing;


pub use capture::CapturePipeline;
pub use frame_plan::{FramePlan, FrameStep};
pub use timing::{StageTiming, StageTimings};

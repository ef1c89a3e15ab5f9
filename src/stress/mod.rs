//! CPU stress subsystem.
//!
//! # Data Flow
//! ```text
//! GET /stress?duration=..&workers=..
//!     → params.rs (parse, validate, clamp)
//!     → generator.rs (fan out N blocking units, join all)
//!     → duration.rs (render elapsed time for the response)
//! ```

pub mod duration;
pub mod generator;
pub mod params;

pub use duration::{format_go_duration, parse_go_duration};
pub use generator::run_burst;
pub use params::{StressLimits, StressParameters};

//! Interactive terminal demo for tilepath.
//!
//! Paint walls, place the start and destination, then watch breadth-first
//! search flood the grid one cell per tick before the route is traced back.

pub mod config;
pub mod presets;
pub mod visualizer;

pub use config::DemoConfig;
pub use presets::Preset;
pub use visualizer::{Brush, Overlay, Visualizer};

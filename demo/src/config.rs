//! Command-line configuration for the demo.

use std::time::Duration;

use clap::Parser;

use crate::presets::Preset;

/// Watch breadth-first search find a route on a tile grid.
///
/// The defaults fit an 80 x 24 terminal.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "tilepath", version, about)]
pub struct DemoConfig {
    /// Number of grid rows.
    #[arg(long, default_value_t = 16)]
    pub rows: i32,

    /// Number of grid columns. Each tile is two terminal cells wide.
    #[arg(long, default_value_t = 38)]
    pub columns: i32,

    /// Milliseconds between animation ticks (33 is about 30 frames/s).
    #[arg(long, default_value_t = 33)]
    pub tick_ms: u64,

    /// Cells revealed per tick while the search animates.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub steps_per_tick: u32,

    /// Initial layout.
    #[arg(long, value_enum, default_value_t = Preset::Empty)]
    pub layout: Preset,

    /// Do not capture the mouse.
    #[arg(long)]
    pub no_mouse: bool,
}

impl DemoConfig {
    /// The tick interval.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

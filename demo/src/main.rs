//! Terminal path-finding visualiser.
//!
//! Run: cargo run --bin tilepath -- --layout maze

use clap::Parser;
use tilepath_demo::{DemoConfig, Visualizer};
use tilepath_term::{App, AppConfig, CrosstermDriver};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = DemoConfig::parse();
    let grid = config.layout.build(config.rows, config.columns)?;
    let (width, height) = Visualizer::canvas_size(&grid);

    let model = Visualizer::new(grid, config.steps_per_tick);
    let driver = CrosstermDriver::new().with_mouse(!config.no_mouse);
    let mut app = App::new(AppConfig {
        model,
        driver,
        width,
        height,
        tick: config.tick(),
    });
    app.run()?;
    Ok(())
}

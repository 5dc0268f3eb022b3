//! The demo's [`Model`]: grid editing, the animated search, and drawing.

use tilepath_core::{Position, TileGrid, TileState};
use tilepath_search::{Discovery, PathFinder, PathReconstructor, Route, SearchResult};
use tilepath_term::{AttrMask, Canvas, Color, Effect, Glyph, Key, Model, MouseAction, Msg, Style};

/// Terminal cells per tile, horizontally.
pub const CELL_WIDTH: i32 = 2;
/// Terminal cells per tile, vertically.
pub const CELL_HEIGHT: i32 = 1;

const LEGEND: [&str; 4] = [
    "How to use it?",
    "s: place start   d: place destination   w: draw walls",
    "left click/drag: paint with the brush   right click: clear a tile",
    "o: run the search   r: reset   q: quit",
];
/// Legend lines plus the brush/status line.
pub const LEGEND_HEIGHT: i32 = LEGEND.len() as i32 + 1;
const LEGEND_WIDTH: i32 = 68;

// Colours
const COL_EMPTY: Color = Color::from_rgb(235, 235, 235);
const COL_WALL: Color = Color::from_rgb(20, 20, 20);
const COL_START: Color = Color::from_rgb(40, 170, 60);
const COL_DESTINATION: Color = Color::from_rgb(40, 80, 220);
const COL_SEARCHING: Color = Color::from_rgb(255, 182, 193);
const COL_PATH: Color = Color::from_rgb(255, 150, 30);
const COL_MARK: Color = Color::from_rgb(255, 255, 255);
const COL_LEGEND_FG: Color = Color::from_rgb(200, 200, 200);
const COL_STATUS_FG: Color = Color::from_rgb(240, 210, 90);

/// What a primary click paints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Brush {
    #[default]
    Wall,
    Start,
    Destination,
}

impl Brush {
    fn label(self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::Start => "start",
            Self::Destination => "destination",
        }
    }
}

/// Highlight drawn over an empty tile by the last search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Searching,
    Path,
}

enum Phase {
    Editing,
    Searching(Discovery),
    Tracing(Route<SearchResult>),
}

/// Grid editor and search animator.
pub struct Visualizer {
    grid: TileGrid,
    overlay: Vec<Overlay>,
    brush: Brush,
    phase: Phase,
    steps_per_tick: u32,
    route_len: usize,
    status: String,
}

impl Visualizer {
    /// Create a visualiser over `grid`, revealing `steps_per_tick` cells per
    /// tick while animating.
    pub fn new(grid: TileGrid, steps_per_tick: u32) -> Self {
        Self {
            overlay: vec![Overlay::None; grid.len()],
            grid,
            brush: Brush::default(),
            phase: Phase::Editing,
            steps_per_tick: steps_per_tick.max(1),
            route_len: 0,
            status: String::new(),
        }
    }

    /// Canvas size needed to show `grid` and the legend.
    pub fn canvas_size(grid: &TileGrid) -> (i32, i32) {
        (
            (grid.columns() * CELL_WIDTH).max(LEGEND_WIDTH),
            grid.rows() * CELL_HEIGHT + LEGEND_HEIGHT,
        )
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether a search or route is being animated.
    pub fn is_animating(&self) -> bool {
        !matches!(self.phase, Phase::Editing)
    }

    /// The highlight on `pos`, `Overlay::None` outside the grid.
    pub fn overlay_at(&self, pos: Position) -> Overlay {
        self.grid
            .index(pos)
            .map_or(Overlay::None, |i| self.overlay[i])
    }

    fn key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Char('q') | Key::Escape => return Some(Effect::End),
            Key::Char('r') => self.reset(),
            _ if self.is_animating() => {}
            Key::Char('s') => self.brush = Brush::Start,
            Key::Char('d') => self.brush = Brush::Destination,
            Key::Char('w') => self.brush = Brush::Wall,
            Key::Char('o') => self.run(),
            _ => {}
        }
        None
    }

    fn mouse(&mut self, action: MouseAction, x: i32, y: i32) {
        if self.is_animating() {
            return;
        }
        let Some(pos) = Position::from_pixel(x, y, CELL_WIDTH, CELL_HEIGHT)
            .filter(|&p| self.grid.contains(p))
        else {
            return;
        };
        let edit = match action {
            MouseAction::Main => match self.brush {
                Brush::Wall => self.grid.set_tile(pos, TileState::Wall),
                Brush::Start => self.grid.set_start(pos),
                Brush::Destination => self.grid.set_destination(pos),
            },
            MouseAction::Secondary => self.grid.clear_tile(pos),
            _ => return,
        };
        match edit {
            Ok(()) => {
                if let Some(i) = self.grid.index(pos) {
                    self.overlay[i] = Overlay::None;
                }
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    fn reset(&mut self) {
        // Dropping an in-flight search or route cancels it.
        self.phase = Phase::Editing;
        self.grid.reset();
        self.overlay.fill(Overlay::None);
        self.route_len = 0;
        self.status.clear();
    }

    fn run(&mut self) {
        self.overlay.fill(Overlay::None);
        self.route_len = 0;
        match PathFinder::search(&self.grid) {
            Ok(discovery) => {
                log::info!("demo: search started");
                self.status = "searching...".to_string();
                self.phase = Phase::Searching(discovery);
            }
            Err(e) => self.status = format!("cannot search: {e}"),
        }
    }

    fn paint(&mut self, pos: Position, overlay: Overlay) {
        if let Some(i) = self.grid.index(pos) {
            self.overlay[i] = overlay;
        }
    }

    /// Pull one element from the running animation. Returns whether the
    /// animation continues.
    fn advance(&mut self) -> bool {
        match std::mem::replace(&mut self.phase, Phase::Editing) {
            Phase::Editing => false,
            Phase::Searching(mut discovery) => {
                if let Some(pos) = discovery.next() {
                    self.paint(pos, Overlay::Searching);
                    self.phase = Phase::Searching(discovery);
                    return true;
                }
                let result = discovery.finish();
                let explored = result.discovered();
                if !result.found() {
                    self.status = format!("destination unreachable ({explored} cells explored)");
                    return false;
                }
                match PathReconstructor::reconstruct_owned(result) {
                    Ok(route) => {
                        self.status = format!("found after exploring {explored} cells, tracing...");
                        self.phase = Phase::Tracing(route);
                        true
                    }
                    Err(e) => {
                        self.status = e.to_string();
                        false
                    }
                }
            }
            Phase::Tracing(mut route) => match route.next() {
                Some(Ok(pos)) => {
                    self.paint(pos, Overlay::Path);
                    self.route_len += 1;
                    self.phase = Phase::Tracing(route);
                    true
                }
                Some(Err(e)) => {
                    log::error!("demo: {e}");
                    self.status = e.to_string();
                    false
                }
                None => {
                    self.status = format!("shortest route: {} steps", self.route_len + 1);
                    false
                }
            },
        }
    }

    fn tick(&mut self) {
        for _ in 0..self.steps_per_tick {
            if !self.advance() {
                break;
            }
        }
    }

    fn tile_style(&self, pos: Position, state: TileState) -> (char, Style) {
        let bg = match state {
            TileState::Empty => match self.overlay_at(pos) {
                Overlay::None => COL_EMPTY,
                Overlay::Searching => COL_SEARCHING,
                Overlay::Path => COL_PATH,
            },
            TileState::Wall => COL_WALL,
            TileState::Start => COL_START,
            TileState::Destination => COL_DESTINATION,
        };
        let ch = if state.is_endpoint() { state.glyph() } else { ' ' };
        let style = Style::default()
            .with_fg(COL_MARK)
            .with_bg(bg)
            .with_attrs(AttrMask::BOLD);
        (ch, style)
    }
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Tick => self.tick(),
            Msg::KeyDown { key } => return self.key(key),
            Msg::Mouse { action, x, y } => self.mouse(action, x, y),
            Msg::Quit => return Some(Effect::End),
            Msg::Init | Msg::Screen { .. } => {}
        }
        None
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.fill(Glyph::default());

        for (pos, state) in self.grid.iter() {
            let (ch, style) = self.tile_style(pos, state);
            let (x, y) = (pos.column * CELL_WIDTH, pos.row * CELL_HEIGHT);
            for dy in 0..CELL_HEIGHT {
                for dx in 0..CELL_WIDTH {
                    let c = if dx == 0 && dy == 0 { ch } else { ' ' };
                    canvas.set(x + dx, y + dy, Glyph::new(c, style));
                }
            }
        }

        let top = self.grid.rows() * CELL_HEIGHT;
        let legend = Style::default().with_fg(COL_LEGEND_FG);
        for (i, line) in LEGEND.iter().enumerate() {
            let style = if i == 0 {
                legend.with_attrs(AttrMask::BOLD)
            } else {
                legend
            };
            canvas.text(0, top + i as i32, line, style);
        }

        let status_line = if self.status.is_empty() {
            format!("brush: {}", self.brush.label())
        } else {
            format!("brush: {}   {}", self.brush.label(), self.status)
        };
        canvas.text(
            0,
            top + LEGEND.len() as i32,
            &status_line,
            Style::default().with_fg(COL_STATUS_FG),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, column: i32) -> Position {
        Position::new(row, column)
    }

    fn click(v: &mut Visualizer, action: MouseAction, pos: Position) {
        v.update(Msg::Mouse {
            action,
            x: pos.column * CELL_WIDTH,
            y: pos.row * CELL_HEIGHT,
        });
    }

    fn run_to_end(v: &mut Visualizer) {
        v.update(Msg::char('o'));
        for _ in 0..1000 {
            if !v.is_animating() {
                return;
            }
            v.update(Msg::Tick);
        }
        panic!("animation did not finish");
    }

    fn open_3x3() -> Visualizer {
        let mut grid = TileGrid::new(3, 3).unwrap();
        grid.set_start(p(0, 0)).unwrap();
        grid.set_destination(p(2, 2)).unwrap();
        Visualizer::new(grid, 1)
    }

    #[test]
    fn keys_select_the_brush() {
        let mut v = Visualizer::new(TileGrid::new(2, 2).unwrap(), 1);
        assert_eq!(v.brush(), Brush::Wall);
        v.update(Msg::char('s'));
        assert_eq!(v.brush(), Brush::Start);
        v.update(Msg::char('d'));
        assert_eq!(v.brush(), Brush::Destination);
        v.update(Msg::char('w'));
        assert_eq!(v.brush(), Brush::Wall);
    }

    #[test]
    fn clicks_paint_with_the_brush() {
        let mut v = Visualizer::new(TileGrid::new(3, 4).unwrap(), 1);
        click(&mut v, MouseAction::Main, p(1, 2));
        assert_eq!(v.grid().tile(p(1, 2)), Ok(TileState::Wall));

        v.update(Msg::char('s'));
        click(&mut v, MouseAction::Main, p(0, 0));
        click(&mut v, MouseAction::Main, p(2, 3));
        assert_eq!(v.grid().start(), Some(p(2, 3)));
        assert_eq!(v.grid().tile(p(0, 0)), Ok(TileState::Empty));

        click(&mut v, MouseAction::Secondary, p(1, 2));
        assert_eq!(v.grid().tile(p(1, 2)), Ok(TileState::Empty));
    }

    #[test]
    fn pointer_maps_through_cell_width() {
        let mut v = Visualizer::new(TileGrid::new(2, 4).unwrap(), 1);
        // The second terminal column of a tile still hits that tile.
        v.update(Msg::Mouse {
            action: MouseAction::Main,
            x: 5,
            y: 1,
        });
        assert_eq!(v.grid().tile(p(1, 2)), Ok(TileState::Wall));
        // Clicks on the legend are ignored.
        v.update(Msg::Mouse {
            action: MouseAction::Main,
            x: 0,
            y: 4,
        });
        assert_eq!(v.grid().count(TileState::Wall), 1);
    }

    #[test]
    fn run_without_endpoints_reports() {
        let mut v = Visualizer::new(TileGrid::new(2, 2).unwrap(), 1);
        v.update(Msg::char('o'));
        assert!(!v.is_animating());
        assert_eq!(v.status(), "cannot search: no start tile is set");
    }

    #[test]
    fn full_run_paints_search_then_route() {
        let mut v = open_3x3();
        run_to_end(&mut v);
        for pos in [p(2, 1), p(2, 0), p(1, 0)] {
            assert_eq!(v.overlay_at(pos), Overlay::Path);
        }
        for pos in [p(0, 1), p(1, 1), p(0, 2), p(1, 2)] {
            assert_eq!(v.overlay_at(pos), Overlay::Searching);
        }
        assert_eq!(v.overlay_at(p(0, 0)), Overlay::None);
        assert_eq!(v.overlay_at(p(2, 2)), Overlay::None);
        assert_eq!(v.status(), "shortest route: 4 steps");
    }

    #[test]
    fn one_cell_per_tick() {
        let mut v = open_3x3();
        v.update(Msg::char('o'));
        v.update(Msg::Tick);
        assert_eq!(v.overlay_at(p(1, 0)), Overlay::Searching);
        assert_eq!(v.overlay_at(p(0, 1)), Overlay::None);
        v.update(Msg::Tick);
        assert_eq!(v.overlay_at(p(0, 1)), Overlay::Searching);
    }

    #[test]
    fn unreachable_destination_is_reported() {
        let grid = TileGrid::parse("S#D").unwrap();
        let mut v = Visualizer::new(grid, 4);
        run_to_end(&mut v);
        assert_eq!(v.status(), "destination unreachable (1 cells explored)");
    }

    #[test]
    fn edits_are_ignored_while_animating() {
        let mut v = open_3x3();
        v.update(Msg::char('o'));
        assert!(v.is_animating());
        click(&mut v, MouseAction::Main, p(1, 1));
        v.update(Msg::char('s'));
        assert_eq!(v.grid().tile(p(1, 1)), Ok(TileState::Empty));
        assert_eq!(v.brush(), Brush::Wall);
    }

    #[test]
    fn reset_cancels_animation() {
        let mut v = open_3x3();
        v.update(Msg::char('o'));
        v.update(Msg::Tick);
        v.update(Msg::char('r'));
        assert!(!v.is_animating());
        assert_eq!(v.grid(), &TileGrid::new(3, 3).unwrap());
        assert_eq!(v.overlay_at(p(1, 0)), Overlay::None);
    }

    #[test]
    fn quit_ends_the_app() {
        let mut v = open_3x3();
        assert_eq!(v.update(Msg::char('q')), Some(Effect::End));
        assert_eq!(v.update(Msg::KeyDown { key: Key::Escape }), Some(Effect::End));
    }

    #[test]
    fn draw_colours_tiles_and_legend() {
        let mut v = open_3x3();
        run_to_end(&mut v);
        let (w, h) = Visualizer::canvas_size(v.grid());
        assert_eq!((w, h), (LEGEND_WIDTH, 3 + LEGEND_HEIGHT));
        let mut canvas = Canvas::new(w, h);
        v.draw(&mut canvas);

        assert_eq!(canvas.at(0, 0).ch, 'S');
        assert_eq!(canvas.at(0, 0).style.bg, COL_START);
        assert_eq!(canvas.at(4, 2).ch, 'D');
        assert_eq!(canvas.at(1, 1).style.bg, COL_PATH);
        assert_eq!(canvas.at(2, 0).style.bg, COL_SEARCHING);
        assert_eq!(canvas.at(0, 3).ch, 'H');
        assert_eq!(canvas.at(0, 3 + LEGEND.len() as i32).ch, 'b');
    }
}

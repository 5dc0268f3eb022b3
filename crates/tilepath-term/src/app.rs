//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use crate::canvas::{compute_frame, Canvas, Frame};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Repaint every cell on the next frame, not only the changed ones.
    Redraw,
    /// Signal the application loop to stop.
    End,
}

// ---------------------------------------------------------------------------
// Model trait
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `canvas`.
    fn draw(&self, canvas: &mut Canvas);
}

// ---------------------------------------------------------------------------
// Driver trait
// ---------------------------------------------------------------------------

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Wait up to `timeout` for input and send every pending message
    /// through `tx`.
    fn poll_msgs(
        &mut self,
        timeout: Duration,
        tx: &Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Write a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up / restore the terminal.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
    /// Interval between [`Msg::Tick`] messages.
    pub tick: Duration,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
    tick: Duration,
}

impl<M: Model, D: Driver> App<M, D> {
    /// Create a new application from a configuration.
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
            tick: config.tick.max(Duration::from_millis(1)),
        }
    }

    /// The model, e.g. to inspect its state after [`run`](App::run).
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the main Model-View-Update loop.
    ///
    /// 1. Initialises the driver.
    /// 2. Sends `Msg::Init` through the model.
    /// 3. Loops: poll input until the next tick is due, send `Msg::Tick`,
    ///    draw, diff, flush.
    /// 4. Stops when the model returns `Effect::End`.
    ///
    /// The driver is closed on every exit path.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;
        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        let mut prev = Canvas::new(self.width, self.height);
        let mut curr = Canvas::new(self.width, self.height);

        tx.send(Msg::Init).ok();
        let mut next_tick = Instant::now() + self.tick;

        loop {
            if self.process_pending(&rx, &mut prev, &mut curr)? {
                log::debug!("app: model requested end");
                return Ok(());
            }

            let now = Instant::now();
            if now >= next_tick {
                tx.send(Msg::Tick).ok();
                next_tick += self.tick;
                // Skip ticks we fell behind on instead of bursting them.
                if next_tick < now {
                    next_tick = now + self.tick;
                }
                continue;
            }

            self.driver
                .poll_msgs(next_tick.saturating_duration_since(now), &tx)?;
        }
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    /// Returns `true` if the app should stop.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        prev: &mut Canvas,
        curr: &mut Canvas,
    ) -> Result<bool, Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Msg::Screen { .. } = msg {
                // The terminal may have discarded its contents.
                prev.invalidate();
            }
            match self.model.update(msg) {
                Some(Effect::End) => return Ok(true),
                Some(Effect::Redraw) => prev.invalidate(),
                None => {}
            }
            needs_draw = true;
        }

        if needs_draw {
            self.model.draw(curr);
            let frame = compute_frame(prev, curr);
            if !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            prev.copy_from(curr);
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Glyph, Style};
    use crate::messages::Key;
    use std::collections::VecDeque;

    /// Counts ticks and quits on `q`.
    #[derive(Default)]
    struct Counter {
        ticks: usize,
        inits: usize,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::Init => self.inits += 1,
                Msg::Tick => self.ticks += 1,
                Msg::KeyDown { key: Key::Char('q') } => return Some(Effect::End),
                _ => {}
            }
            None
        }

        fn draw(&self, canvas: &mut Canvas) {
            let digit = char::from_digit((self.ticks % 10) as u32, 10).unwrap_or('?');
            canvas.set(0, 0, Glyph::new(digit, Style::default()));
        }
    }

    /// Replays scripted input, one batch per poll.
    struct Scripted {
        polls: VecDeque<Vec<Msg>>,
        frames: Vec<Frame>,
        closed: bool,
    }

    impl Driver for Scripted {
        fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }

        fn poll_msgs(
            &mut self,
            timeout: Duration,
            tx: &Sender<Msg>,
        ) -> Result<(), Box<dyn std::error::Error>> {
            let batch = self.polls.pop_front().unwrap_or_else(|| vec![Msg::char('q')]);
            if batch.is_empty() {
                std::thread::sleep(timeout.min(Duration::from_millis(5)));
            }
            for m in batch {
                tx.send(m).ok();
            }
            Ok(())
        }

        fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.frames.push(frame);
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    #[test]
    fn run_stops_on_end_and_closes_driver() {
        let driver = Scripted {
            polls: VecDeque::from(vec![vec![], vec![Msg::char('x')]]),
            frames: Vec::new(),
            closed: false,
        };
        let mut app = App::new(AppConfig {
            model: Counter::default(),
            driver,
            width: 4,
            height: 1,
            tick: Duration::from_secs(60),
        });
        app.run().unwrap();
        assert_eq!(app.model().inits, 1);
        assert!(app.driver.closed);
        // The first draw puts '0' in an empty canvas.
        assert_eq!(app.driver.frames[0].cells[0].glyph.ch, '0');
    }

    #[test]
    fn ticks_are_delivered() {
        let driver = Scripted {
            polls: VecDeque::from(vec![vec![]]),
            frames: Vec::new(),
            closed: false,
        };
        let mut app = App::new(AppConfig {
            model: Counter::default(),
            driver,
            width: 1,
            height: 1,
            tick: Duration::from_millis(1),
        });
        app.run().unwrap();
        assert!(app.model().ticks >= 1);
    }
}

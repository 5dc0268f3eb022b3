//! **tilepath-term**: a small Elm-style terminal front-end.
//!
//! A [`Model`] turns [`Msg`]s into state changes and draws itself onto a
//! [`Canvas`]. The [`App`] loop diffs successive canvases and hands only the
//! changed glyphs to a [`Driver`]; [`CrosstermDriver`] is the terminal
//! implementation.

pub mod app;
pub mod canvas;
pub mod messages;
pub mod terminal;

pub use app::{App, AppConfig, Driver, Effect, Model};
pub use canvas::{compute_frame, AttrMask, Canvas, Color, Frame, FrameCell, Glyph, Style};
pub use messages::{Key, MouseAction, Msg};
pub use terminal::CrosstermDriver;

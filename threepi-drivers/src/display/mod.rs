//! Character display implementations

pub mod screen;

pub use screen::{CharScreen, LcdScreen};

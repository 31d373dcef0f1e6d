//! Color values handed to the engine.

mod color;

pub use color::Color;

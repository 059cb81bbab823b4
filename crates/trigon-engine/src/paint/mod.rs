//! Color type and the animated fill-color helper.

mod color;
mod pulse;

pub use color::Color;
pub use pulse::ColorPulse;

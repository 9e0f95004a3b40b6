//! Terminal stand-ins for the microphone and the speaker.

mod capture;
mod output;

pub use capture::ConsoleCapture;
pub use output::ConsoleOutput;

pub mod cues;

pub use cues::TerminalCues;

use std::io::Write;

use anyhow::{Context, Result};
use tracing::debug;

use crate::game::{EventSink, GameEvent};

const BELL: &[u8] = b"\x07";

/// Plays game events as terminal bells
///
/// Bells are queued while the game advances and written out by
/// [`TerminalCues::flush`], after the frame has been drawn.
#[derive(Debug, Default)]
pub struct TerminalCues {
    muted: bool,
    queued: usize,
    eaten: u32,
    crashes: u32,
}

impl TerminalCues {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            ..Default::default()
        }
    }

    pub fn flush(&mut self, out: &mut impl Write) -> Result<()> {
        if self.queued == 0 {
            return Ok(());
        }

        for _ in 0..self.queued {
            out.write_all(BELL).context("Failed to ring terminal bell")?;
        }
        out.flush().context("Failed to ring terminal bell")?;
        self.queued = 0;
        Ok(())
    }

    pub fn queued(&self) -> usize {
        self.queued
    }

    pub fn eaten(&self) -> u32 {
        self.eaten
    }

    pub fn crashes(&self) -> u32 {
        self.crashes
    }
}

impl EventSink for TerminalCues {
    fn notify(&mut self, event: GameEvent) {
        match event {
            GameEvent::Ate => self.eaten += 1,
            GameEvent::Crashed => self.crashes += 1,
        }
        debug!(?event, muted = self.muted, "sound cue");

        if !self.muted {
            self.queued += 1;
        }
    }
}

use std::time::{Duration, Instant};

use crate::game::TickOutcome;

/// Session statistics shown next to the board. Nothing here outlives the
/// process.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub food_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            food_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn record(&mut self, outcome: TickOutcome) {
        match outcome {
            TickOutcome::Ate { score } => {
                self.food_eaten += 1;
                self.high_score = self.high_score.max(score);
            }
            TickOutcome::Crashed { final_score, .. } => {
                self.games_played += 1;
                self.high_score = self.high_score.max(final_score);
            }
            TickOutcome::Idle | TickOutcome::Moved => {}
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

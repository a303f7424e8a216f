use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Events worth replaying from a driver session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Event {
    /// Episode started over
    Reset { ink_remaining: usize },
    /// Nib stepped to a target cell
    Step {
        target_x: i32,
        target_y: i32,
        reward: f32,
        distance_tot: f32,
        ink_remaining: usize,
    },
}

/// Logged event with timestamp
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Milliseconds since the session started
    pub timestamp_ms: u64,
    pub event: Event,
}

/// Session recorder for one driver run
pub struct EpisodeLog {
    start_time: Instant,
    events: Vec<LoggedEvent>,
}

impl EpisodeLog {
    pub fn new() -> Self {
        EpisodeLog {
            start_time: Instant::now(),
            events: Vec::new(),
        }
    }

    /// Log an event with the current timestamp
    pub fn log(&mut self, event: Event) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.events.push(LoggedEvent {
            timestamp_ms,
            event,
        });
    }

    /// Get all logged events
    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.events)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Print log to console
    pub fn print(&self) {
        println!("\n=== Episode Log ({} events) ===", self.events.len());
        for (i, logged) in self.events.iter().enumerate() {
            println!("[{:6}ms] #{:3} {:?}", logged.timestamp_ms, i + 1, logged.event);
        }
        println!("=== End of Log ===\n");
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut resets = 0;
        let mut steps = 0;
        let mut reward_sum = 0.0f32;

        for logged in &self.events {
            match &logged.event {
                Event::Reset { .. } => resets += 1,
                Event::Step { reward, .. } => {
                    steps += 1;
                    reward_sum += reward;
                }
            }
        }

        let duration = self.events.last().map(|e| e.timestamp_ms).unwrap_or(0);

        format!(
            "Session Duration: {}ms\n\
             Episodes Started: {}\n\
             Steps: {} (total reward {:.1})",
            duration, resets, steps, reward_sum
        )
    }
}

impl Default for EpisodeLog {
    fn default() -> Self {
        Self::new()
    }
}

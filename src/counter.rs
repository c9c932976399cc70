use std::time::Duration;

/// Stat value that counts up from zero once started.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedCounter {
    value: u32,
    duration: Duration,
    elapsed: Duration,
    started: bool,
}

impl AnimatedCounter {
    pub fn new(value: u32, duration: Duration) -> Self {
        Self {
            value,
            duration,
            elapsed: Duration::ZERO,
            started: false,
        }
    }

    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn update(&mut self, dt: Duration) {
        if !self.started || self.is_finished() {
            return;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn is_finished(&self) -> bool {
        self.started && self.elapsed >= self.duration
    }

    fn progress(&self) -> f32 {
        if !self.started {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn displayed(&self) -> u32 {
        (self.progress() * self.value as f32).round() as u32
    }

    /// Displayed value, with a `+` once a large total has counted past 10.
    pub fn label(&self) -> String {
        let shown = self.displayed();
        if shown >= 10 && self.value > 20 {
            format!("{shown}+")
        } else {
            shown.to_string()
        }
    }
}

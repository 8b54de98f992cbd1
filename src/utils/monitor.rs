use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub phase_time: Duration,
    pub elapsed_time: Duration,
}

/// Wall-clock timing for the extract / transform / load phases of a run.
pub struct PhaseMonitor {
    start_time: Instant,
    last_mark: Mutex<Instant>,
    phases: Mutex<Vec<PhaseStats>>,
    enabled: bool,
}

impl PhaseMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_mark: Mutex::new(now),
            phases: Mutex::new(Vec::new()),
            enabled,
        }
    }

    /// Closes the current phase and returns its timing, or `None` when disabled.
    pub fn mark(&self, phase: &str) -> Option<PhaseStats> {
        if !self.enabled {
            return None;
        }

        let now = Instant::now();
        let mut last = self.last_mark.lock().ok()?;
        let stats = PhaseStats {
            phase: phase.to_string(),
            phase_time: now.duration_since(*last),
            elapsed_time: now.duration_since(self.start_time),
        };
        *last = now;

        self.phases.lock().ok()?.push(stats.clone());
        Some(stats)
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.mark(phase) {
            tracing::info!(
                "📊 {} - Phase: {:?}, Total: {:?}",
                stats.phase,
                stats.phase_time,
                stats.elapsed_time
            );
        }
    }

    pub fn log_final_stats(&self) {
        if !self.enabled {
            return;
        }
        let phases = self.phases.lock().map(|p| p.len()).unwrap_or(0);
        tracing::info!(
            "📊 Final Stats - Total Time: {:?}, Phases: {}",
            self.start_time.elapsed(),
            phases
        );
    }

    pub fn phases(&self) -> Vec<PhaseStats> {
        self.phases.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl Default for PhaseMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_records_nothing() {
        let monitor = PhaseMonitor::default();
        assert!(monitor.mark("extract").is_none());
        assert!(monitor.phases().is_empty());
    }

    #[test]
    fn test_enabled_monitor_records_phases_in_order() {
        let monitor = PhaseMonitor::new(true);
        monitor.mark("extract");
        monitor.mark("transform");

        let phases = monitor.phases();
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].phase, "extract");
        assert_eq!(phases[1].phase, "transform");
        assert!(phases[1].elapsed_time >= phases[0].elapsed_time);
    }
}

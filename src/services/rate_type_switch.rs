use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Default)]
struct SwitchState {
    generation: u64,
    switching: bool,
}

/// Cosmetic "switching" flag raised on every rate type change
///
/// Each change restarts the delay: the pending timer is aborted and only the
/// timer of the latest change may clear the flag.
pub struct RateTypeSwitch {
    delay: Duration,
    state: Arc<Mutex<SwitchState>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl RateTypeSwitch {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: Arc::new(Mutex::new(SwitchState::default())),
            pending: Mutex::new(None),
        }
    }

    /// Raise the flag and (re)start the delay. Must run inside a tokio runtime.
    pub fn trigger(&self) {
        let generation = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            state.generation += 1;
            state.switching = true;
            state.generation
        };

        let state = self.state.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = state.lock().unwrap_or_else(|e| e.into_inner());
            if state.generation == generation {
                state.switching = false;
            } else {
                debug!(generation, current = state.generation, "Stale switch timer ignored");
            }
        });

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    pub fn is_switching(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).switching
    }
}

impl Drop for RateTypeSwitch {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_flag_clears_after_delay() {
        let switch = RateTypeSwitch::new(Duration::from_millis(300));
        assert!(!switch.is_switching());

        switch.trigger();
        assert!(switch.is_switching());

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(switch.is_switching());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!switch.is_switching());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_trigger_wins() {
        let switch = RateTypeSwitch::new(Duration::from_millis(300));

        switch.trigger();
        tokio::time::sleep(Duration::from_millis(200)).await;
        switch.trigger();

        // First timer would have fired here
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(switch.is_switching());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!switch.is_switching());
    }
}

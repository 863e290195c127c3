use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// A tick from a particular run of the timer. Ticks from an earlier run can
/// still be sitting in the channel after a restart; `PenaltyTimer::is_current`
/// filters them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub generation: u64,
}

/// Repeating once-per-period ticker. At most one task is scheduled at a time.
pub struct PenaltyTimer {
    period: Duration,
    sender: mpsc::Sender<TimerTick>,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl PenaltyTimer {
    pub fn new(period: Duration, sender: mpsc::Sender<TimerTick>) -> Self {
        Self {
            period,
            sender,
            generation: 0,
            task: None,
        }
    }

    /// Cancels any running schedule and starts a fresh one. The first tick
    /// fires one full period from now.
    pub fn start(&mut self) {
        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        let period = self.period;
        let sender = self.sender.clone();

        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if sender.send(TimerTick { generation }).await.is_err() {
                    break;
                }
            }
        }));

        debug!("Penalty timer started (generation {})", generation);
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Penalty timer cancelled (generation {})", self.generation);
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().map_or(false, |task| !task.is_finished())
    }

    pub fn is_current(&self, tick: &TimerTick) -> bool {
        self.task.is_some() && tick.generation == self.generation
    }
}

impl Drop for PenaltyTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

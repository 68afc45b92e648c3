use mindful_core::meditation::{Meditation, MeditationCompletion, MeditationService};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

const MIN_TICK: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
    Completed,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerStatus {
    pub meditation_id: Option<String>,
    pub state: PlaybackState,
    pub elapsed: Duration,
    pub total: Duration,
}

impl PlayerStatus {
    pub fn remaining(&self) -> Duration {
        self.total.saturating_sub(self.elapsed)
    }
}

/// Countdown player for a single meditation at a time.
///
/// A ticker task advances `elapsed` once per tick while playing. Pausing
/// stops the ticker; the remaining time is kept. Finished sessions are
/// reported to the meditation service.
pub struct MeditationPlayer {
    service: Arc<dyn MeditationService>,
    tick: Duration,
    status: Arc<watch::Sender<PlayerStatus>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl MeditationPlayer {
    pub fn new(service: Arc<dyn MeditationService>) -> Self {
        Self::with_tick(service, Duration::from_secs(1))
    }

    /// `tick` is clamped to at least one millisecond.
    pub fn with_tick(service: Arc<dyn MeditationService>, tick: Duration) -> Self {
        let (status, _) = watch::channel(PlayerStatus::default());
        Self {
            service,
            tick: tick.max(MIN_TICK),
            status: Arc::new(status),
            ticker: Mutex::new(None),
        }
    }

    pub fn status(&self) -> PlayerStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PlayerStatus> {
        self.status.subscribe()
    }

    /// Starts playing from the beginning, replacing whatever was playing.
    pub fn start(&self, meditation: &Meditation) {
        self.stop_ticker();
        tracing::info!("[MeditationPlayer] Starting '{}'", meditation.id);
        self.status.send_replace(PlayerStatus {
            meditation_id: Some(meditation.id.clone()),
            state: PlaybackState::Playing,
            elapsed: Duration::ZERO,
            total: meditation.duration(),
        });
        self.spawn_ticker();
    }

    pub fn pause(&self) {
        if self.status.borrow().state != PlaybackState::Playing {
            return;
        }
        self.stop_ticker();
        self.status.send_modify(|s| s.state = PlaybackState::Paused);
    }

    pub fn resume(&self) {
        if self.status.borrow().state != PlaybackState::Paused {
            return;
        }
        self.status.send_modify(|s| s.state = PlaybackState::Playing);
        self.spawn_ticker();
    }

    /// Stops playback early. A partially listened session is still reported.
    pub async fn stop(&self) {
        self.stop_ticker();

        let mut stopped = None;
        self.status.send_modify(|s| {
            if matches!(s.state, PlaybackState::Playing | PlaybackState::Paused) {
                s.state = PlaybackState::Stopped;
                stopped = s.meditation_id.clone().map(|id| (id, s.elapsed));
            }
        });

        if let Some((id, elapsed)) = stopped
            && !elapsed.is_zero()
        {
            record(
                self.service.as_ref(),
                MeditationCompletion::new(id, elapsed, false),
            )
            .await;
        }
    }

    /// Waits for the current session to finish playing and be reported.
    ///
    /// Returns immediately when nothing is playing.
    pub async fn finished(&self) {
        let handle = self.lock_ticker().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    /// Aborts the ticker, unless it already completed the session and is
    /// reporting it; that report is left to finish in the background.
    fn stop_ticker(&self) {
        if let Some(handle) = self.lock_ticker().take()
            && self.status.borrow().state != PlaybackState::Completed
        {
            handle.abort();
        }
    }

    fn spawn_ticker(&self) {
        let status = Arc::clone(&self.status);
        let service = Arc::clone(&self.service);
        let tick = self.tick;
        let handle = tokio::spawn(async move { run_ticker(status, service, tick).await });
        if let Some(previous) = self.lock_ticker().replace(handle) {
            previous.abort();
        }
    }

    fn lock_ticker(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        // A poisoned lock only means a panic elsewhere; the handle is still valid.
        self.ticker.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for MeditationPlayer {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

async fn run_ticker(
    status: Arc<watch::Sender<PlayerStatus>>,
    service: Arc<dyn MeditationService>,
    tick: Duration,
) {
    let mut interval = tokio::time::interval(tick);
    // The first tick completes immediately.
    interval.tick().await;

    loop {
        interval.tick().await;

        let mut finished = None;
        let mut playing = true;
        status.send_modify(|s| {
            if s.state != PlaybackState::Playing {
                playing = false;
                return;
            }
            s.elapsed = (s.elapsed + tick).min(s.total);
            if s.elapsed >= s.total {
                s.state = PlaybackState::Completed;
                finished = s.meditation_id.clone().map(|id| (id, s.elapsed));
            }
        });

        if let Some((id, elapsed)) = finished {
            tracing::info!("[MeditationPlayer] Completed '{}'", id);
            record(service.as_ref(), MeditationCompletion::new(id, elapsed, true)).await;
            return;
        }
        if !playing {
            return;
        }
    }
}

async fn record(service: &dyn MeditationService, completion: MeditationCompletion) {
    if let Err(e) = service.record_session(&completion).await {
        tracing::warn!(
            "[MeditationPlayer] Failed to record session for '{}': {}",
            completion.meditation_id,
            e
        );
    }
}

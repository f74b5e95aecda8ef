use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use rand::Rng;
use tokio::time::{MissedTickBehavior, interval, sleep};

use crate::{backdrop::FrameScheduler, domain::weather::ConditionsReport};

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickFrame,
    TickRefresh,
    Input(Event),
    FetchStarted,
    ConditionsFetched(ConditionsReport),
    FetchFailed(String),
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

/// Pending-frame flag shared between the backdrop and the frame clock.
/// Requests made before the clock ticks collapse into one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameSignal {
    pending: Arc<AtomicBool>,
}

impl FrameSignal {
    /// Clears the flag, returning whether a frame was requested.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

impl FrameScheduler for FrameSignal {
    fn request_frame(&mut self) {
        self.pending.store(true, Ordering::Release);
    }
}

/// Display clock: emits `TickFrame` at most once per tick, and only when the
/// backdrop asked for a frame.
pub fn start_frame_task(tx: tokio::sync::mpsc::Sender<AppEvent>, fps: u8, signal: FrameSignal) {
    let fps = fps.clamp(15, 60);
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_millis(1000_u64 / u64::from(fps)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if tx.is_closed() {
                break;
            }
            if signal.take() && tx.send(AppEvent::TickFrame).await.is_err() {
                break;
            }
        }
    });
}

pub fn start_refresh_task(tx: tokio::sync::mpsc::Sender<AppEvent>, refresh_secs: u64) {
    tokio::spawn(async move {
        let base = refresh_secs.max(10);
        loop {
            let wait_secs = {
                let mut rng = rand::rng();
                let jitter = rng.random_range(-0.1f32..0.1f32);
                ((base as f32) * (1.0 + jitter)).max(1.0)
            };
            sleep(Duration::from_secs_f32(wait_secs)).await;
            if tx.send(AppEvent::TickRefresh).await.is_err() {
                break;
            }
        }
    });
}

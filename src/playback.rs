use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::location_point::LocationPoint;

/* Playback animates the reveal of a filtered point list: a timer walks
an index forward and the widget draws the prefix up to it. The state
machine below is pure; `PlaybackDriver` owns the timer. */

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackSpeed {
    Half,
    Normal,
    Double,
    Quintuple,
}

impl PlaybackSpeed {
    pub fn multiplier(&self) -> f64 {
        match self {
            PlaybackSpeed::Half => 0.5,
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::Double => 2.0,
            PlaybackSpeed::Quintuple => 5.0,
        }
    }

    /// One tick reveals one point.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis((1000.0 / self.multiplier()) as u64)
    }
}

#[derive(Debug)]
pub struct Playback {
    total: usize,
    current: usize,
    playing: bool,
    speed: PlaybackSpeed,
}

impl Playback {
    pub fn new(total: usize) -> Self {
        Playback {
            total,
            current: 0,
            playing: false,
            speed: PlaybackSpeed::Normal,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
    }

    pub fn play(&mut self) {
        if self.total != 0 {
            self.playing = true;
        }
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn seek(&mut self, index: usize) {
        self.current = match self.total {
            0 => 0,
            n => index.min(n - 1),
        };
    }

    /// One tick forward. At the last index playback stops instead of
    /// wrapping; returns whether the cursor moved.
    pub fn advance(&mut self) -> bool {
        if self.total == 0 || self.current + 1 >= self.total {
            self.playing = false;
            return false;
        }
        self.current += 1;
        true
    }

    /// The revealed prefix: everything up to and including the cursor.
    pub fn visible<'a>(&self, points: &'a [LocationPoint]) -> &'a [LocationPoint] {
        if points.is_empty() {
            return points;
        }
        let end = self.current.min(points.len() - 1);
        &points[..=end]
    }
}

/// Fixed-rate timer around a shared `Playback`. Ticking starts only on
/// `start`, the interval task is re-armed whenever the speed changes
/// mid-run, and `stop`/`Drop` cancel it (the unmount path). When the
/// cursor reaches the end the task stops itself.
pub struct PlaybackDriver {
    state: Arc<Mutex<Playback>>,
    ticker: Option<JoinHandle<()>>,
}

impl PlaybackDriver {
    pub fn new(total: usize) -> Self {
        PlaybackDriver {
            state: Arc::new(Mutex::new(Playback::new(total))),
            ticker: None,
        }
    }

    pub fn state(&self) -> Arc<Mutex<Playback>> {
        self.state.clone()
    }

    pub fn start(&mut self) {
        self.state.lock().unwrap().play();
        self.rearm();
    }

    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        self.state.lock().unwrap().pause();
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        let playing = {
            let mut state = self.state.lock().unwrap();
            state.set_speed(speed);
            state.is_playing()
        };
        if playing {
            self.rearm();
        }
    }

    fn rearm(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        let state = self.state.clone();
        let period = state.lock().unwrap().speed().tick_interval();
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // a fresh interval yields its first tick immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if !state.lock().unwrap().advance() {
                    break;
                }
            }
        }));
    }
}

impl Drop for PlaybackDriver {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

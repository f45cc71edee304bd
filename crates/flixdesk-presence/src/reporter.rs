//! Presence reporter
//!
//! The peer lives on its own worker thread so socket I/O never blocks the UI
//! thread. The UI side only sends commands; every failure is logged on the
//! worker and never comes back.

use crate::activity::Activity;
use crate::peer::{current_timestamp_secs, PresencePeer, PresenceState};
use flixdesk_core::config::PresenceConfig;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How long shutdown waits for the worker before leaving it behind
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Builds full presence states for one session
#[derive(Debug, Clone)]
pub struct PresenceTracker {
    large_image_key: String,
    large_image_text: String,
    session_start: i64,
}

impl PresenceTracker {
    pub fn new(config: &PresenceConfig) -> Self {
        Self::with_start(config, current_timestamp_secs())
    }

    pub fn with_start(config: &PresenceConfig, session_start: i64) -> Self {
        Self {
            large_image_key: config.large_image_key.clone(),
            large_image_text: config.large_image_text.clone(),
            session_start,
        }
    }

    /// The start timestamp stays fixed so the elapsed time counts from
    /// session start rather than from the last navigation.
    pub fn state_for(&self, activity: Activity) -> PresenceState {
        PresenceState {
            details: activity.details,
            state: activity.state,
            large_image_key: self.large_image_key.clone(),
            large_image_text: self.large_image_text.clone(),
            start: self.session_start,
        }
    }
}

enum Command {
    Update(PresenceState),
    Shutdown,
}

pub struct PresenceReporter {
    tracker: PresenceTracker,
    sender: Sender<Command>,
    worker: Option<JoinHandle<()>>,
    /// Disconnects once the worker has returned
    finished: Receiver<()>,
    shutdown_timeout: Duration,
}

impl PresenceReporter {
    /// Spawn the worker and connect in the background
    pub fn start<P>(peer: P, tracker: PresenceTracker) -> Self
    where
        P: PresencePeer + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let (done, finished) = mpsc::channel::<()>();
        let worker = thread::Builder::new()
            .name("presence".to_string())
            .spawn(move || {
                run_worker(peer, receiver);
                drop(done);
            });

        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("Failed to start presence worker: {}", e);
                None
            }
        };

        Self {
            tracker,
            sender,
            worker,
            finished,
            shutdown_timeout: SHUTDOWN_TIMEOUT,
        }
    }

    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Push a status for a completed navigation to `url`
    pub fn report_url(&self, url: &str) {
        self.report(Activity::from_url(url));
    }

    /// Push a status for a page path
    pub fn report_path(&self, path: &str) {
        self.report(Activity::from_path(path));
    }

    pub fn report(&self, activity: Activity) {
        let state = self.tracker.state_for(activity);
        if self.sender.send(Command::Update(state)).is_err() {
            log::debug!("Presence worker is gone, update dropped");
        }
    }

    /// Disconnect and wait for the worker, at most `shutdown_timeout`.
    /// A worker stuck on the socket is detached.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = self.sender.send(Command::Shutdown);

        match self.finished.recv_timeout(self.shutdown_timeout) {
            Err(RecvTimeoutError::Timeout) => {
                log::warn!(
                    "Presence worker did not stop within {:?}, detaching it",
                    self.shutdown_timeout
                );
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if worker.join().is_err() {
                    log::warn!("Presence worker panicked");
                }
            }
        }
    }
}

impl Drop for PresenceReporter {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_worker<P: PresencePeer>(mut peer: P, receiver: Receiver<Command>) {
    let connected = match peer.connect() {
        Ok(()) => {
            log::info!("Presence connected");
            true
        }
        Err(e) => {
            log::warn!("Failed to initialize presence: {}", e);
            false
        }
    };

    // Updates queued while connecting or sending collapse to the newest one.
    while let Ok(command) = receiver.recv() {
        let Command::Update(mut state) = command else {
            break;
        };

        let mut shutdown = false;
        for queued in receiver.try_iter() {
            match queued {
                Command::Update(newer) => state = newer,
                Command::Shutdown => {
                    shutdown = true;
                    break;
                }
            }
        }

        if connected {
            if let Err(e) = peer.set_presence(&state) {
                log::warn!("Failed to update presence: {}", e);
            }
        }
        if shutdown {
            break;
        }
    }

    if connected {
        if let Err(e) = peer.disconnect() {
            log::debug!("Presence disconnect failed: {}", e);
        }
    }
}

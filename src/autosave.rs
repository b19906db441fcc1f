//! Periodic background save of an open project.

use crate::project::Project;
use crate::store::ProjectStore;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

/// Saves a shared project every `interval` until stopped or dropped.
///
/// The project sits behind a mutex shared with the editor, and the store serializes
/// writes per project name, so an autosave never races a user-triggered save.
pub struct Autosaver {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Autosaver {
    pub fn spawn(
        store: Arc<ProjectStore>,
        project: Arc<Mutex<Project>>,
        interval: Duration,
    ) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new().name("diadrop-autosave".into()).spawn(move || {
            loop {
                match rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
                let mut p = project.lock();
                match store.save(&mut p) {
                    Ok(_) => log::debug!("autosaved {:?}", p.name),
                    // Keep the timer running; the next tick tries again.
                    Err(e) => log::error!("autosave of {:?} failed: {e}", p.name),
                }
            }
        })?;
        Ok(Self { stop: Some(tx), handle: Some(handle) })
    }

    /// Stop the timer and wait for an in-flight save to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

//! Reporting of introspection progress
//!
//! The introspector never logs directly; it emits [`IntrospectionEvent`]s to
//! an injected observer.

use crate::maven::ProfileBundle;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub enum IntrospectionEvent<'a> {
    /// Inquiry build started
    CommandStarted { command: &'a str },

    /// Inquiry build finished
    CommandFinished {
        exit_code: Option<i32>,
        elapsed: Duration,
    },

    ProfileFound { id: &'a str },

    PropertyFound { key: &'a str, value: &'a str },

    Classified { bundle: ProfileBundle },

    ConfigDirResolved { dir: &'a Path, from_override: bool },

    /// The config directory does not exist; it yields no targets
    ConfigDirMissing { dir: &'a Path },

    Completed { targets: usize, elapsed: Duration },
}

pub trait IntrospectionObserver: Send + Sync {
    fn on_event(&self, event: &IntrospectionEvent<'_>);
}

/// Observer that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpObserver;

impl IntrospectionObserver for NoOpObserver {
    fn on_event(&self, _event: &IntrospectionEvent<'_>) {}
}

/// Observer that forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl IntrospectionObserver for LoggingObserver {
    fn on_event(&self, event: &IntrospectionEvent<'_>) {
        match event {
            IntrospectionEvent::CommandStarted { command } => {
                info!(command = %command, "Inspecting POM");
            }
            IntrospectionEvent::CommandFinished { exit_code, elapsed } => {
                debug!(exit_code = ?exit_code, elapsed_ms = elapsed.as_millis(), "Inquiry build finished");
            }
            IntrospectionEvent::ProfileFound { id } => {
                debug!(profile = %id, "Adding profile");
            }
            IntrospectionEvent::PropertyFound { key, value } => {
                debug!(key = %key, value = %value, "Adding property");
            }
            IntrospectionEvent::Classified { bundle } => {
                info!(bundle = %bundle, actions = ?bundle.profiles(), "POM classified");
            }
            IntrospectionEvent::ConfigDirResolved { dir, from_override } => {
                debug!(dir = %dir.display(), from_override, "Database config directory");
            }
            IntrospectionEvent::ConfigDirMissing { dir } => {
                warn!(dir = %dir.display(), "Database config directory does not exist");
            }
            IntrospectionEvent::Completed { targets, elapsed } => {
                info!(targets, elapsed_ms = elapsed.as_millis(), "POM introspection complete");
            }
        }
    }
}

/// Observer recording a textual trace of every event, for tests
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: std::sync::Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl IntrospectionObserver for RecordingObserver {
    fn on_event(&self, event: &IntrospectionEvent<'_>) {
        let line = match event {
            IntrospectionEvent::CommandStarted { command } => format!("started:{}", command),
            IntrospectionEvent::CommandFinished { exit_code, .. } => format!("finished:{:?}", exit_code),
            IntrospectionEvent::ProfileFound { id } => format!("profile:{}", id),
            IntrospectionEvent::PropertyFound { key, value } => format!("property:{}={}", key, value),
            IntrospectionEvent::Classified { bundle } => format!("classified:{}", bundle),
            IntrospectionEvent::ConfigDirResolved { dir, from_override } => {
                format!("config-dir:{}:{}", dir.display(), from_override)
            }
            IntrospectionEvent::ConfigDirMissing { dir } => format!("config-dir-missing:{}", dir.display()),
            IntrospectionEvent::Completed { targets, .. } => format!("completed:{}", targets),
        };
        if let Ok(mut events) = self.events.lock() {
            events.push(line);
        }
    }
}

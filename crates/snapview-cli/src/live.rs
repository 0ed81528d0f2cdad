use std::path::PathBuf;
use std::time::{Duration, Instant};

use snapview_engine::debounce::Debouncer;
use snapview_engine::providers::LiveSnapshotProvider;
use snapview_engine::{ContentProvider, LiveMessage, PreviewContext, Resolution};

/// Feeds live messages to a provider and renders once per burst.
///
/// A burst ends when no message arrives for the debounce window. The
/// settled preview is returned when the next message shows up, since input
/// is read line by line without a timer.
pub struct LiveSession {
    provider: LiveSnapshotProvider,
    debouncer: Debouncer,
    file: PathBuf,
}

impl LiveSession {
    pub fn new(provider: LiveSnapshotProvider, file: PathBuf, window: Duration) -> Self {
        Self {
            provider,
            debouncer: Debouncer::new(window),
            file,
        }
    }

    /// Handles one input line received at `now`.
    ///
    /// Returns the preview of the previous burst if it settled before this
    /// line arrived.
    pub fn feed(&mut self, line: &str, now: Instant) -> Option<String> {
        if line.trim().is_empty() {
            return None;
        }

        let settled = self.debouncer.ready(now).then(|| self.render());

        match LiveMessage::from_json(line) {
            Ok(message) => {
                self.provider.on_message_at(message, now);
                self.debouncer.trigger(now);
            }
            Err(e) => log::warn!("Ignoring malformed message: {e}"),
        }

        settled
    }

    /// The preview after the last message.
    pub fn finish(&mut self) -> String {
        self.render()
    }

    fn render(&mut self) -> String {
        let resolution = Resolution::NoTest;
        let ctx = PreviewContext::new(Some(self.file.as_path()), &resolution);
        self.provider.provide_content(&ctx)
    }
}

//! Snapshots pushed by a running test process.
//!
//! A test reporter sends one [`LiveMessage`] per snapshot as tests run. The
//! provider keeps the most recent burst per test file: entries older than
//! [`LIVE_EXPIRY`] are dropped when the next message for the same file
//! arrives, so a fresh run replaces the previous one.

use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::models::{LiveContent, LiveMessage};
use crate::render::{SnapshotFormatter, rewrite_css_urls};
use crate::snapfile::{is_test_file, test_file_key};

use super::{ContentProvider, PreviewContext};

pub const LIVE_EXPIRY: Duration = Duration::from_millis(1500);

const SELECT_TEST_FILE: &str = "<div>Please select a test file (*.test.*)</div>";
const NO_SNAPSHOTS_RECORDED: &str = "<div>No snapshots recorded for this test file</div>";

#[derive(Debug, Clone)]
struct LiveSnapshot {
    received: Instant,
    snapshot_name: String,
    html: String,
}

#[derive(Debug)]
pub struct LiveSnapshotProvider {
    formatter: SnapshotFormatter,
    expiry: Duration,
    active_test_file: Option<String>,
    snapshots: HashMap<String, Vec<LiveSnapshot>>,
    styles: HashMap<String, String>,
}

impl LiveSnapshotProvider {
    pub fn new(formatter: SnapshotFormatter) -> Self {
        Self {
            formatter,
            expiry: LIVE_EXPIRY,
            active_test_file: None,
            snapshots: HashMap::new(),
            styles: HashMap::new(),
        }
    }

    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    pub fn on_message(&mut self, message: LiveMessage) {
        self.on_message_at(message, Instant::now());
    }

    /// Records `message` as received at `now`.
    pub fn on_message_at(&mut self, message: LiveMessage, now: Instant) {
        let key = test_file_key(Path::new(&message.file));

        if message.is_stylesheet() {
            let css = match message.content {
                LiveContent::Text(css) => css,
                fields => match fields.field("styles") {
                    Some(css) => css,
                    None => {
                        log::warn!("stylesheet message for {key} has no styles");
                        return;
                    }
                },
            };
            log::debug!("updated live styles for {key}");
            self.styles
                .insert(key, rewrite_css_urls(&css, &self.formatter.options().asset_base));
            return;
        }

        let expiry = self.expiry;
        let entries = self.snapshots.entry(key).or_default();
        entries.retain(|s| now.saturating_duration_since(s.received) < expiry);

        let snapshot_name = message.snapshot_name.unwrap_or_default();
        let html = self
            .formatter
            .format_fragment(&message.content.into_snapshot_content(), &[]);
        let snapshot = LiveSnapshot {
            received: now,
            snapshot_name,
            html,
        };

        match entries
            .iter_mut()
            .find(|s| s.snapshot_name == snapshot.snapshot_name)
        {
            Some(existing) => *existing = snapshot,
            None => entries.push(snapshot),
        }
    }

    /// The test file whose snapshots are shown.
    pub fn active_test_file(&self) -> Option<&str> {
        self.active_test_file.as_deref()
    }
}

impl ContentProvider for LiveSnapshotProvider {
    fn provide_content(&mut self, ctx: &PreviewContext) -> String {
        if let Some(source) = ctx.source_path
            && is_test_file(source)
        {
            self.active_test_file = Some(test_file_key(source));
        }

        let Some(active) = &self.active_test_file else {
            return SELECT_TEST_FILE.to_string();
        };
        let entries = match self.snapshots.get(active) {
            Some(entries) if !entries.is_empty() => entries,
            _ => return NO_SNAPSHOTS_RECORDED.to_string(),
        };

        let mut body = format!(
            "<div class=\"ui fluid blue label\" style=\"margin: 3px\">Test: {}</div>",
            html_escape::encode_text(active)
        );
        for snapshot in entries {
            body.push_str(&format!(
                "<div class=\"ui fluid label\" style=\"margin: 3px\">{}</div>{}",
                html_escape::encode_text(&snapshot.snapshot_name),
                snapshot.html
            ));
        }

        let css = self.styles.get(active).map(String::as_str).unwrap_or_default();
        self.formatter.document(&body, css)
    }

    fn on_invalidate(&mut self, changed: Option<&Path>) {
        match changed {
            Some(path) => {
                let key = test_file_key(path);
                self.snapshots.remove(&key);
                self.styles.remove(&key);
            }
            None => {
                self.snapshots.clear();
                self.styles.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderOptions;
    use crate::session::Resolution;

    fn provider() -> LiveSnapshotProvider {
        LiveSnapshotProvider::new(SnapshotFormatter::new(RenderOptions::new("/pub")))
    }

    fn message(name: &str, content: &str) -> LiveMessage {
        LiveMessage::from_json(&format!(
            r#"{{"testPath": "/src/Widget.test.tsx", "snapshotName": "{name}", "content": "{content}"}}"#
        ))
        .unwrap()
    }

    fn show(provider: &mut LiveSnapshotProvider, file: &str) -> String {
        let resolution = Resolution::NoTest;
        provider.provide_content(&PreviewContext::new(Some(Path::new(file)), &resolution))
    }

    #[test]
    fn asks_for_a_test_file_first() {
        let mut provider = provider();
        assert_eq!(show(&mut provider, "/src/Widget.tsx"), SELECT_TEST_FILE);
    }

    #[test]
    fn empty_cache_message() {
        let mut provider = provider();
        assert_eq!(show(&mut provider, "/src/Widget.test.tsx"), NO_SNAPSHOTS_RECORDED);
    }

    #[test]
    fn shows_received_snapshots() {
        let mut provider = provider();
        provider.on_message(message("renders 1", "<b>one</b>"));
        provider.on_message(message("layout 1", "<i>two</i>"));

        let html = show(&mut provider, "/src/Widget.test.tsx");

        assert!(html.contains("Test: Widget.test</div>"));
        assert!(html.contains(">renders 1</div>"));
        assert!(html.contains("<b>one</b>"));
        assert!(html.contains("<i>two</i>"));
    }

    #[test]
    fn same_name_replaces_in_place() {
        let mut provider = provider();
        let start = Instant::now();
        provider.on_message_at(message("a", "<b>old</b>"), start);
        provider.on_message_at(message("b", "<b>b</b>"), start);
        provider.on_message_at(message("a", "<b>new</b>"), start + Duration::from_millis(10));

        let html = show(&mut provider, "/src/Widget.test.tsx");

        assert!(!html.contains("old"));
        let a = html.find("<b>new</b>").unwrap();
        let b = html.find("<b>b</b>").unwrap();
        assert!(a < b);
    }

    #[test]
    fn stale_snapshots_expire_on_next_message() {
        let mut provider = provider();
        let start = Instant::now();
        provider.on_message_at(message("first run", "<b>1</b>"), start);
        provider.on_message_at(
            message("second run", "<b>2</b>"),
            start + Duration::from_millis(1600),
        );

        let html = show(&mut provider, "/src/Widget.test.tsx");

        assert!(!html.contains("first run"));
        assert!(html.contains("second run"));
    }

    #[test]
    fn active_file_sticks_when_leaving_test_files() {
        let mut provider = provider();
        provider.on_message(message("renders 1", "<b>x</b>"));
        show(&mut provider, "/src/Widget.test.tsx");

        let html = show(&mut provider, "/src/Widget.tsx");

        assert_eq!(provider.active_test_file(), Some("Widget.test"));
        assert!(html.contains("<b>x</b>"));
    }

    #[test]
    fn stylesheet_messages_update_styles() {
        let mut provider = provider();
        provider.on_message(
            LiveMessage::from_json(
                r#"{"file": "/src/Widget.test.css", "content": {"styles": ".a { background: url(/x.png) }"}}"#,
            )
            .unwrap(),
        );
        provider.on_message(message("renders 1", "<b>x</b>"));

        let html = show(&mut provider, "/src/Widget.test.tsx");

        assert!(html.contains(".a { background: url('file:///pub/x.png') }"));
    }
}

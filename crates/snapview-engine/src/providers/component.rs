use crate::models::ResolvedLocation;

use super::{ContentProvider, PreviewContext};

pub const DEFAULT_STORY_SERVER: &str = "http://localhost:9001";

/// Shows the running component explorer's page for the story under the caret.
#[derive(Debug, Clone)]
pub struct ComponentPreviewProvider {
    server_url: String,
    stylesheet: String,
}

impl ComponentPreviewProvider {
    /// `stylesheet` is the local file styling the toolbar and messages.
    pub fn new(server_url: impl Into<String>, stylesheet: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            stylesheet: stylesheet.into(),
        }
    }

    /// `<server>?story=<story id>&test=<test slug>`, when both are known.
    pub fn story_url(&self, location: &ResolvedLocation) -> Option<String> {
        let story = location.story_id();
        let test = location.test_slug()?;
        if story.is_empty() {
            return None;
        }
        Some(format!("{}?story={story}&test={test}", self.server_url))
    }

    fn place_cursor_message(&self) -> String {
        format!(
            "\n<link href='file://{}' rel='stylesheet' type='text/css'>\n\
             <span class=\"ui fluid info red label\" style=\"margin: 6px\">\
             Please place your cursor in a test function to select the test</span>\n",
            self.stylesheet
        )
    }

    fn frame(&self, url: &str) -> String {
        let url = html_escape::encode_quoted_attribute(url);
        format!(
            r#"<style>iframe {{ background-color: white }} </style>
<link href='file://{stylesheet}' rel='stylesheet' type='text/css'>
<div class="ui grey inverted pointing secondary menu" style="margin-bottom: 0px">
  <a title="Refresh" class="icon item" onclick="document.getElementById('frame').src = document.getElementById('frame').src"><i aria-hidden="true" class="refresh icon"></i></a>
  <div class="item">{url}</div>
</div>
<iframe id="frame" src="{url}" frameBorder="0" width="100%" height="1000px"></iframe>"#,
            stylesheet = self.stylesheet,
        )
    }
}

impl ContentProvider for ComponentPreviewProvider {
    fn provide_content(&mut self, ctx: &PreviewContext) -> String {
        match ctx.resolution.location().and_then(|loc| self.story_url(loc)) {
            Some(url) => self.frame(&url),
            None => self.place_cursor_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Resolution;
    use pretty_assertions::assert_eq;

    fn provider() -> ComponentPreviewProvider {
        ComponentPreviewProvider::new(DEFAULT_STORY_SERVER, "/pub/styles/luis.css")
    }

    fn location(test: Option<&str>, folders: &[&str]) -> ResolvedLocation {
        ResolvedLocation {
            test_name: test.map(str::to_string),
            folders: folders.iter().map(|f| f.to_string()).collect(),
            snapshot_names: Vec::new(),
        }
    }

    #[test]
    fn story_url_from_suites_and_test() {
        let url = provider().story_url(&location(Some("Renders Fine"), &["Widgets", "Big Button"]));
        assert_eq!(
            url.as_deref(),
            Some("http://localhost:9001?story=widgets-big-button&test=renders-fine")
        );
    }

    #[test]
    fn no_url_without_suite_or_test() {
        assert_eq!(provider().story_url(&location(Some("t"), &[])), None);
        assert_eq!(provider().story_url(&location(None, &["Widgets"])), None);
    }

    #[test]
    fn frames_resolved_story() {
        let resolution = Resolution::Resolved(location(Some("renders"), &["Widgets"]));
        let html = provider().provide_content(&PreviewContext::new(None, &resolution));
        assert!(html.contains(
            "<iframe id=\"frame\" src=\"http://localhost:9001?story=widgets&amp;test=renders\""
        ));
        assert!(html.contains("href='file:///pub/styles/luis.css'"));
    }

    #[test]
    fn asks_for_cursor_without_a_test() {
        let resolution = Resolution::NoTest;
        let html = provider().provide_content(&PreviewContext::new(None, &resolution));
        assert!(html.contains("Please place your cursor in a test function"));
    }
}

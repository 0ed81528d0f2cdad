use std::path::Path;

use crate::models::{DECORATOR_PLACEHOLDER, SnapshotContent};

use super::rewrite::{normalize_attributes, rewrite_assets};
use super::shell;
use super::structured::{StructuredMode, looks_structured, render_structured};

const DEFAULT_EXTERNAL_STYLESHEETS: [&str; 2] = [
    "http://fonts.googleapis.com/css?family=Lato:400,700",
    "https://cdnjs.cloudflare.com/ajax/libs/semantic-ui/2.2.13/semantic.min.css",
];

/// Settings shared by every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Directory that root-relative asset paths resolve against, without a
    /// trailing slash.
    pub asset_base: String,
    /// Local stylesheet files linked into the document.
    pub stylesheets: Vec<String>,
    /// Remote stylesheets linked into the document.
    pub external_stylesheets: Vec<String>,
    /// CSS text placed in an inline `<style>` element.
    pub extra_css: String,
    pub structured: StructuredMode,
    /// Maximum number of snapshots rendered; 0 means no limit.
    pub max_entries: usize,
}

impl RenderOptions {
    pub fn new(asset_base: impl Into<String>) -> Self {
        let asset_base = asset_base.into().trim_end_matches('/').to_string();
        let root = if asset_base.is_empty() {
            "/"
        } else {
            asset_base.as_str()
        };
        let styles_dir = Path::new(root).join("styles");
        let stylesheets = ["luis.css", "bundle.css"]
            .iter()
            .map(|name| styles_dir.join(name).display().to_string())
            .collect();

        Self {
            asset_base,
            stylesheets,
            external_stylesheets: DEFAULT_EXTERNAL_STYLESHEETS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            extra_css: String::new(),
            structured: StructuredMode::default(),
            max_entries: 0,
        }
    }

    pub fn with_extra_css(mut self, css: impl Into<String>) -> Self {
        self.extra_css = css.into();
        self
    }

    pub fn with_structured(mut self, mode: StructuredMode) -> Self {
        self.structured = mode;
        self
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }
}

/// Turns stored snapshots into HTML for the preview pane.
#[derive(Debug, Clone)]
pub struct SnapshotFormatter {
    options: RenderOptions,
}

impl SnapshotFormatter {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders a complete HTML document.
    ///
    /// With a non-empty `filter`, only entries whose key contains one of the
    /// filter terms are rendered.
    pub fn format(&self, content: &SnapshotContent, filter: &[String]) -> String {
        self.format_with_css(content, filter, "")
    }

    /// Like [`Self::format`], with extra CSS appended to the configured CSS.
    pub fn format_with_css(
        &self,
        content: &SnapshotContent,
        filter: &[String],
        extra_css: &str,
    ) -> String {
        let body = self.format_fragment(content, filter);
        self.document(&body, extra_css)
    }

    /// Wraps already rendered markup in the preview document.
    pub fn document(&self, body: &str, extra_css: &str) -> String {
        if extra_css.is_empty() {
            return shell::document(body, &self.options);
        }

        let mut options = self.options.clone();
        if !options.extra_css.is_empty() {
            options.extra_css.push('\n');
        }
        options.extra_css.push_str(extra_css);
        shell::document(body, &options)
    }

    /// Renders the snapshot entries without the surrounding document.
    pub fn format_fragment(&self, content: &SnapshotContent, filter: &[String]) -> String {
        let limit = match self.options.max_entries {
            0 => usize::MAX,
            n => n,
        };

        let mut out = String::new();
        match content {
            SnapshotContent::Text(text) => out.push_str(&self.render_entry("", text, None, None)),
            SnapshotContent::Record(record) => {
                for (key, value) in record
                    .entries()
                    .filter(|(key, _)| passes_filter(key, filter))
                    .take(limit)
                {
                    out.push_str(&self.render_entry(
                        key,
                        value,
                        record.css_class_name.as_deref(),
                        record.decorator.as_deref(),
                    ));
                }
            }
        }

        normalize_attributes(&out)
    }

    fn render_entry(
        &self,
        key: &str,
        value: &str,
        css_class: Option<&str>,
        decorator: Option<&str>,
    ) -> String {
        let rendered = if looks_structured(value) {
            render_structured(value, self.options.structured)
        } else {
            rewrite_assets(value, &self.options.asset_base)
        };
        let rendered = match decorator {
            Some(template) => template.replacen(DECORATOR_PLACEHOLDER, &rendered, 1),
            None => rendered,
        };

        let label = if key.is_empty() {
            String::new()
        } else {
            format!(
                "\n<div class=\"ui fluid label\">{}</div>",
                html_escape::encode_text(display_label(key))
            )
        };
        let class_attr = css_class
            .map(|class| format!(" class=\"{class}\""))
            .unwrap_or_default();

        format!("{label}\n<div{class_attr} style=\"padding: 6px\">{rendered}</div>")
    }
}

/// True when `filter` is empty or any of its terms occurs in `key`.
pub fn passes_filter(key: &str, filter: &[String]) -> bool {
    filter.is_empty() || filter.iter().any(|term| key.contains(term.as_str()))
}

/// Snapshot keys end in a counter; the first one is noise in a label.
pub fn display_label(key: &str) -> &str {
    key.strip_suffix(" 1").unwrap_or(key)
}

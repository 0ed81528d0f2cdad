use std::path::Path;

use super::formatter::RenderOptions;

/// Shown when the caret is not inside any test.
pub const NO_TEST_FOUND: &str = "<div>No test found!</div>";

/// Shown when the expected snapshot file does not exist.
pub fn missing_snapshots(path: &Path) -> String {
    format!(
        "There are no snapshots for: {}",
        html_escape::encode_text(&path.display().to_string())
    )
}

/// Wraps rendered snapshots in the preview document.
pub fn document(body: &str, options: &RenderOptions) -> String {
    let external: String = options
        .external_stylesheets
        .iter()
        .map(|url| format!("\n    <link href='{url}' rel='stylesheet' type='text/css'>"))
        .collect();
    let local: String = options
        .stylesheets
        .iter()
        .map(|path| format!("\n    <link href='file://{path}' rel='stylesheet' type='text/css'>"))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>

<head>
    <title></title>
</head>

<body style="background: transparent; background-image: none!important">{external}
    <style type='text/css'>
{css}
    </style>{local}
    <div style="background: white">
        <div style="padding: 6px">
{body}
        </div>
    </div>
</body>

</html>"#,
        css = options.extra_css,
    )
}

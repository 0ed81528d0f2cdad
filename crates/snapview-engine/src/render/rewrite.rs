//! Regex rewrites that make serialized component markup loadable from disk.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::style_object::inline_style_objects_or_original;

fn src_regex() -> &'static Regex {
    static SRC_REGEX: OnceLock<Regex> = OnceLock::new();
    SRC_REGEX.get_or_init(|| {
        Regex::new(r#"src="(?:https?://[^/"]*)?/"#).expect("Invalid src attribute regex")
    })
}

fn tag_href_regex() -> &'static Regex {
    static TAG_HREF_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_HREF_REGEX.get_or_init(|| {
        Regex::new(r#"(image (?:class="[\w ]+")? *|link )href="([^"]*)""#)
            .expect("Invalid tag href regex")
    })
}

fn root_href_regex() -> &'static Regex {
    static ROOT_HREF_REGEX: OnceLock<Regex> = OnceLock::new();
    ROOT_HREF_REGEX
        .get_or_init(|| Regex::new(r#"href="/([^/"])"#).expect("Invalid root href regex"))
}

fn css_url_regex() -> &'static Regex {
    static CSS_URL_REGEX: OnceLock<Regex> = OnceLock::new();
    CSS_URL_REGEX.get_or_init(|| {
        Regex::new(r#": *'?url\("?/?([/\w._]*)"?\)'?"#).expect("Invalid css url regex")
    })
}

fn vendor_prefix_regex() -> &'static Regex {
    static VENDOR_REGEX: OnceLock<Regex> = OnceLock::new();
    VENDOR_REGEX
        .get_or_init(|| Regex::new(r"-(?:webkit|moz|ms)-\w+,").expect("Invalid vendor regex"))
}

fn self_closing_regex() -> &'static Regex {
    static SELF_CLOSING_REGEX: OnceLock<Regex> = OnceLock::new();
    SELF_CLOSING_REGEX.get_or_init(|| {
        Regex::new(r"<\s*([^\s>]+)([^>]*)/\s*>").expect("Invalid self-closing tag regex")
    })
}

fn numeric_value_regex() -> &'static Regex {
    static NUMERIC_REGEX: OnceLock<Regex> = OnceLock::new();
    NUMERIC_REGEX
        .get_or_init(|| Regex::new(r"=\{([\d.]*)\}").expect("Invalid numeric value regex"))
}

/// Points root-relative and dev-server asset references at `asset_base`
/// on disk and drops vendor-prefixed CSS fallbacks.
///
/// `asset_base` must not end with `/`.
pub fn rewrite_assets(markup: &str, asset_base: &str) -> String {
    let file_root = format!("file://{asset_base}/");

    let text = src_regex().replace_all(markup, |_: &Captures| format!("src=\"{file_root}"));
    let text = tag_href_regex().replace_all(&text, |caps: &Captures| {
        let target = &caps[2];
        if is_absolute_url(target) {
            return caps[0].to_string();
        }
        let relative = target.strip_prefix('/').unwrap_or(target);
        format!(
            "{}href=\"{file_root}{relative}\"",
            normalize_image_prefix(&caps[1])
        )
    });
    let text = root_href_regex()
        .replace_all(&text, |caps: &Captures| format!("href=\"{file_root}{}", &caps[1]));
    let text = rewrite_css_urls(&text, asset_base);
    vendor_prefix_regex().replace_all(&text, "").into_owned()
}

/// Rewrites `: url(...)` values in CSS to files under `asset_base`.
pub fn rewrite_css_urls(css: &str, asset_base: &str) -> String {
    css_url_regex()
        .replace_all(css, |caps: &Captures| {
            format!(": url('file://{asset_base}/{}')", &caps[1])
        })
        .into_owned()
}

/// True for protocol-relative URLs and URLs with a scheme (`https:`, `data:`).
fn is_absolute_url(target: &str) -> bool {
    if target.starts_with("//") {
        return true;
    }
    match target.split_once(':') {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

// `image class="x"   href=` collapses to `image class="x" href=`.
fn normalize_image_prefix(prefix: &str) -> String {
    match prefix.strip_prefix("image ") {
        Some(rest) => {
            let class = rest.trim_end();
            if class.is_empty() {
                "image ".to_string()
            } else {
                format!("image {class} ")
            }
        }
        None => prefix.to_string(),
    }
}

/// Turns JSX-flavoured attribute syntax into plain HTML.
///
/// Applied once to the concatenation of every rendered snapshot.
pub fn normalize_attributes(markup: &str) -> String {
    let text = markup.replace("className", "class");
    let text = inline_style_objects_or_original(&text);
    let text = self_closing_regex().replace_all(&text, "<$1$2></$1>");
    let text = text.replace("={true}", "").replace("={false}", "__never");
    numeric_value_regex()
        .replace_all(&text, "=\"$1\"")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(r#"<img src="/img.png">"#, r#"<img src="file:///pub/img.png">"#)]
    #[case(
        r#"<img src="http://localhost:3000/img/a.png">"#,
        r#"<img src="file:///pub/img/a.png">"#
    )]
    #[case(r#"<img src="data:image/png;base64,AA">"#, r#"<img src="data:image/png;base64,AA">"#)]
    #[case(r#"<link href="styles/x.css">"#, r#"<link href="file:///pub/styles/x.css">"#)]
    #[case(r#"<link href="/styles/x.css">"#, r#"<link href="file:///pub/styles/x.css">"#)]
    #[case(
        r#"<image class="icon big" href="/sprite.svg">"#,
        r#"<image class="icon big" href="file:///pub/sprite.svg">"#
    )]
    #[case(
        r#"<link href="https://cdn.example/x.css" rel="stylesheet">"#,
        r#"<link href="https://cdn.example/x.css" rel="stylesheet">"#
    )]
    #[case(r#"<link href="//cdn.example/x.css">"#, r#"<link href="//cdn.example/x.css">"#)]
    #[case(
        r#"<image href="http://host/sprite.svg">"#,
        r#"<image href="http://host/sprite.svg">"#
    )]
    #[case(
        r#"<image class="icon" href="data:image/svg+xml;base64,AA">"#,
        r#"<image class="icon" href="data:image/svg+xml;base64,AA">"#
    )]
    #[case(r#"<a href="/about">"#, r#"<a href="file:///pub/about">"#)]
    #[case(r#"<a href="//cdn.example/x">"#, r#"<a href="//cdn.example/x">"#)]
    #[case(r#"<a href="https://example.com/">"#, r#"<a href="https://example.com/">"#)]
    fn rewrites_asset_references(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(rewrite_assets(input, "/pub"), expected);
    }

    #[rstest]
    #[case(r#"background: url("/img/bg.png")"#, "background: url('file:///pub/img/bg.png')")]
    #[case("background:url(img/bg.png)", "background: url('file:///pub/img/bg.png')")]
    #[case(r#"background: 'url("/a_b.png")'"#, "background: url('file:///pub/a_b.png')")]
    fn rewrites_css_urls(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(rewrite_css_urls(input, "/pub"), expected);
    }

    #[test]
    fn strips_vendor_fallbacks() {
        let input = "display: -webkit-box,-moz-box,-ms-flexbox,flex;";
        assert_eq!(rewrite_assets(input, "/pub"), "display: flex;");
    }

    #[rstest]
    #[case(r#"<div className="x">"#, r#"<div class="x">"#)]
    #[case("<br/>", "<br></br>")]
    #[case(r#"<img src="a.png" />"#, r#"<img src="a.png" ></img>"#)]
    #[case("<input\n  disabled={true}\n/>", "<input\n  disabled\n></input>")]
    #[case("<input checked={false}>", "<input checked__never>")]
    #[case("<col span={2} width={1.5}>", r#"<col span="2" width="1.5">"#)]
    #[case("</div>", "</div>")]
    fn normalizes_attributes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_attributes(input), expected);
    }

    #[rstest]
    #[case("https://cdn.example/x.css", true)]
    #[case("//cdn.example/x.css", true)]
    #[case("data:image/png;base64,AA", true)]
    #[case("/styles/x.css", false)]
    #[case("styles/x.css", false)]
    #[case("img/a:b.png", false)]
    fn classifies_absolute_urls(#[case] target: &str, #[case] absolute: bool) {
        assert_eq!(is_absolute_url(target), absolute);
    }

    #[test]
    fn replacement_base_is_not_expanded() {
        // `$` in paths must not be read as a capture reference.
        assert_eq!(
            rewrite_assets(r#"<img src="/a.png">"#, "/home/$1"),
            r#"<img src="file:///home/$1/a.png">"#
        );
    }
}

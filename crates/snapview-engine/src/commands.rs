//! Shell commands that re-record snapshots.
//!
//! Templates come from configuration. `$1` is replaced with the test path
//! (suite names, plus the test name when updating a single test) and `$2`
//! with the test file, e.g.
//!
//! ```text
//! npx jest -u -t "$1" $2
//! ```

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::ResolvedLocation;

const TARGET_PLACEHOLDER: &str = "$1";
const FILE_PLACEHOLDER: &str = "$2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateScope {
    /// Only the test under the caret.
    Test,
    /// Every test in the suite chain under the caret.
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error(
        "You need to specify \"update_test_command\" and \"update_file_command\" in your config. Use $1 for test name placeholder, $2 for file name"
    )]
    MissingTemplate,
    #[error("Could not determine the test name")]
    UnknownTest,
}

fn passing_regex() -> &'static Regex {
    static PASSING_REGEX: OnceLock<Regex> = OnceLock::new();
    PASSING_REGEX.get_or_init(|| Regex::new(r"(\d+) passing").expect("Invalid passing regex"))
}

/// The name a test runner filters on: suites joined by spaces, followed by
/// the test name for [`UpdateScope::Test`].
pub fn update_target(
    scope: UpdateScope,
    location: &ResolvedLocation,
) -> Result<String, CommandError> {
    if location.folders.is_empty() {
        return Err(CommandError::UnknownTest);
    }

    let mut target = location.folders.join(" ");
    if scope == UpdateScope::Test {
        let test = location.test_name.as_deref().ok_or(CommandError::UnknownTest)?;
        target.push(' ');
        target.push_str(test);
    }
    Ok(target)
}

/// Fills in `template` for `location` in `file`.
pub fn build_update_command(
    template: Option<&str>,
    scope: UpdateScope,
    location: &ResolvedLocation,
    file: &Path,
) -> Result<String, CommandError> {
    let template = template
        .filter(|t| !t.trim().is_empty())
        .ok_or(CommandError::MissingTemplate)?;
    let target = update_target(scope, location)?;
    let file = file.display().to_string();

    let command = substitute_first(
        template,
        &[(TARGET_PLACEHOLDER, &target), (FILE_PLACEHOLDER, &file)],
    );
    log::info!("{command}");
    Ok(command)
}

// Replaces the first occurrence of each placeholder in the template only, so
// placeholders inside substituted values are left alone.
fn substitute_first(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut hits: Vec<(usize, &str, &str)> = substitutions
        .iter()
        .filter_map(|(placeholder, value)| {
            template
                .find(placeholder)
                .map(|at| (at, *placeholder, *value))
        })
        .collect();
    hits.sort_by_key(|(at, _, _)| *at);

    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for (at, placeholder, value) in hits {
        if at < last {
            continue;
        }
        out.push_str(&template[last..at]);
        out.push_str(value);
        last = at + placeholder.len();
    }
    out.push_str(&template[last..]);
    out
}

/// Reads the `N passing` summary from test runner output.
pub fn parse_passing_count(stdout: &str) -> Option<u32> {
    passing_regex()
        .captures(stdout)
        .and_then(|caps| caps[1].parse().ok())
}

/// The message shown after a successful update.
pub fn update_summary(passing: u32, target: &str) -> String {
    format!("{passing} test(s) snapshots updated for \"{target}\"")
}

pub mod assertions;
pub mod brackets;
pub mod call_site;
pub mod lenses;
pub mod locator;

pub use assertions::extract_assertion_names;
pub use brackets::{QuotedLiteral, Step, match_bracket, read_quoted_literal, scan_quoted_literal};
pub use call_site::{CallKind, CallMatch, CallVocabulary, match_call, matches_call_at_position};
pub use lenses::{LensAnchor, find_suite_lenses, find_test_lenses};
pub use locator::{context_start, locate_test};

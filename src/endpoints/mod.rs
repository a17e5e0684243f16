//! Typed functions per backend resource.
//!
//! Each function is a composition of path, method and response type over
//! [`Dispatcher`](crate::dispatcher::Dispatcher). Errors from the dispatcher
//! are returned unchanged.

pub mod auth;
pub mod health;
pub mod leaderboard;
pub mod profile;
pub mod results;
pub mod words;

use reqwest::Url;

/// Percent-encode `segment` so it stays a single path segment.
///
/// `.` and `..` have no single-segment form and encode to an empty string.
pub(crate) fn path_segment(segment: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return String::new();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(segment);
    }
    url.path().trim_start_matches('/').to_string()
}

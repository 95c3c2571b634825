//! Precondition evaluation for GET requests.
//!
//! Headers are checked in a fixed order and the first rule that decides the
//! outcome stops evaluation:
//!
//! 1. `If-Match` fails with 412 unless the current ETag is listed, or the
//!    value is `*` and the resource exists.
//! 2. `If-Modified-Since` yields 304 when it equals the current Last-Modified
//!    string exactly. Dates are not parsed and no ordering is applied.
//! 3. `If-None-Match` yields 304, carrying the ETag, when the current ETag is
//!    listed or the value is `*` and the resource exists.
//! 4. Otherwise the request proceeds.
//!
//! An absent header never blocks: each rule only fires when its header is present.

use crate::files::Validators;
use crate::http::request::Request;

const IF_MATCH: &str = "If-Match";
const IF_MODIFIED_SINCE: &str = "If-Modified-Since";
const IF_NONE_MATCH: &str = "If-None-Match";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionalOutcome {
    Proceed,
    /// `etag` is set when `If-None-Match` matched
    NotModified { etag: Option<String> },
    PreconditionFailed,
}

/// Decides the outcome for `req` given the target's validators, or `None`
/// when the target does not exist.
pub fn evaluate(req: &Request, current: Option<&Validators>) -> ConditionalOutcome {
    if let Some(tags) = req.tag_list(IF_MATCH) {
        let satisfied = current.is_some_and(|v| is_wildcard(&tags) || tags.contains(&v.etag.as_str()));
        if !satisfied {
            return ConditionalOutcome::PreconditionFailed;
        }
    }

    if let (Some(since), Some(v)) = (req.header(IF_MODIFIED_SINCE), current) {
        if since == v.last_modified {
            return ConditionalOutcome::NotModified { etag: None };
        }
    }

    if let (Some(tags), Some(v)) = (req.tag_list(IF_NONE_MATCH), current) {
        if is_wildcard(&tags) || tags.contains(&v.etag.as_str()) {
            return ConditionalOutcome::NotModified {
                etag: Some(v.etag.clone()),
            };
        }
    }

    ConditionalOutcome::Proceed
}

fn is_wildcard(tags: &[&str]) -> bool {
    matches!(tags, ["*"])
}

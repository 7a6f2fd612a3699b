//! Pull `Area ID:` tokens out of search output so a caller can chain a
//! search into a lookup.  Text scan only; the body format is not parsed.

use std::sync::LazyLock;

use regex::Regex;

static AREA_ID_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)Area ID:[ \t]*(\S[^\r\n]*)").expect("invalid regex"));

/// Every `Area ID: <value>` in `text`, in order of appearance, trimmed.
pub fn extract_area_ids(text: &str) -> Vec<String> {
    AREA_ID_LINE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

/// The first `Area ID:` in `text`, if any.
pub fn first_area_id(text: &str) -> Option<String> {
    AREA_ID_LINE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_owned())
}

//! Query string decoding.
//!
//! Keys and values are kept as raw bytes after percent-decoding, so values
//! that are not valid UTF-8 survive untouched. Duplicate keys are kept in
//! order; lookups return the first occurrence.

use axum::http::Uri;
use percent_encoding::percent_decode;

/// Decoded query parameters of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(Vec<u8>, Vec<u8>)>,
}

impl QueryParams {
    /// Parse a raw query string (without the leading `?`).
    ///
    /// `+` decodes to a space. A segment without `=` is a key with an empty
    /// value. Empty segments are skipped.
    pub fn parse(query: &[u8]) -> Self {
        let pairs = query
            .split(|&b| b == b'&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.iter().position(|&b| b == b'=') {
                Some(eq) => (decode(&segment[..eq]), decode(&segment[eq + 1..])),
                None => (decode(segment), Vec::new()),
            })
            .collect();

        Self { pairs }
    }

    pub fn from_uri(uri: &Uri) -> Self {
        uri.query()
            .map(|q| Self::parse(q.as_bytes()))
            .unwrap_or_default()
    }

    /// First value for `key`, if present.
    pub fn first(&self, key: &[u8]) -> Option<&[u8]> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn decode(component: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = component
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}

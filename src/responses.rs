use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MonitorError;
use crate::MonitorResult;

/// Removes every apostrophe from a raw response body.
///
/// Some stream payloads contain stray `'` characters that break JSON parsing.
pub fn sanitize_body(raw: &str) -> String {
    raw.replace('\'', "")
}

/// One page of the stream.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResponse {
    /// The cursor that continues the stream after this page.
    pub end_cursor: String,
    /// The whole sanitized response document.
    pub body: Value,
}

impl PageResponse {
    /// Sanitizes and parses a raw response body.
    pub fn parse(raw: &str) -> MonitorResult<Self> {
        let body: Value =
            serde_json::from_str(&sanitize_body(raw)).map_err(MonitorError::MalformedBody)?;
        let end_cursor = body
            .get("endCursor")
            .and_then(Value::as_str)
            .ok_or(MonitorError::MissingEndCursor)?
            .to_string();
        Ok(PageResponse { end_cursor, body })
    }
}

/// The pages of a stream, in the order they were fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<Value>);

impl ResultSet {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, page: Value) {
        self.0.push(page);
    }

    /// Returns the pages.
    pub fn pages(&self) -> &[Value] {
        &self.0
    }

    /// Returns the amount of pages.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no page was fetched.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the inner `Vec` of pages.
    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }

    /// Serializes the pages as a compact JSON array.
    pub fn to_json_string(&self) -> String {
        Value::Array(self.0.clone()).to_string()
    }
}

impl From<Vec<Value>> for ResultSet {
    fn from(pages: Vec<Value>) -> Self {
        Self(pages)
    }
}

impl IntoIterator for ResultSet {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

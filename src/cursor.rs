use url::Url;

use crate::MonitorResult;

/// How the cursor is written into the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryStyle {
    /// Builds the query with a form serializer, percent-encoding the cursor value.
    #[default]
    Encoded,
    /// Splices the cursor into the query as-is, for servers that expect the exact bytes back.
    Verbatim,
}

/// Pagination cursor, denoted by a cursor ID.
///
/// In order to create a cursor, simply call `Cursor::new()`.
/// This will leave the cursor ID empty, which asks the server for the start of the stream.
///
/// Every response carries an `endCursor`. If it equals the cursor ID that was sent,
/// there is no more data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    /// The cursor ID.
    ///
    /// Is empty if the cursor has just been created.
    pub cursor_id: String,
    /// The maximum amount of records that will be returned per page.
    pub limit: u32,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            cursor_id: String::new(),
            limit: crate::DEFAULT_PAGE_SIZE,
        }
    }
}

impl Cursor {
    /// Creates a new cursor.
    pub fn new(limit: u32) -> Cursor {
        Cursor {
            cursor_id: String::new(),
            limit,
        }
    }

    /// Returns whether the cursor still points at the start of the stream.
    pub fn is_start(&self) -> bool {
        self.cursor_id.is_empty()
    }

    /// Returns whether the `end_cursor` of a response means the stream is exhausted.
    pub fn is_exhausted_by(&self, end_cursor: &str) -> bool {
        self.cursor_id == end_cursor
    }

    /// Sets the cursor ID.
    pub fn set_cursor_id(&mut self, cursor_id: String) {
        self.cursor_id = cursor_id;
    }

    /// Builds the `{base_path}/stream?cursor[=<id>]&limit=<n>` URL for this cursor.
    pub fn stream_url(&self, base_path: &str, style: QueryStyle) -> MonitorResult<Url> {
        let base = base_path.trim_end_matches('/');
        match style {
            QueryStyle::Encoded => {
                let mut url = Url::parse(&format!("{}/stream", base))?;
                {
                    let mut query = url.query_pairs_mut();
                    if self.is_start() {
                        query.append_key_only("cursor");
                    } else {
                        query.append_pair("cursor", &self.cursor_id);
                    }
                    query.append_pair("limit", &self.limit.to_string());
                }
                Ok(url)
            }
            QueryStyle::Verbatim => {
                let fragment = if self.is_start() {
                    String::new()
                } else {
                    format!("={}", self.cursor_id)
                };
                Ok(Url::parse(&format!(
                    "{}/stream?cursor{}&limit={}",
                    base, fragment, self.limit
                ))?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://lens.example.net/api/v2.0/datasets/monitor";

    #[test]
    fn first_request_sends_bare_cursor_key() {
        let cursor = Cursor::new(1);
        for style in [QueryStyle::Encoded, QueryStyle::Verbatim] {
            let url = cursor.stream_url(BASE, style).unwrap();
            assert_eq!(url.path(), "/api/v2.0/datasets/monitor/stream");
            assert_eq!(url.query(), Some("cursor&limit=1"));
        }
    }

    #[test]
    fn later_requests_send_cursor_value() {
        let mut cursor = Cursor::new(50);
        cursor.set_cursor_id("aGVsbG8".to_string());
        let url = cursor.stream_url(&format!("{}/", BASE), QueryStyle::Encoded).unwrap();
        assert_eq!(url.query(), Some("cursor=aGVsbG8&limit=50"));
    }

    #[test]
    fn encoded_style_escapes_reserved_characters() {
        let mut cursor = Cursor::new(2);
        cursor.set_cursor_id("a+b&c".to_string());

        let encoded = cursor.stream_url(BASE, QueryStyle::Encoded).unwrap();
        assert_eq!(encoded.query(), Some("cursor=a%2Bb%26c&limit=2"));

        let verbatim = cursor.stream_url(BASE, QueryStyle::Verbatim).unwrap();
        assert_eq!(verbatim.query(), Some("cursor=a+b&c&limit=2"));
    }

    #[test]
    fn repeated_cursor_exhausts_the_stream() {
        let mut cursor = Cursor::default();
        assert!(cursor.is_exhausted_by(""));
        cursor.set_cursor_id("c2".to_string());
        assert!(!cursor.is_exhausted_by("c3"));
        assert!(cursor.is_exhausted_by("c2"));
    }
}

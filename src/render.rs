use std::io::Write;

use crate::traits::ResultRenderer;

/// A `ResultRenderer` that writes a plain-text page to any writer.
///
/// The page consists of the title, the message and the payload pretty-printed as JSON.
/// An empty payload is left out, which is how advisory pages are shown.
pub struct WriterRenderer<W: Write> {
    writer: W,
}

impl<W: Write> WriterRenderer<W> {
    /// Creates a renderer writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_page(&mut self, title: &str, message: &str, json_payload: &str) -> std::io::Result<()> {
        writeln!(self.writer, "{}", title)?;
        writeln!(self.writer, "{}", "=".repeat(title.chars().count()))?;
        writeln!(self.writer, "{}", message)?;

        if !json_payload.is_empty() {
            let pretty = serde_json::from_str::<serde_json::Value>(json_payload)
                .and_then(|value| serde_json::to_string_pretty(&value))
                .unwrap_or_else(|_| json_payload.to_string());
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", pretty)?;
        }

        self.writer.flush()
    }
}

impl WriterRenderer<std::io::Stdout> {
    /// Creates a renderer writing to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ResultRenderer for WriterRenderer<W> {
    fn render(&mut self, title: &str, message: &str, json_payload: &str) {
        if let Err(e) = self.write_page(title, message, json_payload) {
            tracing::warn!(error = %e, "failed to render result page");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_title_message_and_pretty_payload() {
        let mut renderer = WriterRenderer::new(Vec::new());
        renderer.render("Get monitoring data", "Results:", r#"[{"endCursor":"c1"}]"#);
        let page = String::from_utf8(renderer.into_inner()).unwrap();

        assert_eq!(
            page,
            "Get monitoring data\n===================\nResults:\n\n[\n  {\n    \"endCursor\": \"c1\"\n  }\n]\n"
        );
    }

    #[test]
    fn advisory_page_has_no_payload_section() {
        let mut renderer = WriterRenderer::new(Vec::new());
        renderer.render("Title", crate::CONNECTION_ADVISORY, "");
        let page = String::from_utf8(renderer.into_inner()).unwrap();

        assert_eq!(page, format!("Title\n=====\n{}\n", crate::CONNECTION_ADVISORY));
    }
}

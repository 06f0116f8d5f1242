use std::fmt::Write;

use reqwest::header::AUTHORIZATION;

use crate::MonitorError;

/// Trait for converting a `reqwest::Request` to a HTTP string.
pub trait RequestToHttpString {
    /// Converts the `reqwest::Request` to a HTTP string.
    ///
    /// The `Authorization` header value is redacted.
    fn to_http_string(&self) -> Result<String, MonitorError>;
}

impl RequestToHttpString for reqwest::Request {
    fn to_http_string(&self) -> Result<String, MonitorError> {
        let mut result = String::new();

        let query = self
            .url()
            .query()
            .map(|q| format!("?{}", q))
            .unwrap_or_default();
        writeln!(
            result,
            "{} {}{} HTTP/1.1",
            self.method(),
            self.url().path(),
            query
        )?;

        if let Some(host) = self.url().host_str() {
            if let Some(port) = self.url().port() {
                writeln!(result, "host: {}:{}", host, port)?;
            } else {
                writeln!(result, "host: {}", host)?;
            }
        }

        for (name, value) in self.headers() {
            if name == AUTHORIZATION {
                writeln!(result, "{}: Bearer <redacted>", name)?;
            } else {
                writeln!(result, "{}: {}", name, value.to_str()?)?;
            }
        }

        writeln!(result)?;

        Ok(result)
    }
}

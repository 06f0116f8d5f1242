use std::time::Instant;

use futures::Stream;
use serde_json::Value;

use crate::cursor::Cursor;
use crate::error::MonitorError;
use crate::responses::{PageResponse, ResultSet};
use crate::{MonitorClient, MonitorResult};

/// Pages through a cursor-paginated stream.
///
/// Every request sends the cursor returned by the previous response. The stream is
/// finished once the server echoes back the cursor it was given; that last response
/// carries no new data and is discarded.
///
/// Requests are issued one at a time, each completing before the next is built.
pub struct CursorPaginator<'a> {
    client: &'a MonitorClient,
    cursor: Cursor,
    pages_fetched: u32,
    started: Instant,
    finished: bool,
}

impl<'a> CursorPaginator<'a> {
    /// Create a new paginator starting at the beginning of the stream.
    pub(crate) fn new(client: &'a MonitorClient, page_size: u32) -> MonitorResult<Self> {
        if page_size == 0 {
            return Err(MonitorError::InvalidPageSize);
        }

        Ok(Self {
            client,
            cursor: Cursor::new(page_size),
            pages_fetched: 0,
            started: Instant::now(),
            finished: false,
        })
    }

    /// Fetch the next page of the stream.
    ///
    /// Returns None when there are no more pages available. After an error the
    /// paginator is finished as well.
    pub async fn next_page(&mut self) -> MonitorResult<Option<Value>> {
        if self.finished {
            return Ok(None);
        }

        let result = self.advance().await;
        if result.is_err() {
            self.finished = true;
        }
        result
    }

    async fn advance(&mut self) -> MonitorResult<Option<Value>> {
        let page = self.fetch_current().await?;

        if self.cursor.is_exhausted_by(&page.end_cursor) {
            tracing::debug!(pages = self.pages_fetched, "stream exhausted");
            self.finished = true;
            return Ok(None);
        }

        if let Some(max_pages) = self.client.max_pages {
            if self.pages_fetched >= max_pages {
                tracing::warn!(max_pages, "page limit reached before the stream ended");
                return Err(MonitorError::PageLimitExceeded(max_pages));
            }
        }

        self.pages_fetched += 1;
        self.cursor.set_cursor_id(page.end_cursor);
        Ok(Some(page.body))
    }

    async fn fetch_current(&self) -> MonitorResult<PageResponse> {
        let Some(budget) = self.client.max_duration else {
            return self.client.fetch_page(&self.cursor).await;
        };

        let remaining = budget
            .checked_sub(self.started.elapsed())
            .filter(|remaining| !remaining.is_zero())
            .ok_or(MonitorError::DeadlineExceeded(budget))?;

        match tokio::time::timeout(remaining, self.client.fetch_page(&self.cursor)).await {
            Ok(page) => page,
            Err(_) => {
                tracing::warn!(?budget, "pagination ran out of time");
                Err(MonitorError::DeadlineExceeded(budget))
            }
        }
    }

    /// Collect all remaining pages into a `ResultSet`.
    pub async fn collect_all(&mut self) -> MonitorResult<ResultSet> {
        let mut pages = ResultSet::new();
        while let Some(page) = self.next_page().await? {
            pages.push(page);
        }
        Ok(pages)
    }

    /// Turns the paginator into a stream of pages.
    pub fn into_stream(self) -> impl Stream<Item = MonitorResult<Value>> + 'a {
        futures::stream::try_unfold(self, |mut paginator| async move {
            let page = paginator.next_page().await?;
            Ok::<_, MonitorError>(page.map(|page| (page, paginator)))
        })
    }

    /// Returns the cursor that the next request will send.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Returns the amount of pages fetched so far.
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Check if all pages have been fetched.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

//! Lazily paginated query results.

use crate::dao::FollowEdgeTableClient;
use crate::query::{QueryExpression, QueryPage};
use followgraph_core::{FollowEdge, FollowGraphError, FollowGraphResult};
use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::debug;

/// Forward-only stream of edges, fetched from the store one page at a time.
///
/// No page is requested until the stream is first polled, and the next page is
/// requested only once the current one is drained. A store error is yielded once
/// and ends the stream. The list is consumed by iteration and cannot be restarted;
/// run the query again for a fresh pass.
pub struct PaginatedQueryList {
    inner: BoxStream<'static, FollowGraphResult<FollowEdge>>,
}

impl PaginatedQueryList {
    /// Creates a list that pages through `expression` using `client`.
    #[must_use]
    pub fn new(client: Arc<dyn FollowEdgeTableClient>, expression: QueryExpression) -> Self {
        let pages = stream::try_unfold(Some(expression), move |next| {
            let client = Arc::clone(&client);
            async move {
                let Some(expression) = next else {
                    return Ok(None);
                };

                let QueryPage {
                    items,
                    last_evaluated_key,
                } = client.query_page(&expression).await?;
                debug!(
                    items = items.len(),
                    more = last_evaluated_key.is_some(),
                    "Fetched follow edge page"
                );

                let next = last_evaluated_key.map(|key| expression.with_exclusive_start_key(key));
                Ok::<_, FollowGraphError>(Some((items, next)))
            }
        });

        let inner = pages
            .map_ok(|items| stream::iter(items.into_iter().map(Ok::<_, FollowGraphError>)))
            .try_flatten()
            .boxed();

        Self { inner }
    }

    /// Drains every remaining page into a `Vec`.
    pub async fn try_collect_all(self) -> FollowGraphResult<Vec<FollowEdge>> {
        self.try_collect().await
    }
}

impl Stream for PaginatedQueryList {
    type Item = FollowGraphResult<FollowEdge>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl std::fmt::Debug for PaginatedQueryList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedQueryList").finish_non_exhaustive()
    }
}

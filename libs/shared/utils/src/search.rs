use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::debug;

/// Outcome of a debounced search.
#[derive(Debug, Clone, PartialEq)]
pub enum Debounced<T> {
    Applied(T),
    /// A newer search arrived before this one could be applied.
    Superseded,
}

/// Delays a search until input has been quiet for `delay`, and drops any
/// result that is no longer the latest.
///
/// Every call takes a ticket from a monotonically increasing sequence. A
/// call whose ticket is stale after the quiet period never queries, and a
/// call whose ticket goes stale while the query is in flight discards its
/// result.
#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    latest: AtomicU64,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: AtomicU64::new(0),
        }
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub async fn run<F, Fut, T>(&self, query: F) -> Debounced<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(self.delay).await;

        if self.latest() != ticket {
            debug!("Search #{} superseded before querying", ticket);
            return Debounced::Superseded;
        }

        let output = query().await;

        if self.latest() != ticket {
            debug!("Search #{} superseded while in flight", ticket);
            return Debounced::Superseded;
        }

        Debounced::Applied(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn single_search_runs_after_delay() {
        let debouncer = SearchDebouncer::new(Duration::from_millis(300));
        let start = tokio::time::Instant::now();

        let result = debouncer.run(|| async { "all" }).await;

        assert_eq!(result, Debounced::Applied("all"));
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_keystrokes_run_one_query() {
        let debouncer = Arc::new(SearchDebouncer::new(Duration::from_millis(300)));
        let queries = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for term in ["a", "an", "ana"] {
            let debouncer = debouncer.clone();
            let queries = queries.clone();
            handles.push(tokio::spawn(async move {
                debouncer
                    .run(|| async move {
                        queries.fetch_add(1, Ordering::SeqCst);
                        term
                    })
                    .await
            }));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        assert_eq!(queries.load(Ordering::SeqCst), 1);
        assert_eq!(results[0], Debounced::Superseded);
        assert_eq!(results[1], Debounced::Superseded);
        assert_eq!(results[2], Debounced::Applied("ana"));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_stale_response_is_discarded() {
        let debouncer = Arc::new(SearchDebouncer::new(Duration::from_millis(300)));

        let slow = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move {
                debouncer
                    .run(|| async {
                        tokio::time::sleep(Duration::from_secs(2)).await;
                        "slow"
                    })
                    .await
            })
        };

        // Let the first search pass its quiet period and start querying.
        tokio::time::sleep(Duration::from_millis(400)).await;

        let fast = debouncer.run(|| async { "fast" }).await;
        let slow = slow.await.unwrap();

        assert_eq!(fast, Debounced::Applied("fast"));
        assert_eq!(slow, Debounced::Superseded);
        assert_eq!(debouncer.latest(), 2);
    }
}

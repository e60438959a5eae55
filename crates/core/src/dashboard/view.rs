use crate::dashboard::state::{QueryState, Submission};
use crate::domain::score::ScoreRecord;
use crate::scores::{FetchError, ScoreSource};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// One live dashboard instance. Owns its query state; responses that arrive
/// after [`DashboardView::unmount`] (or drop) are discarded.
#[derive(Debug)]
pub struct DashboardView {
    state: Arc<Mutex<QueryState>>,
    mounted: Arc<AtomicBool>,
}

/// Handle carried by an in-flight fetch back to its originating view.
#[derive(Debug, Clone)]
struct Completion {
    state: Arc<Mutex<QueryState>>,
    mounted: Arc<AtomicBool>,
}

impl Completion {
    async fn apply(&self, outcome: Result<Vec<ScoreRecord>, FetchError>) -> bool {
        let mut state = self.state.lock().await;
        if !self.mounted.load(Ordering::Acquire) {
            tracing::debug!("dashboard view unmounted; discarding score response");
            return false;
        }
        state.complete(outcome);
        true
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::mount(QueryState::default())
    }
}

impl DashboardView {
    pub fn mount(state: QueryState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }

    pub async fn snapshot(&self) -> QueryState {
        self.state.lock().await.clone()
    }

    /// Runs a full query cycle inline. At most one fetch is issued.
    pub async fn submit_query(&self, input_text: &str, source: &dyn ScoreSource) -> Submission {
        let submission = self.state.lock().await.begin(input_text);
        if let Submission::Dispatched(symbols) = &submission {
            let outcome = source.fetch_scores(symbols).await;
            self.completion().apply(outcome).await;
        }
        submission
    }

    /// Starts a query cycle and completes it on a background task.
    pub async fn spawn_query(
        &self,
        input_text: &str,
        source: Arc<dyn ScoreSource>,
    ) -> Submission {
        let submission = self.state.lock().await.begin(input_text);
        if let Submission::Dispatched(symbols) = &submission {
            let completion = self.completion();
            let symbols = symbols.clone();
            tracing::debug!(source = source.source_name(), ?symbols, "dispatching score fetch");
            tokio::spawn(async move {
                let outcome = source.fetch_scores(&symbols).await;
                completion.apply(outcome).await;
            });
        }
        submission
    }

    fn completion(&self) -> Completion {
        Completion {
            state: Arc::clone(&self.state),
            mounted: Arc::clone(&self.mounted),
        }
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{FETCH_FAILED_MESSAGE, VALIDATION_MESSAGE};
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::sync::Notify;

    fn record(symbol: &str, rating: &str) -> ScoreRecord {
        ScoreRecord {
            symbol: Some(symbol.to_string()),
            yahoo_ticker: Some(symbol.to_string()),
            rating: Some(rating.to_string()),
            ..Default::default()
        }
    }

    struct StaticSource {
        outcome: Result<Vec<ScoreRecord>, FetchError>,
        calls: AtomicUsize,
    }

    impl StaticSource {
        fn new(outcome: Result<Vec<ScoreRecord>, FetchError>) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ScoreSource for StaticSource {
        fn source_name(&self) -> &'static str {
            "static"
        }

        async fn fetch_scores(&self, _symbols: &[String]) -> Result<Vec<ScoreRecord>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    /// Holds every request until released.
    struct GatedSource {
        gate: Notify,
        calls: AtomicUsize,
    }

    impl GatedSource {
        fn new() -> Self {
            Self {
                gate: Notify::new(),
                calls: AtomicUsize::new(0),
            }
        }

        fn release(&self) {
            self.gate.notify_one();
        }
    }

    #[async_trait::async_trait]
    impl ScoreSource for GatedSource {
        fn source_name(&self) -> &'static str {
            "gated"
        }

        async fn fetch_scores(&self, symbols: &[String]) -> Result<Vec<ScoreRecord>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(symbols.iter().map(|s| record(s, "A")).collect())
        }
    }

    async fn wait_until_idle(view: &DashboardView) -> QueryState {
        for _ in 0..200 {
            let snapshot = view.snapshot().await;
            if !snapshot.is_loading {
                return snapshot;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("dashboard view never left the loading state");
    }

    #[tokio::test]
    async fn successful_response_populates_results() {
        let source = StaticSource::new(Ok(vec![record("RELIANCE.NS", "AA")]));
        let view = DashboardView::default();

        let submission = view.submit_query("RELIANCE", &source).await;
        assert_eq!(submission, Submission::Dispatched(vec!["RELIANCE.NS".into()]));

        let state = view.snapshot().await;
        assert_eq!(state.results.len(), 1);
        assert!(state.error.is_none());
        assert!(!state.is_loading);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn blank_input_makes_no_network_call() {
        let source = StaticSource::new(Ok(vec![]));
        let view = DashboardView::default();

        for input in ["", ",  ,"] {
            assert_eq!(view.submit_query(input, &source).await, Submission::Invalid);
            let state = view.snapshot().await;
            assert_eq!(state.error.as_deref(), Some(VALIDATION_MESSAGE));
            assert!(!state.is_loading);
        }
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn network_failure_leaves_results_empty() {
        let source = StaticSource::new(Err(FetchError::Network("connection refused".into())));
        let view = DashboardView::default();

        view.submit_query("TCS", &source).await;

        let state = view.snapshot().await;
        assert!(state.results.is_empty());
        assert_eq!(state.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn second_submission_while_in_flight_is_rejected() {
        let source = Arc::new(GatedSource::new());
        let view = DashboardView::default();

        let first = view.spawn_query("RELIANCE", source.clone()).await;
        assert!(matches!(first, Submission::Dispatched(_)));

        let second = view.spawn_query("TCS", source.clone()).await;
        assert_eq!(second, Submission::Busy);
        assert!(view.snapshot().await.is_loading);

        source.release();
        let state = wait_until_idle(&view).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].symbol.as_deref(), Some("RELIANCE.NS"));
    }

    #[tokio::test]
    async fn late_response_after_unmount_is_discarded() {
        let source = Arc::new(GatedSource::new());
        let view = DashboardView::default();

        view.spawn_query("RELIANCE", source.clone()).await;
        view.unmount();
        assert!(!view.is_mounted());

        source.release();
        tokio::time::sleep(Duration::from_millis(50)).await;

        let state = view.snapshot().await;
        assert!(state.results.is_empty());
        assert!(state.is_loading);
    }

    #[tokio::test]
    async fn completion_reports_whether_it_applied() {
        let view = DashboardView::default();
        view.state.lock().await.begin("TCS");

        let completion = view.completion();
        assert!(completion.apply(Ok(vec![record("TCS.NS", "AAA")])).await);

        drop(view);
        assert!(!completion.apply(Ok(vec![])).await);
        assert_eq!(completion.state.lock().await.results.len(), 1);
    }
}

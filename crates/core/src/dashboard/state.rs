use crate::dashboard::{QueryError, DEFAULT_TICKER_INPUT};
use crate::domain::score::ScoreRecord;
use crate::domain::symbol::normalize_symbols;
use crate::scores::FetchError;
use chrono::{DateTime, Utc};

/// Outcome of starting a query cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Input normalized; exactly one fetch for these symbols follows.
    Dispatched(Vec<String>),
    /// Nothing usable in the input. No fetch was made.
    Invalid,
    /// A request is already in flight for this view. Ignored.
    Busy,
}

#[derive(Debug, Clone)]
pub struct QueryState {
    pub input_text: String,
    pub symbols: Vec<String>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub results: Vec<ScoreRecord>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::with_input(DEFAULT_TICKER_INPUT)
    }
}

impl QueryState {
    pub fn with_input(input_text: impl Into<String>) -> Self {
        Self {
            input_text: input_text.into(),
            symbols: Vec::new(),
            is_loading: false,
            error: None,
            results: Vec::new(),
            fetched_at: None,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading
    }

    /// Starts a cycle: resets error and results, normalizes the input and
    /// settles validation failures immediately.
    pub fn begin(&mut self, input_text: &str) -> Submission {
        if self.is_loading {
            return Submission::Busy;
        }

        self.input_text = input_text.to_string();
        self.is_loading = true;
        self.error = None;
        self.results.clear();
        self.fetched_at = None;

        self.symbols = normalize_symbols(input_text);
        if self.symbols.is_empty() {
            self.fail(QueryError::Validation);
            return Submission::Invalid;
        }

        Submission::Dispatched(self.symbols.clone())
    }

    pub fn complete(&mut self, outcome: Result<Vec<ScoreRecord>, FetchError>) {
        match outcome {
            Ok(scores) => {
                self.results = scores;
                self.error = None;
                self.fetched_at = Some(Utc::now());
                self.is_loading = false;
                self.symbols.clear();
            }
            Err(err) => {
                tracing::warn!(symbols = ?self.symbols, error = %err, "score fetch failed");
                self.fail(err.into());
            }
        }
    }

    fn fail(&mut self, err: QueryError) {
        self.error = Some(err.user_message().to_string());
        self.results.clear();
        self.is_loading = false;
        self.symbols.clear();
    }
}

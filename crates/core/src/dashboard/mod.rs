//! Dashboard query orchestration: input normalization, one fetch per
//! submission, and the state the dashboard page renders from.

mod state;
mod view;

pub use state::{QueryState, Submission};
pub use view::DashboardView;

use crate::scores::FetchError;

pub const DEFAULT_TICKER_INPUT: &str = "RELIANCE, TCS, TATAMOTORS";

pub const VALIDATION_MESSAGE: &str = "Please enter at least one valid stock ticker.";

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch scores. Please ensure the backend server is running and the tickers are valid.";

/// Every way a submission can fail. Converted to a user-facing string at the
/// dashboard boundary and never propagated further.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("no usable ticker symbols in input")]
    Validation,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl QueryError {
    pub fn user_message(&self) -> &'static str {
        match self {
            QueryError::Validation => VALIDATION_MESSAGE,
            QueryError::Fetch(_) => FETCH_FAILED_MESSAGE,
        }
    }
}

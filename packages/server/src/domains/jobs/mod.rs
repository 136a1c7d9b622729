//! Jobs domain - on-demand fetch of one board/company pair
//!
//! Read-only counterpart of the sync domain: resolves the board and returns
//! whatever the adapter returns, without touching the job sink.

use tracing::debug;

use crate::common::{Error, Job, Result};
use crate::domains::boards::{company_slug, BoardRegistry};

/// Fetch postings for `company` from `board`.
///
/// An unknown board or a blank company is `InvalidArgument`; adapter
/// failures pass through with their own kind.
pub async fn get_jobs(boards: &BoardRegistry, board: &str, company: &str) -> Result<Vec<Job>> {
    let adapter = boards.resolve(board).ok_or_else(|| {
        debug!(board, "Requested unsupported job board");
        Error::invalid_argument(format!("Job board {} not supported", board))
    })?;
    let company = company_slug(company)?;

    adapter.fetch(company).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;
    use crate::kernel::test_dependencies::{sample_jobs, MockBoard};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unknown_board_is_invalid_argument() {
        let err = get_jobs(&BoardRegistry::empty(), "unknown-board", "acme")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_passes_through_adapter_result() {
        let boards = BoardRegistry::empty().with_adapter(Arc::new(
            MockBoard::new("lever")
                .with_jobs("acme", sample_jobs("lever", "acme", 2))
                .failing("globex", ErrorKind::Unavailable),
        ));

        assert_eq!(get_jobs(&boards, "lever", "acme").await.unwrap().len(), 2);
        assert_eq!(
            get_jobs(&boards, "lever", "globex").await.unwrap_err().kind(),
            ErrorKind::Unavailable
        );
        assert_eq!(
            get_jobs(&boards, "lever", "initech").await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}

use thiserror::Error;

use crate::domain::PageNumber;

/// A response body that parsed as JSON but does not honor the split contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("page {0} carries no PDF payload")]
    MissingPagePayload(PageNumber),
    #[error("success response carries no pages")]
    MissingPages,
    #[error("page number must be at least 1")]
    ZeroPageNumber,
    #[error("page {0} appears more than once")]
    DuplicatePage(PageNumber),
}

use pathpaint_core::Point;
use thiserror::Error;

/// Convenient result alias for the search engine.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Reasons a search refuses to run. Not finding a path is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// No start cell was supplied.
    #[error("no start cell has been placed")]
    MissingStart,

    /// No end cell was supplied.
    #[error("no end cell has been placed")]
    MissingEnd,

    /// An endpoint lies outside the board.
    #[error("endpoint {pos} is outside the board")]
    OutOfBounds { pos: Point },

    /// An endpoint is a barrier and can never be entered.
    #[error("endpoint {pos} is a barrier")]
    BarrierEndpoint { pos: Point },
}

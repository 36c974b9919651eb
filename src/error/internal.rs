use thiserror::Error;

/// Internal issues with stored data indicating unexpected behavior & possible bugs.
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored timestamp does not match the storage format.
    #[error("Failed to parse timestamp '{value}': {source}")]
    ParseTimestamp {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: chrono::ParseError,
    },

    /// A stored action kind is outside the closed set.
    #[error("Unknown action kind '{value}' in ledger row")]
    UnknownActionKind {
        /// The stored value
        value: String,
    },

    /// A stored ticket status is neither OPEN nor CLOSED.
    #[error("Unknown ticket status '{value}'")]
    UnknownTicketStatus {
        /// The stored value
        value: String,
    },
}

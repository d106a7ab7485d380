use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input was empty or whitespace only.
    #[error("no response text provided")]
    NoResponseText,
    /// The scan faulted; no partial record is kept.
    #[error("failed to parse response")]
    Internal,
}

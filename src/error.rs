// Error taxonomy for the capture-and-handoff flow.
// Commands flatten these to Result<_, String> at the Tauri boundary.

/// Failure modes of a capture operation.
///
/// Propagation policy:
/// - `DirectHandoff` is always recovered locally by the clipboard fallback
///   and never reaches the user directly.
/// - `Clipboard` is the terminal failure of the final fallback and is
///   surfaced as a status message.
/// - `Storage` degrades (see categories module) unless no category can be
///   determined at all.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no tabs available to capture")]
    NoTarget,
    #[error("no destination category selected")]
    NoCategory,
    #[error("category storage failed: {0}")]
    Storage(String),
    #[error("direct handoff failed: {0}")]
    DirectHandoff(String),
    #[error("clipboard write failed: {0}")]
    Clipboard(String),
    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

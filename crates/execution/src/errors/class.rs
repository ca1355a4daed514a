/// Classification of execution failures.
///
/// Callers map this onto their own surface (HTTP status, card stage) instead
/// of matching on every [`ExecutionError`](super::ExecutionError) variant.
///
/// # Behavior Summary
///
/// | Class | Network side effect? | Typical surface |
/// |-------|----------------------|-----------------|
/// | `Invalid` | No | 400 |
/// | `Remote` | Yes | 500 with upstream details |
/// | `Timeout` | Yes, the full poll budget | 408 |
/// | `Cancelled` | Partial | request abandoned |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureClass {
    /// The caller supplied unusable parameters; nothing was sent.
    Invalid,

    /// Submission or status fetch failed, or the remote execution itself
    /// reported a terminal failure.
    Remote,

    /// The poll budget ran out without observing a completed execution.
    Timeout,

    /// The wait was aborted through its cancellation token.
    Cancelled,
}

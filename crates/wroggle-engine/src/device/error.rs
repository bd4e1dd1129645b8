use glutin::error::ErrorKind;

/// High-level response after a failed buffer swap.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SwapErrorAction {
    /// Transient error; skip the current frame.
    SkipFrame,
    /// The context is gone; terminate.
    Fatal,
}

impl SwapErrorAction {
    pub(crate) fn classify(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::ContextLost | ErrorKind::BadContext | ErrorKind::BadDisplay => {
                SwapErrorAction::Fatal
            }
            _ => SwapErrorAction::SkipFrame,
        }
    }
}

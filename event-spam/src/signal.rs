use std::sync::Arc;

use tokio::sync::SetOnce;

/// One-shot broadcast flag. Clones share the same underlying state.
#[derive(Clone)]
pub struct StopSignal {
    _inner: Arc<SetOnce<()>>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self {
            _inner: Arc::new(SetOnce::new()),
        }
    }

    /// Returns `false` if the signal had already been raised.
    pub fn raise(&self) -> bool {
        self._inner.set(()).is_ok()
    }

    pub fn is_raised(&self) -> bool {
        self._inner.get().is_some()
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

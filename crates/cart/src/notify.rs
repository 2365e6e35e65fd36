//! User-facing notification side channel.
//!
//! Cart operations never hand errors back to the UI; they report them here
//! and leave presentation (toasts, banners, CLI output) to the front-end.

use std::sync::{Arc, Mutex};

/// Messages shown to shoppers (pt-BR).
pub mod messages {
    /// Requested quantity is more than the store has.
    pub const OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";
    /// Adding a product failed for any other reason.
    pub const ADD_FAILED: &str = "Erro na adição do produto";
    /// Removing a product failed.
    pub const REMOVE_FAILED: &str = "Erro na remoção do produto";
    /// Changing a product's quantity failed for any other reason.
    pub const UPDATE_FAILED: &str = "Erro na alteração de quantidade do produto";
}

/// Receiver for user-facing error notifications.
pub trait Notifier: Send + Sync {
    /// Report a failure to the user.
    fn error(&self, message: &str);
}

/// Notifier that keeps every message in memory.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    errors: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far, oldest first.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.errors
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Whether any error has been reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.lock().is_ok_and(|guard| !guard.is_empty())
    }

    /// Forget everything received so far.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.errors.lock() {
            guard.clear();
        }
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        if let Ok(mut guard) = self.errors.lock() {
            guard.push(message.to_string());
        }
    }
}

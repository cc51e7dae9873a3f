//! Durable slot abstraction and the in-memory backend.

use std::sync::{Arc, Mutex};

use crate::{AppError, Result};

/// Single-blob storage with full-read and full-replace semantics.
///
/// An empty blob means "no saved state". Implementations must make
/// [`DurableSlot::write`] all-or-nothing: on failure the previous contents
/// stay readable.
pub trait DurableSlot {
    /// Read the entire blob.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the backing medium cannot be read.
    fn read(&self) -> Result<Vec<u8>>;

    /// Atomically replace the entire blob with `bytes`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the replace did not complete.
    fn write(&self, bytes: &[u8]) -> Result<()>;
}

/// In-memory slot. Clones share the same blob, so a "restarted" session can
/// be pointed at the slot an interrupted one left behind.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    blob: Arc<Mutex<Vec<u8>>>,
}

impl MemorySlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-populated with `bytes`.
    #[must_use]
    pub fn with_contents(bytes: Vec<u8>) -> Self {
        Self {
            blob: Arc::new(Mutex::new(bytes)),
        }
    }
}

impl DurableSlot for MemorySlot {
    fn read(&self) -> Result<Vec<u8>> {
        let guard = self
            .blob
            .lock()
            .map_err(|_| AppError::Storage("memory slot mutex poisoned".into()))?;
        Ok(guard.clone())
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        let mut guard = self
            .blob
            .lock()
            .map_err(|_| AppError::Storage("memory slot mutex poisoned".into()))?;
        *guard = bytes.to_vec();
        Ok(())
    }
}

//! Transaction handles for the storage collaborator.
//!
//! Hydration always runs in a `ReadOnly` transaction; only fixtures and
//! writers open `ReadWrite`.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Transaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxMode {
    ReadOnly,
    ReadWrite,
}

impl TxMode {
    pub fn is_writable(self) -> bool {
        matches!(self, TxMode::ReadWrite)
    }
}

/// Opaque transaction identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(pub u64);

/// Implemented by every backend's transaction type.
pub trait Transaction: Send + Sync {
    fn mode(&self) -> TxMode;
    fn id(&self) -> TxId;

    /// Fails with [`Error::TxError`] unless the transaction may write.
    fn ensure_writable(&self) -> Result<()> {
        if self.mode().is_writable() {
            return Ok(());
        }
        Err(Error::TxError(format!("transaction {} is read-only", self.id().0)))
    }
}

//! Versioned, checksummed encoding of the state snapshot.
//!
//! The blob is a JSON object `{"version", "checksum", "state"}` where
//! `checksum` is the SHA-256 hex digest of the JSON text of `state`.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::models::snapshot::Snapshot;
use crate::{AppError, Result};

/// Current envelope format version.
pub const ENVELOPE_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    version: u32,
    checksum: String,
    state: &'a serde_json::value::RawValue,
}

#[derive(Deserialize)]
struct EnvelopeIn<'a> {
    version: u32,
    checksum: String,
    #[serde(borrow)]
    state: &'a serde_json::value::RawValue,
}

/// Encode `snapshot` into the bytes stored in the durable slot.
///
/// # Errors
///
/// Returns `AppError::Snapshot` if serialization fails.
pub fn encode(snapshot: &Snapshot) -> Result<Vec<u8>> {
    let state = serde_json::value::to_raw_value(snapshot)?;
    let envelope = EnvelopeOut {
        version: ENVELOPE_VERSION,
        checksum: sha256_hex(state.get().as_bytes()),
        state: &state,
    };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Decode bytes read from the durable slot.
///
/// Returns `Ok(None)` for an empty blob.
///
/// # Errors
///
/// Returns `AppError::Snapshot` if the bytes are not a valid envelope, the
/// version is unsupported, or the checksum does not match.
pub fn decode(bytes: &[u8]) -> Result<Option<Snapshot>> {
    if bytes.is_empty() {
        return Ok(None);
    }

    let envelope: EnvelopeIn<'_> = serde_json::from_slice(bytes)?;
    if envelope.version != ENVELOPE_VERSION {
        return Err(AppError::Snapshot(format!(
            "unsupported snapshot version {}",
            envelope.version
        )));
    }

    let actual = sha256_hex(envelope.state.get().as_bytes());
    if actual != envelope.checksum {
        return Err(AppError::Snapshot(format!(
            "checksum mismatch: expected {}, got {actual}",
            envelope.checksum
        )));
    }

    let snapshot: Snapshot = serde_json::from_str(envelope.state.get())?;
    snapshot.check_invariants()?;
    Ok(Some(snapshot))
}

/// Compute SHA-256 hex digest of the given bytes.
fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

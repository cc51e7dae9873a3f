//! Checkpoint protocol: every snapshot mutation is persisted before the
//! caller regains control.
//!
//! [`Checkpointer`] owns the in-memory [`Snapshot`] and is the only writer of
//! the [`DurableSlot`]. Mutations go through [`Checkpointer::update`], which
//! applies the change, encodes the whole snapshot, and replaces the slot
//! contents synchronously. Callers must not touch the line channel between a
//! mutation and the return of its `update` call.

use tracing::{debug, info};

use crate::models::snapshot::{Progress, Snapshot};
use crate::persistence::envelope;
use crate::persistence::DurableSlot;
use crate::Result;

/// Single writer of the durable slot.
pub struct Checkpointer<'a> {
    slot: &'a dyn DurableSlot,
    snapshot: Snapshot,
    resumed: bool,
    writes: u64,
}

impl<'a> Checkpointer<'a> {
    /// Load the snapshot stored in `slot`, or start fresh if it is empty.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the slot cannot be read, or
    /// `AppError::Snapshot` if its contents do not decode.
    pub fn resume(slot: &'a dyn DurableSlot) -> Result<Self> {
        let bytes = slot.read()?;
        let (snapshot, resumed) = match envelope::decode(&bytes)? {
            Some(snapshot) => (snapshot, true),
            None => (Snapshot::default(), false),
        };

        if resumed {
            info!(
                command = snapshot.command_kind(),
                pending = snapshot.pending_input.as_deref().unwrap_or(""),
                rng_state = snapshot.rng_state,
                "resuming from saved snapshot"
            );
        } else {
            info!("no saved snapshot, starting fresh session");
        }

        Ok(Self {
            slot,
            snapshot,
            resumed,
            writes: 0,
        })
    }

    /// Current in-memory snapshot. Always equal to the last persisted one
    /// between `update` calls.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Whether the session started from a saved snapshot.
    #[must_use]
    pub fn is_resumed(&self) -> bool {
        self.resumed
    }

    /// Number of checkpoints written by this instance.
    #[must_use]
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Apply `mutate` to the snapshot and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Snapshot` if encoding fails or `AppError::Storage`
    /// if the slot rejects the replace. Either is fatal for the session.
    pub fn update<R>(&mut self, mutate: impl FnOnce(&mut Snapshot) -> R) -> Result<R> {
        let out = mutate(&mut self.snapshot);
        self.persist()?;
        Ok(out)
    }

    /// Install `progress` as the active command progress and persist.
    ///
    /// # Errors
    ///
    /// See [`Checkpointer::update`].
    pub fn stage<P: Progress>(&mut self, progress: &P) -> Result<()> {
        let wrapped = progress.clone().wrap();
        self.update(|snapshot| snapshot.command = Some(wrapped))
    }

    /// Mark the pending command as handled: drop its progress and the
    /// pending input in a single checkpoint.
    ///
    /// # Errors
    ///
    /// See [`Checkpointer::update`].
    pub fn complete_command(&mut self) -> Result<()> {
        self.update(|snapshot| {
            snapshot.command = None;
            snapshot.pending_input = None;
        })
    }

    /// Replace the slot with an empty blob and reset the in-memory snapshot.
    /// The session cannot be resumed afterwards.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the slot rejects the replace.
    pub fn clear(&mut self) -> Result<()> {
        self.slot.write(&[])?;
        self.snapshot = Snapshot::default();
        self.writes += 1;
        debug!("snapshot cleared");
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        let bytes = envelope::encode(&self.snapshot)?;
        self.slot.write(&bytes)?;
        self.writes += 1;
        debug!(
            seq = self.writes,
            bytes = bytes.len(),
            command = self.snapshot.command_kind(),
            "checkpoint written"
        );
        Ok(())
    }
}

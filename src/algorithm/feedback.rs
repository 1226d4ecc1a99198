//! Persisted accept/reject verdict
//!
//! Only the most recent verdict is kept, as a single byte at a fixed
//! address. A one-byte record cannot be torn by a power loss mid-write.
//! Byte values other than `1` (including an erased cell) read back as
//! "no positive feedback".

use std::fmt;

use tracing::{info, warn};

use crate::io::error::{CircuitError, Result};
use crate::io::store::{PersistentByteStore, check_range};

/// Encoded byte for a positive verdict
pub const POSITIVE_BYTE: u8 = 1;
/// Encoded byte for a negative verdict
pub const NEGATIVE_BYTE: u8 = 0;

/// Operator judgment on the current diagram
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The diagram is liked
    Accepted,
    /// The diagram is disliked
    Rejected,
}

impl Verdict {
    /// Whether the verdict is positive
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Verdict for a boolean judgment
    pub const fn from_positive(positive: bool) -> Self {
        if positive {
            Self::Accepted
        } else {
            Self::Rejected
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => f.write_str("accepted"),
            Self::Rejected => f.write_str("rejected"),
        }
    }
}

/// Most recent verdict in its persisted form
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeedbackRecord {
    /// Whether the last verdict was positive
    pub positive: bool,
}

impl FeedbackRecord {
    /// Byte written to the store
    pub const fn encode(self) -> u8 {
        if self.positive {
            POSITIVE_BYTE
        } else {
            NEGATIVE_BYTE
        }
    }

    /// Interpret a stored byte
    pub const fn decode(byte: u8) -> Self {
        Self {
            positive: byte == POSITIVE_BYTE,
        }
    }

    /// Verdict carried by the record
    pub const fn verdict(self) -> Verdict {
        Verdict::from_positive(self.positive)
    }
}

impl From<Verdict> for FeedbackRecord {
    fn from(verdict: Verdict) -> Self {
        Self {
            positive: verdict.is_positive(),
        }
    }
}

/// Verdict persistence at a fixed store address
#[derive(Debug)]
pub struct FeedbackStore<S> {
    store: S,
    address: usize,
}

impl<S: PersistentByteStore> FeedbackStore<S> {
    /// Bind a feedback record to `address` in `store`
    ///
    /// # Errors
    ///
    /// Returns `StoreAccess` when the address is past the end of the store
    pub fn new(store: S, address: usize) -> Result<Self> {
        check_range(address, 1, store.capacity())?;
        Ok(Self { store, address })
    }

    /// Address of the record byte
    pub const fn address(&self) -> usize {
        self.address
    }

    /// Persist a verdict, replacing the previous one
    ///
    /// # Errors
    ///
    /// Propagates the byte store's write error
    pub fn save_feedback(&mut self, is_positive: bool) -> Result<()> {
        let record = FeedbackRecord {
            positive: is_positive,
        };
        self.store.write(self.address, &[record.encode()])?;
        info!(verdict = %record.verdict(), address = self.address, "feedback saved");
        Ok(())
    }

    /// Read the persisted record
    ///
    /// # Errors
    ///
    /// Propagates the byte store's read error
    pub fn last_record(&self) -> Result<FeedbackRecord> {
        let bytes = self.store.read(self.address, 1)?;
        let byte = bytes.first().copied().ok_or_else(|| CircuitError::StoreAccess {
            address: self.address,
            length: 1,
            capacity: self.store.capacity(),
        })?;
        Ok(FeedbackRecord::decode(byte))
    }

    /// Last verdict, `false` when none was saved or the store cannot be read
    pub fn get_last_feedback(&self) -> bool {
        match self.last_record() {
            Ok(record) => record.positive,
            Err(error) => {
                warn!(%error, "could not read feedback, assuming none");
                false
            }
        }
    }

    /// Borrow the underlying store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Release the underlying store
    pub fn into_store(self) -> S {
        self.store
    }
}

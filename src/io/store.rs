//! Byte-addressable persistent storage
//!
//! Models an EEPROM-style device: reads and writes address single bytes,
//! each byte write settles before the next one starts, and a multi-byte
//! write is not atomic. A power loss part way through a write leaves the
//! earlier bytes updated and the later ones untouched.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, trace};

use crate::io::configuration::ERASED_BYTE;
use crate::io::error::{CircuitError, Result, WithPath};

/// Non-volatile byte store capability
pub trait PersistentByteStore {
    /// Total addressable bytes
    fn capacity(&self) -> usize;

    /// Write `bytes` starting at `address`, one byte at a time
    ///
    /// # Errors
    ///
    /// Returns `StoreAccess` for a range past the end of the device, or the
    /// implementation's I/O error
    fn write(&mut self, address: usize, bytes: &[u8]) -> Result<()>;

    /// Read `length` bytes starting at `address`
    ///
    /// # Errors
    ///
    /// Returns `StoreAccess` for a range past the end of the device, or the
    /// implementation's I/O error
    fn read(&self, address: usize, length: usize) -> Result<Vec<u8>>;
}

/// Settling strategy applied after every byte written
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WritePacing {
    /// No wait between bytes
    #[default]
    Immediate,
    /// Sleep for the given duration after each byte
    Delay(Duration),
}

impl WritePacing {
    /// Block until the last written byte has settled
    pub fn settle(self) {
        if let Self::Delay(delay) = self {
            std::thread::sleep(delay);
        }
    }
}

/// Check that `address..address + length` fits in `capacity`
///
/// # Errors
///
/// Returns `StoreAccess` when the range overflows or runs past the device
pub const fn check_range(address: usize, length: usize, capacity: usize) -> Result<()> {
    match address.checked_add(length) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(CircuitError::StoreAccess {
            address,
            length,
            capacity,
        }),
    }
}

/// Volatile store backed by a byte vector
///
/// Survives a simulated restart by moving its bytes into a new instance with
/// [`MemoryByteStore::from_bytes`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryByteStore {
    bytes: Vec<u8>,
    bytes_written: usize,
}

impl MemoryByteStore {
    /// Create an erased store of `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: vec![ERASED_BYTE; capacity],
            bytes_written: 0,
        }
    }

    /// Restore a store from a previous image
    pub const fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            bytes_written: 0,
        }
    }

    /// Consume the store and return its image
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total bytes written since construction
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }
}

impl PersistentByteStore for MemoryByteStore {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn write(&mut self, address: usize, bytes: &[u8]) -> Result<()> {
        check_range(address, bytes.len(), self.capacity())?;

        for (offset, &byte) in bytes.iter().enumerate() {
            if let Some(slot) = self.bytes.get_mut(address + offset) {
                *slot = byte;
                self.bytes_written += 1;
            }
        }

        Ok(())
    }

    fn read(&self, address: usize, length: usize) -> Result<Vec<u8>> {
        check_range(address, length, self.capacity())?;
        Ok(self
            .bytes
            .get(address..address + length)
            .map(<[u8]>::to_vec)
            .unwrap_or_default())
    }
}

/// Store backed by a fixed-size image file
///
/// Each byte is written, synced to disk and then allowed to settle, so an
/// interrupted multi-byte write leaves a prefix of the new data on disk.
#[derive(Debug)]
pub struct FileByteStore {
    file: File,
    path: PathBuf,
    capacity: usize,
    pacing: WritePacing,
}

impl FileByteStore {
    /// Open an image file, creating an erased one if it does not exist
    ///
    /// An existing file shorter than `capacity` is padded with erased bytes.
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` when the file cannot be opened, read or extended
    pub fn open(path: impl AsRef<Path>, capacity: usize, pacing: WritePacing) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .with_path(&path, "open")?;

        let existing = file.metadata().with_path(&path, "stat")?.len() as usize;
        if existing < capacity {
            file.seek(SeekFrom::Start(existing as u64))
                .with_path(&path, "seek")?;
            file.write_all(&vec![ERASED_BYTE; capacity - existing])
                .with_path(&path, "erase")?;
            file.sync_all().with_path(&path, "sync")?;
            debug!(path = %path.display(), capacity, "initialized store image");
        }

        Ok(Self {
            file,
            path,
            capacity,
            pacing,
        })
    }

    /// Location of the image file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Settling strategy used between bytes
    pub const fn pacing(&self) -> WritePacing {
        self.pacing
    }
}

impl PersistentByteStore for FileByteStore {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn write(&mut self, address: usize, bytes: &[u8]) -> Result<()> {
        check_range(address, bytes.len(), self.capacity)?;

        for (offset, byte) in bytes.iter().enumerate() {
            let target = address + offset;
            self.file
                .seek(SeekFrom::Start(target as u64))
                .with_path(&self.path, "seek")?;
            self.file
                .write_all(std::slice::from_ref(byte))
                .with_path(&self.path, "write")?;
            self.file.sync_data().with_path(&self.path, "sync")?;
            self.pacing.settle();
            trace!(address = target, value = byte, "byte persisted");
        }

        Ok(())
    }

    fn read(&self, address: usize, length: usize) -> Result<Vec<u8>> {
        check_range(address, length, self.capacity)?;

        let mut reader = &self.file;
        reader
            .seek(SeekFrom::Start(address as u64))
            .with_path(&self.path, "seek")?;
        let mut buffer = vec![0; length];
        reader
            .read_exact(&mut buffer)
            .with_path(&self.path, "read")?;
        Ok(buffer)
    }
}

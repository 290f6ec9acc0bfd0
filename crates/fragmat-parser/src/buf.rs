//! Owned storage for a whole model file
//!
//! Decoding only ever borrows `&[u8]` from here, so cloning a [`FragBuf`]
//! shares the bytes instead of copying them.

use bytes::Bytes;
use std::fmt;

#[cfg(feature = "mmap")]
use memmap2::Mmap;
#[cfg(feature = "mmap")]
use std::sync::Arc;

#[derive(Clone)]
enum FragSource {
    /// Read-only memory map of the file
    #[cfg(feature = "mmap")]
    Mmap(Arc<Mmap>),
    /// File contents read into memory
    Memory(Bytes),
}

/// Shared, immutable model buffer
#[derive(Clone)]
pub struct FragBuf {
    source: FragSource,
}

impl FragBuf {
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self {
            source: FragSource::Memory(Bytes::from(data)),
        }
    }

    #[cfg(feature = "mmap")]
    pub fn from_mmap(mmap: Mmap) -> Self {
        Self {
            source: FragSource::Mmap(Arc::new(mmap)),
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        match &self.source {
            #[cfg(feature = "mmap")]
            FragSource::Mmap(mmap) => mmap.as_ref(),
            FragSource::Memory(bytes) => bytes.as_ref(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_mapped(&self) -> bool {
        match self.source {
            #[cfg(feature = "mmap")]
            FragSource::Mmap(_) => true,
            FragSource::Memory(_) => false,
        }
    }
}

impl fmt::Debug for FragBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_mapped() { "mmap" } else { "memory" };
        write!(f, "FragBuf({kind}, len={})", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_becomes_shared_memory() {
        let buf = FragBuf::from_vec(vec![1, 2, 3, 4, 5]);
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4, 5]);
        assert!(!buf.is_mapped());

        let copy = buf.clone();
        assert_eq!(copy.as_slice().as_ptr(), buf.as_slice().as_ptr());
    }

    #[test]
    fn empty_buffer() {
        let buf = FragBuf::from_vec(Vec::new());
        assert!(buf.is_empty());
        assert_eq!(format!("{buf:?}"), "FragBuf(memory, len=0)");
    }
}

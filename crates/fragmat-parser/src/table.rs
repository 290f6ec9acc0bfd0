//! Table, vtable and vector navigation.
//!
//! Layout rules:
//! - the buffer starts with a `u32` offset to the root table
//! - a table starts with an `i32` soffset; its vtable lives at `table - soffset`
//! - a vtable is `u16 vtable_len`, `u16 table_len`, then one `u16` per field id
//!   (0 means the field is not stored)
//! - reference fields hold a `u32` offset relative to the field's own position
//! - a vector is a `u32` element count followed by the elements
//!
//! A zero element inside a vector of tables is read as an empty slot, not a fault.

use crate::read::{read_i32, read_u8, read_u16, read_u32};
use fragmat_error::{DecodeErrorKind, FragError, Result};

/// Size in bytes of a vector-of-tables element
const OFFSET_SIZE: usize = 4;

#[derive(Clone, Copy, Debug)]
pub struct Table<'a> {
    buf: &'a [u8],
    pos: usize,
    vtable: usize,
    vtable_len: usize,
    table_len: usize,
}

impl<'a> Table<'a> {
    /// Decode the root table of a buffer.
    pub fn root(buf: &'a [u8]) -> Result<Self> {
        if buf.len() < 8 {
            return Err(FragError::decode_missing_root(format!(
                "buffer of {} bytes is too small to hold a root table",
                buf.len()
            )));
        }
        let rel = read_u32(buf, 0)? as usize;
        if rel < 4 || rel >= buf.len() {
            return Err(FragError::decode_at(
                format!("root offset {rel} outside buffer of {} bytes", buf.len()),
                DecodeErrorKind::MissingRoot,
                0,
            ));
        }
        Self::at(buf, rel)
    }

    /// Decode the table starting at `pos`, validating its vtable.
    pub fn at(buf: &'a [u8], pos: usize) -> Result<Self> {
        let soffset = read_i32(buf, pos)?;
        let vtable = pos as i64 - i64::from(soffset);
        if vtable < 0 || vtable as usize >= buf.len() {
            return Err(FragError::decode_at(
                format!("vtable for table at 0x{pos:X} points outside the buffer ({vtable})"),
                DecodeErrorKind::InvalidVTable,
                pos,
            ));
        }
        let vtable = vtable as usize;
        let (vtable_len, table_len) = match (read_u16(buf, vtable), read_u16(buf, vtable + 2)) {
            (Ok(v), Ok(t)) => (v as usize, t as usize),
            _ => {
                return Err(FragError::decode_at(
                    format!("vtable header at 0x{vtable:X} is truncated"),
                    DecodeErrorKind::InvalidVTable,
                    vtable,
                ));
            }
        };
        if vtable_len < 4 || vtable_len % 2 != 0 || vtable + vtable_len > buf.len() {
            return Err(FragError::decode_at(
                format!("vtable at 0x{vtable:X} has invalid length {vtable_len}"),
                DecodeErrorKind::InvalidVTable,
                vtable,
            ));
        }
        if table_len < 4 || pos + table_len > buf.len() {
            return Err(FragError::decode_at(
                format!(
                    "table at 0x{pos:X} declares {table_len} bytes but buffer holds {}",
                    buf.len()
                ),
                DecodeErrorKind::Truncated,
                pos,
            ));
        }
        Ok(Self {
            buf,
            pos,
            vtable,
            vtable_len,
            table_len,
        })
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of field ids described by the vtable
    pub fn field_count(&self) -> usize {
        (self.vtable_len - 4) / 2
    }

    /// Absolute position of a stored field, `None` if the vtable omits it
    fn field_pos(&self, id: u16) -> Result<Option<usize>> {
        let entry = 4 + 2 * id as usize;
        if entry + 2 > self.vtable_len {
            return Ok(None);
        }
        let off = read_u16(self.buf, self.vtable + entry)? as usize;
        if off == 0 {
            return Ok(None);
        }
        if off >= self.table_len {
            return Err(FragError::decode_at(
                format!(
                    "field {id} at offset {off} lies outside its {}-byte table",
                    self.table_len
                ),
                DecodeErrorKind::InvalidVTable,
                self.pos,
            ));
        }
        Ok(Some(self.pos + off))
    }

    /// Follow the `u32` reference stored at `field_pos`
    fn follow(&self, field_pos: usize) -> Result<usize> {
        follow(self.buf, field_pos)
    }

    /// Read a `u8` scalar, falling back to `default` when the field is not stored.
    pub fn field_u8(&self, id: u16, default: u8) -> Result<u8> {
        match self.field_pos(id)? {
            Some(pos) => read_u8(self.buf, pos),
            None => Ok(default),
        }
    }

    pub fn field_table(&self, id: u16) -> Result<Option<Table<'a>>> {
        let Some(pos) = self.field_pos(id)? else {
            return Ok(None);
        };
        let target = self.follow(pos)?;
        Table::at(self.buf, target).map(Some)
    }

    pub fn field_vector(&self, id: u16) -> Result<Option<Vector<'a>>> {
        let Some(pos) = self.field_pos(id)? else {
            return Ok(None);
        };
        let target = self.follow(pos)?;
        Vector::at(self.buf, target).map(Some)
    }
}

fn follow(buf: &[u8], field_pos: usize) -> Result<usize> {
    let rel = read_u32(buf, field_pos)? as usize;
    match field_pos.checked_add(rel) {
        Some(target) if rel != 0 && target < buf.len() => Ok(target),
        _ => Err(FragError::decode_at(
            format!(
                "offset {rel} at 0x{field_pos:X} points outside buffer of {} bytes",
                buf.len()
            ),
            DecodeErrorKind::InvalidOffset,
            field_pos,
        )),
    }
}

/// Vector of table references
#[derive(Clone, Copy, Debug)]
pub struct Vector<'a> {
    buf: &'a [u8],
    pos: usize,
    len: usize,
}

impl<'a> Vector<'a> {
    pub fn at(buf: &'a [u8], pos: usize) -> Result<Self> {
        let len = read_u32(buf, pos)? as usize;
        let end = len
            .checked_mul(OFFSET_SIZE)
            .and_then(|bytes| bytes.checked_add(pos + 4));
        match end {
            Some(end) if end <= buf.len() => Ok(Self { buf, pos, len }),
            _ => Err(FragError::decode_at(
                format!(
                    "vector at 0x{pos:X} declares {len} elements but buffer holds {} bytes",
                    buf.len()
                ),
                DecodeErrorKind::Truncated,
                pos,
            )),
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Table referenced by element `index`; `Ok(None)` for an empty slot.
    pub fn table_at(&self, index: usize) -> Result<Option<Table<'a>>> {
        if index >= self.len {
            return Err(FragError::decode_out_of_range(format!(
                "element {index} requested from vector of {}",
                self.len
            ))
            .with_index(index));
        }
        let elem = self.pos + 4 + index * OFFSET_SIZE;
        if read_u32(self.buf, elem)? == 0 {
            return Ok(None);
        }
        let target = follow(self.buf, elem)?;
        Table::at(self.buf, target).map(Some)
    }
}

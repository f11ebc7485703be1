//! Index Page
//!
//! In-memory builder, encoder, and decoder for index pages. An index page
//! maps packed keys to value positions via four parallel u32 header arrays.

use bytes::{Buf, BufMut};

use crate::error::{Result, StrataError};

use super::{INDEX_ENTRY_SIZE, INDEX_PAGE_HEADER};

/// One decoded index entry: a key and the position of its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Raw key bytes
    pub key: Vec<u8>,
    /// Value page the entry points into
    pub val_page_id: u32,
    /// Slot within that value page
    pub val_offset: u32,
}

/// In-memory builder for one index page
pub struct IndexPage {
    /// Fixed page capacity (the encoded page is exactly this long)
    page_size: usize,
    /// Bytes consumed so far: count field + entry headers + packed keys
    used_size: usize,
    /// Write cursor into the packed key region
    buf_offset: usize,
    key_sizes: Vec<u32>,
    key_offsets: Vec<u32>,
    val_page_ids: Vec<u32>,
    val_offsets: Vec<u32>,
    /// Packed key region, pre-zeroed to capacity so the encoded tail is the
    /// page's zero padding
    buf: Vec<u8>,
}

impl IndexPage {
    /// Create an empty index page with the given capacity
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            used_size: INDEX_PAGE_HEADER,
            buf_offset: 0,
            key_sizes: Vec::new(),
            key_offsets: Vec::new(),
            val_page_ids: Vec::new(),
            val_offsets: Vec::new(),
            buf: vec![0u8; page_size],
        }
    }

    /// Append one index entry.
    ///
    /// Fails with `PageFull` when the key plus its 16-byte header cost would
    /// exceed the page capacity; the caller flushes and retries on a fresh
    /// page.
    pub fn append(&mut self, key: &[u8], val_page_id: u32, val_offset: u32) -> Result<()> {
        let entry_size = key.len() + INDEX_ENTRY_SIZE;
        if entry_size + self.used_size > self.page_size {
            return Err(StrataError::PageFull {
                entry_size,
                used_size: self.used_size,
                page_size: self.page_size,
            });
        }

        self.buf[self.buf_offset..self.buf_offset + key.len()].copy_from_slice(key);
        self.key_sizes.push(key.len() as u32);
        self.key_offsets.push(self.buf_offset as u32);
        self.val_page_ids.push(val_page_id);
        self.val_offsets.push(val_offset);

        self.buf_offset += key.len();
        self.used_size += entry_size;
        Ok(())
    }

    /// Number of entries in the page
    pub fn count(&self) -> u32 {
        self.key_sizes.len() as u32
    }

    /// Bytes consumed so far (count field + headers + packed keys)
    pub fn used_size(&self) -> usize {
        self.used_size
    }

    /// Encode to the on-disk page image: count, the four header arrays, the
    /// packed key region, zero-padded to exactly `page_size` bytes.
    pub fn encode(&self) -> Vec<u8> {
        let count = self.count();
        let base_off = INDEX_PAGE_HEADER + count as usize * INDEX_ENTRY_SIZE;

        let mut out = Vec::with_capacity(self.page_size);
        out.put_u32(count);
        for &v in &self.key_sizes {
            out.put_u32(v);
        }
        for &v in &self.key_offsets {
            out.put_u32(v);
        }
        for &v in &self.val_page_ids {
            out.put_u32(v);
        }
        for &v in &self.val_offsets {
            out.put_u32(v);
        }
        // The packed region is pre-zeroed, so emitting its first
        // page_size - base_off bytes pads the page to capacity.
        out.put_slice(&self.buf[..self.page_size - base_off]);

        debug_assert_eq!(out.len(), self.page_size);
        out
    }

    /// Decode a page image back into its entries.
    ///
    /// Fails with `RangeError` when a header or key range falls outside the
    /// page — a corrupt or mismatched file.
    pub fn decode(page: &[u8]) -> Result<Vec<IndexEntry>> {
        if page.len() < INDEX_PAGE_HEADER {
            return Err(StrataError::RangeError(format!(
                "index page truncated: {} bytes",
                page.len()
            )));
        }

        let mut header = page;
        let count = header.get_u32() as usize;
        let base_off = INDEX_PAGE_HEADER + count * INDEX_ENTRY_SIZE;
        if base_off > page.len() {
            return Err(StrataError::RangeError(format!(
                "index page header of {} entries exceeds page of {} bytes",
                count,
                page.len()
            )));
        }

        let mut key_sizes = Vec::with_capacity(count);
        let mut key_offsets = Vec::with_capacity(count);
        let mut val_page_ids = Vec::with_capacity(count);
        let mut val_offsets = Vec::with_capacity(count);
        for _ in 0..count {
            key_sizes.push(header.get_u32());
        }
        for _ in 0..count {
            key_offsets.push(header.get_u32());
        }
        for _ in 0..count {
            val_page_ids.push(header.get_u32());
        }
        for _ in 0..count {
            val_offsets.push(header.get_u32());
        }

        let packed = &page[base_off..];
        let mut entries = Vec::with_capacity(count);
        for i in 0..count {
            let start = key_offsets[i] as usize;
            let end = start + key_sizes[i] as usize;
            let key = packed.get(start..end).ok_or_else(|| {
                StrataError::RangeError(format!(
                    "index entry {} key range {}..{} exceeds packed region of {} bytes",
                    i,
                    start,
                    end,
                    packed.len()
                ))
            })?;
            entries.push(IndexEntry {
                key: key.to_vec(),
                val_page_id: val_page_ids[i],
                val_offset: val_offsets[i],
            });
        }

        Ok(entries)
    }
}

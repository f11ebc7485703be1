//! Value Page
//!
//! In-memory builder, encoder, and decoder for value pages. Same shape as the
//! index page with u64 header integers and raw value bytes in the packed
//! region.

use bytes::{Buf, BufMut};

use crate::error::{Result, StrataError};

use super::{VALUE_ENTRY_SIZE, VALUE_PAGE_HEADER};

/// In-memory builder for one value page
pub struct ValuePage {
    /// Fixed page capacity (the encoded page is exactly this long)
    page_size: usize,
    /// Bytes consumed so far: count field + entry headers + packed values
    used_size: usize,
    /// Write cursor into the packed value region
    buf_offset: usize,
    val_sizes: Vec<u64>,
    val_offsets: Vec<u64>,
    /// Packed value region, pre-zeroed to capacity so the encoded tail is the
    /// page's zero padding
    buf: Vec<u8>,
}

impl ValuePage {
    /// Create an empty value page with the given capacity
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            used_size: VALUE_PAGE_HEADER,
            buf_offset: 0,
            val_sizes: Vec::new(),
            val_offsets: Vec::new(),
            buf: vec![0u8; page_size],
        }
    }

    /// Append one value; returns the slot it occupies.
    ///
    /// Fails with `PageFull` when the value plus its 16-byte header cost
    /// would exceed the page capacity; the caller flushes and retries on a
    /// fresh page. The returned slot is what an index entry must record as
    /// its `val_offset`.
    pub fn append(&mut self, value: &[u8]) -> Result<u32> {
        let entry_size = value.len() + VALUE_ENTRY_SIZE;
        if entry_size + self.used_size > self.page_size {
            return Err(StrataError::PageFull {
                entry_size,
                used_size: self.used_size,
                page_size: self.page_size,
            });
        }

        let slot = self.val_sizes.len() as u32;
        self.buf[self.buf_offset..self.buf_offset + value.len()].copy_from_slice(value);
        self.val_sizes.push(value.len() as u64);
        self.val_offsets.push(self.buf_offset as u64);

        self.buf_offset += value.len();
        self.used_size += entry_size;
        Ok(slot)
    }

    /// Number of entries in the page
    pub fn count(&self) -> u64 {
        self.val_sizes.len() as u64
    }

    /// Bytes consumed so far (count field + headers + packed values)
    pub fn used_size(&self) -> usize {
        self.used_size
    }

    /// Encode to the on-disk page image: count, both header arrays, the
    /// packed value region, zero-padded to exactly `page_size` bytes.
    pub fn encode(&self) -> Vec<u8> {
        let count = self.count();
        let base_off = VALUE_PAGE_HEADER + count as usize * VALUE_ENTRY_SIZE;

        let mut out = Vec::with_capacity(self.page_size);
        out.put_u64(count);
        for &v in &self.val_sizes {
            out.put_u64(v);
        }
        for &v in &self.val_offsets {
            out.put_u64(v);
        }
        // Pre-zeroed packed region doubles as the page padding.
        out.put_slice(&self.buf[..self.page_size - base_off]);

        debug_assert_eq!(out.len(), self.page_size);
        out
    }

    /// Decode one slot of a page image into its value bytes.
    ///
    /// Fails with `RangeError` when the slot is at or past `count`, or when
    /// the recorded value range falls outside the page.
    pub fn decode_entry(page: &[u8], slot: u32) -> Result<Vec<u8>> {
        if page.len() < VALUE_PAGE_HEADER {
            return Err(StrataError::RangeError(format!(
                "value page truncated: {} bytes",
                page.len()
            )));
        }

        let mut header = page;
        let count = header.get_u64();

        // Guard the header arithmetic before trusting count from disk
        let max_entries = ((page.len() - VALUE_PAGE_HEADER) / VALUE_ENTRY_SIZE) as u64;
        if count > max_entries {
            return Err(StrataError::RangeError(format!(
                "value page header of {} entries exceeds page of {} bytes",
                count,
                page.len()
            )));
        }
        if u64::from(slot) >= count {
            return Err(StrataError::RangeError(format!(
                "slot {} out of range for value page of {} entries",
                slot, count
            )));
        }

        let base_off = VALUE_PAGE_HEADER + count as usize * VALUE_ENTRY_SIZE;

        // Seek the two header arrays directly; only the requested slot is
        // materialized.
        let slot = slot as usize;
        let mut sizes = &page[VALUE_PAGE_HEADER + slot * 8..];
        let val_size = sizes.get_u64() as usize;
        let mut offsets = &page[VALUE_PAGE_HEADER + (count as usize + slot) * 8..];
        let val_offset = offsets.get_u64() as usize;

        let packed = &page[base_off..];
        let value = packed
            .get(val_offset..val_offset + val_size)
            .ok_or_else(|| {
                StrataError::RangeError(format!(
                    "value range {}..{} exceeds packed region of {} bytes",
                    val_offset,
                    val_offset + val_size,
                    packed.len()
                ))
            })?;

        Ok(value.to_vec())
    }
}

//! Tests for the page builders, encoders, and decoders
//!
//! These tests verify:
//! - Append/encode/decode round-trips for both page kinds
//! - Capacity accounting and the exact PageFull boundary
//! - Fixed-size, zero-padded page images
//! - Packed-region reconstruction from header arrays
//! - RangeError on corrupt pages and bad slots
//! - PageWriter's fixed-stride append discipline

use stratakv::page::{
    IndexPage, PageWriter, ValuePage, INDEX_ENTRY_SIZE, INDEX_PAGE_HEADER, VALUE_ENTRY_SIZE,
    VALUE_PAGE_HEADER,
};
use stratakv::StrataError;
use tempfile::TempDir;

// =============================================================================
// IndexPage Tests
// =============================================================================

#[test]
fn test_index_page_roundtrip() {
    let mut page = IndexPage::new(4096);
    page.append(b"alpha", 0, 0).unwrap();
    page.append(b"beta", 0, 1).unwrap();
    page.append(b"gamma", 3, 7).unwrap();

    let encoded = page.encode();
    assert_eq!(encoded.len(), 4096);

    let entries = IndexPage::decode(&encoded).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].key, b"alpha");
    assert_eq!((entries[0].val_page_id, entries[0].val_offset), (0, 0));
    assert_eq!(entries[1].key, b"beta");
    assert_eq!((entries[1].val_page_id, entries[1].val_offset), (0, 1));
    assert_eq!(entries[2].key, b"gamma");
    assert_eq!((entries[2].val_page_id, entries[2].val_offset), (3, 7));
}

#[test]
fn test_index_page_used_size_accounting() {
    let mut page = IndexPage::new(4096);
    assert_eq!(page.used_size(), INDEX_PAGE_HEADER);

    page.append(b"abc", 0, 0).unwrap();
    assert_eq!(page.used_size(), INDEX_PAGE_HEADER + 3 + INDEX_ENTRY_SIZE);

    page.append(b"defgh", 0, 1).unwrap();
    assert_eq!(
        page.used_size(),
        INDEX_PAGE_HEADER + 3 + 5 + 2 * INDEX_ENTRY_SIZE
    );
    assert_eq!(page.count(), 2);
}

#[test]
fn test_index_page_full_at_exact_boundary() {
    // Page sized so a 5-byte key fits exactly: 4 + (16 + 5) = 25
    let page_size = INDEX_PAGE_HEADER + INDEX_ENTRY_SIZE + 5;
    let mut page = IndexPage::new(page_size);

    page.append(b"12345", 0, 0).unwrap();
    assert_eq!(page.used_size(), page_size);

    // Even a zero-length key no longer fits
    let result = page.append(b"", 0, 1);
    assert!(matches!(result, Err(StrataError::PageFull { .. })));
    assert_eq!(page.count(), 1);
}

#[test]
fn test_index_page_rejects_one_byte_over() {
    let page_size = INDEX_PAGE_HEADER + INDEX_ENTRY_SIZE + 5;
    let mut page = IndexPage::new(page_size);

    let result = page.append(b"123456", 0, 0);
    assert!(matches!(result, Err(StrataError::PageFull { .. })));
    assert_eq!(page.count(), 0);
}

#[test]
fn test_index_page_empty_encode() {
    let page = IndexPage::new(128);
    let encoded = page.encode();

    assert_eq!(encoded.len(), 128);
    // count = 0, everything else padding
    assert_eq!(&encoded[..4], &0u32.to_be_bytes());
    assert!(encoded[4..].iter().all(|&b| b == 0));

    let entries = IndexPage::decode(&encoded).unwrap();
    assert!(entries.is_empty());
}

#[test]
fn test_index_page_padding_is_zero() {
    let mut page = IndexPage::new(256);
    page.append(b"k", 1, 2).unwrap();
    let encoded = page.encode();

    let used = INDEX_PAGE_HEADER + INDEX_ENTRY_SIZE + 1;
    assert!(encoded[used..].iter().all(|&b| b == 0));
}

#[test]
fn test_index_decode_count_exceeding_page() {
    let mut page = vec![0u8; 64];
    page[..4].copy_from_slice(&u32::MAX.to_be_bytes());

    let result = IndexPage::decode(&page);
    assert!(matches!(result, Err(StrataError::RangeError(_))));
}

#[test]
fn test_index_decode_truncated_page() {
    let result = IndexPage::decode(&[0u8; 2]);
    assert!(matches!(result, Err(StrataError::RangeError(_))));
}

// =============================================================================
// ValuePage Tests
// =============================================================================

#[test]
fn test_value_page_append_returns_slots_in_order() {
    let mut page = ValuePage::new(4096);
    assert_eq!(page.append(b"one").unwrap(), 0);
    assert_eq!(page.append(b"two").unwrap(), 1);
    assert_eq!(page.append(b"three").unwrap(), 2);
    assert_eq!(page.count(), 3);
}

#[test]
fn test_value_page_roundtrip() {
    let mut page = ValuePage::new(4096);
    page.append(b"first-value").unwrap();
    page.append(b"").unwrap();
    page.append(b"third").unwrap();

    let encoded = page.encode();
    assert_eq!(encoded.len(), 4096);

    assert_eq!(ValuePage::decode_entry(&encoded, 0).unwrap(), b"first-value");
    assert_eq!(ValuePage::decode_entry(&encoded, 1).unwrap(), b"");
    assert_eq!(ValuePage::decode_entry(&encoded, 2).unwrap(), b"third");
}

#[test]
fn test_value_page_full_at_exact_boundary() {
    // Page sized so a 10-byte value fits exactly: 8 + (16 + 10) = 34
    let page_size = VALUE_PAGE_HEADER + VALUE_ENTRY_SIZE + 10;
    let mut page = ValuePage::new(page_size);

    assert_eq!(page.append(b"0123456789").unwrap(), 0);
    assert_eq!(page.used_size(), page_size);

    let result = page.append(b"");
    assert!(matches!(result, Err(StrataError::PageFull { .. })));
    assert_eq!(page.count(), 1);
}

#[test]
fn test_value_page_decode_slot_out_of_range() {
    let mut page = ValuePage::new(256);
    page.append(b"only").unwrap();
    let encoded = page.encode();

    // Slot index equals count — one past the last entry
    let result = ValuePage::decode_entry(&encoded, 1);
    assert!(matches!(result, Err(StrataError::RangeError(_))));
}

#[test]
fn test_value_page_decode_truncated_page() {
    let result = ValuePage::decode_entry(&[0u8; 4], 0);
    assert!(matches!(result, Err(StrataError::RangeError(_))));
}

// =============================================================================
// Packed-Region Reconstruction
// =============================================================================

#[test]
fn test_packed_region_reconstructs_exact_bytes() {
    // Every decoded entry must reproduce exactly the bytes appended at build
    // time, reconstructed via the header size/offset arrays.
    let keys: Vec<Vec<u8>> = (0..100)
        .map(|i| format!("key-{:04}", i).into_bytes())
        .collect();
    let values: Vec<Vec<u8>> = (0..100)
        .map(|i| vec![i as u8; (i % 17) + 1])
        .collect();

    let mut index_page = IndexPage::new(64 * 1024);
    let mut value_page = ValuePage::new(64 * 1024);
    for (i, (key, value)) in keys.iter().zip(&values).enumerate() {
        let slot = value_page.append(value).unwrap();
        assert_eq!(slot, i as u32);
        index_page.append(key, 0, slot).unwrap();
    }

    let index_entries = IndexPage::decode(&index_page.encode()).unwrap();
    let encoded_values = value_page.encode();
    for (i, entry) in index_entries.iter().enumerate() {
        assert_eq!(entry.key, keys[i]);
        let value = ValuePage::decode_entry(&encoded_values, entry.val_offset).unwrap();
        assert_eq!(value, values[i]);
    }
}

// =============================================================================
// PageWriter Tests
// =============================================================================

#[test]
fn test_page_writer_fixed_stride() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pages.idx");

    let mut writer = PageWriter::create(&path, 512).unwrap();
    for i in 0..3u32 {
        let mut page = IndexPage::new(512);
        page.append(format!("key{}", i).as_bytes(), i, 0).unwrap();
        writer.write_page(&page.encode()).unwrap();
    }
    assert_eq!(writer.pages_written(), 3);

    // Page k begins at byte k * capacity
    let data = std::fs::read(&path).unwrap();
    assert_eq!(data.len(), 3 * 512);
    for i in 0..3u32 {
        let start = i as usize * 512;
        let entries = IndexPage::decode(&data[start..start + 512]).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, format!("key{}", i).as_bytes());
        assert_eq!(entries[0].val_page_id, i);
    }
}

#[test]
fn test_page_writer_rejects_wrong_size() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pages.idx");

    let mut writer = PageWriter::create(&path, 512).unwrap();
    let result = writer.write_page(&[0u8; 100]);
    assert!(matches!(result, Err(StrataError::RangeError(_))));
}

#[test]
fn test_page_writer_truncates_previous_build() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pages.idx");

    let mut writer = PageWriter::create(&path, 128).unwrap();
    writer.write_page(&IndexPage::new(128).encode()).unwrap();
    writer.write_page(&IndexPage::new(128).encode()).unwrap();
    writer.sync().unwrap();
    drop(writer);

    let mut writer = PageWriter::create(&path, 128).unwrap();
    writer.write_page(&IndexPage::new(128).encode()).unwrap();
    writer.sync().unwrap();
    drop(writer);

    assert_eq!(std::fs::metadata(&path).unwrap().len(), 128);
}

//! Uniform Block Layout Tests
//!
//! Tests for:
//! - 16-byte size rounding
//! - Running block offsets
//! - Total buffer size

use glint::gpu::uniform::{BLOCK_ALIGN, block_layout};

// ============================================================================
// Worked Example
// ============================================================================

#[test]
fn blocks_of_12_and_64_bytes_pack_to_80() {
    let (ranges, total) = block_layout(&[("matrices", 12), ("lights", 64)]);

    assert_eq!(ranges.len(), 2);

    let (name0, block0) = &ranges[0];
    assert_eq!(name0, "matrices");
    assert_eq!(block0.offset, 0);
    assert_eq!(block0.size, 16, "12 bytes must round up to 16");

    let (name1, block1) = &ranges[1];
    assert_eq!(name1, "lights");
    assert_eq!(block1.offset, 16);
    assert_eq!(block1.size, 64, "64 bytes is already aligned");

    assert_eq!(total, 80);
}

// ============================================================================
// Rounding
// ============================================================================

#[test]
fn sizes_round_up_to_the_next_multiple_of_16() {
    let cases = [(1, 16), (15, 16), (16, 16), (17, 32), (100, 112), (256, 256)];

    for (input, expected) in cases {
        let (ranges, total) = block_layout(&[("block", input)]);
        assert_eq!(
            ranges[0].1.size, expected,
            "Size {input} should round to {expected}"
        );
        assert_eq!(total, expected);
    }
}

#[test]
fn zero_sized_block_stays_zero() {
    let (ranges, total) = block_layout(&[("empty", 0), ("data", 4)]);
    assert_eq!(ranges[0].1.size, 0);
    assert_eq!(ranges[1].1.offset, 0);
    assert_eq!(total, 16);
}

// ============================================================================
// Offsets & Totals
// ============================================================================

#[test]
fn offsets_are_always_aligned_and_total_is_the_sum() {
    let blocks = [("a", 3), ("b", 40), ("c", 64), ("d", 1), ("e", 130)];
    let (ranges, total) = block_layout(&blocks);

    let mut expected_offset = 0;
    for (i, (_, range)) in ranges.iter().enumerate() {
        assert_eq!(
            range.offset % BLOCK_ALIGN,
            0,
            "Block {i} offset {} is not 16-byte aligned",
            range.offset
        );
        assert_eq!(range.offset, expected_offset, "Block {i} offset mismatch");
        expected_offset += range.size;
    }

    assert_eq!(total, expected_offset);
    // 3->16, 40->48, 64->64, 1->16, 130->144
    assert_eq!(total, 16 + 48 + 64 + 16 + 144);
}

#[test]
fn empty_layout_is_empty() {
    let (ranges, total) = block_layout(&[]);
    assert!(ranges.is_empty());
    assert_eq!(total, 0);
}

#[test]
fn declaration_order_is_preserved() {
    let (ranges, _) = block_layout(&[("z", 16), ("a", 16), ("m", 16)]);
    let names: Vec<&str> = ranges.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["z", "a", "m"]);
}

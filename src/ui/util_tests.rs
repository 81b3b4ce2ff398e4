#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(0)), "₹0.00");
    assert_eq!(format_amount(dec!(12.5)), "₹12.50");
    assert_eq!(format_amount(dec!(650)), "₹650.00");
}

#[test]
fn test_format_amount_thousands() {
    assert_eq!(format_amount(dec!(1234.56)), "₹1,234.56");
    assert_eq!(format_amount(dec!(1234567.89)), "₹1,234,567.89");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.99)), "-₹42.99");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string_unchanged() {
    assert_eq!(truncate("Petrol", 10), "Petrol");
    assert_eq!(truncate("Petrol", 6), "Petrol");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Electricity Bill", 8), "Electri…");
    assert_eq!(truncate("Electricity Bill", 8).chars().count(), 8);
}

#[test]
fn test_truncate_zero_and_multibyte() {
    assert_eq!(truncate("anything", 0), "");
    assert_eq!(truncate("₹₹₹₹₹", 3), "₹₹…");
}

// ── progress_bar ──────────────────────────────────────────────

#[test]
fn test_progress_bar_bounds() {
    assert_eq!(progress_bar(0.0, 4), "[░░░░]");
    assert_eq!(progress_bar(1.0, 4), "[████]");
    assert_eq!(progress_bar(0.5, 4), "[██░░]");
}

#[test]
fn test_progress_bar_clamps_out_of_range() {
    assert_eq!(progress_bar(2.0, 4), "[████]");
    assert_eq!(progress_bar(-1.0, 4), "[░░░░]");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_and_scrolls() {
    let (mut index, mut scroll) = (0, 0);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (1, 0));
    scroll_down(&mut index, &mut scroll, 10, 3);
    scroll_down(&mut index, &mut scroll, 10, 3);
    // Cursor moved past the page, scroll follows.
    assert_eq!((index, scroll), (3, 1));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 3, 5);
    assert_eq!(index, 2);
}

#[test]
fn test_scroll_up_and_jumps() {
    let (mut index, mut scroll) = (5, 4);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (4, 4));
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (3, 3));

    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));

    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
}

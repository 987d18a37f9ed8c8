use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_single_line() {
    let source = "@kernel void k() {}";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_count(), 1);
    assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
    assert_eq!(table.offset_to_line_col(source, 8), (1, 9));
}

#[test]
fn test_multi_line() {
    let source = "a\nbb\nccc\n";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_count(), 4);
    assert_eq!(table.line_from_offset(0), 1);
    assert_eq!(table.line_from_offset(1), 1); // the newline itself
    assert_eq!(table.line_from_offset(2), 2);
    assert_eq!(table.line_from_offset(5), 3);
    assert_eq!(table.offset_to_line_col(source, 7), (3, 3));
}

#[test]
fn test_column_counts_chars() {
    let source = "// é\nx";
    let table = LineOffsetTable::build(source);
    // 'é' is two bytes; the newline sits at byte 5
    assert_eq!(table.offset_to_line_col(source, 5), (1, 5));
    assert_eq!(table.offset_to_line_col(source, 6), (2, 1));
}

#[test]
fn test_offset_past_end_clamps() {
    let source = "abc";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.offset_to_line_col(source, 100), (1, 4));
}

#[test]
fn test_line_start_offset() {
    let table = LineOffsetTable::build("a\nb\n");
    assert_eq!(table.line_start_offset(0), None);
    assert_eq!(table.line_start_offset(1), Some(0));
    assert_eq!(table.line_start_offset(2), Some(2));
    assert_eq!(table.line_start_offset(4), None);
}

#[test]
fn test_line_text() {
    let source = "first\r\nsecond\nthird";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_text(source, 1), Some("first"));
    assert_eq!(table.line_text(source, 2), Some("second"));
    assert_eq!(table.line_text(source, 3), Some("third"));
    assert_eq!(table.line_text(source, 4), None);
}

#[test]
fn test_span_start() {
    let source = "x\n  for (;;) {}";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.span_start(source, Span::new(4, 15)), (2, 3));
}

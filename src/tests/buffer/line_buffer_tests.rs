//! Tests for LineBuffer filling and terminator stripping.

use std::io::{BufReader, Cursor};

use crate::buffer::LineBuffer;

fn fill(buf: &mut LineBuffer, reader: &mut impl std::io::BufRead) -> Vec<u8> {
    buf.fill_from(reader).expect("fill");
    buf.strip_terminator();
    buf.as_bytes().to_vec()
}

#[test]
fn fill_stops_after_newline_and_keeps_rest_in_reader() {
    let mut reader = Cursor::new(b"first\nsecond\n".to_vec());
    let mut buf = LineBuffer::with_capacity(1024);

    assert_eq!(buf.fill_from(&mut reader).unwrap(), 6);
    assert_eq!(buf.as_bytes(), b"first\n");
    assert_eq!(buf.fill_from(&mut reader).unwrap(), 7);
    assert_eq!(buf.as_bytes(), b"second\n");
    assert_eq!(buf.fill_from(&mut reader).unwrap(), 0);
    assert!(buf.is_empty());
}

#[test]
fn strip_cuts_at_first_cr_or_lf() {
    let mut buf = LineBuffer::with_capacity(64);

    for (input, expected) in [
        ("plain\n", "plain"),
        ("dos\r\n", "dos"),
        ("mac\r", "mac"),
        ("a\rb\n", "a"),
        ("no terminator", "no terminator"),
        ("\n", ""),
    ] {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        assert_eq!(fill(&mut buf, &mut reader), expected.as_bytes(), "input {input:?}");
    }
}

#[test]
fn long_line_is_cut_at_capacity_minus_one() {
    let mut reader = Cursor::new(b"abcdefghij\n".to_vec());
    let mut buf = LineBuffer::with_capacity(8);

    assert_eq!(buf.max_line_len(), 7);
    assert_eq!(fill(&mut buf, &mut reader), b"abcdefg");
    assert_eq!(fill(&mut buf, &mut reader), b"hij");
}

#[test]
fn line_of_exactly_max_len_fits() {
    let mut buf = LineBuffer::with_capacity(1024);
    let mut line = vec![b'x'; 1022];
    line.push(b'\n');
    let mut reader = Cursor::new(line);

    assert_eq!(buf.fill_from(&mut reader).unwrap(), 1023);
    buf.strip_terminator();
    assert_eq!(buf.len(), 1022);
}

#[test]
fn fill_across_small_reader_chunks() {
    // A 3-byte BufReader forces the newline search over several refills.
    let inner = Cursor::new(b"split across chunks\nnext\n".to_vec());
    let mut reader = BufReader::with_capacity(3, inner);
    let mut buf = LineBuffer::with_capacity(1024);

    assert_eq!(fill(&mut buf, &mut reader), b"split across chunks");
    assert_eq!(fill(&mut buf, &mut reader), b"next");
}

#[test]
fn refill_does_not_keep_stale_bytes() {
    let mut reader = Cursor::new(b"a much longer first line\nab\n".to_vec());
    let mut buf = LineBuffer::with_capacity(1024);

    assert_eq!(fill(&mut buf, &mut reader), b"a much longer first line");
    assert_eq!(fill(&mut buf, &mut reader), b"ab");
    assert_eq!(buf.line(), "ab");
}

#[test]
fn line_view_conversions() {
    let mut buf = LineBuffer::with_capacity(16);
    let mut reader = Cursor::new(b"caf\xc3\xa9\n".to_vec());
    buf.fill_from(&mut reader).unwrap();
    buf.strip_terminator();

    let line = buf.line();
    assert_eq!(line.to_str().unwrap(), "café");
    assert_eq!(line.len(), 5);
    assert_eq!(line.to_vec(), "café".as_bytes());

    let mut reader = Cursor::new(b"bad\xff\n".to_vec());
    buf.fill_from(&mut reader).unwrap();
    buf.strip_terminator();
    let line = buf.line();
    assert!(line.to_str().is_err());
    assert_eq!(line.to_string_lossy(), "bad\u{fffd}");
}

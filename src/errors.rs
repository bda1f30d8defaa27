//! Contains most common errors that may be encountered in decoding a JPEG image
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

use crate::marker::Marker;

/// Common decode errors
#[allow(clippy::module_name_repetitions)]
pub enum DecodeErrors {
    /// The stream ended in the middle of a read
    UnexpectedEof,
    /// A 16 bit value read where a marker was expected is not one we recognize
    UnknownMarker(u16),
    /// The first marker in the stream was not SOI
    MissingSoi,
    /// More than one SOF0 segment in the stream
    DuplicateFrame,
    /// Frame parameters outside 8 bit baseline sequential with 1 or 3 channels
    UnsupportedFrame(String),
    /// Scan parameters outside a single full spectral selection
    UnsupportedScan(String),
    /// Problems with a Huffman table, or a bitstream that walks off its code tree
    MalformedHuffman(String),
    /// Problems inside the entropy coded segment
    MalformedScan(String),
    /// More quantization tables than we are willing to retain
    TooManyQuantTables(usize),
    /// More Huffman tables than we are willing to retain
    TooManyHuffmanTables(usize),
    /// A marker other than EOI followed the scan
    TrailingData(Marker),
}

impl Display for DecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self {
            Self::UnexpectedEof => write!(f, "The stream ended while more data was expected"),
            Self::UnknownMarker(code) => {
                write!(f, "Got unknown marker 0x{:04X}", code)
            }
            Self::MissingSoi => write!(f, "No SOI marker at the beginning of the stream"),
            Self::DuplicateFrame => write!(f, "Multiple SOF0 segments, cannot continue"),
            Self::UnsupportedFrame(ref reason) => {
                write!(f, "Error parsing SOF segment. Reason:{}", reason)
            }
            Self::UnsupportedScan(ref reason) => {
                write!(f, "Error parsing SOS segment. Reason:{}", reason)
            }
            Self::MalformedHuffman(ref reason) => {
                write!(f, "Error decoding huffman values. Reason:{}", reason)
            }
            Self::MalformedScan(ref reason) => {
                write!(f, "Error decoding entropy coded data. Reason:{}", reason)
            }
            Self::TooManyQuantTables(count) => {
                write!(f, "Too many quantization tables in the stream, found {}", count)
            }
            Self::TooManyHuffmanTables(count) => {
                write!(f, "Too many huffman tables in the stream, found {}", count)
            }
            Self::TrailingData(marker) => {
                write!(f, "Expected EOI after the scan, found marker {:?}", marker)
            }
        }
    }
}

impl Debug for DecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Error for DecodeErrors {}

//! Constants shared by the decoder stages

/// Number of coefficients in a DCT block
pub const DCT_BLOCK: usize = 64;

/// Largest per-axis sampling factor a frame may declare
pub const MAX_SAMPLE_FACTOR: usize = 4;

/// Widest MCU footprint we may need scratch space for, in samples
pub const MCU_SCRATCH: usize = MAX_SAMPLE_FACTOR * 8;

/// Quantization tables retained before we refuse the stream
pub const MAX_QUANT_TABLES: usize = 255;

/// Huffman tables retained before we refuse the stream, 255 DC plus 255 AC
pub const MAX_HUFFMAN_TABLES: usize = 510;

/// Undo run length encoding of coefficients by placing them in natural order
///
/// `natural[UN_ZIGZAG[i]] = wire[i]` for a block transmitted in zig-zag order.
#[rustfmt::skip]
pub const UN_ZIGZAG: [usize; 64] = [
    0,  1,  8,  16, 9,  2,  3, 10,
    17, 24, 32, 25, 18, 11, 4,  5,
    12, 19, 26, 33, 40, 48, 41, 34,
    27, 20, 13, 6,  7,  14, 21, 28,
    35, 42, 49, 56, 57, 50, 43, 36,
    29, 22, 15, 23, 30, 37, 44, 51,
    58, 59, 52, 45, 38, 31, 39, 46,
    53, 60, 61, 54, 47, 55, 62, 63,
];

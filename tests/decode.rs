//! End to end decodes of synthetic baseline streams
//!
//! Every stream is assembled in memory; the entropy coded bytes are
//! written out by hand from the code books the test defines, so expected
//! pixel values can be derived on paper.

use baseline_jpeg::{Decoder, Pixel};

mod common;

use common::{comment, dht, dqt, dqt_16bit, jpeg, segment, sof0, sos};

fn gray(v: u8) -> Pixel {
    Pixel { r: v, g: v, b: v }
}

/// Tables used by the single pixel tests: DC code "0" -> magnitude length
/// 8, AC code "0" -> EOB.
fn single_pixel_stream(entropy: &[u8]) -> Vec<u8> {
    jpeg(&[
        &dqt(0, 8),
        &sof0(1, 1, &[[1, 0x11, 0]]),
        &dht(0, 0, &[1], &[8]),
        &dht(1, 0, &[1], &[0]),
        &sos(&[[1, 0x00]]),
        entropy,
    ])
}

#[test]
fn black_single_pixel() {
    // DC delta bits 01111111 = -128, dequantized by 8 to -1024, the IDCT
    // spreads that to -128 flat and the level shift lands on 0
    let data = single_pixel_stream(&[0x3F, 0x80]);
    let image = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!((image.width(), image.height()), (1, 1));
    assert_eq!(image.get_pixel(0, 0), gray(0));
}

#[test]
fn white_single_pixel() {
    // DC delta +128 maps to a nominal sample of 256, clamped down to 255
    let data = single_pixel_stream(&[0x40, 0x00]);
    let image = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!(image.get_pixel(0, 0), gray(255));
}

#[test]
fn mid_gray_single_pixel() {
    // a zero DC delta decodes to the level shift value alone
    let data = jpeg(&[
        &dqt(0, 8),
        &sof0(1, 1, &[[1, 0x11, 0]]),
        &dht(0, 0, &[1], &[0]),
        &dht(1, 0, &[1], &[0]),
        &sos(&[[1, 0x00]]),
        &[0x00],
    ]);
    let image = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!(image.get_pixel(0, 0), gray(128));
}

#[test]
fn sixteen_bit_quantization_table() {
    // same stream as the black pixel, quantizer declared with precision 1
    let data = jpeg(&[
        &dqt_16bit(0, 8),
        &sof0(1, 1, &[[1, 0x11, 0]]),
        &dht(0, 0, &[1], &[8]),
        &dht(1, 0, &[1], &[0]),
        &sos(&[[1, 0x00]]),
        &[0x3F, 0x80],
    ]);
    let image = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!(image.get_pixel(0, 0), gray(0));
}

#[test]
fn solid_gray_three_channels() {
    // Y, Cb, Cr all decode to 128; neutral chroma passes luma through
    let data = jpeg(&[
        &dqt(0, 1),
        &sof0(8, 8, &[[1, 0x11, 0], [2, 0x11, 0], [3, 0x11, 0]]),
        &dht(0, 0, &[1], &[0]),
        &dht(1, 0, &[1], &[0]),
        &sos(&[[1, 0x00], [2, 0x00], [3, 0x00]]),
        &[0x00],
    ]);
    let image = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!((image.width(), image.height()), (8, 8));

    for row in 0..8 {
        for col in 0..8 {
            assert_eq!(image.get_pixel(row, col), gray(128));
        }
    }
}

#[test]
fn dc_prediction_chains_across_mcus() {
    // 16x16 grayscale, four MCUs in raster order with DC deltas
    // +16, +16, -16, -16; the prediction chain makes the decoded
    // samples 144, 160, 144, 128
    let data = jpeg(&[
        &dqt(0, 8),
        &sof0(16, 16, &[[1, 0x11, 0]]),
        &dht(0, 0, &[1, 1], &[0, 5]),
        &dht(1, 0, &[1], &[0]),
        &sos(&[[1, 0x00]]),
        &[0xA0, 0xA0, 0x9E, 0x9E],
    ]);
    let image = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!(image.get_pixel(0, 0), gray(144));
    assert_eq!(image.get_pixel(0, 8), gray(160));
    assert_eq!(image.get_pixel(8, 0), gray(144));
    assert_eq!(image.get_pixel(8, 8), gray(128));
    assert_eq!(image.get_pixel(15, 15), gray(128));
}

#[test]
fn chroma_subsampled_420() {
    // one 16x16 MCU: Y sampled 2x2, Cb/Cr 1x1. The four Y blocks carry
    // deltas 0, +16, -16, 0 so only the top right block brightens; Cb
    // decodes to 144 across the MCU, Cr stays neutral.
    let data = jpeg(&[
        &dqt(0, 8),
        &sof0(16, 16, &[[1, 0x22, 0], [2, 0x11, 0], [3, 0x11, 0]]),
        &dht(0, 0, &[1, 1], &[0, 5]),
        &dht(1, 0, &[1], &[0]),
        &sos(&[[1, 0x00], [2, 0x00], [3, 0x00]]),
        &[0x28, 0x27, 0x8A, 0x00],
    ]);
    let image = Decoder::new().decode_buffer(&data).unwrap();

    // Y 128, Cb 144, Cr 128 by the JFIF formulas
    let muted = Pixel {
        r: 128,
        g: 122,
        b: 156,
    };
    // Y 144, same chroma
    let brighter = Pixel {
        r: 144,
        g: 138,
        b: 172,
    };

    assert_eq!(image.get_pixel(0, 0), muted);
    assert_eq!(image.get_pixel(7, 7), muted);
    assert_eq!(image.get_pixel(0, 8), brighter);
    assert_eq!(image.get_pixel(7, 15), brighter);
    assert_eq!(image.get_pixel(8, 0), muted);
    assert_eq!(image.get_pixel(15, 15), muted);
}

#[test]
fn stuffed_bytes_inside_entropy_data() {
    // the first entropy byte decodes to 0xFF, so the encoder must stuff a
    // zero after it; DC code "1" -> length 8, delta 255, quantizer 4
    let data = jpeg(&[
        &dqt(0, 4),
        &sof0(1, 1, &[[1, 0x11, 0]]),
        &dht(0, 0, &[2], &[0, 8]),
        &dht(1, 0, &[1], &[0]),
        &sos(&[[1, 0x00]]),
        &[0xFF, 0x00, 0x80],
    ]);
    let image = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!(image.get_pixel(0, 0), gray(255));
}

#[test]
fn comment_is_reported() {
    let data = jpeg(&[
        &comment("hello"),
        &dqt(0, 8),
        &sof0(1, 1, &[[1, 0x11, 0]]),
        &dht(0, 0, &[1], &[0]),
        &dht(1, 0, &[1], &[0]),
        &sos(&[[1, 0x00]]),
        &[0x00],
    ]);
    let image = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!(image.get_comment(), "hello");
}

#[test]
fn last_comment_wins() {
    let data = jpeg(&[
        &comment("hello"),
        &comment("world"),
        &dqt(0, 8),
        &sof0(1, 1, &[[1, 0x11, 0]]),
        &dht(0, 0, &[1], &[0]),
        &dht(1, 0, &[1], &[0]),
        &sos(&[[1, 0x00]]),
        &[0x00],
    ]);
    let image = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!(image.get_comment(), "world");
}

#[test]
fn application_segments_are_skipped() {
    // an APP0 blob and an APP15 blob, both ignored wholesale
    let data = jpeg(&[
        &segment(0xFFE0, b"JFIF\x00\x01\x02\x00\x00\x01\x00\x01\x00\x00"),
        &segment(0xFFEF, &[0xDE, 0xAD, 0xBE, 0xEF]),
        &dqt(0, 8),
        &sof0(1, 1, &[[1, 0x11, 0]]),
        &dht(0, 0, &[1], &[0]),
        &dht(1, 0, &[1], &[0]),
        &sos(&[[1, 0x00]]),
        &[0x00],
    ]);
    let image = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!(image.get_pixel(0, 0), gray(128));
}

#[test]
fn tables_may_arrive_after_the_frame_header() {
    // DQT and DHT between SOF0 and SOS, resolution happens at scan time
    let data = jpeg(&[
        &sof0(1, 1, &[[1, 0x11, 0]]),
        &dqt(0, 8),
        &dht(0, 0, &[1], &[0]),
        &dht(1, 0, &[1], &[0]),
        &sos(&[[1, 0x00]]),
        &[0x00],
    ]);
    let image = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!(image.get_pixel(0, 0), gray(128));
}

#[test]
fn image_dimensions_not_multiples_of_the_mcu() {
    // a 3x5 image still needs a whole 8x8 MCU, the overhang is dropped
    let data = jpeg(&[
        &dqt(0, 8),
        &sof0(3, 5, &[[1, 0x11, 0]]),
        &dht(0, 0, &[1], &[0]),
        &dht(1, 0, &[1], &[0]),
        &sos(&[[1, 0x00]]),
        &[0x00],
    ]);
    let image = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!((image.width(), image.height()), (3, 5));

    for row in 0..5 {
        for col in 0..3 {
            assert_eq!(image.get_pixel(row, col), gray(128));
        }
    }
}

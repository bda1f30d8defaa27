//! Implements routines to decode the entropy coded scan
//!
//! The scan walks the MCU grid in raster order. Each MCU holds, per
//! channel, `horizontal_sample * vertical_sample` blocks of 64
//! coefficients; every block goes through huffman decode, dequantization,
//! the inverse DCT and a level shift before the channels are recombined
//! into RGB pixels.

use std::io::Read;

use crate::bitstream::BitReader;
use crate::color_convert::ycbcr_to_rgb;
use crate::components::Channel;
use crate::decoder::{Decoder, QuantizationTable};
use crate::errors::DecodeErrors;
use crate::huffman::HuffmanTree;
use crate::idct::Idct;
use crate::image::{Image, Pixel};
use crate::misc::{DCT_BLOCK, MCU_SCRATCH, UN_ZIGZAG};

/// Per channel sample grid covering one MCU footprint
type ScratchGrid = [[u8; MCU_SCRATCH]; MCU_SCRATCH];

impl Decoder {
    /// Decode every MCU of the scan and emit pixels into `image`
    pub(crate) fn decode_scan<R>(
        &self, reader: &mut BitReader<R>, image: &mut Image,
    ) -> Result<(), DecodeErrors>
    where
        R: Read,
    {
        // resolve every table up front so a missing one fails before we
        // touch entropy coded data
        let mut quants = Vec::with_capacity(self.channels.len());
        let mut dc_trees = Vec::with_capacity(self.channels.len());
        let mut ac_trees = Vec::with_capacity(self.channels.len());

        for channel in &self.channels {
            quants.push(self.quantization_table_for(channel)?);
            dc_trees.push(self.huffman_tree_for(channel, 0)?);
            ac_trees.push(self.huffman_tree_for(channel, 1)?);
        }

        let h_max = self
            .channels
            .iter()
            .map(|c| c.horizontal_sample)
            .max()
            .unwrap_or(1);
        let v_max = self
            .channels
            .iter()
            .map(|c| c.vertical_sample)
            .max()
            .unwrap_or(1);

        let mcu_width = h_max * 8;
        let mcu_height = v_max * 8;

        let (width, height) = (image.width(), image.height());

        let mcus_per_row = (width + mcu_width - 1) / mcu_width;
        let mcus_per_col = (height + mcu_height - 1) / mcu_height;

        info!(
            "Scan: {}x{} MCUs of {}x{} pixels",
            mcus_per_row, mcus_per_col, mcu_width, mcu_height
        );

        let idct = Idct::new();

        // DC predictors reset once per scan, restart markers are not
        // supported
        let mut predictions = vec![0_i32; self.channels.len()];
        let mut scratch: Vec<ScratchGrid> =
            vec![[[0_u8; MCU_SCRATCH]; MCU_SCRATCH]; self.channels.len()];

        reader.set_entropy_mode(true);

        for mcu_row in 0..mcus_per_col {
            for mcu_col in 0..mcus_per_row {
                for (pos, channel) in self.channels.iter().enumerate() {
                    // blocks cover the channel's share of the MCU in raster
                    // order, rows of blocks outer
                    for block_row in 0..channel.vertical_sample {
                        for block_col in 0..channel.horizontal_sample {
                            let block = decode_block(
                                reader,
                                dc_trees[pos],
                                ac_trees[pos],
                                quants[pos],
                                &mut predictions[pos],
                                &idct,
                            )?;

                            for (y, line) in block.iter().enumerate() {
                                let dest = &mut scratch[pos][block_row * 8 + y];

                                dest[block_col * 8..block_col * 8 + 8].copy_from_slice(line);
                            }
                        }
                    }
                }

                let out_y = mcu_row * mcu_height;
                let out_x = mcu_col * mcu_width;

                // emit whatever part of the MCU footprint lies inside the
                // image, edge MCUs overhang
                for py in 0..mcu_height {
                    let row = out_y + py;

                    if row >= height {
                        break;
                    }

                    for px in 0..mcu_width {
                        let col = out_x + px;

                        if col >= width {
                            break;
                        }

                        let pixel = if self.channels.len() == 1 {
                            let luma = scratch[0][py][px];

                            Pixel {
                                r: luma,
                                g: luma,
                                b: luma,
                            }
                        } else {
                            let y = subsampled(&scratch[0], &self.channels[0], py, px, h_max, v_max);
                            let cb = subsampled(&scratch[1], &self.channels[1], py, px, h_max, v_max);
                            let cr = subsampled(&scratch[2], &self.channels[2], py, px, h_max, v_max);

                            ycbcr_to_rgb(y, cb, cr)
                        };

                        image.set_pixel(row, col, pixel);
                    }
                }
            }
        }

        reader.align_to_byte();
        reader.set_entropy_mode(false);

        Ok(())
    }
}

/// Read one channel sample under the MCU footprint
///
/// Channels sampled below the maximum fill only part of their scratch
/// grid, nearest neighbor upsampling scales the coordinates back down.
fn subsampled(
    scratch: &ScratchGrid, channel: &Channel, py: usize, px: usize, h_max: usize, v_max: usize,
) -> u8 {
    scratch[py * channel.vertical_sample / v_max][px * channel.horizontal_sample / h_max]
}

/// Decode a single 8x8 block
///
/// Huffman decodes the DC delta and the AC run length pairs into a
/// zig-zag ordered buffer, dequantizes, reorders, applies the inverse DCT
/// and level shifts the samples into 0..=255.
fn decode_block<R>(
    reader: &mut BitReader<R>, dc_tree: &HuffmanTree, ac_tree: &HuffmanTree,
    quant: &QuantizationTable, prediction: &mut i32, idct: &Idct,
) -> Result<[[u8; 8]; 8], DecodeErrors>
where
    R: Read,
{
    let mut zigzag = [0_i32; DCT_BLOCK];

    // DC: the huffman symbol is the magnitude length of the delta against
    // the previous block of this channel
    let dc_length = reader.read_huffman_symbol(dc_tree)?;

    *prediction += reader.read_magnitude(dc_length)?;
    zigzag[0] = *prediction;

    // AC: run length coded with an EOB terminator
    let mut pos = 1;

    while pos < DCT_BLOCK {
        let symbol = reader.read_huffman_symbol(ac_tree)?;

        if symbol == 0x00 {
            // EOB, the rest of the block stays zero
            break;
        }

        // high nibble: zero run, low nibble: magnitude length of the
        // coefficient that follows. 0xF0 encodes sixteen zeros.
        pos += usize::from(symbol >> 4);

        // a run landing exactly on the last position is fine, only a
        // write past it is an error
        if pos >= DCT_BLOCK {
            return Err(DecodeErrors::MalformedScan(
                "AC coefficients run past the end of the block".to_string(),
            ));
        }

        zigzag[pos] = reader.read_magnitude(symbol & 0x0f)?;
        pos += 1;
    }

    // dequantize in zig-zag order, both sides of the multiply use the wire
    // order, then scatter into natural order for the transform
    let mut coefficients = [0.0_f64; DCT_BLOCK];

    for i in 0..DCT_BLOCK {
        coefficients[UN_ZIGZAG[i]] = f64::from(zigzag[i] * i32::from(quant.values[i]));
    }

    idct.inverse(&mut coefficients);

    let mut out = [[0_u8; 8]; 8];

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    for y in 0..8 {
        for x in 0..8 {
            // level shift back into unsigned samples
            out[y][x] = (128.0 + coefficients[y * 8 + x]).round().clamp(0.0, 255.0) as u8;
        }
    }

    Ok(out)
}

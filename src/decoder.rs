//! Main decoder logic.
#![allow(clippy::doc_markdown)]

use std::io::{Cursor, Read};

use crate::bitstream::BitReader;
use crate::components::Channel;
use crate::errors::DecodeErrors;
use crate::headers::{
    parse_app, parse_com, parse_dqt, parse_huffman, parse_sos, parse_start_of_frame,
};
use crate::huffman::{HuffmanTable, HuffmanTree};
use crate::image::Image;
use crate::marker::Marker;
use crate::misc::DCT_BLOCK;

/// One quantization table from a DQT segment
///
/// Values are kept in zig-zag order, exactly as read, since the
/// coefficients they multiply arrive in the same order. 8 bit tables are
/// widened so both precisions share a representation.
pub(crate) struct QuantizationTable
{
    /// Identifier the frame header refers to
    pub id:     u8,
    pub values: [u16; DCT_BLOCK],
}

/// A Decoder instance
///
/// Accumulates tables and frame metadata while the marker loop runs, then
/// drives the scan. One instance decodes one image; create a fresh decoder
/// per stream.
pub struct Decoder
{
    /// Quantization tables in definition order
    pub(crate) quant_tables:   Vec<QuantizationTable>,
    /// Huffman tables in definition order
    pub(crate) huffman_tables: Vec<HuffmanTable>,
    /// Channels from the frame header, 1 or 3 of them
    pub(crate) channels:       Vec<Channel>,
    /// Whether a SOF0 segment was seen already
    pub(crate) have_sof0:      bool,
}

impl Decoder
{
    /// Create a new Decoder instance
    #[must_use]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Decoder
    {
        Decoder {
            quant_tables: vec![],
            huffman_tables: vec![],
            channels: vec![],
            have_sof0: false,
        }
    }

    /// Decode a buffer already in memory
    ///
    /// The buffer should hold a complete baseline JPEG stream, perhaps
    /// created by `std::fs::read()`.
    ///
    /// # Errors
    /// See [`DecodeErrors`] for an explanation
    pub fn decode_buffer(&mut self, buf: &[u8]) -> Result<Image, DecodeErrors>
    {
        self.decode_stream(Cursor::new(buf.to_vec()))
    }

    /// Decode a JPEG image from a sequential byte stream
    ///
    /// Reads markers until EOI, accumulating tables and frame metadata,
    /// and runs the entropy coded scan when SOS arrives.
    ///
    /// # Errors
    /// See [`DecodeErrors`] for an explanation
    pub fn decode_stream<R>(&mut self, source: R) -> Result<Image, DecodeErrors>
    where
        R: Read,
    {
        let mut reader = BitReader::new(source);
        let mut image = Image::new();

        if reader.read_marker()? != Marker::SOI
        {
            return Err(DecodeErrors::MissingSoi);
        }

        loop
        {
            let marker = reader.read_marker()?;

            match marker
            {
                Marker::EOI =>
                {
                    break;
                }
                Marker::COM =>
                {
                    parse_com(&mut reader, &mut image)?;
                }
                Marker::APPn =>
                {
                    parse_app(&mut reader)?;
                }
                Marker::DQT =>
                {
                    parse_dqt(self, &mut reader)?;
                }
                Marker::DHT =>
                {
                    parse_huffman(self, &mut reader)?;
                }
                Marker::SOF0 =>
                {
                    if self.have_sof0
                    {
                        return Err(DecodeErrors::DuplicateFrame);
                    }

                    parse_start_of_frame(&mut reader, self, &mut image)?;
                }
                Marker::SOS =>
                {
                    if !self.have_sof0
                    {
                        return Err(DecodeErrors::MalformedScan(
                            "Start of scan before a frame header".to_string(),
                        ));
                    }

                    parse_sos(&mut reader, self)?;

                    self.decode_scan(&mut reader, &mut image)?;

                    // the entropy coded data must run straight into EOI,
                    // we do not support anything between the two
                    let trailing = reader.read_marker()?;

                    if trailing != Marker::EOI
                    {
                        return Err(DecodeErrors::TrailingData(trailing));
                    }

                    break;
                }
                Marker::SOI =>
                {
                    warn!("Extra SOI marker in the stream, ignoring it");
                }
            }
        }

        debug!("Finished decoding image");

        Ok(image)
    }

    /// Find the quantization table feeding `channel`
    ///
    /// Tables are searched in definition order, the first id match wins.
    pub(crate) fn quantization_table_for(
        &self, channel: &Channel,
    ) -> Result<&QuantizationTable, DecodeErrors>
    {
        self.quant_tables
            .iter()
            .find(|table| table.id == channel.quantization_table_id)
            .ok_or_else(|| {
                DecodeErrors::MalformedScan(format!(
                    "No quantization table with id {} for channel {}",
                    channel.quantization_table_id, channel.id
                ))
            })
    }

    /// Find the huffman tree of `class` (0 = DC, 1 = AC) assigned to
    /// `channel` by the scan header
    pub(crate) fn huffman_tree_for(
        &self, channel: &Channel, class: u8,
    ) -> Result<&HuffmanTree, DecodeErrors>
    {
        let slot = if class == 0
        {
            channel.dc_huff_table
        }
        else
        {
            channel.ac_huff_table
        };

        let slot = slot.ok_or_else(|| {
            DecodeErrors::MalformedScan(format!(
                "The scan header did not assign huffman tables to channel {}",
                channel.id
            ))
        })?;

        self.huffman_tables
            .iter()
            .find(|table| table.class == class && table.id == slot)
            .map(|table| &table.tree)
            .ok_or_else(|| {
                DecodeErrors::MalformedScan(format!(
                    "No huffman table with class {} and id {} for channel {}",
                    class, slot, channel.id
                ))
            })
    }
}

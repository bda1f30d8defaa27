//! Length prefixed segment readers
//!
//! Everything between SOI and the entropy coded data comes through here:
//! comments, application data, quantization tables, huffman tables, the
//! frame header and the scan header.
//!
//! A good guide on markers can be found [here](http://vip.sugovica.hu/Sardi/kepnezo/JPEG%20File%20Layout%20and%20Format.htm)

use std::io::Read;

use crate::bitstream::BitReader;
use crate::components::Channel;
use crate::decoder::{Decoder, QuantizationTable};
use crate::errors::DecodeErrors;
use crate::huffman::{HuffmanTable, HuffmanTree};
use crate::image::Image;
use crate::misc::{DCT_BLOCK, MAX_HUFFMAN_TABLES, MAX_QUANT_TABLES};

/// Parse a COM segment and hand the text to the image
///
/// The payload is decoded as UTF-8 with lossy replacement; the last
/// comment in the stream wins.
pub(crate) fn parse_com<R>(reader: &mut BitReader<R>, image: &mut Image) -> Result<(), DecodeErrors>
where
    R: Read,
{
    let length = reader.read_section_length()?;

    // a length below 2 cannot even cover its own field, read nothing
    let payload = reader.read_n_bytes(usize::from(length.saturating_sub(2)))?;

    debug!("COM segment with {} bytes of text", payload.len());

    image.set_comment(String::from_utf8_lossy(&payload).into_owned());

    Ok(())
}

/// Skip over an application specific segment
pub(crate) fn parse_app<R>(reader: &mut BitReader<R>) -> Result<(), DecodeErrors>
where
    R: Read,
{
    let length = reader.read_section_length()?;

    debug!("Skipping {} byte APPn segment", length.saturating_sub(2));

    reader.read_n_bytes(usize::from(length.saturating_sub(2)))?;

    Ok(())
}

/// **B.2.4.1 Quantization table-specification syntax**
///
/// |Field               |Size       |Description
/// ---------------------|-----------|-------------------------
/// |Length              |2 bytes    |Length of the segment
/// |QT information      |1 byte     |bit 0..3: table id, bit 4..7: precision, 0 = 8 bit, 1 = 16 bit
/// |Values              |64 or 128 bytes|In zig-zag order, 16 bit values big endian
///
/// A single DQT segment may contain multiple tables, each with its own
/// information byte.
pub(crate) fn parse_dqt<R>(decoder: &mut Decoder, reader: &mut BitReader<R>) -> Result<(), DecodeErrors>
where
    R: Read,
{
    // signed accounting, so a table overrunning the declared length stops
    // the loop instead of wrapping around
    let mut remaining = i32::from(reader.read_section_length()?) - 2;

    while remaining > 0
    {
        let qt_info = reader.read_byte()?;

        remaining -= 1;

        let precision = (qt_info >> 4) & 0x0f;
        let id = qt_info & 0x0f;

        let mut values = [0_u16; DCT_BLOCK];

        if precision == 1
        {
            for value in &mut values
            {
                *value = reader.read_word()?;
            }
            remaining -= (DCT_BLOCK * 2) as i32;
        }
        else
        {
            for value in &mut values
            {
                *value = u16::from(reader.read_byte()?);
            }
            remaining -= DCT_BLOCK as i32;
        }

        debug!("Quantization table id:{} precision:{}", id, precision);

        decoder.quant_tables.push(QuantizationTable { id, values });
    }

    if decoder.quant_tables.len() > MAX_QUANT_TABLES
    {
        return Err(DecodeErrors::TooManyQuantTables(decoder.quant_tables.len()));
    }

    return Ok(());
}

/// **B.2.4.2 Huffman table-specification syntax**
///
/// |Field               |Size       |Description
/// ---------------------|-----------|-------------------------
/// |Length              |2 bytes    |Length of the segment
/// |HT information      |1 byte     |bit 0..3: table id, bit 4: 0 = DC table, 1 = AC table
/// |Number of symbols   |16 bytes   |Count of codes of each length 1..16
/// |Symbols             |sum(counts)|One symbol per code, in canonical order
///
/// A single DHT segment may contain multiple tables.
pub(crate) fn parse_huffman<R>(
    decoder: &mut Decoder, reader: &mut BitReader<R>,
) -> Result<(), DecodeErrors>
where
    R: Read,
{
    let mut remaining = i32::from(reader.read_section_length()?) - 2;

    while remaining > 0
    {
        let ht_info = reader.read_byte()?;

        remaining -= 1;

        let class = ht_info >> 4;
        let id = ht_info & 0x0f;

        let mut code_lengths = [0_u8; 16];
        let mut total: usize = 0;

        for count in &mut code_lengths
        {
            *count = reader.read_byte()?;
            total += usize::from(*count);
        }
        remaining -= 16;

        let values = reader.read_n_bytes(total)?;

        remaining -= total as i32;

        debug!(
            "Huffman table class:{} id:{} with {} symbols",
            class, id, total
        );

        let tree = HuffmanTree::build(&code_lengths, &values)?;

        decoder.huffman_tables.push(HuffmanTable { class, id, tree });
    }

    if decoder.huffman_tables.len() > MAX_HUFFMAN_TABLES
    {
        return Err(DecodeErrors::TooManyHuffmanTables(
            decoder.huffman_tables.len(),
        ));
    }

    return Ok(());
}

/// Section: `B.2.2 Frame header syntax`
///
/// Sizes the image and records the channels. Only 8 bit baseline frames
/// with 1 or 3 channels are accepted.
pub(crate) fn parse_start_of_frame<R>(
    reader: &mut BitReader<R>, decoder: &mut Decoder, image: &mut Image,
) -> Result<(), DecodeErrors>
where
    R: Read,
{
    // the length is implied by the channel count, nothing else to learn
    // from it
    let _length = reader.read_section_length()?;

    let precision = reader.read_byte()?;

    if precision != 8
    {
        return Err(DecodeErrors::UnsupportedFrame(format!(
            "The decoder can only handle 8 bit samples, the frame has {} bits of precision",
            precision
        )));
    }

    let height = reader.read_word()?;
    let width = reader.read_word()?;

    let channel_count = reader.read_byte()?;

    if channel_count != 1 && channel_count != 3
    {
        return Err(DecodeErrors::UnsupportedFrame(format!(
            "Number of channels should be 1 or 3, found {}",
            channel_count
        )));
    }

    info!(
        "Baseline frame, {}x{} pixels, {} channel(s)",
        width, height, channel_count
    );

    image.set_size(usize::from(width), usize::from(height));

    for _ in 0..channel_count
    {
        let mut entry = [0_u8; 3];

        for byte in &mut entry
        {
            *byte = reader.read_byte()?;
        }

        decoder.channels.push(Channel::from(entry)?);
    }

    decoder.have_sof0 = true;

    Ok(())
}

/// Parse a start of scan header
///
/// Assigns the DC/AC huffman slots per channel and rejects anything other
/// than the single full spectral selection baseline uses.
pub(crate) fn parse_sos<R>(reader: &mut BitReader<R>, decoder: &mut Decoder) -> Result<(), DecodeErrors>
where
    R: Read,
{
    let _length = reader.read_section_length()?;

    let channel_count = reader.read_byte()?;

    for _ in 0..channel_count
    {
        let id = reader.read_byte()?;

        // top nibble is the DC slot, bottom nibble the AC slot
        let slots = reader.read_byte()?;

        let channel = decoder
            .channels
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| {
                DecodeErrors::MalformedScan(format!("No channel with id {} for the scan", id))
            })?;

        channel.dc_huff_table = Some(slots >> 4);
        channel.ac_huff_table = Some(slots & 0x0f);
    }

    // spectral start, spectral end, approximation; baseline sequential
    // pins them to 0, 63, 0
    let spectral = reader.read_n_bytes(3)?;

    if spectral != [0x00, 0x3F, 0x00]
    {
        return Err(DecodeErrors::UnsupportedScan(format!(
            "Expected spectral selection 0..63 with no approximation, found {:02X?}",
            spectral
        )));
    }

    Ok(())
}

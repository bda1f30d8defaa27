//! This module exports a single struct to store information about
//! a channel of the image
//!
//! The data is extracted from a SOF0 header and completed later by the
//! scan header, which assigns the entropy table slots.

use crate::errors::DecodeErrors;
use crate::misc::MAX_SAMPLE_FACTOR;

/// Channel data from the start of frame
#[derive(Debug, Clone)]
pub(crate) struct Channel
{
    /// Channel identifier the scan header refers back to, 1..=255
    pub id:                    u8,
    /// Sampling ratio of this channel in the x-plane
    pub horizontal_sample:     usize,
    /// Sampling ratio of this channel in the y-plane
    pub vertical_sample:       usize,
    /// Which quantization table dequantizes this channel
    pub quantization_table_id: u8,
    /// DC huffman table slot, assigned by the scan header
    pub dc_huff_table:         Option<u8>,
    /// AC huffman table slot, assigned by the scan header
    pub ac_huff_table:         Option<u8>,
}

impl Channel
{
    /// Create a new instance from the three bytes of a frame header entry
    pub fn from(a: [u8; 3]) -> Result<Channel, DecodeErrors>
    {
        let id = a[0];

        // one nibble per axis, horizontal in the high bits
        let horizontal_sample = usize::from(a[1] >> 4);
        let vertical_sample = usize::from(a[1] & 0x0f);
        let quantization_table_id = a[2];

        for (name, sample) in [
            ("Horizontal", horizontal_sample),
            ("Vertical", vertical_sample),
        ]
        {
            if sample == 0 || sample > MAX_SAMPLE_FACTOR
            {
                return Err(DecodeErrors::UnsupportedFrame(format!(
                    "{} sampling factor should be between 1 and {}, found {}",
                    name, MAX_SAMPLE_FACTOR, sample
                )));
            }
        }

        info!(
            "Channel ID:{}\tHS:{} VS:{} QT:{}",
            id, horizontal_sample, vertical_sample, quantization_table_id
        );

        Ok(Channel {
            id,
            horizontal_sample,
            vertical_sample,
            quantization_table_id,
            // these two are set when the scan header is parsed
            dc_huff_table: None,
            ac_huff_table: None,
        })
    }
}

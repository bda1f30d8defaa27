//! JPEG marker identification

/// Start of the application specific marker range
const APPN_MIN: u16 = 0xffe0;
/// End of the application specific marker range, inclusive
const APPN_MAX: u16 = 0xffef;

/// Markers understood by this decoder
///
/// The sixteen application specific markers collapse into a single
/// [`Marker::APPn`] tag since we skip their payloads wholesale.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Marker {
    /// Start of image
    SOI,
    /// End of image
    EOI,
    /// Comment
    COM,
    /// Application specific data, 0xFFE0..=0xFFEF
    APPn,
    /// Define quantization table(s)
    DQT,
    /// Start of frame, baseline sequential DCT
    SOF0,
    /// Define Huffman table(s)
    DHT,
    /// Start of scan
    SOS,
}

impl Marker {
    /// Map a 16 bit code read off the wire to a marker
    #[must_use]
    pub fn from_u16(code: u16) -> Option<Marker> {
        match code {
            0xffd8 => Some(Marker::SOI),
            0xffd9 => Some(Marker::EOI),
            0xfffe => Some(Marker::COM),
            0xffdb => Some(Marker::DQT),
            0xffc0 => Some(Marker::SOF0),
            0xffc4 => Some(Marker::DHT),
            0xffda => Some(Marker::SOS),
            APPN_MIN..=APPN_MAX => Some(Marker::APPn),
            _ => None,
        }
    }
}

//! A baseline sequential JPEG decoder
//!
//! Decodes single frame, huffman coded, 8 bit JPEG streams with 1 or 3
//! channels into an RGB [`Image`], honoring chroma subsampling and the
//! optional COM comment.
//!
//! ```no_run
//! use baseline_jpeg::Decoder;
//!
//! let data = std::fs::read("image.jpg").unwrap();
//! let image = Decoder::new().decode_buffer(&data).unwrap();
//!
//! println!("{}x{} px", image.width(), image.height());
//! ```
#![allow(clippy::needless_return, clippy::similar_names)]
#![warn(clippy::correctness, clippy::perf, clippy::pedantic)]
#[macro_use]
extern crate log;

pub use crate::decoder::Decoder;
pub use crate::errors::DecodeErrors;
pub use crate::image::{Image, Pixel};
pub use crate::marker::Marker;

pub mod bitstream;
mod color_convert;
mod components;
mod decoder;
pub mod errors;
mod headers;
mod huffman;
mod idct;
pub mod image;
pub mod marker;
mod mcu;
mod misc;

//! Grayscale PNG encoding for rendered noise fields.
//!
//! Compression and filtering are pinned, and the png crate writes no
//! timestamps, so equal pixels always encode to equal bytes. The BLAKE3
//! digest of those bytes is reported as the fingerprint of a render.

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

/// Errors from encoding a render.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Render must be at least 1x1, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Pixel buffer holds {actual} bytes, {width}x{height} needs {expected}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("PNG encoder failed: {0}")]
    Png(#[from] png::EncodingError),
}

/// Row-major 8-bit grayscale pixels with their dimensions.
#[derive(Debug, Clone, Copy)]
pub struct GrayImage<'a> {
    pixels: &'a [u8],
    width: u32,
    height: u32,
}

/// Encoded PNG bytes and their BLAKE3 hex digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPng {
    pub bytes: Vec<u8>,
    pub blake3: String,
}

impl<'a> GrayImage<'a> {
    pub fn new(pixels: &'a [u8], width: u32, height: u32) -> Result<Self, EncodeError> {
        if width == 0 || height == 0 {
            return Err(EncodeError::EmptyImage { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(EncodeError::BufferSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Encode with the pinned settings and fingerprint the result.
    pub fn encode(&self) -> Result<EncodedPng, EncodeError> {
        let mut bytes = Vec::with_capacity(self.pixels.len() / 2 + 64);
        {
            let mut encoder = Encoder::new(&mut bytes, self.width, self.height);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Eight);
            encoder.set_compression(Compression::Default);
            encoder.set_filter(FilterType::NoFilter);
            encoder.write_header()?.write_image_data(self.pixels)?;
        }
        let blake3 = digest(&bytes);
        Ok(EncodedPng { bytes, blake3 })
    }
}

/// BLAKE3 hex digest of `bytes`.
pub fn digest(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

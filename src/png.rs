#![forbid(unsafe_code)]

//! Holds all the tools for decoding and encoding PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! ## Automated PNG Decoding
//! If you don't need full control over the decoding process, call
//! [`Image::load`](crate::Image::load) and you get the pixels as a
//! `Vec<RGBA8>` along with the header info. That requires the `alloc` and
//! `miniz_oxide` features.
//!
//! ## Decoding a PNG Yourself
//! The general format of a PNG is that the information is stored in "chunks".
//! Each chunk is a big-endian length, a 4 byte type, that many bytes of data,
//! and a CRC of the type and data. There's four "critical" chunk types:
//! * **Header** ([`IHDR`]) - The image's dimensions, pixel format, and if the
//!   image is interlaced or not. From this you know how much temporary space is
//!   required for decompression.
//! * **Palette** - If an image uses indexed color it will have a palette of
//!   what index values map to what `RGB8` values.
//! * **Image Data** - One or more chunks of compressed data. All of the
//!   compressed data forms a single zlib data stream.
//! * **End** - The last chunk, lets you know you had the full PNG and your data
//!   wasn't truncated accidentally.
//!
//! The steps are:
//!
//! 1) Walk the chunks with [`png_walk_chunks`], which checks each CRC, or with
//!    the more forgiving [`PngRawChunkIter`].
//! 2) Parse the [`IHDR`] from the first chunk.
//! 3) Size a buffer with [`IHDR::zlib_decompression_requirement`] and
//!    decompress all of the `IDAT` data into it with [`decompress_idat_to`].
//!    This gives you *filtered* data.
//! 4) Call [`unfilter_decompressed_data`] to reconstruct each scanline in
//!    place. Your closure gets `(x, y, pixel_bytes)` once per pixel, and
//!    [`expand_pixel`] can turn those bytes into an `RGBA8`.
//!
//! ## What's Not Supported
//! * Interlaced images are rejected with
//!   [`InterlaceNotSupported`](crate::PngError::InterlaceNotSupported).
//! * Bit depths below 8 are rejected with
//!   [`UnsupportedBitDepth`](crate::PngError::UnsupportedBitDepth). Bit depth
//!   16 decodes, keeping the high byte of each channel.

use crate::{PngError, PngResult};

mod crc32;
pub use crc32::*;

mod raw_chunk;
pub use raw_chunk::*;

mod ihdr;
pub use ihdr::*;

mod plte;
pub use plte::*;

mod trns;
pub use trns::*;

mod idat;
pub use idat::*;

mod unfilter;
pub use unfilter::*;

mod expand;
pub use expand::*;


/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not* PNG
///   data.
#[inline]
#[must_use]
pub const fn is_png_header_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

//! The bridge between `IDAT` chunks and the zlib transform.
//!
//! * Images can have more than one IDAT chunk. They should all be stored in a
//!   row. Multiple chunks are treated as a single zlib datastream.
//! * The encoder writes one IDAT chunk, unless the stream is too long for one.

use super::*;

/// Gets an iterator over all the `IDAT` data slices in the PNG bytes, in
/// stream order.
///
/// This uses the forgiving [`PngRawChunkIter`], so it's up to you to have
/// checked the chunks already if you care about CRCs.
#[inline]
pub fn png_get_idat(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
  PngRawChunkIter::new(bytes)
    .filter(|raw_chunk| raw_chunk.chunk_type() == PngChunkType::IDAT)
    .map(|raw_chunk| raw_chunk.data())
}

/// Decompresses the zlib stream formed by all the `idat` slices into `out`.
///
/// Gives the number of bytes written. The Adler-32 checksum of the stream is
/// verified.
///
/// ## Failure
/// * [`DecompressedLengthMismatch`](PngError::DecompressedLengthMismatch) if
///   the stream has more output than fits in `out`.
/// * [`CompressionTransformFailure`](PngError::CompressionTransformFailure)
///   for any other zlib problem (bad header, corrupt data, stream cut short).
#[cfg(feature = "miniz_oxide")]
#[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
pub fn decompress_idat_to<'i>(
  out: &mut [u8], idat: impl Iterator<Item = &'i [u8]>,
) -> PngResult<usize> {
  use miniz_oxide::inflate::{decompress_slice_iter_to_slice, TINFLStatus};
  match decompress_slice_iter_to_slice(out, idat, true, false) {
    Ok(count) => Ok(count),
    Err(TINFLStatus::HasMoreOutput) => Err(PngError::DecompressedLengthMismatch),
    Err(status) => {
      log::debug!("inflate failed: {status:?}");
      Err(PngError::CompressionTransformFailure)
    }
  }
}

/// Decompresses the image data, which must come out to exactly
/// `expected_len` bytes.
///
/// The buffer is given one spare byte so that a stream which is too long is
/// caught instead of silently cut off.
#[cfg(all(feature = "alloc", feature = "miniz_oxide"))]
#[cfg_attr(docs_rs, doc(cfg(all(feature = "alloc", feature = "miniz_oxide"))))]
pub fn inflate_image_data<'i>(
  idat: impl Iterator<Item = &'i [u8]>, expected_len: usize,
) -> PngResult<alloc::vec::Vec<u8>> {
  let buffer_len = expected_len.checked_add(1).ok_or(PngError::CheckedMath)?;
  let mut buffer = alloc::vec::Vec::new();
  buffer.try_reserve(buffer_len)?;
  buffer.resize(buffer_len, 0);
  let count = decompress_idat_to(&mut buffer, idat)?;
  log::debug!("inflated {count} bytes, expected {expected_len}");
  if count != expected_len {
    return Err(PngError::DecompressedLengthMismatch);
  }
  buffer.truncate(expected_len);
  Ok(buffer)
}

/// The compression level used when encoding, the zlib default.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Compresses filtered scanlines into a zlib stream for an `IDAT` chunk.
///
/// The compressor grows its own output buffer as needed.
#[cfg(all(feature = "alloc", feature = "miniz_oxide"))]
#[cfg_attr(docs_rs, doc(cfg(all(feature = "alloc", feature = "miniz_oxide"))))]
#[inline]
#[must_use]
pub fn compress_scanlines(filtered: &[u8]) -> alloc::vec::Vec<u8> {
  miniz_oxide::deflate::compress_to_vec_zlib(filtered, DEFAULT_COMPRESSION_LEVEL)
}

/// Appends the zlib stream as `IDAT` chunks of at most `max_chunk_len` bytes
/// each.
///
/// `max_chunk_len` is clamped to `1..=PNG_MAX_CHUNK_LEN`. An empty stream
/// still gets one (empty) `IDAT`.
#[cfg(feature = "alloc")]
#[cfg_attr(docs_rs, doc(cfg(feature = "alloc")))]
pub fn write_idat_chunks(
  out: &mut alloc::vec::Vec<u8>, zlib: &[u8], max_chunk_len: usize,
) -> PngResult<()> {
  if zlib.is_empty() {
    return write_chunk(out, PngChunkType::IDAT, &[]);
  }
  let max_chunk_len = max_chunk_len.clamp(1, PNG_MAX_CHUNK_LEN as usize);
  for part in zlib.chunks(max_chunk_len) {
    write_chunk(out, PngChunkType::IDAT, part)?;
  }
  Ok(())
}

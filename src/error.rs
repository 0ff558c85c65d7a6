use core::{fmt, num::TryFromIntError};

/// Shorthand for a result with a [`PngError`].
pub type PngResult<T> = Result<T, PngError>;

/// An error from decoding or encoding PNG data.
///
/// Every error is detected synchronously and none of them are transient.
/// Either the data is well formed or it isn't.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PngError {
  /// The first 8 bytes are not the PNG signature.
  MalformedSignature,
  /// There's no `IHDR`, it isn't the first chunk, or there's more than one.
  MissingOrDuplicateIHDR,
  /// The color type byte is illegal, or illegal with the given bit depth.
  IllegalColorTypeBitDepthCombination,
  /// An indexed color image has no `PLTE` before its image data.
  MissingRequiredPalette,
  /// A decoded palette index is past the end of the palette.
  PaletteIndexOutOfRange,
  /// A chunk's declared CRC doesn't match the CRC of its type and data.
  ChunkCrcMismatch,
  /// The decompressed image data is not exactly the size the header implies.
  DecompressedLengthMismatch,
  /// The zlib stream could not be decompressed (or compressed).
  CompressionTransformFailure,
  /// The image's dimensions or buffer sizes go past the configured
  /// [`Limits`](crate::Limits).
  AllocationLimitExceeded,

  /// The data ended before the `IEND` chunk.
  UnexpectedEndOfInput,
  /// A chunk declared a length larger than `2^31 - 1`.
  ChunkTooLong,
  /// A chunk's data is the wrong size for its type.
  MalformedChunk,
  /// The `PLTE` data isn't 1 to 256 entries of 3 bytes each.
  MalformedPalette,
  /// The `tRNS` data is the wrong size for the image's color type.
  MalformedTransparency,
  /// The declared width and/or height of the image is 0.
  ImageDimensionsTooSmall,
  /// A legal PNG bit depth that this crate doesn't process (1, 2, or 4, or 16
  /// when encoding).
  UnsupportedBitDepth,
  /// The image uses Adam7 interlacing.
  InterlaceNotSupported,
  /// The header's compression method isn't 0.
  IllegalCompressionMethod,
  /// The header's filter method isn't 0.
  IllegalFilterMethod,
  /// The header's interlace method isn't 0 or 1.
  IllegalInterlaceMethod,
  /// A scanline's filter type byte is greater than 4.
  IllegalFilterType,
  /// There are no `IDAT` chunks.
  MissingImageData,
  /// When encoding an indexed image, a pixel's color isn't in the palette.
  PixelNotInPalette,
  /// A checked math operation failed.
  CheckedMath,
  /// The allocator couldn't give us enough space.
  Alloc,
}

impl fmt::Display for PngError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::MalformedSignature => "not a PNG signature",
      Self::MissingOrDuplicateIHDR => "missing, misplaced, or duplicate IHDR chunk",
      Self::IllegalColorTypeBitDepthCombination => "illegal color type and bit depth combination",
      Self::MissingRequiredPalette => "indexed color image without a PLTE chunk",
      Self::PaletteIndexOutOfRange => "palette index out of range",
      Self::ChunkCrcMismatch => "chunk CRC mismatch",
      Self::DecompressedLengthMismatch => "decompressed image data has the wrong length",
      Self::CompressionTransformFailure => "zlib transform failed",
      Self::AllocationLimitExceeded => "image exceeds the configured limits",
      Self::UnexpectedEndOfInput => "unexpected end of input",
      Self::ChunkTooLong => "chunk length too large",
      Self::MalformedChunk => "malformed chunk",
      Self::MalformedPalette => "malformed PLTE chunk",
      Self::MalformedTransparency => "malformed tRNS chunk",
      Self::ImageDimensionsTooSmall => "width or height is zero",
      Self::UnsupportedBitDepth => "unsupported bit depth",
      Self::InterlaceNotSupported => "interlaced images are not supported",
      Self::IllegalCompressionMethod => "illegal compression method",
      Self::IllegalFilterMethod => "illegal filter method",
      Self::IllegalInterlaceMethod => "illegal interlace method",
      Self::IllegalFilterType => "illegal scanline filter type",
      Self::MissingImageData => "no IDAT chunks",
      Self::PixelNotInPalette => "pixel color not in the palette",
      Self::CheckedMath => "arithmetic overflow",
      Self::Alloc => "allocation failure",
    };
    f.write_str(s)
  }
}

#[cfg(feature = "std")]
impl std::error::Error for PngError {}

#[cfg(feature = "alloc")]
impl From<alloc::collections::TryReserveError> for PngError {
  #[inline]
  fn from(_: alloc::collections::TryReserveError) -> Self {
    Self::Alloc
  }
}
impl From<TryFromIntError> for PngError {
  #[inline]
  fn from(_: TryFromIntError) -> Self {
    Self::CheckedMath
  }
}

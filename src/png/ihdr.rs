use super::*;

use crate::int_endian::U32BE;

/// The types of color that PNG supports.
///
/// The color type byte is really three independent flags:
/// * bit 0: uses a palette
/// * bit 1: has color channels (otherwise it's grayscale)
/// * bit 2: has an alpha channel
///
/// Only five combinations of those flags are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  /// Greyscale
  Y = 0,
  /// Red, Green, Blue
  RGB = 2,
  /// Index into a palette.
  ///
  /// The palette will have RGB8 data. There may optionally be a transparency
  /// chunk.
  Index = 3,
  /// Greyscale + Alpha
  YA = 4,
  /// Red, Green, Blue, Alpha
  RGBA = 6,
}
impl PngColorType {
  /// Bit 0 of the color type.
  #[inline]
  #[must_use]
  pub const fn uses_palette(self) -> bool {
    (self as u8 & 0b001) != 0
  }
  /// Bit 1 of the color type.
  #[inline]
  #[must_use]
  pub const fn has_color_channels(self) -> bool {
    (self as u8 & 0b010) != 0
  }
  /// Bit 2 of the color type.
  #[inline]
  #[must_use]
  pub const fn has_alpha(self) -> bool {
    (self as u8 & 0b100) != 0
  }

  /// The number of channels in this type of color.
  ///
  /// Indexed color is one channel, even though the color flag is set.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    let color = if self.uses_palette() {
      1
    } else if self.has_color_channels() {
      3
    } else {
      1
    };
    color + self.has_alpha() as usize
  }

  /// If the bit depth is allowed with this color type.
  #[inline]
  #[must_use]
  pub const fn allows_bit_depth(self, bit_depth: u8) -> bool {
    match self {
      Self::Y => matches!(bit_depth, 1 | 2 | 4 | 8 | 16),
      Self::Index => matches!(bit_depth, 1 | 2 | 4 | 8),
      Self::RGB | Self::YA | Self::RGBA => matches!(bit_depth, 8 | 16),
    }
  }
}
impl TryFrom<u8> for PngColorType {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => PngColorType::Y,
      2 => PngColorType::RGB,
      3 => PngColorType::Index,
      4 => PngColorType::YA,
      6 => PngColorType::RGBA,
      _ => return Err(PngError::IllegalColorTypeBitDepthCombination),
    })
  }
}

/// Image Header
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: PngColorType,
  /// if the image data is stored interlaced.
  ///
  /// please don't make new interlaced images, they're terrible.
  pub is_interlaced: bool,
}
impl IHDR {
  /// The size of an `IHDR` chunk's data.
  pub const DATA_LEN: usize = 13;

  /// Bits used by each pixel.
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> usize {
    (self.bit_depth as usize) * self.color_type.channel_count()
  }

  /// Bytes used by each pixel, rounded up to at least 1.
  ///
  /// Filters work byte by byte, and this is the distance in bytes between a
  /// byte and the matching byte of the pixel to its left.
  #[inline]
  #[must_use]
  pub const fn bytes_per_pixel(&self) -> usize {
    let bytes = self.bits_per_pixel() / 8;
    if bytes == 0 {
      1
    } else {
      bytes
    }
  }

  /// Bytes of sample data in one scanline, not counting the filter byte.
  #[inline]
  pub fn bytes_per_scanline(&self) -> PngResult<usize> {
    let bits = self.bits_per_pixel().checked_mul(self.width as usize).ok_or(PngError::CheckedMath)?;
    Ok(bits / 8 + (bits % 8 != 0) as usize)
  }

  /// Gets the buffer size required to hold the decompressed image data.
  ///
  /// That's `height * (1 + bytes_per_scanline)`, because every scanline has
  /// a filter type byte in front of it.
  #[inline]
  pub fn zlib_decompression_requirement(&self) -> PngResult<usize> {
    let filterline = self.bytes_per_scanline()?.checked_add(1).ok_or(PngError::CheckedMath)?;
    filterline.checked_mul(self.height as usize).ok_or(PngError::CheckedMath)
  }

  /// Checks that this header describes an image this crate can decode.
  ///
  /// ## Failure
  /// * Interlaced images.
  /// * Bit depths other than 8 and 16.
  #[inline]
  pub const fn check_decodable(&self) -> PngResult<()> {
    if self.is_interlaced {
      return Err(PngError::InterlaceNotSupported);
    }
    match self.bit_depth {
      8 | 16 => Ok(()),
      _ => Err(PngError::UnsupportedBitDepth),
    }
  }

  /// The 13 data bytes of an `IHDR` chunk for this header.
  #[inline]
  #[must_use]
  pub const fn to_bytes(&self) -> [u8; 13] {
    let [w0, w1, w2, w3] = U32BE::from_u32(self.width).0;
    let [h0, h1, h2, h3] = U32BE::from_u32(self.height).0;
    [
      w0,
      w1,
      w2,
      w3,
      h0,
      h1,
      h2,
      h3,
      self.bit_depth,
      self.color_type as u8,
      0, // compression method: deflate
      0, // filter method: adaptive
      self.is_interlaced as u8,
    ]
  }
}
impl TryFrom<&[u8]> for IHDR {
  type Error = PngError;
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match value {
      [
        w0,
        w1,
        w2,
        w3,
        h0,
        h1,
        h2,
        h3,
        bit_depth,
        color_type,
        compression_method,
        filter_method,
        interlace_method,
      ] => {
        let width = U32BE([*w0, *w1, *w2, *w3]).to_u32();
        let height = U32BE([*h0, *h1, *h2, *h3]).to_u32();
        if width == 0 || height == 0 {
          return Err(PngError::ImageDimensionsTooSmall);
        }
        let color_type = PngColorType::try_from(*color_type)?;
        if !color_type.allows_bit_depth(*bit_depth) {
          return Err(PngError::IllegalColorTypeBitDepthCombination);
        }
        if *compression_method != 0 {
          return Err(PngError::IllegalCompressionMethod);
        }
        if *filter_method != 0 {
          return Err(PngError::IllegalFilterMethod);
        }
        let is_interlaced = match interlace_method {
          0 => false,
          1 => true,
          _ => return Err(PngError::IllegalInterlaceMethod),
        };
        Ok(Self { width, height, bit_depth: *bit_depth, color_type, is_interlaced })
      }
      _ => Err(PngError::MalformedChunk),
    }
  }
}

use super::*;

use crate::pixel_formats::RGBA8;

/// What's needed to turn the unfiltered bytes of one pixel into `RGBA8`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelExpander<'p> {
  /// The palette table, with any `tRNS` alphas already applied.
  pub palette: &'p [RGBA8],
  /// The `tRNS` color key for gray and RGB images.
  pub color_key: Option<[u16; 3]>,
}

#[inline]
fn sample(data: &[u8], channel: usize, bit_depth: u8) -> u16 {
  if bit_depth == 16 {
    u16::from_be_bytes([data[channel * 2], data[channel * 2 + 1]])
  } else {
    u16::from(data[channel])
  }
}

#[inline]
fn sample8(data: &[u8], channel: usize, bit_depth: u8) -> u8 {
  if bit_depth == 16 {
    data[channel * 2]
  } else {
    data[channel]
  }
}

impl PixelExpander<'_> {
  /// Expands one pixel's unfiltered bytes to `RGBA8`.
  ///
  /// * Gray is copied into all three color channels.
  /// * Indexed color is looked up in the palette.
  /// * Alpha is 255 when the color type has no alpha channel, unless the pixel
  ///   matches the color key, then it's 0.
  /// * 16-bit channels keep their high byte.
  ///
  /// `data` must be [`bytes_per_pixel`](IHDR::bytes_per_pixel) long, which is
  /// what [`unfilter_decompressed_data`] gives.
  ///
  /// ## Failure
  /// * [`PaletteIndexOutOfRange`](PngError::PaletteIndexOutOfRange)
  pub fn expand_pixel(&self, header: &IHDR, data: &[u8]) -> PngResult<RGBA8> {
    let depth = header.bit_depth;
    Ok(match header.color_type {
      PngColorType::Y => {
        let y = sample(data, 0, depth);
        let a = if self.color_key == Some([y, y, y]) { 0 } else { 255 };
        RGBA8::gray(sample8(data, 0, depth), a)
      }
      PngColorType::YA => RGBA8::gray(sample8(data, 0, depth), sample8(data, 1, depth)),
      PngColorType::RGB => {
        let full = [sample(data, 0, depth), sample(data, 1, depth), sample(data, 2, depth)];
        let a = if self.color_key == Some(full) { 0 } else { 255 };
        RGBA8::new(sample8(data, 0, depth), sample8(data, 1, depth), sample8(data, 2, depth), a)
      }
      PngColorType::RGBA => RGBA8::new(
        sample8(data, 0, depth),
        sample8(data, 1, depth),
        sample8(data, 2, depth),
        sample8(data, 3, depth),
      ),
      PngColorType::Index => {
        *self.palette.get(usize::from(data[0])).ok_or(PngError::PaletteIndexOutOfRange)?
      }
    })
  }
}

/// Expands one pixel with no palette and no color key.
///
/// Shorthand for `PixelExpander::default().expand_pixel(header, data)`, which
/// is all a direct color image without a `tRNS` chunk needs.
#[inline]
pub fn expand_pixel(header: &IHDR, data: &[u8]) -> PngResult<RGBA8> {
  PixelExpander::default().expand_pixel(header, data)
}

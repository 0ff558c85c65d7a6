//! The scanline filter engine.
//!
//! From the PNG spec:
//!
//! > Filters are applied to **bytes**, not to pixels, regardless of the bit
//! > depth or color type of the image.
//!
//! Each byte is predicted from the matching byte of the pixel to the left
//! (`a`), the pixel above (`b`), and the pixel above and to the left (`c`).
//! Any of those that's outside the image counts as 0. All math wraps.

use super::*;

/// The five scanline filter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FilterType {
  /// The byte is stored as-is.
  None = 0,
  /// Predicted by the byte to the left.
  Sub = 1,
  /// Predicted by the byte above.
  Up = 2,
  /// Predicted by the floored average of left and above.
  Average = 3,
  /// Predicted by whichever of left, above, or above-left is closest to
  /// `left + above - above_left`.
  Paeth = 4,
}
impl TryFrom<u8> for FilterType {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::None,
      1 => Self::Sub,
      2 => Self::Up,
      3 => Self::Average,
      4 => Self::Paeth,
      _ => return Err(PngError::IllegalFilterType),
    })
  }
}
impl FilterType {
  /// All of the filter types, in numeric order.
  pub const ALL: [Self; 5] = [Self::None, Self::Sub, Self::Up, Self::Average, Self::Paeth];

  /// The predicted value of a byte given its `a`, `b`, and `c` neighbors.
  #[inline]
  #[must_use]
  pub const fn predict(self, a: u8, b: u8, c: u8) -> u8 {
    match self {
      Self::None => 0,
      Self::Sub => a,
      Self::Up => b,
      Self::Average => ((a as u16 + b as u16) / 2) as u8,
      Self::Paeth => paeth_predict(a, b, c),
    }
  }
}

/// The Paeth predictor.
#[inline]
#[must_use]
pub const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // The order of these tests matters, ties go to `a`, then `b`.
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Reverses a filter on one line in place.
///
/// `prev` is the already reconstructed previous line, or empty for the first
/// line of the image.
pub fn unfilter_line(filter: FilterType, line: &mut [u8], prev: &[u8], bytes_per_pixel: usize) {
  if filter == FilterType::None {
    return;
  }
  let mut b_it = prev.chunks_exact(bytes_per_pixel);
  let mut a_pixel: &[u8] = &[];
  let mut c_pixel: &[u8] = &[];
  for pixel in line.chunks_exact_mut(bytes_per_pixel) {
    let b_pixel: &[u8] = b_it.next().unwrap_or(&[]);
    for (i, x) in pixel.iter_mut().enumerate() {
      let a = a_pixel.get(i).copied().unwrap_or(0);
      let b = b_pixel.get(i).copied().unwrap_or(0);
      let c = c_pixel.get(i).copied().unwrap_or(0);
      *x = x.wrapping_add(filter.predict(a, b, c));
    }
    a_pixel = pixel;
    c_pixel = b_pixel;
  }
}

/// Applies a filter to one line, writing the filtered bytes to `out`.
///
/// `prev` is the previous line's *unfiltered* bytes, or empty for the first
/// line of the image. This is the exact inverse of [`unfilter_line`].
pub fn filter_line(
  filter: FilterType, line: &[u8], prev: &[u8], bytes_per_pixel: usize, out: &mut [u8],
) {
  for (i, (x, o)) in line.iter().copied().zip(out.iter_mut()).enumerate() {
    let (a, c) = if i >= bytes_per_pixel {
      (line[i - bytes_per_pixel], prev.get(i - bytes_per_pixel).copied().unwrap_or(0))
    } else {
      (0, 0)
    };
    let b = prev.get(i).copied().unwrap_or(0);
    *o = x.wrapping_sub(filter.predict(a, b, c));
  }
}

/// Given the `header`, `decompressed` buffer, and a per-pixel `op`, unfilters
/// the data and passes each pixel output to the `op` as the unfiltering occurs.
///
/// Each call to the `op` gets `|x, y, data|` as arguments, where `x` and `y`
/// are the position of the pixel (relative to the top left), and `data` is
/// the unfiltered bytes of that pixel: one byte per channel at bit depth 8, two
/// big-endian bytes per channel at bit depth 16. If the `op` returns an error
/// the unfiltering stops with that error.
///
/// The data is unfiltered in place, and also each filter byte is reset to the
/// "no filter" setting as well. Thus, it's perfectly fine to call this more
/// than once on the same decompressed data if you just want to iterate the data
/// a second time for some reason.
///
/// ## Failure
/// * The header isn't [decodable](IHDR::check_decodable).
/// * `decompressed` isn't exactly
///   [`zlib_decompression_requirement`](IHDR::zlib_decompression_requirement)
///   bytes.
/// * A filter type byte is greater than 4.
pub fn unfilter_decompressed_data<F>(
  header: IHDR, decompressed: &mut [u8], mut op: F,
) -> PngResult<()>
where
  F: FnMut(u32, u32, &[u8]) -> PngResult<()>,
{
  header.check_decodable()?;
  if header.width == 0 || header.height == 0 {
    return Err(PngError::ImageDimensionsTooSmall);
  }
  if decompressed.len() != header.zlib_decompression_requirement()? {
    return Err(PngError::DecompressedLengthMismatch);
  }
  let bytes_per_pixel = header.bytes_per_pixel();
  let bytes_per_filterline = header.bytes_per_scanline()? + 1;

  let mut prev_line: &[u8] = &[];
  for (y, filterline) in decompressed.chunks_exact_mut(bytes_per_filterline).enumerate() {
    let (f, line) = filterline.split_at_mut(1);
    let filter = FilterType::try_from(f[0])?;
    unfilter_line(filter, line, prev_line, bytes_per_pixel);
    f[0] = FilterType::None as u8;
    for (x, pixel) in line.chunks_exact(bytes_per_pixel).enumerate() {
      op(x as u32, y as u32, pixel)?;
    }
    prev_line = line;
  }
  Ok(())
}

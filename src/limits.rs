use crate::{png::IHDR, PngError, PngResult};

/// Bounds checked before any image buffer is allocated.
///
/// The header of a PNG is only 13 bytes, but it can claim an image of about
/// 4 billion by 4 billion pixels. Decoding checks the header against these
/// limits first, so a hostile or corrupt header is an error instead of an
/// out-of-memory abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits {
  /// Largest allowed width, in pixels.
  pub max_width: u32,
  /// Largest allowed height, in pixels.
  pub max_height: u32,
  /// Largest allowed total of the decompression buffer plus the `RGBA8` pixel
  /// grid, in bytes.
  pub max_alloc_bytes: usize,
}
impl Default for Limits {
  /// 17,000 pixels in each dimension, and 1 GiB of buffers.
  #[inline]
  fn default() -> Self {
    Self { max_width: 17_000, max_height: 17_000, max_alloc_bytes: 1 << 30 }
  }
}

/// The buffer sizes an image needs, as computed by [`Limits::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferSizes {
  /// `height * (1 + bytes_per_scanline)`
  pub decompressed_bytes: usize,
  /// `width * height`
  pub pixel_count: usize,
}

impl Limits {
  /// No bounds at all. The size math is still checked for overflow.
  pub const NONE: Self =
    Self { max_width: u32::MAX, max_height: u32::MAX, max_alloc_bytes: usize::MAX };

  /// Computes the buffer sizes for an image with this header, if it's within
  /// the limits.
  ///
  /// ## Failure
  /// * [`AllocationLimitExceeded`](PngError::AllocationLimitExceeded) if the
  ///   dimensions or the total buffer size go past the limits, or if the size
  ///   math overflows.
  pub fn check(&self, header: &IHDR) -> PngResult<BufferSizes> {
    if header.width > self.max_width || header.height > self.max_height {
      log::debug!(
        "{}x{} is past the {}x{} limit",
        header.width,
        header.height,
        self.max_width,
        self.max_height
      );
      return Err(PngError::AllocationLimitExceeded);
    }
    let decompressed_bytes =
      header.zlib_decompression_requirement().map_err(|_| PngError::AllocationLimitExceeded)?;
    let pixel_count = (header.width as usize)
      .checked_mul(header.height as usize)
      .ok_or(PngError::AllocationLimitExceeded)?;
    let total = pixel_count
      .checked_mul(4)
      .and_then(|grid| grid.checked_add(decompressed_bytes))
      .ok_or(PngError::AllocationLimitExceeded)?;
    if total > self.max_alloc_bytes {
      log::debug!("{total} bytes of buffers is past the {} byte limit", self.max_alloc_bytes);
      return Err(PngError::AllocationLimitExceeded);
    }
    Ok(BufferSizes { decompressed_bytes, pixel_count })
  }
}

#[test]
fn test_limits_check() {
  use crate::png::PngColorType;
  let header = IHDR {
    width: 10,
    height: 3,
    bit_depth: 8,
    color_type: PngColorType::RGB,
    is_interlaced: false,
  };
  assert_eq!(
    Limits::default().check(&header),
    Ok(BufferSizes { decompressed_bytes: 3 * (1 + 30), pixel_count: 30 })
  );
  let too_wide = IHDR { width: 17_001, ..header };
  assert_eq!(Limits::default().check(&too_wide), Err(PngError::AllocationLimitExceeded));
  let tiny = Limits { max_alloc_bytes: 100, ..Limits::default() };
  assert_eq!(tiny.check(&header), Err(PngError::AllocationLimitExceeded));
  let huge = IHDR { width: u32::MAX, height: u32::MAX, ..header };
  assert!(Limits::NONE.check(&huge).is_err());
}

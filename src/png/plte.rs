use super::*;

use core::fmt::Debug;

use crate::pixel_formats::{RGB8, RGBA8};

/// Palette data
///
/// Palette entries are always RGB.
///
/// If you want to have a paletted image with transparency then the transparency
/// info goes in a separate transparency chunk.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PLTE<'b>(&'b [RGB8]);
impl<'b> TryFrom<&'b [u8]> for PLTE<'b> {
  type Error = PngError;
  /// ## Failure
  /// * The data isn't a multiple of 3 bytes.
  /// * There's no entries, or more than 256 entries.
  #[inline]
  fn try_from(data: &'b [u8]) -> Result<Self, Self::Error> {
    let entries: &[RGB8] =
      bytemuck::try_cast_slice(data).map_err(|_| PngError::MalformedPalette)?;
    if entries.is_empty() || entries.len() > 256 {
      return Err(PngError::MalformedPalette);
    }
    Ok(Self(entries))
  }
}
impl Debug for PLTE<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // currently prints no more than 4 palette entries
    f.debug_tuple("PLTE").field(&&self.0[..self.0.len().min(4)]).field(&self.0.len()).finish()
  }
}
impl<'b> PLTE<'b> {
  /// Gets the entries as a slice.
  #[inline]
  #[must_use]
  pub const fn entries(&self) -> &'b [RGB8] {
    self.0
  }

  /// Builds the full `RGBA8` palette table.
  ///
  /// ## Failure
  /// * The alpha list is longer than the palette.
  /// * Allocation failure.
  #[cfg(feature = "alloc")]
  pub fn to_rgba_table(&self, alphas: Option<&[u8]>) -> PngResult<alloc::vec::Vec<RGBA8>> {
    if alphas.is_some_and(|alphas| alphas.len() > self.0.len()) {
      return Err(PngError::MalformedTransparency);
    }
    let mut table = alloc::vec::Vec::new();
    table.try_reserve(self.0.len())?;
    for index in 0..self.0.len() {
      let a = alphas.and_then(|alphas| alphas.get(index)).copied().unwrap_or(255);
      table.push(RGBA8 { a, ..RGBA8::from(self.0[index]) });
    }
    Ok(table)
  }
}

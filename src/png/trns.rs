use super::*;

use crate::int_endian::U16BE;

/// Transparency
///
/// Spec: [tRNS](https://www.w3.org/TR/png/#11tRNS)
///
/// The meaning of the data depends on the image's color type, so this is
/// parsed with the header in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub enum tRNS<'b> {
  /// Alpha for each palette index. There can be fewer alphas than palette
  /// entries, missing entries are fully opaque.
  Index {
    /// alpha values, in palette order
    alphas: &'b [u8],
  },
  /// The one grayscale sample value that's fully transparent.
  Y {
    /// full bit depth gray sample
    y: u16,
  },
  /// The one RGB sample value that's fully transparent.
  RGB {
    /// full bit depth samples
    rgb: [u16; 3],
  },
}
impl<'b> tRNS<'b> {
  /// Parses the `tRNS` data for the given color type.
  ///
  /// Gives `Ok(None)` for color types that already have an alpha channel,
  /// those images aren't allowed a `tRNS` chunk and it's ignored.
  pub fn parse(data: &'b [u8], color_type: PngColorType) -> PngResult<Option<Self>> {
    Ok(Some(match color_type {
      PngColorType::Index => Self::Index { alphas: data },
      PngColorType::Y => match *data {
        [y0, y1] => Self::Y { y: U16BE([y0, y1]).to_u16() },
        _ => return Err(PngError::MalformedTransparency),
      },
      PngColorType::RGB => match *data {
        [r0, r1, g0, g1, b0, b1] => Self::RGB {
          rgb: [U16BE([r0, r1]).to_u16(), U16BE([g0, g1]).to_u16(), U16BE([b0, b1]).to_u16()],
        },
        _ => return Err(PngError::MalformedTransparency),
      },
      PngColorType::YA | PngColorType::RGBA => {
        log::warn!("ignoring tRNS chunk on a color type with alpha");
        return Ok(None);
      }
    }))
  }

  /// The per-index alphas, if this is for an indexed image.
  #[inline]
  #[must_use]
  pub const fn alphas(&self) -> Option<&'b [u8]> {
    match self {
      Self::Index { alphas } => Some(*alphas),
      _ => None,
    }
  }

  /// The transparent color key, if this is for a gray or RGB image.
  ///
  /// Gray keys are given as `[y, y, y]`.
  #[inline]
  #[must_use]
  pub const fn color_key(&self) -> Option<[u16; 3]> {
    match self {
      Self::Y { y } => Some([*y, *y, *y]),
      Self::RGB { rgb } => Some(*rgb),
      Self::Index { .. } => None,
    }
  }
}

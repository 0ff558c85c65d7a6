#![forbid(unsafe_code)]

//! Provides the heap-allocated [`Image`] type.

use alloc::vec::Vec;

use crate::{
  png::*,
  pixel_formats::{RGB8, RGBA8},
  Limits, PngError, PngResult,
};

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// index.
///
/// You don't ever need to call this function yourself, but it's how the image
/// converts 2d coordinates into index values within its pixel vector.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y as usize) * (width as usize) + (x as usize)
}

/// A decoded (or ready to encode) PNG image.
///
/// The pixels are always `RGBA8`, row-major, starting at the top left. The
/// color type is what the image was decoded from, or what it will be encoded
/// as. The bit depth is what the image was decoded from, but since the grid
/// only holds 8 bits per channel it's always encoded at bit depth 8.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Image {
  width: u32,
  height: u32,
  bit_depth: u8,
  color_type: PngColorType,
  is_interlaced: bool,
  palette: Option<Vec<RGBA8>>,
  color_key: Option<RGB8>,
  pixels: Vec<RGBA8>,
}

impl Image {
  /// Makes a new image with every pixel zeroed.
  ///
  /// An indexed color image starts with an empty palette, set one with
  /// [`set_palette`](Self::set_palette) before saving.
  ///
  /// ## Failure
  /// * A zero width or height.
  /// * A bit depth that's illegal for the color type.
  /// * A bit depth other than 8, or `is_interlaced`, which this crate can't
  ///   encode.
  /// * The default [`Limits`] are exceeded, or allocation fails.
  pub fn create(
    width: u32, height: u32, bit_depth: u8, color_type: PngColorType, is_interlaced: bool,
  ) -> PngResult<Self> {
    if width == 0 || height == 0 {
      return Err(PngError::ImageDimensionsTooSmall);
    }
    if !color_type.allows_bit_depth(bit_depth) {
      return Err(PngError::IllegalColorTypeBitDepthCombination);
    }
    if bit_depth != 8 {
      return Err(PngError::UnsupportedBitDepth);
    }
    if is_interlaced {
      return Err(PngError::InterlaceNotSupported);
    }
    let header = IHDR { width, height, bit_depth, color_type, is_interlaced };
    let sizes = Limits::default().check(&header)?;
    let pixels = alloc_pixels(sizes.pixel_count)?;
    let palette = if color_type.uses_palette() { Some(Vec::new()) } else { None };
    Ok(Self {
      width,
      height,
      bit_depth,
      color_type,
      is_interlaced,
      palette,
      color_key: None,
      pixels,
    })
  }

  /// Decodes PNG bytes with the default [`Limits`].
  ///
  /// See [`load_with_limits`](Self::load_with_limits).
  #[inline]
  pub fn load(bytes: &[u8]) -> PngResult<Self> {
    Self::load_with_limits(bytes, Limits::default())
  }

  /// Decodes PNG bytes.
  ///
  /// ## Failure
  /// Any structural problem with the data is an error, there's no partial
  /// decoding. Errors include, but are not limited to:
  /// * [`MalformedSignature`](PngError::MalformedSignature)
  /// * [`MissingOrDuplicateIHDR`](PngError::MissingOrDuplicateIHDR)
  /// * [`MissingRequiredPalette`](PngError::MissingRequiredPalette)
  /// * [`ChunkCrcMismatch`](PngError::ChunkCrcMismatch)
  /// * [`DecompressedLengthMismatch`](PngError::DecompressedLengthMismatch)
  /// * [`PaletteIndexOutOfRange`](PngError::PaletteIndexOutOfRange)
  /// * [`AllocationLimitExceeded`](PngError::AllocationLimitExceeded)
  pub fn load_with_limits(bytes: &[u8], limits: Limits) -> PngResult<Self> {
    let mut chunks = png_walk_chunks(bytes);
    let first = chunks.next().ok_or(PngError::UnexpectedEndOfInput)??;
    if first.chunk_type() != PngChunkType::IHDR {
      return Err(PngError::MissingOrDuplicateIHDR);
    }
    let header = IHDR::try_from(first.data())?;
    log::debug!("{header:?}");
    header.check_decodable()?;
    let sizes = limits.check(&header)?;

    let mut plte: Option<PLTE<'_>> = None;
    let mut trns_data: Option<&[u8]> = None;
    let mut idat: Vec<&[u8]> = Vec::new();
    for chunk in chunks {
      let chunk = chunk?;
      match chunk.chunk_type() {
        PngChunkType::IHDR => return Err(PngError::MissingOrDuplicateIHDR),
        PngChunkType::PLTE => {
          if !header.color_type.uses_palette() {
            log::warn!("ignoring PLTE chunk on a {:?} image", header.color_type);
          } else if !idat.is_empty() {
            log::debug!("PLTE chunk after image data");
            return Err(PngError::MissingRequiredPalette);
          } else if plte.is_some() {
            return Err(PngError::MalformedPalette);
          } else {
            plte = Some(PLTE::try_from(chunk.data())?);
          }
        }
        PngChunkType::tRNS => {
          if !idat.is_empty() {
            log::warn!("ignoring tRNS chunk after image data");
          } else if trns_data.is_some() {
            log::warn!("ignoring duplicate tRNS chunk");
          } else {
            trns_data = Some(chunk.data());
          }
        }
        PngChunkType::IDAT => {
          idat.try_reserve(1)?;
          idat.push(chunk.data());
        }
        PngChunkType::IEND => (),
        other if other.is_critical() && !other.is_recognized() => {
          log::warn!("ignoring unknown critical chunk {other:?}");
        }
        other => log::trace!("skipping {other:?} chunk"),
      }
    }
    if idat.is_empty() {
      return Err(PngError::MissingImageData);
    }

    let trns = match trns_data {
      Some(data) => tRNS::parse(data, header.color_type)?,
      None => None,
    };
    let palette = if header.color_type.uses_palette() {
      let plte = plte.ok_or(PngError::MissingRequiredPalette)?;
      Some(plte.to_rgba_table(trns.and_then(|t| t.alphas()))?)
    } else {
      None
    };
    let expander = PixelExpander {
      palette: palette.as_deref().unwrap_or(&[]),
      color_key: trns.and_then(|t| t.color_key()),
    };

    let mut zlib_buffer = inflate_image_data(idat.iter().copied(), sizes.decompressed_bytes)?;
    let mut pixels = alloc_pixels(sizes.pixel_count)?;
    unfilter_decompressed_data(header, &mut zlib_buffer, |x, y, data| {
      let rgba = expander.expand_pixel(&header, data)?;
      if let Some(p) = pixels.get_mut(xy_width_to_index(x, y, header.width)) {
        *p = rgba;
      }
      Ok(())
    })?;
    let color_key = expander.color_key.and_then(|key| narrow_color_key(key, header.bit_depth));

    Ok(Self {
      width: header.width,
      height: header.height,
      bit_depth: header.bit_depth,
      color_type: header.color_type,
      is_interlaced: header.is_interlaced,
      palette,
      color_key,
      pixels,
    })
  }

  /// Encodes the image as PNG bytes.
  ///
  /// The output has the signature, `IHDR`, `PLTE` (and `tRNS` if any palette
  /// entry isn't opaque) for indexed images, `tRNS` for gray or RGB images
  /// with a [color key](Self::color_key), the `IDAT` data, and `IEND`. Every
  /// scanline uses filter type None, and the bit depth is always 8.
  ///
  /// The image data is split over more than one `IDAT` only when it's longer
  /// than [`PNG_MAX_CHUNK_LEN`].
  ///
  /// Each pixel's channels are written as the image's color type says:
  /// * Gray types write the red channel as the gray sample.
  /// * Types without alpha don't write the alpha channel. Pixels are only
  ///   transparent after a reload if they match the color key.
  /// * Indexed images write the index of the palette entry equal to the pixel.
  ///
  /// ## Failure
  /// * [`PixelNotInPalette`](PngError::PixelNotInPalette) if an indexed image
  ///   has a pixel that isn't in its palette.
  /// * [`MissingRequiredPalette`](PngError::MissingRequiredPalette) if an
  ///   indexed image has an empty palette.
  /// * Allocation failure.
  pub fn save(&self) -> PngResult<Vec<u8>> {
    let header = IHDR { bit_depth: 8, ..self.header() };
    let palette: &[RGBA8] = self.palette.as_deref().unwrap_or(&[]);
    if self.color_type.uses_palette() && palette.is_empty() {
      return Err(PngError::MissingRequiredPalette);
    }

    let mut filtered: Vec<u8> = Vec::new();
    filtered.try_reserve(header.zlib_decompression_requirement()?)?;
    for row in self.pixels.chunks_exact(self.width as usize) {
      filtered.push(FilterType::None as u8);
      for p in row {
        match self.color_type {
          PngColorType::Y => filtered.push(p.r),
          PngColorType::YA => filtered.extend_from_slice(&[p.r, p.a]),
          PngColorType::RGB => filtered.extend_from_slice(&[p.r, p.g, p.b]),
          PngColorType::RGBA => filtered.extend_from_slice(&[p.r, p.g, p.b, p.a]),
          PngColorType::Index => {
            let i = palette.iter().position(|entry| entry == p).ok_or(PngError::PixelNotInPalette)?;
            filtered.push(i as u8);
          }
        }
      }
    }
    let compressed = compress_scanlines(&filtered);
    log::debug!("deflated {} bytes to {}", filtered.len(), compressed.len());

    let mut out: Vec<u8> = Vec::new();
    out.try_reserve(PNG_SIGNATURE.len() + 12 + IHDR::DATA_LEN + 12 + compressed.len() + 12)?;
    out.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut out, PngChunkType::IHDR, &header.to_bytes())?;
    if self.color_type.uses_palette() {
      let rgb: Vec<RGB8> = palette.iter().map(|p| RGB8 { r: p.r, g: p.g, b: p.b }).collect();
      write_chunk(&mut out, PngChunkType::PLTE, bytemuck::cast_slice(rgb.as_slice()))?;
      // trailing opaque entries can be left off
      if let Some(last) = palette.iter().rposition(|p| p.a != 255) {
        let alphas: Vec<u8> = palette[..=last].iter().map(|p| p.a).collect();
        write_chunk(&mut out, PngChunkType::tRNS, &alphas)?;
      }
    }
    match (self.color_type, self.color_key) {
      (PngColorType::Y, Some(key)) => write_chunk(&mut out, PngChunkType::tRNS, &[0, key.r])?,
      (PngColorType::RGB, Some(RGB8 { r, g, b })) => {
        write_chunk(&mut out, PngChunkType::tRNS, &[0, r, 0, g, 0, b])?
      }
      _ => (),
    }
    write_idat_chunks(&mut out, &compressed, PNG_MAX_CHUNK_LEN as usize)?;
    write_chunk(&mut out, PngChunkType::IEND, &[])?;
    Ok(out)
  }

  /// Frees the image's buffers.
  ///
  /// This is the same as dropping the image. Because it takes the image by
  /// value, releasing the same image twice isn't possible.
  #[inline]
  pub fn release(self) {
    log::trace!("releasing {}x{} image", self.width, self.height);
    drop(self);
  }

  /// The header that describes this image.
  #[inline]
  #[must_use]
  pub const fn header(&self) -> IHDR {
    IHDR {
      width: self.width,
      height: self.height,
      bit_depth: self.bit_depth,
      color_type: self.color_type,
      is_interlaced: self.is_interlaced,
    }
  }

  /// Width in pixels.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }

  /// Height in pixels.
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }

  /// Bits per channel.
  #[inline]
  #[must_use]
  pub const fn bit_depth(&self) -> u8 {
    self.bit_depth
  }

  /// The PNG color type.
  #[inline]
  #[must_use]
  pub const fn color_type(&self) -> PngColorType {
    self.color_type
  }

  /// If the source PNG was interlaced. Always `false` right now.
  #[inline]
  #[must_use]
  pub const fn is_interlaced(&self) -> bool {
    self.is_interlaced
  }

  /// The palette, for indexed color images.
  #[inline]
  #[must_use]
  pub fn palette(&self) -> Option<&[RGBA8]> {
    self.palette.as_deref()
  }

  /// Replaces the palette of an indexed color image.
  ///
  /// ## Failure
  /// * [`MalformedPalette`](PngError::MalformedPalette) if the image isn't
  ///   indexed color, or the palette has more than 256 entries.
  pub fn set_palette(&mut self, palette: Vec<RGBA8>) -> PngResult<()> {
    if !self.color_type.uses_palette() || palette.len() > 256 {
      return Err(PngError::MalformedPalette);
    }
    self.palette = Some(palette);
    Ok(())
  }

  /// The transparent color of a gray or RGB image, if it has one.
  ///
  /// Decoding sets pixels of this color to alpha 0, and encoding writes it as
  /// a `tRNS` chunk. A key from a 16-bit image is kept as its high bytes.
  #[inline]
  #[must_use]
  pub const fn color_key(&self) -> Option<RGB8> {
    self.color_key
  }

  /// Sets or clears the transparent color of a gray or RGB image.
  ///
  /// This only changes what [`save`](Self::save) writes, the pixels are left
  /// alone.
  ///
  /// ## Failure
  /// * [`MalformedTransparency`](PngError::MalformedTransparency) if the image
  ///   isn't gray or RGB, or a gray image is given a key that isn't gray.
  pub fn set_color_key(&mut self, color_key: Option<RGB8>) -> PngResult<()> {
    if let Some(RGB8 { r, g, b }) = color_key {
      let gray_ok = r == g && g == b;
      match self.color_type {
        PngColorType::RGB => (),
        PngColorType::Y if gray_ok => (),
        _ => return Err(PngError::MalformedTransparency),
      }
    }
    self.color_key = color_key;
    Ok(())
  }

  /// All of the pixels, row-major.
  #[inline]
  #[must_use]
  pub fn pixels(&self) -> &[RGBA8] {
    &self.pixels
  }

  /// All of the pixels, row-major.
  #[inline]
  #[must_use]
  pub fn pixels_mut(&mut self) -> &mut [RGBA8] {
    &mut self.pixels
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<RGBA8> {
    if x < self.width && y < self.height {
      self.pixels.get(xy_width_to_index(x, y, self.width)).copied()
    } else {
      None
    }
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut RGBA8> {
    if x < self.width && y < self.height {
      self.pixels.get_mut(xy_width_to_index(x, y, self.width))
    } else {
      None
    }
  }
}

/// Brings a `tRNS` color key down to the 8 bits per channel of the grid.
///
/// An 8-bit image's key past 255 can't match any pixel, so it's dropped.
fn narrow_color_key(key: [u16; 3], bit_depth: u8) -> Option<RGB8> {
  let [r, g, b] = if bit_depth == 16 {
    key.map(|k| (k >> 8) as u8)
  } else {
    match key.map(u8::try_from) {
      [Ok(r), Ok(g), Ok(b)] => [r, g, b],
      _ => {
        log::warn!("ignoring out of range color key {key:?}");
        return None;
      }
    }
  };
  Some(RGB8 { r, g, b })
}

fn alloc_pixels(pixel_count: usize) -> PngResult<Vec<RGBA8>> {
  let mut pixels: Vec<RGBA8> = Vec::new();
  pixels.try_reserve(pixel_count)?;
  pixels.resize(pixel_count, RGBA8::ZERO);
  Ok(pixels)
}

use super::*;

use core::fmt::{Debug, Write};

use crate::int_endian::{try_split_off_byte_array, try_split_off_u32_be, U32BE};

/// The largest chunk length a PNG may declare.
pub const PNG_MAX_CHUNK_LEN: u32 = (1 << 31) - 1;

/// The 4 byte type of a PNG chunk.
///
/// The constants cover the chunk types this crate knows about. Any other 4
/// bytes are legal too, they're just "unrecognized".
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngChunkType {
  /// Image header
  pub const IHDR: Self = Self(*b"IHDR");
  /// Palette
  pub const PLTE: Self = Self(*b"PLTE");
  /// Image data
  pub const IDAT: Self = Self(*b"IDAT");
  /// Image end
  pub const IEND: Self = Self(*b"IEND");
  /// Transparency
  pub const tRNS: Self = Self(*b"tRNS");
  /// Standard RGB color space
  pub const sRGB: Self = Self(*b"sRGB");
  /// Background color
  pub const bKGD: Self = Self(*b"bKGD");
  /// Last modification time
  pub const tIME: Self = Self(*b"tIME");
  /// Gamma
  pub const gAMA: Self = Self(*b"gAMA");

  /// If this is one of the chunk types with a constant above.
  #[inline]
  #[must_use]
  pub fn is_recognized(self) -> bool {
    [
      Self::IHDR,
      Self::PLTE,
      Self::IDAT,
      Self::IEND,
      Self::tRNS,
      Self::sRGB,
      Self::bKGD,
      Self::tIME,
      Self::gAMA,
    ]
    .contains(&self)
  }

  /// Critical chunks have an uppercase first letter.
  ///
  /// A decoder that doesn't understand a critical chunk can't be sure it
  /// decoded the image correctly.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    (self.0[0] & 0b0010_0000) == 0
  }
}
impl Debug for PngChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char(self.0[0] as char)?;
    f.write_char(self.0[1] as char)?;
    f.write_char(self.0[2] as char)?;
    f.write_char(self.0[3] as char)?;
    Ok(())
  }
}

/// An unparsed chunk from a PNG.
///
/// This is a view into the PNG bytes, it doesn't own any data.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PngRawChunk<'b> {
  pub(crate) offset: usize,
  pub(crate) chunk_type: PngChunkType,
  pub(crate) data: &'b [u8],
  pub(crate) declared_crc: u32,
}
impl Debug for PngRawChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngRawChunk")
      .field("offset", &self.offset)
      .field("chunk_type", &self.chunk_type)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
impl<'b> PngRawChunk<'b> {
  /// Byte offset of this chunk's length field within the full PNG bytes.
  #[inline]
  #[must_use]
  pub const fn offset(&self) -> usize {
    self.offset
  }
  /// The chunk's type.
  #[inline]
  #[must_use]
  pub const fn chunk_type(&self) -> PngChunkType {
    self.chunk_type
  }
  /// The chunk's data bytes. The declared length is `data().len()`.
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }
  /// The CRC value stored after the data.
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
  /// Computes the CRC of the chunk type and data.
  #[inline]
  #[must_use]
  pub fn compute_actual_crc(&self) -> u32 {
    png_crc(self.chunk_type.0.iter().copied().chain(self.data.iter().copied()))
  }
  /// If the declared CRC matches the actual CRC.
  #[inline]
  #[must_use]
  pub fn crc_is_valid(&self) -> bool {
    self.declared_crc == self.compute_actual_crc()
  }
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// Chunks are framed by their declared lengths, so bytes within one chunk's
/// data are never mistaken for the start of another chunk.
///
/// This is the forgiving iterator: it doesn't check the signature or CRCs,
/// and it just stops when the bytes can't hold another full chunk. It never
/// panics, even on random data. Use [`png_walk_chunks`] for the strict
/// version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PngRawChunkIter<'b> {
  spare: &'b [u8],
  offset: usize,
}
impl<'b> PngRawChunkIter<'b> {
  /// Pass the full PNG bytes, it will remove the PNG signature automatically.
  #[inline]
  pub const fn new(bytes: &'b [u8]) -> Self {
    match bytes {
      [_, _, _, _, _, _, _, _, rest @ ..] => Self { spare: rest, offset: 8 },
      _ => Self { spare: &[], offset: bytes.len() },
    }
  }

  /// Bytes that haven't been turned into chunks yet.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> &'b [u8] {
    self.spare
  }

  fn next_framed(&mut self) -> Result<PngRawChunk<'b>, PngError> {
    let (chunk_len, rest) =
      try_split_off_u32_be(self.spare).ok_or(PngError::UnexpectedEndOfInput)?;
    if chunk_len > PNG_MAX_CHUNK_LEN {
      return Err(PngError::ChunkTooLong);
    }
    let (type_bytes, rest) =
      try_split_off_byte_array::<4>(rest).ok_or(PngError::UnexpectedEndOfInput)?;
    let data_len = chunk_len as usize;
    if rest.len() < data_len {
      return Err(PngError::UnexpectedEndOfInput);
    }
    let (data, rest) = rest.split_at(data_len);
    let (declared_crc, rest) = try_split_off_u32_be(rest).ok_or(PngError::UnexpectedEndOfInput)?;
    let chunk =
      PngRawChunk { offset: self.offset, chunk_type: PngChunkType(type_bytes), data, declared_crc };
    self.offset += 12 + data_len;
    self.spare = rest;
    Ok(chunk)
  }
}
impl<'b> Iterator for PngRawChunkIter<'b> {
  type Item = PngRawChunk<'b>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    match self.next_framed() {
      Ok(chunk) => Some(chunk),
      Err(_) => {
        self.spare = &[];
        None
      }
    }
  }
}

/// A chunk iterator that checks everything.
///
/// * The first item is an error if the signature is wrong.
/// * Each chunk's CRC is checked.
/// * The stream must end with an `IEND` chunk. Running out of bytes before
///   that is an error.
///
/// After an error or after the `IEND` chunk, the iterator is finished.
#[derive(Debug, Clone)]
pub struct PngChunkWalker<'b> {
  raw: PngRawChunkIter<'b>,
  signature_ok: bool,
  done: bool,
}
impl<'b> Iterator for PngChunkWalker<'b> {
  type Item = PngResult<PngRawChunk<'b>>;
  fn next(&mut self) -> Option<Self::Item> {
    if self.done {
      return None;
    }
    if !self.signature_ok {
      self.done = true;
      return Some(Err(PngError::MalformedSignature));
    }
    let chunk = match self.raw.next_framed() {
      Ok(chunk) => chunk,
      Err(e) => {
        self.done = true;
        return Some(Err(e));
      }
    };
    log::trace!(
      "chunk {:?} at offset {}, {} bytes",
      chunk.chunk_type,
      chunk.offset,
      chunk.data.len()
    );
    if !chunk.crc_is_valid() {
      log::debug!(
        "chunk {:?} declared crc {:08X}, actual {:08X}",
        chunk.chunk_type,
        chunk.declared_crc,
        chunk.compute_actual_crc()
      );
      self.done = true;
      return Some(Err(PngError::ChunkCrcMismatch));
    }
    if chunk.chunk_type == PngChunkType::IEND {
      self.done = true;
      if !self.raw.remaining().is_empty() {
        log::warn!("ignoring {} bytes after IEND", self.raw.remaining().len());
      }
    }
    Some(Ok(chunk))
  }
}

/// Walks the chunks of full PNG bytes, checking the signature and every CRC.
#[inline]
#[must_use]
pub fn png_walk_chunks(bytes: &[u8]) -> PngChunkWalker<'_> {
  PngChunkWalker {
    raw: PngRawChunkIter::new(bytes),
    signature_ok: is_png_header_correct(bytes),
    done: false,
  }
}

/// Finds the first chunk of the given type at or after byte offset `start`.
///
/// The search walks the chunks by their declared lengths, only chunks that
/// *begin* at or after `start` are considered. Gives the chunk's byte offset
/// within `bytes`, or `None` if there's no such chunk.
#[must_use]
pub fn png_find_chunk(bytes: &[u8], chunk_type: PngChunkType, start: usize) -> Option<usize> {
  PngRawChunkIter::new(bytes)
    .filter(|chunk| chunk.offset >= start)
    .find(|chunk| chunk.chunk_type == chunk_type)
    .map(|chunk| chunk.offset)
}

/// Appends a full chunk (length, type, data, CRC) to the output.
///
/// ## Failure
/// * The data is longer than [`PNG_MAX_CHUNK_LEN`].
/// * Allocation failure.
#[cfg(feature = "alloc")]
pub fn write_chunk(
  out: &mut alloc::vec::Vec<u8>, chunk_type: PngChunkType, data: &[u8],
) -> PngResult<()> {
  let len = u32::try_from(data.len()).map_err(|_| PngError::ChunkTooLong)?;
  if len > PNG_MAX_CHUNK_LEN {
    return Err(PngError::ChunkTooLong);
  }
  out.try_reserve(12 + data.len())?;
  out.extend_from_slice(&U32BE::from_u32(len).0);
  out.extend_from_slice(&chunk_type.0);
  out.extend_from_slice(data);
  let crc = png_crc(chunk_type.0.iter().copied().chain(data.iter().copied()));
  out.extend_from_slice(&U32BE::from_u32(crc).0);
  Ok(())
}

//! Module for pixel formats.
//!
//! The decoded pixel grid is always [`RGBA8`], no matter what format the PNG
//! stored. Palette entries are stored as [`RGB8`] in the `PLTE` chunk.

use bytemuck::{Pod, Zeroable};

/// An 8-bits per channel RGB pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
#[allow(missing_docs)]
pub struct RGB8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

/// An 8-bits per channel RGBA pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
#[allow(missing_docs)]
pub struct RGBA8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}
impl RGBA8 {
  /// All channels zero.
  pub const ZERO: Self = Self { r: 0, g: 0, b: 0, a: 0 };

  /// Makes a pixel from each channel.
  #[inline]
  #[must_use]
  pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// A gray pixel, the same value in all three color channels.
  #[inline]
  #[must_use]
  pub const fn gray(y: u8, a: u8) -> Self {
    Self { r: y, g: y, b: y, a }
  }
}
impl From<RGB8> for RGBA8 {
  /// Alpha defaults to fully opaque.
  #[inline]
  fn from(RGB8 { r, g, b }: RGB8) -> Self {
    Self { r, g, b, a: 255 }
  }
}
impl From<[u8; 4]> for RGBA8 {
  #[inline]
  fn from([r, g, b, a]: [u8; 4]) -> Self {
    Self { r, g, b, a }
  }
}
impl From<RGBA8> for [u8; 4] {
  #[inline]
  fn from(RGBA8 { r, g, b, a }: RGBA8) -> Self {
    [r, g, b, a]
  }
}

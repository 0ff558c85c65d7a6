//! Big-endian integer primitives.
//!
//! PNG stores every multi-byte integer in network byte order.

use bytemuck::{Pod, Zeroable};

/// A `u16` stored as big-endian bytes.
///
/// This stores only an array of bytes, so unlike a normal `u16` it has an
/// alignment of 1.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct U16BE(pub [u8; 2]);
impl U16BE {
  /// Convert this value to a native `u16`
  #[inline]
  #[must_use]
  pub const fn to_u16(self) -> u16 {
    u16::from_be_bytes(self.0)
  }
  /// Make a value from a native `u16`
  #[inline]
  #[must_use]
  pub const fn from_u16(u: u16) -> Self {
    Self(u.to_be_bytes())
  }
}
impl core::fmt::Debug for U16BE {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("U16BE").field(&self.to_u16()).finish()
  }
}

/// A `u32` stored as big-endian bytes.
///
/// This stores only an array of bytes, so unlike a normal `u32` it has an
/// alignment of 1.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct U32BE(pub [u8; 4]);
impl U32BE {
  /// Convert this value to a native `u32`
  #[inline]
  #[must_use]
  pub const fn to_u32(self) -> u32 {
    u32::from_be_bytes(self.0)
  }
  /// Make a value from a native `u32`
  #[inline]
  #[must_use]
  pub const fn from_u32(u: u32) -> Self {
    Self(u.to_be_bytes())
  }
}
impl core::fmt::Debug for U32BE {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("U32BE").field(&self.to_u32()).finish()
  }
}
impl From<u32> for U32BE {
  #[inline]
  fn from(value: u32) -> Self {
    Self::from_u32(value)
  }
}
impl From<U32BE> for u32 {
  #[inline]
  fn from(value: U32BE) -> Self {
    value.to_u32()
  }
}

/// Splits `N` bytes off the front of the slice, if there's enough bytes.
#[inline]
pub(crate) fn try_split_off_byte_array<const N: usize>(bytes: &[u8]) -> Option<([u8; N], &[u8])> {
  let head: [u8; N] = bytes.get(..N)?.try_into().ok()?;
  Some((head, &bytes[N..]))
}

/// Splits a big-endian `u32` off the front of the slice.
#[inline]
pub(crate) fn try_split_off_u32_be(bytes: &[u8]) -> Option<(u32, &[u8])> {
  let (a, rest) = try_split_off_byte_array::<4>(bytes)?;
  Some((U32BE(a).to_u32(), rest))
}

#[test]
fn test_u32be_byte_order() {
  assert_eq!(U32BE::from_u32(0x0102_0304).0, [1, 2, 3, 4]);
  assert_eq!(U32BE([0, 0, 0, 13]).to_u32(), 13);
  assert_eq!(U16BE([0xAB, 0xCD]).to_u16(), 0xABCD);
  assert_eq!(try_split_off_u32_be(&[0, 0, 1, 0, 9]), Some((256, &[9_u8][..])));
  assert_eq!(try_split_off_u32_be(&[0, 0, 1]), None);
}

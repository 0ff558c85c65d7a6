#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]

//! A small PNG codec.
//!
//! PNG data is parsed into an [`Image`] holding an `RGBA8` pixel grid, and an
//! [`Image`] can be serialized back into PNG bytes.
//!
//! * The [`png`] module has the lower level pieces: the chunk container, the
//!   header and color model, palettes, the compression bridge, and the
//!   scanline filter engine. These work without an allocator.
//! * The [`Image`] type glues those pieces together. It requires the `alloc`
//!   and `miniz_oxide` features (both on by default).
//!
//! ```no_run
//! # #[cfg(all(feature = "alloc", feature = "miniz_oxide"))]
//! # fn demo(bytes: &[u8]) -> pngrgba::PngResult<()> {
//! let image = pngrgba::Image::load(bytes)?;
//! let round_trip: Vec<u8> = image.save()?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

pub mod int_endian;

pub mod pixel_formats;
pub use pixel_formats::*;

mod limits;
pub use limits::*;

pub mod png;

#[cfg(all(feature = "alloc", feature = "miniz_oxide"))]
mod image;
#[cfg(all(feature = "alloc", feature = "miniz_oxide"))]
pub use image::*;

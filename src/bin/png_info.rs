//! Prints the chunks and header of a PNG file.
//!
//! ```txt
//! png_info <in.png> [out.png]
//! ```
//!
//! If an output path is given the image is also decoded and saved back out.

use pngrgba::{png::*, Image};

use std::{path::Path, process::ExitCode};

const fn chunk_type_label(chunk_type: PngChunkType) -> &'static str {
  match &chunk_type.0 {
    b"IHDR" => "image header",
    b"PLTE" => "palette",
    b"IDAT" => "image data",
    b"IEND" => "image end",
    b"tRNS" => "transparency",
    b"sRGB" => "standard RGB color space",
    b"bKGD" => "background color",
    b"tIME" => "last modification time",
    b"gAMA" => "gamma",
    _ => "unknown",
  }
}

const fn color_type_label(color_type: PngColorType) -> &'static str {
  match color_type {
    PngColorType::Y => "grayscale",
    PngColorType::RGB => "truecolor",
    PngColorType::Index => "indexed color",
    PngColorType::YA => "grayscale with alpha",
    PngColorType::RGBA => "truecolor with alpha",
  }
}

fn main() -> ExitCode {
  let args: Vec<String> = std::env::args().skip(1).collect();
  let (input, output) = match args.as_slice() {
    [input] => (input, None),
    [input, output] => (input, Some(output)),
    _ => {
      eprintln!("usage: png_info <in.png> [out.png]");
      return ExitCode::FAILURE;
    }
  };
  let bytes = match std::fs::read(input) {
    Ok(bytes) => bytes,
    Err(e) => {
      eprintln!("{input}: {e}");
      return ExitCode::FAILURE;
    }
  };
  print_chunks(&bytes);
  if let Some(output) = output {
    if let Err(e) = re_encode(&bytes, Path::new(output)) {
      eprintln!("{output}: {e}");
      return ExitCode::FAILURE;
    }
    println!("wrote {output}");
  }
  ExitCode::SUCCESS
}

fn print_chunks(bytes: &[u8]) {
  if !is_png_header_correct(bytes) {
    println!("signature: bad");
  }
  let mut it = PngRawChunkIter::new(bytes);
  let mut left_over = it.remaining();
  while let Some(chunk) = it.next() {
    let crc = if chunk.crc_is_valid() { "ok" } else { "BAD" };
    println!(
      "{:>8}: {:?} ({}), {} bytes, crc {crc}",
      chunk.offset(),
      chunk.chunk_type(),
      chunk_type_label(chunk.chunk_type()),
      chunk.data().len()
    );
    if chunk.chunk_type() == PngChunkType::IHDR {
      match IHDR::try_from(chunk.data()) {
        Ok(ihdr) => println!(
          "          {}x{}, {} bit {}{}",
          ihdr.width,
          ihdr.height,
          ihdr.bit_depth,
          color_type_label(ihdr.color_type),
          if ihdr.is_interlaced { ", interlaced" } else { "" }
        ),
        Err(e) => println!("          {e}"),
      }
    }
    left_over = it.remaining();
  }
  if !left_over.is_empty() {
    println!("{} bytes left over", left_over.len());
  }
}

fn re_encode(bytes: &[u8], output: &Path) -> Result<(), Box<dyn std::error::Error>> {
  let image = Image::load(bytes)?;
  let png = image.save()?;
  image.release();
  std::fs::write(output, png)?;
  Ok(())
}

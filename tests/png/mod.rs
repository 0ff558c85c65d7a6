use pngrgba::{png::*, Image, Limits, PngError, RGB8, RGBA8};

fn header(width: u32, height: u32, color_type: PngColorType) -> IHDR {
  IHDR { width, height, bit_depth: 8, color_type, is_interlaced: false }
}

/// Builds a PNG with the `extra` chunks between `IHDR` and a single `IDAT`
/// holding `scanlines` (filter bytes included).
fn build_png(header: IHDR, extra: &[(PngChunkType, &[u8])], scanlines: &[u8]) -> Vec<u8> {
  let mut out = PNG_SIGNATURE.to_vec();
  write_chunk(&mut out, PngChunkType::IHDR, &header.to_bytes()).unwrap();
  for (chunk_type, data) in extra {
    write_chunk(&mut out, *chunk_type, data).unwrap();
  }
  write_chunk(&mut out, PngChunkType::IDAT, &compress_scanlines(scanlines)).unwrap();
  write_chunk(&mut out, PngChunkType::IEND, &[]).unwrap();
  out
}

fn find_chunk_data(png: &[u8], chunk_type: PngChunkType) -> Option<&[u8]> {
  PngRawChunkIter::new(png).find(|c| c.chunk_type() == chunk_type).map(|c| c.data())
}

fn checkerboard(image: &mut Image, colors: &[RGBA8]) {
  let width = image.width();
  for (i, p) in image.pixels_mut().iter_mut().enumerate() {
    let (x, y) = (i as u32 % width, i as u32 / width);
    *p = colors[((x + y * 3) as usize) % colors.len()];
  }
}

#[test]
fn test_round_trip_each_color_type() {
  let rgba = [
    RGBA8::new(255, 0, 0, 255),
    RGBA8::new(0, 200, 0, 100),
    RGBA8::new(0, 0, 7, 0),
    RGBA8::new(40, 50, 60, 70),
  ];
  let cases: [(PngColorType, fn(RGBA8) -> RGBA8); 4] = [
    (PngColorType::Y, |p| RGBA8::gray(p.r, 255)),
    (PngColorType::YA, |p| RGBA8::gray(p.r, p.a)),
    (PngColorType::RGB, |p| RGBA8 { a: 255, ..p }),
    (PngColorType::RGBA, |p| p),
  ];
  for (color_type, as_stored) in cases {
    let colors = rgba.map(as_stored);
    let mut image = Image::create(5, 3, 8, color_type, false).unwrap();
    checkerboard(&mut image, &colors);
    let png = image.save().unwrap();
    assert!(is_png_header_correct(&png));
    let loaded = Image::load(&png).unwrap();
    assert_eq!(loaded.header(), header(5, 3, color_type));
    assert_eq!(loaded.pixels(), image.pixels(), "{color_type:?}");
    assert_eq!(loaded.palette(), None);
    assert_eq!(loaded, image);
  }
}

#[test]
fn test_round_trip_indexed() {
  let palette = vec![
    RGBA8::new(255, 0, 0, 255),
    RGBA8::new(0, 255, 0, 0),
    RGBA8::new(0, 0, 255, 255),
  ];
  let mut image = Image::create(4, 4, 8, PngColorType::Index, false).unwrap();
  image.set_palette(palette.clone()).unwrap();
  checkerboard(&mut image, &palette);
  let png = image.save().unwrap();

  let plte = find_chunk_data(&png, PngChunkType::PLTE).unwrap();
  assert_eq!(plte, [255, 0, 0, 0, 255, 0, 0, 0, 255]);
  // the opaque last entry is left off
  assert_eq!(find_chunk_data(&png, PngChunkType::tRNS), Some(&[255, 0][..]));

  let loaded = Image::load(&png).unwrap();
  assert_eq!(loaded.color_type(), PngColorType::Index);
  assert_eq!(loaded.palette(), Some(palette.as_slice()));
  assert_eq!(loaded.pixels(), image.pixels());
  assert_eq!(loaded.get(1, 0), Some(palette[1]));
  assert_eq!(loaded.get(4, 0), None);
}

#[test]
fn test_opaque_palette_writes_no_trns() {
  let palette = vec![RGBA8::new(1, 2, 3, 255), RGBA8::new(4, 5, 6, 255)];
  let mut image = Image::create(2, 1, 8, PngColorType::Index, false).unwrap();
  image.set_palette(palette.clone()).unwrap();
  *image.get_mut(0, 0).unwrap() = palette[1];
  *image.get_mut(1, 0).unwrap() = palette[0];
  let png = image.save().unwrap();
  assert_eq!(find_chunk_data(&png, PngChunkType::tRNS), None);
  assert_eq!(Image::load(&png).unwrap().pixels(), [palette[1], palette[0]]);
}

#[test]
fn test_one_pixel_truecolor() {
  let png = build_png(header(1, 1, PngColorType::RGB), &[], &[0, 10, 20, 30]);
  let image = Image::load(&png).unwrap();
  assert_eq!((image.width(), image.height()), (1, 1));
  assert_eq!(image.pixels(), [RGBA8::new(10, 20, 30, 255)]);
}

#[test]
fn test_two_pixel_gray_sub_filter() {
  let png = build_png(header(2, 1, PngColorType::Y), &[], &[1, 5, 9]);
  let image = Image::load(&png).unwrap();
  assert_eq!(image.pixels(), [RGBA8::new(5, 5, 5, 255), RGBA8::new(14, 14, 14, 255)]);
}

#[test]
fn test_paeth_and_average_lines() {
  // 10 200
  // 50  30
  let png = build_png(header(2, 2, PngColorType::Y), &[], &[3, 10, 195, 4, 40, 86]);
  let image = Image::load(&png).unwrap();
  assert_eq!(image.pixels().iter().map(|p| p.r).collect::<Vec<_>>(), [10, 200, 50, 30]);
}

#[test]
fn test_image_data_split_across_idat_chunks() {
  let compressed = compress_scanlines(&[0, 1, 2, 3, 4, 5, 6, 0, 7, 8, 9, 10, 11, 12]);
  let (first, second) = compressed.split_at(compressed.len() / 2);
  let mut png = PNG_SIGNATURE.to_vec();
  write_chunk(&mut png, PngChunkType::IHDR, &header(2, 2, PngColorType::RGB).to_bytes()).unwrap();
  write_chunk(&mut png, PngChunkType::IDAT, first).unwrap();
  write_chunk(&mut png, PngChunkType(*b"tEXt"), b"between").unwrap();
  write_chunk(&mut png, PngChunkType::IDAT, second).unwrap();
  write_chunk(&mut png, PngChunkType::IEND, &[]).unwrap();
  assert_eq!(png_get_idat(&png).count(), 2);
  let image = Image::load(&png).unwrap();
  assert_eq!(image.get(1, 1), Some(RGBA8::new(10, 11, 12, 255)));
}

#[test]
fn test_transparency_color_keys() {
  let trns: &[u8] = &[0, 1, 0, 2, 0, 3];
  let png = build_png(
    header(2, 1, PngColorType::RGB),
    &[(PngChunkType::tRNS, trns)],
    &[0, 1, 2, 3, 1, 2, 4],
  );
  let image = Image::load(&png).unwrap();
  assert_eq!(image.pixels(), [RGBA8::new(1, 2, 3, 0), RGBA8::new(1, 2, 4, 255)]);

  let trns: &[u8] = &[0, 9];
  let png = build_png(header(2, 1, PngColorType::Y), &[(PngChunkType::tRNS, trns)], &[0, 9, 10]);
  let image = Image::load(&png).unwrap();
  assert_eq!(image.pixels(), [RGBA8::gray(9, 0), RGBA8::gray(10, 255)]);

  let bad: &[u8] = &[0, 9, 0];
  let png = build_png(header(2, 1, PngColorType::Y), &[(PngChunkType::tRNS, bad)], &[0, 9, 10]);
  assert_eq!(Image::load(&png), Err(PngError::MalformedTransparency));
}

#[test]
fn test_sixteen_bit_keeps_high_byte() {
  let ihdr = IHDR { bit_depth: 16, ..header(1, 1, PngColorType::RGB) };
  let png = build_png(ihdr, &[], &[0, 0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC]);
  let image = Image::load(&png).unwrap();
  assert_eq!(image.bit_depth(), 16);
  assert_eq!(image.pixels(), [RGBA8::new(0x12, 0x56, 0x9A, 255)]);
}

#[test]
fn test_flipped_byte_is_crc_mismatch() {
  let mut image = Image::create(3, 3, 8, PngColorType::RGBA, false).unwrap();
  checkerboard(&mut image, &[RGBA8::new(1, 2, 3, 4), RGBA8::new(5, 6, 7, 8)]);
  let png = image.save().unwrap();

  let idat = png_find_chunk(&png, PngChunkType::IDAT, 0).unwrap();
  let mut bad_idat = png.clone();
  bad_idat[idat + 8] ^= 0b0001_0000;
  assert_eq!(Image::load(&bad_idat), Err(PngError::ChunkCrcMismatch));

  // the IHDR width
  let mut bad_ihdr = png.clone();
  bad_ihdr[8 + 8 + 3] ^= 1;
  assert_eq!(Image::load(&bad_ihdr), Err(PngError::ChunkCrcMismatch));
}

#[test]
fn test_palette_index_out_of_range() {
  let plte: &[u8] = &[1, 2, 3, 4, 5, 6];
  let png = build_png(header(2, 1, PngColorType::Index), &[(PngChunkType::PLTE, plte)], &[0, 0, 5]);
  assert_eq!(Image::load(&png), Err(PngError::PaletteIndexOutOfRange));
  let png = build_png(header(2, 1, PngColorType::Index), &[(PngChunkType::PLTE, plte)], &[0, 1, 0]);
  assert!(Image::load(&png).is_ok());
}

#[test]
fn test_palette_errors() {
  let ihdr = header(1, 1, PngColorType::Index);
  let png = build_png(ihdr, &[], &[0, 0]);
  assert_eq!(Image::load(&png), Err(PngError::MissingRequiredPalette));

  let short: &[u8] = &[1, 2, 3, 4];
  let png = build_png(ihdr, &[(PngChunkType::PLTE, short)], &[0, 0]);
  assert_eq!(Image::load(&png), Err(PngError::MalformedPalette));

  let plte: &[u8] = &[1, 2, 3];
  let png = build_png(ihdr, &[(PngChunkType::PLTE, plte), (PngChunkType::PLTE, plte)], &[0, 0]);
  assert_eq!(Image::load(&png), Err(PngError::MalformedPalette));

  let too_many_alphas: &[u8] = &[0, 0];
  let png = build_png(
    ihdr,
    &[(PngChunkType::PLTE, plte), (PngChunkType::tRNS, too_many_alphas)],
    &[0, 0],
  );
  assert_eq!(Image::load(&png), Err(PngError::MalformedTransparency));

  // a palette after the image data is too late
  let mut png = PNG_SIGNATURE.to_vec();
  write_chunk(&mut png, PngChunkType::IHDR, &ihdr.to_bytes()).unwrap();
  write_chunk(&mut png, PngChunkType::IDAT, &compress_scanlines(&[0, 0])).unwrap();
  write_chunk(&mut png, PngChunkType::PLTE, plte).unwrap();
  write_chunk(&mut png, PngChunkType::IEND, &[]).unwrap();
  assert_eq!(Image::load(&png), Err(PngError::MissingRequiredPalette));

  // direct color images don't need one, and ignore one
  let png = build_png(header(1, 1, PngColorType::Y), &[(PngChunkType::PLTE, plte)], &[0, 7]);
  assert_eq!(Image::load(&png).unwrap().pixels(), [RGBA8::gray(7, 255)]);
}

#[test]
fn test_decompressed_length_mismatch() {
  let ihdr = header(1, 1, PngColorType::RGB);
  let short = build_png(ihdr, &[], &[0, 10, 20]);
  assert_eq!(Image::load(&short), Err(PngError::DecompressedLengthMismatch));
  let long = build_png(ihdr, &[], &[0, 10, 20, 30, 40]);
  assert_eq!(Image::load(&long), Err(PngError::DecompressedLengthMismatch));
  let much_longer = build_png(ihdr, &[], &[0; 100]);
  assert_eq!(Image::load(&much_longer), Err(PngError::DecompressedLengthMismatch));
}

#[test]
fn test_corrupt_zlib_stream() {
  let mut png = PNG_SIGNATURE.to_vec();
  write_chunk(&mut png, PngChunkType::IHDR, &header(1, 1, PngColorType::Y).to_bytes()).unwrap();
  write_chunk(&mut png, PngChunkType::IDAT, &[0xFF, 0xFF, 0xFF, 0xFF]).unwrap();
  write_chunk(&mut png, PngChunkType::IEND, &[]).unwrap();
  assert_eq!(Image::load(&png), Err(PngError::CompressionTransformFailure));
}

#[test]
fn test_illegal_filter_type() {
  let png = build_png(header(1, 1, PngColorType::Y), &[], &[9, 0]);
  assert_eq!(Image::load(&png), Err(PngError::IllegalFilterType));
}

#[test]
fn test_structure_errors() {
  let good = build_png(header(1, 1, PngColorType::Y), &[], &[0, 0]);
  assert!(Image::load(&good).is_ok());

  let mut bad_signature = good.clone();
  bad_signature[0] ^= 1;
  assert_eq!(Image::load(&bad_signature), Err(PngError::MalformedSignature));
  assert_eq!(Image::load(&[]), Err(PngError::MalformedSignature));

  assert_eq!(Image::load(&PNG_SIGNATURE), Err(PngError::UnexpectedEndOfInput));
  assert_eq!(Image::load(&good[..good.len() - 4]), Err(PngError::UnexpectedEndOfInput));
  assert_eq!(Image::load(&good[..good.len() - 12]), Err(PngError::UnexpectedEndOfInput));

  let ihdr_bytes: &[u8] = &header(1, 1, PngColorType::Y).to_bytes();
  let duplicate =
    build_png(header(1, 1, PngColorType::Y), &[(PngChunkType::IHDR, ihdr_bytes)], &[0, 0]);
  assert_eq!(Image::load(&duplicate), Err(PngError::MissingOrDuplicateIHDR));

  let mut no_header = PNG_SIGNATURE.to_vec();
  write_chunk(&mut no_header, PngChunkType::IEND, &[]).unwrap();
  assert_eq!(Image::load(&no_header), Err(PngError::MissingOrDuplicateIHDR));

  let mut no_data = PNG_SIGNATURE.to_vec();
  write_chunk(&mut no_data, PngChunkType::IHDR, ihdr_bytes).unwrap();
  write_chunk(&mut no_data, PngChunkType::IEND, &[]).unwrap();
  assert_eq!(Image::load(&no_data), Err(PngError::MissingImageData));

  // trailing bytes after IEND are ignored
  let mut trailing = good.clone();
  trailing.extend_from_slice(b"junk");
  assert!(Image::load(&trailing).is_ok());
}

#[test]
fn test_unsupported_headers() {
  let interlaced = IHDR { is_interlaced: true, ..header(1, 1, PngColorType::Y) };
  let png = build_png(interlaced, &[], &[0, 0]);
  assert_eq!(Image::load(&png), Err(PngError::InterlaceNotSupported));

  let one_bit = IHDR { bit_depth: 1, ..header(8, 1, PngColorType::Y) };
  let png = build_png(one_bit, &[], &[0, 0b1010_1010]);
  assert_eq!(Image::load(&png), Err(PngError::UnsupportedBitDepth));
}

#[test]
fn test_limits() {
  let png = build_png(header(20_000, 1, PngColorType::Y), &[], &[0, 0]);
  assert_eq!(Image::load(&png), Err(PngError::AllocationLimitExceeded));

  let png = build_png(header(16, 16, PngColorType::RGBA), &[], &[0; 16 * (1 + 16 * 4)]);
  assert!(Image::load(&png).is_ok());
  let tiny = Limits { max_alloc_bytes: 64, ..Limits::default() };
  assert_eq!(Image::load_with_limits(&png, tiny), Err(PngError::AllocationLimitExceeded));
  let narrow = Limits { max_width: 15, ..Limits::default() };
  assert_eq!(Image::load_with_limits(&png, narrow), Err(PngError::AllocationLimitExceeded));
}

#[test]
fn test_create_errors() {
  assert_eq!(
    Image::create(0, 1, 8, PngColorType::RGB, false),
    Err(PngError::ImageDimensionsTooSmall)
  );
  assert_eq!(
    Image::create(1, 0, 8, PngColorType::RGB, false),
    Err(PngError::ImageDimensionsTooSmall)
  );
  assert_eq!(
    Image::create(1, 1, 4, PngColorType::RGB, false),
    Err(PngError::IllegalColorTypeBitDepthCombination)
  );
  assert_eq!(Image::create(1, 1, 16, PngColorType::RGB, false), Err(PngError::UnsupportedBitDepth));
  assert_eq!(Image::create(1, 1, 8, PngColorType::RGB, true), Err(PngError::InterlaceNotSupported));
  assert_eq!(
    Image::create(20_000, 1, 8, PngColorType::RGB, false),
    Err(PngError::AllocationLimitExceeded)
  );

  let image = Image::create(2, 3, 8, PngColorType::RGBA, false).unwrap();
  assert_eq!(image.pixels(), [RGBA8::ZERO; 6]);
  assert!(!image.is_interlaced());
  image.release();
}

#[test]
fn test_indexed_save_errors() {
  let mut image = Image::create(2, 1, 8, PngColorType::Index, false).unwrap();
  assert_eq!(image.palette(), Some(&[][..]));
  assert_eq!(image.save(), Err(PngError::MissingRequiredPalette));
  image.set_palette(vec![RGBA8::new(1, 1, 1, 255)]).unwrap();
  // the zeroed pixels aren't in the palette
  assert_eq!(image.save(), Err(PngError::PixelNotInPalette));
  assert_eq!(image.set_palette(vec![RGBA8::ZERO; 257]), Err(PngError::MalformedPalette));

  let mut rgb = Image::create(1, 1, 8, PngColorType::RGB, false).unwrap();
  assert_eq!(rgb.set_palette(vec![RGBA8::ZERO]), Err(PngError::MalformedPalette));
}

#[test]
fn test_unknown_chunks_are_skipped() {
  let text: &[u8] = b"Comment\0hello";
  let critical: &[u8] = &[1, 2, 3];
  let png = build_png(
    header(1, 1, PngColorType::Y),
    &[(PngChunkType(*b"tEXt"), text), (PngChunkType(*b"ABCD"), critical)],
    &[0, 42],
  );
  assert_eq!(Image::load(&png).unwrap().pixels(), [RGBA8::gray(42, 255)]);
}

#[test]
fn test_walk_chunks_of_saved_image() {
  let image = Image::create(2, 2, 8, PngColorType::RGB, false).unwrap();
  let png = image.save().unwrap();
  let types: Vec<PngChunkType> = png_walk_chunks(&png).map(|r| r.unwrap().chunk_type()).collect();
  assert_eq!(types, [PngChunkType::IHDR, PngChunkType::IDAT, PngChunkType::IEND]);
  assert!(PngRawChunkIter::new(&png).all(|c| c.crc_is_valid()));
  assert_eq!(png_find_chunk(&png, PngChunkType::IHDR, 0), Some(8));
  assert_eq!(png_find_chunk(&png, PngChunkType::IHDR, 9), None);
  assert_eq!(png_find_chunk(&png, PngChunkType::PLTE, 0), None);
}

#[test]
fn test_random_bytes_never_panic() {
  for _ in 0..50 {
    let v = super::rand_bytes(1024);
    for _ in PngRawChunkIter::new(&v) {
      //
    }
    for _ in png_walk_chunks(&v) {
      //
    }
    assert!(Image::load(&v).is_err());

    // random data behind a real signature and header
    let mut png = PNG_SIGNATURE.to_vec();
    let ihdr = header(4, 4, PngColorType::RGBA).to_bytes();
    write_chunk(&mut png, PngChunkType::IHDR, &ihdr).unwrap();
    png.extend_from_slice(&v);
    for _ in PngRawChunkIter::new(&png) {
      //
    }
    let _ = Image::load(&png);

    // random image data in a well formed stream
    let mut png = PNG_SIGNATURE.to_vec();
    let ihdr = header(4, 4, PngColorType::RGBA).to_bytes();
    write_chunk(&mut png, PngChunkType::IHDR, &ihdr).unwrap();
    write_chunk(&mut png, PngChunkType::IDAT, &v).unwrap();
    write_chunk(&mut png, PngChunkType::IEND, &[]).unwrap();
    assert!(Image::load(&png).is_err());

    // random filtered data, compressed correctly
    let scanlines = super::rand_bytes(4 * (1 + 4 * 4));
    let png = build_png(header(4, 4, PngColorType::RGBA), &[], &scanlines);
    let _ = Image::load(&png);
  }
}

#[test]
fn test_sixteen_bit_image_saves_at_eight_bits() {
  let ihdr = IHDR { bit_depth: 16, ..header(2, 1, PngColorType::RGB) };
  let scanlines = [0, 0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xFF, 0xFF, 0, 1, 0x80, 0];
  let image = Image::load(&build_png(ihdr, &[], &scanlines)).unwrap();
  let resaved = image.save().unwrap();
  let ihdr_data = find_chunk_data(&resaved, PngChunkType::IHDR).unwrap();
  assert_eq!(IHDR::try_from(ihdr_data).unwrap().bit_depth, 8);

  let reloaded = Image::load(&resaved).unwrap();
  assert_eq!(reloaded.bit_depth(), 8);
  assert_eq!(reloaded.pixels(), image.pixels());
  assert_eq!(
    reloaded.pixels(),
    [RGBA8::new(0x12, 0x56, 0x9A, 255), RGBA8::new(0xFF, 0, 0x80, 255)]
  );
}

#[test]
fn test_color_key_survives_save() {
  let trns: &[u8] = &[0, 9];
  let png = build_png(header(2, 1, PngColorType::Y), &[(PngChunkType::tRNS, trns)], &[0, 9, 10]);
  let image = Image::load(&png).unwrap();
  assert_eq!(image.color_key(), Some(RGB8 { r: 9, g: 9, b: 9 }));
  let resaved = image.save().unwrap();
  assert_eq!(find_chunk_data(&resaved, PngChunkType::tRNS), Some(&[0, 9][..]));
  let reloaded = Image::load(&resaved).unwrap();
  assert_eq!(reloaded.pixels(), [RGBA8::gray(9, 0), RGBA8::gray(10, 255)]);
  assert_eq!(reloaded, image);

  let trns: &[u8] = &[0, 1, 0, 2, 0, 3];
  let png = build_png(
    header(2, 1, PngColorType::RGB),
    &[(PngChunkType::tRNS, trns)],
    &[0, 1, 2, 3, 1, 2, 4],
  );
  let image = Image::load(&png).unwrap();
  let reloaded = Image::load(&image.save().unwrap()).unwrap();
  assert_eq!(reloaded.pixels(), [RGBA8::new(1, 2, 3, 0), RGBA8::new(1, 2, 4, 255)]);

  // a 16-bit key is kept as its high bytes
  let trns: &[u8] = &[0x12, 0x34];
  let ihdr = IHDR { bit_depth: 16, ..header(1, 1, PngColorType::Y) };
  let png = build_png(ihdr, &[(PngChunkType::tRNS, trns)], &[0, 0x12, 0x34]);
  let image = Image::load(&png).unwrap();
  assert_eq!(image.color_key(), Some(RGB8 { r: 0x12, g: 0x12, b: 0x12 }));
  let reloaded = Image::load(&image.save().unwrap()).unwrap();
  assert_eq!(reloaded.pixels(), [RGBA8::gray(0x12, 0)]);
}

#[test]
fn test_set_color_key() {
  let mut image = Image::create(2, 1, 8, PngColorType::Y, false).unwrap();
  *image.get_mut(1, 0).unwrap() = RGBA8::gray(5, 255);
  assert_eq!(
    image.set_color_key(Some(RGB8 { r: 1, g: 2, b: 3 })),
    Err(PngError::MalformedTransparency)
  );
  image.set_color_key(Some(RGB8 { r: 0, g: 0, b: 0 })).unwrap();
  let reloaded = Image::load(&image.save().unwrap()).unwrap();
  assert_eq!(reloaded.pixels(), [RGBA8::gray(0, 0), RGBA8::gray(5, 255)]);

  image.set_color_key(None).unwrap();
  let png = image.save().unwrap();
  assert_eq!(find_chunk_data(&png, PngChunkType::tRNS), None);

  let mut rgba = Image::create(1, 1, 8, PngColorType::RGBA, false).unwrap();
  assert_eq!(rgba.set_color_key(Some(RGB8::default())), Err(PngError::MalformedTransparency));
  assert_eq!(rgba.set_color_key(None), Ok(()));
}

#[test]
fn test_late_or_duplicate_trns_is_ignored() {
  let first: &[u8] = &[0, 9];
  let second: &[u8] = &[0, 10];
  let png = build_png(
    header(2, 1, PngColorType::Y),
    &[(PngChunkType::tRNS, first), (PngChunkType::tRNS, second)],
    &[0, 9, 10],
  );
  let image = Image::load(&png).unwrap();
  assert_eq!(image.pixels(), [RGBA8::gray(9, 0), RGBA8::gray(10, 255)]);

  let mut png = PNG_SIGNATURE.to_vec();
  write_chunk(&mut png, PngChunkType::IHDR, &header(2, 1, PngColorType::Y).to_bytes()).unwrap();
  write_chunk(&mut png, PngChunkType::IDAT, &compress_scanlines(&[0, 9, 10])).unwrap();
  write_chunk(&mut png, PngChunkType::tRNS, first).unwrap();
  write_chunk(&mut png, PngChunkType::IEND, &[]).unwrap();
  let image = Image::load(&png).unwrap();
  assert_eq!(image.pixels(), [RGBA8::gray(9, 255), RGBA8::gray(10, 255)]);
  assert_eq!(image.color_key(), None);
}

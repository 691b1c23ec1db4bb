//! PNG decoding to RGBA canvases and grayscale PNG encoding.

use std::io::Cursor;

use crate::error::RenderError;
use crate::models::RgbaCanvas;

/// Decode a PNG into an 8-bit RGBA canvas.
///
/// Palette, grayscale, RGB and 16-bit inputs are expanded to 8-bit RGBA;
/// pixels without an alpha channel become fully opaque.
pub fn decode_rgba(png_bytes: &[u8]) -> Result<RgbaCanvas, RenderError> {
    let mut decoder = png::Decoder::new(Cursor::new(png_bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(RenderError::UnsupportedFormat(format!(
            "{:?} bit depth after expansion",
            info.bit_depth
        )));
    }

    let pixels = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        other => return Err(RenderError::UnsupportedFormat(format!("{other:?}"))),
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        "Decoded PNG canvas"
    );

    Ok(RgbaCanvas::new(info.width, info.height, pixels))
}

/// Encode 8-bit grayscale pixels as a PNG.
///
/// Written with fast settings, then re-compressed with oxipng.
pub fn encode_grayscale(width: u32, height: u32, gray: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(gray)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);

    Ok(optimized)
}

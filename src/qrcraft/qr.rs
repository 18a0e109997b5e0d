//! Adapters over the QR collaborator crates.
//!
//! Encoding and decoding are owned entirely by `qrcode` and `rqrr`; this
//! module only translates between their types and ours. Rendering is pure
//! computation; [`render_to_file`] adds the single PNG write.

use std::path::Path;

use image::Rgb;
use qrcode::{EcLevel, QrCode};

use crate::error::{QrCraftError, Result};
use crate::model::QrStyle;

/// Raster rendering options. The style supplies the color pair; width is
/// the minimum edge length in pixels.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub width: u32,
    pub quiet_zone: bool,
    pub style: QrStyle,
    pub ec_level: EcLevel,
}

impl RenderOptions {
    /// Edge length used for on-screen previews.
    pub const PREVIEW_WIDTH: u32 = 300;

    pub fn new(style: QrStyle) -> Self {
        Self {
            width: Self::PREVIEW_WIDTH,
            quiet_zone: true,
            style,
            ec_level: EcLevel::M,
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }
}

/// Render `content` to an RGB raster in the style's colors.
pub fn render(content: &str, options: &RenderOptions) -> Result<image::RgbImage> {
    let code = QrCode::with_error_correction_level(content, options.ec_level)
        .map_err(QrCraftError::Encode)?;
    let (dark, light) = options.style.palette();
    let img = code
        .render::<Rgb<u8>>()
        .quiet_zone(options.quiet_zone)
        .min_dimensions(options.width, options.width)
        .dark_color(Rgb(dark))
        .light_color(Rgb(light))
        .build();
    Ok(img)
}

/// Render `content` and write it as a PNG at `path`.
pub fn render_to_file(content: &str, options: &RenderOptions, path: &Path) -> Result<()> {
    let img = render(content, options)?;
    img.save(path).map_err(QrCraftError::Image)?;
    Ok(())
}

/// Decode the first QR code found in the image at `path`.
///
/// An image without a recognizable code yields [`QrCraftError::NoCodeFound`];
/// the caller reports it once, there is no retry.
pub fn decode(path: &Path) -> Result<String> {
    let img = image::open(path).map_err(QrCraftError::Image)?.to_luma8();
    let (width, height) = (img.width() as usize, img.height() as usize);
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| {
        img.get_pixel(x as u32, y as u32).0[0]
    });
    let grids = prepared.detect_grids();
    let grid = grids.first().ok_or(QrCraftError::NoCodeFound)?;
    let (_meta, content) = grid.decode().map_err(|_| QrCraftError::NoCodeFound)?;
    Ok(content)
}

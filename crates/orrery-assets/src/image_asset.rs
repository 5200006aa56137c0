//! Decoded image files.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Upper bound on the bytes shown by [`AssetImage::preview`].
pub const PREVIEW_LIMIT: usize = 50;

/// Errors raised while loading textures.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to load image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image {path} has zero size")]
    Empty { path: PathBuf },
}

/// An image decoded into RGBA8 with rows stored bottom-up.
///
/// The bottom-up order puts the picture's bottom edge at `v = 0`, which is
/// what the sphere and background UVs expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetImage {
    pub width: u32,
    pub height: u32,
    /// Channels in the file before conversion to RGBA.
    pub channels: u8,
    /// Tightly packed RGBA8 rows, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl AssetImage {
    /// Decode a PNG or JPEG file.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let decoded = image::open(path).map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(AssetError::Empty {
                path: path.to_path_buf(),
            });
        }

        let channels = decoded.color().channel_count();
        let mut rgba = decoded.into_rgba8();
        image::imageops::flip_vertical_in_place(&mut rgba);

        tracing::debug!(
            path = %path.display(),
            width = rgba.width(),
            height = rgba.height(),
            channels,
            "decoded image"
        );

        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            channels,
            pixels: rgba.into_raw(),
        })
    }

    /// Wrap already-decoded RGBA8 pixels, stored bottom-up.
    ///
    /// Returns `None` when the buffer length does not match the dimensions.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        (width > 0 && height > 0 && pixels.len() == width as usize * height as usize * 4).then(
            || Self {
                width,
                height,
                channels: 4,
                pixels,
            },
        )
    }

    /// 1x1 image of a single colour.
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            channels: 4,
            pixels: rgba.to_vec(),
        }
    }

    /// RGBA value at `(x, y)` counted from the bottom-left corner.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels
            .get(offset..offset + 4)
            .and_then(|px| px.try_into().ok())
    }

    /// Short human-readable dump: dimensions, channels and up to
    /// `min(limit, 50)` leading bytes.
    pub fn preview(&self, limit: usize) -> String {
        let shown = limit.min(PREVIEW_LIMIT).min(self.pixels.len());
        let mut out = format!("{}x{} ({} channels):", self.width, self.height, self.channels);
        for byte in &self.pixels[..shown] {
            let _ = write!(out, " {byte}");
        }
        if shown < self.pixels.len() {
            out.push_str(" ...");
        }
        out
    }
}

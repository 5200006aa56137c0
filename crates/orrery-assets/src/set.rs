//! The four textures the demo draws with.

use std::path::Path;

use crate::{AssetError, AssetImage};

/// Which texture slot an image fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyTexture {
    Sun,
    Earth,
    Moon,
    Background,
}

impl BodyTexture {
    pub const ALL: [BodyTexture; 4] = [
        BodyTexture::Sun,
        BodyTexture::Earth,
        BodyTexture::Moon,
        BodyTexture::Background,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BodyTexture::Sun => "sun",
            BodyTexture::Earth => "earth",
            BodyTexture::Moon => "moon",
            BodyTexture::Background => "background",
        }
    }
}

/// Decoded textures for every [`BodyTexture`] slot.
#[derive(Debug, Clone)]
pub struct AssetSet {
    pub sun: AssetImage,
    pub earth: AssetImage,
    pub moon: AssetImage,
    pub background: AssetImage,
}

impl AssetSet {
    /// Load every texture from `dir`. `file_name` maps a slot to its file.
    ///
    /// Stops at the first file that fails to load.
    pub fn load(
        dir: &Path,
        file_name: impl Fn(BodyTexture) -> String,
    ) -> Result<Self, AssetError> {
        let load = |slot: BodyTexture| {
            let path = dir.join(file_name(slot));
            let image = AssetImage::load(&path)?;
            tracing::info!(
                texture = slot.label(),
                path = %path.display(),
                width = image.width,
                height = image.height,
                "loaded texture"
            );
            Ok::<_, AssetError>(image)
        };

        Ok(Self {
            sun: load(BodyTexture::Sun)?,
            earth: load(BodyTexture::Earth)?,
            moon: load(BodyTexture::Moon)?,
            background: load(BodyTexture::Background)?,
        })
    }

    pub fn get(&self, slot: BodyTexture) -> &AssetImage {
        match slot {
            BodyTexture::Sun => &self.sun,
            BodyTexture::Earth => &self.earth,
            BodyTexture::Moon => &self.moon,
            BodyTexture::Background => &self.background,
        }
    }
}

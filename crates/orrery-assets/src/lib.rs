//! Texture images for the sun, earth, moon and background.

mod image_asset;
mod set;

pub use image_asset::{AssetError, AssetImage, PREVIEW_LIMIT};
pub use set::{AssetSet, BodyTexture};

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageError, ImageOutputFormat, Rgb, RgbImage};
use kiss3d::resource::TextureManager;
use tracing::{debug, warn};

use crate::texture::{TextureError, TextureHandle, TextureId, TextureProvider};

const CHECKERBOARD_NAME: &str = "orrery-checkerboard";
const CHECKERBOARD_SIZE: u32 = 64;
const CHECKER_SIZE: u32 = 8;

/// Registers image files with kiss3d's global texture manager. Needs a live
/// GL context, so create it after the window.
///
/// kiss3d decodes files itself and panics on bad ones, so every file is
/// decoded here first and only handed over once it is known to be good.
/// kiss3d also never frees a texture: releasing only forgets the name, and
/// the GL texture lives until the context is destroyed.
pub struct KissTextureProvider {
    next_id: usize,
    names: HashMap<TextureId, String>,
    has_checkerboard: bool,
}

impl KissTextureProvider {
    pub fn new() -> Self {
        let has_checkerboard = match checkerboard_png() {
            Ok(png) => {
                TextureManager::get_global_manager(|tm| {
                    tm.add_image_from_memory(&png, CHECKERBOARD_NAME)
                });
                true
            }
            Err(err) => {
                warn!("Cannot build fallback texture: {}", err);
                false
            }
        };
        KissTextureProvider {
            next_id: 0,
            names: HashMap::new(),
            has_checkerboard,
        }
    }

    /// The texture-manager name to bind for a handle, if any.
    pub fn texture_name(&self, handle: TextureHandle) -> Option<&str> {
        match handle {
            TextureHandle::None => None,
            TextureHandle::Fallback if self.has_checkerboard => Some(CHECKERBOARD_NAME),
            TextureHandle::Fallback => None,
            TextureHandle::Loaded(id) => self.names.get(&id).map(String::as_str),
        }
    }
}

impl TextureProvider for KissTextureProvider {
    fn load(&mut self, path: &Path) -> Result<TextureId, TextureError> {
        validate_image(path)?;

        let id = TextureId(self.next_id);
        self.next_id += 1;
        // kiss3d keys textures by name; the same file is only uploaded once
        let name = path.display().to_string();
        TextureManager::get_global_manager(|tm| tm.add(path, &name));
        self.names.insert(id, name);
        Ok(id)
    }

    fn release(&mut self, id: TextureId) {
        if let Some(name) = self.names.remove(&id) {
            debug!(%name, "texture unbound; GL memory is freed with the context");
        }
    }
}

/// Decodes the whole file, so anything kiss3d would choke on is caught here.
fn validate_image(path: &Path) -> Result<(), TextureError> {
    let image = image::open(path).map_err(|err| match err {
        ImageError::IoError(source) => TextureError::Io {
            path: path.to_owned(),
            source,
        },
        source => TextureError::Decode {
            path: path.to_owned(),
            source,
        },
    })?;
    if image.width() == 0 || image.height() == 0 {
        return Err(TextureError::Unsupported {
            path: path.to_owned(),
            reason: String::from("image has no pixels"),
        });
    }
    Ok(())
}

/// Placeholder for textures that failed to load; loud enough to notice.
fn checkerboard() -> DynamicImage {
    let image = RgbImage::from_fn(CHECKERBOARD_SIZE, CHECKERBOARD_SIZE, |x, y| {
        if (x / CHECKER_SIZE + y / CHECKER_SIZE) % 2 == 0 {
            Rgb([255, 0, 255])
        } else {
            Rgb([40, 40, 40])
        }
    });
    DynamicImage::ImageRgb8(image)
}

fn checkerboard_png() -> Result<Vec<u8>, ImageError> {
    let mut png = Vec::new();
    checkerboard().write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)?;
    Ok(png)
}

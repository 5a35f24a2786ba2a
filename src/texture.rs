use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TextureId(pub usize);

/// What a drawable binds when it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureHandle {
    /// Nothing bound; either never loaded or already released.
    None,
    /// Loading failed; the host binds its placeholder checkerboard.
    Fallback,
    Loaded(TextureId),
}

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Cannot open image file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed image file {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Unsupported image {path:?}: {reason}")]
    Unsupported { path: PathBuf, reason: String },
}

/// Anything that can turn an image file into a GPU texture.
pub trait TextureProvider {
    fn load(&mut self, path: &Path) -> Result<TextureId, TextureError>;

    fn release(&mut self, id: TextureId);
}

impl TextureHandle {
    pub fn is_loaded(&self) -> bool {
        matches!(self, TextureHandle::Loaded(_))
    }

    /// Gives the texture back to the provider and leaves `None` behind, so the
    /// same id can never be released twice.
    pub fn release(&mut self, provider: &mut dyn TextureProvider) {
        if let TextureHandle::Loaded(id) = std::mem::replace(self, TextureHandle::None) {
            provider.release(id);
        }
    }
}

/// Load failures are never fatal: the body keeps simulating and renders with
/// the fallback texture.
pub fn load_or_fallback(provider: &mut dyn TextureProvider, path: &Path) -> TextureHandle {
    match provider.load(path) {
        Ok(id) => {
            debug!(?path, ?id, "loaded texture");
            TextureHandle::Loaded(id)
        }
        Err(err) => {
            warn!("{}; using fallback texture", err);
            TextureHandle::Fallback
        }
    }
}

/// Hands out ids without touching any files or GPU state. Used by headless
/// tools and tests.
#[derive(Debug, Default)]
pub struct NullTextureProvider {
    next_id: usize,
    live: Vec<TextureId>,
}

impl NullTextureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl TextureProvider for NullTextureProvider {
    fn load(&mut self, _path: &Path) -> Result<TextureId, TextureError> {
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.live.push(id);
        Ok(id)
    }

    fn release(&mut self, id: TextureId) {
        self.live.retain(|live_id| *live_id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    impl TextureProvider for FailingProvider {
        fn load(&mut self, path: &Path) -> Result<TextureId, TextureError> {
            Err(TextureError::Io {
                path: path.to_owned(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            })
        }

        fn release(&mut self, _id: TextureId) {
            panic!("Nothing was ever loaded");
        }
    }

    #[test]
    fn test_failed_load_falls_back() {
        let mut provider = FailingProvider;
        let mut handle = load_or_fallback(&mut provider, Path::new("textures/nope.bmp"));
        assert_eq!(handle, TextureHandle::Fallback);

        // Releasing a fallback must not reach the provider
        handle.release(&mut provider);
        assert_eq!(handle, TextureHandle::None);
    }

    #[test]
    fn test_release_only_once() {
        let mut provider = NullTextureProvider::new();
        let mut handle = load_or_fallback(&mut provider, Path::new("earth.bmp"));
        assert!(handle.is_loaded());
        assert_eq!(provider.live_count(), 1);

        handle.release(&mut provider);
        handle.release(&mut provider);
        assert_eq!(handle, TextureHandle::None);
        assert_eq!(provider.live_count(), 0);
    }

    #[test]
    fn test_error_messages_name_the_file() {
        let err = FailingProvider.load(Path::new("sun.bmp")).unwrap_err();
        assert!(err.to_string().contains("sun.bmp"));
    }
}

//! Texture loading and caching.
//!
//! Image-backed patterns hold an `Arc<Canvas>`. All images are loaded here,
//! before tracing starts, so no I/O happens inside the ray path. The same
//! file mapped onto several cube faces is loaded once.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::canvas::{Canvas, CanvasResult};

/// Cache for loaded textures, keyed by the path they were requested with.
pub struct TextureCache {
    textures: HashMap<String, Arc<Canvas>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load a texture from file, using cache if available.
    pub fn load(&mut self, path: &str) -> CanvasResult<Arc<Canvas>> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let full_path = self.resolve_path(path);
        let texture = Arc::new(Canvas::load(&full_path)?);
        self.textures.insert(path.to_string(), texture.clone());

        log::debug!(
            "Cached texture: {} ({}x{})",
            path,
            texture.width(),
            texture.height()
        );

        Ok(texture)
    }

    /// Register an in-memory image under a name.
    pub fn insert(&mut self, name: &str, canvas: Canvas) -> Arc<Canvas> {
        let texture = Arc::new(canvas);
        self.textures.insert(name.to_string(), texture.clone());
        texture
    }

    pub fn get(&self, path: &str) -> Option<Arc<Canvas>> {
        self.textures.get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

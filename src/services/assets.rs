//! Image lookup for PDF export.
//!
//! Sources are either embedded data URIs or paths relative to the asset
//! root (theme backgrounds and the default logo ship as files, e.g.
//! `/background1.jpg`). Paths that try to climb out of the root resolve to nothing.

#[cfg(test)]
#[path = "assets_test.rs"]
mod assets_test;

use std::path::{Component, Path, PathBuf};

use editor::pdf::{DataUriResolver, ImageResolver};
use editor::upload::is_data_uri;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Filesystem path for a site-relative source, or `None` if it escapes the root.
    #[must_use]
    pub fn path_for(&self, src: &str) -> Option<PathBuf> {
        let relative = Path::new(src.trim_start_matches('/'));
        if relative.as_os_str().is_empty() {
            return None;
        }
        if !relative.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir)) {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl ImageResolver for AssetResolver {
    fn resolve(&self, src: &str) -> Option<Vec<u8>> {
        if is_data_uri(src) {
            return DataUriResolver.resolve(src);
        }
        let Some(path) = self.path_for(src) else {
            warn!(src, "asset path rejected");
            return None;
        };
        match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "asset unreadable");
                None
            }
        }
    }
}

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::imageops;
use image::{ImageFormat, RgbaImage};

use modhub_core::SearchHit;

use crate::error::FetchError;
use crate::fallback;
use crate::http::{Fetch, raw_file_url};

/// A normalized, PNG-encoded square icon ready to be written out.
#[derive(Debug, Clone)]
pub struct IconAsset {
    /// Output file name derived from the repository identifier
    pub file_name: String,
    /// Dimensions of the image as fetched, before scaling
    pub source_size: (u32, u32),
    pub png: Vec<u8>,
}

impl IconAsset {
    /// Write the icon into `dir`, returning the file path.
    pub fn write_into(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.png)?;
        Ok(path)
    }
}

/// `owner/repo` -> `owner_repo.png`
pub fn icon_file_name(full_name: &str) -> String {
    format!("{}.png", full_name.replace('/', "_"))
}

/// Decode an image and scale it onto a `size`×`size` RGBA canvas.
///
/// Returns the scaled image and the original dimensions. Downscaling averages
/// every source pixel into its target pixel, which keeps detailed icons from
/// aliasing; the aspect ratio is not preserved.
pub fn normalize_icon(bytes: &[u8], size: u32) -> Result<(RgbaImage, (u32, u32)), FetchError> {
    let decoded = image::load_from_memory(bytes)?;
    let source_size = (decoded.width(), decoded.height());
    let rgba = decoded.into_rgba8();
    Ok((imageops::thumbnail(&rgba, size, size), source_size))
}

fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, FetchError> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Resolve a candidate's icon from the first path that decodes, normalized
/// to `size`×`size`. Returns `None` when every path fails.
///
/// Callers are responsible for the star gate; this function fetches
/// unconditionally.
pub fn resolve_icon(
    fetch: &dyn Fetch,
    raw_url: &str,
    hit: &SearchHit,
    paths: &[String],
    size: u32,
) -> Option<IconAsset> {
    let urls = paths
        .iter()
        .map(|path| raw_file_url(raw_url, &hit.full_name, &hit.default_branch, path));

    let found = fallback::first_success(fetch, urls, |bytes| {
        let (scaled, source_size) = normalize_icon(bytes, size)?;
        Ok((encode_png(&scaled)?, source_size))
    })?;

    let (png, source_size) = found.value;
    Some(IconAsset {
        file_name: icon_file_name(&hit.full_name),
        source_size,
        png,
    })
}

#[cfg(test)]
#[path = "tests/icon_tests.rs"]
mod tests;

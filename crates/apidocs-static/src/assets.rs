//! Static asset copying.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// URL prefix of the assets directory, relative to `index.html`.
pub const ASSETS_URL_PREFIX: &str = "./assets/";

/// Name of the assets directory inside the output directory.
pub const ASSETS_DIR: &str = "assets";

/// Empty file that disables Jekyll processing on GitHub Pages.
pub const HOSTING_MARKER: &str = ".nojekyll";

/// Files copied from the source assets directory when present.
pub const ASSET_FILES: &[&str] = &[
    "logo.png",
    "logo-light.png",
    "favicon.png",
    "favicon-16x16.png",
    "favicon-32x32.png",
    "favicon-96x96.png",
    "apple-touch-icon.png",
    "android-chrome-192x192.png",
    "android-chrome-512x512.png",
    "site.webmanifest",
];

/// Copy every listed asset that exists in `source_dir` into `dest_dir`.
///
/// Missing files are skipped. Returns the destination paths written.
pub fn copy_assets(source_dir: &Path, dest_dir: &Path) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dest_dir)?;

    let mut copied = Vec::new();
    for name in ASSET_FILES {
        let source = source_dir.join(name);
        if !source.is_file() {
            tracing::debug!("Skipping missing asset {}", source.display());
            continue;
        }

        let dest = dest_dir.join(name);
        if !same_file(&source, &dest) {
            fs::copy(&source, &dest)?;
        }
        copied.push(dest);
    }

    Ok(copied)
}

/// Write the empty hosting marker file.
pub fn write_hosting_marker(output_dir: &Path) -> io::Result<PathBuf> {
    let marker = output_dir.join(HOSTING_MARKER);
    fs::write(&marker, "")?;
    Ok(marker)
}

/// True when both paths resolve to the same existing file.
pub(crate) fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copies_present_assets_and_skips_missing() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("assets");
        let dest = temp.path().join("dist").join("assets");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("logo.png"), b"logo").unwrap();
        fs::write(source.join("site.webmanifest"), b"{}").unwrap();
        fs::write(source.join("notes.txt"), b"not listed").unwrap();

        let copied = copy_assets(&source, &dest).unwrap();

        assert_eq!(copied.len(), 2);
        assert_eq!(fs::read(dest.join("logo.png")).unwrap(), b"logo");
        assert!(dest.join("site.webmanifest").exists());
        assert!(!dest.join("logo-light.png").exists());
        assert!(!dest.join("notes.txt").exists());
    }

    #[test]
    fn missing_source_dir_copies_nothing() {
        let temp = tempdir().unwrap();

        let copied = copy_assets(&temp.path().join("nope"), &temp.path().join("out")).unwrap();

        assert!(copied.is_empty());
    }

    #[test]
    fn leaves_asset_in_place_when_source_is_destination() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("assets");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("favicon.png"), b"icon").unwrap();

        let copied = copy_assets(&dir, &dir).unwrap();

        assert_eq!(copied, vec![dir.join("favicon.png")]);
        assert_eq!(fs::read(dir.join("favicon.png")).unwrap(), b"icon");
    }

    #[test]
    fn writes_empty_marker() {
        let temp = tempdir().unwrap();

        let marker = write_hosting_marker(temp.path()).unwrap();

        assert!(marker.ends_with(".nojekyll"));
        assert_eq!(fs::read(&marker).unwrap().len(), 0);
    }
}

//! Favicon set and web app manifest generation.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assets::ASSETS_URL_PREFIX;

/// Derived icons: file name and square edge in pixels.
pub const FAVICON_SIZES: &[(&str, u32)] = &[
    ("favicon-16x16.png", 16),
    ("favicon-32x32.png", 32),
    ("favicon-96x96.png", 96),
    ("apple-touch-icon.png", 180),
    ("android-chrome-192x192.png", 192),
    ("android-chrome-512x512.png", 512),
];

/// Manifest file name.
pub const MANIFEST_FILE: &str = "site.webmanifest";

/// Name of the untouched copy of the source icon.
pub const FALLBACK_FAVICON: &str = "favicon.png";

const MANIFEST_ICON_SIZES: &[u32] = &[192, 512];

/// Padding colour: white, fully transparent.
const PADDING: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Configuration for favicon generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FaviconConfig {
    /// Source icon
    pub source: PathBuf,
    /// Directory receiving the icons and the manifest
    pub output: PathBuf,
    /// Manifest `name`
    pub name: String,
    /// Manifest `short_name`
    pub short_name: String,
    pub theme_color: String,
    pub background_color: String,
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("assets/favicon.png"),
            output: PathBuf::from("dist/assets"),
            name: "WRPay API Documentation".to_string(),
            short_name: "WRPay API Docs".to_string(),
            theme_color: "#ffffff".to_string(),
            background_color: "#ffffff".to_string(),
        }
    }
}

/// Web app manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub icons: Vec<ManifestIcon>,
    pub theme_color: String,
    pub background_color: String,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime: String,
}

/// Files produced by a generation run.
#[derive(Debug)]
pub struct FaviconReport {
    /// Resized icons, in [`FAVICON_SIZES`] order
    pub generated: Vec<PathBuf>,
    /// Copy of the source icon
    pub fallback: PathBuf,
    /// Manifest file
    pub manifest: PathBuf,
}

/// Errors that can occur during favicon generation.
#[derive(Debug, thiserror::Error)]
pub enum FaviconError {
    #[error("Source favicon not found: {0}")]
    SourceNotFound(String),

    #[error("Failed to decode {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Failed to encode {path}: {message}")]
    Encode { path: String, message: String },

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Generates the favicon set from one source image.
pub struct FaviconGenerator {
    config: FaviconConfig,
}

impl FaviconGenerator {
    pub fn new(config: FaviconConfig) -> Self {
        Self { config }
    }

    /// Resize to every size in parallel, then copy the source and write the manifest.
    ///
    /// The manifest is only written once every resize has succeeded.
    pub fn generate(&self) -> Result<FaviconReport, FaviconError> {
        let source = &self.config.source;
        if !source.is_file() {
            return Err(FaviconError::SourceNotFound(source.display().to_string()));
        }

        fs::create_dir_all(&self.config.output)
            .map_err(|e| FaviconError::WriteError(e.to_string()))?;

        tracing::info!(
            "Generating favicons from {} into {}",
            source.display(),
            self.config.output.display()
        );

        let image = image::open(source).map_err(|e| FaviconError::Decode {
            path: source.display().to_string(),
            message: e.to_string(),
        })?;

        let generated = FAVICON_SIZES
            .par_iter()
            .map(|(name, size)| -> Result<PathBuf, FaviconError> {
                let path = self.config.output.join(name);
                write_icon(&image, *size, &path)?;
                tracing::info!("Generated {} ({}x{})", name, size, size);
                Ok(path)
            })
            .collect::<Result<Vec<_>, FaviconError>>()?;

        let fallback = self.config.output.join(FALLBACK_FAVICON);
        fs::copy(source, &fallback).map_err(|e| FaviconError::WriteError(e.to_string()))?;
        tracing::info!("Copied {} (fallback)", FALLBACK_FAVICON);

        let manifest = self.config.output.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(&self.manifest())
            .map_err(|e| FaviconError::WriteError(e.to_string()))?;
        fs::write(&manifest, json).map_err(|e| FaviconError::WriteError(e.to_string()))?;
        tracing::info!("Created {}", MANIFEST_FILE);

        Ok(FaviconReport {
            generated,
            fallback,
            manifest,
        })
    }

    /// Manifest listing the 192 and 512 pixel icons.
    pub fn manifest(&self) -> WebManifest {
        let icons = FAVICON_SIZES
            .iter()
            .filter(|(name, size)| {
                name.starts_with("android-chrome") && MANIFEST_ICON_SIZES.contains(size)
            })
            .map(|(name, size)| ManifestIcon {
                src: format!("{}{}", ASSETS_URL_PREFIX, name),
                sizes: format!("{}x{}", size, size),
                mime: "image/png".to_string(),
            })
            .collect();

        WebManifest {
            name: self.config.name.clone(),
            short_name: self.config.short_name.clone(),
            icons,
            theme_color: self.config.theme_color.clone(),
            background_color: self.config.background_color.clone(),
            display: "standalone".to_string(),
        }
    }
}

/// Fit `image` inside a `size`×`size` square, centred on transparent padding.
pub fn contain(image: &DynamicImage, size: u32) -> RgbaImage {
    let fitted = image.resize(size, size, FilterType::Lanczos3).to_rgba8();
    let mut canvas = RgbaImage::from_pixel(size, size, PADDING);

    let x = (size.saturating_sub(fitted.width()) / 2) as i64;
    let y = (size.saturating_sub(fitted.height()) / 2) as i64;
    imageops::overlay(&mut canvas, &fitted, x, y);

    canvas
}

fn write_icon(image: &DynamicImage, size: u32, path: &Path) -> Result<(), FaviconError> {
    contain(image, size)
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| FaviconError::Encode {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn write_source(dir: &Path) -> PathBuf {
        let path = dir.join("favicon.png");
        RgbaImage::from_pixel(40, 20, Rgba([200, 30, 30, 255]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();
        path
    }

    fn config(dir: &Path, source: PathBuf) -> FaviconConfig {
        FaviconConfig {
            source,
            output: dir.join("dist").join("assets"),
            ..Default::default()
        }
    }

    #[test]
    fn generates_all_sizes_and_manifest() {
        let temp = tempdir().unwrap();
        let source = write_source(temp.path());
        let generator = FaviconGenerator::new(config(temp.path(), source));

        let report = generator.generate().unwrap();

        assert_eq!(report.generated.len(), 6);
        for (name, size) in FAVICON_SIZES {
            let path = temp.path().join("dist/assets").join(name);
            assert_eq!(image::image_dimensions(&path).unwrap(), (*size, *size));
        }
        assert!(report.fallback.exists());

        let manifest: WebManifest =
            serde_json::from_str(&fs::read_to_string(&report.manifest).unwrap()).unwrap();
        let srcs: Vec<&str> = manifest.icons.iter().map(|i| i.src.as_str()).collect();
        assert_eq!(
            srcs,
            vec![
                "./assets/android-chrome-192x192.png",
                "./assets/android-chrome-512x512.png"
            ]
        );
        assert_eq!(manifest.display, "standalone");
    }

    #[test]
    fn output_contains_exactly_the_expected_files() {
        let temp = tempdir().unwrap();
        let source = write_source(temp.path());

        FaviconGenerator::new(config(temp.path(), source))
            .generate()
            .unwrap();

        let mut names: Vec<String> = fs::read_dir(temp.path().join("dist/assets"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                "android-chrome-192x192.png",
                "android-chrome-512x512.png",
                "apple-touch-icon.png",
                "favicon-16x16.png",
                "favicon-32x32.png",
                "favicon-96x96.png",
                "favicon.png",
                "site.webmanifest",
            ]
        );
    }

    #[test]
    fn pads_non_square_source_with_transparency() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            40,
            20,
            Rgba([0, 0, 255, 255]),
        ));

        let icon = contain(&source, 16);

        assert_eq!(icon.dimensions(), (16, 16));
        assert_eq!(icon.get_pixel(0, 0)[3], 0);
        assert_eq!(icon.get_pixel(8, 8)[3], 255);
    }

    #[test]
    fn missing_source_is_an_error() {
        let temp = tempdir().unwrap();
        let generator = FaviconGenerator::new(config(temp.path(), temp.path().join("none.png")));

        let result = generator.generate();

        assert!(matches!(result, Err(FaviconError::SourceNotFound(_))));
        assert!(!temp.path().join("dist/assets").join(MANIFEST_FILE).exists());
    }

    #[test]
    fn undecodable_source_writes_no_manifest() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("favicon.png");
        fs::write(&source, b"not a png").unwrap();

        let result = FaviconGenerator::new(config(temp.path(), source)).generate();

        assert!(matches!(result, Err(FaviconError::Decode { .. })));
        assert!(!temp.path().join("dist/assets").join(MANIFEST_FILE).exists());
    }
}

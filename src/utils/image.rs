use std::path::Path;

use base64::{engine::general_purpose, Engine};
use rand::RngCore;
use tracing::{info, warn};

use super::app_error::AppError;
use crate::structs::post::ImageUpload;

/// Directory under the media root where post images go.
pub const POST_IMAGE_DIR: &str = "posts";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Gif,
    Jpeg,
    Png,
    Webp,
}

impl ImageFormat {
    fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "gif" => Some(Self::Gif),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(Self::Png)
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Gif => "gif",
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }
}

#[derive(Debug)]
pub struct DecodedImage {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

/// Checks the upload is an actual image whose content matches its extension.
/// The error is the message shown to the user.
pub fn decode_image(upload: &ImageUpload) -> Result<DecodedImage, &'static str> {
    let extension = Path::new(&upload.filename)
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or_default();

    let Some(claimed) = ImageFormat::from_extension(extension) else {
        return Err("Extension de fichier non autorisée.");
    };

    let bytes = general_purpose::STANDARD
        .decode(upload.content.trim())
        .map_err(|_| "Le fichier envoyé est mal encodé.")?;

    if bytes.is_empty() {
        return Err("Le fichier envoyé est vide.");
    }

    match ImageFormat::sniff(&bytes) {
        Some(format) if format == claimed => Ok(DecodedImage { format, bytes }),
        _ => Err("Le fichier envoyé n'est pas une image valide."),
    }
}

fn random_file_stem() -> String {
    let mut stem = [0u8; 12];
    rand::thread_rng().fill_bytes(&mut stem);
    general_purpose::URL_SAFE_NO_PAD.encode(stem)
}

/// Writes the image under `<media_root>/posts/` and returns its path relative to
/// the media root.
pub async fn save_post_image(media_root: &Path, image: &DecodedImage) -> Result<String, AppError> {
    let directory = media_root.join(POST_IMAGE_DIR);
    tokio::fs::create_dir_all(&directory).await.map_err(|e| {
        warn!("Error creating media directory {} : {e}", directory.display());
        AppError::internal_server_error()
    })?;

    let file_name = format!("{}.{}", random_file_stem(), image.format.extension());
    let path = directory.join(&file_name);
    tokio::fs::write(&path, &image.bytes).await.map_err(|e| {
        warn!("Error writing image {} : {e}", path.display());
        AppError::internal_server_error()
    })?;

    info!("Stored image {} ({} bytes)", path.display(), image.bytes.len());

    Ok(format!("{POST_IMAGE_DIR}/{file_name}"))
}

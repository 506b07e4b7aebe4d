//! File picker with the accept filter of the upload affordance.
//!
//! The state machine accepts any `SelectedFile`; this is the only place that
//! turns away non-images and files over the advertised size.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use extractor_core::SelectedFile;
use mime_guess::mime;
use thiserror::Error;

pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum PickError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path:?} is not a file")]
    NotAFile { path: PathBuf },
    #[error("{path:?} does not look like an image ({media_type})")]
    NotAnImage { path: PathBuf, media_type: String },
    #[error("{path:?} is {size} bytes; images are limited to 10MB")]
    TooLarge { path: PathBuf, size: u64 },
}

pub fn pick_image(path: &Path) -> Result<SelectedFile, PickError> {
    let read_error = |source| PickError::Read {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(read_error)?;
    if !metadata.is_file() {
        return Err(PickError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let guessed = mime_guess::from_path(path).first();
    let media_type = match guessed {
        Some(guess) if guess.type_() == mime::IMAGE => guess.essence_str().to_string(),
        other => {
            return Err(PickError::NotAnImage {
                path: path.to_path_buf(),
                media_type: other
                    .map(|guess| guess.essence_str().to_string())
                    .unwrap_or_else(|| "unknown type".to_string()),
            })
        }
    };

    if metadata.len() > MAX_IMAGE_BYTES {
        return Err(PickError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
        });
    }

    let bytes = fs::read(path).map_err(read_error)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(SelectedFile::new(name, media_type, Bytes::from(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_image_with_guessed_type() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cat.PNG");
        fs::write(&path, b"\x89PNG").unwrap();

        let file = pick_image(&path).unwrap();
        assert_eq!(file.name(), "cat.PNG");
        assert_eq!(file.media_type(), "image/png");
        assert_eq!(file.size(), 4);
    }

    #[test]
    fn jpeg_extension_maps_to_image_jpeg() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("photo.jpeg");
        fs::write(&path, b"jpeg").unwrap();

        assert_eq!(pick_image(&path).unwrap().media_type(), "image/jpeg");
    }

    #[test]
    fn rejects_non_images() {
        let temp = TempDir::new().unwrap();
        let text = temp.path().join("notes.txt");
        let bare = temp.path().join("noext");
        fs::write(&text, "hello").unwrap();
        fs::write(&bare, "hello").unwrap();

        assert!(matches!(
            pick_image(&text),
            Err(PickError::NotAnImage { media_type, .. }) if media_type == "text/plain"
        ));
        assert!(matches!(
            pick_image(&bare),
            Err(PickError::NotAnImage { media_type, .. }) if media_type == "unknown type"
        ));
    }

    #[test]
    fn rejects_oversized_images() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("huge.png");
        let file = fs::File::create(&path).unwrap();
        file.set_len(MAX_IMAGE_BYTES + 1).unwrap();

        assert!(matches!(
            pick_image(&path),
            Err(PickError::TooLarge { size, .. }) if size == MAX_IMAGE_BYTES + 1
        ));
    }

    #[test]
    fn missing_file_and_directory_are_errors() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            pick_image(&temp.path().join("gone.png")),
            Err(PickError::Read { .. })
        ));
        assert!(matches!(
            pick_image(temp.path()),
            Err(PickError::NotAFile { .. })
        ));
    }
}

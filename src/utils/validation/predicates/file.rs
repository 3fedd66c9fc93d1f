//! File presence, size, extension and type checks.
//!
//! Metadata checks always run. When the caller supplied the file bytes, the
//! image preset additionally sniffs the content so a renamed file cannot pass
//! as a picture.

use image::guess_format;
use log::debug;

use crate::utils::error_messages::*;
use crate::utils::validation::constants::*;
use crate::utils::validation::rules::{FileOptions, MediaOptions};
use crate::utils::validation::types::{FileHandle, ValidationResult};

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Generic file check. An absent optional file is valid.
pub fn file(selected: Option<&FileHandle>, options: &FileOptions) -> ValidationResult {
    let Some(handle) = selected else {
        return ValidationResult::check(!options.required, FILE_REQUIRED);
    };

    let size_mb = handle.size_mb();

    if let Some(min) = options.min_size_mb {
        if size_mb < min {
            return ValidationResult::invalid(format!("The file must be at least {} MB.", min));
        }
    }

    if let Some(max) = options.max_size_mb {
        if size_mb > max {
            return ValidationResult::invalid(format!("The file must not exceed {} MB.", max));
        }
    }

    if let Some(extensions) = options.allowed_extensions.as_ref().filter(|e| !e.is_empty()) {
        let extension = handle.extension().unwrap_or_default();
        if !extensions.iter().any(|allowed| allowed.to_lowercase() == extension) {
            return ValidationResult::invalid(format!(
                "Only {} files are allowed.",
                extensions.join(", ")
            ));
        }
    }

    if let Some(types) = options.allowed_types.as_ref().filter(|t| !t.is_empty()) {
        if !types.iter().any(|allowed| *allowed == handle.mime_type) {
            return ValidationResult::invalid(FILE_TYPE_NOT_ALLOWED);
        }
    }

    ValidationResult::valid()
}

/// Image preset: jpg, jpeg, png, webp or avif
pub fn image(selected: Option<&FileHandle>, options: &MediaOptions) -> ValidationResult {
    let result = file(
        selected,
        &FileOptions {
            allowed_extensions: Some(to_owned_list(&IMAGE_EXTENSIONS)),
            allowed_types: Some(to_owned_list(&IMAGE_MIME_TYPES)),
            max_size_mb: Some(options.max_size_mb),
            min_size_mb: None,
            required: options.required,
        },
    );

    if !result.is_valid {
        return result;
    }

    match selected.and_then(|handle| handle.content.as_deref()) {
        Some(bytes) => match guess_format(bytes) {
            Ok(format) => {
                debug!("Image content recognised as {:?}", format);
                ValidationResult::valid()
            }
            Err(_) => ValidationResult::invalid(FILE_NOT_AN_IMAGE),
        },
        None => result,
    }
}

/// Document preset: office documents, pdf, csv and plain text
pub fn document(selected: Option<&FileHandle>, options: &MediaOptions) -> ValidationResult {
    file(
        selected,
        &FileOptions {
            allowed_extensions: Some(to_owned_list(&DOCUMENT_EXTENSIONS)),
            allowed_types: Some(to_owned_list(&DOCUMENT_MIME_TYPES)),
            max_size_mb: Some(options.max_size_mb),
            min_size_mb: None,
            required: options.required,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;
    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_presence() {
        let optional = FileOptions::default();
        let required = FileOptions {
            required: true,
            ..Default::default()
        };

        assert!(file(None, &optional).is_valid);
        assert_eq!(file(None, &required).message, FILE_REQUIRED);
    }

    #[test]
    fn test_size_bounds() {
        let options = FileOptions {
            min_size_mb: Some(1.0),
            max_size_mb: Some(5.0),
            ..Default::default()
        };

        let cases = vec![
            (FileHandle::new("a.pdf", MB / 2, "application/pdf"), false),
            (FileHandle::new("a.pdf", MB, "application/pdf"), true),
            (FileHandle::new("a.pdf", 5 * MB, "application/pdf"), true),
            (FileHandle::new("a.pdf", 5 * MB + 1, "application/pdf"), false),
        ];

        for (handle, expected) in cases {
            assert_eq!(
                file(Some(&handle), &options).is_valid,
                expected,
                "Unexpected verdict for {} bytes",
                handle.size
            );
        }
        let big = FileHandle::new("a.pdf", 6 * MB, "application/pdf");
        assert_eq!(file(Some(&big), &options).message, "The file must not exceed 5 MB.");
    }

    #[test]
    fn test_extension_and_type() {
        let options = FileOptions {
            allowed_extensions: Some(vec!["PDF".to_string()]),
            allowed_types: Some(vec!["application/pdf".to_string()]),
            ..Default::default()
        };

        let ok = FileHandle::new("boleta.Pdf", 100, "application/pdf");
        assert!(file(Some(&ok), &options).is_valid);

        let wrong_extension = FileHandle::new("boleta.exe", 100, "application/pdf");
        assert_eq!(
            file(Some(&wrong_extension), &options).message,
            "Only PDF files are allowed."
        );

        let wrong_type = FileHandle::new("boleta.pdf", 100, "application/x-msdownload");
        assert_eq!(file(Some(&wrong_type), &options).message, FILE_TYPE_NOT_ALLOWED);
    }

    #[test]
    fn test_empty_lists_do_not_restrict() {
        let options = FileOptions {
            allowed_extensions: Some(vec![]),
            allowed_types: Some(vec![]),
            ..Default::default()
        };
        let handle = FileHandle::new("notes", 10, "");
        assert!(file(Some(&handle), &options).is_valid);
    }

    #[test]
    fn test_image_preset() {
        let options = MediaOptions {
            max_size_mb: 2.0,
            required: true,
        };

        assert_eq!(image(None, &options).message, FILE_REQUIRED);
        assert!(image(Some(&FileHandle::new("foto.PNG", 1000, "image/png")), &options).is_valid);
        assert!(!image(Some(&FileHandle::new("foto.gif", 1000, "image/gif")), &options).is_valid);
        assert!(!image(Some(&FileHandle::new("foto.png", 3 * MB, "image/png")), &options).is_valid);
    }

    #[test]
    fn test_image_content_is_sniffed() {
        let options = MediaOptions::default();

        let real = FileHandle::new("foto.png", 0, "image/png").with_content(PNG_MAGIC.to_vec());
        assert!(image(Some(&real), &options).is_valid);

        let fake = FileHandle::new("foto.png", 0, "image/png")
            .with_content(b"MZ\x90\0 this is an executable".to_vec());
        assert_eq!(image(Some(&fake), &options).message, FILE_NOT_AN_IMAGE);
    }

    #[test]
    fn test_document_preset() {
        let options = MediaOptions::default();
        let sheet = FileHandle::new(
            "notas.xlsx",
            2048,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        );
        assert!(document(Some(&sheet), &options).is_valid);

        let picture = FileHandle::new("notas.png", 2048, "image/png");
        assert!(!document(Some(&picture), &options).is_valid);
    }
}

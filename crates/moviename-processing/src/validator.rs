use moviename_core::constants::{ALLOWED_MIME_TYPES, MAX_UPLOAD_BYTES};
use moviename_core::{AppError, FileInput};

/// Why a candidate file was not accepted into upload state
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Unsupported file type: {content_type}. Please choose an image (JPEG, PNG, WebP, GIF) or a video (MP4, WebM, Ogg)")]
    UnsupportedType { content_type: String },

    #[error("File too large: {size} bytes (max: {max} bytes). Please choose a smaller file")]
    TooLarge { size: u64, max: u64 },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Input validator
///
/// Gates files before they become the staged `MediaInput`. Pure: no I/O,
/// no state.
#[derive(Debug, Clone)]
pub struct InputValidator {
    max_file_size: u64,
    allowed_content_types: Vec<String>,
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new(
            MAX_UPLOAD_BYTES,
            ALLOWED_MIME_TYPES.iter().map(|ct| ct.to_string()).collect(),
        )
    }
}

impl InputValidator {
    pub fn new(max_file_size: u64, allowed_content_types: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_content_types,
        }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Exact match against the allow-list; `video/quicktime` is not `video/*`.
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        if !self
            .allowed_content_types
            .iter()
            .any(|ct| ct == content_type)
        {
            return Err(ValidationError::UnsupportedType {
                content_type: content_type.to_string(),
            });
        }

        Ok(())
    }

    /// The limit is inclusive.
    pub fn validate_file_size(&self, size: u64) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::TooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Type first, then size.
    pub fn validate(&self, candidate: &FileInput) -> Result<(), ValidationError> {
        self.validate_content_type(&candidate.declared_mime_type)?;
        self.validate_file_size(candidate.size_bytes)?;
        Ok(())
    }

    /// Validate an optional candidate. `None` is not a rejection: callers use
    /// it to clear the current selection, so it passes straight through.
    pub fn accept(
        &self,
        candidate: Option<FileInput>,
    ) -> Option<Result<FileInput, ValidationError>> {
        candidate.map(|file| match self.validate(&file) {
            Ok(()) => Ok(file),
            Err(e) => {
                tracing::debug!(name = %file.name, error = %e, "File rejected by validator");
                Err(e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    fn file(content_type: &str, size: usize) -> FileInput {
        FileInput::new("candidate", content_type, vec![0u8; size])
    }

    #[test]
    fn test_allowed_types_accepted() {
        let validator = InputValidator::default();
        for ct in ALLOWED_MIME_TYPES {
            assert!(validator.validate(&file(ct, 1024)).is_ok(), "{ct}");
        }
    }

    #[test]
    fn test_unlisted_types_rejected() {
        let validator = InputValidator::default();
        for ct in [
            "video/quicktime",
            "image/svg+xml",
            "application/pdf",
            "IMAGE/JPEG",
            "image/jpeg; charset=binary",
            "video/",
            "",
        ] {
            assert!(
                matches!(
                    validator.validate(&file(ct, 10)),
                    Err(ValidationError::UnsupportedType { .. })
                ),
                "{ct}"
            );
        }
    }

    #[test]
    fn test_size_limit_inclusive() {
        let validator = InputValidator::default();
        assert!(validator.validate_file_size(5 * MIB).is_ok());
        assert_eq!(
            validator.validate_file_size(5 * MIB + 1),
            Err(ValidationError::TooLarge {
                size: 5 * MIB + 1,
                max: 5 * MIB
            })
        );
    }

    #[test]
    fn test_oversized_allowed_type_is_too_large() {
        let validator = InputValidator::default();
        let big = file("video/mp4", (5 * MIB + 1) as usize);
        assert!(matches!(
            validator.validate(&big),
            Err(ValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_type_checked_before_size() {
        let validator = InputValidator::default();
        let big_pdf = file("application/pdf", (6 * MIB) as usize);
        assert!(matches!(
            validator.validate(&big_pdf),
            Err(ValidationError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_messages_distinguish_reasons() {
        let type_msg = ValidationError::UnsupportedType {
            content_type: "text/plain".to_string(),
        }
        .to_string();
        let size_msg = ValidationError::TooLarge { size: 10, max: 5 }.to_string();
        assert!(type_msg.starts_with("Unsupported file type"));
        assert!(size_msg.starts_with("File too large"));
    }

    #[test]
    fn test_accept_none_is_noop() {
        let validator = InputValidator::default();
        assert!(validator.accept(None).is_none());
    }

    #[test]
    fn test_accept_returns_file() {
        let validator = InputValidator::default();
        let accepted = validator
            .accept(Some(file("image/png", 200 * 1024)))
            .unwrap()
            .unwrap();
        assert_eq!(accepted.declared_mime_type, "image/png");
    }

    #[test]
    fn test_custom_validator() {
        let validator = InputValidator::new(100, vec!["image/png".to_string()]);
        assert!(validator.validate(&file("image/png", 100)).is_ok());
        assert!(validator.validate(&file("image/png", 101)).is_err());
        assert!(validator.validate(&file("image/jpeg", 1)).is_err());
    }
}

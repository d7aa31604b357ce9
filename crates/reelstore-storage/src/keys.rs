//! Filename sanitization shared by storage backends.
//!
//! Uploads name their own files, so the client-supplied name is reduced to a single safe
//! path segment before it is joined onto the storage root.

use crate::traits::{StorageError, StorageResult};

const MAX_FILENAME_BYTES: usize = 255;

/// Reduce an uploaded filename to one path segment that stays inside the storage root.
///
/// Both `/` and `\` are treated as separators. Empty, `.`, `..` and other dot-only
/// segments are dropped and the last remaining segment is kept, so `../../etc/passwd`
/// becomes `passwd` and `C:\clips\a.mp4` becomes `a.mp4`. Control characters are removed
/// and the result is capped at 255 bytes.
///
/// Returns `StorageError::InvalidKey` when nothing usable remains (`..`, `/`, an empty name).
pub fn sanitize_filename(original: &str) -> StorageResult<String> {
    let segment = original
        .split(|c: char| c == '/' || c == '\\')
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.chars().all(|c| c == '.'))
        .last()
        .ok_or_else(|| {
            StorageError::InvalidKey(format!("Filename has no usable name: {:?}", original))
        })?;

    let cleaned: String = segment
        .chars()
        .filter(|c| !c.is_control())
        // A drive prefix such as `C:` would make the join absolute on Windows.
        .map(|c| if c == ':' { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return Err(StorageError::InvalidKey(format!(
            "Filename has no usable name: {:?}",
            original
        )));
    }

    let mut end = cleaned.len().min(MAX_FILENAME_BYTES);
    while !cleaned.is_char_boundary(end) {
        end -= 1;
    }

    Ok(cleaned[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_is_kept() {
        assert_eq!(sanitize_filename("a.mp4").unwrap(), "a.mp4");
        assert_eq!(sanitize_filename("my clip.v2.mov").unwrap(), "my clip.v2.mov");
    }

    #[test]
    fn test_traversal_is_stripped() {
        assert_eq!(sanitize_filename("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("/etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini").unwrap(), "boot.ini");
        assert_eq!(sanitize_filename("videos/../a.mp4").unwrap(), "a.mp4");
    }

    #[test]
    fn test_windows_paths() {
        assert_eq!(sanitize_filename("C:\\clips\\a.mp4").unwrap(), "a.mp4");
        assert_eq!(sanitize_filename("C:a.mp4").unwrap(), "C_a.mp4");
    }

    #[test]
    fn test_nothing_usable_is_rejected() {
        for name in ["", "..", "/", "../..", "./", "...", " / "] {
            assert!(
                matches!(sanitize_filename(name), Err(StorageError::InvalidKey(_))),
                "expected {:?} to be rejected",
                name
            );
        }
    }

    #[test]
    fn test_control_characters_removed() {
        assert_eq!(sanitize_filename("a\u{0}b\n.mp4").unwrap(), "ab.mp4");
    }

    #[test]
    fn test_long_names_are_truncated_on_char_boundary() {
        let name = "é".repeat(200);
        let sanitized = sanitize_filename(&name).unwrap();
        assert!(sanitized.len() <= 255);
        assert!(sanitized.chars().all(|c| c == 'é'));
    }
}

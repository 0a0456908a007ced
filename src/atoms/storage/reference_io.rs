use std::fs;
use std::path::Path;

use crate::types::{DraftError, DraftResult};

/// Reads a referenced text file (a voice profile, for instance), keeping at
/// most `max_bytes` and never splitting a character.
pub fn read_reference(path: &Path, max_bytes: usize) -> DraftResult<String> {
    let mut content = fs::read_to_string(path).map_err(|e| DraftError::storage(path, e))?;
    truncate_on_char_boundary(&mut content, max_bytes);
    Ok(content)
}

fn truncate_on_char_boundary(text: &mut String, max_bytes: usize) {
    if text.len() <= max_bytes {
        return;
    }
    let mut cut = max_bytes;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_reference_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voice.md");
        fs::write(&path, "Warm, direct, short sentences.").unwrap();

        assert_eq!(
            read_reference(&path, 1024).unwrap(),
            "Warm, direct, short sentences."
        );
    }

    #[test]
    fn test_read_reference_truncates_on_char_boundary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voice.md");
        // "é" is two bytes; a cut at 2 would land inside it
        fs::write(&path, "aéb").unwrap();

        assert_eq!(read_reference(&path, 2).unwrap(), "a");
        assert_eq!(read_reference(&path, 3).unwrap(), "aé");
    }

    #[test]
    fn test_read_reference_missing_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_reference(&dir.path().join("absent.md"), 10).unwrap_err();
        assert!(matches!(err, DraftError::Storage { .. }));
    }
}

//! High score file layout
//!
//! ```text
//! string  signature
//! 8 x { string name, u32 score, i64 stamp }
//! ```

use super::PersistenceError;
use super::codec::{BinaryReader, BinaryWriter};
use crate::highscores::{DEFAULT_NAME, HighScoreEntry, MAX_HIGH_SCORES};

/// Literal header every valid table starts with
pub const HIGH_SCORE_SIGNATURE: &str = "GI Space Invaders - Defenders of Sol v1.0";

/// Serialize exactly `MAX_HIGH_SCORES` records; missing slots are zeroed
pub fn encode_table(entries: &[HighScoreEntry]) -> Vec<u8> {
    let mut writer = BinaryWriter::new();
    writer.write_string(HIGH_SCORE_SIGNATURE);

    for i in 0..MAX_HIGH_SCORES {
        match entries.get(i) {
            Some(entry) => {
                writer.write_string(&entry.name);
                writer.write_u32(entry.score);
                writer.write_i64(entry.stamp);
            }
            None => {
                writer.write_string(DEFAULT_NAME);
                writer.write_u32(0);
                writer.write_i64(0);
            }
        }
    }

    writer.into_bytes()
}

/// Parse a table, rejecting anything without the exact signature
pub fn decode_table(bytes: &[u8]) -> Result<Vec<HighScoreEntry>, PersistenceError> {
    let mut reader = BinaryReader::new(bytes);

    let signature = reader.read_string()?;
    if signature != HIGH_SCORE_SIGNATURE {
        return Err(PersistenceError::BadSignature { found: signature });
    }

    let mut entries = Vec::with_capacity(MAX_HIGH_SCORES);
    for _ in 0..MAX_HIGH_SCORES {
        let name = reader.read_string()?;
        let score = reader.read_u32()?;
        let stamp = reader.read_i64()?;
        entries.push(HighScoreEntry::new(name, score, stamp));
    }

    if !reader.is_at_end() {
        log::debug!(
            "Ignoring {} trailing bytes in high score file",
            bytes.len() - reader.offset()
        );
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_pads_missing_entries() {
        let entries = vec![HighScoreEntry::new("ACE".to_string(), 500, 7)];
        let decoded = decode_table(&encode_table(&entries)).expect("decode");

        assert_eq!(decoded.len(), MAX_HIGH_SCORES);
        assert_eq!(decoded[0].name, "ACE");
        assert_eq!(decoded[0].score, 500);
        assert_eq!(decoded[0].stamp, 7);
        assert!(decoded[1..].iter().all(|e| e.name == DEFAULT_NAME && e.score == 0));
    }

    #[test]
    fn test_decode_rejects_foreign_signature() {
        let mut writer = BinaryWriter::new();
        writer.write_string("Some Other Game v2");
        match decode_table(&writer.into_bytes()) {
            Err(PersistenceError::BadSignature { found }) => {
                assert_eq!(found, "Some Other Game v2")
            }
            other => panic!("expected bad signature, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_truncated_table() {
        let bytes = encode_table(&[]);
        let cut = &bytes[..bytes.len() - 3];
        assert!(matches!(
            decode_table(cut),
            Err(PersistenceError::Truncated { .. })
        ));
    }

    #[test]
    fn test_markers_are_not_persisted() {
        let mut entry = HighScoreEntry::new("---".to_string(), 90, 1);
        entry.marker = true;
        let decoded = decode_table(&encode_table(&[entry])).expect("decode");
        assert!(!decoded[0].marker);
    }
}

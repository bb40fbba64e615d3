//! Per-line record decoding.
//!
//! Each complete line from the framer is one JSON-encoded [`StreamRecord`].
//! Decoding is isolated per line: a malformed line yields a [`DecodeError`]
//! carrying the offending input, and the stream controller logs it and
//! moves on — one bad line never aborts the transfer.

use thiserror::Error;

use crate::models::StreamRecord;

/// A line that failed to parse or failed shape validation.
#[derive(Debug, Error)]
#[error("malformed stream record: {source} (line: {line:?})")]
pub struct DecodeError {
    pub line: String,
    #[source]
    pub source: serde_json::Error,
}

/// Decode one NDJSON line into a [`StreamRecord`].
///
/// The required shape (`status`, `total`, `completed` present with the
/// right types, `status` one of the known values) is enforced by the serde
/// definition; a record without `item` is a valid pure progress tick, and
/// unknown extra fields are tolerated.
pub fn decode_record(line: &str) -> Result<StreamRecord, DecodeError> {
    serde_json::from_str(line).map_err(|source| DecodeError {
        line: line.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordStatus;

    #[test]
    fn test_decode_full_record() {
        let line = r#"{"status":"processing","total":5,"completed":2,"item":{"id":"A","title":"T","bodyText":"B","summaryText":"S"}}"#;
        let record = decode_record(line).unwrap();
        assert_eq!(record.status, RecordStatus::Processing);
        assert_eq!(record.total, 5);
        assert_eq!(record.completed, 2);
        assert_eq!(record.item.unwrap().id, "A");
    }

    #[test]
    fn test_decode_progress_tick_without_item() {
        let record = decode_record(r#"{"status":"fetching","total":10,"completed":0}"#).unwrap();
        assert_eq!(record.status, RecordStatus::Fetching);
        assert!(record.item.is_none());
    }

    #[test]
    fn test_decode_tolerates_extra_fields() {
        let record =
            decode_record(r#"{"status":"completed","total":1,"completed":1,"elapsedMs":812}"#)
                .unwrap();
        assert_eq!(record.status, RecordStatus::Completed);
    }

    #[test]
    fn test_decode_rejects_invalid_json() {
        let err = decode_record(r#"{"status":"fetch"#).unwrap_err();
        assert_eq!(err.line, r#"{"status":"fetch"#);
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        assert!(decode_record(r#"{"status":"fetching","total":3}"#).is_err());
        assert!(decode_record(r#"{"total":3,"completed":1}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_wrong_types() {
        assert!(decode_record(r#"{"status":"fetching","total":"3","completed":0}"#).is_err());
        assert!(decode_record(r#"{"status":"fetching","total":-1,"completed":0}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_unknown_status() {
        assert!(decode_record(r#"{"status":"paused","total":3,"completed":0}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(decode_record("[1,2,3]").is_err());
        assert!(decode_record("not json at all").is_err());
    }
}

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Ingest errors
// ---------------------------------------------------------------------------

/// Why a file was rejected. Line numbers are 1-based and count only
/// non-empty lines.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{token} is not a number (line {line})")]
    Parse { line: usize, token: String },

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Shape problems in an otherwise numeric table.
///
/// A file with no data lines is not one of them: it loads with zero datasets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("must be at least two columns (line {line})")]
    TooFewColumns { line: usize },

    #[error("must be the same number of columns throughout the file (lines {previous} and {line})")]
    ColumnMismatch { previous: usize, line: usize },
}

// ---------------------------------------------------------------------------
// Statistics errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("statistics need at least two samples, got {samples}")]
    DegenerateInput { samples: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_lines() {
        let err = IngestError::Parse {
            line: 4,
            token: "abc".into(),
        };
        assert_eq!(err.to_string(), "abc is not a number (line 4)");

        let err = IngestError::from(StructureError::ColumnMismatch {
            previous: 2,
            line: 3,
        });
        let msg = err.to_string();
        assert!(msg.contains("lines 2 and 3"));
    }

    #[test]
    fn degenerate_input_reports_sample_count() {
        let err = StatsError::DegenerateInput { samples: 1 };
        assert!(err.to_string().contains("got 1"));
    }
}

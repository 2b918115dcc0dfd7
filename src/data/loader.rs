use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::error::{IngestError, StructureError};
use super::model::{Dataset, Registry, Touched};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse one file's content and merge the resulting datasets into `registry`.
///
/// The file is taken whole or not at all: on any error the registry is left
/// untouched. On success the returned entries list every dataset produced by
/// the file, in column order.
pub fn ingest(
    registry: &mut Registry,
    path: &Path,
    content: &str,
) -> Result<Vec<Touched>, IngestError> {
    let datasets = parse_datasets(path, content)?;
    Ok(merge(registry, datasets))
}

/// Outcome of one file in a batch.
#[derive(Debug)]
pub struct FileReport {
    /// File name as shown to the user (last path component).
    pub file_name: String,
    pub outcome: Result<Vec<Touched>, IngestError>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// One-line, user-facing summary.
    pub fn message(&self) -> String {
        match &self.outcome {
            Ok(_) => format!("File '{}' has been loaded.", self.file_name),
            Err(e) => format!("Error in file '{}': {e}.", self.file_name),
        }
    }
}

/// One file read and parsed, not yet merged.
#[derive(Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub result: Result<Vec<Dataset>, IngestError>,
}

/// Read and ingest a batch of files.
///
/// Files are read and parsed in parallel; merging happens afterwards on the
/// calling thread, in the order of `paths`. One report per path.
pub fn ingest_files(registry: &mut Registry, paths: &[PathBuf]) -> Vec<FileReport> {
    merge_parsed(registry, parse_files(paths))
}

/// Read and parse every file in parallel. Touches no shared state, so it can
/// run on any thread.
pub fn parse_files(paths: &[PathBuf]) -> Vec<ParsedFile> {
    log::debug!("Parsing batch of {} file(s)", paths.len());

    paths
        .par_iter()
        .map(|path| ParsedFile {
            path: path.clone(),
            file_name: display_name(path),
            result: load_datasets(path),
        })
        .collect()
}

/// Merge parsed files into `registry`, in order, one report per file.
pub fn merge_parsed(registry: &mut Registry, parsed: Vec<ParsedFile>) -> Vec<FileReport> {
    parsed
        .into_iter()
        .map(|ParsedFile { file_name, result, .. }| {
            let outcome = result.map(|datasets| merge(registry, datasets));
            match &outcome {
                Ok(touched) => log::info!(
                    "Loaded '{file_name}' as {:?}, registry now holds {}",
                    touched.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
                    registry.len()
                ),
                Err(e) => log::warn!("Rejected '{file_name}': {e}"),
            }
            FileReport { file_name, outcome }
        })
        .collect()
}

/// Dataset name for the first voltage column of `path`: the file name with
/// its last extension removed.
pub fn dataset_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

fn load_datasets(path: &Path) -> Result<Vec<Dataset>, IngestError> {
    // The handle lives only inside read_to_string.
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_datasets(path, &content)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Turn file content into one dataset per voltage column.
///
/// A file without data lines yields no datasets.
pub fn parse_datasets(path: &Path, content: &str) -> Result<Vec<Dataset>, IngestError> {
    let mut columns = parse_columns(content)?.into_iter();
    let Some(time) = columns.next() else {
        return Ok(Vec::new());
    };
    let stem = dataset_stem(path);

    Ok(columns
        .enumerate()
        .map(|(j, voltage)| {
            let col = j + 1;
            let name = if col > 1 {
                format!("{stem} ({col})")
            } else {
                stem.clone()
            };
            Dataset {
                name,
                time: time.clone(),
                voltage,
            }
        })
        .collect())
}

/// Parse a whitespace-separated numeric table and return it column-wise.
///
/// Blank lines are skipped and do not count towards line numbers. The first
/// line fixes the column count, which must be at least two. Content with no
/// data lines at all returns no columns.
pub fn parse_columns(content: &str) -> Result<Vec<Vec<f64>>, IngestError> {
    let mut data: Vec<Vec<f64>> = Vec::new();

    let lines = content.split(['\r', '\n']).filter(|l| !l.is_empty());

    for (i, row) in lines.enumerate() {
        let line = i + 1;
        let numbers = parse_row(row, line)?;

        if data.is_empty() {
            if numbers.len() < 2 {
                return Err(StructureError::TooFewColumns { line }.into());
            }
            data = vec![Vec::new(); numbers.len()];
        } else if numbers.len() != data.len() {
            return Err(StructureError::ColumnMismatch {
                previous: line - 1,
                line,
            }
            .into());
        }

        for (column, value) in data.iter_mut().zip(numbers) {
            column.push(value);
        }
    }

    Ok(data)
}

fn parse_row(row: &str, line: usize) -> Result<Vec<f64>, IngestError> {
    row.split_whitespace()
        .map(|tok| match tok.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(IngestError::Parse {
                line,
                token: tok.to_string(),
            }),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

fn merge(registry: &mut Registry, datasets: Vec<Dataset>) -> Vec<Touched> {
    datasets
        .into_iter()
        .map(|ds| {
            let name = ds.name.clone();
            let index = registry.upsert(ds);
            Touched { name, index }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(reg: &Registry) -> Vec<String> {
        reg.iter().map(|d| d.name.clone()).collect()
    }

    #[test]
    fn two_column_file() {
        let mut reg = Registry::default();
        let touched = ingest(&mut reg, Path::new("/data/eeg.txt"), "0 1\n1 2\n2 3\n").unwrap();

        assert_eq!(
            touched,
            vec![Touched {
                name: "eeg".into(),
                index: 0
            }]
        );
        let ds = reg.get(0).unwrap();
        assert_eq!(ds.name, "eeg");
        assert_eq!(ds.time, vec![0.0, 1.0, 2.0]);
        assert_eq!(ds.voltage, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn extra_columns_get_index_suffix() {
        let mut reg = Registry::default();
        let touched = ingest(
            &mut reg,
            Path::new("rec.txt"),
            "0\t1.5\t-2\n0.5  2.5  -3\n",
        )
        .unwrap();

        assert_eq!(names(&reg), ["rec", "rec (2)"]);
        assert_eq!(touched[1].index, 1);
        let second = reg.get(reg.position("rec (2)").unwrap()).unwrap();
        assert_eq!(second.time, vec![0.0, 0.5]);
        assert_eq!(second.voltage, vec![-2.0, -3.0]);

        ingest(&mut reg, Path::new("wide.txt"), "0 1 2 3\n").unwrap();
        assert_eq!(
            names(&reg),
            ["rec", "rec (2)", "wide", "wide (2)", "wide (3)"]
        );
    }

    #[test]
    fn only_last_extension_is_stripped() {
        assert_eq!(dataset_stem(Path::new("dir/s1.run2.txt")), "s1.run2");
        assert_eq!(dataset_stem(Path::new("noext")), "noext");
    }

    #[test]
    fn blank_lines_and_crlf_are_ignored() {
        let cols = parse_columns("\r\n0 1\r\n\r\n1 2\r\n\n").unwrap();
        assert_eq!(cols, vec![vec![0.0, 1.0], vec![1.0, 2.0]]);
    }

    #[test]
    fn accepts_signs_and_exponents() {
        let cols = parse_columns("  -1e-3   +4.5  \n.5 6.\n").unwrap();
        assert_eq!(cols[0], vec![-0.001, 0.5]);
        assert_eq!(cols[1], vec![4.5, 6.0]);
    }

    #[test]
    fn non_numeric_token_reports_its_line() {
        let mut reg = Registry::default();
        ingest(&mut reg, Path::new("keep.txt"), "0 1\n1 2\n").unwrap();

        let err = ingest(&mut reg, Path::new("bad.txt"), "0 1\n\n1 2\n2 x3\n").unwrap_err();
        match err {
            IngestError::Parse { line, token } => {
                assert_eq!(line, 3);
                assert_eq!(token, "x3");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(names(&reg), ["keep"]);
    }

    #[test]
    fn nan_and_infinity_are_rejected() {
        for bad in ["NaN", "inf", "-infinity"] {
            let content = format!("0 1\n1 {bad}\n");
            assert!(matches!(
                parse_columns(&content),
                Err(IngestError::Parse { line: 2, .. })
            ));
        }
    }

    #[test]
    fn single_column_is_rejected() {
        assert!(matches!(
            parse_columns("1\n2\n"),
            Err(IngestError::Structure(StructureError::TooFewColumns { line: 1 }))
        ));
    }

    #[test]
    fn column_count_must_stay_constant() {
        let mut reg = Registry::default();
        let err = ingest(&mut reg, Path::new("a.txt"), "0 1\n1 2\n2 3 4\n").unwrap_err();
        assert!(matches!(
            err,
            IngestError::Structure(StructureError::ColumnMismatch {
                previous: 2,
                line: 3
            })
        ));
        assert!(reg.is_empty());
    }

    #[test]
    fn empty_file_loads_nothing() {
        let mut reg = Registry::default();
        ingest(&mut reg, Path::new("keep.txt"), "0 1\n").unwrap();

        let touched = ingest(&mut reg, Path::new("empty.txt"), "\n\r\n").unwrap();

        assert!(touched.is_empty());
        assert_eq!(names(&reg), ["keep"]);
    }

    #[test]
    fn whitespace_only_line_breaks_column_count() {
        let mut reg = Registry::default();
        let err = ingest(&mut reg, Path::new("gap.txt"), "0 1\n  \t \n1 2\n").unwrap_err();
        assert!(matches!(
            err,
            IngestError::Structure(StructureError::ColumnMismatch {
                previous: 1,
                line: 2
            })
        ));
        assert!(reg.is_empty());
    }

    #[test]
    fn single_row_file_has_no_statistics() {
        use crate::data::error::StatsError;
        use crate::data::stats::compute_stats;

        let mut reg = Registry::default();
        let touched = ingest(&mut reg, Path::new("one.txt"), "0 5\n").unwrap();

        let ds = reg.get(touched[0].index).unwrap();
        assert_eq!(ds.voltage, vec![5.0]);
        assert_eq!(
            compute_stats(ds),
            Err(StatsError::DegenerateInput { samples: 1 })
        );
    }

    #[test]
    fn parse_then_merge_matches_direct_ingest() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("split.txt");
        std::fs::write(&p, "0 1 2\n1 3 4\n").unwrap();

        let parsed = parse_files(std::slice::from_ref(&p));
        assert_eq!(parsed[0].path, p);

        let mut reg = Registry::default();
        let reports = merge_parsed(&mut reg, parsed);
        assert!(reports[0].is_ok());
        assert_eq!(names(&reg), ["split", "split (2)"]);
    }

    #[test]
    fn reingest_is_idempotent() {
        let mut reg = Registry::default();
        let content = "0 1 5\n1 2 6\n2 3 7\n";
        ingest(&mut reg, Path::new("a.txt"), content).unwrap();
        ingest(&mut reg, Path::new("b.txt"), "0 0\n1 1\n").unwrap();
        let before = reg.clone();

        let touched = ingest(&mut reg, Path::new("other/dir/a.txt"), content).unwrap();

        assert_eq!(touched.iter().map(|t| t.index).collect::<Vec<_>>(), [0, 1]);
        assert_eq!(reg.len(), before.len());
        assert!(reg.iter().eq(before.iter()));
    }

    #[test]
    fn reupload_replaces_in_place() {
        let mut reg = Registry::default();
        ingest(&mut reg, Path::new("first.txt"), "0 1\n1 2\n").unwrap();
        ingest(&mut reg, Path::new("second.txt"), "0 1\n1 2\n").unwrap();

        let touched = ingest(&mut reg, Path::new("first.txt"), "0 9\n1 9\n2 9\n").unwrap();

        assert_eq!(touched[0].index, 0);
        assert_eq!(names(&reg), ["first", "second"]);
        assert_eq!(reg.get(0).unwrap().voltage, vec![9.0, 9.0, 9.0]);
    }

    #[test]
    fn batch_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.txt");
        let missing = dir.path().join("missing.txt");
        std::fs::write(&good, "0 1 2\n1 2 3\n").unwrap();
        std::fs::write(&bad, "0 1\n1\n").unwrap();

        let mut reg = Registry::default();
        let reports = ingest_files(&mut reg, &[bad.clone(), good.clone(), missing]);

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].file_name, "bad.txt");
        assert!(!reports[0].is_ok());
        assert!(reports[1].is_ok());
        assert!(matches!(reports[2].outcome, Err(IngestError::Io { .. })));
        assert_eq!(names(&reg), ["good", "good (2)"]);

        assert_eq!(reports[1].message(), "File 'good.txt' has been loaded.");
        assert_eq!(
            reports[0].message(),
            "Error in file 'bad.txt': must be the same number of columns throughout the file (lines 1 and 2)."
        );
    }

    #[test]
    fn batch_merges_in_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = (0..8)
            .map(|i| {
                let p = dir.path().join(format!("f{i}.txt"));
                std::fs::write(&p, format!("0 {i}\n1 {i}\n")).unwrap();
                p
            })
            .collect();

        let mut reg = Registry::default();
        ingest_files(&mut reg, &paths);

        let expected: Vec<String> = (0..8).map(|i| format!("f{i}")).collect();
        assert_eq!(names(&reg), expected);
    }
}

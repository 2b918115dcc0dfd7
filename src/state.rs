use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

use anyhow::{Context, Result};

use crate::data::loader::{dataset_stem, merge_parsed, parse_files, FileReport, ParsedFile};
use crate::data::model::{Dataset, Registry};

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// The three views reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    OpenFiles,
    Graphs,
    RawData,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::OpenFiles, Section::Graphs, Section::RawData];

    pub fn label(self) -> &'static str {
        match self {
            Section::OpenFiles => "Open Files",
            Section::Graphs => "Data and Analysis",
            Section::RawData => "Raw Data",
        }
    }
}

// ---------------------------------------------------------------------------
// Background parsing
// ---------------------------------------------------------------------------

/// Batches parsed on the rayon pool, waiting to be merged on the UI thread.
///
/// Batches are numbered when started and merged strictly in that order, even
/// if a later batch finishes parsing first.
struct PendingBatches {
    tx: Sender<(u64, Vec<ParsedFile>)>,
    rx: Receiver<(u64, Vec<ParsedFile>)>,
    next_seq: u64,
    next_merge: u64,
    ready: BTreeMap<u64, Vec<ParsedFile>>,
}

impl Default for PendingBatches {
    fn default() -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            next_seq: 0,
            next_merge: 0,
            ready: BTreeMap::new(),
        }
    }
}

impl PendingBatches {
    fn in_flight(&self) -> bool {
        self.next_merge != self.next_seq
    }

    fn spawn(&mut self, paths: Vec<PathBuf>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let tx = self.tx.clone();
        rayon::spawn(move || {
            let parsed = parse_files(&paths);
            if tx.send((seq, parsed)).is_err() {
                log::debug!("Batch {seq} finished after the viewer closed");
            }
        });
    }

    /// Next batch that may be merged now, if it has arrived.
    fn take_next(&mut self) -> Option<Vec<ParsedFile>> {
        while let Ok((seq, parsed)) = self.rx.try_recv() {
            self.ready.insert(seq, parsed);
        }
        let parsed = self.ready.remove(&self.next_merge)?;
        self.next_merge += 1;
        Some(parsed)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Every dataset loaded this session.
    pub registry: Registry,

    /// Which view is shown.
    pub section: Section,

    /// Index of the active dataset in `registry`.
    pub current: Option<usize>,

    /// Per-file load messages awaiting dismissal.
    pub reports: Vec<FileReport>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    pending: PendingBatches,
}

impl AppState {
    /// Start reading and parsing a batch of files in the background.
    /// Results are merged by [`AppState::poll_ingest`].
    pub fn start_ingest(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }
        log::debug!("Queued {} file(s) for loading", paths.len());
        self.pending.spawn(paths);
    }

    /// Whether any started batch has not been merged yet.
    pub fn is_loading(&self) -> bool {
        self.pending.in_flight()
    }

    /// Merge every batch that is ready, in start order. Returns whether
    /// anything was merged.
    pub fn poll_ingest(&mut self) -> bool {
        let mut merged = false;
        while let Some(parsed) = self.pending.take_next() {
            self.apply(parsed);
            merged = true;
        }
        merged
    }

    /// Record a report per file and activate the first dataset of the last
    /// file that loaded successfully.
    fn apply(&mut self, parsed: Vec<ParsedFile>) {
        let stems: Vec<String> = parsed.iter().map(|p| dataset_stem(&p.path)).collect();
        let reports = merge_parsed(&mut self.registry, parsed);

        for (stem, report) in stems.iter().zip(&reports) {
            if report.is_ok() {
                if let Some(idx) = self.registry.position(stem) {
                    self.current = Some(idx);
                }
            }
        }

        self.reports.extend(reports);
    }

    /// Block until every started batch is merged.
    #[cfg(test)]
    fn wait_ingest(&mut self) {
        while self.is_loading() {
            let (seq, parsed) = self
                .pending
                .rx
                .recv_timeout(std::time::Duration::from_secs(10))
                .expect("batch did not finish");
            self.pending.ready.insert(seq, parsed);
            self.poll_ingest();
        }
    }

    /// Switch view. Ignored until at least one dataset is loaded.
    pub fn set_section(&mut self, section: Section) {
        if self.registry.is_empty() {
            return;
        }
        self.section = section;
    }

    /// Make a dataset active. Out-of-range indices are ignored.
    pub fn select_dataset(&mut self, index: usize) {
        if index < self.registry.len() {
            self.current = Some(index);
        }
    }

    /// The active dataset, if any.
    pub fn current_dataset(&self) -> Option<&Dataset> {
        self.current.and_then(|idx| self.registry.get(idx))
    }

    /// Remove a single file message.
    pub fn dismiss_report(&mut self, index: usize) {
        if index < self.reports.len() {
            self.reports.remove(index);
        }
    }

    /// Remove all file messages.
    pub fn clear_reports(&mut self) {
        self.reports.clear();
    }

    /// Summary for the top bar.
    pub fn status_line(&self) -> String {
        match self.registry.len() {
            0 => "no data sets found".to_string(),
            1 => "1 data set loaded".to_string(),
            n => format!("{n} data sets loaded"),
        }
    }

    /// Write the registry to `path` as JSON.
    pub fn export_session(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &self.registry)
            .context("writing session JSON")?;
        log::info!(
            "Exported {} data set(s) to {}",
            self.registry.len(),
            path.display()
        );
        Ok(())
    }
}

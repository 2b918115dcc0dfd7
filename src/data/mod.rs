/// Data layer: core types, ingestion, and statistics.
///
/// Architecture:
/// ```text
///   recording.txt  (time  ch1  ch2 ...)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse text → columns, validate shape
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Registry  │  Vec<Dataset>, replace-by-name, ordered
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  mean / sample std-dev of voltage
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod stats;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Dataset – one voltage channel against the shared time axis
// ---------------------------------------------------------------------------

/// A single named time/voltage series.
///
/// `time` and `voltage` always have the same, non-zero length; the loader
/// never builds a dataset that violates this.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub name: String,
    /// Time axis (s).
    pub time: Vec<f64>,
    /// Voltage samples (mV) – same length as `time`.
    pub voltage: Vec<f64>,
}

impl Dataset {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.voltage.len()
    }
}

/// Where an ingested dataset ended up in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Touched {
    pub name: String,
    pub index: usize,
}

// ---------------------------------------------------------------------------
// Registry – all datasets loaded in this session
// ---------------------------------------------------------------------------

/// Ordered collection of datasets, unique by name.
///
/// Insertion order is display order. Inserting a dataset whose name is
/// already present overwrites that entry in place.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Registry {
    datasets: Vec<Dataset>,
}

impl Registry {
    /// Insert or replace by exact name. Returns the index of the entry.
    pub fn upsert(&mut self, dataset: Dataset) -> usize {
        match self.position(&dataset.name) {
            Some(idx) => {
                self.datasets[idx] = dataset;
                idx
            }
            None => {
                self.datasets.push(dataset);
                self.datasets.len() - 1
            }
        }
    }

    /// Index of the dataset with this exact name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.datasets.iter().position(|ds| ds.name == name)
    }

    pub fn get(&self, index: usize) -> Option<&Dataset> {
        self.datasets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.iter()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

use super::error::StatsError;
use super::model::Dataset;

/// Descriptive statistics of a dataset's voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetStats {
    pub mean: f64,
    /// Sample standard deviation (divisor `n - 1`).
    pub std_dev: f64,
}

/// Mean and sample standard deviation of the voltage channel.
///
/// Needs at least two samples; fewer yields [`StatsError::DegenerateInput`].
pub fn compute_stats(dataset: &Dataset) -> Result<DatasetStats, StatsError> {
    let v = &dataset.voltage;
    let n = v.len();
    if n < 2 {
        return Err(StatsError::DegenerateInput { samples: n });
    }

    // Welford's update: no running sum, so large finite samples stay finite.
    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (k, &x) in v.iter().enumerate() {
        let delta = x - mean;
        mean += delta / (k + 1) as f64;
        m2 += delta * (x - mean);
    }
    let std_dev = (m2 / (n - 1) as f64).sqrt();

    Ok(DatasetStats { mean, std_dev })
}

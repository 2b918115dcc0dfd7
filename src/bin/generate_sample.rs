use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

/// Write synthetic EEG recordings as whitespace-separated text.
#[derive(Parser)]
#[command(name = "generate_sample", about = "Generate synthetic EEG text files")]
struct Args {
    /// Directory to write into (created if missing)
    #[arg(long, default_value = "sample_data")]
    output: PathBuf,

    /// Number of recordings
    #[arg(long, default_value_t = 3)]
    files: usize,

    /// Voltage channels per recording
    #[arg(long, default_value_t = 2)]
    channels: usize,

    /// Samples per channel
    #[arg(long, default_value_t = 2000)]
    samples: usize,

    /// Sampling rate in Hz
    #[arg(long, default_value_t = 250.0)]
    rate: f64,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Also write a malformed file to exercise error reporting
    #[arg(long)]
    with_broken: bool,
}

/// Rhythm bands mixed into every channel: (frequency Hz, amplitude mV).
const RHYTHMS: [(f64, f64); 3] = [(6.0, 0.015), (10.0, 0.040), (20.0, 0.010)];

/// Deterministic xoshiro256** generator, so a seed always reproduces the
/// same recordings.
struct SampleRng {
    s: [u64; 4],
}

impl SampleRng {
    /// Expand the seed into the four state words with splitmix64.
    fn from_seed(seed: u64) -> Self {
        let mut sm = seed;
        let mut s = [0u64; 4];
        for word in &mut s {
            sm = sm.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = sm;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            *word = z ^ (z >> 31);
        }
        SampleRng { s }
    }

    fn next_u64(&mut self) -> u64 {
        let [s0, s1, s2, s3] = &mut self.s;
        let out = s1.wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = *s1 << 17;
        *s2 ^= *s0;
        *s3 ^= *s1;
        *s1 ^= *s2;
        *s0 ^= *s3;
        *s2 ^= t;
        *s3 = s3.rotate_left(45);
        out
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Gaussian noise sample (Box-Muller).
    fn noise(&mut self, std_dev: f64) -> f64 {
        let radius = (-2.0 * self.next_f64().max(f64::MIN_POSITIVE).ln()).sqrt();
        let angle = 2.0 * std::f64::consts::PI * self.next_f64();
        std_dev * radius * angle.cos()
    }
}

/// One channel: rhythm mix with random gain and phase, plus white noise.
fn generate_channel(time: &[f64], rng: &mut SampleRng) -> Vec<f64> {
    let components: Vec<(f64, f64, f64)> = RHYTHMS
        .iter()
        .map(|&(freq, amp)| {
            let gain = 0.5 + rng.next_f64();
            let phase = rng.next_f64() * 2.0 * std::f64::consts::PI;
            (freq, amp * gain, phase)
        })
        .collect();

    time.iter()
        .map(|&t| {
            let signal: f64 = components
                .iter()
                .map(|&(freq, amp, phase)| amp * (2.0 * std::f64::consts::PI * freq * t + phase).sin())
                .sum();
            signal + rng.noise(0.005)
        })
        .collect()
}

fn write_recording(path: &Path, time: &[f64], channels: &[Vec<f64>]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for (i, t) in time.iter().enumerate() {
        write!(out, "{t:.4}")?;
        for ch in channels {
            write!(out, "\t{:.6}", ch[i])?;
        }
        writeln!(out)?;
    }
    out.flush()
        .with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.channels == 0 || args.samples == 0 {
        bail!("--channels and --samples must be at least 1");
    }
    if !(args.rate > 0.0) {
        bail!("--rate must be positive");
    }

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let mut rng = SampleRng::from_seed(args.seed);
    let time: Vec<f64> = (0..args.samples).map(|i| i as f64 / args.rate).collect();

    for n in 0..args.files {
        let channels: Vec<Vec<f64>> = (0..args.channels)
            .map(|_| generate_channel(&time, &mut rng))
            .collect();
        let path = args.output.join(format!("eeg_{:02}.txt", n + 1));
        write_recording(&path, &time, &channels)?;
        println!("Wrote {} ({} channels × {} samples)", path.display(), args.channels, args.samples);
    }

    if args.with_broken {
        let path = args.output.join("broken.txt");
        std::fs::write(&path, "0.000 0.01\n0.004 0.02 0.03\n0.008 n/a\n")
            .with_context(|| format!("creating {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

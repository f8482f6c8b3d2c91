//! Wavetable viewer pipeline
//!
//! Selecting a wavetable entry loads the file and starts streaming: every
//! `WT_REFRESH_INTERVAL` the UI calls [`WtScope::tick`], which pulls the next
//! wave and replaces the plotted points. Unlike the sound scope this runs
//! entirely on the UI thread, so a single buffer is enough.

use super::spread_x;
use crate::chart::Point;
use hound::{SampleFormat, WavReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Samples in one wave of a wavetable
pub const SAMPLES_PER_WAVE: usize = 2048;

/// Wavetable directory on the instrument
pub const DEFAULT_WAVETABLE_DIR: &str = "/udata/delia/wavetables";

pub fn default_wavetable_dir() -> PathBuf {
    PathBuf::from(DEFAULT_WAVETABLE_DIR)
}

#[derive(Error, Debug)]
pub enum WavetableError {
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Wavetable '{0}' holds less than one wave")]
    TooShort(PathBuf),
}

/// Source of successive waves for the viewer
pub trait WavetableSource {
    /// Open `path`, replacing anything loaded before
    fn load(&mut self, path: &Path) -> bool;

    /// Samples of the next wave; empty when exhausted or nothing is loaded
    fn next_wave_samples(&mut self) -> Vec<f32>;

    fn unload(&mut self);
}

/// WAV-backed wavetable: consecutive runs of `SAMPLES_PER_WAVE` mono samples
#[derive(Debug, Default)]
pub struct WavFile {
    samples: Vec<f32>,
    position: usize,
}

impl WavFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every sample of the first channel, normalised to ±1.0
    pub fn read_samples(path: &Path) -> Result<Vec<f32>, WavetableError> {
        let reader = WavReader::open(path)?;
        let spec = reader.spec();
        let channels = usize::from(spec.channels.max(1));

        let samples: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .into_samples::<f32>()
                .step_by(channels)
                .collect::<Result<_, _>>()?,
            SampleFormat::Int => {
                let scale = 1.0 / (1u64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .step_by(channels)
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<Result<_, _>>()?
            }
        };

        if samples.len() < SAMPLES_PER_WAVE {
            return Err(WavetableError::TooShort(path.to_path_buf()));
        }
        Ok(samples)
    }

    /// Number of whole waves loaded
    pub fn num_waves(&self) -> usize {
        self.samples.len() / SAMPLES_PER_WAVE
    }
}

impl WavetableSource for WavFile {
    fn load(&mut self, path: &Path) -> bool {
        self.unload();
        match Self::read_samples(path) {
            Ok(samples) => {
                self.samples = samples;
                log::debug!("Loaded wavetable {:?} ({} waves)", path, self.num_waves());
                true
            }
            Err(e) => {
                log::warn!("Failed to load wavetable {:?}: {}", path, e);
                false
            }
        }
    }

    fn next_wave_samples(&mut self) -> Vec<f32> {
        let end = self.position + SAMPLES_PER_WAVE;
        match self.samples.get(self.position..end) {
            Some(wave) => {
                self.position = end;
                wave.to_vec()
            }
            None => Vec::new(),
        }
    }

    fn unload(&mut self) {
        self.samples.clear();
        self.position = 0;
    }
}

/// Wavetable viewer state
pub struct WtScope<S: WavetableSource = WavFile> {
    source: S,
    points: Vec<Point>,
    streaming: bool,
    visible: bool,
}

impl WtScope<WavFile> {
    pub fn new() -> Self {
        Self::with_source(WavFile::new())
    }
}

impl Default for WtScope<WavFile> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: WavetableSource> WtScope<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            points: zero_line(SAMPLES_PER_WAVE),
            streaming: false,
            visible: false,
        }
    }

    /// Stop any running stream and start streaming `path`
    ///
    /// If the file can't be opened the viewer shows a flat line instead.
    pub fn load(&mut self, path: &Path) {
        self.streaming = false;
        if self.source.load(path) {
            self.streaming = true;
        } else {
            self.show_zero_scope();
        }
    }

    /// Stop streaming, close the file and clear the plot
    pub fn unload(&mut self) {
        self.streaming = false;
        self.source.unload();
        self.clear();
    }

    /// Pull and plot the next wave; an empty wave keeps the last frame
    pub fn tick(&mut self) {
        if !self.streaming {
            return;
        }
        let samples = self.source.next_wave_samples();
        if samples.is_empty() {
            return;
        }
        let n = samples.len();
        self.points = samples
            .into_iter()
            .enumerate()
            .map(|(i, y)| Point::new(spread_x(i, n), y))
            .collect();
    }

    pub fn show_zero_scope(&mut self) {
        self.points = zero_line(self.points.len().max(1));
    }

    pub fn clear(&mut self) {
        self.points.fill(Point::ORIGIN);
    }

    /// Whether the frame timer should be running
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

fn zero_line(n: usize) -> Vec<Point> {
    (0..n).map(|i| Point::new(spread_x(i, n), 0.0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    fn write_float_wavetable(path: &Path, waves: usize) {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for w in 0..waves {
            for i in 0..SAMPLES_PER_WAVE {
                let phase = i as f32 / SAMPLES_PER_WAVE as f32;
                writer.write_sample(phase * (w + 1) as f32 * 0.1).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_wav_file_streams_whole_waves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SAW.wav");
        write_float_wavetable(&path, 2);

        let mut file = WavFile::new();
        assert!(file.load(&path));
        assert_eq!(file.num_waves(), 2);
        let first = file.next_wave_samples();
        assert_eq!(first.len(), SAMPLES_PER_WAVE);
        assert_eq!(first[0], 0.0);
        assert_eq!(file.next_wave_samples().len(), SAMPLES_PER_WAVE);
        assert!(file.next_wave_samples().is_empty());

        file.unload();
        assert!(file.next_wave_samples().is_empty());
    }

    #[test]
    fn test_wav_file_normalises_int_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SQUARE.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for i in 0..SAMPLES_PER_WAVE {
            let left: i16 = if i < SAMPLES_PER_WAVE / 2 { i16::MIN } else { 16384 };
            writer.write_sample(left).unwrap();
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        let samples = WavFile::read_samples(&path).unwrap();
        assert_eq!(samples.len(), SAMPLES_PER_WAVE);
        assert_eq!(samples[0], -1.0);
        assert_eq!(samples[SAMPLES_PER_WAVE - 1], 0.5);
    }

    #[test]
    fn test_wav_file_rejects_short_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SHORT.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0.5f32).unwrap();
        writer.finalize().unwrap();

        assert!(matches!(WavFile::read_samples(&path), Err(WavetableError::TooShort(_))));
        assert!(!WavFile::new().load(&dir.path().join("MISSING.wav")));
    }

    #[test]
    fn test_scope_streams_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SAW.wav");
        write_float_wavetable(&path, 3);

        let mut scope = WtScope::new();
        scope.load(&path);
        assert!(scope.is_streaming());

        scope.tick();
        let points = scope.points();
        assert_eq!(points.len(), SAMPLES_PER_WAVE);
        assert_eq!(points[0].x, -1.0);
        assert_eq!(points[SAMPLES_PER_WAVE / 2].x, 0.0);
        let first_peak = points[SAMPLES_PER_WAVE - 1].y;

        scope.tick();
        assert!(scope.points()[SAMPLES_PER_WAVE - 1].y > first_peak);
    }

    #[test]
    fn test_scope_exhausted_keeps_last_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ONE.wav");
        write_float_wavetable(&path, 1);

        let mut scope = WtScope::new();
        scope.load(&path);
        scope.tick();
        let last = scope.points().to_vec();
        scope.tick();
        assert_eq!(scope.points(), last.as_slice());
    }

    #[test]
    fn test_scope_load_failure_shows_flat_line() {
        let mut scope = WtScope::new();
        scope.clear();
        scope.load(Path::new("/nonexistent/NOPE.wav"));
        assert!(!scope.is_streaming());
        assert!(scope.points().iter().all(|p| p.y == 0.0));
        assert_eq!(scope.points()[0].x, -1.0);
    }

    #[test]
    fn test_scope_unload_stops_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SAW.wav");
        write_float_wavetable(&path, 2);

        let mut scope = WtScope::new();
        scope.load(&path);
        scope.tick();
        scope.unload();
        assert!(!scope.is_streaming());
        assert!(scope.points().iter().all(|p| *p == Point::ORIGIN));

        scope.tick();
        assert!(scope.points().iter().all(|p| *p == Point::ORIGIN));
    }
}

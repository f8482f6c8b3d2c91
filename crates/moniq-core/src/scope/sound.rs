//! Live sound scope
//!
//! The sample receiver thread calls [`SoundScope::update`] once per frame; the
//! UI calls [`SoundScope::tick`] at the render rate and reads the points with
//! [`SoundScope::snapshot`]. All shared state lives in [`ScopeAtomics`].
//!
//! Points are stored as packed `(x, y)` f32 bit pairs in `AtomicU64`s. The
//! writer always fills the buffer that is not current and then flips the
//! current index with release ordering; the reader resolves the index once per
//! snapshot with acquire ordering. A frame counter bumped before each fill
//! lets the reader detect that a fill overlapped its copy and retry.

use super::{spread_x, DisplayMode, SCOPE_IDLE_FRAME_COUNT, SCOPE_NUM_SAMPLES};
use crate::chart::Point;
use crate::protocol::{SampleFrame, ScopeMode};
use std::sync::atomic::{fence, AtomicBool, AtomicU32, AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;

const XY_ROTATION_SIN: f32 = std::f32::consts::FRAC_1_SQRT_2;
const XY_ROTATION_COS: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Copies tried before a snapshot settles for a possibly mixed frame
const SNAPSHOT_ATTEMPTS: usize = 4;

#[inline]
fn pack(p: Point) -> u64 {
    (u64::from(p.x.to_bits()) << 32) | u64::from(p.y.to_bits())
}

#[inline]
fn unpack(v: u64) -> Point {
    Point::new(f32::from_bits((v >> 32) as u32), f32::from_bits(v as u32))
}

type PointBuffer = [AtomicU64; SCOPE_NUM_SAMPLES];

fn resting_buffer() -> PointBuffer {
    std::array::from_fn(|i| AtomicU64::new(pack(Point::new(spread_x(i, SCOPE_NUM_SAMPLES), 0.0))))
}

/// Lock-free scope state shared between the sample receiver and the UI
pub struct ScopeAtomics {
    buffers: [PointBuffer; 2],
    /// Index of the buffer the renderer reads
    current: AtomicUsize,
    /// Fills started, bumped before the writer touches a buffer
    frames: AtomicU64,
    /// Render zeros until the next frame arrives
    cleared: AtomicBool,
    /// ScopeMode as u8
    mode: AtomicU8,
    visible: AtomicBool,
    /// DisplayMode as u8
    display_mode: AtomicU8,
    /// f32 bits
    idle_threshold: AtomicU32,
    /// Render clock started
    running: AtomicBool,
    /// Last frame stayed inside the idle threshold while in background
    quiet: AtomicBool,
    /// Hidden by the idle timeout
    idle: AtomicBool,
    idle_frames: AtomicU32,
}

impl ScopeAtomics {
    fn new() -> Self {
        Self {
            buffers: [resting_buffer(), resting_buffer()],
            current: AtomicUsize::new(0),
            frames: AtomicU64::new(0),
            cleared: AtomicBool::new(false),
            mode: AtomicU8::new(ScopeMode::Off as u8),
            visible: AtomicBool::new(false),
            display_mode: AtomicU8::new(DisplayMode::Foreground as u8),
            idle_threshold: AtomicU32::new(0.0f32.to_bits()),
            running: AtomicBool::new(false),
            quiet: AtomicBool::new(false),
            idle: AtomicBool::new(false),
            idle_frames: AtomicU32::new(0),
        }
    }
}

/// Cloneable handle to the live sound scope
#[derive(Clone)]
pub struct SoundScope {
    atomics: Arc<ScopeAtomics>,
}

impl SoundScope {
    /// New scope: hidden, mode off, resting at a flat line
    pub fn new() -> Self {
        Self { atomics: Arc::new(ScopeAtomics::new()) }
    }

    /// Start the render clock
    ///
    /// The idle threshold is one pixel of the scope's half height.
    pub fn start(&self, height_px: u32) {
        let threshold = 1.0 / (height_px / 2).max(1) as f32;
        self.atomics.idle_threshold.store(threshold.to_bits(), Ordering::Relaxed);
        self.atomics.running.store(true, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.atomics.running.load(Ordering::Relaxed)
    }

    pub fn idle_threshold(&self) -> f32 {
        f32::from_bits(self.atomics.idle_threshold.load(Ordering::Relaxed))
    }

    pub fn set_mode(&self, mode: ScopeMode) {
        self.atomics.mode.store(mode as u8, Ordering::Relaxed);
    }

    pub fn mode(&self) -> ScopeMode {
        ScopeMode::from_raw(u32::from(self.atomics.mode.load(Ordering::Relaxed)))
    }

    pub fn is_visible(&self) -> bool {
        self.atomics.visible.load(Ordering::Relaxed)
    }

    pub fn display_mode(&self) -> DisplayMode {
        DisplayMode::from_raw(self.atomics.display_mode.load(Ordering::Relaxed))
    }

    /// Alpha for the current display mode
    pub fn alpha(&self) -> f32 {
        self.display_mode().alpha()
    }

    /// Hidden by the idle timeout and not yet woken by sound
    pub fn is_idle(&self) -> bool {
        self.atomics.idle.load(Ordering::Relaxed)
    }

    pub fn idle_frames(&self) -> u32 {
        self.atomics.idle_frames.load(Ordering::Relaxed)
    }

    /// Make visible, keeping the display mode
    pub fn show(&self) {
        self.atomics.visible.store(true, Ordering::Relaxed);
    }

    /// Make visible in `mode`
    pub fn show_with(&self, mode: DisplayMode) {
        self.atomics.display_mode.store(mode as u8, Ordering::Relaxed);
        self.atomics.visible.store(true, Ordering::Relaxed);
    }

    /// Hide, optionally returning to foreground display
    pub fn hide(&self, reset_display_mode: bool) {
        self.atomics.visible.store(false, Ordering::Relaxed);
        if reset_display_mode {
            self.atomics
                .display_mode
                .store(DisplayMode::Foreground as u8, Ordering::Relaxed);
        }
    }

    /// Render all points at the origin until the next frame
    pub fn clear(&self) {
        self.atomics.cleared.store(true, Ordering::Relaxed);
    }

    /// Index of the buffer the renderer currently reads
    pub fn current_buffer(&self) -> usize {
        self.atomics.current.load(Ordering::Acquire)
    }

    /// Consume one sample frame (sample receiver thread)
    pub fn update(&self, frame: &SampleFrame) {
        let a = &*self.atomics;
        let mode = self.mode();
        if mode == ScopeMode::Off {
            return;
        }

        let threshold = self.idle_threshold();
        let background = self.display_mode() == DisplayMode::Background;
        let mut scope_idle = background;

        let back = 1 - a.current.load(Ordering::Acquire);
        a.frames.fetch_add(1, Ordering::Relaxed);
        fence(Ordering::Release);
        for (i, (slot, pair)) in a.buffers[back].iter().zip(frame.chunks_exact(2)).enumerate() {
            let (l, r) = (pair[0], pair[1]);

            if scope_idle && (l.abs() > threshold || r.abs() > threshold) {
                if background {
                    self.show();
                }
                a.idle_frames.store(0, Ordering::Relaxed);
                a.idle.store(false, Ordering::Relaxed);
                scope_idle = false;
            }

            let point = match mode {
                ScopeMode::Xy => Point::new(
                    l * XY_ROTATION_COS - r * XY_ROTATION_SIN,
                    l * XY_ROTATION_SIN + r * XY_ROTATION_COS,
                ),
                _ => Point::new(spread_x(i, SCOPE_NUM_SAMPLES), l + r),
            };
            slot.store(pack(point), Ordering::Relaxed);
        }

        a.current.store(back, Ordering::Release);
        a.cleared.store(false, Ordering::Relaxed);
        a.quiet.store(scope_idle, Ordering::Relaxed);
    }

    /// Advance the render clock by one frame (UI thread)
    pub fn tick(&self) {
        let a = &*self.atomics;
        if !a.running.load(Ordering::Relaxed) {
            return;
        }

        if a.quiet.load(Ordering::Relaxed)
            && self.is_visible()
            && self.display_mode() == DisplayMode::Background
        {
            let frames = a.idle_frames.fetch_add(1, Ordering::Relaxed) + 1;
            if frames >= SCOPE_IDLE_FRAME_COUNT {
                log::debug!("Sound scope idle, hiding");
                self.hide(false);
                a.idle_frames.store(0, Ordering::Relaxed);
                a.idle.store(true, Ordering::Relaxed);
            }
        }
    }

    /// Number of sample frames the writer has started filling
    pub fn frame_count(&self) -> u64 {
        self.atomics.frames.load(Ordering::Acquire)
    }

    /// Points to render, read through the current buffer index
    ///
    /// The copy is retried while a fill overlaps it. A reader that keeps
    /// losing the race gets its last copy, which may mix two frames.
    pub fn snapshot(&self) -> Vec<Point> {
        let a = &*self.atomics;
        if a.cleared.load(Ordering::Relaxed) {
            return vec![Point::ORIGIN; SCOPE_NUM_SAMPLES];
        }

        let mut points = Vec::with_capacity(SCOPE_NUM_SAMPLES);
        for _ in 0..SNAPSHOT_ATTEMPTS {
            let before = a.frames.load(Ordering::Acquire);
            let current = self.current_buffer();
            points.clear();
            points.extend(a.buffers[current].iter().map(|v| unpack(v.load(Ordering::Relaxed))));
            fence(Ordering::Acquire);
            if a.frames.load(Ordering::Relaxed) == before {
                break;
            }
        }
        points
    }
}

impl Default for SoundScope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(l: f32, r: f32) -> SampleFrame {
        std::array::from_fn(|i| if i % 2 == 0 { l } else { r })
    }

    fn background_scope(mode: ScopeMode) -> SoundScope {
        let scope = SoundScope::new();
        scope.set_mode(mode);
        scope.start(480);
        scope.show_with(DisplayMode::Background);
        scope
    }

    #[test]
    fn test_starts_hidden_and_flat() {
        let scope = SoundScope::new();
        assert!(!scope.is_visible());
        assert_eq!(scope.display_mode(), DisplayMode::Foreground);
        let points = scope.snapshot();
        assert_eq!(points.len(), SCOPE_NUM_SAMPLES);
        assert_eq!(points[0], Point::new(-1.0, 0.0));
        assert_eq!(points[64], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_frame_count_tracks_fills() {
        let scope = SoundScope::new();
        scope.update(&frame(0.5, 0.5));
        assert_eq!(scope.frame_count(), 0);

        scope.set_mode(ScopeMode::Oscillator);
        scope.update(&frame(0.5, 0.5));
        scope.update(&frame(0.25, 0.25));
        assert_eq!(scope.frame_count(), 2);
    }

    #[test]
    fn test_snapshot_reads_whole_frames_while_writing() {
        let scope = SoundScope::new();
        scope.set_mode(ScopeMode::Oscillator);

        let writer = {
            let scope = scope.clone();
            std::thread::spawn(move || {
                for k in 1..=200 {
                    let level = k as f32 * 0.001;
                    scope.update(&frame(level, level));
                    std::thread::sleep(std::time::Duration::from_micros(200));
                }
            })
        };

        while !writer.is_finished() {
            let points = scope.snapshot();
            let y = points[0].y;
            assert!(points.iter().all(|p| p.y == y), "mixed frame at y = {}", y);
        }
        writer.join().unwrap();
        assert_eq!(scope.frame_count(), 200);
    }

    #[test]
    fn test_update_swaps_buffers() {
        let scope = SoundScope::new();
        scope.set_mode(ScopeMode::Oscillator);

        let before = scope.current_buffer();
        let previous = scope.snapshot();
        scope.update(&frame(0.25, 0.25));
        assert_ne!(scope.current_buffer(), before);

        // The buffer that was current is untouched by the write
        let untouched: Vec<Point> = scope.atomics.buffers[before]
            .iter()
            .map(|v| unpack(v.load(Ordering::Relaxed)))
            .collect();
        assert_eq!(untouched, previous);

        scope.update(&frame(0.0, 0.0));
        assert_eq!(scope.current_buffer(), before);
    }

    #[test]
    fn test_oscillator_sums_channels() {
        let scope = SoundScope::new();
        scope.set_mode(ScopeMode::Oscillator);
        scope.update(&frame(0.25, 0.5));
        let points = scope.snapshot();
        assert_eq!(points[0], Point::new(-1.0, 0.75));
        assert_eq!(points[96], Point::new(0.5, 0.75));
    }

    #[test]
    fn test_xy_rotates_45_degrees() {
        let scope = SoundScope::new();
        scope.set_mode(ScopeMode::Xy);
        scope.update(&frame(1.0, 0.0));
        let p = scope.snapshot()[10];
        assert!((p.x - 0.70710677).abs() < 1e-6);
        assert!((p.y - 0.70710677).abs() < 1e-6);
    }

    #[test]
    fn test_mode_off_leaves_buffer() {
        let scope = SoundScope::new();
        let before = scope.current_buffer();
        scope.update(&frame(0.5, 0.5));
        assert_eq!(scope.current_buffer(), before);
        assert_eq!(scope.snapshot()[0], Point::new(-1.0, 0.0));
    }

    #[test]
    fn test_clear_until_next_frame() {
        let scope = SoundScope::new();
        scope.set_mode(ScopeMode::Oscillator);
        scope.clear();
        assert!(scope.snapshot().iter().all(|p| *p == Point::ORIGIN));
        scope.update(&frame(0.1, 0.1));
        assert!(scope.snapshot().iter().any(|p| *p != Point::ORIGIN));
    }

    #[test]
    fn test_idle_hides_background_scope_after_three_seconds() {
        let scope = background_scope(ScopeMode::Oscillator);
        let silence = frame(0.0, 0.0);

        for _ in 0..SCOPE_IDLE_FRAME_COUNT - 1 {
            scope.update(&silence);
            scope.tick();
        }
        assert!(scope.is_visible());
        assert!(!scope.is_idle());

        scope.update(&silence);
        scope.tick();
        assert!(!scope.is_visible());
        assert!(scope.is_idle());
        assert_eq!(scope.idle_frames(), 0);
        assert_eq!(scope.display_mode(), DisplayMode::Background);

        // One loud frame wakes it
        scope.atomics.idle_frames.store(5, Ordering::Relaxed);
        scope.update(&frame(0.5, 0.0));
        assert!(scope.is_visible());
        assert!(!scope.is_idle());
        assert_eq!(scope.idle_frames(), 0);
    }

    #[test]
    fn test_first_quiet_frame_is_not_idle() {
        let scope = background_scope(ScopeMode::Xy);
        scope.update(&frame(0.0, 0.0));
        assert!(!scope.is_idle());
        assert_eq!(scope.idle_frames(), 0);

        scope.tick();
        assert_eq!(scope.idle_frames(), 1);
        assert!(!scope.is_idle());
    }

    #[test]
    fn test_sound_resets_idle_count() {
        let scope = background_scope(ScopeMode::Oscillator);
        scope.update(&frame(0.0, 0.0));
        for _ in 0..100 {
            scope.tick();
        }
        assert_eq!(scope.idle_frames(), 100);

        scope.update(&frame(0.0, -0.2));
        assert_eq!(scope.idle_frames(), 0);
        scope.tick();
        assert_eq!(scope.idle_frames(), 0);
    }

    #[test]
    fn test_foreground_never_idles() {
        let scope = background_scope(ScopeMode::Oscillator);
        scope.show_with(DisplayMode::Foreground);
        for _ in 0..SCOPE_IDLE_FRAME_COUNT * 2 {
            scope.update(&frame(0.0, 0.0));
            scope.tick();
        }
        assert!(scope.is_visible());
        assert_eq!(scope.idle_frames(), 0);
    }

    #[test]
    fn test_tick_inert_until_started() {
        let scope = SoundScope::new();
        scope.set_mode(ScopeMode::Oscillator);
        scope.show_with(DisplayMode::Background);
        scope.update(&frame(0.0, 0.0));
        for _ in 0..SCOPE_IDLE_FRAME_COUNT {
            scope.tick();
        }
        assert!(scope.is_visible());
        assert_eq!(scope.idle_frames(), 0);
    }

    #[test]
    fn test_idle_threshold_from_height() {
        let scope = background_scope(ScopeMode::Oscillator);
        assert_eq!(scope.idle_threshold(), 1.0 / 240.0);

        // Below one pixel still counts as silence
        let hiss = 0.5 / 240.0;
        scope.update(&frame(hiss, -hiss));
        scope.tick();
        assert_eq!(scope.idle_frames(), 1);
    }

    #[test]
    fn test_hide_reset() {
        let scope = SoundScope::new();
        scope.show_with(DisplayMode::Background);
        assert_eq!(scope.alpha(), 0.5);
        scope.hide(false);
        assert_eq!(scope.display_mode(), DisplayMode::Background);
        scope.hide(true);
        assert_eq!(scope.display_mode(), DisplayMode::Foreground);
        assert_eq!(scope.alpha(), 1.0);
    }

    #[test]
    fn test_cross_thread_update() {
        let scope = background_scope(ScopeMode::Oscillator);
        let writer = scope.clone();
        let handle = std::thread::spawn(move || {
            for _ in 0..200 {
                writer.update(&frame(0.3, 0.3));
            }
        });
        for _ in 0..200 {
            let points = scope.snapshot();
            assert_eq!(points.len(), SCOPE_NUM_SAMPLES);
            scope.tick();
        }
        handle.join().unwrap();
        assert_eq!(scope.snapshot()[0].y, 0.6);
    }
}

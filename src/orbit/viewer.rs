use std::sync::Arc;
use std::time::Duration;

use rayon::prelude::*;

use crate::assets::ImageLoader;
use crate::config::GalleryConfig;
use crate::foundation::core::PixelSize;
use crate::orbit::frames::FrameSet;
use crate::orbit::render::render_frame;

#[derive(Clone, Debug, Default)]
pub enum FrameSlot {
    #[default]
    Pending,
    Ready(Arc<image::RgbaImage>),
    Failed,
}

impl FrameSlot {
    fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

#[derive(Clone, Copy, Debug)]
struct DragAnchor {
    x: f64,
    index: usize,
}

#[derive(Clone, Copy, Debug)]
struct ViewerTuning {
    drag_sensitivity_px: f64,
    zoom_min: f64,
    zoom_max: f64,
    button_step: f64,
    wheel_step: f64,
    tick: Duration,
}

impl ViewerTuning {
    /// Take the viewer knobs from `config`, replacing any value the viewer cannot run with by
    /// its default.
    fn from_config(config: &GalleryConfig) -> Self {
        let defaults = GalleryConfig::default();
        let positive = |name: &str, v: f64, fallback: f64| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                tracing::warn!(field = name, value = v, "invalid viewer setting; using default");
                fallback
            }
        };

        let zoom_min = positive("zoom_min", config.zoom_min, defaults.zoom_min);
        let zoom_max = positive("zoom_max", config.zoom_max, defaults.zoom_max);
        let (zoom_min, zoom_max) = if zoom_min <= 1.0 && 1.0 <= zoom_max {
            (zoom_min, zoom_max)
        } else {
            tracing::warn!(zoom_min, zoom_max, "zoom bounds must bracket 1.0; using defaults");
            (defaults.zoom_min, defaults.zoom_max)
        };

        Self {
            drag_sensitivity_px: positive(
                "drag_sensitivity_px",
                config.drag_sensitivity_px,
                defaults.drag_sensitivity_px,
            ),
            zoom_min,
            zoom_max,
            button_step: positive(
                "zoom_button_step",
                config.zoom_button_step,
                defaults.zoom_button_step,
            ),
            wheel_step: positive(
                "zoom_wheel_step",
                config.zoom_wheel_step,
                defaults.zoom_wheel_step,
            ),
            tick: Duration::from_millis(config.play_tick_ms.max(1)),
        }
    }
}

/// Interactive state of the 360° viewer.
///
/// Inputs mutate the state and raise a redraw flag; the host polls [`OrbitViewer::take_redraw`]
/// and calls [`OrbitViewer::render`]. Nothing here blocks except [`OrbitViewer::preload`].
#[derive(Clone, Debug)]
pub struct OrbitViewer {
    frames: FrameSet,
    slots: Vec<FrameSlot>,
    index: usize,
    zoom: f64,
    playing: bool,
    play_elapsed: Duration,
    drag: Option<DragAnchor>,
    container: PixelSize,
    redraw: bool,
    tuning: ViewerTuning,
}

impl OrbitViewer {
    pub fn new(frames: FrameSet, config: &GalleryConfig) -> Self {
        let slots = vec![FrameSlot::Pending; frames.len()];
        Self {
            frames,
            slots,
            index: 0,
            zoom: 1.0,
            playing: false,
            play_elapsed: Duration::ZERO,
            drag: None,
            container: PixelSize::default(),
            redraw: true,
            tuning: ViewerTuning::from_config(config),
        }
    }

    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The first frame has not settled yet.
    pub fn is_loading(&self) -> bool {
        self.slots.first().is_some_and(|s| !s.is_settled())
    }

    pub fn slot(&self, index: usize) -> Option<&FrameSlot> {
        self.slots.get(index)
    }

    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn can_rotate(&self) -> bool {
        self.frames.is_rotating() && self.frame_count() > 0
    }

    fn set_index(&mut self, index: usize) {
        if index != self.index {
            self.index = index;
            self.redraw = true;
        }
    }

    /// Set the zoom factor, clamped to the configured bounds.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        let zoom = zoom.clamp(self.tuning.zoom_min, self.tuning.zoom_max);
        if zoom != self.zoom {
            self.zoom = zoom;
            self.redraw = true;
        }
    }

    /// Begin a drag at pointer `x`. Stops auto-play. Ignored for stills and while loading.
    pub fn drag_start(&mut self, x: f64) {
        if !self.can_rotate() || self.is_loading() {
            return;
        }
        self.playing = false;
        self.drag = Some(DragAnchor {
            x,
            index: self.index,
        });
    }

    /// Rotate relative to the drag anchor: every `drag_sensitivity_px` of travel is one frame,
    /// rightward travel stepping backwards.
    pub fn drag_move(&mut self, x: f64) {
        let Some(anchor) = self.drag else {
            return;
        };
        let n = self.frame_count() as i64;
        let steps = ((x - anchor.x) / self.tuning.drag_sensitivity_px).round() as i64;
        let index = (anchor.index as i64 - steps).rem_euclid(n) as usize;
        self.set_index(index);
    }

    pub fn drag_end(&mut self) {
        self.drag = None;
    }

    /// Wheel zoom: scrolling down zooms out, up zooms in. A zero delta is ignored.
    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y > 0.0 {
            self.set_zoom(self.zoom / self.tuning.wheel_step);
        } else if delta_y < 0.0 {
            self.set_zoom(self.zoom * self.tuning.wheel_step);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * self.tuning.button_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / self.tuning.button_step);
    }

    /// Start or stop auto-play; returns the new state. Stills never play.
    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing && self.can_rotate();
        self.play_elapsed = Duration::ZERO;
        self.playing
    }

    /// Advance auto-play by `elapsed` wall time, one frame per tick. Returns whether the frame
    /// changed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.playing || !self.can_rotate() {
            return false;
        }
        self.play_elapsed += elapsed;
        let tick = self.tuning.tick.as_nanos();
        let ticks = self.play_elapsed.as_nanos() / tick;
        if ticks == 0 {
            return false;
        }
        let rem = self.play_elapsed.as_nanos() % tick;
        self.play_elapsed = Duration::from_nanos(rem as u64);

        let n = self.frame_count();
        let index = (self.index + (ticks % n as u128) as usize) % n;
        let before = self.index;
        self.set_index(index);
        before != self.index
    }

    pub fn next_frame(&mut self) {
        if self.can_rotate() {
            self.set_index((self.index + 1) % self.frame_count());
        }
    }

    pub fn prev_frame(&mut self) {
        if self.can_rotate() {
            let n = self.frame_count();
            self.set_index((self.index + n - 1) % n);
        }
    }

    /// Jump to frame `index` (modulo the frame count). Stills stay on their only frame.
    pub fn seek(&mut self, index: usize) {
        if self.can_rotate() {
            self.set_index(index % self.frame_count());
        }
    }

    /// Back to the first frame at 1× zoom.
    pub fn reset(&mut self) {
        self.set_index(0);
        self.set_zoom(1.0);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = PixelSize::new(width, height);
        if size != self.container {
            self.container = size;
            self.redraw = true;
        }
    }

    pub fn container(&self) -> PixelSize {
        self.container
    }

    pub fn on_frame_loaded(&mut self, index: usize, image: Arc<image::RgbaImage>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = FrameSlot::Ready(image);
            if index == self.index {
                self.redraw = true;
            }
        }
    }

    pub fn on_frame_failed(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = FrameSlot::Failed;
        }
    }

    /// Load every pending frame in parallel and feed the results in.
    #[tracing::instrument(skip_all, fields(frames = self.slots.len()))]
    pub fn preload<L: ImageLoader>(&mut self, loader: &L) {
        let pending: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_settled())
            .map(|(i, _)| i)
            .collect();
        let sources = self.frames.sources();
        let results: Vec<_> = pending
            .into_par_iter()
            .map(|i| (i, loader.load(&sources[i])))
            .collect();

        for (i, result) in results {
            match result {
                Ok(img) => self.on_frame_loaded(i, img),
                Err(e) => {
                    tracing::warn!(frame = i, error = %e, "orbit frame failed to load");
                    self.on_frame_failed(i);
                }
            }
        }
    }

    /// Share of frames settled (loaded or failed), 0–100.
    pub fn progress_percent(&self) -> f64 {
        if self.slots.is_empty() {
            return 100.0;
        }
        let settled = self.slots.iter().filter(|s| s.is_settled()).count();
        settled as f64 / self.slots.len() as f64 * 100.0
    }

    /// Position of the current frame within the rotation, 0–100.
    pub fn position_percent(&self) -> f64 {
        let n = self.frame_count().max(1);
        (self.index + 1) as f64 / n as f64 * 100.0
    }

    pub fn counter_label(&self) -> String {
        format!("{} / {}", self.index + 1, self.frame_count())
    }

    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    pub fn current_frame(&self) -> Option<&Arc<image::RgbaImage>> {
        match self.slots.get(self.index)? {
            FrameSlot::Ready(img) => Some(img),
            _ => None,
        }
    }

    /// Draw the current frame at the current zoom, if it is loaded and the container has area.
    pub fn render(&self) -> Option<image::RgbaImage> {
        render_frame(self.container, self.current_frame()?, self.zoom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orbit/viewer.rs"]
mod tests;

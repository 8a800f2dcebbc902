use crate::foundation::core::ImageSrc;

/// Frames available to the orbit viewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameSet {
    /// Enough real frames to rotate through.
    Rotating(Vec<ImageSrc>),
    /// Too few frames for rotation; a single still image with zoom only.
    Static(ImageSrc),
}

impl FrameSet {
    /// Classify `srcs`, ignoring blank entries.
    ///
    /// At least `min_frames` real frames rotate; anything less shows the first frame (or
    /// `placeholder` when there is none) as a still.
    pub fn from_sources(srcs: &[ImageSrc], min_frames: usize, placeholder: &ImageSrc) -> Self {
        let frames: Vec<ImageSrc> = srcs.iter().filter(|s| !s.is_blank()).cloned().collect();
        if frames.len() >= min_frames.max(2) {
            return Self::Rotating(frames);
        }
        if !frames.is_empty() {
            tracing::debug!(
                frames = frames.len(),
                min_frames,
                "too few frames for rotation; showing a still"
            );
        }
        Self::Static(
            frames
                .into_iter()
                .next()
                .unwrap_or_else(|| placeholder.clone()),
        )
    }

    pub fn sources(&self) -> &[ImageSrc] {
        match self {
            Self::Rotating(frames) => frames,
            Self::Static(src) => std::slice::from_ref(src),
        }
    }

    pub fn len(&self) -> usize {
        self.sources().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources().is_empty()
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self, Self::Rotating(_))
    }
}

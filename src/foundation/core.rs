use std::fmt;

/// One renderable image source: a base-URL-relative path (`/images/a.jpg`), a plain relative
/// path, or a `data:` URL produced by tint synthesis.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct ImageSrc(String);

impl ImageSrc {
    pub fn new(src: impl Into<String>) -> Self {
        Self(src.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return `true` for blank sources, which are treated as "unset".
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Return `true` when the source is an inline `data:` URL.
    pub fn is_data_url(&self) -> bool {
        self.0.starts_with("data:")
    }

    /// Source with any `?query` or `#fragment` removed. Data URLs are returned whole.
    pub fn path_part(&self) -> &str {
        if self.is_data_url() {
            return &self.0;
        }
        let end = self.0.find(['?', '#']).unwrap_or(self.0.len());
        &self.0[..end]
    }

    /// Short human-readable form; data URLs are abbreviated to their media type and length.
    pub fn abbreviated(&self) -> String {
        if !self.is_data_url() {
            return self.0.clone();
        }
        let media = self
            .0
            .strip_prefix("data:")
            .and_then(|rest| rest.split([';', ',']).next())
            .unwrap_or("");
        format!("data:{media};… ({} bytes)", self.0.len())
    }
}

impl fmt::Display for ImageSrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageSrc {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ImageSrc {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Integer pixel dimensions of a container or image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Placement rectangle in container pixel space. Origin may be negative when zoomed past the
/// container bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

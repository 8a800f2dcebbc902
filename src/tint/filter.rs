use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;

use crate::foundation::error::{VahanError, VahanResult};

/// One CSS-style color filter function.
///
/// Values are not clamped here; extreme multipliers are the caller's concern.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterOp {
    /// Rotate hue by degrees (signed, wraps modulo 360).
    HueRotate(f32),
    /// Saturation multiplier, 1.0 = unchanged.
    Saturate(f32),
    /// Brightness multiplier, 1.0 = unchanged.
    Brightness(f32),
    /// Contrast multiplier around mid-grey, 1.0 = unchanged.
    Contrast(f32),
}

/// Ordered filter chain, written and read as a CSS `filter` string
/// (`"hue-rotate(200deg) saturate(1.2)"`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TintFilter {
    ops: Vec<FilterOp>,
}

impl TintFilter {
    /// The no-op filter (`none`).
    pub fn identity() -> Self {
        Self::default()
    }

    /// Build from explicit ops.
    pub fn from_ops(ops: impl Into<Vec<FilterOp>>) -> Self {
        Self { ops: ops.into() }
    }

    /// Hue/saturation/brightness descriptor, applied in that order. Unit values are omitted.
    pub fn modulate(hue_deg: f32, saturation: f32, brightness: f32) -> Self {
        let mut ops = Vec::with_capacity(3);
        if hue_deg.rem_euclid(360.0) != 0.0 {
            ops.push(FilterOp::HueRotate(hue_deg));
        }
        if saturation != 1.0 {
            ops.push(FilterOp::Saturate(saturation));
        }
        if brightness != 1.0 {
            ops.push(FilterOp::Brightness(brightness));
        }
        Self { ops }
    }

    /// Ops in application order.
    pub fn ops(&self) -> &[FilterOp] {
        &self.ops
    }

    /// Return `true` when applying the filter cannot change any pixel.
    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(|op| match *op {
            FilterOp::HueRotate(d) => d.rem_euclid(360.0) == 0.0,
            FilterOp::Saturate(v) | FilterOp::Brightness(v) | FilterOp::Contrast(v) => v == 1.0,
        })
    }
}

impl fmt::Display for TintFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return f.write_str("none");
        }
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match op {
                FilterOp::HueRotate(v) => write!(f, "hue-rotate({v}deg)")?,
                FilterOp::Saturate(v) => write!(f, "saturate({v})")?,
                FilterOp::Brightness(v) => write!(f, "brightness({v})")?,
                FilterOp::Contrast(v) => write!(f, "contrast({v})")?,
            }
        }
        Ok(())
    }
}

impl FromStr for TintFilter {
    type Err = VahanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("none") {
            return Ok(Self::identity());
        }

        let mut ops = Vec::new();
        let mut rest = s;
        while !rest.is_empty() {
            let open = rest
                .find('(')
                .ok_or_else(|| VahanError::validation(format!("filter '{s}': expected '('")))?;
            let close = rest
                .find(')')
                .ok_or_else(|| VahanError::validation(format!("filter '{s}': expected ')'")))?;
            if close < open {
                return Err(VahanError::validation(format!("filter '{s}': unbalanced ')'")));
            }
            let name = rest[..open].trim().to_ascii_lowercase();
            let arg = rest[open + 1..close].trim();
            ops.push(parse_op(&name, arg)?);
            rest = rest[close + 1..].trim_start();
        }
        Ok(Self { ops })
    }
}

fn parse_op(name: &str, arg: &str) -> VahanResult<FilterOp> {
    match name {
        "hue-rotate" => Ok(FilterOp::HueRotate(parse_angle_deg(arg)?)),
        "saturate" => Ok(FilterOp::Saturate(parse_amount(name, arg)?)),
        "brightness" => Ok(FilterOp::Brightness(parse_amount(name, arg)?)),
        "contrast" => Ok(FilterOp::Contrast(parse_amount(name, arg)?)),
        _ => Err(VahanError::validation(format!(
            "unknown filter function '{name}'"
        ))),
    }
}

fn parse_number(arg: &str) -> VahanResult<f32> {
    let v: f32 = arg
        .trim()
        .parse()
        .map_err(|_| VahanError::validation(format!("invalid filter number '{arg}'")))?;
    if !v.is_finite() {
        return Err(VahanError::validation(format!(
            "filter number '{arg}' must be finite"
        )));
    }
    Ok(v)
}

fn parse_angle_deg(arg: &str) -> VahanResult<f32> {
    let a = arg.to_ascii_lowercase();
    if let Some(v) = a.strip_suffix("deg") {
        parse_number(v)
    } else if let Some(v) = a.strip_suffix("grad") {
        Ok(parse_number(v)? * 0.9)
    } else if let Some(v) = a.strip_suffix("rad") {
        Ok(parse_number(v)?.to_degrees())
    } else if let Some(v) = a.strip_suffix("turn") {
        Ok(parse_number(v)? * 360.0)
    } else {
        let v = parse_number(&a)?;
        if v != 0.0 {
            return Err(VahanError::validation(format!(
                "hue-rotate angle '{arg}' needs a unit"
            )));
        }
        Ok(0.0)
    }
}

fn parse_amount(name: &str, arg: &str) -> VahanResult<f32> {
    let v = match arg.strip_suffix('%') {
        Some(p) => parse_number(p)? / 100.0,
        None => parse_number(arg)?,
    };
    if v < 0.0 {
        return Err(VahanError::validation(format!("{name}() must be >= 0")));
    }
    Ok(v)
}

impl serde::Serialize for TintFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for TintFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Op lowered to straight-alpha channel math.
enum Compiled {
    Matrix([[f32; 3]; 3]),
    Scale(f32),
    Contrast(f32),
}

fn hue_rotate_matrix(deg: f32) -> [[f32; 3]; 3] {
    let (sin, cos) = deg.rem_euclid(360.0).to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

fn saturate_matrix(s: f32) -> [[f32; 3]; 3] {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn compile(ops: &[FilterOp]) -> Vec<Compiled> {
    ops.iter()
        .map(|op| match *op {
            FilterOp::HueRotate(d) => Compiled::Matrix(hue_rotate_matrix(d)),
            FilterOp::Saturate(s) => Compiled::Matrix(saturate_matrix(s)),
            FilterOp::Brightness(b) => Compiled::Scale(b),
            FilterOp::Contrast(c) => Compiled::Contrast(c),
        })
        .collect()
}

fn apply_pixel(px: &mut [u8], ops: &[Compiled]) {
    let mut c = [
        f32::from(px[0]) / 255.0,
        f32::from(px[1]) / 255.0,
        f32::from(px[2]) / 255.0,
    ];
    for op in ops {
        c = match op {
            Compiled::Matrix(m) => [
                m[0][0] * c[0] + m[0][1] * c[1] + m[0][2] * c[2],
                m[1][0] * c[0] + m[1][1] * c[1] + m[1][2] * c[2],
                m[2][0] * c[0] + m[2][1] * c[1] + m[2][2] * c[2],
            ],
            Compiled::Scale(k) => [c[0] * k, c[1] * k, c[2] * k],
            Compiled::Contrast(k) => [
                (c[0] - 0.5) * k + 0.5,
                (c[1] - 0.5) * k + 0.5,
                (c[2] - 0.5) * k + 0.5,
            ],
        };
        // Each filter function's output is clamped before the next one runs.
        for v in &mut c {
            *v = v.clamp(0.0, 1.0);
        }
    }
    for (dst, v) in px.iter_mut().zip(c) {
        *dst = (v * 255.0).round() as u8;
    }
}

/// Apply a filter chain to a straight-alpha RGBA8 image. Alpha is left untouched.
pub fn apply_filter(img: &image::RgbaImage, filter: &TintFilter) -> image::RgbaImage {
    let mut out = img.clone();
    if filter.is_identity() {
        return out;
    }
    let ops = compile(filter.ops());
    let buf: &mut [u8] = &mut out;
    buf.par_chunks_exact_mut(4)
        .for_each(|px| apply_pixel(px, &ops));
    out
}

#[cfg(test)]
#[path = "../../tests/unit/tint/filter.rs"]
mod tests;

use std::collections::BTreeMap;

use crate::foundation::error::{VahanError, VahanResult};
use crate::tint::filter::{FilterOp, TintFilter};

use crate::tint::filter::FilterOp::{
    Brightness as B, Contrast as C, HueRotate as H, Saturate as S,
};

const BUILTIN: &[(&str, &[FilterOp])] = &[
    ("Cyan Blue", &[H(200.0), S(1.2)]),
    ("Racing Black", &[S(0.0), B(0.6)]),
    ("Ice Fluo-Vermillion", &[H(-20.0), S(1.4), B(1.05)]),
    ("Cosmic Blue", &[H(210.0), S(1.1)]),
    ("Space Grey", &[S(0.0), B(0.8)]),
    ("Mint Green", &[H(110.0), S(1.3)]),
    ("White", &[B(1.1), S(0.9)]),
    ("Jet Black", &[S(0.0), B(0.55)]),
    ("Matte Axis Grey Metallic", &[S(0.0), B(0.85)]),
    ("Pearl Precious White", &[B(1.12), S(0.95)]),
    ("Decent Blue Metallic", &[H(200.0), S(1.15)]),
    ("Redditch Red", &[H(-10.0), S(1.4), B(1.05)]),
    ("Halcyon Black", &[S(0.0), B(0.6)]),
    ("Gunmetal Grey", &[S(0.0), B(0.8), C(1.05)]),
    ("Titanium Grey", &[S(0.0), B(0.9)]),
    ("Pearl White", &[B(1.1)]),
    ("Mint Blue", &[H(190.0), S(1.25)]),
    ("Burnt Red", &[H(-15.0), S(1.5), B(0.98)]),
    ("Satin Blue", &[H(215.0), S(1.2)]),
    ("Pewter Grey", &[S(0.0), B(0.85)]),
    ("Porcelain White", &[B(1.08)]),
    ("Liquid Silver", &[S(0.0), B(1.0)]),
    ("Black with Silver", &[S(0.0), B(0.8)]),
    ("Heavy Grey with Green", &[H(90.0), S(0.9), B(0.95)]),
    ("Black with Purple", &[H(290.0), S(1.2), B(0.9)]),
    ("Metallic Matte Platinum Silver", &[S(0.0), B(1.05)]),
    ("Pearl Mirage White", &[B(1.1), S(0.9)]),
    ("Glossy Grey", &[S(0.2), B(0.95)]),
    ("Galaxy Black", &[S(0.0), B(0.55)]),
    ("Stardust Silver", &[S(0.0), B(1.0)]),
];

/// Color name → tint filter used to simulate an unphotographed variant.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ColorTintTable {
    by_color: BTreeMap<String, TintFilter>,
}

impl ColorTintTable {
    /// Empty table; every lookup degrades to the identity filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tints for every color the sample catalog lists.
    pub fn builtin() -> Self {
        let by_color = BUILTIN
            .iter()
            .map(|(name, ops)| ((*name).to_owned(), TintFilter::from_ops(ops.to_vec())))
            .collect();
        Self { by_color }
    }

    /// Parse `{"<color>": "<css filter>", ...}`.
    pub fn from_json_str(json: &str) -> VahanResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| VahanError::validation(format!("tint table: {e}")))
    }

    /// Exact-name lookup.
    pub fn get(&self, color: &str) -> Option<&TintFilter> {
        self.by_color.get(color)
    }

    /// Filter for `color`, or the identity filter when the color has no entry.
    pub fn lookup(&self, color: &str) -> TintFilter {
        match self.by_color.get(color) {
            Some(f) => f.clone(),
            None => {
                tracing::warn!(color, "no tint entry for color; using identity filter");
                TintFilter::identity()
            }
        }
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, color: impl Into<String>, filter: TintFilter) {
        self.by_color.insert(color.into(), filter);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.by_color.len()
    }

    /// Return `true` when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.by_color.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tint/table.rs"]
mod tests;

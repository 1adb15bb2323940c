use serde::{Deserialize, Serialize};

/// Shipping box dimensions in centimeters plus weight in kilograms.
/// Used both as a per-SKU packaging profile and as the aggregated box
/// sent to the quote provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackageDims {
    pub height_cm: f64,
    pub width_cm: f64,
    pub length_cm: f64,
    pub weight_kg: f64,
}

impl PackageDims {
    pub const ZERO: PackageDims = PackageDims {
        height_cm: 0.0,
        width_cm: 0.0,
        length_cm: 0.0,
        weight_kg: 0.0,
    };

    pub fn is_degenerate(&self) -> bool {
        self.height_cm <= 0.0 && self.width_cm <= 0.0 && self.length_cm <= 0.0 && self.weight_kg <= 0.0
    }
}

/// Fold per-item packaging profiles into one shipment box.
///
/// Items are modeled as packed end-to-end in a box of the catalog's largest
/// cross-section: weight and length sum (scaled by quantity), height and
/// width take the maximum. SKUs with no packaging profile contribute zero
/// to every dimension. If nothing contributes, the configured fallback box
/// is substituted so the quote call never sees a degenerate package.
///
/// This is the platform's historical heuristic, reproduced exactly for
/// compatibility — not a bin-packing solution.
pub fn aggregate_packages<'a, I>(items: I, fallback: &PackageDims) -> PackageDims
where
    I: IntoIterator<Item = (Option<&'a PackageDims>, u32)>,
{
    let mut total = PackageDims::ZERO;

    for (profile, quantity) in items {
        let Some(profile) = profile else { continue };
        let quantity = quantity as f64;
        total.weight_kg += profile.weight_kg * quantity;
        total.length_cm += profile.length_cm * quantity;
        total.height_cm = total.height_cm.max(profile.height_cm);
        total.width_cm = total.width_cm.max(profile.width_cm);
    }

    if total.is_degenerate() { *fallback } else { total }
}

use crate::config::{MAX_AGE_YEARS, MAX_WEIGHT_KG, MIN_AGE_YEARS, MIN_WEIGHT_KG};

/// Every unordered pair `(items[i], items[j])` with `i < j`, in selection order.
pub fn unordered_pairs<T>(items: &[T]) -> impl Iterator<Item = (&T, &T)> + '_ {
    items
        .iter()
        .enumerate()
        .flat_map(move |(i, a)| items[i + 1..].iter().map(move |b| (a, b)))
}

/// Round to two decimal places (display precision for doses).
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Clamp an entered age into the accepted range.
pub fn clamp_age(age: i64) -> u32 {
    age.clamp(i64::from(MIN_AGE_YEARS), i64::from(MAX_AGE_YEARS)) as u32
}

/// Clamp weight into the accepted range; NaN falls back to the minimum.
pub fn clamp_weight(weight_kg: f64) -> f64 {
    if weight_kg.is_nan() {
        return MIN_WEIGHT_KG;
    }
    weight_kg.clamp(MIN_WEIGHT_KG, MAX_WEIGHT_KG)
}

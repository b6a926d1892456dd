//! Numeric helpers shared by decoding and suppression.

/// Returns true if `value` lies in `[0, 1]`. NaN is never in range.
#[inline]
pub(crate) fn in_unit_range(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Returns the index and value of the first strict maximum in `values`.
///
/// Later entries only replace the current best when strictly greater, so ties
/// resolve to the lowest index. NaN entries never win.
pub(crate) fn first_argmax<I>(values: I) -> Option<(usize, f32)>
where
    I: IntoIterator<Item = f32>,
{
    let mut best: Option<(usize, f32)> = None;
    for (idx, value) in values.into_iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((idx, value)),
        }
    }
    best
}

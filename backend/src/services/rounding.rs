//! Two-decimal truncation shared by the analytics aggregators.

/// Relative slack, in machine epsilons, for treating a scaled value as an
/// exact cent count.
const CENT_SNAP_ULPS: f64 = 8.0;

/// Truncate toward zero at the second decimal digit: `2.999 -> 2.99`,
/// `-1.239 -> -1.23`.
///
/// Values already sitting on a cent boundary are kept as is, even when their
/// binary form scales to just under it (`0.29 * 100 == 28.999999999999996`),
/// so `round2(round2(x)) == round2(x)`. Plain `trunc(x * 100) / 100` would
/// give `0.28` and `1.14` for `0.29` and `1.15`; this function returns them
/// unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    let nearest = scaled.round();
    let slack = CENT_SNAP_ULPS * f64::EPSILON * nearest.abs().max(1.0);
    let cents = if (scaled - nearest).abs() <= slack {
        nearest
    } else {
        scaled.trunc()
    };
    cents / 100.0
}

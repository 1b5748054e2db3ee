/// Raises `x` to `floor`, adds `pseudocount` and takes the base-2 logarithm
///
/// `NaN` (a missing cell) passes through unchanged rather than being floored.
pub fn log_floor(x: f64, floor: f64, pseudocount: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    (x.max(floor) + pseudocount).log2()
}

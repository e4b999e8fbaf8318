use std::cmp::Ordering;

/// Compares two f64 values.
pub fn compare_floats(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Unwraps result type.
pub fn unwrap_from_result<T>(result: Result<T, T>) -> T {
    match result {
        Ok(result) => result,
        Err(result) => result,
    }
}

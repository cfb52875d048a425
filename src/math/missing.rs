use ndarray::ArrayView1;

/// Marker for "no observation". Arithmetic on it yields the marker again.
pub const MISSING: f64 = f64::NAN;

/// Uniform "is this value known" checks used by every component.
pub trait MissingExt {
    /// `true` if the value (or any element) is the missing marker.
    fn is_missing(&self) -> bool;

    /// `true` if no element is the missing marker.
    fn is_complete(&self) -> bool {
        !self.is_missing()
    }
}

impl MissingExt for f64 {
    #[inline]
    fn is_missing(&self) -> bool {
        self.is_nan()
    }
}

impl MissingExt for ArrayView1<'_, f64> {
    #[inline]
    fn is_missing(&self) -> bool {
        self.iter().any(|v| v.is_nan())
    }
}

impl MissingExt for [f64] {
    #[inline]
    fn is_missing(&self) -> bool {
        self.iter().any(|v| v.is_nan())
    }
}

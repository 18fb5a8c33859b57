use subtle::ConstantTimeEq;

/// Compares two byte slices without short-circuiting on the first mismatch.
///
/// Slices of different length are unequal straight away; only the length
/// is revealed, never the position of a differing byte.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

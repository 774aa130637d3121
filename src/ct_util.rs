//! Constant-time comparison and selection helpers for the decapsulation path.
//!
//! `ML-KEM.Decaps_internal` (Algorithm 18) must compare the re-encrypted
//! ciphertext against the one received and then select between the derived
//! shared secret and the implicit-rejection value without leaking, via
//! timing, which branch was taken. Both operations are built on `subtle`.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Returns a `Choice` that is true if `a` and `b` differ, in constant time
/// with respect to the byte contents (the comparison still takes time linear
/// in `a.len()`, which is public: ciphertext length is fixed per parameter
/// set).
#[must_use]
pub(crate) fn ct_bytes_ne(a: &[u8], b: &[u8]) -> Choice { a.ct_ne(b) }

/// Overwrites `dst` with `replacement` wherever `condition` is true, in
/// constant time, leaving `dst` untouched otherwise. Used to implement
/// implicit rejection: the real shared secret is always computed, then
/// conditionally swapped for `K̄` without a data-dependent branch.
pub(crate) fn ct_select_32(dst: &mut [u8; 32], replacement: &[u8; 32], condition: Choice) {
    for i in 0..32 {
        dst[i].conditional_assign(&replacement[i], condition);
    }
}

#[cfg(test)]
mod tests {
    use super::{ct_bytes_ne, ct_select_32};
    use subtle::Choice;

    #[test]
    fn bytes_ne_detects_difference() {
        assert!(!bool::from(ct_bytes_ne(&[1, 2, 3], &[1, 2, 3])));
        assert!(bool::from(ct_bytes_ne(&[1, 2, 3], &[1, 2, 4])));
    }

    #[test]
    fn select_chooses_replacement_only_when_true() {
        let mut dst = [0u8; 32];
        let replacement = [0xFFu8; 32];
        ct_select_32(&mut dst, &replacement, Choice::from(0));
        assert_eq!(dst, [0u8; 32]);
        ct_select_32(&mut dst, &replacement, Choice::from(1));
        assert_eq!(dst, [0xFFu8; 32]);
    }
}

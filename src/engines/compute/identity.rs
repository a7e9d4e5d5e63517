//! Fixed-offset pairwise identity
//!
//! Positions are compared without gaps: character `i` of one sequence
//! against character `i` of the other. The match count is divided by the
//! longer length, so a length difference always costs identity even when
//! the shorter sequence is a perfect prefix.

/// Fraction of positions in `[0, min(len))` where `a` and `b` agree,
/// divided by `max(len)`. Two empty sequences are identical (1.0).
pub fn identity(a: &[u8], b: &[u8]) -> f64 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }

    let matches = a.iter().zip(b).filter(|(x, y)| x == y).count();
    matches as f64 / longest as f64
}

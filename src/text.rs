//! Fixed-capacity string helpers.

/// Copy `s` into a `heapless::String<N>`, cutting it at the last char
/// boundary that fits.
pub fn truncated<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

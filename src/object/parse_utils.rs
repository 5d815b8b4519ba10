/// Find the first occurrence of `c` in `s` at or after `start`.
///
/// The returned index is relative to the start of `s`.
pub(crate) fn find_from(s: &[u8], start: usize, c: u8) -> Option<usize> {
    s.get(start..)?
        .iter()
        .position(|b| *b == c)
        .map(|n| n + start)
}

/// Whether every character of `s` is 7-bit ASCII.
pub fn is_ascii(s: &str) -> bool {
    s.is_ascii()
}

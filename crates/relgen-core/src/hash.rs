/// Deterministic short token for identifying strings.
///
/// Joins the parts with `:`, runs CRC-32 over the UTF-8 bytes, and renders
/// the checksum as a fixed-width lowercase hex token. The same parts yield
/// the same token on any machine, which is what keeps generated identifiers
/// stable across runs. Not a cryptographic hash; collisions are accepted as
/// negligible for realistic catalogs.
pub fn hash_token(parts: &[&str]) -> String {
    format!("{:08x}", crc32fast::hash(parts.join(":").as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_deterministic() {
        let a = hash_token(&["public", "Mood", "[\"sad\",\"ok\"]"]);
        let b = hash_token(&["public", "Mood", "[\"sad\",\"ok\"]"]);
        assert_eq!(a, b);
    }

    #[test]
    fn token_is_fixed_width_hex() {
        for parts in [&["a"][..], &["a", "b"], &["longer", "input", "here"]] {
            let token = hash_token(parts);
            assert_eq!(token.len(), 8);
            assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn token_changes_with_any_part() {
        let base = hash_token(&["public", "Mood", "[\"sad\"]"]);
        assert_ne!(base, hash_token(&["other", "Mood", "[\"sad\"]"]));
        assert_ne!(base, hash_token(&["public", "Tone", "[\"sad\"]"]));
        assert_ne!(base, hash_token(&["public", "Mood", "[\"sad\",\"ok\"]"]));
    }

    #[test]
    fn delimiter_keeps_parts_distinct() {
        assert_ne!(hash_token(&["ab", "c"]), hash_token(&["a", "bc"]));
    }
}

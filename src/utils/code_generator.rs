use rand::Rng;

/// Alphabet for promotion codes; ambiguous glyphs (0/O, 1/I) left out.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub fn generate_promotion_code() -> String {
    let mut rng = rand::thread_rng();
    (0..8)
        .map(|_| {
            let idx = rng.gen_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_promotion_code() {
        let code = generate_promotion_code();
        assert_eq!(code.len(), 8);
        assert!(
            code.chars()
                .all(|c| CODE_ALPHABET.contains(&(c as u8)))
        );
    }

    #[test]
    fn test_codes_are_uppercase_alphanumeric() {
        for _ in 0..20 {
            let code = generate_promotion_code();
            assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }
}

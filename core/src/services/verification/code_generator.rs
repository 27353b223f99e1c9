//! Cryptographically secure one-time code generation

use rand::{rngs::OsRng, Rng};

use super::traits::CodeGenerator;

/// Draws each digit uniformly from the operating system CSPRNG
#[derive(Debug, Clone, Copy)]
pub struct SecureCodeGenerator {
    length: usize,
}

impl SecureCodeGenerator {
    /// Create a generator producing `length` digits
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl CodeGenerator for SecureCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = OsRng;
        (0..self.length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_format() {
        let generator = SecureCodeGenerator::new(6);
        for _ in 0..100 {
            let code = generator.generate();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_generate_respects_length() {
        assert_eq!(SecureCodeGenerator::new(4).generate().len(), 4);
        assert_eq!(SecureCodeGenerator::new(10).generate().len(), 10);
    }

    #[test]
    fn test_code_uniqueness() {
        let generator = SecureCodeGenerator::new(6);
        let codes: HashSet<String> = (0..100).map(|_| generator.generate()).collect();
        assert!(codes.len() > 90);
    }

    #[test]
    fn test_every_digit_appears_in_each_position() {
        let generator = SecureCodeGenerator::new(6);
        let mut seen = vec![HashSet::new(); 6];
        for _ in 0..2_000 {
            for (position, digit) in generator.generate().chars().enumerate() {
                seen[position].insert(digit);
            }
        }
        assert!(seen.iter().all(|digits| digits.len() == 10));
    }
}

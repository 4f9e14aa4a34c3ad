// Random identifiers. The generator is always owned by the caller.

use rand::Rng;

pub const CHARSET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn random_string_with_charset<R: Rng + ?Sized>(rng: &mut R, length: usize, charset: &str) -> String {
    let chars: Vec<char> = charset.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    (0..length)
        .map(|_| chars[rng.gen_range(0..chars.len())])
        .collect()
}

pub fn random_string<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    random_string_with_charset(rng, length, CHARSET)
}

// Message ids are never zero
pub fn message_id<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(1..=u32::MAX)
}

use crate::domain::user::User;

const RANDOM_PART_LEN: usize = 10;
const EMAIL_DOMAIN: &str = "@ya.ru";

/// `len` random ASCII letters, mixed case.
pub fn random_alphabetic(len: usize) -> String {
    std::iter::repeat_with(fastrand::alphabetic)
        .take(len)
        .collect()
}

pub struct UserGenerator;

impl UserGenerator {
    /// A fresh account unlikely to collide with any existing one.
    pub fn random_user() -> User {
        User::new(
            format!("{}{}", random_alphabetic(RANDOM_PART_LEN), EMAIL_DOMAIN),
            random_alphabetic(RANDOM_PART_LEN),
            random_alphabetic(RANDOM_PART_LEN),
        )
    }
}

/// Turns a valid ingredient id into a malformed one by replacing its first
/// character with `w`, which is not a hex digit.
pub fn corrupt_id(id: &str) -> String {
    let mut chars = id.chars();
    chars.next();
    format!("w{}", chars.as_str())
}

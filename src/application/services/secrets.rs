use rand::Rng;
use rand::distributions::{Alphanumeric, DistString};

const TOKEN_LEN: usize = 32;

/// Six decimal digits, never starting with zero.
pub fn secret_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999u32).to_string()
}

pub fn opaque_token() -> String {
    Alphanumeric.sample_string(&mut rand::thread_rng(), TOKEN_LEN)
}

/// Opaque token suffixed with `_<now>` so its issue time can be read back.
pub fn stamped_token(now: i64) -> String {
    format!("{}_{}", opaque_token(), now)
}

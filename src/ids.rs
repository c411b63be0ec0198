use chrono::{DateTime, Utc};
use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random lowercase base-36 token.
pub fn random_token<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

pub fn user_id(now: DateTime<Utc>) -> String {
    format!("anon_{}_{}", random_token(&mut rand::thread_rng(), 9), now.timestamp_millis())
}

pub fn thread_id(now: DateTime<Utc>) -> String {
    format!("thread_{}_{}", now.timestamp_millis(), random_token(&mut rand::thread_rng(), 5))
}

pub fn message_id(now: DateTime<Utc>) -> String {
    format!("msg_{}_{}", now.timestamp_millis(), random_token(&mut rand::thread_rng(), 5))
}

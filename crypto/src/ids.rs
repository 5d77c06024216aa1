//! Prefixed identifier generators.
//!
//! Ids combine the current epoch milliseconds (base 36) with a random base-36
//! suffix, uppercased. Uniqueness is probabilistic, not guaranteed; collisions
//! are not defended against downstream, which is acceptable at this scale.

use std::time::{SystemTime, UNIX_EPOCH};

use vusd_types::{
    AuthorizationCode, InjectionId, LockId, PublicationCode, RecordId, ReserveId,
};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn to_base36(mut n: u128) -> String {
    if n == 0 {
        return "0".into();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 alphabet is ASCII")
}

fn random_suffix(len: usize) -> String {
    (0..len)
        .map(|_| BASE36[(rand::random::<u8>() % 36) as usize] as char)
        .collect()
}

fn now_base36() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_millis();
    to_base36(millis)
}

fn prefixed(prefix: &str, suffix_len: usize) -> String {
    format!("{prefix}{}-{}", now_base36(), random_suffix(suffix_len)).to_uppercase()
}

/// Internal record id: `<millis36>-<random6>`.
pub fn new_record_id() -> RecordId {
    RecordId::new(prefixed("", 6))
}

/// `INJ-<millis36>-<random4>`.
pub fn new_injection_id() -> InjectionId {
    InjectionId::new(prefixed("INJ-", 4))
}

/// `LOCK-<millis36>-<random4>`.
pub fn new_lock_id() -> LockId {
    LockId::new(prefixed("LOCK-", 4))
}

/// `RSV-<millis36>-<random4>`.
pub fn new_reserve_id() -> ReserveId {
    ReserveId::new(prefixed("RSV-", 4))
}

/// `AUTH-<millis36>-<random4>`.
pub fn new_authorization_code() -> AuthorizationCode {
    AuthorizationCode::new(prefixed("AUTH-", 4))
}

/// `PUB-<millis36>-<random6>`.
pub fn new_publication_code() -> PublicationCode {
    PublicationCode::new(prefixed("PUB-", 6))
}

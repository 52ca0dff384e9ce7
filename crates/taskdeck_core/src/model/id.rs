//! Task id generation.
//!
//! Ids are two independent random base-36 fragments joined together. They
//! are short and collision-unlikely, but neither cryptographic nor
//! guaranteed unique; the store does not check for duplicates on create.

use crate::model::task::TaskId;
use rand::Rng;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const FRAGMENT_LEN: usize = 11;
// 36^11, fits in u64.
const FRAGMENT_SPACE: u64 = 131_621_703_842_267_136;

/// Generates a fresh 22-character `[0-9a-z]` task id.
pub fn generate_id() -> TaskId {
    let mut rng = rand::thread_rng();
    let mut id = String::with_capacity(FRAGMENT_LEN * 2);
    push_fragment(&mut id, rng.gen_range(0..FRAGMENT_SPACE));
    push_fragment(&mut id, rng.gen_range(0..FRAGMENT_SPACE));
    id
}

fn push_fragment(out: &mut String, mut value: u64) {
    let mut digits = [b'0'; FRAGMENT_LEN];
    for slot in digits.iter_mut().rev() {
        *slot = BASE36_DIGITS[(value % 36) as usize];
        value /= 36;
    }
    out.extend(digits.iter().map(|digit| char::from(*digit)));
}

#[cfg(test)]
mod tests {
    use super::{generate_id, push_fragment, FRAGMENT_LEN, FRAGMENT_SPACE};
    use std::collections::HashSet;

    #[test]
    fn ids_are_base36_and_fixed_length() {
        let id = generate_id();
        assert_eq!(id.len(), FRAGMENT_LEN * 2);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn fragment_encoding_pads_and_covers_the_range() {
        let mut out = String::new();
        push_fragment(&mut out, 35);
        assert_eq!(out, "0000000000z");

        let mut max = String::new();
        push_fragment(&mut max, FRAGMENT_SPACE - 1);
        assert_eq!(max, "zzzzzzzzzzz");
    }

    #[test]
    fn consecutive_ids_do_not_repeat() {
        let ids: HashSet<_> = (0..1_000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1_000);
    }
}

//! Row-key ordering and the byte-string utilities built on top of it.
//!
//! Row keys are opaque byte strings ordered by unsigned lexicographic
//! comparison — the same ordering `Vec<u8>`'s `Ord` impl already gives us, but
//! spelled out explicitly here since several call sites (the parser's
//! monotonicity check, the reader's restart clipping) care about the
//! comparator as a first-class operation rather than an incidental trait.
use std::cmp::Ordering;

/// Three-way compare two row keys under unsigned lexicographic order.
///
/// `u8` already orders unsigned, so this is `Ord::cmp` under another name —
/// the point of a dedicated function is to make the invariant ("0xFF sorts
/// above 0x00, never signed-char order") a documented, tested contract
/// rather than an accident of `Vec<u8>`'s derived `Ord`.
pub fn compare(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

/// Computes the smallest byte string strictly greater than every string
/// with prefix `prefix`, i.e. the exclusive end key of a prefix scan.
///
/// Returns `None` when no such bound exists (`prefix` is empty, or every
/// byte in it is already `0xFF`) — the caller should treat that as "no
/// upper bound."
pub fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(&last) = end.last() {
        if last == 0xFF {
            end.pop();
        } else {
            *end.last_mut().unwrap() += 1;
            return Some(end);
        }
    }
    None
}

/// Encodes a `u64` as 8 bytes in network (big-endian) byte order.
pub fn encode_u64(value: u64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Decodes 8 bytes in network byte order back into a `u64`.
///
/// Fails with [`crate::error::Error::Usage`] if `bytes` is not exactly 8
/// bytes long.
pub fn decode_u64(bytes: &[u8]) -> Result<u64, crate::error::Error> {
    let array: [u8; 8] = bytes
        .try_into()
        .map_err(|_| crate::error::Error::Usage("big-endian u64 codec requires exactly 8 bytes"))?;
    Ok(u64::from_be_bytes(array))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_is_antisymmetric_and_reflexive() {
        let a = b"foo";
        let b = b"bar";
        assert_eq!(compare(a, b), compare(b, a).reverse());
        assert_eq!(compare(a, a), Ordering::Equal);
    }

    #[test]
    fn high_bit_compares_unsigned() {
        assert_eq!(compare(&[0xFF], &[0x00]), Ordering::Greater);
    }

    #[test]
    fn shorter_prefix_is_smaller() {
        assert_eq!(compare(b"ab", b"abc"), Ordering::Less);
    }

    #[test]
    fn byte_lexicographic_scenario() {
        assert_eq!(compare(b"\xFF\xFF", b"\xFF\xFE"), Ordering::Greater);
        assert_eq!(compare(b"\xFF\xFF", b"\xFF\xFF\x01"), Ordering::Less);
    }

    #[test]
    fn prefix_end_increments_last_non_ff_byte() {
        assert_eq!(prefix_end(b"abc"), Some(b"abd".to_vec()));
    }

    #[test]
    fn prefix_end_truncates_trailing_ff() {
        assert_eq!(prefix_end(b"ab\xFF"), Some(b"ac".to_vec()));
    }

    #[test]
    fn prefix_end_all_ff_has_no_upper_bound() {
        assert_eq!(prefix_end(b"\xFF\xFF"), None);
        assert_eq!(prefix_end(b""), None);
    }

    #[test]
    fn u64_round_trips() {
        for value in [0u64, 1, u64::MAX, 0x0102030405060708] {
            let encoded = encode_u64(value);
            assert_eq!(decode_u64(&encoded).unwrap(), value);
        }
    }

    #[test]
    fn u64_decode_rejects_wrong_length() {
        assert!(decode_u64(&[0u8; 7]).is_err());
        assert!(decode_u64(&[0u8; 9]).is_err());
    }
}

//! String ⇄ slot-vector encoding
//!
//! Keys and values travel through the pipeline as slot vectors: one code
//! point per slot, right-padded with the zero sentinel. Zero therefore acts
//! as a string terminator on decode, which is why [`decode_slots`] stops at
//! the first sentinel slot.
//!
//! Code points must stay below the backend's plaintext modulus or they alias
//! under reduction; with the demo modulus p = 127 that means ASCII.

/// Encode a string as code-point slots, right-padded to `slot_count`
///
/// Returns `None` if the string needs more than `slot_count` slots. Callers
/// must reject such inputs rather than truncate; ingestion does this with a
/// typed error before anything is encrypted.
pub fn encode_str(s: &str, slot_count: usize) -> Option<Vec<u64>> {
    let mut slots: Vec<u64> = s.chars().map(|c| c as u64).collect();
    if slots.len() > slot_count {
        return None;
    }
    slots.resize(slot_count, 0);
    Some(slots)
}

/// Decode a slot vector back to a string, stopping at the first sentinel
///
/// Slots that do not map to a valid code point are skipped.
pub fn decode_slots(slots: &[u64]) -> String {
    slots
        .iter()
        .take_while(|&&s| s != 0)
        .filter_map(|&s| u32::try_from(s).ok().and_then(char::from_u32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_pads_to_width() {
        let slots = encode_str("ab", 5).unwrap();
        assert_eq!(slots, vec![97, 98, 0, 0, 0]);
    }

    #[test]
    fn test_encode_exact_width() {
        let slots = encode_str("abcd", 4).unwrap();
        assert_eq!(slots, vec![97, 98, 99, 100]);
    }

    #[test]
    fn test_encode_too_long() {
        assert!(encode_str("abcde", 4).is_none());
    }

    #[test]
    fn test_roundtrip() {
        let s = "5.0,6.0";
        let slots = encode_str(s, 32).unwrap();
        assert_eq!(decode_slots(&slots), s);
    }

    #[test]
    fn test_decode_stops_at_sentinel() {
        assert_eq!(decode_slots(&[104, 105, 0, 106, 107]), "hi");
    }

    #[test]
    fn test_decode_all_zero_is_empty() {
        assert_eq!(decode_slots(&[0, 0, 0, 0]), "");
    }

    #[test]
    fn test_empty_string() {
        let slots = encode_str("", 4).unwrap();
        assert_eq!(slots, vec![0, 0, 0, 0]);
        assert_eq!(decode_slots(&slots), "");
    }
}

//! Per-slot equality indicator
//!
//! Turns "does slot i of `a` equal slot i of `b`?" into an encrypted 0/1
//! answer using only arithmetic, never a comparison.

use crate::backend::SlotBackend;

/// Compute the per-slot equality indicator of `a` against `b`
///
/// Per slot the result is 1 where `a[i] == b[i]` in Z_p, else 0.
///
/// # Algorithm
///
/// Let `d = a - b`. Fermat's little theorem gives `d^(p-1) ≡ 1` for any
/// nonzero field element and `0^(p-1) = 0`, so the powered difference is the
/// *inverse* of the wanted indicator. Negating and adding 1 flips it:
/// `ind = 1 - d^(p-1)`.
///
/// The exponent comes from the backend's configured modulus, which must be
/// prime. For p = 2 the exponent degenerates to 1 and the power step is the
/// identity; the arithmetic still holds since `1 - d` is 1 iff `d = 0`.
///
/// Consumes `a` (it becomes the working ciphertext); callers still needing
/// the unmodified input pass an explicit clone.
pub fn equality_indicator<B: SlotBackend>(
    backend: &B,
    a: B::Ciphertext,
    b: &B::Ciphertext,
) -> B::Ciphertext {
    let diff = backend.sub(a, b);
    let powered = backend.power(diff, backend.modulus() - 1);
    backend.add_scalar(backend.negate(powered), 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ClearBackend;
    use crate::params::LookupParams;

    fn backend(p: u64, slots: usize) -> ClearBackend {
        ClearBackend::new(&LookupParams {
            plain_modulus: p,
            slot_count: slots,
        })
        .unwrap()
    }

    #[test]
    fn test_indicator_mixed_slots() {
        let be = backend(127, 4);
        let a = be.encode_encrypt(&[10, 0, 126, 50]).unwrap();
        let b = be.encode_encrypt(&[10, 5, 126, 49]).unwrap();

        let ind = equality_indicator(&be, a, &b);
        assert_eq!(be.decrypt_decode(&ind).unwrap(), vec![1, 0, 1, 0]);
    }

    #[test]
    fn test_indicator_exhaustive_small_field() {
        // Every (x, y) pair in Z_17, including (0,0) and (p-1,p-1).
        let p = 17;
        let be = backend(p, 1);
        for x in 0..p {
            for y in 0..p {
                let a = be.encode_encrypt(&[x]).unwrap();
                let b = be.encode_encrypt(&[y]).unwrap();
                let ind = equality_indicator(&be, a, &b);
                let expected = u64::from(x == y);
                assert_eq!(
                    be.decrypt_decode(&ind).unwrap(),
                    vec![expected],
                    "x={x} y={y}"
                );
            }
        }
    }

    #[test]
    fn test_indicator_boundary_pairs() {
        let p = 127;
        let be = backend(p, 2);
        let a = be.encode_encrypt(&[0, p - 1]).unwrap();
        let b = be.encode_encrypt(&[0, p - 1]).unwrap();
        let ind = equality_indicator(&be, a, &b);
        assert_eq!(be.decrypt_decode(&ind).unwrap(), vec![1, 1]);
    }

    #[test]
    fn test_indicator_degenerate_p2() {
        // p = 2: exponent p-1 = 1, the power step is the identity.
        let be = backend(2, 4);
        let a = be.encode_encrypt(&[0, 1, 0, 1]).unwrap();
        let b = be.encode_encrypt(&[0, 0, 1, 1]).unwrap();
        let ind = equality_indicator(&be, a, &b);
        assert_eq!(be.decrypt_decode(&ind).unwrap(), vec![1, 0, 0, 1]);
    }
}

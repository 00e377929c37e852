//! Slot AND-reduction
//!
//! Collapses a per-slot 0/1 indicator into a single match/no-match value
//! replicated across every slot. Since slots hold bits, the product of all
//! slots is their logical AND.

use crate::backend::SlotBackend;

/// AND all slots of a 0/1 indicator into a slot-replicated 0 or 1
///
/// Result: every slot holds 1 iff every input slot held 1, else every slot
/// holds 0.
///
/// Two regimes, chosen by the backend's slot width:
///
/// - **Power-of-two width**: rotate-and-multiply in log2(n) rounds with
///   rotation amounts 1, 2, 4, …, n/2. Each round multiplies the accumulator
///   by a rotated copy of itself, doubling the span of slots each slot has
///   absorbed. log2(n) rotations and multiplications per record.
/// - **Any other width**: all n cyclic rotations of the indicator, reduced
///   by a balanced product tree. The tree keeps multiplication depth at
///   ⌈log2(n)⌉ instead of the n-1 a linear chain would cost, which matters
///   under backends where multiplicative depth eats noise budget.
pub fn reduce_all_slots<B: SlotBackend>(backend: &B, ind: B::Ciphertext) -> B::Ciphertext {
    let n = backend.slot_count();

    if n.is_power_of_two() {
        let mut acc = ind;
        let mut rot = 1;
        while rot < n {
            let rotated = backend.rotate(acc.clone(), rot);
            acc = backend.multiply(acc, &rotated);
            rot *= 2;
        }
        acc
    } else {
        let mut rotations = Vec::with_capacity(n);
        for amount in 1..n {
            rotations.push(backend.rotate(ind.clone(), amount));
        }
        rotations.push(ind);
        product_tree(backend, rotations)
    }
}

/// Balanced total-product reduction of a non-empty ciphertext list
fn product_tree<B: SlotBackend>(backend: &B, mut cts: Vec<B::Ciphertext>) -> B::Ciphertext {
    while cts.len() > 1 {
        let mut next = Vec::with_capacity(cts.len().div_ceil(2));
        let mut iter = cts.into_iter();
        while let Some(first) = iter.next() {
            match iter.next() {
                Some(second) => next.push(backend.multiply(first, &second)),
                None => next.push(first),
            }
        }
        cts = next;
    }
    cts.remove(0)
}

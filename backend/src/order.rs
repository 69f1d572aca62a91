//! Multiplicative order of 2 modulo an odd base.
//!
//! Both order variants require an odd base of at least 3; 2 has no finite
//! order modulo an even base or modulo 1, so those inputs panic rather
//! than loop forever. Bases are expected to stay below 2^63 so the
//! doubling arithmetic cannot overflow.

use std::collections::HashMap;

/// Smallest positive `n` with `2^n ≡ 1 (mod base)`, found by walking the
/// doubling cycle one step at a time. The multiplicative group modulo an
/// odd base is finite and 2 is invertible in it, so the walk always
/// reaches 1.
///
/// # Panics
///
/// Panics when `base` is even or less than 3.
pub fn multiplicative_order(base: u64) -> u64 {
    assert_odd_base(base);
    let mut digit = 2 % base;
    let mut n = 1;
    while digit != 1 {
        digit = digit * 2 % base;
        n += 1;
    }
    n
}

/// Same result as [`multiplicative_order`], advancing by whole bit-lengths
/// instead of single doublings: the running value is shifted up until its
/// bit length matches the base, doubled once more if still below it, then
/// reduced by one subtraction. Each iteration accounts for several
/// doubling steps at once.
///
/// # Panics
///
/// Panics when `base` is even or less than 3.
pub fn multiplicative_order_fast(base: u64) -> u64 {
    assert_odd_base(base);
    let lead = base.leading_zeros();
    // start at the smallest power of two above the base
    let mut n = u64::from(64 - lead);
    let mut digit = ((1u128 << n) - u128::from(base)) as u64;
    while digit != 1 {
        let up = digit.leading_zeros() - lead;
        digit <<= up;
        n += u64::from(up);
        if digit < base {
            digit *= 2;
            n += 1;
        }
        digit -= base;
    }
    n
}

/// Cycle structure of the doubling map `d -> 2d mod base`, starting from 1,
/// for any `base >= 2`, even bases included, unlike the order variants.
///
/// Returns `Some((period, pre_period))` when 1 lies on the repeating cycle,
/// in which case `2^(period*m + pre_period) ≡ 2^pre_period (mod base)` for
/// all m; returns `None` when the cycle never passes through 1 (always the
/// case for even bases, where every power of 2 past the start is even).
/// For an odd base the pre-period is 0 and the period equals
/// [`multiplicative_order`].
pub fn doubling_cycle(base: u64) -> Option<(u64, u64)> {
    assert!(base >= 2, "doubling cycle is only defined for base >= 2, got {}", base);
    let mut successor = HashMap::new();
    let mut digit = 1 % base;
    let mut steps = 0u64;
    while !successor.contains_key(&digit) {
        let next = digit * 2 % base;
        successor.insert(digit, next);
        digit = next;
        steps += 1;
    }
    // digit is the first repeated value, i.e. the entry point of the cycle
    let mut walker = successor[&digit];
    let mut period = 1u64;
    let mut seen_one = digit == 1 || walker == 1;
    while walker != digit {
        walker = successor[&walker];
        period += 1;
        seen_one = seen_one || walker == 1;
    }
    if seen_one {
        Some((period, steps - period))
    } else {
        None
    }
}

fn assert_odd_base(base: u64) {
    assert!(
        base & 1 == 1 && base > 1,
        "order of 2 is only defined modulo an odd base >= 3, got {}",
        base
    );
}

#[cfg(test)]
mod tests {
    use super::{doubling_cycle, multiplicative_order, multiplicative_order_fast};

    #[test]
    fn order_is_the_smallest_exponent() {
        for base in (3..=5001u64).step_by(2) {
            let n = multiplicative_order(base);
            let mut digit = 2 % base;
            for k in 1..n {
                assert_ne!(digit, 1, "2^{} ≡ 1 (mod {}) but order said {}", k, base, n);
                digit = digit * 2 % base;
            }
            assert_eq!(digit, 1, "2^{} !≡ 1 (mod {})", n, base);
        }
    }

    #[test]
    fn fast_variant_agrees_with_the_iterative_one() {
        for base in (3..=5001u64).step_by(2) {
            assert_eq!(
                multiplicative_order(base),
                multiplicative_order_fast(base),
                "variants disagree for base {}",
                base
            );
        }
    }

    #[test]
    fn known_small_orders() {
        assert_eq!(multiplicative_order(3), 2);
        assert_eq!(multiplicative_order(5), 4);
        assert_eq!(multiplicative_order(7), 3);
        assert_eq!(multiplicative_order(9), 6);
        assert_eq!(multiplicative_order(11), 10);
        assert_eq!(multiplicative_order(23), 11);
    }

    #[test]
    fn cycle_of_an_odd_base_is_its_order_with_no_preamble() {
        for base in (3..=501u64).step_by(2) {
            assert_eq!(
                doubling_cycle(base),
                Some((multiplicative_order(base), 0)),
                "cycle disagrees for base {}",
                base
            );
        }
    }

    #[test]
    fn even_bases_never_cycle_through_one() {
        for base in [2u64, 10, 12, 100, 2048] {
            assert_eq!(doubling_cycle(base), None);
        }
    }

    #[test]
    #[should_panic(expected = "odd base")]
    fn even_base_is_rejected() {
        multiplicative_order(10);
    }

    #[test]
    #[should_panic(expected = "odd base")]
    fn even_base_is_rejected_by_the_fast_variant() {
        multiplicative_order_fast(4);
    }

    #[test]
    #[should_panic(expected = "odd base")]
    fn base_one_is_rejected() {
        multiplicative_order(1);
    }
}

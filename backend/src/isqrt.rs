/// Floor of the square root: the unique `r` with `r*r <= n < (r+1)*(r+1)`.
///
/// Newton's method on integers. The first estimate is always at least the
/// true root, and each iterate decreases until it would cross below it, so
/// the last iterate before the descent stops is the floor root. Converges
/// in O(log n) steps.
pub fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let mut x = n / 2 + 1;
    let mut y = (x + n / x) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::isqrt;

    fn is_floor_root(r: u64, n: u64) -> bool {
        let r = u128::from(r);
        let n = u128::from(n);
        r * r <= n && n < (r + 1) * (r + 1)
    }

    #[test]
    fn zero_and_one_are_their_own_roots() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
    }

    #[test]
    fn exhaustive_over_small_inputs() {
        for n in 0..100_000u64 {
            let r = isqrt(n);
            assert!(is_floor_root(r, n), "isqrt({}) returned {}", n, r);
        }
    }

    #[test]
    fn spot_checks_on_large_inputs() {
        assert_eq!(isqrt(1_000_000_000_000), 1_000_000);
        assert_eq!(isqrt(999_999_999_999), 999_999);
        assert_eq!(isqrt(1_000_000_000_001), 1_000_000);
        for n in [
            u64::MAX,
            u64::MAX - 1,
            1 << 62,
            (1 << 62) - 1,
            10_000_000_002_000_000_000,
        ] {
            assert!(is_floor_root(isqrt(n), n));
        }
    }

    #[test]
    fn exact_around_perfect_squares() {
        for r in [2u64, 3, 255, 256, 65_535, 65_536, 4_294_967_295] {
            let square = r * r;
            assert_eq!(isqrt(square - 1), r - 1);
            assert_eq!(isqrt(square), r);
            assert_eq!(isqrt(square + 1), r);
        }
    }
}

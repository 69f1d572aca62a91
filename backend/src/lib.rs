//! Incremental certification of Mersenne exponent candidates.
//!
//! An unbounded stream of odd prime bases feeds an order computation
//! (the multiplicative order of 2 modulo each base); the certification
//! engine then confirms, using only primes the stream has already
//! produced, which of those order values are provably prime, a
//! precondition for `2^n - 1` to be a Mersenne prime.

pub mod certify;
pub mod isqrt;
pub mod order;
pub mod primes;

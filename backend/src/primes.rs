use crate::isqrt::isqrt;

/// Unbounded generator of primes in strictly increasing order.
///
/// Every prime produced is retained and becomes the trial-division basis
/// for later candidates: an odd candidate is prime when no retained prime
/// up to its integer square root divides it, because any composite number
/// has a prime factor no larger than its square root. Candidates advance
/// by 2 past the seed, so even numbers are never tried.
pub struct PrimeStream {
    known: Vec<u64>,
}

impl PrimeStream {
    pub fn new() -> Self {
        PrimeStream { known: Vec::new() }
    }

    /// All primes produced so far, in increasing order. Read-only view
    /// shared with the certification engine's factorization step.
    pub fn known(&self) -> &[u64] {
        &self.known
    }

    /// Produce and discard the first `count` primes. The discarded primes
    /// still enter the known list; callers use this to skip 2, which the
    /// order computation cannot take as a base.
    pub fn skip_primes(&mut self, count: usize) {
        for _ in 0..count {
            self.next_prime();
        }
    }

    pub fn next_prime(&mut self) -> u64 {
        let next = match self.known.last() {
            None => 2,
            Some(2) => 3,
            Some(&last) => {
                let mut candidate = last + 2;
                while !self.survives_trial_division(candidate) {
                    candidate += 2;
                }
                candidate
            }
        };
        self.known.push(next);
        next
    }

    fn survives_trial_division(&self, candidate: u64) -> bool {
        let bound = isqrt(candidate);
        self.known
            .iter()
            .take_while(|&&p| p <= bound)
            .all(|&p| candidate % p != 0)
    }
}

impl Default for PrimeStream {
    fn default() -> Self {
        PrimeStream::new()
    }
}

impl Iterator for PrimeStream {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        Some(self.next_prime())
    }
}

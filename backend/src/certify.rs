use serde::Serialize;
use std::collections::{BTreeMap, HashSet, VecDeque};

use crate::isqrt::isqrt;
use crate::order::multiplicative_order;
use crate::primes::PrimeStream;

/// Incremental certification of order values.
///
/// Owns the prime stream, pulls one odd base per step, derives the
/// multiplicative order of 2 modulo that base, and classifies the order
/// value (and any prime factors discovered along the way) as confirmed
/// prime, ruled out composite, or deferred. Deferred candidates are
/// re-examined after every base and resolved once enough primes have been
/// produced; no candidate is ever re-derived or scanned from scratch.
pub struct Certifier {
    primes: PrimeStream,
    certain: HashSet<u64>,
    composite: HashSet<u64>,
    pending: BTreeMap<u64, Pending>,
    bases_consumed: u64,
    ready: VecDeque<u64>,
}

/// A candidate whose trial division ran out of known primes before
/// reaching its square root.
struct Pending {
    /// Index into the known prime list of the next prime to test.
    next_unchecked: usize,
    /// ⌊√n⌋. Once more bases than this have been consumed, every prime up
    /// to the square root has been produced, so a candidate that no known
    /// prime divides must itself be prime.
    deadline: u64,
}

/// Point-in-time progress of a run, for reporting.
#[derive(Serialize)]
pub struct Snapshot {
    pub bases_consumed: u64,
    pub largest_base: u64,
    pub confirmed: usize,
    pub pending: usize,
    pub ruled_out: usize,
}

impl Certifier {
    pub fn new() -> Self {
        let mut primes = PrimeStream::new();
        // 2 is never a base, but it stays in the known list so the
        // factorization step can divide by it
        primes.skip_primes(1);
        Certifier {
            primes,
            certain: HashSet::new(),
            composite: HashSet::new(),
            pending: BTreeMap::new(),
            bases_consumed: 0,
            ready: VecDeque::new(),
        }
    }

    /// Consume the next base and return every value newly confirmed prime,
    /// in confirmation order. The vector is often empty: a base whose
    /// order was already classified confirms nothing new.
    pub fn step(&mut self) -> Vec<u64> {
        let base = self.primes.next_prime();
        self.bases_consumed += 1;
        let n = multiplicative_order(base);
        let mut confirmed = Vec::new();
        self.observe(n, &mut confirmed);
        self.rescan(&mut confirmed);
        confirmed
    }

    pub fn bases_consumed(&self) -> u64 {
        self.bases_consumed
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            bases_consumed: self.bases_consumed,
            largest_base: self.primes.known().last().copied().unwrap_or(0),
            confirmed: self.certain.len(),
            pending: self.pending.len(),
            ruled_out: self.composite.len(),
        }
    }

    /// Classify a fresh candidate against the primes known so far.
    ///
    /// A composite candidate is ruled out immediately, and every distinct
    /// prime factor discovered while splitting it is observed as a
    /// candidate of its own; this is how a small prime gets confirmed
    /// long before it ever shows up as an order value. A candidate whose
    /// factor range outruns the known primes is deferred, never guessed.
    fn observe(&mut self, n: u64, confirmed: &mut Vec<u64>) {
        if self.certain.contains(&n)
            || self.composite.contains(&n)
            || self.pending.contains_key(&n)
        {
            return;
        }
        if n <= 2 {
            // no possible factor below the square root
            self.confirm(n, confirmed);
            return;
        }
        match factor_over(self.primes.known(), n) {
            Factored::Prime => self.confirm(n, confirmed),
            Factored::Composite(factors) => {
                self.composite.insert(n);
                for q in factors {
                    self.observe(q, confirmed);
                }
            }
            Factored::Unresolved { factors, residue } => {
                if factors.is_empty() {
                    self.pending.insert(
                        n,
                        Pending {
                            next_unchecked: self.primes.known().len(),
                            deadline: isqrt(n),
                        },
                    );
                } else {
                    // a proper factor already proves n composite; only the
                    // unfactored residue is still undecided
                    self.composite.insert(n);
                    for q in factors {
                        self.observe(q, confirmed);
                    }
                    self.observe(residue, confirmed);
                }
            }
        }
    }

    /// Re-examine every deferred candidate. Each is first tested against
    /// the primes produced since its last visit: a divisor rules it out,
    /// and reaching past its square root leaves primality as the only
    /// possibility. Independently, and checked second, a candidate whose
    /// deadline has passed is promoted even with untested range remaining:
    /// more bases than ⌊√n⌋ means every prime up to √n has already been
    /// tried against it.
    fn rescan(&mut self, confirmed: &mut Vec<u64>) {
        let known = self.primes.known();
        let mut promoted = Vec::new();
        let mut disproved = Vec::new();
        for (&n, pend) in self.pending.iter_mut() {
            let mut divisor_found = false;
            while pend.next_unchecked < known.len() {
                let p = known[pend.next_unchecked];
                if p * p > n {
                    break;
                }
                if n % p == 0 {
                    divisor_found = true;
                    break;
                }
                pend.next_unchecked += 1;
            }
            if divisor_found {
                disproved.push(n);
                continue;
            }
            let next = pend.next_unchecked;
            let covered = next < known.len() && known[next] * known[next] > n;
            if covered {
                promoted.push(n);
            } else if self.bases_consumed > pend.deadline {
                promoted.push(n);
            }
        }
        for n in disproved {
            self.pending.remove(&n);
            self.composite.insert(n);
        }
        for n in promoted {
            self.pending.remove(&n);
            self.confirm(n, confirmed);
        }
    }

    fn confirm(&mut self, n: u64, confirmed: &mut Vec<u64>) {
        if self.certain.insert(n) {
            confirmed.push(n);
        }
    }
}

impl Default for Certifier {
    fn default() -> Self {
        Certifier::new()
    }
}

/// Pull interface: the next confirmed-prime order value. Never returns
/// `None`; each call steps through as many bases as it takes to confirm
/// something.
impl Iterator for Certifier {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        loop {
            if let Some(n) = self.ready.pop_front() {
                return Some(n);
            }
            let confirmed = self.step();
            self.ready.extend(confirmed);
        }
    }
}

enum Factored {
    /// No factor but itself, with the known primes covering the whole
    /// square root.
    Prime,
    /// Fully split into prime factors, at least one of them proper.
    Composite(Vec<u64>),
    /// The known primes ran out below the square root of what was left.
    Unresolved { factors: Vec<u64>, residue: u64 },
}

/// Trial division of `n` over an increasing list of known primes.
fn factor_over(known: &[u64], n: u64) -> Factored {
    let mut rest = n;
    let mut factors = Vec::new();
    for &p in known {
        if p * p > rest {
            if rest > 1 {
                factors.push(rest);
            }
            return if factors == [n] {
                Factored::Prime
            } else {
                Factored::Composite(factors)
            };
        }
        while rest % p == 0 {
            factors.push(p);
            rest /= p;
        }
    }
    if rest == 1 {
        Factored::Composite(factors)
    } else {
        Factored::Unresolved { factors, residue: rest }
    }
}

//! Départage déterministe des ex æquo.
//!
//! Chaque jour, chaque personne reçoit une clé tirée d'un flux PCG. À graine
//! égale, le classement (priorité, clé) est identique d'une exécution à l'autre.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub(super) struct TieBreaker {
    inner: Pcg64Mcg,
}

impl TieBreaker {
    pub(super) fn new(seed: Option<u64>) -> Self {
        let inner = match seed {
            Some(seed) => Pcg64Mcg::seed_from_u64(seed),
            None => Pcg64Mcg::from_entropy(),
        };
        Self { inner }
    }

    pub(super) fn next_key(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

//! Random choice among layout variants without three identical picks in a row.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const HISTORY_LEN: usize = 2;

/// One selector per assembly run. The history is shared by every slide kind
/// that asks for a variant.
#[derive(Debug)]
pub struct VariantSelector<R = StdRng> {
    rng: R,
    history: VecDeque<String>,
}

impl VariantSelector<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> VariantSelector<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    /// Picks one of `candidates`.
    ///
    /// When the last two picks were the same key, the first other candidate in
    /// the given order is returned. Otherwise the pick is uniform.
    pub fn choose<S: AsRef<str>>(&mut self, candidates: &[S]) -> Option<String> {
        let repeated = match (self.history.front(), self.history.back()) {
            (Some(a), Some(b)) if self.history.len() == HISTORY_LEN && a == b => Some(a.clone()),
            _ => None,
        };
        let picked = match repeated {
            Some(repeated) => candidates
                .iter()
                .map(AsRef::<str>::as_ref)
                .find(|key| *key != repeated)
                .or_else(|| candidates.first().map(AsRef::<str>::as_ref)),
            None => candidates.choose(&mut self.rng).map(AsRef::<str>::as_ref),
        }?
        .to_string();

        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(picked.clone());
        Some(picked)
    }

    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }
}

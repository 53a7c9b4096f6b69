//! Lead-in phrasing strategy.
//!
//! Some replies open with one of several equivalent sentences.  Which one is
//! picked is delegated to a [`Phrasing`] so production code can pick at
//! random while tests pin the choice.

use rand::Rng;

/// Picks one of `choices` equivalent phrasings.
pub trait Phrasing: Send + Sync {
    /// Return an index in `0..choices`.  `choices` is never zero.
    fn pick(&self, choices: usize) -> usize;
}

/// Uniform random pick.  Output is intentionally not repeatable.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPhrasing;

impl Phrasing for RandomPhrasing {
    fn pick(&self, choices: usize) -> usize {
        rand::thread_rng().gen_range(0..choices.max(1))
    }
}

/// Always picks the same index (wrapped into range).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPhrasing(pub usize);

impl Phrasing for FixedPhrasing {
    fn pick(&self, choices: usize) -> usize {
        self.0 % choices.max(1)
    }
}

/// Select one of `options` through `phrasing`.
///
/// Out-of-range picks from a misbehaving strategy are clamped to the last
/// option.
pub fn choose<'a>(phrasing: &dyn Phrasing, options: &[&'a str]) -> &'a str {
    match options.len() {
        0 => "",
        len => options[phrasing.pick(len).min(len - 1)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: [&str; 3] = ["one", "two", "three"];

    #[test]
    fn random_pick_stays_in_range() {
        for _ in 0..200 {
            assert!(RandomPhrasing.pick(3) < 3);
        }
    }

    #[test]
    fn fixed_pick_wraps() {
        assert_eq!(FixedPhrasing(4).pick(3), 1);
        assert_eq!(choose(&FixedPhrasing(2), &OPTIONS), "three");
    }

    #[test]
    fn choose_clamps_bad_strategy() {
        struct TooBig;
        impl Phrasing for TooBig {
            fn pick(&self, choices: usize) -> usize {
                choices + 10
            }
        }
        assert_eq!(choose(&TooBig, &OPTIONS), "three");
    }

    #[test]
    fn choose_from_empty_is_empty() {
        assert_eq!(choose(&RandomPhrasing, &[]), "");
    }
}

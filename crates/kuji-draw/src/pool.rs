//! The set of lineup indices still eligible for a draw.

use kuji_core::Entry;

use crate::random::RandomSource;

/// Lineup indices that can still be drawn. Only ever shrinks.
///
/// Members keep their insertion order so a scripted source replays
/// predictably, but selection is uniform over the current members and
/// does not depend on that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawPool {
    members: Vec<usize>,
}

impl DrawPool {
    /// A pool holding `0..len`.
    pub fn full(len: usize) -> Self {
        Self {
            members: (0..len).collect(),
        }
    }

    /// A pool holding the index of every entry not yet drawn.
    pub fn from_entries(entries: &[Entry]) -> Self {
        Self {
            members: entries
                .iter()
                .enumerate()
                .filter(|(_, e)| !e.selected)
                .map(|(i, _)| i)
                .collect(),
        }
    }

    /// Current members.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether nothing is left to draw.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `index` is still drawable.
    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }

    /// Choose a member uniformly without removing it.
    pub fn pick(&self, rng: &mut impl RandomSource) -> Option<usize> {
        if self.members.is_empty() {
            return None;
        }
        Some(self.members[rng.next_index(self.members.len())])
    }

    /// Remove `index`. Returns false if it was not a member.
    pub fn remove(&mut self, index: usize) -> bool {
        match self.members.iter().position(|&m| m == index) {
            Some(slot) => {
                self.members.remove(slot);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::random::ScriptedRandom;

    #[test]
    fn full_pool() {
        let pool = DrawPool::full(3);
        assert_eq!(pool.members(), &[0, 1, 2]);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn from_entries_skips_selected() {
        let mut entries = vec![Entry::new("A"), Entry::new("B"), Entry::new("C")];
        entries[1].mark_selected(Utc::now());
        let pool = DrawPool::from_entries(&entries);
        assert_eq!(pool.members(), &[0, 2]);
    }

    #[test]
    fn empty_pool_picks_nothing() {
        let pool = DrawPool::default();
        assert!(pool.is_empty());
        assert_eq!(pool.pick(&mut ScriptedRandom::first_index()), None);
    }

    #[test]
    fn pick_does_not_remove() {
        let pool = DrawPool::full(4);
        let mut rng = ScriptedRandom::default().with_indices([2]);
        assert_eq!(pool.pick(&mut rng), Some(2));
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn remove_keeps_order() {
        let mut pool = DrawPool::full(4);
        assert!(pool.remove(1));
        assert!(!pool.remove(1));
        assert_eq!(pool.members(), &[0, 2, 3]);
        assert!(!pool.contains(1));
        assert!(pool.contains(3));
    }

    #[test]
    fn pick_is_roughly_uniform() {
        let pool = DrawPool::full(5);
        let mut rng = StdRng::seed_from_u64(8);
        let mut counts = [0u32; 5];
        for _ in 0..5000 {
            counts[pool.pick(&mut rng).unwrap()] += 1;
        }
        assert!(counts.iter().all(|&n| (800..1200).contains(&n)), "{counts:?}");
    }
}

//! Frequency counting shared by every "most popular" statistic.
//!
//! Tie-break: when several values share the highest count, the value that
//! appears first in dataset order wins. `value_counts` orders by descending
//! count and keeps first-appearance order among equal counts, so `mode` is
//! simply its first entry.

use std::collections::HashMap;
use std::hash::Hash;

/// Count occurrences, most frequent first.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut slots: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();

    for value in values {
        match slots.get(&value) {
            Some(&slot) => {
                if let Some(entry) = counts.get_mut(slot) {
                    entry.1 += 1;
                }
            }
            None => {
                slots.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    // stable: ties keep first-appearance order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Most frequent value and its count, `None` for no values.
pub fn mode<T, I>(values: I) -> Option<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_counts_descending_with_first_seen_ties() {
        let counts = value_counts(["b", "a", "c", "a", "b", "d"]);
        assert_eq!(counts, vec![("b", 2), ("a", 2), ("c", 1), ("d", 1)]);
    }

    #[test]
    fn test_mode_tie_goes_to_first_seen() {
        assert_eq!(mode([7, 3, 3, 7]), Some((7, 2)));
        assert_eq!(mode([1, 2, 2]), Some((2, 2)));
    }

    #[test]
    fn test_mode_of_nothing() {
        assert_eq!(mode(Vec::<u32>::new()), None);
    }
}

use rand::seq::SliceRandom;
use rand::Rng;

/// Returns a shuffled copy of `items`, leaving the caller's slice untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    // Fisher-Yates, every permutation is reachable
    shuffled.shuffle(rng);
    shuffled
}

/// Draws up to `n` elements without replacement.
/// Asking for more than there is just returns everything, shuffled.
pub fn sample<T: Clone, R: Rng + ?Sized>(items: &[T], n: usize, rng: &mut R) -> Vec<T> {
    let mut drawn = shuffle(items, rng);
    drawn.truncate(n);
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sorted(mut v: Vec<u32>) -> Vec<u32> {
        v.sort();
        v
    }

    #[test]
    fn shuffle_keeps_the_same_elements() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = vec![5, 1, 1, 9, 3, 7];

        let shuffled = shuffle(&items, &mut rng);

        assert_eq!(sorted(shuffled), sorted(items));
    }

    #[test]
    fn shuffle_handles_empty_and_single() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty: Vec<u32> = Vec::new();

        assert!(shuffle(&empty, &mut rng).is_empty());
        assert_eq!(shuffle(&[7u32], &mut rng), vec![7]);
    }

    #[test]
    fn first_element_does_not_stick_to_front() {
        let mut rng = StdRng::seed_from_u64(7);
        let items: Vec<u32> = (0..4).collect();
        let mut at_front = [0usize; 4];

        for _ in 0..4000 {
            let shuffled = shuffle(&items, &mut rng);
            let pos = shuffled.iter().position(|x| *x == 0).unwrap();
            at_front[pos] += 1;
        }

        // roughly 1000 each, generous bounds
        for count in at_front {
            assert!((700..1300).contains(&count), "skewed: {:?}", at_front);
        }
    }

    #[test]
    fn sample_draws_without_duplicates() {
        let mut rng = StdRng::seed_from_u64(3);
        let items: Vec<u32> = (0..15).collect();

        let drawn = sample(&items, 10, &mut rng);

        assert_eq!(drawn.len(), 10);
        let mut unique = drawn.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 10);
        assert!(drawn.iter().all(|x| items.contains(x)));
    }

    #[test]
    fn sample_larger_than_input_returns_everything() {
        let mut rng = StdRng::seed_from_u64(4);
        let items = vec![1u32, 2, 3];

        let drawn = sample(&items, 10, &mut rng);

        assert_eq!(sorted(drawn), items);
    }
}

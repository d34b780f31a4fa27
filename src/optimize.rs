//! Optimization direction.

use std::cmp::Ordering;

/// Whether the engine searches for the minimal or the maximal fitness.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Optimize {
    Minimum,
    #[default]
    Maximum,
}

impl Optimize {
    /// Compares two fitness values: `Greater` means `a` is better than `b`.
    ///
    /// A value that is not comparable to itself (e.g. NaN) is worse than
    /// every other value in both directions, and equal to another such value.
    /// This keeps the ordering total for floating point fitness.
    pub fn compare<C: PartialOrd>(&self, a: &C, b: &C) -> Ordering {
        match (is_ordered(a), is_ordered(b)) {
            (true, true) => {
                let ordering = a.partial_cmp(b).unwrap_or(Ordering::Equal);
                match self {
                    Optimize::Maximum => ordering,
                    Optimize::Minimum => ordering.reverse(),
                }
            }
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => Ordering::Equal,
        }
    }

    /// Ordering that sorts the best values first.
    pub fn descending<C: PartialOrd>(&self, a: &C, b: &C) -> Ordering {
        self.compare(b, a)
    }

    /// Ordering that sorts the worst values first.
    pub fn ascending<C: PartialOrd>(&self, a: &C, b: &C) -> Ordering {
        self.compare(a, b)
    }

    /// Returns the better of the two values, `a` on ties.
    pub fn best<'a, C: PartialOrd>(&self, a: &'a C, b: &'a C) -> &'a C {
        if self.compare(b, a) == Ordering::Greater {
            b
        } else {
            a
        }
    }

    /// Returns the worse of the two values, `a` on ties.
    pub fn worst<'a, C: PartialOrd>(&self, a: &'a C, b: &'a C) -> &'a C {
        if self.compare(b, a) == Ordering::Less {
            b
        } else {
            a
        }
    }
}

fn is_ordered<C: PartialOrd>(value: &C) -> bool {
    value.partial_cmp(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare() {
        assert_eq!(Optimize::Maximum.compare(&2.0, &1.0), Ordering::Greater);
        assert_eq!(Optimize::Minimum.compare(&2.0, &1.0), Ordering::Less);
    }

    #[test]
    fn test_nan_is_worst_in_both_directions() {
        for optimize in [Optimize::Maximum, Optimize::Minimum] {
            assert_eq!(optimize.compare(&f64::NAN, &1.0), Ordering::Less);
            assert_eq!(optimize.compare(&1.0, &f64::NAN), Ordering::Greater);
            assert_eq!(optimize.compare(&f64::NAN, &f64::NAN), Ordering::Equal);
            assert_eq!(*optimize.best(&f64::NAN, &-5.0), -5.0);
            assert!(optimize.worst(&-5.0, &f64::NAN).is_nan());
        }
    }

    #[test]
    fn test_sorting_with_nan_is_total() {
        let mut values = vec![2.0, f64::NAN, 5.0, f64::NAN, -1.0, 3.0];
        values.sort_by(|a, b| Optimize::Maximum.descending(a, b));
        assert_eq!(&values[..4], &[5.0, 3.0, 2.0, -1.0]);
        assert!(values[4..].iter().all(|v| v.is_nan()));

        values.sort_by(|a, b| Optimize::Minimum.descending(a, b));
        assert_eq!(&values[..4], &[-1.0, 2.0, 3.0, 5.0]);
        assert!(values[4..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_best_and_worst() {
        assert_eq!(*Optimize::Maximum.best(&1, &3), 3);
        assert_eq!(*Optimize::Minimum.best(&1, &3), 1);
        assert_eq!(*Optimize::Maximum.worst(&1, &3), 1);
        assert_eq!(*Optimize::Minimum.worst(&1, &3), 3);
    }

    #[test]
    fn test_descending_sorts_best_first() {
        let mut values = vec![3, 1, 2];
        values.sort_by(|a, b| Optimize::Maximum.descending(a, b));
        assert_eq!(values, vec![3, 2, 1]);
        values.sort_by(|a, b| Optimize::Minimum.descending(a, b));
        assert_eq!(values, vec![1, 2, 3]);
    }
}

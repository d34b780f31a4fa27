//! # Sequences
//!
//! Fixed-length ordered containers in two flavours:
//!
//! - [`ISeq`] is immutable and structure-shared. Cloning it is a reference count
//!   increment, which makes it cheap to hand around between chromosomes,
//!   genotypes and phenotypes.
//! - [`MSeq`] is mutable and exclusively owned. It is obtained by copying an
//!   `ISeq` and turned back into one with [`MSeq::into_iseq`].
//!
//! Mutating an `MSeq` never affects any `ISeq` it was copied from.

use std::ops::{Index, IndexMut};
use std::slice;
use std::sync::Arc;

use crate::error::{GeneticError, Result};

/// An immutable, structure-shared sequence.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ISeq<T> {
    items: Arc<Vec<T>>,
}

impl<T> Clone for ISeq<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> ISeq<T> {
    pub fn empty() -> Self {
        Self {
            items: Arc::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns `true` if both sequences share the same backing storage.
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    pub fn map<U, F>(&self, f: F) -> ISeq<U>
    where
        F: FnMut(&T) -> U,
    {
        self.items.iter().map(f).collect()
    }
}

impl<T: Clone> ISeq<T> {
    /// Returns a mutable copy of this sequence.
    pub fn copy(&self) -> MSeq<T> {
        MSeq {
            items: self.items.as_ref().clone(),
        }
    }

    /// Converts this sequence into a mutable one, copying only if the storage is shared.
    pub fn into_mseq(self) -> MSeq<T> {
        let items = Arc::try_unwrap(self.items).unwrap_or_else(|shared| shared.as_ref().clone());
        MSeq { items }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.as_ref().clone()
    }
}

impl<T> Index<usize> for ISeq<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> From<Vec<T>> for ISeq<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }
}

impl<T> FromIterator<T> for ISeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a, T> IntoIterator for &'a ISeq<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A mutable, exclusively owned sequence of fixed length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MSeq<T> {
    items: Vec<T>,
}

impl<T> MSeq<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let length = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(GeneticError::IndexOutOfBounds { index, length })?;
        Ok(std::mem::replace(slot, value))
    }

    /// Swaps the elements at `i` and `j`.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        let length = self.items.len();
        for index in [i, j] {
            if index >= length {
                return Err(GeneticError::IndexOutOfBounds { index, length });
            }
        }
        self.items.swap(i, j);
        Ok(())
    }

    /// Swaps the range `[start, end)` of this sequence with the range of equal
    /// length starting at `other_start` in `other`.
    ///
    /// An empty range (`start == end`) is a no-op.
    pub fn swap_range(
        &mut self,
        start: usize,
        end: usize,
        other: &mut MSeq<T>,
        other_start: usize,
    ) -> Result<()> {
        if start > end {
            return Err(GeneticError::InvalidArgument(format!(
                "Range start {} is greater than range end {}",
                start, end
            )));
        }
        if end > self.items.len() {
            return Err(GeneticError::IndexOutOfBounds {
                index: end,
                length: self.items.len(),
            });
        }
        let other_end = other_start + (end - start);
        if other_end > other.items.len() {
            return Err(GeneticError::IndexOutOfBounds {
                index: other_end,
                length: other.items.len(),
            });
        }

        self.items[start..end].swap_with_slice(&mut other.items[other_start..other_end]);
        Ok(())
    }

    pub fn into_iseq(self) -> ISeq<T> {
        ISeq::from(self.items)
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Index<usize> for MSeq<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for MSeq<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T> From<Vec<T>> for MSeq<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for MSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

//! Population module
//!
//! The population module contains the `Population` struct, the set of
//! persons alive in one generation. A population is created fresh each
//! generation step; prior generations stay reachable through the
//! pedigree's family records.

use rand::Rng;
use rand::seq::IndexedRandom;
use std::ops::Index;

use crate::core::person::PersonRef;
use crate::errors::{PedisimError, Result};

/// The persons alive in one generation.
#[derive(Clone, Debug, Default)]
pub struct Population {
    persons: Vec<PersonRef>,
}

impl Population {
    /// Construct a new, empty `Population`.
    pub fn new() -> Self {
        Self {
            persons: Vec::new(),
        }
    }

    /// Construct a `Population` from a `Vec` of `PersonRef`s.
    pub fn from_persons(persons: Vec<PersonRef>) -> Self {
        Self { persons }
    }

    /// Get an iterator over the `Population`.
    pub fn iter(&self) -> std::slice::Iter<PersonRef> {
        self.persons.iter()
    }

    /// Check if the `Population` is empty.
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Get the size of the `Population`.
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn get(&self, index: usize) -> Option<&PersonRef> {
        self.persons.get(index)
    }

    /// Push a `PersonRef` to the end of the `Population`.
    pub fn push(&mut self, person: PersonRef) {
        self.persons.push(person);
    }

    pub fn extend<I: IntoIterator<Item = PersonRef>>(&mut self, persons: I) {
        self.persons.extend(persons);
    }

    /// Draw one person uniformly at random, with replacement across
    /// calls. Fails on an empty population.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Result<&PersonRef> {
        self.persons.choose(rng).ok_or_else(|| {
            PedisimError::IllegalStateError(
                "cannot sample a parent from an empty population".to_string(),
            )
        })
    }
}

impl Index<usize> for Population {
    type Output = PersonRef;

    fn index(&self, index: usize) -> &Self::Output {
        &self.persons[index]
    }
}

impl FromIterator<PersonRef> for Population {
    fn from_iter<I: IntoIterator<Item = PersonRef>>(iter: I) -> Self {
        Self {
            persons: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a PersonRef;
    type IntoIter = std::slice::Iter<'a, PersonRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.persons.iter()
    }
}

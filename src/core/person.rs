//! Individual identity and id allocation.

use std::fmt;
use std::sync::Arc;

use crate::core::genotype::Genotype;

/// Shared handle to an immutable individual. Pedigree records and
/// population snapshots reference the same person through this handle.
pub type PersonRef = Arc<Person>;

/// An individual: a globally unique id, the generation it was born in,
/// and its genotype.
#[derive(Clone, Debug)]
pub struct Person {
    id: usize,
    generation: usize,
    genotype: Genotype,
}

impl Person {
    pub fn new(id: usize, generation: usize, genotype: Genotype) -> PersonRef {
        Arc::new(Self {
            id,
            generation,
            genotype,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{id={},gen={}}}", self.id, self.generation)
    }
}

/// Hands out sequential, globally unique person ids. Ids start at 1 so
/// that 0 can denote an unknown parent in pedigree output formats.
#[derive(Debug)]
pub struct IdGenerator {
    next: usize,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(next: usize) -> Self {
        Self { next }
    }

    pub fn next_id(&mut self) -> usize {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

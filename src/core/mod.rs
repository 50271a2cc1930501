//! This module contains the core datatypes of the library.

pub mod genotype;
pub mod haplotype;
pub mod pedigree;
pub mod person;
pub mod population;

pub use genotype::Genotype;
pub use haplotype::{BreakpointModel, BreakpointSampler, Haplotype, Lineage, Region};
pub use pedigree::{Family, Pedigree};
pub use person::{IdGenerator, Person, PersonRef};
pub use population::Population;

//! Family records and the pedigree they form.
//!
//! A `Family` is the immutable record of one mating event: the parent
//! pair, the offspring it produced, and the per-parent transmission
//! weights. The `Pedigree` is the ordered collection of every mating
//! event across all generation steps; together with the founder
//! population it makes every simulated generation reachable.

use rand::Rng;

use crate::core::genotype::Genotype;
use crate::core::haplotype::BreakpointSampler;
use crate::core::person::{IdGenerator, Person, PersonRef};

/// One mating event. Constructed finalized; the sibling list is never
/// mutated after creation.
#[derive(Clone, Debug)]
pub struct Family {
    mother: PersonRef,
    father: PersonRef,
    siblings: Vec<PersonRef>,
    generation: usize,
    mother_probability: f64,
    father_probability: f64,
}

impl Family {
    /// Mates `mother` and `father` to produce `offspring_count`
    /// children, with transmission probabilities left at 0.0.
    ///
    /// Each child is built from one independent recombination draw per
    /// parent: meiosis is independent per gamete, even for multiple
    /// offspring of the same pair. `offspring_count` of zero is legal
    /// and records an unproductive mating.
    pub fn mate<R: Rng>(
        mother: &PersonRef,
        father: &PersonRef,
        offspring_count: usize,
        sampler: &BreakpointSampler,
        ids: &mut IdGenerator,
        rng: &mut R,
    ) -> Family {
        Self::mate_weighted(mother, father, offspring_count, 0.0, 0.0, sampler, ids, rng)
    }

    /// Same as [`Family::mate`], with explicit transmission weights.
    #[allow(clippy::too_many_arguments)]
    pub fn mate_weighted<R: Rng>(
        mother: &PersonRef,
        father: &PersonRef,
        offspring_count: usize,
        mother_probability: f64,
        father_probability: f64,
        sampler: &BreakpointSampler,
        ids: &mut IdGenerator,
        rng: &mut R,
    ) -> Family {
        let generation = mother.generation().max(father.generation()) + 1;
        let siblings = (0..offspring_count)
            .map(|_| {
                let maternal = mother.genotype().recombine(sampler, rng);
                let paternal = father.genotype().recombine(sampler, rng);
                Person::new(ids.next_id(), generation, Genotype::new(maternal, paternal))
            })
            .collect();
        Family {
            mother: mother.clone(),
            father: father.clone(),
            siblings,
            generation,
            mother_probability,
            father_probability,
        }
    }

    pub fn mother(&self) -> &PersonRef {
        &self.mother
    }

    pub fn father(&self) -> &PersonRef {
        &self.father
    }

    pub fn siblings(&self) -> &[PersonRef] {
        &self.siblings
    }

    /// Generation the offspring of this mating belong to; recorded even
    /// when the sibling list is empty.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn mother_probability(&self) -> f64 {
        self.mother_probability
    }

    pub fn father_probability(&self) -> f64 {
        self.father_probability
    }
}

/// The ordered record of every mating event across all generation steps.
#[derive(Clone, Debug, Default)]
pub struct Pedigree {
    families: Vec<Family>,
}

impl Pedigree {
    pub fn new() -> Self {
        Self {
            families: Vec::new(),
        }
    }

    pub fn push(&mut self, family: Family) {
        self.families.push(family);
    }

    pub fn families(&self) -> &[Family] {
        &self.families
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<Family> {
        self.families.iter()
    }

    /// Families whose offspring belong to `generation`.
    pub fn families_in_generation(&self, generation: usize) -> impl Iterator<Item = &Family> {
        self.families
            .iter()
            .filter(move |family| family.generation() == generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::haplotype::BreakpointModel;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn founder_pair(ids: &mut IdGenerator) -> (PersonRef, PersonRef) {
        let mother = Person::new(ids.next_id(), 0, Genotype::founder(0, 100));
        let father = Person::new(ids.next_id(), 0, Genotype::founder(1, 100));
        (mother, father)
    }

    #[test]
    fn mate_produces_offspring_at_next_generation() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut ids = IdGenerator::new();
        let sampler = BreakpointModel::Poisson { mean: 1.0 }.sampler().unwrap();
        let (mother, father) = founder_pair(&mut ids);

        let family = Family::mate(&mother, &father, 3, &sampler, &mut ids, &mut rng);

        assert_eq!(family.siblings().len(), 3);
        assert_eq!(family.generation(), 1);
        assert_eq!(family.mother_probability(), 0.0);
        assert_eq!(family.father_probability(), 0.0);
        for sibling in family.siblings() {
            assert_eq!(sibling.generation(), 1);
            assert_eq!(sibling.genotype().length(), 100);
        }
    }

    #[test]
    fn mate_with_zero_offspring_is_legal() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut ids = IdGenerator::new();
        let sampler = BreakpointModel::Fixed { count: 0 }.sampler().unwrap();
        let (mother, father) = founder_pair(&mut ids);

        let family = Family::mate(&mother, &father, 0, &sampler, &mut ids, &mut rng);

        assert!(family.siblings().is_empty());
        assert_eq!(family.generation(), 1);
    }

    #[test]
    fn offspring_strands_trace_to_parents() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut ids = IdGenerator::new();
        let sampler = BreakpointModel::Poisson { mean: 2.0 }.sampler().unwrap();
        let (mother, father) = founder_pair(&mut ids);

        let family = Family::mate(&mother, &father, 5, &sampler, &mut ids, &mut rng);

        for sibling in family.siblings() {
            for position in [1, 50, 100] {
                let (maternal, paternal) = sibling.genotype().lineages_at(position).unwrap();
                assert_eq!(maternal.founder, 0);
                assert_eq!(paternal.founder, 1);
            }
        }
    }

    #[test]
    fn mate_weighted_records_probabilities() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut ids = IdGenerator::new();
        let sampler = BreakpointModel::Fixed { count: 0 }.sampler().unwrap();
        let (mother, father) = founder_pair(&mut ids);

        let family =
            Family::mate_weighted(&mother, &father, 1, 0.6, 0.4, &sampler, &mut ids, &mut rng);

        assert_eq!(family.mother_probability(), 0.6);
        assert_eq!(family.father_probability(), 0.4);
    }

    #[test]
    fn pedigree_collects_families_in_order() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut ids = IdGenerator::new();
        let sampler = BreakpointModel::Fixed { count: 0 }.sampler().unwrap();
        let (mother, father) = founder_pair(&mut ids);

        let mut pedigree = Pedigree::new();
        assert!(pedigree.is_empty());

        for _ in 0..3 {
            pedigree.push(Family::mate(&mother, &father, 1, &sampler, &mut ids, &mut rng));
        }

        assert_eq!(pedigree.len(), 3);
        assert_eq!(pedigree.families_in_generation(1).count(), 3);
        assert_eq!(pedigree.families_in_generation(2).count(), 0);
    }
}

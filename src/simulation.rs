use rand::prelude::*;
use rand::rngs::StdRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::Parameters;
use crate::core::{
    BreakpointSampler, Family, Genotype, IdGenerator, Pedigree, Person, Population,
};
use crate::errors::{PedisimError, Result};

/// Wright-Fisher generation loop.
///
/// Construction validates the configuration and creates the founder
/// generation; each [`step`](WrightFisherSimulator::step) performs one
/// reproduction round. The sampling scheme is one family per offspring:
/// for each of the configured number of offspring, a mother and a father
/// are drawn independently, uniformly at random with replacement, from
/// the current population (self-mating is permitted), and the sampled
/// pair produces exactly one child. The next population is the
/// concatenation of all siblings in sampling order.
pub struct WrightFisherSimulator {
    parameters: Parameters,
    sampler: BreakpointSampler,
    population: Population,
    pedigree: Pedigree,
    ids: IdGenerator,
    generation: usize,
    rng: StdRng,
}

impl WrightFisherSimulator {
    /// Validates `parameters` and creates the founder generation.
    ///
    /// Founder genotypes carry two single-region haplotypes with
    /// distinct lineages, one per strand.
    pub fn new(parameters: Parameters) -> Result<Self> {
        parameters.validate()?;
        let sampler = parameters.breakpoint_model.sampler()?;
        let rng = StdRng::seed_from_u64(parameters.seed);

        let mut ids = IdGenerator::new();
        let population = (0..parameters.founders)
            .map(|founder| {
                Person::new(
                    ids.next_id(),
                    0,
                    Genotype::founder(founder, parameters.chromosome_length),
                )
            })
            .collect();

        Ok(Self {
            parameters,
            sampler,
            population,
            pedigree: Pedigree::new(),
            ids,
            generation: 0,
            rng,
        })
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Index of the youngest simulated generation.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn pedigree(&self) -> &Pedigree {
        &self.pedigree
    }

    pub fn is_complete(&self) -> bool {
        self.generation == self.parameters.generations
    }

    /// Replace the current population. Used by the persistence layer to
    /// resume from a snapshot.
    pub fn set_population(&mut self, population: Population) {
        self.population = population;
    }

    /// One Wright-Fisher reproduction round.
    #[cfg(not(feature = "parallel"))]
    pub fn step(&mut self) -> Result<()> {
        if self.population.is_empty() {
            return Err(PedisimError::IllegalStateError(format!(
                "generation {} has no members to mate",
                self.generation
            )));
        }

        let mut next = Population::new();
        for _ in 0..self.parameters.population_size {
            let mother = self.population.choose(&mut self.rng)?.clone();
            let father = self.population.choose(&mut self.rng)?.clone();
            let family = Family::mate(
                &mother,
                &father,
                1,
                &self.sampler,
                &mut self.ids,
                &mut self.rng,
            );
            next.extend(family.siblings().iter().cloned());
            self.pedigree.push(family);
        }

        self.population = next;
        self.generation += 1;
        Ok(())
    }

    /// One Wright-Fisher reproduction round.
    ///
    /// Parent indices, offspring ids, and per-offspring seeds are drawn
    /// sequentially in advance, so the outcome matches a fixed master
    /// seed regardless of thread scheduling.
    #[cfg(feature = "parallel")]
    pub fn step(&mut self) -> Result<()> {
        if self.population.is_empty() {
            return Err(PedisimError::IllegalStateError(format!(
                "generation {} has no members to mate",
                self.generation
            )));
        }

        let population_size = self.population.len();
        let draws: Vec<(usize, usize, usize, u64)> = (0..self.parameters.population_size)
            .map(|_| {
                let mother = self.rng.random_range(0..population_size);
                let father = self.rng.random_range(0..population_size);
                let id = self.ids.next_id();
                let seed: u64 = self.rng.random();
                (mother, father, id, seed)
            })
            .collect();

        let families: Vec<Family> = draws
            .into_par_iter()
            .map(|(mother, father, id, seed)| {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut ids = IdGenerator::starting_at(id);
                Family::mate(
                    &self.population[mother],
                    &self.population[father],
                    1,
                    &self.sampler,
                    &mut ids,
                    &mut rng,
                )
            })
            .collect();

        let mut next = Population::new();
        for family in families {
            next.extend(family.siblings().iter().cloned());
            self.pedigree.push(family);
        }

        self.population = next;
        self.generation += 1;
        Ok(())
    }

    /// Runs all configured generation steps.
    pub fn run(&mut self) -> Result<()> {
        while !self.is_complete() {
            self.step()?;
        }
        Ok(())
    }
}

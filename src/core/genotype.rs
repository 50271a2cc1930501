//! Diploid genotype: a pair of haplotypes.

use rand::Rng;
use std::fmt;

use crate::core::haplotype::{BreakpointSampler, Haplotype, Lineage};
use crate::errors::Result;

/// The two strands of a diploid individual.
///
/// The strand designations record transmission bookkeeping, not
/// biological truth: the maternal strand is the gametic haplotype
/// received from the mother, the paternal strand the one received from
/// the father. Both strands always span the same chromosome length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Genotype {
    maternal: Haplotype,
    paternal: Haplotype,
}

impl Genotype {
    /// Founder genotype with a fresh single-region haplotype on each
    /// strand. The strands carry distinct lineages, `founder.1` and
    /// `founder.2`.
    pub fn founder(founder: usize, length: usize) -> Self {
        Self {
            maternal: Haplotype::founder(Lineage::new(founder, 1), length),
            paternal: Haplotype::founder(Lineage::new(founder, 2), length),
        }
    }

    pub fn new(maternal: Haplotype, paternal: Haplotype) -> Self {
        debug_assert_eq!(maternal.length(), paternal.length());
        Self { maternal, paternal }
    }

    pub fn maternal(&self) -> &Haplotype {
        &self.maternal
    }

    pub fn paternal(&self) -> &Haplotype {
        &self.paternal
    }

    pub fn length(&self) -> usize {
        self.maternal.length()
    }

    /// One meiosis: draws breakpoints and a starting strand, then
    /// splices a gametic haplotype from the two strands. Every call
    /// performs an independent draw.
    pub fn recombine<R: Rng>(&self, sampler: &BreakpointSampler, rng: &mut R) -> Haplotype {
        let breakpoints = sampler.draw(self.length(), rng);
        let first = rng.random_range(0..2);
        Haplotype::splice([&self.maternal, &self.paternal], &breakpoints, first)
    }

    /// The founder lineages recorded at `position` on the maternal and
    /// paternal strand.
    pub fn lineages_at(&self, position: usize) -> Result<(Lineage, Lineage)> {
        Ok((
            self.maternal.lineage_at(position)?,
            self.paternal.lineage_at(position)?,
        ))
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} / {}", self.maternal, self.paternal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::haplotype::BreakpointModel;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn founder_recombination_starts_at_one() {
        let mut rng = StdRng::seed_from_u64(1);
        let sampler = BreakpointModel::Poisson { mean: 2.0 }.sampler().unwrap();
        let founder = Genotype::founder(1, 1000);
        let gamete = founder.recombine(&sampler, &mut rng);
        assert_eq!(gamete.region_at(1).unwrap().start(), 1);
    }

    #[test]
    fn recombination_preserves_length() {
        let mut rng = StdRng::seed_from_u64(2);
        let sampler = BreakpointModel::Poisson { mean: 5.0 }.sampler().unwrap();
        let founder = Genotype::founder(0, 500);
        for _ in 0..50 {
            let gamete = founder.recombine(&sampler, &mut rng);
            assert_eq!(gamete.length(), 500);
            let total: usize = gamete.regions().iter().map(|region| region.len()).sum();
            assert_eq!(total, 500);
        }
    }

    #[test]
    fn recombination_cannot_invent_lineages() {
        let mut rng = StdRng::seed_from_u64(3);
        let sampler = BreakpointModel::Poisson { mean: 3.0 }.sampler().unwrap();
        let strand = Haplotype::founder(Lineage::new(4, 1), 200);
        let genotype = Genotype::new(strand.clone(), strand);
        for _ in 0..20 {
            let gamete = genotype.recombine(&sampler, &mut rng);
            assert_eq!(gamete.regions().len(), 1);
            assert_eq!(gamete.lineage_at(1).unwrap(), Lineage::new(4, 1));
        }
    }

    #[test]
    fn recombination_without_breakpoints_copies_a_strand() {
        let mut rng = StdRng::seed_from_u64(4);
        let sampler = BreakpointModel::Fixed { count: 0 }.sampler().unwrap();
        let founder = Genotype::founder(2, 100);
        let gamete = founder.recombine(&sampler, &mut rng);
        assert!(gamete == *founder.maternal() || gamete == *founder.paternal());
    }

    #[test]
    fn lineages_at_reports_both_strands() {
        let founder = Genotype::founder(5, 100);
        let (maternal, paternal) = founder.lineages_at(50).unwrap();
        assert_eq!(maternal, Lineage::new(5, 1));
        assert_eq!(paternal, Lineage::new(5, 2));
    }
}

//! Haplotype representation and recombination
//!
//! A `Haplotype` is an ordered sequence of `Region`s that partitions the
//! chromosome. Every `Region` carries the founder `Lineage` it descends
//! from, so any position on any haplotype in the simulation can be traced
//! back to the founder strand that contributed it.
//!
//! Positions are 1-based and intervals are half-open: a chromosome of
//! length `L` occupies positions `1..=L` and is covered by regions whose
//! union is `[1, L + 1)`. Recombination breakpoints are cut positions
//! strictly inside `(1, L]`.

use derive_more::Display;
use rand::Rng;
use rand_distr::{Distribution, Poisson};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{PedisimError, Result};

/// Founder lineage tag: the founder index together with the strand the
/// lineage started on. Displays as `founder.strand`, e.g. `3.1`.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
#[display("{founder}.{strand}")]
pub struct Lineage {
    pub founder: usize,
    pub strand: u8,
}

impl Lineage {
    pub fn new(founder: usize, strand: u8) -> Self {
        Self { founder, strand }
    }
}

/// A contiguous chromosomal interval `[start, end)` descending from a
/// single founder lineage.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[display("[{start},{end},{lineage}]")]
pub struct Region {
    start: usize,
    end: usize,
    lineage: Lineage,
}

impl Region {
    pub fn new(start: usize, end: usize, lineage: Lineage) -> Self {
        assert!(start < end, "region start must precede its end");
        Self {
            start,
            end,
            lineage,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn lineage(&self) -> Lineage {
        self.lineage
    }

    /// Number of positions covered by the region.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn contains(&self, position: usize) -> bool {
        self.start <= position && position < self.end
    }
}

/// Distribution of the recombination breakpoint count per meiosis.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BreakpointModel {
    /// Breakpoint count is Poisson-distributed with the given mean.
    Poisson { mean: f64 },
    /// Exactly `count` breakpoints per meiosis. `count: 0` forces
    /// breakpoint-free meiosis.
    Fixed { count: usize },
}

impl BreakpointModel {
    /// Builds the sampler, rejecting parameters that cannot produce a
    /// valid breakpoint process.
    pub fn sampler(&self) -> Result<BreakpointSampler> {
        match self {
            BreakpointModel::Poisson { mean } => {
                let poisson = Poisson::new(*mean).map_err(|_| {
                    PedisimError::ConfigurationError(format!(
                        "breakpoint mean must be positive and finite, got {mean}"
                    ))
                })?;
                Ok(BreakpointSampler::Poisson(poisson))
            }
            BreakpointModel::Fixed { count } => Ok(BreakpointSampler::Fixed(*count)),
        }
    }
}

/// Breakpoint sampler built from a validated [`BreakpointModel`].
#[derive(Clone, Debug)]
pub enum BreakpointSampler {
    Poisson(Poisson<f64>),
    Fixed(usize),
}

impl BreakpointSampler {
    fn sample_count<R: Rng>(&self, rng: &mut R) -> usize {
        match self {
            BreakpointSampler::Poisson(poisson) => poisson.sample(rng) as usize,
            BreakpointSampler::Fixed(count) => *count,
        }
    }

    /// Draws sorted, distinct breakpoint positions strictly inside
    /// `(1, length]`. The count is capped by the number of available cut
    /// positions.
    pub fn draw<R: Rng>(&self, length: usize, rng: &mut R) -> Vec<usize> {
        let count = self.sample_count(rng).min(length - 1);
        let mut breakpoints: Vec<usize> = rand::seq::index::sample(rng, length - 1, count)
            .into_iter()
            .map(|index| index + 2)
            .collect();
        breakpoints.sort_unstable();
        breakpoints
    }
}

/// An ordered sequence of contiguous, non-overlapping regions spanning
/// the full chromosome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Haplotype {
    regions: Vec<Region>,
}

impl Haplotype {
    /// Founder haplotype: a single region spanning the chromosome.
    pub fn founder(lineage: Lineage, length: usize) -> Self {
        Self {
            regions: vec![Region::new(1, length + 1, lineage)],
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Chromosome length covered by the haplotype.
    pub fn length(&self) -> usize {
        self.regions[self.regions.len() - 1].end() - 1
    }

    /// The region whose interval contains `position`.
    pub fn region_at(&self, position: usize) -> Result<&Region> {
        let index = self.regions.partition_point(|region| region.end() <= position);
        self.regions
            .get(index)
            .filter(|region| region.contains(position))
            .ok_or_else(|| {
                PedisimError::OutOfRangeError(format!(
                    "position {position} outside chromosome [1, {}]",
                    self.length()
                ))
            })
    }

    /// The founder lineage recorded at `position`.
    pub fn lineage_at(&self, position: usize) -> Result<Lineage> {
        Ok(self.region_at(position)?.lineage())
    }

    /// Splices a gametic haplotype from two parental strands.
    ///
    /// Walks the cut positions in increasing order, alternating the
    /// source strand at each breakpoint, starting from `strands[first]`.
    /// The overlapping regions of the active strand are copied into each
    /// segment, clipped to the segment bounds. Adjacent copies with the
    /// same lineage are coalesced, so a single-lineage haplotype stays a
    /// single region no matter how many splices produced it.
    ///
    /// Breakpoints must be sorted, distinct cut positions inside
    /// `(1, L]`; zero breakpoints yields a copy of the starting strand.
    pub fn splice(strands: [&Haplotype; 2], breakpoints: &[usize], first: usize) -> Haplotype {
        let length = strands[0].length();
        debug_assert_eq!(length, strands[1].length());
        debug_assert!(breakpoints.windows(2).all(|pair| pair[0] < pair[1]));
        debug_assert!(breakpoints.iter().all(|&cut| 1 < cut && cut <= length));

        let mut regions = Vec::new();
        let mut active = first % 2;
        let mut segment_start = 1;
        for &cut in breakpoints {
            append_clipped(&mut regions, strands[active], segment_start, cut);
            segment_start = cut;
            active = 1 - active;
        }
        append_clipped(&mut regions, strands[active], segment_start, length + 1);

        Haplotype { regions }
    }
}

impl fmt::Display for Haplotype {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            self.regions
                .iter()
                .map(|region| region.to_string())
                .collect::<Vec<String>>()
                .join(",")
        )
    }
}

/// Copies the regions of `source` overlapping `[start, end)` into
/// `regions`, clipped to the segment and coalesced with the tail.
fn append_clipped(regions: &mut Vec<Region>, source: &Haplotype, start: usize, end: usize) {
    for region in source.regions() {
        if region.end() <= start {
            continue;
        }
        if region.start() >= end {
            break;
        }
        let clipped = Region::new(
            region.start().max(start),
            region.end().min(end),
            region.lineage(),
        );
        match regions.last_mut() {
            Some(last) if last.lineage == clipped.lineage && last.end == clipped.start => {
                last.end = clipped.end;
            }
            _ => regions.push(clipped),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn founder_spans_chromosome() {
        let haplotype = Haplotype::founder(Lineage::new(0, 1), 100);
        assert_eq!(haplotype.length(), 100);
        assert_eq!(haplotype.regions().len(), 1);
        assert_eq!(haplotype.regions()[0].start(), 1);
        assert_eq!(haplotype.regions()[0].end(), 101);
    }

    #[test]
    fn region_at_bounds() {
        let haplotype = Haplotype::founder(Lineage::new(3, 2), 50);
        assert_eq!(haplotype.region_at(1).unwrap().start(), 1);
        assert_eq!(haplotype.region_at(50).unwrap().lineage(), Lineage::new(3, 2));
        assert!(matches!(
            haplotype.region_at(0),
            Err(PedisimError::OutOfRangeError(_))
        ));
        assert!(matches!(
            haplotype.region_at(51),
            Err(PedisimError::OutOfRangeError(_))
        ));
    }

    #[test]
    fn splice_without_breakpoints_copies_strand() {
        let first = Haplotype::founder(Lineage::new(0, 1), 100);
        let second = Haplotype::founder(Lineage::new(0, 2), 100);

        let gamete = Haplotype::splice([&first, &second], &[], 0);
        assert_eq!(gamete, first);

        let gamete = Haplotype::splice([&first, &second], &[], 1);
        assert_eq!(gamete, second);
    }

    #[test]
    fn splice_alternates_strands() {
        let first = Haplotype::founder(Lineage::new(0, 1), 100);
        let second = Haplotype::founder(Lineage::new(0, 2), 100);

        let gamete = Haplotype::splice([&first, &second], &[40, 70], 0);
        let regions = gamete.regions();
        assert_eq!(regions.len(), 3);
        assert_eq!((regions[0].start(), regions[0].end()), (1, 40));
        assert_eq!(regions[0].lineage(), Lineage::new(0, 1));
        assert_eq!((regions[1].start(), regions[1].end()), (40, 70));
        assert_eq!(regions[1].lineage(), Lineage::new(0, 2));
        assert_eq!((regions[2].start(), regions[2].end()), (70, 101));
        assert_eq!(regions[2].lineage(), Lineage::new(0, 1));
    }

    #[test]
    fn splice_preserves_span() {
        let first = Haplotype::founder(Lineage::new(0, 1), 1000);
        let second = Haplotype::founder(Lineage::new(1, 1), 1000);
        let gamete = Haplotype::splice([&first, &second], &[2, 500, 999, 1000], 1);

        assert_eq!(gamete.length(), 1000);
        assert_eq!(gamete.regions()[0].start(), 1);
        for pair in gamete.regions().windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
    }

    #[test]
    fn splice_coalesces_matching_lineages() {
        let strand = Haplotype::founder(Lineage::new(7, 1), 100);
        let gamete = Haplotype::splice([&strand, &strand], &[25, 50, 75], 0);
        assert_eq!(gamete.regions().len(), 1);
        assert_eq!(gamete.lineage_at(1).unwrap(), Lineage::new(7, 1));
    }

    #[test]
    fn sampler_draws_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let sampler = BreakpointModel::Poisson { mean: 3.0 }.sampler().unwrap();
        for _ in 0..100 {
            let breakpoints = sampler.draw(100, &mut rng);
            assert!(breakpoints.windows(2).all(|pair| pair[0] < pair[1]));
            assert!(breakpoints.iter().all(|&cut| 1 < cut && cut <= 100));
        }
    }

    #[test]
    fn sampler_fixed_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let sampler = BreakpointModel::Fixed { count: 4 }.sampler().unwrap();
        assert_eq!(sampler.draw(100, &mut rng).len(), 4);
        let sampler = BreakpointModel::Fixed { count: 0 }.sampler().unwrap();
        assert!(sampler.draw(100, &mut rng).is_empty());
    }

    #[test]
    fn sampler_rejects_invalid_mean() {
        assert!(matches!(
            BreakpointModel::Poisson { mean: 0.0 }.sampler(),
            Err(PedisimError::ConfigurationError(_))
        ));
        assert!(matches!(
            BreakpointModel::Poisson { mean: -1.0 }.sampler(),
            Err(PedisimError::ConfigurationError(_))
        ));
    }

    #[test]
    fn sampler_caps_count_at_cut_positions() {
        let mut rng = StdRng::seed_from_u64(3);
        let sampler = BreakpointModel::Fixed { count: 50 }.sampler().unwrap();
        let breakpoints = sampler.draw(10, &mut rng);
        assert_eq!(breakpoints.len(), 9);
    }
}

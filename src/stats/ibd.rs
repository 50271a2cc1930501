//! Identity-by-descent segment extraction.
//!
//! Two haplotypes are identical by descent over an interval when both
//! carry the same founder lineage there. Segment lists are the ground
//! truth that downstream relatedness tools are validated against.

use crate::core::genotype::Genotype;
use crate::core::haplotype::{Haplotype, Region};

/// Maximal regions where both haplotypes carry the same founder lineage.
pub fn ibd_segments(first: &Haplotype, second: &Haplotype) -> Vec<Region> {
    let a = first.regions();
    let b = second.regions();
    let mut segments = Vec::new();

    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let start = a[i].start().max(b[j].start());
        let end = a[i].end().min(b[j].end());
        if start < end && a[i].lineage() == b[j].lineage() {
            segments.push(Region::new(start, end, a[i].lineage()));
        }
        if a[i].end() <= b[j].end() {
            i += 1;
        } else {
            j += 1;
        }
    }
    segments
}

/// IBD segments between two genotypes over all four strand pairings,
/// sorted by position.
pub fn genotype_ibd_segments(first: &Genotype, second: &Genotype) -> Vec<Region> {
    let mut segments = Vec::new();
    for a in [first.maternal(), first.paternal()] {
        for b in [second.maternal(), second.paternal()] {
            segments.extend(ibd_segments(a, b));
        }
    }
    segments.sort_by_key(|region| (region.start(), region.end()));
    segments
}

/// Segment count and mean segment length of the shared ancestry between
/// two genotypes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IbdSummary {
    pub segments: usize,
    pub mean_length: f64,
}

impl IbdSummary {
    pub fn from_genotypes(first: &Genotype, second: &Genotype) -> Self {
        let segments = genotype_ibd_segments(first, second);
        let mean_length = if segments.is_empty() {
            0.0
        } else {
            segments.iter().map(|region| region.len()).sum::<usize>() as f64
                / segments.len() as f64
        };
        Self {
            segments: segments.len(),
            mean_length,
        }
    }

    pub fn is_related(&self) -> bool {
        self.segments > 0
    }
}

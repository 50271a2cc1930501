use csv;
use itertools::Itertools;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::{fs, io};

use crate::core::{Pedigree, Population};
use crate::stats::IbdSummary;

/// Persistence boundary of a completed run. The simulation core hands
/// over the final population and the full pedigree; the writer owns the
/// on-disk format.
pub trait SampleWriter {
    fn write_population(&self, population: &Population) -> Result<(), std::io::Error>;

    fn write_pedigree(&self, pedigree: &Pedigree) -> Result<(), std::io::Error>;

    fn write_ibd(&self, population: &Population) -> Result<(), std::io::Error>;

    fn write_all(&self, population: &Population, pedigree: &Pedigree) -> Result<(), std::io::Error> {
        self.write_population(population)?;
        self.write_pedigree(pedigree)?;
        self.write_ibd(population)
    }
}

pub struct CsvSampleWriter<'a> {
    simulation_name: &'a str,
    path: &'a str,
}

impl<'a> CsvSampleWriter<'a> {
    pub fn new(simulation_name: &'a str, path: &'a str) -> Self {
        Self {
            simulation_name,
            path,
        }
    }

    fn file_path(&self, suffix: &str) -> PathBuf {
        Path::new(self.path).join(format!("{}.{}", self.simulation_name, suffix))
    }
}

impl<'a> SampleWriter for CsvSampleWriter<'a> {
    /// One row per region per strand per person: the full genotype
    /// content of the final generation.
    fn write_population(&self, population: &Population) -> Result<(), std::io::Error> {
        log::info!("Writing csv population to {}", self.path);
        let mut population_file = csv::WriterBuilder::new()
            .from_path(self.file_path("population.csv"))
            .expect("Unable to open population file.");

        population_file
            .write_record(["person", "generation", "strand", "start", "end", "lineage"])
            .expect("Unable to write header to population file.");

        for person in population.iter() {
            let strands = [
                ("maternal", person.genotype().maternal()),
                ("paternal", person.genotype().paternal()),
            ];
            for (strand, haplotype) in strands {
                for region in haplotype.regions() {
                    population_file
                        .write_record(&[
                            person.id().to_string(),
                            person.generation().to_string(),
                            strand.to_string(),
                            region.start().to_string(),
                            region.end().to_string(),
                            region.lineage().to_string(),
                        ])
                        .expect("Unable to write to population file.")
                }
            }
        }
        Ok(())
    }

    /// One row per family, siblings semicolon-joined.
    fn write_pedigree(&self, pedigree: &Pedigree) -> Result<(), std::io::Error> {
        log::info!("Writing csv pedigree to {}", self.path);
        let mut pedigree_file = csv::WriterBuilder::new()
            .from_path(self.file_path("pedigree.csv"))
            .expect("Unable to open pedigree file.");

        pedigree_file
            .write_record([
                "family",
                "generation",
                "mother",
                "father",
                "siblings",
                "mother_probability",
                "father_probability",
            ])
            .expect("Unable to write header to pedigree file.");

        for (family_id, family) in pedigree.iter().enumerate() {
            let siblings = family
                .siblings()
                .iter()
                .map(|person| person.id().to_string())
                .join(";");
            pedigree_file
                .write_record(&[
                    family_id.to_string(),
                    family.generation().to_string(),
                    family.mother().id().to_string(),
                    family.father().id().to_string(),
                    siblings,
                    family.mother_probability().to_string(),
                    family.father_probability().to_string(),
                ])
                .expect("Unable to write to pedigree file.")
        }
        Ok(())
    }

    /// Pairwise shared-ancestry summaries; pairs without any shared
    /// segment are skipped.
    fn write_ibd(&self, population: &Population) -> Result<(), std::io::Error> {
        log::info!("Writing csv ibd summaries to {}", self.path);
        let mut ibd_file = csv::WriterBuilder::new()
            .from_path(self.file_path("ibd.csv"))
            .expect("Unable to open ibd file.");

        ibd_file
            .write_record(["first", "second", "segments", "mean_length"])
            .expect("Unable to write header to ibd file.");

        for (first, second) in population.iter().tuple_combinations() {
            let summary = IbdSummary::from_genotypes(first.genotype(), second.genotype());
            if !summary.is_related() {
                continue;
            }
            ibd_file
                .write_record(&[
                    first.id().to_string(),
                    second.id().to_string(),
                    summary.segments.to_string(),
                    summary.mean_length.to_string(),
                ])
                .expect("Unable to write to ibd file.")
        }
        Ok(())
    }
}

/// Writes the plain-text formats consumed by classic pedigree tooling.
pub struct PedSampleWriter<'a> {
    simulation_name: &'a str,
    path: &'a str,
}

impl<'a> PedSampleWriter<'a> {
    pub fn new(simulation_name: &'a str, path: &'a str) -> Self {
        Self {
            simulation_name,
            path,
        }
    }

    fn file_path(&self, suffix: &str) -> PathBuf {
        Path::new(self.path).join(format!("{}.{}", self.simulation_name, suffix))
    }
}

impl<'a> SampleWriter for PedSampleWriter<'a> {
    /// Demographics table of the final generation.
    fn write_population(&self, population: &Population) -> Result<(), std::io::Error> {
        log::info!("Writing demographics to {}", self.path);
        let mut demographics_file =
            io::BufWriter::new(fs::File::create(self.file_path("demographics"))?);
        writeln!(demographics_file, "name\tgeneration")?;
        for person in population.iter() {
            writeln!(demographics_file, "{}\t{}", person.id(), person.generation())?;
        }
        Ok(())
    }

    /// One `id father mother generation` row per person, founders with
    /// parent id 0, sorted by id.
    fn write_pedigree(&self, pedigree: &Pedigree) -> Result<(), std::io::Error> {
        log::info!("Writing ped pedigree to {}", self.path);
        let mut rows: BTreeMap<usize, (usize, usize, usize)> = BTreeMap::new();
        for family in pedigree.iter() {
            for parent in [family.mother(), family.father()] {
                if parent.generation() == 0 {
                    rows.entry(parent.id()).or_insert((0, 0, 0));
                }
            }
            for sibling in family.siblings() {
                rows.insert(
                    sibling.id(),
                    (family.father().id(), family.mother().id(), family.generation()),
                );
            }
        }

        let mut pedigree_file = io::BufWriter::new(fs::File::create(self.file_path("ped"))?);
        for (id, (father, mother, generation)) in rows {
            writeln!(pedigree_file, "{id}\t{father}\t{mother}\t{generation}")?;
        }
        Ok(())
    }

    /// Tab-separated pairwise shared-ancestry summaries, headerless.
    fn write_ibd(&self, population: &Population) -> Result<(), std::io::Error> {
        log::info!("Writing ibd table to {}", self.path);
        let mut ibd_file = io::BufWriter::new(fs::File::create(self.file_path("ibd"))?);
        for (first, second) in population.iter().tuple_combinations() {
            let summary = IbdSummary::from_genotypes(first.genotype(), second.genotype());
            if !summary.is_related() {
                continue;
            }
            writeln!(
                ibd_file,
                "{}\t{}\t{}\t{}",
                first.id(),
                second.id(),
                summary.segments,
                summary.mean_length
            )?;
        }
        Ok(())
    }
}

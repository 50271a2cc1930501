use serde::{Deserialize, Serialize};
use std::fs;

use crate::core::haplotype::BreakpointModel;
use crate::errors::{PedisimError, Result};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Parameters {
    /// The number of individuals created in every simulated generation.
    pub population_size: usize,

    /// The number of founder individuals in generation 0.
    pub founders: usize,

    /// The chromosome length in base pairs; positions run from 1 to this
    /// value.
    pub chromosome_length: usize,

    /// The number of Wright-Fisher generation steps to simulate.
    pub generations: usize,

    /// The distribution of the recombination breakpoint count per
    /// meiosis.
    pub breakpoint_model: BreakpointModel,

    /// The seed for the random number generator.
    #[serde(default)]
    pub seed: u64,
}

#[derive(Debug)]
pub enum ParametersError {
    IoError(std::io::Error),
    YamlError(serde_yaml::Error),
}

impl std::error::Error for ParametersError {}

impl std::fmt::Display for ParametersError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParametersError::IoError(error) => write!(formatter, "IO error: {}", error),
            ParametersError::YamlError(error) => write!(formatter, "YAML error: {}", error),
        }
    }
}

impl std::fmt::Display for Parameters {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut output = vec![];
        self.write(&mut output).map_err(|_| std::fmt::Error)?;
        write!(formatter, "{}", String::from_utf8(output).unwrap())
    }
}

impl Parameters {
    /// Rejects values no simulation state may be built from. Called
    /// before any founder is constructed.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(PedisimError::ConfigurationError(
                "population_size must be positive".to_string(),
            ));
        }
        if self.founders == 0 {
            return Err(PedisimError::ConfigurationError(
                "founders must be positive".to_string(),
            ));
        }
        if self.chromosome_length == 0 {
            return Err(PedisimError::ConfigurationError(
                "chromosome_length must be positive".to_string(),
            ));
        }
        self.breakpoint_model.sampler()?;
        Ok(())
    }

    pub fn write(
        &self,
        writer: &mut dyn std::io::Write,
    ) -> std::result::Result<(), ParametersError> {
        serde_yaml::to_writer(writer, self).map_err(ParametersError::YamlError)
    }

    pub fn read(
        reader: &mut dyn std::io::Read,
    ) -> std::result::Result<Parameters, ParametersError> {
        serde_yaml::from_reader(reader).map_err(ParametersError::YamlError)
    }

    pub fn write_to_file(&self, filename: &str) -> std::result::Result<(), ParametersError> {
        let file = fs::File::create(filename).map_err(ParametersError::IoError)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write(&mut writer)
    }

    pub fn read_from_file(filename: &str) -> std::result::Result<Parameters, ParametersError> {
        let file = fs::File::open(filename).map_err(ParametersError::IoError)?;
        let mut reader = std::io::BufReader::new(file);
        Self::read(&mut reader)
    }
}

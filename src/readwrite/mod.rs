//! IO traits for writing completed simulation results.

mod sample_writer;

pub use sample_writer::{CsvSampleWriter, PedSampleWriter, SampleWriter};

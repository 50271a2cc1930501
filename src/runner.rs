use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;

use crate::args::Args;
use crate::config::Parameters;
use crate::readwrite::{CsvSampleWriter, PedSampleWriter, SampleWriter};
use crate::simulation::WrightFisherSimulator;

/// Wires arguments, configuration, logging, and output writing around
/// the simulation core. Output files are written only after all
/// configured generation steps have completed, so a failed run leaves
/// no partial result set behind.
pub struct Runner {
    args: Args,
    simulator: WrightFisherSimulator,
}

impl Runner {
    pub fn new(args: Args) -> Result<Runner> {
        Self::setup_logger(&args);
        #[cfg(feature = "parallel")]
        Self::setup_rayon(&args);

        let parameters = Self::load_parameters(&args)?;
        let simulator = WrightFisherSimulator::new(parameters)?;

        Ok(Self { args, simulator })
    }

    pub fn start(&mut self) -> Result<()> {
        self.run()?;
        self.finish()
    }

    fn run(&mut self) -> Result<()> {
        let generations = self.simulator.parameters().generations;
        let bar = match self.args.disable_progress_bar {
            true => None,
            false => {
                let bar = ProgressBar::new(generations as u64);
                bar.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "[{bar:40}] {pos:>7}/{len:7} [{elapsed_precise} / {duration_precise}] {msg}",
                    )
                    .expect("Unable to create template.")
                    .progress_chars("=> "),
            );
                Some(bar)
            }
        };

        while !self.simulator.is_complete() {
            self.simulator.step()?;

            let generation = self.simulator.generation();
            let population_size = self.simulator.population().len();
            log::info!(
                r###"
    generation={generation}
    population_size={population_size}"###
            );

            if let Some(bar) = bar.as_ref() {
                bar.set_position(generation as u64);
                bar.set_message(format!("{population_size}"));
            }
        }

        if let Some(bar) = bar {
            bar.finish_with_message("Done.");
        }
        log::info!("Finished simulation.");
        Ok(())
    }

    fn finish(&self) -> Result<()> {
        log::info!("Storing results...");
        fs::create_dir_all(Path::new(&self.args.outdir))?;

        let writers: [Box<dyn SampleWriter>; 2] = [
            Box::new(CsvSampleWriter::new(&self.args.name, &self.args.outdir)),
            Box::new(PedSampleWriter::new(&self.args.name, &self.args.outdir)),
        ];
        for writer in writers {
            writer.write_all(self.simulator.population(), self.simulator.pedigree())?;
        }
        log::info!("Finished storing results.");
        Ok(())
    }

    /// Setup logging level and file
    fn setup_logger(args: &Args) {
        let log_level = match args.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        simple_logging::log_to_file(args.log_file.as_str(), log_level).unwrap_or_else(|_| {
            eprintln!("Unable to open log file.");
            std::process::exit(1);
        });
    }

    /// Setup rayon thread pool
    #[cfg(feature = "parallel")]
    fn setup_rayon(args: &Args) {
        if let Some(n_threads) = args.threads {
            println!("Setting number of threads to {}.", n_threads);
            rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .build_global()
                .unwrap_or_else(|_| {
                    eprintln!("Unable to set number of threads.");
                    std::process::exit(1);
                });
        }
    }

    /// Load parameters from file, applying the seed override.
    fn load_parameters(args: &Args) -> Result<Parameters> {
        let mut parameters = Parameters::read_from_file(args.settings.as_str())?;
        if let Some(seed) = args.seed {
            parameters.seed = seed;
        }
        log::info!("Loaded parameters\n{}", parameters);
        Ok(parameters)
    }
}

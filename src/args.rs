use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Name of the simulation, used as the output file prefix.
    #[clap(long, short, default_value = "pedisim")]
    pub name: String,

    /// Path to the parameters file.
    #[clap(long, short)]
    pub settings: String,

    /// Path to the output directory.
    #[clap(long, short, default_value = ".")]
    pub outdir: String,

    /// Path to the log file.
    #[clap(long, default_value = "pedisim.log")]
    pub log_file: String,

    /// Overrides the seed from the parameters file.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Verbosity; repeat for more detail.
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Do not show a progress bar.
    #[clap(long)]
    pub disable_progress_bar: bool,

    /// Number of threads to use.
    #[cfg(feature = "parallel")]
    #[clap(long)]
    pub threads: Option<usize>,
}

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "gwanju",
    version,
    about = "Korean Bible reader with cross-references (관주) and commentary.",
    long_about = None
)]
pub struct Cli {
    /// Start at this verse, e.g. "요 3:16" or "Luke 1:1"
    #[clap(name = "CITATION")]
    pub citation: Option<String>,

    /// Verse data file (bible_data.json)
    #[clap(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Cross-reference data file (bible_refs.json)
    #[clap(long, value_name = "FILE")]
    pub refs: Option<PathBuf>,

    /// Use a specific configuration file
    #[clap(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the verse, its references and commentary instead of opening the reader
    #[clap(short, long)]
    pub dump: bool,

    /// Increase verbosity (-v, -vv)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Enable debug output
    #[clap(long)]
    pub debug: bool,

    /// Translate an English cross-reference file into Korean and exit
    #[clap(long, value_name = "INPUT")]
    pub translate_refs: Option<PathBuf>,

    /// Where the translated cross-references are written
    #[clap(long, value_name = "FILE", default_value = "bible_refs.json", requires = "translate_refs")]
    pub output: PathBuf,

    /// Download the English cross-reference file first if INPUT is missing
    #[clap(long, requires = "translate_refs")]
    pub download: bool,
}

use std::path::PathBuf;
use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, warn};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

impl From<u8> for Verbosity {
    fn from(v: u8) -> Self {
        match v {
            0 => Verbosity::Quiet,
            1 => Verbosity::Errors,
            2 => Verbosity::Warnings,
            3 => Verbosity::Info,
            4 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }
}

/// Zip, Unzip, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Settings that change what the codec itself does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOpts {
    /// Run the lossy downsample stage after packing (and its inverse before unpacking)
    pub downsample: bool,
}

#[derive(Debug)]
pub struct HzOpts {
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Directory for output files. Outputs go beside their inputs when unset.
    pub out_dir: Option<PathBuf>,
    /// Codec settings
    pub pipeline: PipelineOpts,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HzOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            out_dir: None,
            pipeline: PipelineOpts::default(),
            verbose: Verbosity::Info,
        }
    }
}

impl Default for HzOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman file compressor",
    long_about = "
    Compresses each file into NAME.hz (the packed Huffman bitstream) and NAME.hz.json
    (the codebook and padding needed to decode it). Both files are required to decompress."
)]
pub struct Args {
    /// Files to process
    #[clap()]
    files: Vec<String>,

    /// Perform compression on the input files (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Perform decompression on the input files
    #[clap(short = 'd', long = "decompress", conflicts_with = "compress")]
    decompress: bool,

    /// Compress and decompress in memory and check the result
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Keep (don't delete) input files
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Add the lossy downsample stage after Huffman packing
    #[clap(long = "downsample")]
    downsample: bool,

    /// Write outputs to this directory
    #[clap(short = 'o', long = "out-dir")]
    out_dir: Option<PathBuf>,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,
}

/// Put command line information from CLAP into our internal structure.
pub fn hzopts_from_args(args: Args) -> HzOpts {
    let mut opts = HzOpts::new();
    opts.files = args.files;
    if args.decompress {
        opts.op_mode = Mode::Unzip
    };
    if args.test {
        opts.op_mode = Mode::Test
    };
    opts.keep_input_files = args.keep;
    opts.force_overwrite = args.force;
    opts.out_dir = args.out_dir;
    opts.pipeline.downsample = args.downsample;
    opts.verbose = Verbosity::from(args.v);
    opts
}

/// Parse the command line, set the log level and report the settings.
pub fn hzopts_init() -> HzOpts {
    let opts = hzopts_from_args(Args::parse());
    log::set_max_level(opts.verbose.level_filter());

    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    if opts.files.is_empty() {
        warn!("No input files given.");
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    if opts.pipeline.downsample {
        warn!("Downsample stage enabled. Decompressed output may not match the input.")
    };
    if let Some(dir) = &opts.out_dir {
        info!("Writing output to {}", dir.display())
    }
    opts
}

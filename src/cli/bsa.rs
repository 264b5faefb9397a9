use super::{load_input, output_file};
use clap::Parser;
use interface_bsa::export::{anchor_bsa_to_df, residue_bsa_to_df};
use interface_bsa::{
    get_interface_bsa, parse_chain_pair, write_df_to_file, BsaError, DataFrameFileType,
    SasaSettings,
};
use std::path::PathBuf;
use tracing::{debug, info, trace, warn};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Path to the PDB or mmCIF file to be analyzed
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// The two chains forming the interface, e.g. A/B.
    /// Anchor positions are tagged 0 for the first chain and 1 for the second.
    #[arg(short, long, default_value_t = String::from("A/B"))]
    chains: String,

    /// Prefix of the output files; `_residue` and `_xyz` tables are written
    #[arg(short = 'f', long = "filename", default_value_t = String::from("bsa"))]
    filename: String,

    /// Output file type
    #[arg(short = 't', long, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,

    /// Distance cutoff for a residue to be at the interface
    #[arg(short, long, default_value_t = 5.5)]
    dist_cutoff: f64,

    /// Probe radius r (smaller r detects more surface details and reports a larger surface)
    #[arg(short = 'r', long = "probe-radius", default_value_t = 1.4)]
    probe_radius: f32,

    /// Number of points on the sphere for sampling
    #[arg(short = 'n', long = "num-points", default_value_t = 100)]
    n_points: usize,

    /// Number of threads to use for parallel processing
    #[arg(short = 'j', long = "num-threads", default_value_t = 1)]
    num_threads: usize,
}

pub(crate) fn run(args: &Args) -> Result<(), BsaError> {
    trace!("{args:?}");

    // Create Rayon thread pool
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(args.num_threads)
        .build_global()
    {
        warn!("{e}");
    }
    debug!("Using {} thread(s)", rayon::current_num_threads());

    let (chain_a, chain_b) = parse_chain_pair(&args.chains)?;
    let pdb = load_input(&args.input)?;

    let settings = SasaSettings {
        probe_radius: args.probe_radius,
        n_points: args.n_points,
        quiet: false,
    };
    let features = get_interface_bsa(&pdb, &chain_a, &chain_b, args.dist_cutoff, settings)?;

    let mut df_residue = residue_bsa_to_df(&features)?;
    let mut df_xyz = anchor_bsa_to_df(&features)?;
    debug!("Buried surface area per residue\n{df_residue}");

    let total: f64 = features.entries().iter().map(|e| e.bsa).sum();
    info!(
        "Buried surface area between chains {chain_a} and {chain_b}: {total:.2} Å² over {} residues",
        features.len()
    );

    // Save results to file
    let residue_file = output_file(&args.output, &format!("{}_residue", args.filename))?;
    write_df_to_file(&mut df_residue, &residue_file, args.output_format)?;
    let xyz_file = output_file(&args.output, &format!("{}_xyz", args.filename))?;
    write_df_to_file(&mut df_xyz, &xyz_file, args.output_format)?;
    info!(
        "Results saved to {}",
        args.output.canonicalize()?.to_string_lossy()
    );

    Ok(())
}

use super::{load_input, output_file};
use clap::Parser;
use interface_bsa::export::contacts_to_df;
use interface_bsa::{
    get_contact_residues, parse_chain_pair, write_df_to_file, BsaError, DataFrameFileType,
    SPARSE_INTERFACE_THRESHOLD,
};
use std::path::PathBuf;
use tracing::{info, trace, warn};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Path to the PDB or mmCIF file to be analyzed
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// The two chains forming the interface, e.g. A/B
    #[arg(short, long, default_value_t = String::from("A/B"))]
    chains: String,

    /// Name of the output file
    #[arg(short = 'f', long = "filename", default_value_t = String::from("contacts"))]
    filename: String,

    /// Output file type
    #[arg(short = 't', long, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,

    /// Distance cutoff for a residue to be at the interface
    #[arg(short, long, default_value_t = 5.5)]
    dist_cutoff: f64,
}

pub(crate) fn run(args: &Args) -> Result<(), BsaError> {
    trace!("{args:?}");

    let (chain_a, chain_b) = parse_chain_pair(&args.chains)?;
    let pdb = load_input(&args.input)?;

    let contacts = get_contact_residues(&pdb, &chain_a, &chain_b, args.dist_cutoff)?;
    match contacts.len() {
        0 => warn!(
            "No interface residue found with the cutoff {}Å",
            args.dist_cutoff
        ),
        n if n < SPARSE_INTERFACE_THRESHOLD => warn!(
            "Only {n} interface residues found with cutoff {}Å",
            args.dist_cutoff
        ),
        n => info!("Found {n} interface residues"),
    }

    let mut df_contacts = contacts_to_df(&contacts)?;
    let output = output_file(&args.output, &args.filename)?;
    write_df_to_file(&mut df_contacts, &output, args.output_format)?;
    info!(
        "Results saved to {}",
        output
            .with_extension(args.output_format.to_string())
            .to_string_lossy()
    );

    Ok(())
}

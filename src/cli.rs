pub(crate) mod bsa;
pub(crate) mod contacts;

use interface_bsa::{load_model, BsaError};
use pdbtbx::PDB;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Load the input structure, logging parser messages by severity.
pub(crate) fn load_input(input: &Path) -> Result<PDB, BsaError> {
    // Make sure `input` exists
    let input_path = input.canonicalize()?;
    let input_file = input_path.to_string_lossy();
    debug!("Using input file {input_file}");

    let (pdb, pdb_warnings) = load_model(&input_file)?;
    pdb_warnings.iter().for_each(|e| match e.level() {
        pdbtbx::ErrorLevel::BreakingError => error!("{e}"),
        pdbtbx::ErrorLevel::InvalidatingError => error!("{e}"),
        _ => warn!("{e}"),
    });

    Ok(pdb)
}

/// Path of `filename` inside the output directory, which is created if needed.
pub(crate) fn output_file(output: &Path, filename: &str) -> Result<PathBuf, BsaError> {
    std::fs::create_dir_all(output)?;
    let output_path = output.canonicalize()?;
    Ok(output_path.join(filename))
}

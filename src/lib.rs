#![warn(missing_docs)]

//! # interface-bsa
//!
//! Per-residue buried surface area (BSA) at the interface of two protein chains.
//!
//! For every residue with an atom within a distance cutoff of the partner chain,
//! the BSA is the solvent accessible surface area of the residue in its isolated
//! chain minus the area it keeps in the complex. Each value is reported twice:
//! keyed by residue, and keyed by the position of the residue's CB atom (CA for
//! glycine) so that it can be mapped onto a grid.
//!
//! Structures are read with `pdbtbx`, surface areas come from `rust-sasa`, and
//! results can be exported as Polars DataFrames.

pub mod bsa;
pub mod errors;
pub mod export;
mod residues;
pub mod sasa;
pub mod structure;
mod utils;

#[cfg(test)]
mod fixtures;

// Re-export key public types
pub use bsa::{
    anchor_atom_name, AnchorKey, BsaEntry, BsaFeatures, InterfaceBsa, InterfaceStructures,
    InterfaceWarning, DEFAULT_CONTACT_CUTOFF, SPARSE_INTERFACE_THRESHOLD,
};
pub use errors::BsaError;
pub use sasa::{
    element_symbol, ResidueSelection, SasaResult, SasaSettings, ShrakeRupley, SurfaceAreaEngine,
    SurfaceAtom, SurfaceAtomSet,
};
pub use structure::{
    AtomRecord, AtomSelection, AtomTable, ContactResidues, ResidueKey, StructureProvider,
};
pub use utils::{load_model, parse_chain_pair, write_df_to_file, DataFrameFileType};

use pdbtbx::PDB;
use tracing::debug;

/// Calculate the buried surface area of every interface residue between two chains.
///
/// # Arguments
///
/// * `pdb` - Reference to a PDB structure; only the first model is used
/// * `chain_a` - First interface chain (anchor chain index 0)
/// * `chain_b` - Second interface chain (anchor chain index 1)
/// * `cutoff` - Distance cutoff for contact residues (typically 5.5 Å)
/// * `settings` - Settings of the surface area calculation
///
/// # Errors
///
/// [`BsaError::NoInterface`] if no residue is within `cutoff` of the other chain,
/// [`BsaError::MissingAnchorAtom`] if a contact residue lacks its CB (CA for glycine).
///
/// # Example
///
/// ```no_run
/// use interface_bsa::{get_interface_bsa, load_model, SasaSettings};
///
/// let (pdb, _errors) = load_model("path/to/structure.pdb").unwrap();
/// let features = get_interface_bsa(&pdb, "A", "B", 5.5, SasaSettings::default()).unwrap();
/// for entry in features.entries() {
///     println!("{}: {:.2}", entry.residue, entry.bsa);
/// }
/// ```
pub fn get_interface_bsa(
    pdb: &PDB,
    chain_a: &str,
    chain_b: &str,
    cutoff: f64,
    settings: SasaSettings,
) -> Result<BsaFeatures, BsaError> {
    let table = AtomTable::from_pdb(pdb);
    debug!("Loaded {} atoms from the first model", table.len());

    let engine = ShrakeRupley::new(settings);
    InterfaceBsa::new(&table, &engine, chain_a, chain_b)
        .build_structures()?
        .compute_contact_bsa(cutoff)
}

/// Find the residues of two chains that are within `cutoff` Å of each other.
///
/// Residues of `chain_a` come first, each chain sorted by residue number.
pub fn get_contact_residues(
    pdb: &PDB,
    chain_a: &str,
    chain_b: &str,
    cutoff: f64,
) -> Result<Vec<ResidueKey>, BsaError> {
    let table = AtomTable::from_pdb(pdb);
    Ok(table
        .contact_residues(chain_a, chain_b, cutoff)?
        .merged(chain_a, chain_b))
}

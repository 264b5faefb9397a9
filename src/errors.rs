//! Error types shared by the structure, surface area and BSA modules.

use crate::structure::ResidueKey;
use pdbtbx::PDBError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Everything that can stop a buried surface area calculation.
#[derive(Debug, Error)]
pub enum BsaError {
    /// The structure could not be read; the underlying messages are kept as-is.
    #[error("Failed to read structure: {}", join_pdb_errors(.0))]
    StructureRead(Vec<PDBError>),

    /// No residue of either chain lies within `cutoff` of the other chain.
    #[error("No interface residue found with the cutoff {cutoff}Å")]
    NoInterface {
        /// Distance cutoff in Å
        cutoff: f64,
    },

    /// The anchor atom of a contact residue is absent from the structure.
    #[error("Anchor atom {atom} not found for residue {residue}")]
    MissingAnchorAtom {
        /// Residue without its anchor
        residue: ResidueKey,
        /// Name of the missing atom, `CB` or `CA`
        atom: &'static str,
    },

    /// A residue was reported on a chain that is not part of the calculation.
    #[error("Chain {0} is not one of the interface chains")]
    UnknownChain(String),

    /// The two interface chains are missing or the same.
    #[error("Invalid chain pair: {0}")]
    InvalidChains(String),

    /// Building or writing a DataFrame failed.
    #[error("Failed to export features: {0}")]
    Export(#[from] PolarsError),

    /// Filesystem error while writing output.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn join_pdb_errors(errors: &[PDBError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

//! Tabular export of BSA features through Polars.

use crate::bsa::BsaFeatures;
use crate::errors::BsaError;
use crate::structure::ResidueKey;
use polars::prelude::*;

/// BSA indexed by residue, with columns `chain, resi, resn, bsa`.
pub fn residue_bsa_to_df(features: &BsaFeatures) -> Result<DataFrame, BsaError> {
    let res = features.entries();
    Ok(df!(
        "chain" => res.iter().map(|x| x.residue.chain.to_owned()).collect::<Vec<String>>(),
        "resi" => res.iter().map(|x| x.residue.resi as i64).collect::<Vec<i64>>(),
        "resn" => res.iter().map(|x| x.residue.resn.to_owned()).collect::<Vec<String>>(),
        "bsa" => res.iter().map(|x| x.bsa).collect::<Vec<f64>>(),
    )?)
}

/// BSA indexed by anchor atom position, with columns `chain_index, x, y, z, bsa`.
pub fn anchor_bsa_to_df(features: &BsaFeatures) -> Result<DataFrame, BsaError> {
    let res = features.entries();
    Ok(df!(
        "chain_index" => res.iter().map(|x| x.anchor.chain as u32).collect::<Vec<u32>>(),
        "x" => res.iter().map(|x| x.anchor.x).collect::<Vec<f64>>(),
        "y" => res.iter().map(|x| x.anchor.y).collect::<Vec<f64>>(),
        "z" => res.iter().map(|x| x.anchor.z).collect::<Vec<f64>>(),
        "bsa" => res.iter().map(|x| x.bsa).collect::<Vec<f64>>(),
    )?)
}

/// Contact residues with columns `chain, resi, resn`.
pub fn contacts_to_df(contacts: &[ResidueKey]) -> Result<DataFrame, BsaError> {
    Ok(df!(
        "chain" => contacts.iter().map(|x| x.chain.to_owned()).collect::<Vec<String>>(),
        "resi" => contacts.iter().map(|x| x.resi as i64).collect::<Vec<i64>>(),
        "resn" => contacts.iter().map(|x| x.resn.to_owned()).collect::<Vec<String>>(),
    )?)
}

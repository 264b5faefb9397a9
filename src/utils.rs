use crate::errors::BsaError;
use crate::residues::ResidueExt;
use pdbtbx::*;
use polars::prelude::*;
use std::path::Path;

/// Open an atomic data file with [`pdbtbx::ReadOptions`] and remove non-protein residues.
///
/// The returned errors are the non-fatal messages raised while parsing.
pub fn load_model(input_file: &str) -> Result<(PDB, Vec<PDBError>), BsaError> {
    // Load file as complex structure
    let (mut pdb, errors) = pdbtbx::ReadOptions::default()
        .set_only_atomic_coords(true)
        .set_level(pdbtbx::StrictnessLevel::Loose)
        .read(input_file)
        .map_err(BsaError::StructureRead)?;

    // Remove non-protein residues from model
    pdb.remove_residues_by(|res| res.resn().is_none());

    Ok((pdb, errors))
}

/// Parse the two interface chains from the input string, e.g. `A/B`.
pub fn parse_chain_pair(chains: &str) -> Result<(String, String), BsaError> {
    let sel_vec: Vec<&str> = chains.split('/').map(|c| c.trim()).collect();
    match sel_vec.as_slice() {
        [a, b] if !a.is_empty() && !b.is_empty() && a != b => Ok((a.to_string(), b.to_string())),
        _ => Err(BsaError::InvalidChains(format!(
            "expected two different chains as 'A/B', found '{chains}'"
        ))),
    }
}

/// Write a DataFrame to `file_path`, replacing its extension with the file type.
pub fn write_df_to_file(
    df: &mut DataFrame,
    file_path: &Path,
    file_type: DataFrameFileType,
) -> Result<(), BsaError> {
    let file_suffix = file_type.to_string();
    let mut file = std::fs::File::create(file_path.with_extension(file_suffix))?;
    match file_type {
        DataFrameFileType::Csv => {
            CsvWriter::new(&mut file).finish(df)?;
        }
        DataFrameFileType::Parquet => {
            ParquetWriter::new(&mut file).finish(df)?;
        }
        DataFrameFileType::Json => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::Json)
                .finish(df)?;
        }
        DataFrameFileType::NDJson => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::JsonLines)
                .finish(df)?;
        }
    }
    Ok(())
}

/// File format for writing DataFrames.
#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq)]
pub enum DataFrameFileType {
    /// Comma-separated values
    Csv,
    /// Parquet columnar storage
    Parquet,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
    NDJson,
}

impl std::fmt::Display for DataFrameFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataFrameFileType::Csv => write!(f, "csv"),
            DataFrameFileType::Parquet => write!(f, "parquet"),
            DataFrameFileType::Json => write!(f, "json"),
            DataFrameFileType::NDJson => write!(f, "ndjson"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_chain_pairs() {
        assert_eq!(
            parse_chain_pair("A/B").unwrap(),
            ("A".to_string(), "B".to_string())
        );
        assert_eq!(
            parse_chain_pair(" H / L ").unwrap(),
            ("H".to_string(), "L".to_string())
        );
    }

    #[test]
    fn bad_chain_pairs() {
        for chains in ["", "A", "A/", "/B", "A/A", "A/B/C"] {
            assert!(
                matches!(parse_chain_pair(chains), Err(BsaError::InvalidChains(_))),
                "'{chains}' should be rejected"
            );
        }
    }

    #[test]
    fn load_dimer_without_water() {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/dimer.pdb");

        let (pdb, _) = load_model(&path).unwrap();
        let chains: Vec<&str> = pdb.chains().map(|c| c.id()).collect();
        assert_eq!(chains, vec!["A", "B"]);
        assert!(pdb
            .residues()
            .all(|r| r.name().unwrap_or("") != "HOH"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/does-not-exist.pdb");
        assert!(matches!(load_model(&path), Err(BsaError::StructureRead(_))));
    }

    #[test]
    fn file_type_extension() {
        assert_eq!(DataFrameFileType::Csv.to_string(), "csv");
        assert_eq!(DataFrameFileType::NDJson.to_string(), "ndjson");
    }
}

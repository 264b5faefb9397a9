//! Per-residue buried surface area (BSA) at a two-chain interface.
//!
//! BSA of a residue is the area it exposes in its isolated chain minus the area
//! it still exposes in the complex. The calculation runs in two steps, each
//! consuming the previous state:
//!
//! 1. [`InterfaceBsa::build_structures`] builds the complex and the two isolated
//!    chains and computes their SASA.
//! 2. [`InterfaceStructures::compute_contact_bsa`] finds the contact residues and
//!    differences their areas into [`BsaFeatures`].
//!
//! ```no_run
//! use interface_bsa::{AtomTable, InterfaceBsa, ShrakeRupley, DEFAULT_CONTACT_CUTOFF};
//!
//! let (pdb, _warnings) = interface_bsa::load_model("complex.pdb").unwrap();
//! let table = AtomTable::from_pdb(&pdb);
//! let engine = ShrakeRupley::default();
//! let features = InterfaceBsa::new(&table, &engine, "A", "B")
//!     .build_structures()
//!     .unwrap()
//!     .compute_contact_bsa(DEFAULT_CONTACT_CUTOFF)
//!     .unwrap();
//! println!("{} interface residues", features.len());
//! ```

use crate::errors::BsaError;
use crate::sasa::{ResidueSelection, SasaResult, SurfaceAreaEngine, SurfaceAtomSet};
use crate::structure::{AtomSelection, ResidueKey, StructureProvider};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::{debug, trace, warn};

/// Distance cutoff for contact residues, in Å.
pub const DEFAULT_CONTACT_CUTOFF: f64 = 5.5;

/// Interfaces with fewer contact residues than this give unreliable features.
pub const SPARSE_INTERFACE_THRESHOLD: usize = 5;

/// Name of the atom giving a residue its position: CB, or CA for glycine.
pub fn anchor_atom_name(resn: &str) -> &'static str {
    if resn.eq_ignore_ascii_case("GLY") {
        "CA"
    } else {
        "CB"
    }
}

/// Position of a residue's anchor atom, tagged with the index of its chain.
///
/// Coordinates compare and hash by their bit patterns.
#[derive(Debug, Clone, Copy)]
pub struct AnchorKey {
    /// 0 for the first interface chain, 1 for the second
    pub chain: usize,
    /// x coordinate in Å
    pub x: f64,
    /// y coordinate in Å
    pub y: f64,
    /// z coordinate in Å
    pub z: f64,
}

impl AnchorKey {
    /// Key for an anchor at `pos` on interface chain `chain` (0 or 1).
    pub fn new(chain: usize, pos: [f64; 3]) -> Self {
        Self {
            chain,
            x: pos[0],
            y: pos[1],
            z: pos[2],
        }
    }

    fn bits(&self) -> (usize, u64, u64, u64) {
        (self.chain, self.x.to_bits(), self.y.to_bits(), self.z.to_bits())
    }
}

impl PartialEq for AnchorKey {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for AnchorKey {}

impl Hash for AnchorKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

/// Non-fatal conditions met while computing the features.
#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceWarning {
    /// Fewer than [`SPARSE_INTERFACE_THRESHOLD`] contact residues
    SparseInterface {
        /// Contact residues over both chains
        n_residues: usize,
        /// Distance cutoff in Å
        cutoff: f64,
    },
}

impl fmt::Display for InterfaceWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InterfaceWarning::SparseInterface { n_residues, cutoff } => write!(
                f,
                "Only {n_residues} interface residues found with cutoff {cutoff}Å. Be careful with using the BSA feature"
            ),
        }
    }
}

/// BSA of one contact residue.
#[derive(Debug, Clone, PartialEq)]
pub struct BsaEntry {
    /// Contact residue
    pub residue: ResidueKey,
    /// Position of the residue's CB (CA for glycine)
    pub anchor: AnchorKey,
    /// Buried area in Å², not clamped at zero
    pub bsa: f64,
}

/// Result of a BSA calculation, indexed by residue and by anchor position.
#[derive(Debug, Clone)]
pub struct BsaFeatures {
    entries: Vec<BsaEntry>,
    by_residue: HashMap<ResidueKey, f64>,
    by_anchor: HashMap<AnchorKey, f64>,
    warnings: Vec<InterfaceWarning>,
    cutoff: f64,
}

impl BsaFeatures {
    fn new(cutoff: f64) -> Self {
        Self {
            entries: Vec::new(),
            by_residue: HashMap::new(),
            by_anchor: HashMap::new(),
            warnings: Vec::new(),
            cutoff,
        }
    }

    fn insert(&mut self, entry: BsaEntry) {
        self.by_residue.insert(entry.residue.clone(), entry.bsa);
        self.by_anchor.insert(entry.anchor, entry.bsa);
        self.entries.push(entry);
    }

    /// Entries in contact order: first chain, then second chain.
    pub fn entries(&self) -> &[BsaEntry] {
        &self.entries
    }

    /// BSA keyed by residue.
    pub fn by_residue(&self) -> &HashMap<ResidueKey, f64> {
        &self.by_residue
    }

    /// BSA keyed by anchor position.
    pub fn by_anchor(&self) -> &HashMap<AnchorKey, f64> {
        &self.by_anchor
    }

    /// BSA of `residue`, if it is at the interface.
    pub fn residue_bsa(&self, residue: &ResidueKey) -> Option<f64> {
        self.by_residue.get(residue).copied()
    }

    /// BSA of the residue anchored at `anchor`.
    pub fn anchor_bsa(&self, anchor: &AnchorKey) -> Option<f64> {
        self.by_anchor.get(anchor).copied()
    }

    /// Non-fatal conditions met during the calculation.
    pub fn warnings(&self) -> &[InterfaceWarning] {
        &self.warnings
    }

    /// Distance cutoff used to find the contact residues.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Number of interface residues.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no residue is at the interface.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Calculator before any structure has been built.
pub struct InterfaceBsa<'a, P, E> {
    provider: &'a P,
    engine: &'a E,
    chains: [String; 2],
}

impl<'a, P, E> InterfaceBsa<'a, P, E>
where
    P: StructureProvider,
    E: SurfaceAreaEngine,
{
    /// Calculator for the interface between `chain_a` and `chain_b`.
    pub fn new(provider: &'a P, engine: &'a E, chain_a: &str, chain_b: &str) -> Self {
        Self {
            provider,
            engine,
            chains: [chain_a.to_string(), chain_b.to_string()],
        }
    }

    /// Interface between chains `A` and `B`.
    pub fn with_default_chains(provider: &'a P, engine: &'a E) -> Self {
        Self::new(provider, engine, "A", "B")
    }

    /// Build the complex and the isolated chains and compute their SASA.
    pub fn build_structures(self) -> Result<InterfaceStructures<'a, P, E>, BsaError> {
        if self.chains[0] == self.chains[1] {
            return Err(BsaError::InvalidChains(format!(
                "both sides of the interface are chain {}",
                self.chains[0]
            )));
        }

        let atoms = self.provider.atoms(&AtomSelection::all())?;
        let complex: SurfaceAtomSet = atoms
            .iter()
            .filter(|a| self.chains.contains(&a.chain))
            .collect();
        let isolated: [SurfaceAtomSet; 2] = [
            atoms.iter().filter(|a| a.chain == self.chains[0]).collect(),
            atoms.iter().filter(|a| a.chain == self.chains[1]).collect(),
        ];

        // The three sets are independent
        let engine = self.engine;
        let (complex_sasa, (sasa_a, sasa_b)) = rayon::join(
            || engine.calc(&complex),
            || rayon::join(|| engine.calc(&isolated[0]), || engine.calc(&isolated[1])),
        );
        let complex_sasa = complex_sasa?;
        let isolated_sasa = [sasa_a?, sasa_b?];

        debug!(
            "SASA of complex ({} atoms): {:.2} Å²",
            complex.len(),
            complex_sasa.total()
        );
        for (chain, (set, sasa)) in self.chains.iter().zip(isolated.iter().zip(&isolated_sasa)) {
            debug!(
                "SASA of chain {chain} ({} atoms): {:.2} Å²",
                set.len(),
                sasa.total()
            );
        }

        Ok(InterfaceStructures {
            provider: self.provider,
            engine: self.engine,
            chains: self.chains,
            complex_sasa,
            isolated_sasa,
        })
    }
}

/// Calculator holding the SASA of the complex and of both isolated chains.
pub struct InterfaceStructures<'a, P, E> {
    provider: &'a P,
    engine: &'a E,
    chains: [String; 2],
    complex_sasa: SasaResult,
    isolated_sasa: [SasaResult; 2],
}

impl<P, E> InterfaceStructures<'_, P, E>
where
    P: StructureProvider,
    E: SurfaceAreaEngine,
{
    /// SASA of the whole complex.
    pub fn complex_sasa(&self) -> &SasaResult {
        &self.complex_sasa
    }

    /// SASA of the `i`-th interface chain on its own.
    pub fn isolated_sasa(&self, i: usize) -> Option<&SasaResult> {
        self.isolated_sasa.get(i)
    }

    /// BSA of every residue within `cutoff` Å of the other chain.
    pub fn compute_contact_bsa(self, cutoff: f64) -> Result<BsaFeatures, BsaError> {
        let [chain_a, chain_b] = &self.chains;
        let contacts = self
            .provider
            .contact_residues(chain_a, chain_b, cutoff)?
            .merged(chain_a, chain_b);

        let mut features = BsaFeatures::new(cutoff);
        match contacts.len() {
            0 => return Err(BsaError::NoInterface { cutoff }),
            n if n < SPARSE_INTERFACE_THRESHOLD => {
                let warning = InterfaceWarning::SparseInterface {
                    n_residues: n,
                    cutoff,
                };
                warn!("{warning}");
                features.warnings.push(warning);
            }
            n => debug!("Found {n} interface residues with cutoff {cutoff}Å"),
        }

        for residue in contacts {
            let chain_idx = self
                .chains
                .iter()
                .position(|c| *c == residue.chain)
                .ok_or_else(|| BsaError::UnknownChain(residue.chain.clone()))?;

            let selection = ResidueSelection::new(&residue.chain, residue.resi);
            let complex_area = self.engine.select_area(&self.complex_sasa, &selection);
            let isolated_area = self
                .engine
                .select_area(&self.isolated_sasa[chain_idx], &selection);
            let bsa = isolated_area - complex_area;

            let atom = anchor_atom_name(&residue.resn);
            let anchor = self
                .provider
                .atoms(
                    &AtomSelection::all()
                        .chain(&residue.chain)
                        .resi(residue.resi)
                        .name(atom),
                )?
                .into_iter()
                .next()
                .ok_or_else(|| BsaError::MissingAnchorAtom {
                    residue: residue.clone(),
                    atom,
                })?;
            trace!(
                "{residue}: isolated {isolated_area:.2} Å², complex {complex_area:.2} Å², BSA {bsa:.2} Å²"
            );

            features.insert(BsaEntry {
                residue,
                anchor: AnchorKey::new(chain_idx, anchor.pos),
                bsa,
            });
        }

        Ok(features)
    }
}

use super::{AtomRecord, AtomSelection, ContactResidues, ResidueKey, StructureProvider};
use crate::errors::BsaError;
use pdbtbx::*;
use rstar::primitives::GeomWithData;
use rstar::RTree;
use std::collections::{BTreeSet, HashMap};

type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// In-memory atom table, kept in the order the atoms were read.
#[derive(Debug, Clone, Default)]
pub struct AtomTable {
    atoms: Vec<AtomRecord>,
}

impl AtomTable {
    /// Wrap atom records, keeping their order.
    pub fn new(atoms: Vec<AtomRecord>) -> Self {
        Self { atoms }
    }

    /// Collect the atoms of the first model of a [`pdbtbx::PDB`].
    ///
    /// Residues are identified by serial number only: insertion codes and
    /// alternate locations are not kept, so `52` and `52A` (and every altloc
    /// of an atom) land in the same residue.
    pub fn from_pdb(pdb: &PDB) -> Self {
        let first_model = pdb.models().next().map(|m| m.serial_number());

        let atoms = pdb
            .atoms_with_hierarchy()
            .filter(|x| Some(x.model().serial_number()) == first_model)
            .map(|x| {
                let (px, py, pz) = x.atom().pos();
                AtomRecord {
                    name: x.atom().name().to_string(),
                    resn: x.residue().name().unwrap_or("").to_string(),
                    resi: x.residue().serial_number(),
                    chain: x.chain().id().to_string(),
                    pos: [px, py, pz],
                }
            })
            .collect();

        Self { atoms }
    }

    /// Number of atoms.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Whether the table has no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// All atom records in source order.
    pub fn records(&self) -> &[AtomRecord] {
        &self.atoms
    }

    fn chain_atoms<'a>(&'a self, chain: &'a str) -> impl Iterator<Item = &'a AtomRecord> + 'a {
        self.atoms.iter().filter(move |a| a.chain == chain)
    }
}

impl StructureProvider for AtomTable {
    fn atoms(&self, selection: &AtomSelection) -> Result<Vec<AtomRecord>, BsaError> {
        Ok(self
            .atoms
            .iter()
            .filter(|a| selection.matches(a))
            .cloned()
            .collect())
    }

    fn contact_residues(
        &self,
        chain_a: &str,
        chain_b: &str,
        cutoff: f64,
    ) -> Result<ContactResidues, BsaError> {
        if chain_a == chain_b {
            return Err(BsaError::InvalidChains(format!(
                "contacts need two different chains, found '{chain_a}' twice"
            )));
        }
        // Negative or NaN cutoffs select nothing
        if !(cutoff >= 0.0) {
            return Ok(ContactResidues::new(HashMap::from([
                (chain_a.to_string(), Vec::new()),
                (chain_b.to_string(), Vec::new()),
            ])));
        }

        let b_atoms: Vec<&AtomRecord> = self.chain_atoms(chain_b).collect();
        let tree: RTree<IndexedPoint> = RTree::bulk_load(
            b_atoms
                .iter()
                .enumerate()
                .map(|(i, a)| IndexedPoint::new(a.pos, i))
                .collect(),
        );
        let cutoff_squared = cutoff * cutoff;

        // BTreeSet keeps each residue once, ordered by residue number
        let mut a_contacts: BTreeSet<(isize, String)> = BTreeSet::new();
        let mut b_contacts: BTreeSet<(isize, String)> = BTreeSet::new();
        for a in self.chain_atoms(chain_a) {
            let mut in_contact = false;
            for neighbor in tree.locate_within_distance(a.pos, cutoff_squared) {
                let b = b_atoms[neighbor.data];
                b_contacts.insert((b.resi, b.resn.clone()));
                in_contact = true;
            }
            if in_contact {
                a_contacts.insert((a.resi, a.resn.clone()));
            }
        }

        let to_keys = |chain: &str, residues: BTreeSet<(isize, String)>| {
            residues
                .into_iter()
                .map(|(resi, resn)| ResidueKey::new(chain, resi, &resn))
                .collect::<Vec<_>>()
        };
        let mut by_chain = HashMap::new();
        by_chain.insert(chain_a.to_string(), to_keys(chain_a, a_contacts));
        by_chain.insert(chain_b.to_string(), to_keys(chain_b, b_contacts));

        Ok(ContactResidues::new(by_chain))
    }
}

impl FromIterator<AtomRecord> for AtomTable {
    fn from_iter<I: IntoIterator<Item = AtomRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{full_interface, sparse_interface};

    #[test]
    fn atoms_are_returned_in_source_order() {
        let table = full_interface(4.0);
        let chain_b = table.atoms(&AtomSelection::all().chain("B")).unwrap();

        assert!(!chain_b.is_empty());
        assert!(chain_b.iter().all(|a| a.chain == "B"));
        let resis: Vec<isize> = chain_b.iter().map(|a| a.resi).collect();
        let mut sorted = resis.clone();
        sorted.sort();
        assert_eq!(resis, sorted);

        let cb = table
            .atoms(&AtomSelection::all().chain("A").resi(2).name("CB"))
            .unwrap();
        assert_eq!(cb.len(), 1);
        assert_eq!(cb[0].resn, "ALA");
    }

    #[test]
    fn contacts_found_on_both_chains() {
        let table = full_interface(4.0);
        let contacts = table.contact_residues("A", "B", 5.5).unwrap();

        let a: Vec<isize> = contacts.chain("A").iter().map(|r| r.resi).collect();
        let b: Vec<isize> = contacts.chain("B").iter().map(|r| r.resi).collect();
        // The distant LYS4 on chain A stays out of the interface
        assert_eq!(a, vec![1, 2, 3]);
        assert_eq!(b, vec![1, 2, 3]);
    }

    #[test]
    fn sparse_contacts() {
        let table = sparse_interface();
        let contacts = table.contact_residues("A", "B", 5.5).unwrap();

        assert_eq!(
            contacts.merged("A", "B"),
            vec![
                ResidueKey::new("A", 1, "GLY"),
                ResidueKey::new("A", 2, "ALA"),
                ResidueKey::new("B", 1, "LEU"),
            ]
        );
        // Closest cross-chain pair is 5.0 Å apart
        assert!(table.contact_residues("A", "B", 4.5).unwrap().is_empty());
    }

    #[test]
    fn contact_count_grows_with_cutoff() {
        let table = full_interface(4.0);
        let mut last = 0;
        for cutoff in [0.1, 2.0, 4.0, 5.5, 8.0, 12.0, 40.0, 80.0] {
            let n = table.contact_residues("A", "B", cutoff).unwrap().len();
            assert!(n >= last, "{n} contacts at {cutoff} Å, {last} before");
            last = n;
        }
        assert_eq!(last, 7);
    }

    #[test]
    fn unknown_chain_has_no_contacts() {
        let table = full_interface(4.0);
        let contacts = table.contact_residues("A", "Z", 5.5).unwrap();
        assert!(contacts.is_empty());
    }

    #[test]
    fn negative_or_nan_cutoff_has_no_contacts() {
        let table = full_interface(4.0);
        for cutoff in [-5.5, -0.1, f64::NAN] {
            let contacts = table.contact_residues("A", "B", cutoff).unwrap();
            assert!(contacts.is_empty(), "{} contacts at {cutoff}", contacts.len());
        }
        let tiny = table.contact_residues("A", "B", 0.1).unwrap().len();
        let negative = table.contact_residues("A", "B", -10.0).unwrap().len();
        assert!(negative <= tiny);
    }

    #[test]
    fn same_chain_twice_is_rejected() {
        let table = full_interface(4.0);
        assert!(matches!(
            table.contact_residues("A", "A", 5.5),
            Err(BsaError::InvalidChains(_))
        ));
    }
}

//! Matching of residues named by annotation and coordinate records onto a chain.
//!
//! Files frequently number residues inconsistently between SEQRES, HELIX/SHEET
//! and ATOM records. The functions here tolerate such offsets by falling back
//! from exact number matches to name-based scans of the chain's reference
//! sequence.

use crate::core::models::monomer::Monomer;
use crate::core::models::polymer::{MonomerHandle, Polymer};
use crate::core::models::residue::is_nucleotide_code;
use crate::core::models::structure::{Structure, StructureKind};

/// Locates a residue in a reference sequence.
///
/// The residue number is tried first as a 1-based position. If the monomer at
/// that position has a different name, the sequence is scanned from the start
/// and the first monomer with a matching name wins, even if the file intended
/// a later one.
pub fn resolve_position(
    reference: &[Monomer],
    residue_name: &str,
    sequence_number: isize,
) -> Option<usize> {
    let optimistic = sequence_number
        .checked_sub(1)
        .and_then(|n| usize::try_from(n).ok());
    if optimistic
        .and_then(|index| reference.get(index))
        .is_some_and(|m| m.name() == residue_name)
    {
        return optimistic;
    }
    reference.iter().position(|m| m.name() == residue_name)
}

/// First monomer, in structure order, representing `(name, number)` that is
/// free for atoms numbered `atom_sequence_number`.
fn find_unclaimed(
    polymer: &Polymer,
    residue_name: &str,
    sequence_number: isize,
    atom_sequence_number: isize,
) -> Option<MonomerHandle> {
    polymer.monomer_handles().iter().copied().find(|&handle| {
        polymer.monomer(handle).is_some_and(|m| {
            m.matches(residue_name, sequence_number) && m.accepts(atom_sequence_number)
        })
    })
}

/// Finds the monomer an ATOM record belongs to among the chain's existing structures.
///
/// An exact `(name, number)` match wins. Otherwise the residue is resolved in
/// the reference sequence and the structure monomer copied from that
/// reference position is returned. Either way, a monomer already holding the
/// atoms of another ATOM residue number is never returned.
pub fn locate_monomer(
    polymer: &Polymer,
    reference: &[Monomer],
    residue_name: &str,
    sequence_number: isize,
) -> Option<MonomerHandle> {
    if let Some(handle) = find_unclaimed(polymer, residue_name, sequence_number, sequence_number) {
        return Some(handle);
    }
    let position = resolve_position(reference, residue_name, sequence_number)?;
    let anchor = &reference[position];
    find_unclaimed(polymer, anchor.name(), anchor.sequence_number, sequence_number)
}

/// Like [`locate_monomer`], but creates the monomer when nothing matches.
///
/// The returned monomer is claimed for `sequence_number`, so atoms of a later
/// residue with the same name can not be merged into it.
///
/// New monomers keep the file's residue number and go into the chain's
/// trailing auto-created structure of the matching kind; a fresh structure is
/// appended when the last one is annotated or of another kind.
pub(crate) fn locate_or_create_monomer(
    polymer: &mut Polymer,
    reference: &[Monomer],
    residue_name: &str,
    sequence_number: isize,
) -> MonomerHandle {
    if let Some(handle) = locate_monomer(polymer, reference, residue_name, sequence_number) {
        if let Some(monomer) = polymer.monomer_mut(handle) {
            monomer.claim(sequence_number);
        }
        return handle;
    }

    let kind = if is_nucleotide_code(residue_name) {
        StructureKind::Nucleotide
    } else {
        StructureKind::Other
    };
    let structures = polymer.structures_mut();
    let reusable = structures
        .last()
        .is_some_and(|s| s.is_auto_created() && s.kind == kind);
    if !reusable {
        structures.push(Structure::auto(kind));
    }
    let structure = structures.len() - 1;
    let target = &mut structures[structure];
    let mut monomer = Monomer::new(sequence_number, residue_name);
    monomer.claim(sequence_number);
    target.monomers.push(monomer);
    MonomerHandle {
        structure,
        monomer: target.monomers.len() - 1,
    }
}

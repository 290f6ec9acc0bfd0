//! Best-effort material resolution.
//!
//! Strategies run in a fixed order and the first one that produces a result
//! wins:
//! 1. bounds: an index past the collection gets an out-of-range placeholder
//! 2. standard: decode the addressed record; a decode fault is final and
//!    reported verbatim, an empty slot falls through
//! 3. reference: find any other decodable record to compare against
//!
//! If none resolves, a magenta placeholder is returned. Resolution never fails.

use crate::info::{AccessMethod, MaterialInfo};
use fragmat_error::FragError;
use fragmat_parser::{MaterialRecord, MaterialSource};
use log::{debug, trace};

pub const OUT_OF_RANGE: &str = "Material index out of range";
pub const ALL_STRATEGIES_FAILED: &str = "All access strategies failed";

/// Result of a single strategy
#[derive(Debug)]
enum Outcome {
    Resolved(MaterialInfo),
    Skip,
    Fail(String),
}

/// Borrowing resolver over a material source
pub struct Resolver<'a, M: MaterialSource + ?Sized> {
    pub source: &'a M,
}

impl<'a, M: MaterialSource + ?Sized> Resolver<'a, M> {
    pub fn new(source: &'a M) -> Self {
        Self { source }
    }

    pub fn resolve(&self, index: usize) -> MaterialInfo {
        let strategies: [(&str, fn(&M, usize) -> Outcome); 3] = [
            ("bounds", bounds::<M>),
            ("standard", standard::<M>),
            ("reference", reference::<M>),
        ];

        for (name, strategy) in strategies {
            match strategy(self.source, index) {
                Outcome::Resolved(info) => {
                    trace!("material {index}: resolved by {name} strategy");
                    return info;
                }
                Outcome::Skip => debug!("material {index}: {name} strategy skipped"),
                Outcome::Fail(reason) => debug!("material {index}: {name} strategy failed: {reason}"),
            }
        }

        MaterialInfo::placeholder(index, ALL_STRATEGIES_FAILED)
    }

    /// Resolve every index of the collection in order
    pub fn resolve_all(&self) -> Vec<MaterialInfo> {
        (0..self.source.material_count())
            .map(|index| self.resolve(index))
            .collect()
    }
}

/// Resolve a single material index. Never fails.
pub fn resolve<M: MaterialSource + ?Sized>(model: &M, index: usize) -> MaterialInfo {
    Resolver::new(model).resolve(index)
}

fn bounds<M: MaterialSource + ?Sized>(model: &M, index: usize) -> Outcome {
    if !model.has_materials() || index >= model.material_count() {
        Outcome::Resolved(MaterialInfo::placeholder(index, OUT_OF_RANGE))
    } else {
        Outcome::Skip
    }
}

fn standard<M: MaterialSource + ?Sized>(model: &M, index: usize) -> Outcome {
    match model.material_at(index) {
        Ok(Some(record)) => Outcome::Resolved(MaterialInfo::from_record(index, &record)),
        Ok(None) => Outcome::Skip,
        Err(fault) => Outcome::Resolved(fault_info(index, &fault)),
    }
}

fn fault_info(index: usize, fault: &FragError) -> MaterialInfo {
    let mut info = MaterialInfo::placeholder(index, fault.detail());
    info.access_method = AccessMethod::StandardFailed(fault.to_string());
    info.exception_type = fault.category().to_string();
    info
}

fn reference<M: MaterialSource + ?Sized>(model: &M, index: usize) -> Outcome {
    match find_reference(model, index) {
        Some((ref_index, record)) => {
            Outcome::Resolved(MaterialInfo::reference_only(index, ref_index, &record))
        }
        None => Outcome::Fail("no other material decodes".to_string()),
    }
}

/// First index other than `skip` holding a decodable record
fn find_reference<M: MaterialSource + ?Sized>(
    model: &M,
    skip: usize,
) -> Option<(usize, MaterialRecord)> {
    (0..model.material_count())
        .filter(|&i| i != skip)
        .find_map(|i| match model.material_at(i) {
            Ok(Some(record)) => Some((i, record)),
            Ok(None) => None,
            Err(e) => {
                trace!("reference probe {i} failed: {e}");
                None
            }
        })
}

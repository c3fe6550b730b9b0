//! Bookkeeping shared by all generators during a run.
//!
//! The state tracks every source unit generated so far along with the
//! imports, names and indentation of each, so that later productions stay
//! consistent with earlier ones: imports only name other existing units,
//! names never collide within a unit, and nested declarations line up.
//!
//! Ordered containers are used throughout; random selections index into
//! them, so their iteration order is part of what makes a seed reproducible.

use crate::{Error, random::RandomSource};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

/// Per source unit record.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceUnitState {
    imported: BTreeSet<String>,
    contracts: u32,
    functions: u32,
    indentation: u32,
    contract: Option<String>,
    function: Option<String>,
}

impl SourceUnitState {
    /// Paths imported by this unit.
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imported.iter().map(String::as_str)
    }

    pub fn is_imported(&self, path: &str) -> bool {
        self.imported.contains(path)
    }

    pub fn indentation(&self) -> u32 {
        self.indentation
    }

    /// The most recently minted contract name.
    pub fn contract(&self) -> Option<&str> {
        self.contract.as_deref()
    }

    /// The most recently minted function name.
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }
}

/// Running generation state.
#[derive(Debug, Default)]
pub struct GenerationState {
    units: BTreeMap<String, SourceUnitState>,
    current: Option<String>,
    next_unit: u32,
}

impl GenerationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Registers a fresh source unit and makes it the current one.
    pub fn add_source_unit(&mut self) -> String {
        let path = format!("su{}.sol", self.next_unit);
        self.next_unit += 1;
        debug_assert!(!self.units.contains_key(&path));
        self.units.insert(path.clone(), SourceUnitState::default());
        self.current = Some(path.clone());
        debug!(%path, "added source unit");
        path
    }

    pub fn current_path(&self) -> Result<&str, Error> {
        self.current.as_deref().ok_or(Error::NoSourceUnit)
    }

    /// Snapshot of every known path, in sorted order.
    pub fn paths(&self) -> Vec<String> {
        self.units.keys().cloned().collect()
    }

    pub fn unit(&self, path: &str) -> Option<&SourceUnitState> {
        self.units.get(path)
    }

    pub fn current_unit(&self) -> Result<&SourceUnitState, Error> {
        let path = self.current_path()?;
        self.units
            .get(path)
            .ok_or_else(|| Error::UnknownSourceUnit(path.to_owned()))
    }

    fn current_unit_mut(&mut self) -> Result<&mut SourceUnitState, Error> {
        let path = self.current.as_deref().ok_or(Error::NoSourceUnit)?;
        self.units
            .get_mut(path)
            .ok_or_else(|| Error::UnknownSourceUnit(path.to_owned()))
    }

    /// Uniformly selects one of the known paths.
    pub fn random_path(&self, random: &mut RandomSource) -> Result<String, Error> {
        pick(self.paths(), 1, random)
    }

    /// Uniformly selects a known path other than the current one.
    pub fn random_other_path(&self, random: &mut RandomSource) -> Result<String, Error> {
        if self.len() < 2 {
            return Err(Error::NotEnoughSourceUnits {
                required: 2,
                found: self.len(),
            });
        }
        let current = self.current_path()?;
        let others = self
            .units
            .keys()
            .filter(|path| *path != current)
            .cloned()
            .collect();
        pick(others, 2, random)
    }

    /// Records `path` as imported by the current unit.
    ///
    /// Returns `false`, leaving the state untouched, if `path` is the
    /// current unit itself or was already imported.
    pub fn add_import(&mut self, path: &str) -> Result<bool, Error> {
        if self.current_path()? == path {
            return Ok(false);
        }
        Ok(self.current_unit_mut()?.imported.insert(path.to_owned()))
    }

    pub fn new_contract_name(&mut self) -> Result<String, Error> {
        let unit = self.current_unit_mut()?;
        let name = format!("C{}", unit.contracts);
        unit.contracts += 1;
        unit.contract = Some(name.clone());
        Ok(name)
    }

    pub fn new_function_name(&mut self) -> Result<String, Error> {
        let unit = self.current_unit_mut()?;
        let name = format!("f{}", unit.functions);
        unit.functions += 1;
        unit.function = Some(name.clone());
        Ok(name)
    }

    pub fn indentation(&self) -> Result<u32, Error> {
        Ok(self.current_unit()?.indentation)
    }

    pub fn indent(&mut self) -> Result<(), Error> {
        self.current_unit_mut()?.indentation += 1;
        Ok(())
    }

    pub fn unindent(&mut self) -> Result<(), Error> {
        let path = self.current_path()?.to_owned();
        let unit = self.current_unit_mut()?;
        if unit.indentation == 0 {
            return Err(Error::IndentationUnderflow(path));
        }
        unit.indentation -= 1;
        Ok(())
    }
}

fn pick(mut paths: Vec<String>, required: usize, random: &mut RandomSource) -> Result<String, Error> {
    if paths.is_empty() {
        return Err(Error::NotEnoughSourceUnits { required, found: 0 });
    }
    let index = random.uniform(paths.len() as u32) as usize - 1;
    Ok(paths.swap_remove(index))
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, unit) in &self.units {
            writeln!(f, "Source path: {path}")?;
            for import in &unit.imported {
                writeln!(f, "Imports: {import}")?;
            }
        }
        Ok(())
    }
}

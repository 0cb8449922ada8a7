//! Workbook: an ordered set of named sheets

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

const FORBIDDEN: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];

/// An in-memory spreadsheet document
///
/// Sheets keep their insertion order; names are unique ignoring case. One
/// sheet is marked active.
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: Vec<Worksheet>,
    active: usize,
}

impl Workbook {
    /// A workbook holding one empty sheet named `Sheet1`
    pub fn new() -> Self {
        Self {
            sheets: vec![Worksheet::new("Sheet1")],
            active: 0,
        }
    }

    /// A workbook without sheets
    pub fn empty() -> Self {
        Self {
            sheets: Vec::new(),
            active: 0,
        }
    }

    /// Number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Whether the workbook has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Sheet at `index`
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.sheets.get(index)
    }

    /// Sheet at `index`, mutably
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.sheets.get_mut(index)
    }

    /// Sheet with exactly this name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.sheet_index(name).and_then(|i| self.sheets.get(i))
    }

    /// Sheet with exactly this name, mutably
    pub fn worksheet_by_name_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.sheet_index(name).and_then(move |i| self.sheets.get_mut(i))
    }

    /// Index of the sheet with exactly this name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|ws| ws.name() == name)
    }

    /// Sheet names in order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Worksheet::name).collect()
    }

    /// Append a sheet named `SheetN` with the first free `N`
    pub fn add_worksheet(&mut self) -> Result<usize> {
        let name = (self.sheets.len() + 1..)
            .map(|n| format!("Sheet{}", n))
            .find(|name| self.check_name(name, None).is_ok())
            .ok_or_else(|| Error::InvalidSheetName("no free sheet name".into()))?;
        self.add_worksheet_with_name(&name)
    }

    /// Append a sheet with this name, returning its index
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.check_name(name, None)?;
        self.sheets.push(Worksheet::new(name));
        Ok(self.sheets.len() - 1)
    }

    /// Remove the sheet at `index`; the active index stays in range
    pub fn remove_worksheet(&mut self, index: usize) -> Result<Worksheet> {
        self.check_index(index)?;
        let removed = self.sheets.remove(index);
        self.active = self.active.min(self.sheets.len().saturating_sub(1));
        Ok(removed)
    }

    /// Rename the sheet at `index`
    pub fn rename_worksheet(&mut self, index: usize, name: &str) -> Result<()> {
        self.check_index(index)?;
        self.check_name(name, Some(index))?;
        self.sheets[index].set_name(name);
        Ok(())
    }

    /// Index of the active sheet
    pub fn active_sheet(&self) -> usize {
        self.active
    }

    /// Mark the sheet at `index` active
    pub fn set_active_sheet(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.active = index;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.sheets.len() {
            Ok(())
        } else {
            Err(Error::SheetOutOfBounds(index, self.sheets.len()))
        }
    }

    /// `name` must be usable, and unique among sheets other than `renaming`
    fn check_name(&self, name: &str, renaming: Option<usize>) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("empty name".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "'{}' is longer than {} characters",
                name, MAX_SHEET_NAME_LEN
            )));
        }
        if let Some(c) = name.chars().find(|c| FORBIDDEN.contains(c)) {
            return Err(Error::InvalidSheetName(format!("'{}' contains '{}'", name, c)));
        }
        let clash = self
            .sheets
            .iter()
            .enumerate()
            .any(|(i, ws)| Some(i) != renaming && ws.name().eq_ignore_ascii_case(name));
        if clash {
            return Err(Error::DuplicateSheetName(name.into()));
        }
        Ok(())
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

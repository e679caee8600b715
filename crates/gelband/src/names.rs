//! Color-cycle index → human label mapping with lazy defaulting.
//!
//! Bands take their color from a fixed palette cycled by their index within
//! the lane; exports label columns through this mapping. Reading an unset
//! index has the documented side effect of materializing its default label
//! `Contour_<index>`, so the mapping afterwards serializes every index that
//! has ever been read.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ColorNameMapping {
    names: BTreeMap<u32, String>,
}

impl ColorNameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label for `index`, materializing `Contour_<index>` on first miss.
    pub fn get_or_insert_default(&mut self, index: u32) -> &str {
        self.names
            .entry(index)
            .or_insert_with(|| format!("Contour_{index}"))
    }

    /// Label for `index` without the materializing side effect.
    pub fn get(&self, index: u32) -> Option<&str> {
        self.names.get(&index).map(String::as_str)
    }

    pub fn set(&mut self, index: u32, label: impl Into<String>) {
        self.names.insert(index, label.into());
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.names.iter().map(|(&idx, label)| (idx, label.as_str()))
    }

    /// Merge `other` into this mapping. Imported labels win over existing
    /// ones; indices absent from both still lazily default on next read.
    pub fn merge(&mut self, other: impl IntoIterator<Item = (u32, String)>) {
        for (index, label) in other {
            self.names.insert(index, label);
        }
    }

    /// Serialize every mapped index as YAML `index: label` lines.
    pub fn to_yaml(&self) -> Result<String> {
        if self.names.is_empty() {
            return Err(Error::NothingToExport);
        }
        Ok(serde_yaml::to_string(&self.names)?)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let names: BTreeMap<u32, String> = serde_yaml::from_str(text)?;
        Ok(Self { names })
    }

    /// Write the full mapping to `path` in one operation.
    pub fn export_to_path(&self, path: &Path) -> Result<()> {
        let yaml = self.to_yaml()?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Merge the mapping stored at `path` into this one.
    pub fn import_from_path(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        let imported = Self::from_yaml(&text)?;
        self.merge(imported.names);
        Ok(())
    }
}

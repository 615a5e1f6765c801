//! Composite lookup keys over a model's metadata tables.
//!
//! Two keys are equal iff they reference the identical [`MappingInfo`]
//! handle *and* their name component(s) match. Hashing folds the handle's
//! identity surrogate in with the string content, so entries with the same
//! name from two different models never collide into one slot. Ordering is
//! lexicographic over (handle identity, names) and therefore consistent
//! with equality, which makes the keys usable in `BTreeMap` as well.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::mapping::MappingInfo;

// ────────────────────────────────────────────────────────────────────────────
// ModelScopedKey – one name, e.g. a model workspace parameter
// ────────────────────────────────────────────────────────────────────────────

/// Keys a table entry that lives directly under the model (no owning block).
#[derive(Debug, Clone)]
pub struct ModelScopedKey<'m> {
    name: String,
    mmi: &'m MappingInfo,
}

impl<'m> ModelScopedKey<'m> {
    pub fn new(mmi: &'m MappingInfo, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mmi,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mapping(&self) -> &'m MappingInfo {
        self.mmi
    }
}

impl PartialEq for ModelScopedKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        if !std::ptr::eq(self.mmi, other.mmi) {
            return false;
        }
        self.name == other.name
    }
}

impl Eq for ModelScopedKey<'_> {}

impl Hash for ModelScopedKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mmi.identity().hash(state);
        self.name.hash(state);
    }
}

impl Ord for ModelScopedKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.mmi.identity(), &self.name).cmp(&(other.mmi.identity(), &other.name))
    }
}

impl PartialOrd for ModelScopedKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// BlockScopedKey – block name + entry name, e.g. a signal or block parameter
// ────────────────────────────────────────────────────────────────────────────

/// Keys a table entry owned by a named block (block parameters, signals).
#[derive(Debug, Clone)]
pub struct BlockScopedKey<'m> {
    block_name: String,
    name: String,
    mmi: &'m MappingInfo,
}

impl<'m> BlockScopedKey<'m> {
    pub fn new(
        mmi: &'m MappingInfo,
        block_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            block_name: block_name.into(),
            name: name.into(),
            mmi,
        }
    }

    pub fn block_name(&self) -> &str {
        &self.block_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mapping(&self) -> &'m MappingInfo {
        self.mmi
    }
}

impl PartialEq for BlockScopedKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        if !std::ptr::eq(self.mmi, other.mmi) {
            return false;
        }
        self.block_name == other.block_name && self.name == other.name
    }
}

impl Eq for BlockScopedKey<'_> {}

impl Hash for BlockScopedKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mmi.identity().hash(state);
        self.block_name.hash(state);
        self.name.hash(state);
    }
}

impl Ord for BlockScopedKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.mmi.identity(), &self.block_name, &self.name).cmp(&(
            other.mmi.identity(),
            &other.block_name,
            &other.name,
        ))
    }
}

impl PartialOrd for BlockScopedKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

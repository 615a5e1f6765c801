//! The mapping-info handle: identity anchor for metadata lookups.

/// Descriptor standing in for one loaded model's C-API mapping tables
/// (the `rtwCAPI_ModelMappingInfo` of the generated code).
///
/// A `MappingInfo` is owned by whatever loads the model and must outlive
/// every key that references it; the borrow checker enforces this. Lookup
/// keys never clone it and compare it strictly by identity (the same
/// object, not an equal-looking one), because the same block or signal
/// name can legitimately recur across independently loaded models.
#[derive(Debug)]
pub struct MappingInfo {
    model_name: String,
}

impl MappingInfo {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Identity surrogate for this handle, stable for as long as the handle
    /// is borrowed. Used by the key types for hashing and ordering.
    pub fn identity(&self) -> usize {
        self as *const MappingInfo as usize
    }
}

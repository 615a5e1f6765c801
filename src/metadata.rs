//! Typed records describing a generated model's parameters and signals.
//!
//! These are plain value aggregates filled in once after walking a model's
//! C-API mapping tables and read-only afterwards. The `Vec` fields of
//! [`ModelInfo`] preserve the order in which entries were discovered, which
//! matches the row order of the generated tables.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Orientation & DataType
// ────────────────────────────────────────────────────────────────────────────

/// Memory layout of a value, mirroring the `rtwCAPI_Orientation` enumeration
/// emitted by the Simulink code generator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Orientation {
    Scalar,
    Vector,
    MatrixRowMajor,
    MatrixColMajor,
    /// N-dimensional (3+) array, column-major.
    MatrixColMajorNd,
    /// N-dimensional (3+) array, row-major.
    MatrixRowMajorNd,
}

impl Orientation {
    /// Whether a dimension list is well-formed for this orientation.
    ///
    /// The code generator emits `[1, 1]` for scalars and a two-entry list
    /// with one free dimension for vectors; matrices are always rank 2 and
    /// the ND variants rank 3 or higher.
    pub fn accepts_dims(&self, dims: &[isize]) -> bool {
        match self {
            Orientation::Scalar => dims.iter().all(|&d| d == 1),
            Orientation::Vector => {
                dims.len() <= 2 && dims.iter().filter(|&&d| d != 1).count() <= 1
            }
            Orientation::MatrixRowMajor | Orientation::MatrixColMajor => dims.len() == 2,
            Orientation::MatrixColMajorNd | Orientation::MatrixRowMajorNd => dims.len() >= 3,
        }
    }
}

/// Native representation of a single value in the generated code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataType {
    /// Type name as it appears in the generated C sources (e.g. `real_T`).
    pub c_type: String,
    /// Corresponding Python-facing type name (e.g. `numpy.float64`).
    pub python_type: String,
    /// Dimension sizes in table order.
    pub dims: Vec<isize>,
    pub orientation: Orientation,
}

impl DataType {
    /// True if `dims` is consistent with `orientation`.
    pub fn dims_consistent(&self) -> bool {
        self.orientation.accepts_dims(&self.dims)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Parameter / signal records
// ────────────────────────────────────────────────────────────────────────────

/// A model workspace parameter (not owned by any block).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelParam {
    pub name: String,
    pub data_type: DataType,
}

/// A dialog parameter owned by a specific block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockParam {
    pub block_name: String,
    pub name: String,
    pub data_type: DataType,
}

/// A signal emitted by a specific block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Signal {
    pub block_name: String,
    pub signal_name: String,
    pub data_type: DataType,
}

// ────────────────────────────────────────────────────────────────────────────
// ModelInfo
// ────────────────────────────────────────────────────────────────────────────

/// Everything known about one generated model: its name and the parameters
/// and signals exposed through the C API, in table order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ModelInfo {
    pub model_name: String,
    pub model_params: Vec<ModelParam>,
    pub block_params: Vec<BlockParam>,
    pub signals: Vec<Signal>,
}

impl ModelInfo {
    /// Create an empty info record for the given model.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            ..Default::default()
        }
    }

    /// Signals emitted by the named block, in table order.
    pub fn signals_of<'a>(&'a self, block_name: &'a str) -> impl Iterator<Item = &'a Signal> {
        self.signals.iter().filter(move |s| s.block_name == block_name)
    }

    /// Dialog parameters of the named block, in table order.
    pub fn params_of<'a>(&'a self, block_name: &'a str) -> impl Iterator<Item = &'a BlockParam> {
        self.block_params
            .iter()
            .filter(move |p| p.block_name == block_name)
    }

    /// Look up a signal by owning block and signal name.
    pub fn find_signal(&self, block_name: &str, signal_name: &str) -> Option<&Signal> {
        self.signals
            .iter()
            .find(|s| s.block_name == block_name && s.signal_name == signal_name)
    }

    /// Look up a model workspace parameter by name.
    pub fn find_model_param(&self, name: &str) -> Option<&ModelParam> {
        self.model_params.iter().find(|p| p.name == name)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ModelInfoDoc – binary serialization wrapper
// ────────────────────────────────────────────────────────────────────────────

/// Wrapper for caching a [`ModelInfo`] on disk between runs, so the
/// introspection walk only has to happen once per generated model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfoDoc {
    pub info: ModelInfo,
}

impl ModelInfoDoc {
    /// Save the ModelInfoDoc to a binary file with magic bytes and versioning.
    pub fn save_to_binary<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        std::io::Write::write_all(&mut writer, b"CAPILINK")?;
        std::io::Write::write_all(&mut writer, &1u32.to_le_bytes())?;
        bincode::serde::encode_into_std_write(self, &mut writer, bincode::config::standard())?;
        Ok(())
    }

    /// Load a ModelInfoDoc from a binary file, checking magic bytes and version.
    pub fn load_from_binary<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let mut reader = std::io::BufReader::new(file);
        let mut magic = [0u8; 8];
        std::io::Read::read_exact(&mut reader, &mut magic)?;
        if &magic != b"CAPILINK" {
            anyhow::bail!("Invalid magic bytes: expected 'CAPILINK'");
        }
        let mut version_bytes = [0u8; 4];
        std::io::Read::read_exact(&mut reader, &mut version_bytes)?;
        let version = u32::from_le_bytes(version_bytes);
        if version != 1 {
            anyhow::bail!("Unsupported version: {}", version);
        }
        let doc: ModelInfoDoc =
            bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard())?;
        Ok(doc)
    }
}

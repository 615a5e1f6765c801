//! Discovery and validation of Simulink code-generation output directories.
//!
//! A packaged codegen directory has two entries at its root: one containing
//! the `simulink/` support sources shared by every generated model, and one
//! containing the per-model folders (`<model>_<target>_<suffix>`). This
//! module locates both, resolves the root model folder, and checks that the
//! model was generated in a form the metadata layer can work with.

use anyhow::{Context, Result, anyhow, bail};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use walkdir::WalkDir;

/// Options for [`ModelPaths::discover`].
#[derive(Debug, Clone)]
pub struct DiscoverOptions {
    /// Code generation target. Only `grt` is supported.
    pub compile_type: String,
    /// Suffix appended to the model folder name, usually `rtw`.
    pub suffix: String,
    /// Scratch directory for archive extraction and build artifacts.
    /// Defaults to `<system temp dir>/capilink`.
    pub tmp_dir: Option<Utf8PathBuf>,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            compile_type: "grt".to_string(),
            suffix: "rtw".to_string(),
            tmp_dir: None,
        }
    }
}

/// Resolved on-disk layout of one code-generation output directory.
#[derive(Debug, Clone, Serialize)]
pub struct ModelPaths {
    /// Directory containing all model components (after extraction, for zips).
    pub root_dir: Utf8PathBuf,
    /// Directory containing the `simulink/` folder generated for every model.
    pub simulink_native: Utf8PathBuf,
    /// Directory containing the per-model codegen folders.
    pub models_dir: Utf8PathBuf,
    /// Folder of the root model (`<model>_<compile_type>_<suffix>`).
    pub root_model_path: Utf8PathBuf,
    pub root_model_name: String,
    pub compile_type: String,
    pub suffix: String,
    /// True if the model references child models (an `slprj` folder exists).
    pub has_references: bool,
    /// Child model project directory, present only with references.
    pub slprj_dir: Option<Utf8PathBuf>,
    /// Per-model scratch directory, created during discovery.
    pub tmp_dir: Utf8PathBuf,
}

impl ModelPaths {
    /// Locate and validate a generated model below `root` (a directory or a
    /// `.zip` of one).
    pub fn discover(
        root: impl AsRef<Utf8Path>,
        model_name: &str,
        opts: &DiscoverOptions,
    ) -> Result<Self> {
        if opts.compile_type != "grt" {
            bail!(
                "Unsupported compile target `{}`. grt is the only supported Simulink \
                 code generation target; change the code generation settings to use \
                 the grt.tlc target and regenerate.",
                opts.compile_type
            );
        }

        let root = root.as_ref();
        let root_dir = if root.extension() == Some("zip") {
            extract_archive(root, opts)?
        } else {
            root.to_path_buf()
        };

        let simulink_native = find_simulink_native(&root_dir)?;
        let native_name = simulink_native
            .file_name()
            .ok_or_else(|| anyhow!("Cannot determine folder name of {}", simulink_native))?;
        let models_dir = root_dir.join(other_entry_in(&root_dir, native_name)?);

        let has_references = models_dir.join("slprj").is_dir();
        let slprj_dir = has_references.then(|| models_dir.join("slprj").join(&opts.compile_type));

        let (root_model_path, root_model_name) =
            resolve_root_model(&models_dir, model_name, &opts.compile_type, &opts.suffix)?;

        let tmp_dir = match &opts.tmp_dir {
            Some(dir) => dir.join(&root_model_name),
            None => default_tmp_dir()?.join(&root_model_name),
        };
        std::fs::create_dir_all(&tmp_dir)
            .with_context(|| format!("Failed to create scratch directory {}", tmp_dir))?;

        let paths = Self {
            root_dir,
            simulink_native,
            models_dir,
            root_model_path,
            root_model_name,
            compile_type: opts.compile_type.clone(),
            suffix: opts.suffix.clone(),
            has_references,
            slprj_dir,
            tmp_dir,
        };
        paths.verify_capi()?;
        Ok(paths)
    }

    /// Check that the model was generated with the C API enabled and without
    /// multitasking. We do not call into the C API here; the check only needs
    /// the presence of the model mapping sources and a single-tasking step
    /// entry point.
    pub fn verify_capi(&self) -> Result<()> {
        let capi_file = self
            .root_model_path
            .join(format!("{}_capi.c", self.root_model_name));
        if !capi_file.is_file() {
            bail!(
                "Model `{}` was not generated with the C API. Enable the following \
                 options in the Code Generation model settings and regenerate:\n\
                 \tGenerate C API for: signals, parameters, states, root-level I/O",
                self.root_model_name
            );
        }

        let header = self
            .root_model_path
            .join(format!("{}.h", self.root_model_name));
        let text = std::fs::read_to_string(&header)
            .with_context(|| format!("Failed to read model header {}", header))?;
        let step_decl = format!("extern void {}_step(void);", self.root_model_name);
        if !text.lines().any(|line| line.contains(&step_decl)) {
            bail!(
                "Model `{}` is set up with multitasking. Disable the following options \
                 in the Solver settings and regenerate:\n\
                 \t- 'Treat each discrete rate as a separate task'\n\
                 \t- 'Allow tasks to execute concurrently on target'",
                self.root_model_name
            );
        }
        Ok(())
    }
}

/// Extract a zipped codegen directory into the scratch area and return the
/// extraction root.
fn extract_archive(path: &Utf8Path, opts: &DiscoverOptions) -> Result<Utf8PathBuf> {
    let stem = path
        .file_stem()
        .ok_or_else(|| anyhow!("Cannot determine archive name of {}", path))?;
    let target = match &opts.tmp_dir {
        Some(dir) => dir.join("extract").join(stem),
        None => default_tmp_dir()?.join("extract").join(stem),
    };
    std::fs::create_dir_all(&target)
        .with_context(|| format!("Failed to create extraction directory {}", target))?;

    let file = std::fs::File::open(path).with_context(|| format!("Open {}", path))?;
    let mut zip = zip::ZipArchive::new(std::io::BufReader::new(file))
        .with_context(|| format!("Failed to open zip archive {}", path))?;
    zip.extract(target.as_std_path())
        .with_context(|| format!("Failed to extract {} to {}", path, target))?;
    Ok(target)
}

fn default_tmp_dir() -> Result<Utf8PathBuf> {
    let base = Utf8PathBuf::from_path_buf(std::env::temp_dir())
        .map_err(|p| anyhow!("Non-UTF-8 temp directory: {}", p.display()))?;
    Ok(base.join("capilink"))
}

/// Find the directory that contains the generated `simulink/` folder.
fn find_simulink_native(root: &Utf8Path) -> Result<Utf8PathBuf> {
    for entry in WalkDir::new(root.as_std_path()).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_dir() && entry.file_name() == "simulink" {
            if let Some(parent) = entry.path().parent() {
                return Utf8PathBuf::from_path_buf(parent.to_path_buf())
                    .map_err(|p| anyhow!("Non-UTF-8 path: {}", p.display()));
            }
        }
    }
    bail!(
        "{} is not a valid Simulink code generation directory (no simulink/ folder found)",
        root
    )
}

/// Return the name of the directory entry in `root` other than `ignore`.
fn other_entry_in(root: &Utf8Path, ignore: &str) -> Result<String> {
    for entry in root
        .read_dir_utf8()
        .with_context(|| format!("Failed to list {}", root))?
    {
        let entry = entry?;
        if entry.file_type()?.is_dir() && entry.file_name() != ignore {
            return Ok(entry.file_name().to_string());
        }
    }
    bail!("No model folder found next to {} in {}", ignore, root)
}

/// Resolve the root model folder `<model>_<compile_type>_<suffix>`. Accepts
/// the model name with the suffix already appended (e.g. when the caller
/// passes the folder name itself) and strips it back off.
fn resolve_root_model(
    models_dir: &Utf8Path,
    model_name: &str,
    compile_type: &str,
    suffix: &str,
) -> Result<(Utf8PathBuf, String)> {
    let appendix = format!("_{}_{}", compile_type, suffix);
    let candidate = models_dir.join(format!("{}{}", model_name, appendix));
    if candidate.is_dir() {
        return Ok((candidate, model_name.to_string()));
    }

    let trimmed = model_name
        .split(appendix.as_str())
        .next()
        .unwrap_or(model_name);
    let candidate = models_dir.join(format!("{}{}", trimmed, appendix));
    if candidate.is_dir() {
        return Ok((candidate, trimmed.to_string()));
    }

    bail!(
        "Cannot find folder for model '{}' in {}",
        model_name,
        models_dir
    )
}

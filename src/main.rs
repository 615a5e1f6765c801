use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use capilink::paths::{DiscoverOptions, ModelPaths};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Locate & validate Simulink C-API code generation output", long_about = None)]
struct Cli {
    /// Code generation output directory, or a .zip of one
    #[arg(value_name = "ROOT_DIR")]
    root_dir: Utf8PathBuf,
    /// Name of the root model
    #[arg(value_name = "MODEL_NAME")]
    model_name: String,
    /// Code generation target (only grt is supported)
    #[arg(long, default_value = "grt")]
    compile_type: String,
    /// Suffix appended to the model folder name
    #[arg(long, default_value = "rtw")]
    suffix: String,
    /// Scratch directory for archive extraction and build artifacts
    #[arg(long)]
    tmp_dir: Option<Utf8PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let opts = DiscoverOptions {
        compile_type: cli.compile_type,
        suffix: cli.suffix,
        tmp_dir: cli.tmp_dir,
    };
    let paths = ModelPaths::discover(&cli.root_dir, &cli.model_name, &opts)
        .with_context(|| format!("Failed to resolve model in {}", cli.root_dir))?;

    let json = serde_json::to_string_pretty(&paths)?;
    println!("{}", json);
    Ok(())
}

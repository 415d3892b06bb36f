//! Generate a project from a specification file without running the server.
//!
//! Usage: `scaffold <spec.json> [out-dir]`. The output directory defaults to the
//! project name derived from the API name.

use std::{
    env,
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use api_scaffold_back::{dto::spec::ApiSpec, services::generation_service};

fn main() -> Result<()> {
    let mut args = env::args_os().skip(1);
    let Some(spec_path) = args.next().map(PathBuf::from) else {
        bail!("usage: scaffold <spec.json> [out-dir]");
    };
    let out_dir = args.next().map(PathBuf::from);

    let spec = load_spec(&spec_path)?;
    generation_service::validate_spec(&spec)
        .with_context(|| format!("invalid specification in {}", spec_path.display()))?;

    let download = generation_service::download(&spec).context("generating the project")?;
    let out_dir = out_dir.unwrap_or_else(|| PathBuf::from(&download.project_name));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    for (name, contents) in &download.files {
        let path = out_dir.join(name);
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn load_spec(path: &Path) -> Result<ApiSpec> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))
}

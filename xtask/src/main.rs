use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use data_runtime::configs::{model_catalog, viewport};
use data_runtime::loader::{data_root, process_env};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[derive(Parser)]
#[command(author, version, about = "Workspace automation tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// fmt + clippy -D warnings + wgsl + tests (workspace)
    Ci,
    /// Validate all WGSL shaders across the workspace
    Wgsl,
    /// Parse data/config/*.toml and report catalogue models missing on disk
    ConfigCheck,
    /// Print parse statistics for an OBJ file
    ObjStats { path: PathBuf },
}

fn run(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("spawn")?;
    if !status.success() {
        bail!("command failed: {:?}", cmd);
    }
    Ok(())
}

fn cargo(args: &[&str]) -> Result<()> {
    let mut c = Command::new("cargo");
    c.args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    run(&mut c)
}

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..")
}

fn ci() -> Result<()> {
    cargo(&["fmt", "--all"])?;
    cargo(&["clippy", "--all-targets", "--", "-D", "warnings"])?;
    wgsl_validate()?;
    cargo(&["test", "--workspace"])?;
    config_check()?;
    Ok(())
}

fn wgsl_validate() -> Result<()> {
    let root = workspace_root();
    let mut count = 0usize;
    let walker = walkdir::WalkDir::new(&root)
        .into_iter()
        .filter_entry(|e| e.file_name() != "target" && e.file_name() != ".git");
    for entry in walker.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("wgsl") {
            continue;
        }
        let txt = std::fs::read_to_string(path)
            .with_context(|| format!("read WGSL: {}", path.display()))?;
        let module = naga::front::wgsl::parse_str(&txt).map_err(|e| {
            anyhow::anyhow!("WGSL parse failed for {}: {}", path.display(), e.emit_to_string(&txt))
        })?;
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .map_err(|e| anyhow::anyhow!("WGSL validation failed for {}: {e:?}", path.display()))?;
        count += 1;
    }
    println!("xtask: WGSL validated ({} files)", count);
    Ok(())
}

fn config_check() -> Result<()> {
    let cfg_dir = data_root().join("config");
    let vp = viewport::load_from(&cfg_dir.join("viewport.toml"), process_env)
        .context("viewport.toml")?;
    println!("xtask: viewport.toml ok ({vp:?})");
    let catalog = model_catalog::load_from(
        &cfg_dir.join("models.toml"),
        &model_catalog::default_assets_root(),
    )
    .context("models.toml")?;
    let mut wanted: Vec<&Path> = vec![
        &catalog.male,
        &catalog.female,
        &catalog.medical,
        &catalog.background,
    ];
    wanted.extend(catalog.layers.iter().map(PathBuf::as_path));
    wanted.extend(catalog.extras.values().map(PathBuf::as_path));
    let missing: Vec<&Path> = wanted.into_iter().filter(|p| !p.is_file()).collect();
    for p in &missing {
        eprintln!("xtask: missing asset {}", p.display());
    }
    println!(
        "xtask: models.toml ok (root {}, {} missing)",
        catalog.assets_root.display(),
        missing.len()
    );
    Ok(())
}

fn obj_stats(path: &Path) -> Result<()> {
    let (mesh, report) =
        lf_assets::load_obj(path).with_context(|| format!("load {}", path.display()))?;
    let draw = lf_assets::build_draw_mesh(&mesh);
    println!("{}", path.display());
    println!(
        "  v {}  vn {}  vt {}  f {}  -> {} triangles",
        mesh.vertices.len(),
        mesh.normals.len(),
        mesh.texcoords.len(),
        mesh.faces.len(),
        draw.triangle_count()
    );
    if !report.is_clean() {
        println!(
            "  skipped {} line(s) (first at {:?}), {} malformed reference(s)",
            report.skipped_lines, report.first_skipped_line, report.malformed_refs
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Ci => ci(),
        Cmd::Wgsl => wgsl_validate(),
        Cmd::ConfigCheck => config_check(),
        Cmd::ObjStats { path } => obj_stats(&path),
    }
}

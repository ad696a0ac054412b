use std::path::PathBuf;

use clap::Parser;
use platform_winit::RunOptions;

#[derive(Parser, Debug)]
#[command(name = "lifeness")]
#[command(about = "Anatomy viewer: OBJ models over an animated background")]
struct Cli {
    /// OBJ file to show instead of a catalogue variant
    #[arg(long)]
    model: Option<PathBuf>,
    /// Named extra model from data/config/models.toml (e.g. heart)
    #[arg(long, conflicts_with = "model")]
    extra: Option<String>,
    /// Body variant: male, female or medical
    #[arg(long)]
    variant: Option<String>,
    /// Start with this reaction pulsing
    #[arg(long)]
    reaction: Option<String>,
    /// Animated GIF drawn behind the model
    #[arg(long)]
    background: Option<PathBuf>,
    #[arg(long)]
    wireframe: bool,
    #[arg(long)]
    no_vsync: bool,
}

impl From<Cli> for RunOptions {
    fn from(c: Cli) -> Self {
        Self {
            model: c.model,
            extra: c.extra,
            variant: c.variant,
            reaction: c.reaction,
            background: c.background,
            wireframe: c.wireframe,
            no_vsync: c.no_vsync,
        }
    }
}

fn main() {
    // Suppress noisy GPU backend logs by default; honor RUST_LOG if set.
    let default = "info,lifeness=info,wgpu_hal=off,wgpu_core=off,wgpu=off,naga=off";
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();
    let cli = Cli::parse();
    if let Err(e) = platform_winit::run(cli.into()) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_map_into_run_options() {
        let cli = Cli::parse_from([
            "lifeness",
            "--variant",
            "female",
            "--reaction",
            "smile",
            "--wireframe",
        ]);
        let opts = RunOptions::from(cli);
        assert_eq!(opts.variant.as_deref(), Some("female"));
        assert_eq!(opts.reaction.as_deref(), Some("smile"));
        assert!(opts.wireframe);
        assert!(opts.model.is_none());
    }

    #[test]
    fn model_and_extra_conflict() {
        let r = Cli::try_parse_from(["lifeness", "--model", "a.obj", "--extra", "heart"]);
        assert!(r.is_err());
    }
}

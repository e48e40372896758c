use anyhow::{Context, Result};
use nodegraft_config::Config;
use nodegraft_engine::{consolidate, io};
use std::{
    env,
    path::{Path, PathBuf},
    process,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Determine the config path from CLI args or the default location
    let args: Vec<String> = env::args().collect();
    let config_path = match args.len() {
        1 => Config::default_path(),
        2 => PathBuf::from(&args[1]),
        _ => {
            eprintln!("Usage: {} [config-path]", args[0]);
            process::exit(1);
        }
    };

    let config = match Config::load_from_path(&config_path) {
        Ok(Some(config)) => config,
        Ok(None) => {
            eprintln!("Error: No config file found at {}", config_path.display());
            eprintln!("Usage: {} [config-path]", args[0]);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    // Fragment paths resolve against the config file's directory unless the
    // config overrides the project root
    let config_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();
    let root = config.root.clone().unwrap_or(config_dir);

    let fragment_paths = config
        .resolve_fragments(&root)
        .context("resolving fragment list")?;
    if fragment_paths.is_empty() {
        eprintln!("Error: config lists no fragments");
        process::exit(1);
    }

    let fragments = io::read_fragments(&fragment_paths, &root)
        .context("reading grammar fragments")?;

    let rendered = consolidate(fragments.iter().map(String::as_str), &config.module_name)
        .context("consolidating definitions")?;

    io::write_output(&config.output, &root, &rendered).context("writing output document")?;

    println!(
        "parsed definitions have been written to: {}",
        config.output.to_path(&root).display()
    );

    Ok(())
}

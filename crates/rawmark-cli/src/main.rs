use anyhow::{Context, Result};
use rawmark_engine::{BlockConfig, RENDER_SETTLE, RawBlock, Tag, ViewEvent};
use rawmark_host::{Config, EditorApi, store};
use std::{env, path::PathBuf, process};

fn print_usage() {
    eprintln!("Usage: rawmark-cli <block.json> [--read-only] [--preview]");
    eprintln!();
    eprintln!("Loads a persisted raw markup block, renders it, optionally switches");
    eprintln!("to preview, prints the rendered view, and saves the block back.");
}

fn main() -> Result<()> {
    env_logger::init();

    let mut path: Option<PathBuf> = None;
    let mut read_only = false;
    let mut preview = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--read-only" => read_only = true,
            "--preview" => preview = true,
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            _ if arg.starts_with('-') => {
                eprintln!("Unknown option: {arg}");
                print_usage();
                process::exit(2);
            }
            _ => {
                if path.is_some() {
                    eprintln!("Expected exactly one block file");
                    print_usage();
                    process::exit(2);
                }
                path = Some(PathBuf::from(arg));
            }
        }
    }

    let Some(given) = path else {
        print_usage();
        process::exit(2);
    };

    let config = Config::load()
        .context("failed to load configuration")?
        .unwrap_or_default();

    // Relative paths resolve against the configured blocks directory
    let path = match &config.blocks_path {
        Some(root) if given.is_relative() => root.join(&given),
        _ => given,
    };

    let data = store::load_block(&path)
        .with_context(|| format!("failed to load block from {}", path.display()))?;

    let api = EditorApi::with_translations(config.translations.clone());
    let mut block = RawBlock::new(
        data,
        BlockConfig {
            placeholder: config.placeholder.clone(),
        },
        &api,
        read_only,
    );

    let root = block.render();
    block.advance(RENDER_SETTLE); // let the post-render resize pass run

    if preview && let Some(button) = block.view().find_by_tag(root, Tag::Button) {
        block.dispatch(ViewEvent::Click { node: button });
    }

    println!("{}", block.view().to_html(root));

    let saved = block.save(root);
    store::save_block_sanitized(&path, &saved)
        .with_context(|| format!("failed to save block to {}", path.display()))?;
    log::info!(
        "saved {} bytes of markup to {}",
        saved.html.len(),
        path.display()
    );

    Ok(())
}

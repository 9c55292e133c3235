use anyhow::Context;
use clap::Parser;
use gogroup_core::{config, excludes, groups, module, walker, Organizer};
use log::info;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

#[derive(Parser)]
#[command(name = "gogroup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Group, sort, and rewrite import declarations in Go projects")]
#[command(long_about = "Rewrites the import blocks of every Go file in a module so that imports \
    are grouped into configured buckets, ordered for display, and sorted within each bucket, \
    with adjacent buckets separated by a blank line. Buckets, their matching patterns, and \
    exclusion rules come from a YAML configuration file in the module root. Nothing outside \
    the import block is modified.")]
pub struct Args {
    /// Project directory (anywhere inside the Go module)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Configuration file, resolved against the module root unless absolute
    #[arg(short, long, default_value = "gogroup.yaml")]
    pub config: PathBuf,

    /// List files that need to be organized without changing them
    #[arg(short, long)]
    pub list_only: bool,
}

fn main() -> anyhow::Result<()> {
    // conflict-skip warnings must reach the user even without RUST_LOG set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let (module_name, module_root) = module::find_module_root(&args.path)
        .context("unable to resolve the Go module for the target path")?;

    let config_path = if args.config.is_absolute() {
        args.config.clone()
    } else {
        module_root.join(&args.config)
    };
    let config = config::load(&config_path)?;

    let (matchers, display_order) = groups::build(&config.groups, &module_name)?;
    let filter = excludes::build(&config.excludes)?;

    // One producer walking the tree, one worker draining the queue; dropping
    // the sender is the only termination signal the worker needs.
    let (tx, rx) = mpsc::channel();
    let organizer = Organizer::new(matchers, display_order, args.list_only);
    let worker = thread::spawn(move || organizer.run(rx));

    let walked = walker::walk(&module_root, &filter, &tx);
    drop(tx);

    let summary = worker
        .join()
        .map_err(|_| anyhow::anyhow!("worker thread panicked"))??;
    walked?;

    info!(
        "processed {} files: {} written, {} not sorted, {} skipped",
        summary.processed, summary.written, summary.unsorted, summary.skipped
    );
    Ok(())
}

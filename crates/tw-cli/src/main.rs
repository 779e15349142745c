mod config;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use config::Config;
use tw_core::Snapshot;
use tw_hooks::{find, registry, Args, HookContext, HookKind};
use tw_source::InMemoryBoards;
use tw_store::FsSnapshotStore;

#[derive(Parser)]
#[command(name = "tw", version, about = "Board-tree watcher: snapshot, diff, trigger")]
struct Cli {
    /// Config file with state/tree paths (optional)
    #[arg(long, default_value = "watcher.toml")]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List registered prelaunch/trigger/action hooks
    Hooks,

    /// Seed the snapshot baseline (run once before any trigger check)
    Prelaunch,

    /// Invoke a hook by key; prints exactly one JSON object for
    /// triggers/actions
    Invoke {
        key: String,

        /// Argument as name=value; the value is parsed as JSON when
        /// possible, otherwise taken as a string. Repeatable.
        #[arg(long = "arg")]
        args: Vec<String>,

        /// All arguments as one JSON object (merged over --arg)
        #[arg(long)]
        args_json: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let cfg = Config::load_or_default(&cli.config)?;

    match cli.cmd {
        Command::Hooks => {
            for hook in registry() {
                let d = &hook.descriptor;
                println!("{:<24} {:<9} {}", d.key, d.kind.as_str(), d.name);
                for a in d.required_args {
                    println!("    requires  {}:{}", a.name, a.ty);
                }
                for a in d.generated_args {
                    println!("    generates {}:{}", a.name, a.ty);
                }
            }
            Ok(())
        }
        Command::Prelaunch => invoke(&cfg, "record-starting-state", &[], None),
        Command::Invoke { key, args, args_json } => {
            invoke(&cfg, &key, &args, args_json.as_deref())
        }
    }
}

fn invoke(cfg: &Config, key: &str, arg_pairs: &[String], args_json: Option<&str>) -> Result<()> {
    let hook = find(key).ok_or_else(|| {
        let known: Vec<_> = registry().iter().map(|h| h.descriptor.key).collect();
        anyhow!("unknown hook {key:?}; known hooks: {}", known.join(", "))
    })?;

    let mut args = Args::new();
    for pair in arg_pairs {
        let (name, raw) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("--arg must be name=value, got {pair:?}"))?;
        let value =
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        args.insert(name, value);
    }
    if let Some(s) = args_json {
        let value: Value =
            serde_json::from_str(s).with_context(|| "parse --args-json".to_string())?;
        let object = value
            .as_object()
            .ok_or_else(|| anyhow!("--args-json must be a JSON object"))?;
        for (name, value) in object {
            args.insert(name, value.clone());
        }
    }

    let tree = load_tree(&cfg.tree_file)?;
    let source = InMemoryBoards::from_snapshot(tree);
    let store = FsSnapshotStore::new(&cfg.state_file);
    let ctx = HookContext { source: &source, store: &store };

    let payload = (hook.run)(&ctx, &args)?;
    if !payload.is_null() {
        println!("{}", serde_json::to_string(&payload)?);
    }

    // Actions mutate the in-memory tree; persist the result so the next
    // invocation sees it.
    if hook.descriptor.kind == HookKind::Action {
        save_tree(&cfg.tree_file, &source.snapshot())?;
    }
    Ok(())
}

fn load_tree(path: &PathBuf) -> Result<Snapshot> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read board tree {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse board tree {}", path.display()))
}

fn save_tree(path: &PathBuf, snapshot: &Snapshot) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(snapshot)?;
    std::fs::write(path, bytes).with_context(|| format!("write board tree {}", path.display()))
}

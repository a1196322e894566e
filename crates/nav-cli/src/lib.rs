//! Navtree command line
//!
//! Inspects and edits a forest kept in a JSON file. Every edit goes through
//! [`NavigationHost`], so it is validated by the engine and written back
//! one root at a time, the same way a remote store would receive it.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod file_store;

pub use file_store::JsonFileStore;

use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgGroup, ArgMatches, Command};
use nav_engine::{find_by_key, find_path, PendingEntry};
use nav_host::{HostConfig, NavigationHost, PendingQueuePoller};
use nav_model::{Decision, LocalizedText, NodeId, NodeRecord};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub type Host = NavigationHost<JsonFileStore>;

fn id_arg(help: &'static str) -> Arg {
    Arg::new("id").required(true).help(help)
}

/// Command definition
#[must_use]
pub fn build_cli() -> Command {
    Command::new("navtree")
        .version(nav_host::VERSION)
        .about("Inspect and moderate navigation menus")
        .subcommand_required(true)
        .arg(
            Arg::new("forest")
                .long("forest")
                .short('f')
                .global(true)
                .default_value("navtree.json")
                .value_parser(value_parser!(PathBuf))
                .help("Forest document (JSON array of root menus)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("locale")
                .long("locale")
                .global(true)
                .help("Primary locale for titles and slugs"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(Command::new("public").about("Print the public navigation tree"))
        .subcommand(Command::new("pending").about("Print the moderation queue"))
        .subcommand(Command::new("counts").about("Print node totals per status"))
        .subcommand(
            Command::new("path")
                .about("Print the ancestor chain of a node")
                .arg(id_arg("Node id")),
        )
        .subcommand(
            Command::new("review")
                .about("Approve or reject a node")
                .arg(id_arg("Node id"))
                .arg(Arg::new("approve").long("approve").action(ArgAction::SetTrue))
                .arg(Arg::new("reject").long("reject").action(ArgAction::SetTrue))
                .group(ArgGroup::new("decision").args(["approve", "reject"]).required(true)),
        )
        .subcommand(
            Command::new("add")
                .about("Add an item under a node, or a root menu when no parent is given")
                .arg(Arg::new("parent").long("parent").help("Parent node id"))
                .arg(Arg::new("title").long("title").required(true).help("Title in the primary locale"))
                .arg(Arg::new("path").long("path").default_value("").help("Internal path"))
                .arg(Arg::new("redirect").long("redirect").default_value("").help("External URL"))
                .arg(
                    Arg::new("order")
                        .long("order")
                        .default_value("0")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i64))
                        .help("Sibling sort key"),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a node and everything under it")
                .arg(id_arg("Node id")),
        )
        .subcommand(
            Command::new("watch")
                .about("Poll the forest and report moderation queue changes")
                .arg(
                    Arg::new("interval-ms")
                        .long("interval-ms")
                        .value_parser(value_parser!(u64))
                        .help("Poll interval, defaults to the configured one"),
                ),
        )
}

/// Install the global subscriber; logs go to stderr
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Configuration from `--config` with `--locale` applied
///
/// # Errors
/// Returns error if the file cannot be loaded
pub fn load_config(matches: &ArgMatches) -> anyhow::Result<HostConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => HostConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => HostConfig::default(),
    };
    if let Some(locale) = matches.get_one::<String>("locale") {
        config.engine.primary_locale.clone_from(locale);
        config.validate()?;
    }
    Ok(config)
}

/// Execute a parsed command; returns what to print on stdout
///
/// # Errors
/// Returns error if the forest cannot be loaded or the command fails
pub async fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let config = load_config(matches)?;
    let forest_path = matches
        .get_one::<PathBuf>("forest")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("navtree.json"));
    let host = Arc::new(NavigationHost::new(Arc::new(JsonFileStore::new(forest_path)), config));
    host.refresh().await?;

    let output = match matches.subcommand() {
        Some(("public", _)) => serde_json::to_value(host.public_tree())?,
        Some(("pending", _)) => Value::Array(host.pending_queue().iter().map(pending_json).collect()),
        Some(("counts", _)) => serde_json::to_value(host.status_counts())?,
        Some(("path", args)) => {
            let id = lookup(&host, args)?;
            let path = find_path(&host.snapshot(), &id)?;
            Value::String(path.to_string())
        }
        Some(("review", args)) => {
            let id = lookup(&host, args)?;
            let decision = if args.get_flag("approve") {
                Decision::Approve
            } else {
                Decision::Reject
            };
            host.review(&id, decision).await?;
            json!({ "id": id.as_str(), "decision": decision.to_string() })
        }
        Some(("add", args)) => add(&host, args).await?,
        Some(("remove", args)) => {
            let id = lookup(&host, args)?;
            if host.snapshot().root_position(&id).is_some() {
                host.delete_root(&id).await?;
            } else {
                host.remove(&id).await?;
            }
            json!({ "removed": id.as_str() })
        }
        Some(("watch", args)) => {
            let interval = args
                .get_one::<u64>("interval-ms")
                .map_or_else(|| host.config().poll_interval(), |ms| Duration::from_millis(*ms));
            watch(host, interval).await?;
            return Ok(String::new());
        }
        Some((other, _)) => bail!("unknown command {other}"),
        None => bail!("no command given"),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

fn lookup(host: &Host, args: &ArgMatches) -> anyhow::Result<NodeId> {
    let key = args.get_one::<String>("id").context("missing node id")?;
    find_by_key(&host.snapshot(), key)
        .map(|node| node.id.clone())
        .with_context(|| format!("no node with id {key}"))
}

fn pending_json(entry: &PendingEntry) -> Value {
    json!({
        "id": entry.node.id.as_str(),
        "status": entry.node.status,
        "title": entry.node.title,
        "breadcrumb": entry.breadcrumb,
    })
}

async fn add(host: &Host, args: &ArgMatches) -> anyhow::Result<Value> {
    let text = |name: &str| args.get_one::<String>(name).cloned().unwrap_or_default();
    let record = NodeRecord {
        title: LocalizedText::single(host.config().engine.primary_locale.clone(), text("title")),
        path: text("path"),
        redirect: text("redirect"),
        order: args.get_one::<i64>("order").copied().unwrap_or_default(),
        ..NodeRecord::default()
    };

    let before = host.snapshot();
    let after = match args.get_one::<String>("parent") {
        Some(key) => {
            let parent = find_by_key(&before, key).with_context(|| format!("no node with id {key}"))?;
            host.insert_child(&parent.id, &record).await?;
            host.snapshot()
        }
        None => host.create_root(record).await?,
    };

    let added: Vec<String> = after
        .iter()
        .filter(|n| find_by_key(&before, n.id.as_str()).is_none())
        .map(|n| n.id.to_string())
        .collect();
    Ok(json!({ "added": added }))
}

async fn watch(host: Arc<Host>, interval: Duration) -> anyhow::Result<()> {
    let mut events = host.subscribe();
    let poller = PendingQueuePoller::spawn(Arc::clone(&host), interval);
    let mut last = host.pending_queue().len();
    println!("{}", json!({ "pending": last }));

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("waiting for ctrl-c")?;
                break;
            }
            event = events.recv() => match event {
                Ok(changed) => {
                    let pending = nav_engine::pending_queue(&changed.forest, &host.config().engine).len();
                    if pending != last {
                        println!("{}", json!({ "pending": pending, "stamp": changed.stamp.value() }));
                        last = pending;
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "watch fell behind");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    poller.stop().await;
    Ok(())
}

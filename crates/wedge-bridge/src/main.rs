//! wedge-bridge command-line entry point.
//!
//! Drives a [`ScannerModule`] over an in-process [`LoopbackChannel`] and
//! prints every broadcast the module sends, exactly as DataWedge would
//! receive it.  The `scan` subcommand feeds a simulated scan broadcast back
//! through the channel and prints the events listeners would get.
//!
//! ```text
//! main()
//!  └─ BridgeConfig::load()      -- file, then --profile / --package overrides
//!  └─ ScannerModule::new()      -- create profile, suspend
//!  └─ subcommand                -- read / suspend / action / scan
//!  └─ print tapped broadcasts
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use wedge_bridge::application::{BroadcastChannel, ScannerModule};
use wedge_bridge::domain::{BridgeConfig, BridgeEvent, Intent};
use wedge_bridge::infrastructure::channel::LoopbackChannel;
use wedge_core::catalog::LABEL_TYPES;
use wedge_core::command::keys;
use wedge_core::value::wire_to_json_text;
use wedge_core::{Delivery, DynamicValue, ExtraParam, ReadRequest};

/// How long `scan` waits for each event.
const EVENT_TIMEOUT: Duration = Duration::from_secs(1);

/// Drive the DataWedge scanning service from the command line.
#[derive(Parser, Debug)]
#[command(name = "wedge-bridge")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to a TOML config file.
    #[arg(short, long, global = true, env = "WEDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Profile name (overrides the config file).
    #[arg(long, global = true, env = "WEDGE_PROFILE")]
    profile: Option<String>,

    /// Package the profile is bound to (overrides the config file).
    #[arg(long, global = true, env = "WEDGE_PACKAGE")]
    package: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the profile and suspend scanning.
    Profile,
    /// Configure decoders and resume scanning.
    Read {
        /// Decoder to enable, by name (repeatable).  Defaults to the configured set.
        #[arg(long = "type", value_name = "NAME")]
        types: Vec<String>,
        /// Extra BARCODE plugin parameter (repeatable).
        #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<ExtraParam>,
    },
    /// Suspend scanning.
    Suspend,
    /// Send a generic API action.
    Action {
        /// API extra key, e.g. com.symbol.datawedge.api.SOFT_SCAN_TRIGGER.
        #[arg(long)]
        key: String,
        /// Payload: a JSON object, or plain text sent as a string.
        #[arg(long)]
        data: String,
    },
    /// Simulate a scan broadcast and print the resulting events.
    Scan {
        /// Decoded data.
        #[arg(long)]
        data: String,
        /// Raw label-type code.
        #[arg(long, default_value = "LABEL-TYPE-QRCODE")]
        label_type: String,
        /// Scan source.
        #[arg(long, default_value = "scanner")]
        source: String,
    },
    /// List known label types.
    Labels,
}

fn parse_param(raw: &str) -> Result<ExtraParam, String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok(ExtraParam::new(key, value)),
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}

/// A JSON object is sent as a map; anything else as the literal text.
fn action_payload(data: &str) -> DynamicValue {
    match DynamicValue::from_json(data) {
        Ok(value) if value.is_map() => value,
        _ => DynamicValue::from(data),
    }
}

fn load_config(args: &Args) -> Result<BridgeConfig> {
    let mut config = match &args.config {
        Some(path) => BridgeConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => BridgeConfig::default(),
    };
    if let Some(profile) = &args.profile {
        config.profile_name = profile.clone();
    }
    if let Some(package) = &args.package {
        config.package_name = package.clone();
    }
    Ok(config)
}

fn print_labels() {
    for label in LABEL_TYPES {
        println!(
            "{:<32} {:<22} {:<10} {}",
            label.wire_code,
            label.human_name,
            label.category().as_str(),
            label.description
        );
    }
}

fn print_sent(tap: &mut mpsc::UnboundedReceiver<(Intent, Delivery)>) {
    while let Ok((intent, delivery)) = tap.try_recv() {
        println!("→ {} ({delivery:?})", intent.action);
        println!("{}", wire_to_json_text(&intent.extras));
    }
}

fn print_event(event: &BridgeEvent) -> Result<()> {
    let payload = event.payload().context("serializing event payload")?;
    println!("← {} {payload}", event.name());
    Ok(())
}

async fn simulate_scan(
    module: &mut ScannerModule,
    channel: &dyn BroadcastChannel,
    data: String,
    label_type: String,
    source: String,
) -> Result<()> {
    module.on_host_resume();
    let mut events = module.listen();

    let mut intent = Intent::new(keys::SCAN_ACTION).with_category(keys::DEFAULT_CATEGORY);
    intent
        .extras
        .put_string(keys::EXTRA_DATA_STRING, data)
        .put_string(keys::EXTRA_LABEL_TYPE, label_type)
        .put_string(keys::EXTRA_SOURCE, source);
    channel
        .send(intent, Delivery::Broadcast)
        .context("sending simulated scan")?;

    loop {
        let event = tokio::time::timeout(EVENT_TIMEOUT, events.recv())
            .await
            .context("timed out waiting for scan events")?
            .context("event channel closed")?;
        print_event(&event)?;
        if matches!(event, BridgeEvent::Scan(_)) {
            break;
        }
    }

    module.on_host_destroy();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    // Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!(?config, "configuration loaded");

    let command = match args.command {
        Command::Labels => {
            print_labels();
            return Ok(());
        }
        other => other,
    };

    let (loopback, mut tap) = LoopbackChannel::with_tap();
    let loopback = Arc::new(loopback);
    let channel: Arc<dyn BroadcastChannel> = loopback.clone();

    info!(profile = %config.profile_name, "wedge-bridge starting");
    let mut module = ScannerModule::new(config, Arc::clone(&channel));

    match command {
        Command::Profile | Command::Labels => {}
        Command::Read { types, params } => {
            module.read_request(&ReadRequest {
                decoders: types,
                params,
            });
        }
        Command::Suspend => module.cancel_read(),
        Command::Action { key, data } => {
            if key.is_empty() {
                bail!("--key must not be empty");
            }
            module.broadcast_action(&key, &action_payload(&data));
        }
        Command::Scan {
            data,
            label_type,
            source,
        } => {
            simulate_scan(&mut module, loopback.as_ref(), data, label_type, source).await?;
        }
    }

    print_sent(&mut tap);
    Ok(())
}

//! HostProbe CLI - host environment detection for HPC tooling

use anyhow::Context;
use clap::Parser;
use hostprobe::config::{CliArgs, Commands, LoadOptions};
use hostprobe::distro::{self, DistroId};
use hostprobe::error::HostProbeError;
use hostprobe::network;
use hostprobe::system::{self, PathResolver};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = CliArgs::parse();

    // Initialize logging; RUST_LOG takes precedence over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        match e.downcast_ref::<HostProbeError>() {
            Some(probe_err) if probe_err.is_fatal() => {
                eprintln!("Fatal: {:#}", e);
                std::process::exit(2);
            }
            _ => {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    match args.command.clone().unwrap_or(Commands::Show) {
        Commands::Show => cmd_show(&args),
        Commands::Distro { descriptor } => cmd_distro(&descriptor, args.json),
        Commands::Network => cmd_network(&args),
        Commands::PersistNetwork => cmd_persist_network(&args),
    }
}

fn cmd_show(args: &CliArgs) -> anyhow::Result<()> {
    let options = LoadOptions::from_cli(args);
    let host_distro = args
        .distro
        .clone()
        .or_else(distro::host_descriptor)
        .unwrap_or_default();

    let config = system::load(&options)
        .context("unable to load the system configuration")?
        .with_host_distro(host_distro)
        .with_flags(args.verbose, args.debug);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    config.display();

    if args.verbose {
        let id = DistroId::parse(config.host_distro());
        println!("Host distribution: {}", id);
    }

    Ok(())
}

fn cmd_distro(descriptor: &str, json: bool) -> anyhow::Result<()> {
    let id = DistroId::parse(descriptor);

    if json {
        println!("{}", serde_json::to_string_pretty(&id)?);
        return Ok(());
    }

    if id.is_unknown() {
        println!("{}: unknown distribution descriptor", descriptor);
        return Ok(());
    }

    println!("Distribution:");
    println!("\tName: {}", id.name);
    println!("\tVersion: {}", if id.has_version() { id.version.as_str() } else { "unknown" });
    if !id.codename.is_empty() {
        println!("\tCodename: {}", id.codename);
    }
    println!("\tSlug: {}", distro::descriptor_slug(descriptor));

    Ok(())
}

fn cmd_network(args: &CliArgs) -> anyhow::Result<()> {
    let resolver = PathResolver::from_options(&LoadOptions::from_cli(args));
    let info = network::detect(&resolver)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        info.display();
    }

    Ok(())
}

fn cmd_persist_network(args: &CliArgs) -> anyhow::Result<()> {
    let resolver = PathResolver::from_options(&LoadOptions::from_cli(args));
    let info = network::detect(&resolver)?;

    if !info.has_config_to_persist() {
        println!("Nothing to save for the {} network configuration", info.id());
        return Ok(());
    }

    info.persist()
        .with_context(|| format!("unable to save the {} network configuration", info.id()))?;

    println!("Network configuration saved ({})", info.id());
    Ok(())
}

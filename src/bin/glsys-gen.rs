//! `glsys-gen`: list registry features or write a header/loader pair.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use glsys::emit::{EmissionPayload, EmitOptions, write_artifacts};
use glsys::resolve::{ResolveOptions, ResolvedFeature};

#[derive(Parser, Debug)]
#[command(name = "glsys-gen")]
#[command(about = "Generate a minimal function loader for one API registry feature")]
#[command(version)]
/// Command-line arguments.
struct Cli {
    /// Input registry XML
    #[arg(long, short = 'i', value_name = "FILE")]
    input: PathBuf,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// List every feature level in the registry
    ListFeatures,
    /// Write a header and loader module for one feature
    WriteGlsys {
        /// Feature name
        #[arg(long, value_name = "NAME")]
        feature: String,

        /// Feature level contained in the linked library
        #[arg(long, value_name = "NAME")]
        lib_feature: Option<String>,

        /// Output header filename
        #[arg(long = "header", value_name = "FILE")]
        header: PathBuf,

        /// Output C module filename
        #[arg(long = "c-module", value_name = "FILE")]
        c_module: PathBuf,

        /// Prefix marking type names inside function signatures
        #[arg(long, default_value = "GL")]
        type_prefix: String,

        /// Prefix of the generated loader symbols
        #[arg(long, default_value = "glsys")]
        loader_prefix: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let store = glsys::ingest_path(&cli.input)
        .with_context(|| format!("failed to ingest {}", cli.input.display()))?;

    match cli.command {
        None => {}
        Some(Command::ListFeatures) => {
            for (index, name) in glsys::list_features(&store).iter().enumerate() {
                println!("{:2} {name}", index + 1);
            }
        }
        Some(Command::WriteGlsys {
            feature,
            lib_feature,
            header,
            c_module,
            type_prefix,
            loader_prefix,
        }) => {
            let resolve_options = ResolveOptions { type_prefix };
            let emit_options = EmitOptions {
                loader_prefix,
                ..EmitOptions::default()
            };

            let resolved =
                ResolvedFeature::resolve(&store, &feature, lib_feature.as_deref(), &resolve_options)
                    .with_context(|| format!("failed to resolve feature {feature}"))?;
            let payload = EmissionPayload::build(&store, &resolved)?;
            write_artifacts(&payload, &header, &c_module, &emit_options).with_context(|| {
                format!("failed to write {} / {}", header.display(), c_module.display())
            })?;
            tracing::info!(
                "Wrote {} types, {} linked and {} loaded functions for {feature}",
                payload.types.len(),
                payload.linked.len(),
                payload.loaded.len()
            );
        }
    }
    Ok(())
}

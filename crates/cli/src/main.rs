//! Naked Pineapple Cart CLI - Drive the cart engine from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a product (repeat to raise its quantity)
//! np-cart add A1 --name Widget --price 9.99 --image /a1.png
//!
//! # Change quantities
//! np-cart inc A1
//! np-cart dec A1
//! np-cart change A1 -3
//!
//! # Remove one product, or everything
//! np-cart remove A1
//! np-cart clear
//!
//! # Inspect
//! np-cart show [--json]
//! np-cart buttons
//! np-cart export
//! ```
//!
//! Configuration comes from the environment; see [`config`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::cart::Mutation;
use config::{CliConfig, LogFormat};

#[derive(Parser)]
#[command(name = "np-cart")]
#[command(author, version, about = "Naked Pineapple cart tools")]
struct Cli {
    /// Directory holding the persisted cart (overrides `NP_CART_STORE_DIR`)
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product
    Add {
        /// Product ID
        id: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Unit price (e.g. 9.99)
        #[arg(short, long, allow_negative_numbers = true)]
        price: Decimal,

        /// Product image URL
        #[arg(short, long, default_value = "")]
        image: String,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: String,
    },
    /// Increase a product's quantity by one
    Inc {
        /// Product ID
        id: String,
    },
    /// Decrease a product's quantity by one (removes it at zero)
    Dec {
        /// Product ID
        id: String,
    },
    /// Change a product's quantity by a signed amount
    Change {
        /// Product ID
        id: String,

        /// Signed integer delta (e.g. 2 or -1)
        #[arg(allow_hyphen_values = true)]
        delta: String,
    },
    /// Remove every product
    Clear,
    /// Show the cart
    Show {
        /// Print the cart view as JSON
        #[arg(long)]
        json: bool,
    },
    /// List products whose add-to-cart button is disabled
    Buttons,
    /// Print the persisted cart exactly as stored
    Export,
}

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "np_cart=info,pineapple_cart=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn main() {
    let cli = Cli::parse();

    let mut config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    if let Some(dir) = cli.store_dir {
        config.store_dir = dir;
    }

    let mut stdout = std::io::stdout().lock();
    let result = run(cli.command, &config, &mut stdout);
    let _ = stdout.flush();

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &CliConfig, out: &mut impl Write) -> commands::CommandResult {
    let mutation = match command {
        Commands::Add {
            id,
            name,
            price,
            image,
        } => Mutation::Add {
            id,
            name,
            price,
            image_url: image,
        },
        Commands::Remove { id } => Mutation::Remove { id },
        Commands::Inc { id } => Mutation::Change {
            id,
            delta: "1".to_string(),
        },
        Commands::Dec { id } => Mutation::Change {
            id,
            delta: "-1".to_string(),
        },
        Commands::Change { id, delta } => Mutation::Change { id, delta },
        Commands::Clear => Mutation::Clear,
        Commands::Show { json } => return commands::show::show(config, json, out),
        Commands::Buttons => return commands::show::disabled_buttons(config, out),
        Commands::Export => return commands::show::export(config, out),
    };
    commands::cart::apply(config, mutation, out)
}

use crate::domain::model::{Order, OrderShipment};
use crate::utils::error::{RateError, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "carrier-rates")]
#[command(about = "Carrier rate quoting with a per-order rate cache")]
pub struct CliConfig {
    #[arg(long, short, default_value = "carrier-rates.toml")]
    pub config: PathBuf,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the carrier service codes accepted by `method.service`
    Services,
    /// Validate the configuration file
    Validate,
    /// Price an order shipment with the configured service
    Quote {
        /// JSON file holding `order` and `shipment`
        #[arg(long)]
        order: PathBuf,

        /// Skip the cached rates and ask the carrier again
        #[arg(long)]
        no_cache: bool,
    },
    /// Drop the cached rates of an order
    Invalidate {
        #[arg(long)]
        order_id: String,
    },
}

/// Input file of the `quote` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteInput {
    pub order: Order,
    pub shipment: OrderShipment,
}

impl QuoteInput {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let input: QuoteInput = serde_json::from_str(&content)?;

        if input.shipment.order_id != input.order.id {
            return Err(RateError::InvalidConfigValueError {
                field: "shipment.order_id".to_string(),
                value: input.shipment.order_id.clone(),
                reason: format!("Shipment does not belong to order {}", input.order.id),
            });
        }

        Ok(input)
    }
}

use anyhow::Context;
use carrier_rates::config::{Command, QuoteInput};
use carrier_rates::domain::model::format_cents;
use carrier_rates::domain::ports::ShippingPricing;
use carrier_rates::domain::services::{list_available_services, service_label};
use carrier_rates::utils::{logger, validation::Validate};
use carrier_rates::{select_price, CliConfig, PackageHookRegistry, RateEngine, TomlConfig};
use clap::Parser;

fn load_config(cli: &CliConfig) -> anyhow::Result<TomlConfig> {
    let config = TomlConfig::from_file(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e).with_context(|| format!("Invalid configuration in {}", cli.config.display()));
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    match &cli.command {
        Command::Services => {
            for (code, label) in list_available_services() {
                println!("{}\t{}", code, label);
            }
        }
        Command::Validate => {
            load_config(&cli)?;
            println!("✅ {} is valid", cli.config.display());
        }
        Command::Quote { order, no_cache } => {
            let config = load_config(&cli)?;
            let input = QuoteInput::from_file(order)
                .with_context(|| format!("Failed to read order file {}", order.display()))?;
            let engine = RateEngine::from_config(&config, PackageHookRegistry::default())?;

            if *no_cache {
                engine.rates.clear_rate_cache(&input.order.id).await;
            }

            let available = engine.method.is_available(&input.order, &input.shipment).await;

            match engine.rates.get_rates(&input.order, &input.shipment, false).await {
                Ok(rates) => {
                    for shipment in &rates.rated_shipments {
                        if let Some(cents) = select_price(&rates, &shipment.service_code) {
                            println!(
                                "{}\t{}\t{}",
                                shipment.service_code,
                                service_label(&shipment.service_code).unwrap_or("Unknown service"),
                                format_cents(cents)
                            );
                        }
                    }
                }
                Err(reason) => tracing::info!("No carrier rates: {}", reason),
            }

            let price = engine.method.compute_price(&input.order, &input.shipment).await;
            let code = engine.method.service_code();
            println!(
                "Service {} ({}) for order {}: {} ({})",
                code,
                service_label(code).unwrap_or("Unknown service"),
                input.order.id,
                if available { "available" } else { "unavailable" },
                format_cents(price)
            );
        }
        Command::Invalidate { order_id } => {
            let config = load_config(&cli)?;
            let engine = RateEngine::from_config(&config, PackageHookRegistry::default())?;
            engine.rates.clear_rate_cache(order_id).await;
            println!("🗑️  Cleared cached rates for order {}", order_id);
        }
    }

    Ok(())
}

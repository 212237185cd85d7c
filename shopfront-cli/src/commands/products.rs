//! Products command - browse the catalog.

use anyhow::Result;
use clap::Args;
use shopfront_store::Settings;
use tracing::info;

use crate::context::connect;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the products command.
#[derive(Args, Default)]
pub struct ProductsArgs {
    /// Only products whose name matches.
    #[arg(long, short)]
    pub search: Option<String>,

    /// Hide products that are out of stock.
    #[arg(long)]
    pub in_stock: bool,
}

/// Runs the products command.
pub async fn run(args: &ProductsArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let shop = connect(settings)?;
    let mut products = shop.catalog().list_products(args.search.as_deref()).await?;
    if args.in_stock {
        products.retain(|p| !p.is_out_of_stock());
    }
    info!(count = products.len(), "Listing products");

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            if products.is_empty() {
                println!("No products found");
                return Ok(());
            }

            println!("{}", formatter.format_products_header());
            println!("{}", "─".repeat(60));
            for product in &products {
                println!("{}", formatter.format_product_line(product));
            }
            println!();
            println!("Total: {} products", products.len());
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&products)?);
        }
    }

    Ok(())
}

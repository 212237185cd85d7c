//! Cart command - manage the local cart.
//!
//! Every subcommand except `sync` and `checkout` works offline on the saved
//! cart. `add` fetches the catalog once to take the product snapshot.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use shopfront_api::CheckoutReport;
use shopfront_store::{CartStore, Settings};
use tracing::info;

use crate::context::{connect, open_cart};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the cart command.
#[derive(Args, Default)]
pub struct CartArgs {
    /// Action to run; shows the cart when omitted.
    #[command(subcommand)]
    pub action: Option<CartAction>,
}

/// Cart subcommands.
#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart with totals.
    Show,

    /// Add a product, merging with an existing line.
    Add {
        /// Product id.
        product_id: String,

        /// Units to add.
        #[arg(long, short = 'n', default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },

    /// Remove a product's line.
    Remove {
        /// Product id.
        product_id: String,
    },

    /// Set a line's quantity; zero or less removes it.
    Set {
        /// Product id.
        product_id: String,

        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },

    /// Add one unit to a line.
    Inc {
        /// Product id.
        product_id: String,
    },

    /// Take one unit off a line; the line goes away at zero.
    Dec {
        /// Product id.
        product_id: String,
    },

    /// Empty the cart.
    Clear,

    /// Refresh product snapshots from the live catalog.
    Sync,

    /// Push the cart to the server; accepted lines leave the local cart.
    Checkout,
}

/// Runs the cart command.
pub async fn run(args: &CartArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let mut cart = open_cart();

    match &args.action {
        None | Some(CartAction::Show) => {}
        Some(CartAction::Add {
            product_id,
            quantity,
        }) => {
            let shop = connect(settings)?;
            let product = shop
                .catalog()
                .find_product(product_id)
                .await
                .with_context(|| format!("cannot add {product_id}"))?;
            cart.add_item(&product, *quantity);
            info!(product = %product_id, quantity, "Added to cart");
        }
        Some(CartAction::Remove { product_id }) => {
            ensure_line(&cart, product_id, cli);
            cart.remove_item(product_id);
        }
        Some(CartAction::Set {
            product_id,
            quantity,
        }) => {
            ensure_line(&cart, product_id, cli);
            cart.update_quantity(product_id, *quantity);
        }
        Some(CartAction::Inc { product_id }) => step(&mut cart, product_id, 1, cli),
        Some(CartAction::Dec { product_id }) => step(&mut cart, product_id, -1, cli),
        Some(CartAction::Clear) => cart.clear_cart(),
        Some(CartAction::Sync) => sync(&mut cart, cli, settings).await?,
        Some(CartAction::Checkout) => return checkout(&mut cart, cli, settings).await,
    }

    show(&cart, cli)
}

/// Warns when a line-level action targets a product not in the cart.
fn ensure_line(cart: &CartStore, product_id: &str, cli: &Cli) -> bool {
    let present = cart.get(product_id).is_some();
    if !present && !cli.quiet {
        eprintln!("{product_id} is not in the cart");
    }
    present
}

fn step(cart: &mut CartStore, product_id: &str, delta: i64, cli: &Cli) {
    if !ensure_line(cart, product_id, cli) {
        return;
    }
    let current = cart.get(product_id).map_or(0, |line| i64::from(line.quantity));
    cart.update_quantity(product_id, current + delta);
}

async fn sync(cart: &mut CartStore, cli: &Cli, settings: &Settings) -> Result<()> {
    if cart.is_empty() {
        return Ok(());
    }
    let shop = connect(settings)?;
    let catalog = shop.catalog().list_products(None).await?;
    let refreshed = cart.refresh_snapshots(&catalog);
    let missing = cart.len() - refreshed;

    info!(refreshed, missing, "Cart snapshots refreshed");
    if missing > 0 && !cli.quiet {
        eprintln!("{missing} product(s) are no longer in the catalog; their saved prices are kept");
    }
    Ok(())
}

async fn checkout(cart: &mut CartStore, cli: &Cli, settings: &Settings) -> Result<()> {
    if cart.is_empty() {
        bail!("the cart is empty");
    }

    let shop = connect(settings)?;
    let total = cart.total_price();
    let items = cart.total_items();
    let report = shop.cart().submit_lines(cart.lines()).await;
    settle_checkout(cart, &report);

    if let Some((product_id, err)) = report.failed {
        return Err(anyhow::Error::new(err).context(format!(
            "checkout stopped at {product_id} after {} accepted line(s); \
             {} line(s) remain in the local cart",
            report.submitted.len(),
            cart.len()
        )));
    }

    info!(items, total, "Checked out");

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_checkout(items, total));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = serde_json::json!({
                "submitted": report.submitted,
                "totalItems": items,
                "totalPrice": total,
            });
            println!("{}", formatter.format(&output)?);
        }
    }
    Ok(())
}

/// Drops every line the server accepted so a retry only sends the rest.
fn settle_checkout(cart: &mut CartStore, report: &CheckoutReport) {
    for product_id in &report.submitted {
        cart.remove_item(product_id);
    }
}

fn show(cart: &CartStore, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_cart(cart));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_cart(cart)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shopfront_api::ShopApi;
    use shopfront_core::{
        CartLine, Credentials, MemoryCartPersistence, MemoryCredentialStore, Product,
    };
    use shopfront_fetch::{
        ApiRequest, ApiResponse, AuthClient, ClientSettings, FetchError, StatusCode, Transport,
    };
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Server that answers with scripted statuses and records cart pushes.
    struct CartServer {
        statuses: Mutex<VecDeque<StatusCode>>,
        pushed: Mutex<Vec<String>>,
    }

    impl CartServer {
        fn new(statuses: Vec<StatusCode>) -> Arc<Self> {
            Arc::new(Self {
                statuses: Mutex::new(statuses.into()),
                pushed: Mutex::default(),
            })
        }

        fn pushed(&self) -> Vec<String> {
            self.pushed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for CartServer {
        async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, FetchError> {
            let product_id = request
                .body
                .as_ref()
                .and_then(|body| body["productId"].as_str())
                .unwrap_or_default()
                .to_string();
            self.pushed.lock().unwrap().push(product_id);
            let status = self
                .statuses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected request");
            Ok(ApiResponse::empty(status))
        }
    }

    fn shop(server: Arc<CartServer>) -> ShopApi {
        let credentials = MemoryCredentialStore::with_credentials(Credentials::new("at", "rt"));
        let client = AuthClient::new(server, Arc::new(credentials), ClientSettings::default());
        ShopApi::new(Arc::new(client))
    }

    fn cart_with(ids: &[&str]) -> (CartStore, MemoryCartPersistence) {
        let lines = ids
            .iter()
            .map(|id| CartLine::new(Product::new(*id, *id, 2.0), 1))
            .collect();
        let backend = MemoryCartPersistence::with_lines(lines);
        (CartStore::load(Box::new(backend.clone())), backend)
    }

    #[tokio::test]
    async fn test_partial_checkout_retry_sends_only_remaining_lines() {
        let server = CartServer::new(vec![
            StatusCode::OK,
            StatusCode::BAD_REQUEST,
            StatusCode::OK,
        ]);
        let shop = shop(server.clone());
        let (mut cart, backend) = cart_with(&["p1", "p2"]);

        let report = shop.cart().submit_lines(cart.lines()).await;
        settle_checkout(&mut cart, &report);

        assert_eq!(report.submitted, vec!["p1".to_string()]);
        assert_eq!(cart.len(), 1);
        assert!(cart.get("p2").is_some());
        let persisted = backend.persisted().unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].product_id, "p2");

        let retry = shop.cart().submit_lines(cart.lines()).await;
        settle_checkout(&mut cart, &retry);

        assert!(retry.is_complete());
        assert!(cart.is_empty());
        assert_eq!(server.pushed(), vec!["p1", "p2", "p2"]);
    }

    #[tokio::test]
    async fn test_full_checkout_empties_cart() {
        let server = CartServer::new(vec![StatusCode::OK, StatusCode::OK]);
        let shop = shop(server.clone());
        let (mut cart, backend) = cart_with(&["p1", "p2"]);

        let report = shop.cart().submit_lines(cart.lines()).await;
        settle_checkout(&mut cart, &report);

        assert!(report.is_complete());
        assert!(cart.is_empty());
        assert_eq!(backend.persisted(), Some(vec![]));
    }
}

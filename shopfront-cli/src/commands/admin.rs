//! Admin command - manage products, categories and users.
//!
//! The signed-in user's role is checked before anything is sent.

use anyhow::Result;
use clap::{Args, Subcommand};
use shopfront_core::{NewProduct, Registration};
use shopfront_store::Settings;
use tracing::info;

use crate::Cli;
use crate::context::connect;

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    /// Admin action.
    #[command(subcommand)]
    pub action: AdminAction,
}

/// Admin subcommands.
#[derive(Subcommand)]
pub enum AdminAction {
    /// Manage products.
    #[command(subcommand)]
    Product(ProductAction),

    /// Manage categories.
    #[command(subcommand)]
    Category(CategoryAction),

    /// Create another admin account.
    CreateAdmin {
        /// Account email.
        #[arg(long, short)]
        email: String,

        /// Account password.
        #[arg(long, short)]
        password: String,

        /// Display name.
        #[arg(long, short)]
        name: String,
    },

    /// Delete a user account.
    DeleteUser {
        /// User id.
        user_id: String,
    },
}

/// Product subcommands.
#[derive(Subcommand)]
pub enum ProductAction {
    /// Create a product.
    Create {
        /// Product name.
        #[arg(long)]
        name: String,

        /// Description.
        #[arg(long, default_value = "")]
        description: String,

        /// Unit price.
        #[arg(long)]
        price: f64,

        /// Image URL.
        #[arg(long, default_value = "")]
        image: String,

        /// Category id.
        #[arg(long)]
        category: String,

        /// Units in stock.
        #[arg(long)]
        stock: Option<u32>,
    },

    /// Change a product's price.
    Price {
        /// Product id.
        id: String,
        /// New unit price.
        price: f64,
    },

    /// Change a product's image.
    Image {
        /// Product id.
        id: String,
        /// New image URL.
        url: String,
    },

    /// Delete a product.
    Delete {
        /// Product id.
        id: String,
    },
}

/// Category subcommands.
#[derive(Subcommand)]
pub enum CategoryAction {
    /// Create a category.
    Create {
        /// Category name.
        name: String,
    },

    /// Rename a category.
    Rename {
        /// Category id.
        id: String,
        /// New name.
        name: String,
    },
}

/// Runs the admin command.
pub async fn run(args: &AdminArgs, cli: &Cli, settings: &Settings) -> Result<()> {
    let shop = connect(settings)?;
    let admin = shop.admin().await?;

    let done = match &args.action {
        AdminAction::Product(action) => match action {
            ProductAction::Create {
                name,
                description,
                price,
                image,
                category,
                stock,
            } => {
                let product = NewProduct {
                    name: name.clone(),
                    description: description.clone(),
                    price: *price,
                    image: image.clone(),
                    category_id: category.clone(),
                    stock: *stock,
                };
                admin.create_product(&product).await?;
                format!("Created product {name}")
            }
            ProductAction::Price { id, price } => {
                admin.update_price(id, *price).await?;
                format!("Price of {id} set to {price:.2}")
            }
            ProductAction::Image { id, url } => {
                admin.update_image(id, url).await?;
                format!("Image of {id} updated")
            }
            ProductAction::Delete { id } => {
                admin.delete_product(id).await?;
                format!("Deleted product {id}")
            }
        },
        AdminAction::Category(action) => match action {
            CategoryAction::Create { name } => {
                admin.create_category(name).await?;
                format!("Created category {name}")
            }
            CategoryAction::Rename { id, name } => {
                admin.rename_category(id, name).await?;
                format!("Renamed category {id} to {name}")
            }
        },
        AdminAction::CreateAdmin {
            email,
            password,
            name,
        } => {
            let registration = Registration {
                email: email.clone(),
                password: password.clone(),
                name: name.clone(),
            };
            admin.create_admin(&registration).await?;
            format!("Created admin {email}")
        }
        AdminAction::DeleteUser { user_id } => {
            admin.delete_user(user_id).await?;
            format!("Deleted user {user_id}")
        }
    };

    info!("{done}");
    if !cli.quiet {
        println!("{done}");
    }
    Ok(())
}

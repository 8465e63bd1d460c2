//! Menu management commands.
//!
//! # Usage
//!
//! ```bash
//! bk-cli menu list
//! bk-cli menu create --name-en "Beef Kala Bhuna" --price 48
//! bk-cli menu update 7 --name-en "Beef Kala Bhuna" --price 52 --available false
//! bk-cli menu delete 7
//! ```

use barakah_client::types::MenuItemInput;
use barakah_core::{CategoryId, MenuItemId, PriceCny};

use super::{CliError, authed_backend};

/// Fields shared by create and update.
#[derive(Debug, Clone)]
pub struct MenuItemArgs {
    pub name_en: String,
    pub name_bn: Option<String>,
    pub description: Option<String>,
    pub price: PriceCny,
    pub category: Option<CategoryId>,
    pub available: bool,
    pub tags: Vec<String>,
}

impl MenuItemArgs {
    fn into_input(self) -> MenuItemInput {
        MenuItemInput {
            category_id: self.category,
            name_en: self.name_en,
            name_bn: self.name_bn,
            description: self.description,
            price_cny: self.price,
            is_available: self.available,
            tags: if self.tags.is_empty() {
                None
            } else {
                Some(self.tags)
            },
        }
    }
}

/// List menu items.
#[allow(clippy::print_stdout)]
pub async fn list() -> Result<(), CliError> {
    for item in authed_backend()?.menu_items().await? {
        println!(
            "#{} {} \u{a5}{} {}{}",
            item.id,
            item.name_en,
            item.price_cny.display(),
            if item.is_available { "available" } else { "unavailable" },
            item.tags
                .map(|tags| format!(" [{}]", tags.join(", ")))
                .unwrap_or_default(),
        );
    }
    Ok(())
}

/// Create a menu item.
#[allow(clippy::print_stdout)]
pub async fn create(args: MenuItemArgs) -> Result<(), CliError> {
    let item = authed_backend()?.create_menu_item(&args.into_input()).await?;
    println!("Created #{} {}", item.id, item.name_en);
    Ok(())
}

/// Update a menu item.
#[allow(clippy::print_stdout)]
pub async fn update(id: MenuItemId, args: MenuItemArgs) -> Result<(), CliError> {
    let item = authed_backend()?
        .update_menu_item(id, &args.into_input())
        .await?;
    println!("Updated #{} {}", item.id, item.name_en);
    Ok(())
}

/// Delete a menu item.
#[allow(clippy::print_stdout)]
pub async fn delete(id: MenuItemId) -> Result<(), CliError> {
    authed_backend()?.delete_menu_item(id).await?;
    println!("Deleted #{id}");
    Ok(())
}

//! Cart files: the lines a customer picked, as TOML or JSON.
//!
//! ```toml
//! [[items]]
//! product_id = "prod-brochette"
//! name = "Brochette"
//! price = 1000
//! quantity = 2
//! category = "grill"
//! modifiers = ["extra pili-pili"]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use brms_commerce::cart::CartItem;
use brms_commerce::catalog::MenuItem;
use brms_commerce::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A cart file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartFile {
    #[serde(default)]
    pub items: Vec<CartFileItem>,
}

/// One line of a cart file. `price` is in minor units of the configured
/// currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartFileItem {
    pub product_id: String,
    pub name: String,
    pub price: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

fn default_quantity() -> i64 {
    1
}

impl CartFile {
    /// Load a cart file. `.json` files are JSON, everything else TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read cart file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON cart: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML cart: {}", path.display()))
        }
    }

    /// Turn every line into a cart item priced in `currency`.
    pub fn to_cart_items(&self, currency: Currency) -> Result<Vec<CartItem>> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, line)| {
                line.to_cart_item(currency)
                    .with_context(|| format!("Invalid cart line {} ({})", i + 1, line.name))
            })
            .collect()
    }
}

impl CartFileItem {
    fn to_cart_item(&self, currency: Currency) -> Result<CartItem> {
        let mut menu_item = MenuItem::new(
            self.product_id.as_str(),
            self.name.as_str(),
            Money::new(self.price, currency),
            self.category.as_str(),
        )
        .with_description(self.description.as_str());
        menu_item.image = self.image.clone();

        let mut item = menu_item.to_cart_item(self.quantity)?;
        for modifier in &self.modifiers {
            item = item.with_modifier(modifier.as_str());
        }
        if let Some(note) = &self.special_instructions {
            item = item.with_special_instructions(note.as_str());
        }
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_toml_cart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        fs::write(
            &path,
            r#"
[[items]]
product_id = "prod-brochette"
name = "Brochette"
price = 1000
quantity = 2
category = "grill"
modifiers = ["extra pili-pili"]

[[items]]
product_id = "prod-fanta"
name = "Fanta"
price = 800
"#,
        )
        .unwrap();

        let items = CartFile::load(&path)
            .unwrap()
            .to_cart_items(Currency::RWF)
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].total_price, Money::rwf(2000));
        assert_eq!(items[0].modifiers, vec!["extra pili-pili"]);
        assert_eq!(items[1].quantity, 1);
    }

    #[test]
    fn test_load_json_cart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        fs::write(
            &path,
            r#"{"items": [{"product_id": "p1", "name": "Tea", "price": 500, "quantity": 3, "special_instructions": "no sugar"}]}"#,
        )
        .unwrap();

        let items = CartFile::load(&path)
            .unwrap()
            .to_cart_items(Currency::RWF)
            .unwrap();
        assert_eq!(items[0].special_instructions.as_deref(), Some("no sugar"));
        assert_eq!(items[0].total_price, Money::rwf(1500));
    }

    #[test]
    fn test_bad_quantity_names_the_line() {
        let file = CartFile {
            items: vec![CartFileItem {
                product_id: "p1".into(),
                name: "Tea".into(),
                price: 500,
                quantity: 0,
                category: String::new(),
                description: String::new(),
                image: None,
                modifiers: Vec::new(),
                special_instructions: None,
            }],
        };
        let err = file.to_cart_items(Currency::RWF).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid cart line 1 (Tea)"));
    }
}

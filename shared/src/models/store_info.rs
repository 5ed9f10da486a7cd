//! Store configuration snapshot models

use serde::{Deserialize, Serialize};

use crate::models::product::CatalogProduct;
use crate::response::{DynamicConfigResponse, FormResponse};

/// Widget type names whose properties carry product cards.
pub const PRODUCT_WIDGET_NAMES: [&str; 6] = [
    "product-grid",
    "product-list",
    "product-carousel",
    "featured-products",
    "best-sellers",
    "new-arrivals",
];

/// Store contact details (singleton per tenant).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Admin-configured theming for the storefront header and banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSettings {
    #[serde(default = "default_header_color")]
    pub header_color: String,
    #[serde(default = "default_banner_text")]
    pub banner_text: String,
    #[serde(default = "default_banner_button_text")]
    pub banner_button_text: String,
}

fn default_header_color() -> String {
    "#2196F3".to_string()
}

fn default_banner_text() -> String {
    "Welcome to our store".to_string()
}

fn default_banner_button_text() -> String {
    "Shop Now".to_string()
}

fn default_store_name() -> String {
    "My Store".to_string()
}

impl Default for DesignSettings {
    fn default() -> Self {
        Self {
            header_color: default_header_color(),
            banner_text: default_banner_text(),
            banner_button_text: default_banner_button_text(),
        }
    }
}

/// Full pulled catalog + store configuration at a point in time.
///
/// Every field has a renderable default so the storefront always has
/// something to show, even before the first successful pull.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default = "default_store_name")]
    pub store_name: String,
    #[serde(default)]
    pub store_info: StoreInfo,
    #[serde(default)]
    pub design: DesignSettings,
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self {
            store_name: default_store_name(),
            store_info: StoreInfo::default(),
            design: DesignSettings::default(),
            products: Vec::new(),
        }
    }
}

impl StoreSnapshot {
    /// Build a snapshot from the admin form payload.
    ///
    /// Products are collected from `widgets[].properties.productCards` for
    /// widgets whose name is in [`PRODUCT_WIDGET_NAMES`]; everything else
    /// in the widget tree is presentation and ignored here.
    pub fn from_form(form: FormResponse) -> Self {
        let products = form
            .widgets
            .into_iter()
            .filter(|widget| PRODUCT_WIDGET_NAMES.contains(&widget.name.as_str()))
            .flat_map(|widget| widget.properties.product_cards)
            .collect();

        Self {
            store_name: if form.shop_name.is_empty() {
                default_store_name()
            } else {
                form.shop_name
            },
            store_info: form.store_info,
            design: form.design_settings,
            products,
        }
    }

    /// Build a snapshot from the legacy dynamic-config payload, which only
    /// carries product cards; store configuration keeps the given base.
    pub fn from_dynamic(base: StoreSnapshot, dynamic: DynamicConfigResponse) -> Self {
        Self {
            products: dynamic.config.product_cards,
            ..base
        }
    }

    pub fn product(&self, id: &str) -> Option<&CatalogProduct> {
        self.products.iter().find(|p| p.id == id)
    }
}

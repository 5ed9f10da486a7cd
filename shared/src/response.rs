//! Backend response envelopes
//!
//! The admin backend wraps everything in ad-hoc `{success, ...}` JSON
//! shapes. Each payload type here parses tolerantly: a missing field is a
//! default, never an error, so a half-configured store still renders.

use serde::{Deserialize, Serialize};

use crate::models::product::CatalogProduct;
use crate::models::store_info::{DesignSettings, StoreInfo};

/// `GET /api/admin/app-info` — tenant auto-detection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppInfoResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: AppInfoData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfoData {
    #[serde(default)]
    pub admin_id: String,
}

/// `GET /api/get-form?adminId=<id>` — the full snapshot source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub shop_name: String,
    #[serde(default)]
    pub store_info: StoreInfo,
    #[serde(default)]
    pub design_settings: DesignSettings,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

/// One entry of the admin page-builder widget tree. Only the name and any
/// embedded product cards matter to the core; layout is UI territory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Widget {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: WidgetProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetProperties {
    #[serde(default)]
    pub product_cards: Vec<CatalogProduct>,
}

/// `GET /api/app/dynamic/<adminId>` — the legacy snapshot shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DynamicConfigResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub config: DynamicConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicConfig {
    #[serde(default)]
    pub product_cards: Vec<CatalogProduct>,
}

/// `GET /api/admin/splash?adminId=<id>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplashResponse {
    #[serde(default)]
    pub app_name: String,
}

/// `POST /api/login` — the core only consumes the success flag; token
/// lifecycle is owned by the excluded auth layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
}

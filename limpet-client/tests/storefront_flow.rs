//! End-to-end storefront state flow: snapshot → cart/wishlist → bill.

use limpet_client::store::cart::MAX_CART_UNITS;
use limpet_client::{CartStore, WishlistStore};
use shared::models::StoreSnapshot;
use shared::pricing;
use shared::response::FormResponse;

const FORM_JSON: &str = r##"{
    "success": true,
    "shopName": "Corner Shop",
    "storeInfo": {"address": "1 Main St", "email": "hello@corner.shop", "phone": "555-0101"},
    "designSettings": {"headerColor": "#112233", "bannerText": "Monsoon Sale"},
    "widgets": [
        {"name": "hero-banner", "properties": {}},
        {"name": "product-grid", "properties": {"productCards": [
            {"id": "shirt", "name": "Shirt", "price": "₹100", "discountPercent": 10.0, "stock": 5},
            {"id": "cap", "name": "Cap", "price": "₹50", "discountPrice": "₹40", "stock": 2}
        ]}}
    ]
}"##;

fn snapshot() -> StoreSnapshot {
    let form: FormResponse = serde_json::from_str(FORM_JSON).unwrap();
    StoreSnapshot::from_form(form)
}

#[test]
fn test_snapshot_to_cart_bill() {
    let snapshot = snapshot();
    assert_eq!(snapshot.store_name, "Corner Shop");
    assert_eq!(snapshot.design.banner_text, "Monsoon Sale");
    assert_eq!(snapshot.products.len(), 2);

    let mut cart = CartStore::with_rates(18.0, 0.0);
    let shirt = snapshot.product("shirt").unwrap();
    let cap = snapshot.product("cap").unwrap();

    cart.add(shirt.to_cart_item(2)).unwrap();
    cart.add(cap.to_cart_item(1)).unwrap();

    let totals = cart.totals();
    assert!((totals.subtotal - 220.0).abs() < 1e-9);
    assert!((totals.total_discount - 30.0).abs() < 1e-9);
    assert!((totals.tax - 39.6).abs() < 1e-9);
    assert!((totals.total - 259.6).abs() < 1e-9);

    // Below the free-shipping threshold the fee applies
    assert!((cart.total_with_shipping(40.0, 500.0) - 299.6).abs() < 1e-9);

    // Currency display comes straight from the admin-entered text
    assert_eq!(shirt.currency_symbol(), "₹");
    assert_eq!(
        pricing::format_amount(totals.total, shirt.currency_symbol()),
        "₹259.60"
    );
}

#[test]
fn test_cart_cap_across_products() {
    let snapshot = snapshot();
    let shirt = snapshot.product("shirt").unwrap();
    let cap = snapshot.product("cap").unwrap();

    let mut cart = CartStore::new();
    cart.add(shirt.to_cart_item(MAX_CART_UNITS - 1)).unwrap();
    assert!(cart.add(cap.to_cart_item(2)).is_err());
    cart.add(cap.to_cart_item(1)).unwrap();
    assert_eq!(cart.total_quantity(), MAX_CART_UNITS);
}

#[test]
fn test_wishlist_from_snapshot_products() {
    let snapshot = snapshot();
    let mut wishlist = WishlistStore::new();

    for product in &snapshot.products {
        wishlist.add(product.to_wishlist_item());
    }
    // Re-adding the whole catalog changes nothing
    for product in &snapshot.products {
        assert!(!wishlist.add(product.to_wishlist_item()));
    }

    assert_eq!(wishlist.len(), 2);
    // Wishlist carries effective prices
    let shirt = wishlist
        .items()
        .iter()
        .find(|e| e.product_id == "shirt")
        .unwrap();
    assert!((shirt.price - 90.0).abs() < 1e-9);
}

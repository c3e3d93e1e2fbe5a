//! # Demo Data
//!
//! A small, realistic shoe shop: three suppliers, six products and a week
//! of sales, so every screen has something to show on first start.
//!
//! Sale amounts come from `sole_core::pricing`, so a demo snapshot passes
//! the same checks as a restored backup.

use chrono::{DateTime, Duration, Utc};
use sole_core::pricing::compute_breakdown;
use sole_core::types::{
    Discount, PaymentMethod, Product, Role, Sale, SaleItem, StockLog, StockLogReason,
    StoreSettings, Supplier, UNKNOWN_PRODUCT_NAME,
};
use sole_core::StoreState;

/// `(product index, quantity, days ago, payment)`
const DEMO_SALES: &[(usize, i64, i64, PaymentMethod)] = &[
    (0, 2, 1, PaymentMethod::CreditCard),
    (1, 1, 1, PaymentMethod::Cash),
    (2, 1, 2, PaymentMethod::CreditCard),
    (4, 3, 3, PaymentMethod::CreditCard),
    (0, 1, 4, PaymentMethod::Cash),
    (5, 1, 5, PaymentMethod::CreditCard),
    (1, 2, 6, PaymentMethod::Cash),
    (3, 1, 7, PaymentMethod::CreditCard),
];

/// Settings of the demo store.
pub fn demo_settings() -> StoreSettings {
    StoreSettings {
        store_name: "Kubilay Shoes".to_string(),
        phone: "0212 123 45 67".to_string(),
        address: "İstiklal Cad. No:1, Beyoğlu/İstanbul".to_string(),
        vat_rate_bps: 2000,
        low_stock_threshold: 5,
        max_staff_discount_bps: 2000,
    }
}

pub fn demo_suppliers() -> Vec<Supplier> {
    let supplier = |id: &str, company: &str, contact: &str, phone: &str, email: &str, address: &str| {
        Supplier {
            id: id.to_string(),
            company_name: company.to_string(),
            contact_person: contact.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            address: address.to_string(),
        }
    };

    vec![
        supplier("sup1", "Ayakkabı Dünyası A.Ş.", "Ahmet Yılmaz", "0212 555 1122", "ahmet@ad.com", "Güngören, İstanbul"),
        supplier("sup2", "Spor Giyim Ltd.", "Fatma Kaya", "0216 444 3344", "fatma.kaya@sporltd.com", "Kadıköy, İstanbul"),
        supplier("sup3", "Deri Mamülleri Co.", "Mehmet Öztürk", "0312 222 5566", "mehmet@derico.com", "Çankaya, Ankara"),
    ]
}

pub fn demo_products() -> Vec<Product> {
    // (name, brand, model, color, size, purchase, selling, stock, supplier)
    let rows: [(&str, &str, &str, &str, f32, i64, i64, i64, &str); 6] = [
        ("Koşu Ayakkabısı", "Nike", "Air Max", "Siyah", 42.0, 800, 1500, 15, "sup2"),
        ("Sneaker", "Adidas", "Superstar", "Beyaz", 41.0, 600, 1200, 25, "sup2"),
        ("Bot", "Caterpillar", "Colorado", "Kahverengi", 43.0, 1200, 2200, 8, "sup1"),
        ("Sandalet", "Birkenstock", "Arizona", "Mavi", 38.0, 400, 850, 3, "sup1"),
        ("Klasik Ayakkabı", "Derimod", "Oxford", "Siyah", 44.0, 900, 1750, 12, "sup3"),
        ("Basketbol Ayakkabısı", "Jordan", "Retro 4", "Kırmızı/Siyah", 45.0, 1500, 3000, 5, "sup2"),
    ];

    rows.iter()
        .enumerate()
        .map(
            |(i, (name, brand, model, color, size, purchase, selling, stock, supplier))| Product {
                id: (i + 1).to_string(),
                name: name.to_string(),
                brand: brand.to_string(),
                model: model.to_string(),
                color: color.to_string(),
                size: *size,
                purchase_price_cents: purchase * 100,
                selling_price_cents: selling * 100,
                stock: *stock,
                barcode: Some(format!("869123456789{}", i)),
                supplier_id: Some(supplier.to_string()),
            },
        )
        .collect()
}

/// The full demo store as of `now`.
///
/// Sales are dated 1 to 7 days before `now`, newest first, each with a
/// matching sale stock log. Two opening stock-in entries sit 30 days back.
pub fn demo_state(now: DateTime<Utc>) -> StoreState {
    let products = demo_products();
    let settings = demo_settings();

    let mut sales = Vec::with_capacity(DEMO_SALES.len());
    let mut stock_logs = Vec::new();

    for (index, (product_idx, quantity, days_ago, payment)) in DEMO_SALES.iter().enumerate() {
        let Some(product) = products.get(*product_idx) else {
            continue;
        };
        let timestamp = now - Duration::days(*days_ago);
        let items = vec![SaleItem::from_product(product, *quantity)];
        let breakdown = compute_breakdown(&items, Discount::None, Role::Admin, &settings);

        let id = format!("sale-{}", index + 1);
        stock_logs.push(StockLog {
            id: format!("log-{}-{}", id, product.id),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            change: -quantity,
            timestamp,
            reason: StockLogReason::Sale,
        });
        sales.push(Sale {
            id,
            items,
            subtotal_cents: breakdown.subtotal.cents(),
            discount: breakdown.discount,
            discount_cents: breakdown.discount_amount.cents(),
            vat_cents: breakdown.vat.cents(),
            total_cents: breakdown.total.cents(),
            payment_method: *payment,
            timestamp,
        });
    }

    let opening = now - Duration::days(30);
    for (n, (product_idx, change)) in [(0usize, 20i64), (1, 30)].into_iter().enumerate() {
        let name = products
            .get(product_idx)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| UNKNOWN_PRODUCT_NAME.to_string());
        stock_logs.push(StockLog {
            id: format!("log-add-{}", n + 1),
            product_id: (product_idx + 1).to_string(),
            product_name: name,
            change,
            timestamp: opening,
            reason: StockLogReason::StockIn,
        });
    }

    StoreState {
        products,
        sales,
        stock_logs,
        settings,
        suppliers: demo_suppliers(),
    }
}

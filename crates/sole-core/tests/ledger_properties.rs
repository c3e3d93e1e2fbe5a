use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use sole_core::pricing::compute_breakdown;
use sole_core::types::{Discount, PaymentMethod, Product, Role, SaleItem, StoreSettings};
use sole_core::validation::validate_snapshot;
use sole_core::{apply, LedgerEnv, Operation, SaleRequest, StoreState};

struct CountingEnv(u64);

impl LedgerEnv for CountingEnv {
    fn next_id(&mut self) -> String {
        self.0 += 1;
        format!("t-{}", self.0)
    }

    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }
}

fn product(id: &str, stock: i64, price: i64) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Model {}", id),
        brand: "Vans".to_string(),
        model: "Old Skool".to_string(),
        color: "Black".to_string(),
        size: 40.5,
        purchase_price_cents: price / 2,
        selling_price_cents: price,
        stock,
        barcode: None,
        supplier_id: None,
    }
}

fn items_strategy() -> impl Strategy<Value = Vec<SaleItem>> {
    proptest::collection::vec((1i64..20, 0i64..500_000), 1..6).prop_map(|lines| {
        lines
            .into_iter()
            .enumerate()
            .map(|(i, (qty, price))| SaleItem::new(format!("p{}", i), qty, price))
            .collect()
    })
}

fn discount_strategy() -> impl Strategy<Value = Discount> {
    prop_oneof![
        Just(Discount::None),
        (0u32..=10_000).prop_map(Discount::Percentage),
        (0i64..3_000_000).prop_map(Discount::Amount),
    ]
}

fn settings(vat_bps: u32, cap_bps: u32) -> StoreSettings {
    StoreSettings {
        vat_rate_bps: vat_bps,
        max_staff_discount_bps: cap_bps,
        ..StoreSettings::default()
    }
}

/// `amount × bps / 10000` rounded half up, for non-negative amounts.
fn share(amount: i128, bps: u32) -> i128 {
    (amount * bps as i128 + 5_000) / 10_000
}

fn plain_subtotal(items: &[SaleItem]) -> i128 {
    items
        .iter()
        .map(|i| i.quantity as i128 * i.unit_price_cents as i128)
        .sum()
}

proptest! {
    #[test]
    fn breakdown_is_internally_consistent(
        items in items_strategy(),
        discount in discount_strategy(),
        vat in 0u32..=10_000,
        cap in 0u32..=10_000,
        staff in any::<bool>(),
    ) {
        let role = if staff { Role::Staff } else { Role::Admin };
        let b = compute_breakdown(&items, discount, role, &settings(vat, cap));

        let expected_subtotal: i64 = items.iter().map(|i| i.quantity * i.unit_price_cents).sum();
        prop_assert_eq!(b.subtotal.cents(), expected_subtotal);
        prop_assert!(b.discount_amount.cents() >= 0);
        prop_assert!(b.discount_amount <= b.subtotal);
        prop_assert_eq!(b.discounted_subtotal, b.subtotal - b.discount_amount);
        prop_assert_eq!(b.total, b.discounted_subtotal + b.vat);
        prop_assert!(b.total.cents() >= 0);
    }

    #[test]
    fn no_discount_means_subtotal_plus_vat(items in items_strategy(), vat in 0u32..=10_000) {
        let b = compute_breakdown(&items, Discount::None, Role::Admin, &settings(vat, 0));
        prop_assert!(b.discount_amount.is_zero());
        prop_assert_eq!(b.discounted_subtotal, b.subtotal);

        let subtotal = plain_subtotal(&items);
        prop_assert_eq!(b.vat.cents() as i128, share(subtotal, vat));
        prop_assert_eq!(b.total.cents() as i128, subtotal + share(subtotal, vat));
    }

    #[test]
    fn percentage_discount_is_rounded_share_of_subtotal(
        items in items_strategy(),
        pct in 0u32..=10_000,
        vat in 0u32..=10_000,
    ) {
        let b = compute_breakdown(&items, Discount::Percentage(pct), Role::Admin, &settings(vat, 0));

        let subtotal = plain_subtotal(&items);
        let discount = share(subtotal, pct);
        let discounted = subtotal - discount;
        prop_assert_eq!(b.discount_amount.cents() as i128, discount);
        prop_assert_eq!(b.vat.cents() as i128, share(discounted, vat));
        prop_assert_eq!(b.total.cents() as i128, discounted + share(discounted, vat));
    }

    #[test]
    fn amount_discount_is_taken_as_given_up_to_subtotal(
        items in items_strategy(),
        seed in any::<u64>(),
        excess in 1i64..1_000_000,
        staff in any::<bool>(),
    ) {
        let role = if staff { Role::Staff } else { Role::Admin };
        let subtotal = plain_subtotal(&items) as i64;
        let within = (seed % (subtotal as u64 + 1)) as i64;

        let b = compute_breakdown(&items, Discount::Amount(within), role, &settings(2000, 0));
        prop_assert_eq!(b.discount_amount.cents(), within);
        prop_assert!(!b.capped_by_role);

        let b = compute_breakdown(&items, Discount::Amount(subtotal + excess), role, &settings(2000, 0));
        prop_assert_eq!(b.discount_amount.cents(), subtotal);
        prop_assert!(b.total.is_zero());
    }

    #[test]
    fn staff_percentage_never_exceeds_cap(
        items in items_strategy(),
        requested in 0u32..=10_000,
        cap in 0u32..=10_000,
    ) {
        let b = compute_breakdown(&items, Discount::Percentage(requested), Role::Staff, &settings(2000, cap));
        match b.discount {
            Discount::Percentage(bps) => prop_assert!(bps <= cap),
            other => prop_assert!(false, "unexpected discount {:?}", other),
        }
        prop_assert_eq!(b.capped_by_role, requested > cap);
    }

    #[test]
    fn recorded_sale_moves_stock_and_logs(
        quantities in proptest::collection::vec(1i64..10, 1..5),
        discount in discount_strategy(),
    ) {
        let mut env = CountingEnv(0);
        let products: Vec<Product> = quantities
            .iter()
            .enumerate()
            .map(|(i, _)| product(&format!("p{}", i), 10, 12_500))
            .collect();
        let state = StoreState { products, ..StoreState::default() };
        let items: Vec<SaleItem> = quantities
            .iter()
            .enumerate()
            .map(|(i, q)| SaleItem::new(format!("p{}", i), *q, 12_500))
            .collect();

        let t = apply(
            &state,
            Operation::RecordSale(SaleRequest {
                items,
                payment_method: PaymentMethod::CreditCard,
                discount,
                acting_role: Role::Admin,
            }),
            &mut env,
        )
        .unwrap();

        prop_assert!(t.skipped.is_empty());
        prop_assert_eq!(t.state.stock_logs.len(), quantities.len());
        for (i, q) in quantities.iter().enumerate() {
            let id = format!("p{}", i);
            let p = t.state.product(&id).unwrap();
            prop_assert_eq!(p.stock, 10 - q);
            prop_assert_eq!(t.state.logged_stock_change(&id), -q);
        }
        prop_assert!(validate_snapshot(&t.state).is_ok());
        // Input snapshot is untouched
        prop_assert!(state.sales.is_empty());
        prop_assert!(state.products.iter().all(|p| p.stock == 10));
    }
}

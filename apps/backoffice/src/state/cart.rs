//! # Cart State
//!
//! The checkout cart of the signed-in cashier.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>`: several commands touch it and
//! only one may change it at a time.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  UI Action                Command                 Cart State Change     │
//! │  ─────────                ───────                 ─────────────────     │
//! │                                                                         │
//! │  Pick search result ─────► add_to_cart() ───────► push, or qty + 1     │
//! │                                                   (never above stock)  │
//! │                                                                         │
//! │  − / + buttons ──────────► change_quantity() ───► qty ± 1 in 1..=stock │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_from_cart() ──► lines.remove(i)      │
//! │                                                                         │
//! │  Discount inputs ────────► set_discount() ──────► discount = d         │
//! │                                                                         │
//! │  Sale done / cancel ─────► clear_cart() ────────► lines.clear()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use sole_core::types::{Discount, Product, SaleItem};
use sole_core::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// A line in the cart.
///
/// `unit_price_cents` is frozen when the product is first added; later
/// price edits do not change a cart in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    /// "Brand Name - Size" label at time of adding
    pub label: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id.clone(),
            label: product.display_label(),
            unit_price_cents: product.selling_price_cents,
            quantity: 1,
        }
    }

    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }
}

/// The checkout cart.
///
/// ## Invariants
/// - Lines are unique by `product_id`
/// - `1 <= quantity <= stock` at the time of the last change
/// - At most `MAX_CART_ITEMS` lines
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub lines: Vec<CartLine>,
    /// Requested discount; the role cap is applied when pricing.
    pub discount: Discount,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Already in cart: quantity + 1, unless that exceeds stock
    /// - Not in cart: new line with quantity 1, if the product is in stock
    pub fn add_product(&mut self, product: &Product) -> Result<(), String> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            if line.quantity >= product.stock {
                return Err(format!("Only {} of {} in stock", product.stock, product.name));
            }
            if line.quantity >= MAX_ITEM_QUANTITY {
                return Err(format!("Quantity cannot exceed {}", MAX_ITEM_QUANTITY));
            }
            line.quantity += 1;
            return Ok(());
        }

        if !product.is_sellable() {
            return Err(format!("{} is out of stock", product.name));
        }
        if self.lines.len() >= MAX_CART_ITEMS {
            return Err(format!("Cart cannot have more than {} items", MAX_CART_ITEMS));
        }

        self.lines.push(CartLine::from_product(product));
        Ok(())
    }

    /// Moves a line's quantity by `delta`.
    ///
    /// The change is ignored when the result would leave `1..=stock`;
    /// returns whether the quantity changed.
    pub fn change_quantity(&mut self, product_id: &str, delta: i64, stock: i64) -> Result<bool, String> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or_else(|| format!("Product {} not in cart", product_id))?;

        let next = match line.quantity.checked_add(delta) {
            Some(next) if (1..=stock).contains(&next) && next <= MAX_ITEM_QUANTITY => next,
            _ => return Ok(false),
        };
        line.quantity = next;
        Ok(true)
    }

    /// Removes a line by product ID.
    pub fn remove(&mut self, product_id: &str) -> Result<(), String> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);

        if self.lines.len() == initial_len {
            Err(format!("Product {} not in cart", product_id))
        } else {
            Ok(())
        }
    }

    pub fn set_discount(&mut self, discount: Discount) {
        self.discount = discount;
    }

    /// Empties the cart and resets the discount.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount = Discount::None;
    }

    /// Sale lines as the ledger expects them.
    pub fn sale_items(&self) -> Vec<SaleItem> {
        self.lines
            .iter()
            .map(|l| SaleItem::new(l.product_id.clone(), l.quantity, l.unit_price_cents))
            .collect()
    }

    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Managed cart state.
#[derive(Debug)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let items = cart_state.with_cart(|cart| cart.sale_items());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_product(&product))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Shoe {}", id),
            brand: "Nike".to_string(),
            model: "Air Max".to_string(),
            color: "Siyah".to_string(),
            size: 42.0,
            purchase_price_cents: 80_000,
            selling_price_cents: 150_000,
            stock,
            barcode: None,
            supplier_id: None,
        }
    }

    #[test]
    fn test_add_same_product_increments_up_to_stock() {
        let mut cart = Cart::new();
        let product = test_product("1", 2);

        cart.add_product(&product).unwrap();
        cart.add_product(&product).unwrap();
        assert!(cart.add_product(&product).is_err());

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.lines[0].label, "Nike Shoe 1 - 42");
    }

    #[test]
    fn test_out_of_stock_product_is_refused() {
        let mut cart = Cart::new();
        assert!(cart.add_product(&test_product("1", 0)).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_stays_in_range() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 3)).unwrap();

        assert!(!cart.change_quantity("1", -1, 3).unwrap());
        assert!(cart.change_quantity("1", 2, 3).unwrap());
        assert!(!cart.change_quantity("1", 1, 3).unwrap());
        assert_eq!(cart.lines[0].quantity, 3);
        assert!(cart.change_quantity("missing", 1, 3).is_err());
    }

    #[test]
    fn test_extreme_delta_is_ignored() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 3)).unwrap();

        assert!(!cart.change_quantity("1", i64::MAX, 3).unwrap());
        assert!(!cart.change_quantity("1", i64::MIN, 3).unwrap());
        assert_eq!(cart.lines[0].quantity, 1);
    }

    #[test]
    fn test_price_is_frozen_when_added() {
        let mut cart = Cart::new();
        let mut product = test_product("1", 5);
        cart.add_product(&product).unwrap();

        product.selling_price_cents = 1;
        cart.add_product(&product).unwrap();

        let items = cart.sale_items();
        assert_eq!(items[0].unit_price_cents, 150_000);
        assert_eq!(items[0].total_price_cents, 300_000);
    }

    #[test]
    fn test_clear_resets_discount() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 5)).unwrap();
        cart.set_discount(Discount::Percentage(1000));
        cart.remove("1").unwrap();
        assert!(cart.remove("1").is_err());

        cart.clear();
        assert_eq!(cart.discount, Discount::None);
    }
}

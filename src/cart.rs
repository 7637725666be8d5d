//! Cart operations and their stock bookkeeping.
//!
//! A cart line is a live stock reservation: adding to the cart debits the
//! product's stock immediately, removing a line credits it back. Checkout
//! itself never touches stock — by the time an order is placed the units
//! were already reserved at add time.
//!
//! `clear_cart` intentionally does NOT credit stock back. The checkout path
//! relies on the reservation becoming permanent, and this mirrors the
//! behavior callers have always depended on. An abandoned-cart flow, if one
//! is ever added, must release reservations line by line via
//! [`Store::remove_from_cart`].

use crate::database::{CART_KEY, PRODUCTS_KEY};
use crate::error::{Result, StoreError};
use crate::models::CartItem;
use crate::store::Store;

impl Store {
    /// Current cart lines for the implicit single session.
    pub fn cart(&self) -> Result<Vec<CartItem>> {
        self.db.read_collection(CART_KEY)
    }

    /// Reserve `quantity` more units of a product into the cart.
    ///
    /// Fails with [`StoreError::NotFound`] when the product does not exist
    /// and [`StoreError::InsufficientStock`] when fewer than `quantity`
    /// units remain (the remaining stock already excludes units reserved by
    /// earlier adds). On success the product's stock is debited and the
    /// cart line is created or incremented.
    pub fn add_to_cart(&self, product_id: &str, quantity: u32) -> Result<()> {
        let mut products = self.products()?;
        let Some(product) = products.iter_mut().find(|p| p.id == product_id) else {
            return Err(StoreError::NotFound);
        };

        if product.stock < quantity {
            return Err(StoreError::InsufficientStock);
        }

        let mut cart = self.cart()?;
        match cart.iter_mut().find(|item| item.product_id == product_id) {
            Some(line) => {
                if product.stock < line.quantity + quantity {
                    return Err(StoreError::InsufficientStock);
                }
                line.quantity += quantity;
            }
            None => cart.push(CartItem {
                product_id: product_id.to_string(),
                quantity,
            }),
        }

        product.stock -= quantity;

        tracing::debug!(product_id, quantity, stock_left = product.stock, "added to cart");

        self.db.write_slot(PRODUCTS_KEY, &products)?;
        self.db.write_slot(CART_KEY, &cart)?;
        self.notify();
        Ok(())
    }

    /// Set a cart line to an absolute quantity, adjusting the reservation.
    ///
    /// The stock delta is `new_quantity - current`; growing the line fails
    /// with [`StoreError::InsufficientStock`] when not enough units remain.
    /// A `new_quantity` of 0 removes the line and releases the full
    /// reservation. Fails with [`StoreError::NotFound`] when either the
    /// product or the cart line is missing.
    pub fn update_cart_item_quantity(&self, product_id: &str, new_quantity: u32) -> Result<()> {
        let mut products = self.products()?;
        let mut cart = self.cart()?;

        let Some(product) = products.iter_mut().find(|p| p.id == product_id) else {
            return Err(StoreError::NotFound);
        };
        let Some(line) = cart.iter_mut().find(|item| item.product_id == product_id) else {
            return Err(StoreError::NotFound);
        };

        let delta = i64::from(new_quantity) - i64::from(line.quantity);
        if delta > 0 && i64::from(product.stock) < delta {
            return Err(StoreError::InsufficientStock);
        }

        // delta <= stock when positive, |delta| <= line.quantity <= reserved
        // when negative, so the subtraction cannot underflow.
        product.stock = (i64::from(product.stock) - delta) as u32;

        if new_quantity == 0 {
            cart.retain(|item| item.product_id != product_id);
        } else {
            line.quantity = new_quantity;
        }

        self.db.write_slot(PRODUCTS_KEY, &products)?;
        self.db.write_slot(CART_KEY, &cart)?;
        self.notify();
        Ok(())
    }

    /// Drop a cart line, crediting its full reserved quantity back to the
    /// product. Silently a no-op when the line is absent.
    pub fn remove_from_cart(&self, product_id: &str) -> Result<()> {
        let mut cart = self.cart()?;
        let Some(line) = cart.iter().find(|item| item.product_id == product_id) else {
            return Ok(());
        };
        let released = line.quantity;

        let mut products = self.products()?;
        // The product may have been deleted by an admin while reserved; the
        // reservation is then simply dropped.
        if let Some(product) = products.iter_mut().find(|p| p.id == product_id) {
            product.stock += released;
            self.db.write_slot(PRODUCTS_KEY, &products)?;
        }

        cart.retain(|item| item.product_id != product_id);

        tracing::debug!(product_id, released, "removed from cart");

        self.db.write_slot(CART_KEY, &cart)?;
        self.notify();
        Ok(())
    }

    /// Empty the cart without releasing any reservations. Used after
    /// checkout, once the reserved units belong to the placed order.
    pub fn clear_cart(&self) -> Result<()> {
        self.db.delete_slot(CART_KEY)?;
        self.notify();
        Ok(())
    }
}

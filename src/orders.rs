//! CRUD operations for [`Order`] records.
//!
//! Orders are append-mostly: placed at checkout, updated in place by the
//! admin screen (status changes), never deleted. Placing an order touches
//! neither stock nor the cart — checkout callers place the order from the
//! cart snapshot and then call [`Store::clear_cart`].

use chrono::Utc;

use crate::database::ORDERS_KEY;
use crate::error::Result;
use crate::models::{NewOrder, Order, OrderPatch};
use crate::store::Store;

impl Store {
    /// List all orders, in creation order.
    pub fn orders(&self) -> Result<Vec<Order>> {
        self.db.read_collection(ORDERS_KEY)
    }

    /// Fetch a single order by id.
    pub fn order(&self, id: &str) -> Result<Option<Order>> {
        Ok(self.orders()?.into_iter().find(|o| o.id == id))
    }

    /// List the orders owned by a user, in creation order.
    pub fn orders_for_user(&self, user_id: &str) -> Result<Vec<Order>> {
        Ok(self
            .orders()?
            .into_iter()
            .filter(|o| o.user_id == user_id)
            .collect())
    }

    /// Append a new order from the given snapshot items and precomputed
    /// total.
    pub fn add_order(&self, new: NewOrder) -> Result<Order> {
        let mut orders = self.orders()?;

        let order = Order {
            id: self.next_id(),
            user_id: new.user_id,
            items: new.items,
            total: new.total,
            status: new.status,
            created_at: Utc::now(),
        };

        tracing::debug!(id = %order.id, total = order.total, "adding order");

        orders.push(order.clone());
        self.db.write_slot(ORDERS_KEY, &orders)?;
        self.notify();
        Ok(order)
    }

    /// Merge `patch` into the order with the given id.
    ///
    /// Silently a no-op (no write, no notification) when the id is unknown.
    pub fn update_order(&self, id: &str, patch: OrderPatch) -> Result<()> {
        let mut orders = self.orders()?;
        let Some(order) = orders.iter_mut().find(|o| o.id == id) else {
            return Ok(());
        };

        if let Some(items) = patch.items {
            order.items = items;
        }
        if let Some(total) = patch.total {
            order.total = total;
        }
        if let Some(status) = patch.status {
            order.status = status;
        }

        self.db.write_slot(ORDERS_KEY, &orders)?;
        self.notify();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CartItem, NewProduct, OrderStatus};

    fn open_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_at(&dir.path().join("test.db")).unwrap();
        (dir, store)
    }

    fn seed_product(store: &Store, name: &str, price: f64, stock: u32) -> String {
        store
            .add_product(NewProduct {
                name: name.to_string(),
                description: String::new(),
                price,
                stock,
                image: String::new(),
            })
            .unwrap()
            .id
    }

    #[test]
    fn checkout_snapshots_the_cart_and_leaves_stock_alone() {
        let (_dir, store) = open_store();
        let p1 = seed_product(&store, "P1", 100.0, 10);
        let p2 = seed_product(&store, "P2", 50.0, 10);

        store.add_to_cart(&p1, 2).unwrap();
        store.add_to_cart(&p2, 1).unwrap();

        // What the cart screen does on confirm: total from the cart join,
        // then add_order + clear_cart.
        let items = store.cart().unwrap();
        let total: f64 = items
            .iter()
            .map(|item| {
                let price = store.product(&item.product_id).unwrap().unwrap().price;
                price * f64::from(item.quantity)
            })
            .sum();

        let order = store
            .add_order(NewOrder {
                user_id: "u1".to_string(),
                items: items.clone(),
                total,
                status: OrderStatus::Pending,
            })
            .unwrap();
        store.clear_cart().unwrap();

        assert_eq!(order.total, 250.0);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(
            order.items,
            vec![
                CartItem { product_id: p1.clone(), quantity: 2 },
                CartItem { product_id: p2.clone(), quantity: 1 },
            ]
        );
        assert!(store.cart().unwrap().is_empty());

        // Checkout itself does not move stock; it stays where add_to_cart
        // left it.
        assert_eq!(store.product(&p1).unwrap().unwrap().stock, 8);
        assert_eq!(store.product(&p2).unwrap().unwrap().stock, 9);
    }

    #[test]
    fn status_moves_in_any_direction() {
        let (_dir, store) = open_store();
        let order = store
            .add_order(NewOrder {
                user_id: "u1".to_string(),
                items: vec![],
                total: 0.0,
                status: OrderStatus::Pending,
            })
            .unwrap();

        for status in [
            OrderStatus::Confirmed,
            OrderStatus::Delivered,
            OrderStatus::Pending,
        ] {
            store
                .update_order(&order.id, OrderPatch { status: Some(status), ..OrderPatch::default() })
                .unwrap();
            assert_eq!(store.order(&order.id).unwrap().unwrap().status, status);
        }
    }

    #[test]
    fn orders_for_user_filters_by_owner() {
        let (_dir, store) = open_store();
        for (user, total) in [("u1", 10.0), ("u2", 20.0), ("u1", 30.0)] {
            store
                .add_order(NewOrder {
                    user_id: user.to_string(),
                    items: vec![],
                    total,
                    status: OrderStatus::Pending,
                })
                .unwrap();
        }

        let mine = store.orders_for_user("u1").unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|o| o.user_id == "u1"));
        assert_eq!(store.orders().unwrap().len(), 3);
    }

    #[test]
    fn update_unknown_order_is_a_silent_noop() {
        let (_dir, store) = open_store();
        store
            .update_order(
                "missing",
                OrderPatch { status: Some(OrderStatus::Delivered), ..OrderPatch::default() },
            )
            .unwrap();
        assert!(store.orders().unwrap().is_empty());
    }
}

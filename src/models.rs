//! Domain model structs persisted in the local database.
//!
//! Every struct derives `Serialize` and `Deserialize` with camelCase field
//! names so the persisted JSON blobs keep the exact shape the UI layer
//! already reads (`createdAt`, `productId`, `userId`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// Access level of a [`User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

/// A registered account.
///
/// The password is stored and compared verbatim; this is demo-grade storage
/// with no hashing (pinned source behavior).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque stable identifier, assigned at creation.
    pub id: String,
    pub name: String,
    /// Case-insensitive unique key among all users.
    pub email: String,
    pub password: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a [`User`]; id and timestamp are assigned
/// by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Partial update for a [`User`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// A catalogue entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit price, non-negative.
    pub price: f64,
    /// Units available. Decremented when reserved into a cart, incremented
    /// when released from one; never goes negative.
    pub stock: u32,
    /// Image URI shown by the catalogue screen.
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a [`Product`].
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
    pub image: String,
}

/// Partial update for a [`Product`].
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
    pub image: Option<String>,
}

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

/// One line of the session cart. A line with quantity 0 is removed rather
/// than stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
}

// ---------------------------------------------------------------------------
// Order
// ---------------------------------------------------------------------------

/// Fulfilment state of an [`Order`]. Admin-settable in any direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Delivered,
}

/// A placed order. Items and total are snapshots taken from the cart at
/// confirmation time; the total is never recomputed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating an [`Order`].
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub total: f64,
    pub status: OrderStatus,
}

/// Partial update for an [`Order`], used by the admin screen to move an
/// order between statuses.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub items: Option<Vec<CartItem>>,
    pub total: Option<f64>,
    pub status: Option<OrderStatus>,
}

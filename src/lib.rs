//! # tienda-store
//!
//! Local on-device storage for the Tienda storefront demo.
//!
//! The crate exposes a synchronous [`Store`] handle that wraps a SQLite
//! database and provides typed CRUD helpers for every domain model (users,
//! products, orders, the session cart and the current session), plus a
//! change-listener registry the UI screens subscribe to. Data is persisted
//! as one JSON blob per fixed key (`users`, `products`, `orders`, `cart`,
//! `currentUser`), the layout the storefront has always used.
//!
//! All operations return [`Result`]; domain-rule violations
//! (duplicate email, insufficient stock) are distinct [`StoreError`]
//! variants. The handle is single-threaded by design — see [`store`].

pub mod cart;
pub mod database;
pub mod events;
pub mod migrations;
pub mod models;
pub mod orders;
pub mod products;
pub mod seed;
pub mod session;
pub mod store;
pub mod users;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use events::ListenerId;
pub use models::*;
pub use store::Store;

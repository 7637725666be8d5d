//! Idempotent demo-data seeding.

use crate::error::Result;
use crate::models::{NewProduct, NewUser, Role};
use crate::store::Store;

impl Store {
    /// Seed the demo accounts and catalogue.
    ///
    /// Idempotent: the demo admin and customer are only created when no
    /// users exist at all, and the demo products only when the catalogue is
    /// empty, so calling this on every app start is safe.
    pub fn initialize_data(&self) -> Result<()> {
        if self.users()?.is_empty() {
            tracing::info!("seeding demo users");

            self.add_user(NewUser {
                name: "Administrador".to_string(),
                email: "admin@app.com".to_string(),
                password: "admin123".to_string(),
                role: Role::Admin,
            })?;

            self.add_user(NewUser {
                name: "Cliente Demo".to_string(),
                email: "cliente@app.com".to_string(),
                password: "cliente123".to_string(),
                role: Role::Customer,
            })?;
        }

        if self.products()?.is_empty() {
            tracing::info!("seeding demo products");

            let sample_products = [
                NewProduct {
                    name: "Laptop Gaming".to_string(),
                    description: "Laptop para gaming de alta gama".to_string(),
                    price: 8400.0,
                    stock: 5,
                    image: "https://via.placeholder.com/200x200?text=Laptop".to_string(),
                },
                NewProduct {
                    name: "Mouse Inalámbrico".to_string(),
                    description: "Mouse ergonómico inalámbrico".to_string(),
                    price: 175.0,
                    stock: 20,
                    image: "https://via.placeholder.com/200x200?text=Mouse".to_string(),
                },
                NewProduct {
                    name: "Teclado Mecánico".to_string(),
                    description: "Teclado mecánico RGB".to_string(),
                    price: 560.0,
                    stock: 15,
                    image: "https://via.placeholder.com/200x200?text=Teclado".to_string(),
                },
                NewProduct {
                    name: "Monitor 4K".to_string(),
                    description: "Monitor 4K de 27 pulgadas".to_string(),
                    price: 2450.0,
                    stock: 8,
                    image: "https://via.placeholder.com/200x200?text=Monitor".to_string(),
                },
            ];

            for product in sample_products {
                self.add_product(product)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_at(&dir.path().join("test.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn seeds_demo_users_and_products() {
        let (_dir, store) = open_store();
        store.initialize_data().unwrap();

        let users = store.users().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].role, Role::Admin);
        assert_eq!(users[0].email, "admin@app.com");
        assert_eq!(users[1].role, Role::Customer);

        let products = store.products().unwrap();
        assert_eq!(products.len(), 4);
        assert_eq!(products[0].name, "Laptop Gaming");
        assert_eq!(products[3].stock, 8);
    }

    #[test]
    fn seeding_twice_adds_nothing() {
        let (_dir, store) = open_store();
        store.initialize_data().unwrap();
        store.initialize_data().unwrap();

        assert_eq!(store.users().unwrap().len(), 2);
        assert_eq!(store.products().unwrap().len(), 4);
    }

    #[test]
    fn existing_data_suppresses_only_its_own_half() {
        let (_dir, store) = open_store();
        store
            .add_user(NewUser {
                name: "Ana".to_string(),
                email: "ana@app.com".to_string(),
                password: "x".to_string(),
                role: Role::Customer,
            })
            .unwrap();

        store.initialize_data().unwrap();

        // Users untouched, catalogue still seeded.
        assert_eq!(store.users().unwrap().len(), 1);
        assert_eq!(store.products().unwrap().len(), 4);
    }
}

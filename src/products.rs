//! CRUD operations for [`Product`] records.
//!
//! Products carry no uniqueness constraint; stock bookkeeping is driven by
//! the cart operations in [`crate::cart`].

use chrono::Utc;

use crate::database::PRODUCTS_KEY;
use crate::error::Result;
use crate::models::{NewProduct, Product, ProductPatch};
use crate::store::Store;

impl Store {
    /// List all products, in creation order.
    pub fn products(&self) -> Result<Vec<Product>> {
        self.db.read_collection(PRODUCTS_KEY)
    }

    /// Fetch a single product by id.
    pub fn product(&self, id: &str) -> Result<Option<Product>> {
        Ok(self.products()?.into_iter().find(|p| p.id == id))
    }

    /// Add a product to the catalogue.
    pub fn add_product(&self, new: NewProduct) -> Result<Product> {
        let mut products = self.products()?;

        let product = Product {
            id: self.next_id(),
            name: new.name,
            description: new.description,
            price: new.price,
            stock: new.stock,
            image: new.image,
            created_at: Utc::now(),
        };

        tracing::debug!(id = %product.id, name = %product.name, "adding product");

        products.push(product.clone());
        self.db.write_slot(PRODUCTS_KEY, &products)?;
        self.notify();
        Ok(product)
    }

    /// Merge `patch` into the product with the given id.
    ///
    /// Silently a no-op (no write, no notification) when the id is unknown.
    pub fn update_product(&self, id: &str, patch: ProductPatch) -> Result<()> {
        let mut products = self.products()?;
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(());
        };

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        if let Some(image) = patch.image {
            product.image = image;
        }

        self.db.write_slot(PRODUCTS_KEY, &products)?;
        self.notify();
        Ok(())
    }

    /// Delete the product with the given id. Silently a no-op when absent.
    pub fn delete_product(&self, id: &str) -> Result<()> {
        let mut products = self.products()?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Ok(());
        }

        tracing::debug!(id, "deleting product");

        self.db.write_slot(PRODUCTS_KEY, &products)?;
        self.notify();
        Ok(())
    }
}

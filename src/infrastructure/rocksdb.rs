use crate::domain::order::{Order, OrderDraft, OrderStatus};
use crate::domain::ports::{OrderStore, ProductStore};
use crate::domain::product::{Product, ProductDraft};
use crate::error::{Result, StorefrontError};
use async_trait::async_trait;
use chrono::Utc;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Column Family for storing order documents.
pub const CF_ORDERS: &str = "orders";
/// Column Family for storing catalog documents.
pub const CF_PRODUCTS: &str = "products";

/// A persistent document store backed by RocksDB.
///
/// Orders and products live in separate Column Families as JSON documents
/// keyed by their store-assigned ids. This struct is thread-safe (`Clone`
/// shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<DB>,
}

impl RocksDbStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("orders" and "products")
    /// exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_orders = ColumnFamilyDescriptor::new(CF_ORDERS, Options::default());
        let cf_products = ColumnFamilyDescriptor::new(CF_PRODUCTS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_orders, cf_products])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StorefrontError::Persistence(format!("{name} column family not found")))
    }
}

#[async_trait]
impl OrderStore for RocksDbStore {
    async fn insert(&self, draft: OrderDraft, status: OrderStatus) -> Result<Order> {
        let order = Order {
            id: Uuid::new_v4().to_string(),
            items: draft.items,
            total: draft.total,
            payment_method: draft.payment_method,
            payment_id: draft.payment_id,
            status,
            customer_email: draft.customer_email,
            shipping_address: draft.shipping_address,
            created_at: Utc::now(),
        };

        let cf = self.cf(CF_ORDERS)?;
        let value = serde_json::to_vec(&order)?;
        self.db.put_cf(cf, order.id.as_bytes(), value)?;

        Ok(order)
    }

    async fn list_by_recency(&self) -> Result<Vec<Order>> {
        let cf = self.cf(CF_ORDERS)?;

        let mut orders = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            let order: Order = serde_json::from_slice(&value)?;
            orders.push(order);
        }

        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}

#[async_trait]
impl ProductStore for RocksDbStore {
    async fn insert(&self, draft: ProductDraft) -> Result<Product> {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            original_price: draft.original_price,
            sizes: draft.sizes,
            images: draft.images,
            created_at: Utc::now(),
        };

        let cf = self.cf(CF_PRODUCTS)?;
        let value = serde_json::to_vec(&product)?;
        self.db.put_cf(cf, product.id.as_bytes(), value)?;

        Ok(product)
    }

    async fn get(&self, product_id: &str) -> Result<Option<Product>> {
        let cf = self.cf(CF_PRODUCTS)?;

        match self.db.get_cf(cf, product_id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn list_by_recency(&self) -> Result<Vec<Product>> {
        let cf = self.cf(CF_PRODUCTS)?;

        let mut products = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            let product: Product = serde_json::from_slice(&value)?;
            products.push(product);
        }

        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }
}

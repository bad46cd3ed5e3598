use crate::domain::order::{Order, OrderDraft, OrderStatus};
use crate::domain::ports::{OrderStore, ProductStore};
use crate::domain::product::{Product, ProductDraft};
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory store for orders.
///
/// Uses `Arc<RwLock<Vec<Order>>>` to allow shared concurrent access. Ideal
/// for testing or development runs where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new, empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
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

        let mut orders = self.orders.write().await;
        orders.push(order.clone());
        Ok(order)
    }

    async fn list_by_recency(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        // Reverse insertion order first so that created_at ties stay
        // newest-inserted-first under the stable sort.
        let mut listed: Vec<Order> = orders.iter().rev().cloned().collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }
}

/// A thread-safe in-memory store for catalog entries.
#[derive(Default, Clone)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductStore {
    /// Creates a new, empty in-memory product store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
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

        let mut products = self.products.write().await;
        products.push(product.clone());
        Ok(product)
    }

    async fn get(&self, product_id: &str) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == product_id).cloned())
    }

    async fn list_by_recency(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        let mut listed: Vec<Product> = products.iter().rev().cloned().collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{LineItem, PaymentMethod, ShippingAddress};
    use rust_decimal_macros::dec;

    fn draft() -> OrderDraft {
        OrderDraft {
            items: vec![LineItem {
                product_id: "p1".to_string(),
                name: "The Aura tee".to_string(),
                unit_price: dec!(799),
                size: "L".to_string(),
                quantity: 1,
                image_ref: "/uploads/p1f.jpeg".to_string(),
            }],
            total: dec!(799),
            payment_method: PaymentMethod::Cod,
            payment_id: None,
            customer_email: None,
            shipping_address: ShippingAddress::default(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_identity() {
        let store = InMemoryOrderStore::new();
        let order = store.insert(draft(), OrderStatus::Pending).await.unwrap();

        assert!(!order.id.is_empty());
        assert_eq!(order.status, OrderStatus::Pending);

        let other = store.insert(draft(), OrderStatus::Pending).await.unwrap();
        assert_ne!(order.id, other.id, "ids must be unique per insert");
    }

    #[tokio::test]
    async fn test_inserted_order_listed_first() {
        let store = InMemoryOrderStore::new();
        store.insert(draft(), OrderStatus::Pending).await.unwrap();
        let last = store.insert(draft(), OrderStatus::Paid).await.unwrap();

        let listed = store.list_by_recency().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, last.id);
    }

    #[tokio::test]
    async fn test_identical_drafts_are_distinct_records() {
        let store = InMemoryOrderStore::new();
        store.insert(draft(), OrderStatus::Pending).await.unwrap();
        store.insert(draft(), OrderStatus::Pending).await.unwrap();

        let listed = store.list_by_recency().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_ne!(listed[0].id, listed[1].id);
    }

    #[tokio::test]
    async fn test_list_is_idempotent() {
        let store = InMemoryOrderStore::new();
        store.insert(draft(), OrderStatus::Pending).await.unwrap();
        store.insert(draft(), OrderStatus::Paid).await.unwrap();

        let first = store.list_by_recency().await.unwrap();
        let second = store.list_by_recency().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_product_store_round_trip() {
        let store = InMemoryProductStore::new();
        let product = store
            .insert(ProductDraft {
                name: "Red Dragon tee".to_string(),
                description: "Bold design".to_string(),
                price: dec!(699),
                original_price: dec!(1399),
                sizes: vec!["M".to_string(), "L".to_string()],
                images: vec!["/uploads/p2f.jpeg".to_string()],
            })
            .await
            .unwrap();

        let found = store.get(&product.id).await.unwrap().unwrap();
        assert_eq!(found, product);
        assert!(store.get("missing").await.unwrap().is_none());

        let listed = store.list_by_recency().await.unwrap();
        assert_eq!(listed.len(), 1);
    }
}

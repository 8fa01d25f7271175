use crate::domain::order::StoredOrder;
use crate::domain::repository::OrderRepository;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Orders in insertion order. Numbers are handed out under the same write
/// lock that appends, so storage order and number order always agree.
#[derive(Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<Vec<StoredOrder>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn insert_order(&self, mut order: StoredOrder) -> Result<StoredOrder> {
        let mut orders = self.orders.write().await;
        order.number = orders.last().map_or(0, |last| last.number) + 1;
        orders.push(order.clone());
        debug!(number = order.number, stored = orders.len(), "Order saved to memory storage");
        Ok(order)
    }

    #[instrument(skip(self), fields(owner_id = owner_id))]
    async fn find_orders_by_owner(&self, owner_id: &str) -> Result<Vec<StoredOrder>> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .filter(|o| o.owner_id.as_deref() == Some(owner_id))
            .cloned()
            .collect())
    }
}

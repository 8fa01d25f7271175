use crate::data::catalog::IngredientCatalog;
use crate::domain::error::DomainError;
use crate::domain::order::{
    Ingredient, Order, OrderStatus, StoredOrder, burger_name, is_object_id, new_object_id,
};
use crate::domain::repository::OrderRepository;
use crate::domain::user::StoredUser;
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A freshly placed order together with the catalog entries it resolved to.
#[derive(Debug, Clone)]
pub struct CreatedOrder {
    pub order: StoredOrder,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone)]
pub struct OrderHistory {
    pub orders: Vec<StoredOrder>,
    pub total: u64,
    pub total_today: u64,
}

pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
    catalog: Arc<IngredientCatalog>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: Arc<R>, catalog: Arc<IngredientCatalog>) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        self.catalog.all()
    }

    /// Places an order. Malformed ids fail the whole order; well-formed but
    /// unknown ids are dropped, and the order fails only if none are known.
    #[instrument(skip(self, order, owner), fields(owner_id = ?owner.map(|u| &u.id)))]
    pub async fn create_order(
        &self,
        order: Option<Order>,
        owner: Option<&StoredUser>,
    ) -> Result<CreatedOrder> {
        let ids = order.map(|o| o.ingredients).unwrap_or_default();
        if ids.is_empty() {
            warn!("Order without ingredients");
            return Err(DomainError::IngredientIdsRequired.into());
        }
        if let Some(bad) = ids.iter().find(|id| !is_object_id(id)) {
            warn!(id = %bad, "Malformed ingredient id");
            return Err(DomainError::MalformedIngredientId(bad.clone()).into());
        }

        let known: Vec<&Ingredient> = ids.iter().filter_map(|id| self.catalog.find(id)).collect();
        if known.is_empty() {
            warn!(submitted = ids.len(), "No known ingredient in order");
            return Err(DomainError::UnknownIngredients.into());
        }

        let now = Utc::now();
        let stored = StoredOrder {
            id: new_object_id(),
            ingredients: known.iter().map(|i| i.id.clone()).collect(),
            owner_id: owner.map(|u| u.id.clone()),
            status: OrderStatus::Done,
            name: burger_name(&known),
            number: 0,
            price: known.iter().map(|i| i.price).sum(),
            created_at: now,
            updated_at: now,
        };
        let stored = self.repository.insert_order(stored).await?;

        info!(number = stored.number, name = %stored.name, "Order placed");
        Ok(CreatedOrder {
            ingredients: known.into_iter().cloned().collect(),
            order: stored,
        })
    }

    #[instrument(skip(self, owner), fields(owner_id = %owner.id))]
    pub async fn orders_of_user(&self, owner: &StoredUser) -> Result<OrderHistory> {
        let orders = self.repository.find_orders_by_owner(&owner.id).await?;
        let today = Utc::now().date_naive();
        let total_today = orders
            .iter()
            .filter(|o| o.created_at.date_naive() == today)
            .count() as u64;

        Ok(OrderHistory {
            total: orders.len() as u64,
            total_today,
            orders,
        })
    }
}

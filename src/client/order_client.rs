use crate::client::error::ClientError;
use crate::client::response::ApiResponse;
use crate::client::rest::RestClient;
use crate::domain::order::Order;
use tracing::{info, instrument};

const INGREDIENTS_PATH: &str = "/api/ingredients";
const ORDERS_PATH: &str = "/api/orders";

/// Shape of an order creation request: body and authorisation are
/// independent, which gives the four combinations the service is probed with.
#[derive(Debug, Clone, Copy)]
pub enum OrderRequest<'a> {
    /// Neither body nor `Authorization` header.
    Anonymous,
    /// `Authorization` header only.
    AuthOnly(&'a str),
    /// Body only.
    BodyOnly(&'a Order),
    Authorized { order: &'a Order, token: &'a str },
}

impl<'a> OrderRequest<'a> {
    pub fn new(order: Option<&'a Order>, token: Option<&'a str>) -> Self {
        match (order, token) {
            (None, None) => Self::Anonymous,
            (None, Some(token)) => Self::AuthOnly(token),
            (Some(order), None) => Self::BodyOnly(order),
            (Some(order), Some(token)) => Self::Authorized { order, token },
        }
    }

    pub fn order(&self) -> Option<&'a Order> {
        match *self {
            Self::BodyOnly(order) | Self::Authorized { order, .. } => Some(order),
            Self::Anonymous | Self::AuthOnly(_) => None,
        }
    }

    pub fn token(&self) -> Option<&'a str> {
        match *self {
            Self::AuthOnly(token) | Self::Authorized { token, .. } => Some(token),
            Self::Anonymous | Self::BodyOnly(_) => None,
        }
    }
}

/// Catalog and order requests.
#[derive(Debug, Clone)]
pub struct OrderClient {
    rest: RestClient,
}

impl OrderClient {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    #[instrument(skip(self, request), fields(with_body = request.order().is_some(), authorised = request.token().is_some()))]
    pub async fn create_order(&self, request: OrderRequest<'_>) -> Result<ApiResponse, ClientError> {
        info!("POST {}", ORDERS_PATH);
        self.rest
            .post(ORDERS_PATH, request.token(), request.order())
            .await
    }

    #[instrument(skip(self, token), fields(authorised = token.is_some()))]
    pub async fn get_orders_of_user(&self, token: Option<&str>) -> Result<ApiResponse, ClientError> {
        info!("GET {}", ORDERS_PATH);
        self.rest.get(ORDERS_PATH, token).await
    }

    #[instrument(skip(self))]
    pub async fn get_all_ingredients(&self) -> Result<ApiResponse, ClientError> {
        info!("GET {}", INGREDIENTS_PATH);
        self.rest.get(INGREDIENTS_PATH, None).await
    }

    /// Ids of every catalog entry, in catalog order.
    pub async fn ingredient_ids(&self) -> Result<Vec<String>, ClientError> {
        self.get_all_ingredients()
            .await?
            .strings_at("data._id")
            .ok_or_else(|| ClientError::MissingField("data._id".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape_from_options() {
        let order = Order::new(vec!["a".to_string()]);

        assert!(matches!(OrderRequest::new(None, None), OrderRequest::Anonymous));
        assert!(matches!(
            OrderRequest::new(None, Some("Bearer t")),
            OrderRequest::AuthOnly("Bearer t")
        ));
        assert!(matches!(
            OrderRequest::new(Some(&order), None),
            OrderRequest::BodyOnly(_)
        ));

        let full = OrderRequest::new(Some(&order), Some("Bearer t"));
        assert_eq!(full.order(), Some(&order));
        assert_eq!(full.token(), Some("Bearer t"));
    }

    #[test]
    fn test_anonymous_shape_has_neither_part() {
        let request = OrderRequest::Anonymous;
        assert!(request.order().is_none());
        assert!(request.token().is_none());
    }
}

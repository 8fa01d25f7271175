use crate::application::auth_service::AuthService;
use crate::application::order_service::OrderService;
use crate::data::memory::InMemoryOrderRepository;
use crate::data::user_repository::InMemoryUserRepository;
use crate::domain::error::DomainError;
use crate::domain::order::{
    IngredientsResponse, Order, OrderCreatedResponse, OrderDetails, OrderOwner, OrderSummary,
    PlacedOrder, UserOrdersResponse,
};
use crate::presentation::auth::BearerHeader;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

pub struct AppState {
    pub auth_service: Arc<AuthService<InMemoryUserRepository>>,
    pub order_service: Arc<OrderService<InMemoryOrderRepository>>,
}

/// `{success, message}` envelope used by every failure and by plain acknowledgements.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Failure as rendered over HTTP.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(error = %message, status = %status, "Request failed");
        } else {
            warn!(error = %message, status = %status, "Request rejected");
        }

        HttpResponse::build(status).json(MessageResponse {
            success: false,
            message,
        })
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        let Some(domain) = err.downcast_ref::<DomainError>() else {
            return ApiError::Internal(err.to_string());
        };
        let message = domain.to_string();
        match domain {
            DomainError::MissingUserFields
            | DomainError::UserAlreadyExists
            | DomainError::EmailTaken
            | DomainError::InvalidToken(_) => ApiError::Forbidden(message),
            DomainError::IncorrectCredentials
            | DomainError::Unauthorised
            | DomainError::InvalidRefreshToken => ApiError::Unauthorized(message),
            DomainError::IngredientIdsRequired | DomainError::UnknownIngredients => {
                ApiError::BadRequest(message)
            }
            DomainError::MalformedIngredientId(_) | DomainError::Internal(_) => {
                ApiError::Internal(message)
            }
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[instrument(skip(state))]
pub async fn list_ingredients(state: web::Data<AppState>) -> HttpResponse {
    let data = state.order_service.ingredients().to_vec();
    info!(count = data.len(), "Serving ingredient catalog");
    HttpResponse::Ok().json(IngredientsResponse {
        success: true,
        data,
    })
}

#[instrument(skip(state, authorization, body), fields(authorised = authorization.0.is_some()))]
pub async fn create_order(
    state: web::Data<AppState>,
    authorization: BearerHeader,
    body: Option<web::Json<Order>>,
) -> Result<HttpResponse, ApiError> {
    let owner = state
        .auth_service
        .authenticate_optional(authorization.as_deref())
        .await?;
    let created = state
        .order_service
        .create_order(body.map(web::Json::into_inner), owner.as_ref())
        .await?;

    let order = created.order;
    let details = owner.map(|user| OrderDetails {
        id: order.id.clone(),
        ingredients: created.ingredients,
        owner: OrderOwner {
            profile: user.profile(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        },
        status: order.status,
        name: order.name.clone(),
        created_at: order.created_at,
        updated_at: order.updated_at,
        price: order.price,
    });

    info!(number = order.number, "Order created");
    Ok(HttpResponse::Ok().json(OrderCreatedResponse {
        success: true,
        name: order.name,
        order: PlacedOrder {
            number: order.number,
            details,
        },
    }))
}

#[instrument(skip(state, authorization))]
pub async fn orders_of_user(
    state: web::Data<AppState>,
    authorization: BearerHeader,
) -> Result<HttpResponse, ApiError> {
    let user = state
        .auth_service
        .authenticate(authorization.as_deref())
        .await?;
    let history = state.order_service.orders_of_user(&user).await?;

    info!(user_id = %user.id, total = history.total, "Serving order history");
    Ok(HttpResponse::Ok().json(UserOrdersResponse {
        success: true,
        orders: history.orders.iter().map(OrderSummary::from).collect(),
        total: history.total,
        total_today: history.total_today,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: DomainError) -> StatusCode {
        ApiError::from(anyhow::Error::from(err)).status_code()
    }

    #[test]
    fn test_domain_errors_map_to_contract_statuses() {
        assert_eq!(status_of(DomainError::MissingUserFields), StatusCode::FORBIDDEN);
        assert_eq!(status_of(DomainError::UserAlreadyExists), StatusCode::FORBIDDEN);
        assert_eq!(status_of(DomainError::EmailTaken), StatusCode::FORBIDDEN);
        assert_eq!(status_of(DomainError::IncorrectCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(DomainError::Unauthorised), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(DomainError::IngredientIdsRequired), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(DomainError::MalformedIngredientId("w1".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_is_domain_text() {
        let err = ApiError::from(anyhow::Error::from(DomainError::Unauthorised));
        assert_eq!(err.to_string(), "You should be authorised");
    }

    #[test]
    fn test_foreign_error_is_internal() {
        let err = ApiError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

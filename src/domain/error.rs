use thiserror::Error;

/// Failures raised by the stub services. The display text is the `message`
/// the service puts in its error envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Email, password and name are required fields")]
    MissingUserFields,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("email or password are incorrect")]
    IncorrectCredentials,
    #[error("You should be authorised")]
    Unauthorised,
    #[error("{0}")]
    InvalidToken(String),
    #[error("User with such email already exists")]
    EmailTaken,
    #[error("Token is invalid")]
    InvalidRefreshToken,
    #[error("Ingredient ids must be provided")]
    IngredientIdsRequired,
    #[error("One or more ids provided are incorrect")]
    UnknownIngredients,
    #[error("Cast to ObjectId failed for value \"{0}\"")]
    MalformedIngredientId(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

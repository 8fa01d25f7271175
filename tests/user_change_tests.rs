mod common;

use common::{assert_failure, assert_same_email, run_scenario};
use stellar_burgers_api::client::UserGenerator;

const NOT_AUTHORISED: &str = "You should be authorised";

#[tokio::test]
async fn test_authorised_user_changes_email() {
    run_scenario(|s| async move {
        let user = UserGenerator::random_user();
        let token = s.register_ok(&user).await;
        let other = UserGenerator::random_user();

        let patch = user.clone().with_email(other.email.clone());
        let response = s.users.change_user(&patch, Some(&token)).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.success(), Some(true));
        assert_same_email(response.str_at("user.email"), &other.email);
        assert_eq!(response.str_at("user.name"), user.name);
    })
    .await;
}

#[tokio::test]
async fn test_authorised_user_changes_password() {
    run_scenario(|s| async move {
        let user = UserGenerator::random_user();
        let token = s.register_ok(&user).await;
        let other = UserGenerator::random_user();

        let patch = user.clone().with_password(other.password.clone());
        let response = s.users.change_user(&patch, Some(&token)).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.success(), Some(true));
        assert_same_email(response.str_at("user.email"), &user.email);
        assert_eq!(response.str_at("user.name"), user.name);

        let login = s.users.login_user(&patch.credentials()).await.unwrap();
        assert_eq!(login.status(), 200);
    })
    .await;
}

#[tokio::test]
async fn test_authorised_user_changes_name() {
    run_scenario(|s| async move {
        let user = UserGenerator::random_user();
        let token = s.register_ok(&user).await;
        let other = UserGenerator::random_user();

        let patch = user.clone().with_name(other.name.clone());
        let response = s.users.change_user(&patch, Some(&token)).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.success(), Some(true));
        assert_same_email(response.str_at("user.email"), &user.email);
        assert_eq!(response.str_at("user.name"), other.name);
    })
    .await;
}

#[tokio::test]
async fn test_authorised_user_cannot_take_used_email() {
    run_scenario(|s| async move {
        let user = UserGenerator::random_user();
        let token = s.register_ok(&user).await;
        let other = UserGenerator::random_user();
        s.register_ok(&other).await;

        let patch = user.clone().with_email(other.email.clone());
        let response = s.users.change_user(&patch, Some(&token)).await.unwrap();

        assert_failure(&response, 403, "User with such email already exists");
    })
    .await;
}

#[tokio::test]
async fn test_unauthorised_user_cannot_change_email() {
    run_scenario(|s| async move {
        let user = UserGenerator::random_user();
        s.register_ok(&user).await;
        let other = UserGenerator::random_user();

        let patch = user.clone().with_email(other.email);
        let response = s.users.change_user(&patch, None).await.unwrap();

        assert_failure(&response, 401, NOT_AUTHORISED);
    })
    .await;
}

#[tokio::test]
async fn test_unauthorised_user_cannot_change_password() {
    run_scenario(|s| async move {
        let user = UserGenerator::random_user();
        s.register_ok(&user).await;
        let other = UserGenerator::random_user();

        let patch = user.clone().with_password(other.password);
        let response = s.users.change_user(&patch, None).await.unwrap();

        assert_failure(&response, 401, NOT_AUTHORISED);
    })
    .await;
}

#[tokio::test]
async fn test_unauthorised_user_cannot_change_name() {
    run_scenario(|s| async move {
        let user = UserGenerator::random_user();
        s.register_ok(&user).await;
        let other = UserGenerator::random_user();

        let patch = user.clone().with_name(other.name);
        let response = s.users.change_user(&patch, None).await.unwrap();

        assert_failure(&response, 401, NOT_AUTHORISED);
    })
    .await;
}

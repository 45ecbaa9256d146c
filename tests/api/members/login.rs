use club_manager::{routes::members::LoginResponse, utils::constants::JWT_COOKIE_NAME};
use serde_json::json;
use test_context::test_context;

use crate::helpers::{get_error_code, get_random_login_id, signup, TestApp};

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_and_set_cookie_if_valid_credentials(
    app: &mut TestApp,
) {
    let login_id = get_random_login_id();
    let id = signup(app, &login_id, "password123").await;

    let response = app
        .post_login(&json!({ "loginId": login_id, "password": "password123" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let auth_cookie = response
        .cookies()
        .find(|cookie| cookie.name() == JWT_COOKIE_NAME)
        .expect("No auth cookie found");
    assert!(!auth_cookie.value().is_empty());
    assert!(auth_cookie.http_only());

    let body = response
        .json::<LoginResponse>()
        .await
        .expect("Could not deserialise response body to LoginResponse");
    assert_eq!(body.id.to_string(), id);
    assert_eq!(body.login_id, login_id);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_incorrect_credentials(app: &mut TestApp) {
    let login_id = get_random_login_id();
    signup(app, &login_id, "password123").await;

    let test_cases = [
        json!({ "loginId": login_id, "password": "password456" }),
        json!({ "loginId": get_random_login_id(), "password": "password123" }),
        json!({ "loginId": "x", "password": "password123" }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post_login(test_case).await;
        assert_eq!(
            response.status().as_u16(),
            401,
            "Failed for input: {:?}",
            test_case
        );
        assert_eq!(get_error_code(response).await, "INCORRECT_CREDENTIALS");
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_422_if_malformed_credentials(app: &mut TestApp) {
    let response = app.post_login(&json!({ "loginId": "striker" })).await;
    assert_eq!(response.status().as_u16(), 422);
}

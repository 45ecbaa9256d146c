use club_manager::utils::constants::JWT_COOKIE_NAME;
use reqwest::Url;
use secrecy::Secret;
use test_context::test_context;

use crate::helpers::{get_error_code, get_session, TestApp};

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_and_ban_token(app: &mut TestApp) {
    get_session(app).await;

    let url = Url::parse(&app.address).expect("Failed to parse URL");
    let cookies = reqwest::cookie::CookieStore::cookies(&*app.cookie_jar, &url)
        .expect("No cookies stored");
    let token = cookies
        .to_str()
        .expect("Cookie header is not valid UTF-8")
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(&format!("{JWT_COOKIE_NAME}=")))
        .expect("No auth cookie in jar")
        .to_owned();

    let response = app.get_logout().await;
    assert_eq!(response.status().as_u16(), 200);

    assert!(app
        .banned_token_store
        .read()
        .await
        .check_token(&Secret::new(token))
        .await
        .is_err());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_logout_called_twice(app: &mut TestApp) {
    get_session(app).await;

    assert_eq!(app.get_logout().await.status().as_u16(), 200);

    let response = app.get_logout().await;
    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(get_error_code(response).await, "MISSING_TOKEN");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_invalid_token(app: &mut TestApp) {
    app.cookie_jar.add_cookie_str(
        &format!("{JWT_COOKIE_NAME}=invalid; HttpOnly; SameSite=Lax; Path=/"),
        &Url::parse(&app.address).expect("Failed to parse URL"),
    );

    let response = app.get_logout().await;
    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(get_error_code(response).await, "INVALID_TOKEN");
}

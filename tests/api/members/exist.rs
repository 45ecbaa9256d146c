use test_context::test_context;

use crate::helpers::{
    get_error_code, get_random_login_id, get_random_nickname, get_session,
    TestApp,
};

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_if_login_id_available(app: &mut TestApp) {
    let response = app.get_login_id_exist(&get_random_login_id()).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_if_login_id_taken(app: &mut TestApp) {
    let member = get_session(app).await;

    let response = app.get_login_id_exist(&member.login_id).await;
    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(get_error_code(response).await, "MEMBER_ID_DUPLICATED");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_login_id_invalid(app: &mut TestApp) {
    let response = app.get_login_id_exist("no").await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_report_nickname_availability(app: &mut TestApp) {
    let nickname = get_random_nickname();
    assert_eq!(app.get_nickname_exist(&nickname).await.status().as_u16(), 200);

    get_session(app).await;
    let response = app
        .patch_nickname(&serde_json::json!({ "nickname": nickname }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.get_nickname_exist(&nickname).await;
    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(get_error_code(response).await, "NICKNAME_DUPLICATED");
}

use club_manager::{
    domain::{ClubName, LoginId, MemberId, MemberStoreError},
    routes::members::DeleteMemberResponse,
};
use test_context::test_context;

use crate::helpers::{apply, create_club, get_error_code, get_session, login, TestApp};

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_if_not_logged_in(app: &mut TestApp) {
    let response = app.delete_member().await;
    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_delete_account_and_memberships(app: &mut TestApp) {
    get_session(app).await;
    let club_id = create_club(app, "Thunder").await;

    let member = get_session(app).await;
    apply(app, &club_id, &member).await;

    let response = app.delete_member().await;
    assert_eq!(response.status().as_u16(), 200);
    let body = response
        .json::<DeleteMemberResponse>()
        .await
        .expect("Could not deserialise response body to DeleteMemberResponse");
    assert_eq!(body.message, format!("Member deleted: {}", member.login_id));

    let login_id = LoginId::parse(member.login_id.clone()).unwrap();
    assert_eq!(
        app.member_store
            .read()
            .await
            .get_member_by_login_id(&login_id)
            .await,
        Err(MemberStoreError::MemberNotFound)
    );

    let member_id = MemberId::parse(&member.id).unwrap();
    let memberships = app
        .club_store
        .read()
        .await
        .get_memberships(&member_id)
        .await
        .unwrap();
    assert!(memberships.is_empty());

    let response = app.delete_member().await;
    assert_eq!(response.status().as_u16(), 401, "Session should have ended");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_member_leads_a_club(app: &mut TestApp) {
    let leader = get_session(app).await;
    create_club(app, "Thunder").await;
    login(app, &leader).await;

    let response = app.delete_member().await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(get_error_code(response).await, "LEADER_CANNOT_LEAVE");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_club_writes_from_a_session_of_a_deleted_member(
    app: &mut TestApp,
) {
    get_session(app).await;
    let club_id = create_club(app, "Thunder").await;

    let member = get_session(app).await;
    // Tokens carry a second-resolution expiry, so wait for a distinct one
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    let other_session = app.new_client();
    login(&other_session, &member).await;

    let response = app.delete_member().await;
    assert_eq!(response.status().as_u16(), 200);

    let response = other_session
        .post_club(&serde_json::json!({
            "name": "Ghost FC",
            "monthlyFee": 0
        }))
        .await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(get_error_code(response).await, "MEMBER_NOT_EXIST");

    let ghost_fc = ClubName::parse("Ghost FC").unwrap();
    assert_eq!(
        app.club_store.read().await.club_name_exists(&ghost_fc).await,
        Ok(false)
    );

    let response = other_session.post_apply(&club_id, &member.id).await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(get_error_code(response).await, "MEMBER_NOT_EXIST");

    let member_id = MemberId::parse(&member.id).unwrap();
    let memberships = app
        .club_store
        .read()
        .await
        .get_memberships(&member_id)
        .await
        .unwrap();
    assert!(memberships.is_empty());
}

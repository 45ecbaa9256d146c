use serde_json::json;
use test_context::test_context;

use crate::helpers::{
    apply, create_club, get_error_code, get_json_response_body, get_session,
    listed_member_ids, login, TestApp,
};

#[test_context(TestApp)]
#[tokio::test]
async fn thunder_scenario(app: &mut TestApp) {
    let leader = get_session(app).await;
    let club_id = create_club(app, "Thunder").await;

    let applicant = get_session(app).await;
    let club_member_id = apply(app, &club_id, &applicant).await;

    login(app, &leader).await;
    let response = app.get_club_members(&club_id, "pending").await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        listed_member_ids(response).await,
        vec![applicant.id.clone()]
    );

    let response = app.patch_approve(&club_member_id).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.get_club_members(&club_id, "").await;
    assert_eq!(response.status().as_u16(), 200);
    let mut expected = vec![leader.id.clone(), applicant.id.clone()];
    expected.sort();
    assert_eq!(listed_member_ids(response).await, expected);

    let response = app.get_club_members(&club_id, "pending").await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(get_error_code(response).await, "CLUB_MEMBER_NOT_EXIST");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_if_applied_twice(app: &mut TestApp) {
    get_session(app).await;
    let club_id = create_club(app, "Thunder").await;

    let applicant = get_session(app).await;
    apply(app, &club_id, &applicant).await;

    let response = app.post_apply(&club_id, &applicant.id).await;
    assert_eq!(response.status().as_u16(), 409);
    assert_eq!(get_error_code(response).await, "CLUB_MEMBER_DUPLICATED");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_if_club_unknown(app: &mut TestApp) {
    let member = get_session(app).await;

    let response = app
        .post_apply(&uuid::Uuid::new_v4().to_string(), &member.id)
        .await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(get_error_code(response).await, "CLUB_NOT_EXIST");
}

#[test_context(TestApp)]
#[tokio::test]
async fn approve_is_idempotent(app: &mut TestApp) {
    let leader = get_session(app).await;
    let club_id = create_club(app, "Thunder").await;
    let applicant = get_session(app).await;
    let club_member_id = apply(app, &club_id, &applicant).await;

    login(app, &leader).await;
    for _ in 0..2 {
        let response = app.patch_approve(&club_member_id).await;
        assert_eq!(response.status().as_u16(), 200);
    }

    let response = app.patch_approve(&uuid::Uuid::new_v4().to_string()).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn payment_status_partitions_members(app: &mut TestApp) {
    let leader = get_session(app).await;
    let club_id = create_club(app, "Thunder").await;
    let member = get_session(app).await;
    let club_member_id = apply(app, &club_id, &member).await;

    login(app, &leader).await;
    app.patch_approve(&club_member_id).await;

    let response = app.patch_payment(&club_id, &member.id, true).await;
    assert_eq!(response.status().as_u16(), 200);

    let paid = app.get_club_members(&club_id, "paid").await;
    assert_eq!(paid.status().as_u16(), 200);
    assert_eq!(listed_member_ids(paid).await, vec![member.id.clone()]);
    let not_paid = app.get_club_members(&club_id, "not-paid").await;
    assert_eq!(listed_member_ids(not_paid).await, vec![leader.id.clone()]);

    app.patch_payment(&club_id, &member.id, false).await;

    login(app, &member).await;
    let paid = app.get_club_members(&club_id, "paid").await;
    assert_eq!(paid.status().as_u16(), 200, "Approved members may view");
    let body = get_json_response_body(paid).await;
    assert_eq!(body["members"], json!([]));
    let not_paid = app.get_club_members(&club_id, "not-paid").await;
    let mut expected = vec![leader.id.clone(), member.id.clone()];
    expected.sort();
    assert_eq!(listed_member_ids(not_paid).await, expected);
}

#[test_context(TestApp)]
#[tokio::test]
async fn members_can_leave_but_leader_cannot(app: &mut TestApp) {
    let leader = get_session(app).await;
    let club_id = create_club(app, "Thunder").await;
    let member = get_session(app).await;
    apply(app, &club_id, &member).await;

    let response = app.delete_club_member(&club_id, &member.id).await;
    assert_eq!(response.status().as_u16(), 200);
    let response = app.delete_club_member(&club_id, &member.id).await;
    assert_eq!(response.status().as_u16(), 404);

    login(app, &leader).await;
    let response = app.delete_club_member(&club_id, &leader.id).await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(get_error_code(response).await, "LEADER_CANNOT_LEAVE");
}

use test_context::test_context;

use crate::helpers::{
    apply, create_club, get_error_code, get_session, listed_member_ids, login,
    TestApp,
};

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_403_if_applying_for_someone_else(app: &mut TestApp) {
    get_session(app).await;
    let club_id = create_club(app, "Thunder").await;
    let other = get_session(app).await;

    get_session(app).await;
    let response = app.post_apply(&club_id, &other.id).await;
    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(get_error_code(response).await, "NOT_PERMITTED");
}

#[test_context(TestApp)]
#[tokio::test]
async fn plain_members_cannot_manage_club(app: &mut TestApp) {
    let leader = get_session(app).await;
    let club_id = create_club(app, "Thunder").await;
    let member = get_session(app).await;
    let member_row = apply(app, &club_id, &member).await;
    let applicant = get_session(app).await;
    let applicant_row = apply(app, &club_id, &applicant).await;

    login(app, &leader).await;
    app.patch_approve(&member_row).await;

    login(app, &member).await;
    let forbidden = [
        app.get_club_members(&club_id, "").await,
        app.get_club_members(&club_id, "pending").await,
        app.patch_approve(&applicant_row).await,
        app.patch_payment(&club_id, &member.id, true).await,
        app.patch_role(&club_id, &member.id, "STAFF").await,
        app.delete_club_member(&club_id, &applicant.id).await,
    ];
    for response in forbidden {
        assert_eq!(response.status().as_u16(), 403);
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn pending_applicants_cannot_view_payments(app: &mut TestApp) {
    get_session(app).await;
    let club_id = create_club(app, "Thunder").await;
    let applicant = get_session(app).await;
    apply(app, &club_id, &applicant).await;

    let response = app.get_club_members(&club_id, "paid").await;
    assert_eq!(response.status().as_u16(), 403);
    let response = app.get_club_members(&club_id, "not-paid").await;
    assert_eq!(response.status().as_u16(), 403);
}

#[test_context(TestApp)]
#[tokio::test]
async fn staff_can_manage_members(app: &mut TestApp) {
    let leader = get_session(app).await;
    let club_id = create_club(app, "Thunder").await;
    let staff = get_session(app).await;
    let staff_row = apply(app, &club_id, &staff).await;
    let applicant = get_session(app).await;
    let applicant_row = apply(app, &club_id, &applicant).await;

    login(app, &leader).await;
    app.patch_approve(&staff_row).await;
    let response = app.patch_role(&club_id, &staff.id, "STAFF").await;
    assert_eq!(response.status().as_u16(), 200);

    login(app, &staff).await;
    let response = app.get_club_members(&club_id, "pending").await;
    assert_eq!(listed_member_ids(response).await, vec![applicant.id.clone()]);
    assert_eq!(app.patch_approve(&applicant_row).await.status().as_u16(), 200);
    assert_eq!(
        app.patch_payment(&club_id, &applicant.id, true)
            .await
            .status()
            .as_u16(),
        200
    );

    let response = app.patch_role(&club_id, &applicant.id, "STAFF").await;
    assert_eq!(response.status().as_u16(), 403, "Only the leader sets roles");

    let response = app.delete_club_member(&club_id, &leader.id).await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(get_error_code(response).await, "LEADER_CANNOT_LEAVE");

    let response = app.delete_club_member(&club_id, &applicant.id).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[test_context(TestApp)]
#[tokio::test]
async fn role_changes_are_restricted(app: &mut TestApp) {
    let leader = get_session(app).await;
    let club_id = create_club(app, "Thunder").await;
    let applicant = get_session(app).await;
    let applicant_row = apply(app, &club_id, &applicant).await;

    login(app, &leader).await;
    let response = app.patch_role(&club_id, &applicant.id, "STAFF").await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(get_error_code(response).await, "CLUB_MEMBER_NOT_APPROVED");

    app.patch_approve(&applicant_row).await;

    let response = app.patch_role(&club_id, &applicant.id, "LEADER").await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(get_error_code(response).await, "VALIDATION_ERROR");

    let response = app.patch_role(&club_id, &applicant.id, "CAPTAIN").await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app.patch_role(&club_id, &leader.id, "MEMBER").await;
    assert_eq!(response.status().as_u16(), 403);

    let response = app.patch_role(&club_id, &applicant.id, "STAFF").await;
    assert_eq!(response.status().as_u16(), 200);
    let response = app.patch_role(&club_id, &applicant.id, "MEMBER").await;
    assert_eq!(response.status().as_u16(), 200);
}

use club_manager::{
    app_state::{AppState, BannedTokenStoreType, ClubStoreType, MemberStoreType},
    services::data_stores::{
        HashmapClubStore, HashmapMemberStore, HashsetBannedTokenStore,
    },
    utils::constants::test,
    Application,
};
use reqwest::{cookie::Jar, Response};
use serde_json::Value;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub banned_token_store: BannedTokenStoreType,
    pub club_store: ClubStoreType,
    pub cookie_jar: Arc<Jar>,
    pub http_client: reqwest::Client,
    pub member_store: MemberStoreType,
}

impl TestApp {
    pub async fn new() -> Self {
        let member_store: MemberStoreType =
            Arc::new(RwLock::new(HashmapMemberStore::default()));
        let club_store: ClubStoreType =
            Arc::new(RwLock::new(HashmapClubStore::default()));
        let banned_token_store: BannedTokenStoreType =
            Arc::new(RwLock::new(HashsetBannedTokenStore::default()));

        let app_state = AppState::new(
            member_store.clone(),
            club_store.clone(),
            banned_token_store.clone(),
        );

        let app = Application::build(app_state, test::APP_ADDRESS)
            .await
            .expect("Failed to build app");
        let address = format!("http://{}", app.address.clone());

        #[allow(clippy::let_underscore_future)]
        let _ = tokio::spawn(app.run());

        let cookie_jar = Arc::new(Jar::default());
        let http_client = reqwest::Client::builder()
            .cookie_provider(cookie_jar.clone())
            .build()
            .unwrap();

        Self {
            address,
            banned_token_store,
            club_store,
            cookie_jar,
            http_client,
            member_store,
        }
    }

    /// Another client against the same server and stores, with its own
    /// cookie jar, so one member can hold two sessions.
    pub fn new_client(&self) -> Self {
        let cookie_jar = Arc::new(Jar::default());
        let http_client = reqwest::Client::builder()
            .cookie_provider(cookie_jar.clone())
            .build()
            .unwrap();

        Self {
            address: self.address.clone(),
            banned_token_store: self.banned_token_store.clone(),
            club_store: self.club_store.clone(),
            cookie_jar,
            http_client,
            member_store: self.member_store.clone(),
        }
    }

    pub async fn post_signup<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/members", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_login<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/members/login", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_logout(&self) -> Response {
        self.http_client
            .get(format!("{}/members/logout", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_member(&self) -> Response {
        self.http_client
            .delete(format!("{}/members", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_login_id_exist(&self, login_id: &str) -> Response {
        self.http_client
            .get(format!("{}/members/exist/{}", &self.address, login_id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_nickname_exist(&self, nickname: &str) -> Response {
        self.http_client
            .get(format!(
                "{}/members/exist/nickname/{}",
                &self.address, nickname
            ))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_nickname<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .patch(format!("{}/members/nickname", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_password<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .patch(format!("{}/members/password", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_club<Body>(&self, body: &Body) -> Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}/clubs", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_club_name_exist(&self, name: &str) -> Response {
        self.http_client
            .get(format!("{}/clubs/exist/{}", &self.address, name))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_club_by_name(&self, name: &str) -> Response {
        self.http_client
            .get(format!("{}/clubs/name/{}", &self.address, name))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_apply(&self, club_id: &str, member_id: &str) -> Response {
        self.http_client
            .post(format!(
                "{}/clubs/{}/members/{}",
                &self.address, club_id, member_id
            ))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// `list` is one of "", "pending", "paid" or "not-paid".
    pub async fn get_club_members(&self, club_id: &str, list: &str) -> Response {
        let url = match list {
            "" => format!("{}/clubs/{}/members", &self.address, club_id),
            list => {
                format!("{}/clubs/{}/members/{}", &self.address, club_id, list)
            }
        };
        self.http_client
            .get(url)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_approve(&self, club_member_id: &str) -> Response {
        self.http_client
            .patch(format!(
                "{}/clubs/members/{}/approve",
                &self.address, club_member_id
            ))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_payment(
        &self,
        club_id: &str,
        member_id: &str,
        paid: bool,
    ) -> Response {
        self.http_client
            .patch(format!(
                "{}/clubs/{}/members/{}/payment",
                &self.address, club_id, member_id
            ))
            .json(&serde_json::json!({ "paid": paid }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_role(
        &self,
        club_id: &str,
        member_id: &str,
        role: &str,
    ) -> Response {
        self.http_client
            .patch(format!(
                "{}/clubs/{}/members/{}/role",
                &self.address, club_id, member_id
            ))
            .json(&serde_json::json!({ "role": role }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_club_member(
        &self,
        club_id: &str,
        member_id: &str,
    ) -> Response {
        self.http_client
            .delete(format!(
                "{}/clubs/{}/members/{}",
                &self.address, club_id, member_id
            ))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

impl AsyncTestContext for TestApp {
    async fn setup() -> TestApp {
        TestApp::new().await
    }
}

pub struct TestMember {
    pub id: String,
    pub login_id: String,
    pub password: String,
}

pub fn get_random_login_id() -> String {
    format!("m_{}", &Uuid::new_v4().simple().to_string()[..12])
}

pub fn get_random_nickname() -> String {
    format!("n{}", &Uuid::new_v4().simple().to_string()[..10])
}

pub async fn get_json_response_body(response: Response) -> Value {
    response
        .json()
        .await
        .expect("failed to parse response body JSON")
}

pub async fn get_error_code(response: Response) -> String {
    let body = get_json_response_body(response).await;
    body.get("code")
        .and_then(Value::as_str)
        .expect("No code in error response")
        .to_owned()
}

pub async fn signup(app: &TestApp, login_id: &str, password: &str) -> String {
    let response = app
        .post_signup(&serde_json::json!({
            "loginId": login_id,
            "password": password,
            "nickname": get_random_nickname(),
            "positionId": 1,
            "addressId": 2
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201, "Failed to sign up");

    get_json_response_body(response)
        .await
        .get("id")
        .and_then(Value::as_str)
        .expect("No id in signup response")
        .to_owned()
}

/// Logs in, replacing whichever session the client held before.
pub async fn login(app: &TestApp, member: &TestMember) {
    let response = app
        .post_login(&serde_json::json!({
            "loginId": member.login_id,
            "password": member.password
        }))
        .await;
    assert_eq!(
        response.status().as_u16(),
        200,
        "Failed to log in as {}",
        member.login_id
    );
}

pub async fn get_session(app: &TestApp) -> TestMember {
    let login_id = get_random_login_id();
    let password = "password123".to_owned();
    let id = signup(app, &login_id, &password).await;

    let member = TestMember {
        id,
        login_id,
        password,
    };
    login(app, &member).await;
    member
}

pub async fn create_club(app: &TestApp, name: &str) -> String {
    let response = app
        .post_club(&serde_json::json!({
            "name": name,
            "addressId": 7,
            "monthlyFee": 30000
        }))
        .await;
    assert_eq!(
        response.status().as_u16(),
        201,
        "Failed to create club with name: {name}"
    );

    get_json_response_body(response)
        .await
        .get("id")
        .and_then(Value::as_str)
        .expect("No id in club response")
        .to_owned()
}

/// Applies as `member` and returns the new club member ID.
pub async fn apply(app: &TestApp, club_id: &str, member: &TestMember) -> String {
    login(app, member).await;
    let response = app.post_apply(club_id, &member.id).await;
    assert_eq!(response.status().as_u16(), 201, "Failed to apply to club");

    get_json_response_body(response)
        .await
        .get("id")
        .and_then(Value::as_str)
        .expect("No id in club member response")
        .to_owned()
}

/// Member IDs listed in a club member list response, sorted.
pub async fn listed_member_ids(response: Response) -> Vec<String> {
    let body = get_json_response_body(response).await;
    let mut ids: Vec<String> = body
        .get("members")
        .and_then(Value::as_array)
        .expect("No members in response")
        .iter()
        .filter_map(|row| row.get("memberId").and_then(Value::as_str))
        .map(str::to_owned)
        .collect();
    ids.sort();
    ids
}

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    serve::Serve,
    Json, Router,
};

use redis::{Client, RedisResult};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::error::Error;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Level;

use domain::{ClubAPIError, MemberAPIError};
pub mod routes;
use crate::utils::tracing::*;
use routes::{
    clubs::{
        apply, approve_club_member, change_role, club_name_exist,
        create_club, get_club_by_name, get_club_members,
        get_not_paid_club_members, get_paid_club_members,
        get_pending_club_members, remove_club_member, set_payment_status,
    },
    members::{
        delete_member, login, login_id_exist, logout, nickname_exist, signup,
        update_nickname, update_password,
    },
};
pub mod app_state;
pub mod domain;
pub mod services;
use app_state::AppState;
pub mod utils;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for MemberAPIError {
    fn into_response(self) -> Response {
        let (status, error_message) = member_error_status(&self);
        error_response(status, error_message, self.code())
    }
}

fn member_error_status(e: &MemberAPIError) -> (StatusCode, String) {
    match e {
        MemberAPIError::IdDuplicated | MemberAPIError::NicknameDuplicated => {
            log_error_chain(e, Level::DEBUG);
            (StatusCode::CONFLICT, e.to_string())
        }
        MemberAPIError::IncorrectCredentials
        | MemberAPIError::InvalidToken
        | MemberAPIError::MissingToken => {
            log_error_chain(e, Level::DEBUG);
            (StatusCode::UNAUTHORIZED, e.to_string())
        }
        MemberAPIError::MemberNotExist => {
            log_error_chain(e, Level::DEBUG);
            (StatusCode::NOT_FOUND, e.to_string())
        }
        MemberAPIError::PasswordSame => {
            log_error_chain(e, Level::DEBUG);
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        MemberAPIError::ValidationError(message) => {
            log_error_chain(e, Level::DEBUG);
            (StatusCode::BAD_REQUEST, message.as_ref().to_owned())
        }
        MemberAPIError::UnexpectedError(_) => {
            log_error_chain(e, Level::ERROR);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected error".to_string(),
            )
        }
    }
}

impl IntoResponse for ClubAPIError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ClubAPIError::AuthenticationError(auth_error) => {
                member_error_status(auth_error)
            }
            ClubAPIError::ClubMemberDuplicated
            | ClubAPIError::ClubNameDuplicated => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::CONFLICT, self.to_string())
            }
            ClubAPIError::ClubMemberNotExist
            | ClubAPIError::ClubNotExist
            | ClubAPIError::MemberNotExist => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::NOT_FOUND, self.to_string())
            }
            ClubAPIError::NotPermitted(_) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::FORBIDDEN, self.to_string())
            }
            ClubAPIError::ClubMemberNotApproved
            | ClubAPIError::LeaderCannotLeave => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ClubAPIError::ValidationError(message) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, message.as_ref().to_owned())
            }
            ClubAPIError::UnexpectedError(_) => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
            }
        };
        error_response(status, error_message, self.code())
    }
}

fn error_response(status: StatusCode, error: String, code: &str) -> Response {
    let body = Json(ErrorResponse {
        error,
        code: code.to_owned(),
    });
    (status, body).into_response()
}

fn log_error_chain(e: &(dyn Error + 'static), debug_level: Level) {
    let separator =
        "\n-----------------------------------------------------------------------------------\n";
    let mut report = format!("{}{:?}\n", separator, e);
    let mut current = e.source();
    while let Some(cause) = current {
        let str = format!("Caused by:\n\n{:?}", cause);
        report = format!("{}\n{}", report, str);
        current = cause.source();
    }
    report = format!("{}\n{}", report, separator);
    match debug_level {
        Level::ERROR => tracing::error!("{}", report),
        Level::WARN => tracing::warn!("{}", report),
        Level::INFO => tracing::info!("{}", report),
        Level::DEBUG => tracing::debug!("{}", report),
        Level::TRACE => tracing::trace!("{}", report),
    }
}

pub struct Application {
    server: Serve<Router, Router>,
    pub address: String,
}

impl Application {
    pub async fn build(
        app_state: AppState,
        address: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let allowed_origins = [
            "http://localhost:3000".parse()?,
            "http://127.0.0.1:3000".parse()?,
        ];

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_credentials(true)
            .allow_origin(allowed_origins);

        let router = Router::new()
            .route("/members", post(signup).delete(delete_member))
            .route("/members/login", post(login))
            .route("/members/logout", get(logout))
            .route("/members/exist/:login_id", get(login_id_exist))
            .route("/members/exist/nickname/:nickname", get(nickname_exist))
            .route("/members/nickname", patch(update_nickname))
            .route("/members/password", patch(update_password))
            .route("/clubs", post(create_club))
            .route("/clubs/exist/:name", get(club_name_exist))
            .route("/clubs/name/:name", get(get_club_by_name))
            .route(
                "/clubs/members/:club_member_id/approve",
                patch(approve_club_member),
            )
            .route("/clubs/:club_id/members", get(get_club_members))
            .route(
                "/clubs/:club_id/members/pending",
                get(get_pending_club_members),
            )
            .route("/clubs/:club_id/members/paid", get(get_paid_club_members))
            .route(
                "/clubs/:club_id/members/not-paid",
                get(get_not_paid_club_members),
            )
            .route(
                "/clubs/:club_id/members/:member_id",
                post(apply).delete(remove_club_member),
            )
            .route(
                "/clubs/:club_id/members/:member_id/payment",
                patch(set_payment_status),
            )
            .route(
                "/clubs/:club_id/members/:member_id/role",
                patch(change_role),
            )
            .with_state(app_state)
            .layer(cors)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            );

        let listener = tokio::net::TcpListener::bind(address).await?;
        let address = listener.local_addr()?.to_string();
        let server = axum::serve(listener, router);

        Ok(Application { server, address })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        tracing::info!("listening on {}", &self.address);
        self.server.with_graceful_shutdown(shutdown_signal()).await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

pub async fn get_postgres_pool(
    url: &Secret<String>,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(url.expose_secret())
        .await
}

pub fn get_redis_client(redis_hostname: String) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}

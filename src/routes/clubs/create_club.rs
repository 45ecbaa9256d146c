use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{Club, ClubAPIError, ClubName, MonthlyFee, NewClub},
    utils::{auth::AuthContext, club::require_existing_member},
};

/// Creates a club led by the calling member.
#[tracing::instrument(name = "Create club route handler", skip_all)]
pub async fn create_club(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<CreateClubRequest>,
) -> Result<(StatusCode, Json<ClubResponse>), ClubAPIError> {
    require_existing_member(&state.member_registry, &auth).await?;

    let new_club = NewClub {
        name: ClubName::parse(&request.name)?,
        address_id: request.address_id,
        monthly_fee: MonthlyFee::parse(request.monthly_fee)?,
    };

    let club = state
        .club_registry
        .insert(&auth.member_id, new_club)
        .await?;
    tracing::debug!("club {} created", club.id.as_ref());

    Ok((StatusCode::CREATED, Json(ClubResponse::from(club))))
}

#[derive(Deserialize)]
pub struct CreateClubRequest {
    pub name: String,
    #[serde(rename = "addressId", default)]
    pub address_id: Option<i32>,
    #[serde(rename = "monthlyFee")]
    pub monthly_fee: i32,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ClubResponse {
    pub id: uuid::Uuid,
    pub name: String,
    pub leader: uuid::Uuid,
    #[serde(rename = "addressId")]
    pub address_id: Option<i32>,
    pub point: i32,
    #[serde(rename = "monthlyFee")]
    pub monthly_fee: i32,
}

impl From<Club> for ClubResponse {
    fn from(club: Club) -> Self {
        Self {
            id: *club.id.as_ref(),
            name: club.name.as_ref().to_owned(),
            leader: *club.leader.as_ref(),
            address_id: club.address_id,
            point: club.point,
            monthly_fee: club.monthly_fee.value_of(),
        }
    }
}

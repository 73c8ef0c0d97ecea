//! HTTP handlers for musician and venue profile endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{profile_error, ErrorResponse};
use crate::adapters::http::middleware::Caller;
use crate::application::handlers::profile::{
    CreateMusicianProfileCommand, CreateMusicianProfileHandler, CreateMusicianProfileRequest,
    CreateVenueProfileCommand, CreateVenueProfileHandler, CreateVenueProfileRequest,
    GetMusicianProfileHandler, GetMusicianProfileQuery, GetVenueProfileHandler,
    GetVenueProfileQuery, UpdateMusicianProfileCommand, UpdateMusicianProfileHandler,
    UpdateMusicianProfileRequest, UpdateVenueProfileCommand, UpdateVenueProfileHandler,
    UpdateVenueProfileRequest,
};
use crate::domain::foundation::{MusicianId, VenueId};

use super::dto::{MusicianResponse, VenueResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct MusicianHandlers {
    pub create: Arc<CreateMusicianProfileHandler>,
    pub update: Arc<UpdateMusicianProfileHandler>,
    pub get: Arc<GetMusicianProfileHandler>,
}

#[derive(Clone)]
pub struct VenueProfileHandlers {
    pub create: Arc<CreateVenueProfileHandler>,
    pub update: Arc<UpdateVenueProfileHandler>,
    pub get: Arc<GetVenueProfileHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// Musician endpoints
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/musicians - Create the caller's musician profile
pub async fn create_musician(
    State(handlers): State<MusicianHandlers>,
    Caller(caller): Caller,
    Json(request): Json<CreateMusicianProfileRequest>,
) -> Response {
    match handlers
        .create
        .handle(CreateMusicianProfileCommand { request }, &caller)
        .await
    {
        Ok(musician) => (StatusCode::CREATED, Json(MusicianResponse::from(musician))).into_response(),
        Err(e) => profile_error(e),
    }
}

/// GET /api/musicians/me - Get the caller's musician profile
pub async fn get_own_musician(
    State(handlers): State<MusicianHandlers>,
    Caller(caller): Caller,
) -> Response {
    let user_id = caller.user_id.to_string();
    match handlers
        .get
        .handle(GetMusicianProfileQuery::ByUser(caller.user_id))
        .await
    {
        Ok(Some(musician)) => (StatusCode::OK, Json(MusicianResponse::from(musician))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Musician", &user_id)),
        )
            .into_response(),
        Err(e) => profile_error(e),
    }
}

/// GET /api/musicians/:id - Get a musician profile
pub async fn get_musician(
    State(handlers): State<MusicianHandlers>,
    Caller(_caller): Caller,
    Path(id): Path<MusicianId>,
) -> Response {
    match handlers.get.handle(GetMusicianProfileQuery::ById(id)).await {
        Ok(Some(musician)) => (StatusCode::OK, Json(MusicianResponse::from(musician))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Musician", &id.to_string())),
        )
            .into_response(),
        Err(e) => profile_error(e),
    }
}

/// PATCH /api/musicians/:id - Partially update a musician profile
pub async fn update_musician(
    State(handlers): State<MusicianHandlers>,
    Caller(caller): Caller,
    Path(musician_id): Path<MusicianId>,
    Json(request): Json<UpdateMusicianProfileRequest>,
) -> Response {
    let cmd = UpdateMusicianProfileCommand {
        musician_id,
        request,
    };
    match handlers.update.handle(cmd, &caller).await {
        Ok(musician) => (StatusCode::OK, Json(MusicianResponse::from(musician))).into_response(),
        Err(e) => profile_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Venue endpoints
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/venues - Create the caller's venue profile
pub async fn create_venue(
    State(handlers): State<VenueProfileHandlers>,
    Caller(caller): Caller,
    Json(request): Json<CreateVenueProfileRequest>,
) -> Response {
    match handlers
        .create
        .handle(CreateVenueProfileCommand { request }, &caller)
        .await
    {
        Ok(venue) => (StatusCode::CREATED, Json(VenueResponse::from(venue))).into_response(),
        Err(e) => profile_error(e),
    }
}

/// GET /api/venues/me - Get the caller's venue profile
pub async fn get_own_venue(
    State(handlers): State<VenueProfileHandlers>,
    Caller(caller): Caller,
) -> Response {
    let user_id = caller.user_id.to_string();
    match handlers
        .get
        .handle(GetVenueProfileQuery::ByUser(caller.user_id))
        .await
    {
        Ok(Some(venue)) => (StatusCode::OK, Json(VenueResponse::from(venue))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Venue", &user_id)),
        )
            .into_response(),
        Err(e) => profile_error(e),
    }
}

/// GET /api/venues/:id - Get a venue profile
pub async fn get_venue(
    State(handlers): State<VenueProfileHandlers>,
    Caller(_caller): Caller,
    Path(id): Path<VenueId>,
) -> Response {
    match handlers.get.handle(GetVenueProfileQuery::ById(id)).await {
        Ok(Some(venue)) => (StatusCode::OK, Json(VenueResponse::from(venue))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Venue", &id.to_string())),
        )
            .into_response(),
        Err(e) => profile_error(e),
    }
}

/// PATCH /api/venues/:id - Partially update a venue profile
pub async fn update_venue(
    State(handlers): State<VenueProfileHandlers>,
    Caller(caller): Caller,
    Path(venue_id): Path<VenueId>,
    Json(request): Json<UpdateVenueProfileRequest>,
) -> Response {
    let cmd = UpdateVenueProfileCommand { venue_id, request };
    match handlers.update.handle(cmd, &caller).await {
        Ok(venue) => (StatusCode::OK, Json(VenueResponse::from(venue))).into_response(),
        Err(e) => profile_error(e),
    }
}

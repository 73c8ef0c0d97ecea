//! HTTP adapters - REST API over the application handlers.
//!
//! Every `/api` route runs behind the identity middleware; handlers pull the
//! caller out with the [`middleware::Caller`] extractor.

pub mod booking;
pub mod error;
pub mod middleware;
pub mod profile;
pub mod retry;
pub mod venue;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::application::handlers::booking::{
    AcceptBookingHandler, CancelBookingHandler, CompleteBookingHandler, CreateBookingHandler,
    GetBookingHandler, ListBookingsHandler, PostBookingMessageHandler, RejectBookingHandler,
};
use crate::application::handlers::profile::{
    CreateMusicianProfileHandler, CreateVenueProfileHandler, GetMusicianProfileHandler,
    GetVenueProfileHandler, UpdateMusicianProfileHandler, UpdateVenueProfileHandler,
};
use crate::application::handlers::venue::SearchVenuesHandler;
use crate::adapters::repositories::{
    DocumentBookingRepository, DocumentMusicianRepository, DocumentVenueRepository,
};
use crate::config::ServerConfig;
use crate::ports::{
    BookingRepository, Clock, DocumentStore, IdentityProvider, MusicianRepository,
    VenueRepository,
};

pub use booking::{booking_routes, BookingHandlers};
pub use middleware::{identity_middleware, Caller, IdentityState};
pub use profile::{musician_routes, venue_profile_routes, MusicianHandlers, VenueProfileHandlers};
pub use venue::{search_routes, SearchHandlers};

/// All endpoint states, wired over one document store.
#[derive(Clone)]
pub struct ApiServices {
    pub bookings: BookingHandlers,
    pub musicians: MusicianHandlers,
    pub venues: VenueProfileHandlers,
    pub search: SearchHandlers,
}

impl ApiServices {
    /// Builds repositories and handlers over a store.
    pub fn over_store(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>, max_attempts: u32) -> Self {
        let musicians: Arc<dyn MusicianRepository> =
            Arc::new(DocumentMusicianRepository::new(store.clone()));
        let venues: Arc<dyn VenueRepository> = Arc::new(DocumentVenueRepository::new(store.clone()));
        let bookings: Arc<dyn BookingRepository> =
            Arc::new(DocumentBookingRepository::new(store.clone()));

        Self {
            bookings: BookingHandlers {
                create: Arc::new(CreateBookingHandler::new(
                    bookings.clone(),
                    musicians.clone(),
                    venues.clone(),
                    clock.clone(),
                )),
                accept: Arc::new(AcceptBookingHandler::new(bookings.clone(), clock.clone())),
                reject: Arc::new(RejectBookingHandler::new(bookings.clone(), clock.clone())),
                cancel: Arc::new(CancelBookingHandler::new(bookings.clone(), clock.clone())),
                complete: Arc::new(CompleteBookingHandler::new(bookings.clone(), clock.clone())),
                post_message: Arc::new(PostBookingMessageHandler::new(
                    bookings.clone(),
                    clock.clone(),
                )),
                get: Arc::new(GetBookingHandler::new(bookings.clone())),
                list: Arc::new(ListBookingsHandler::new(bookings)),
                max_attempts,
            },
            musicians: MusicianHandlers {
                create: Arc::new(CreateMusicianProfileHandler::new(
                    musicians.clone(),
                    clock.clone(),
                )),
                update: Arc::new(UpdateMusicianProfileHandler::new(
                    musicians.clone(),
                    clock.clone(),
                )),
                get: Arc::new(GetMusicianProfileHandler::new(musicians)),
            },
            venues: VenueProfileHandlers {
                create: Arc::new(CreateVenueProfileHandler::new(venues.clone(), clock.clone())),
                update: Arc::new(UpdateVenueProfileHandler::new(venues.clone(), clock)),
                get: Arc::new(GetVenueProfileHandler::new(venues)),
            },
            search: SearchHandlers {
                search: Arc::new(SearchVenuesHandler::new(store)),
            },
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

/// The API router without transport layers.
pub fn api_router(services: ApiServices, identity: Arc<dyn IdentityProvider>) -> Router {
    let api = Router::new()
        .nest("/musicians", musician_routes(services.musicians))
        .nest(
            "/venues",
            venue_profile_routes(services.venues).merge(search_routes(services.search)),
        )
        .nest("/bookings", booking_routes(services.bookings))
        .layer(from_fn_with_state(identity, identity_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
}

/// The API router with tracing, request timeout and CORS.
pub fn app(
    services: ApiServices,
    identity: Arc<dyn IdentityProvider>,
    server: &ServerConfig,
) -> Router {
    api_router(services, identity)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers(Any);
    if origins.is_empty() {
        layer
    } else {
        layer.allow_origin(origins)
    }
}

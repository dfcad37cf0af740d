use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use gettupp_core::{
    domain::{
        repositories::{clients::ClientRepository, shoots::ShootRepository},
        value_objects::shoots::{
            AdvanceShootRequest, CreateShootRequest, ListShootsFilter, RecordDeliveryRequest,
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{clients::ClientPostgres, shoots::ShootPostgres},
    },
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::axum_http::auth::AuthUser;
use crate::axum_http::error_responses::into_error_response;
use crate::axum_http::routers::CreatedResponse;
use crate::usecases::shoots::{ShootError, ShootUseCase};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let shoot_repository = ShootPostgres::new(Arc::clone(&db_pool));
    let client_repository = ClientPostgres::new(Arc::clone(&db_pool));
    let shoot_usecase = ShootUseCase::new(Arc::new(shoot_repository), Arc::new(client_repository));

    Router::new()
        .route("/", get(list_shoots::<ShootPostgres, ClientPostgres>))
        .route("/", post(create_shoot::<ShootPostgres, ClientPostgres>))
        .route("/:id", get(get_shoot::<ShootPostgres, ClientPostgres>))
        .route(
            "/:id/advance",
            post(advance_shoot::<ShootPostgres, ClientPostgres>),
        )
        .route(
            "/:id/delivery",
            post(record_delivery::<ShootPostgres, ClientPostgres>),
        )
        .with_state(Arc::new(shoot_usecase))
}

pub async fn list_shoots<S, C>(
    State(shoot_usecase): State<Arc<ShootUseCase<S, C>>>,
    _auth: AuthUser,
    Query(filter): Query<ListShootsFilter>,
) -> Response
where
    S: ShootRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
{
    match shoot_usecase.list(filter).await {
        Ok(shoots) => Json(shoots).into_response(),
        Err(err) => map_error("list_shoots", err),
    }
}

pub async fn create_shoot<S, C>(
    State(shoot_usecase): State<Arc<ShootUseCase<S, C>>>,
    auth: AuthUser,
    Json(request): Json<CreateShootRequest>,
) -> Response
where
    S: ShootRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
{
    info!(
        client_id = %request.client_id,
        admin = %auth.user_id,
        shoot_type = %request.type_,
        "shoots router: schedule requested"
    );
    match shoot_usecase.schedule(request).await {
        Ok(shoot_id) => {
            (StatusCode::CREATED, Json(CreatedResponse { id: shoot_id })).into_response()
        }
        Err(err) => map_error("create_shoot", err),
    }
}

pub async fn get_shoot<S, C>(
    State(shoot_usecase): State<Arc<ShootUseCase<S, C>>>,
    _auth: AuthUser,
    Path(shoot_id): Path<Uuid>,
) -> Response
where
    S: ShootRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
{
    match shoot_usecase.get(shoot_id).await {
        Ok(shoot) => Json(shoot).into_response(),
        Err(err) => map_error("get_shoot", err),
    }
}

pub async fn advance_shoot<S, C>(
    State(shoot_usecase): State<Arc<ShootUseCase<S, C>>>,
    auth: AuthUser,
    Path(shoot_id): Path<Uuid>,
    Json(request): Json<AdvanceShootRequest>,
) -> Response
where
    S: ShootRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
{
    info!(
        %shoot_id,
        admin = %auth.user_id,
        target = %request.status,
        "shoots router: advance requested"
    );
    match shoot_usecase.advance(shoot_id, request.status).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => map_error("advance_shoot", err),
    }
}

pub async fn record_delivery<S, C>(
    State(shoot_usecase): State<Arc<ShootUseCase<S, C>>>,
    auth: AuthUser,
    Path(shoot_id): Path<Uuid>,
    Json(request): Json<RecordDeliveryRequest>,
) -> Response
where
    S: ShootRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
{
    info!(
        %shoot_id,
        admin = %auth.user_id,
        delivered_images = request.delivered_images,
        "shoots router: delivery update"
    );
    match shoot_usecase
        .record_delivery(shoot_id, request.delivered_images)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => map_error("record_delivery", err),
    }
}

fn map_error(label: &str, err: ShootError) -> Response {
    warn!(
        status = err.status_code().as_u16(),
        error = %err,
        "shoots router: {} failed",
        label
    );
    into_error_response(err.status_code(), err.to_string())
}

use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::{Form, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;

use verdant_core::catalog;
use verdant_core::export;
use verdant_core::input::{
    self, CareEventForm, ContactForm, GardenPlantForm, HarvestForm, ObservationForm,
    ValidationError,
};
use verdant_core::insight::{self, PlantInsights, TimelineEntry};
use verdant_core::tags;
use verdant_db::models::{BlogPost, ContactMessage, GardenPlant, Plant, PlantCategory};
use verdant_db::queries::{
    blog_posts as blog_db, care_events as care_db, contact_messages as contact_db,
    garden_plants as garden_db, harvests as harvest_db, observations as obs_db, plants as plant_db,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Application context constructed once at startup and handed to every
/// handler through the router state.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn validation(err: ValidationError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.to_string(),
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("{err:#}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CatalogParams {
    pub category: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub plants: Vec<Plant>,
    pub categories: Vec<String>,
    pub current_category: String,
}

#[derive(Debug, Deserialize)]
pub struct GardenListParams {
    pub status: Option<String>,
    pub category: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GardenPlantDetailResponse {
    #[serde(flatten)]
    pub plant: GardenPlant,
    pub insights: PlantInsights,
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuickActionForm {
    pub ids: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuickActionResponse {
    pub care_type: String,
    pub logged: usize,
    pub skipped: usize,
}

#[derive(Debug, Serialize)]
pub struct AdminOverviewResponse {
    pub messages: Vec<ContactMessage>,
    pub unread: i64,
    pub plants: Vec<Plant>,
}

#[derive(Debug, Serialize)]
pub struct BlogTagsResponse {
    pub tags: Vec<tags::TagCount>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/plants", get(list_catalog))
        .route("/api/plants/{id}", get(get_plant_detail))
        .route("/api/contact", post(create_contact_message))
        .route("/api/admin", get(admin_overview))
        .route("/api/admin/messages/{id}/read", post(mark_message_read))
        .route("/api/admin/messages/{id}", delete(delete_message))
        .route("/api/blog", get(list_blog))
        .route("/api/blog/tags", get(list_blog_tags))
        .route("/api/blog/{id}", get(get_blog_post))
        .route("/api/garden", get(list_garden).post(create_garden_plant))
        .route("/api/garden/quick/water", post(quick_water))
        .route("/api/garden/quick/fertilize", post(quick_fertilize))
        .route("/api/garden/{id}", get(get_garden_detail))
        .route("/api/garden/{id}/status", post(set_garden_status))
        .route("/api/garden/{id}/observations", post(add_observation))
        .route("/api/garden/{id}/care", post(add_care_event))
        .route("/api/garden/{id}/harvests", post(add_harvest))
        .route("/api/garden/{id}/export.csv", get(export_garden_csv))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(pool: PgPool, bind: &str, port: u16) -> Result<()> {
    let app = build_router(AppState { pool });
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("verdant serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("verdant serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
}

fn today() -> chrono::NaiveDate {
    Utc::now().date_naive()
}

// ---------------------------------------------------------------------------
// Shop handlers
// ---------------------------------------------------------------------------

async fn index(State(state): State<AppState>) -> Result<axum::response::Response, AppError> {
    let featured = plant_db::featured_plants(&state.pool, 6)
        .await
        .map_err(AppError::internal)?;

    let rows = if featured.is_empty() {
        "<tr><td colspan=\"3\">No plants in stock.</td></tr>".to_string()
    } else {
        featured
            .iter()
            .map(|p| {
                format!(
                    "<tr><td><a href=\"/api/plants/{id}\">{name}</a></td><td>{category}</td><td>${price:.2}</td></tr>",
                    id = p.id,
                    name = p.name,
                    category = p.category,
                    price = p.price,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let html = format!(
        "<!DOCTYPE html>\
<html><head><title>verdant</title></head><body>\
<h1>verdant</h1>\
<p><a href=\"/api/plants\">/api/plants</a> | <a href=\"/api/blog\">/api/blog</a> | <a href=\"/api/garden\">/api/garden</a></p>\
<table><tr><th>Plant</th><th>Category</th><th>Price</th></tr>{rows}</table>\
</body></html>"
    );

    Ok(Html(html).into_response())
}

async fn list_catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Result<axum::response::Response, AppError> {
    // "all", empty or absent means no category filter; anything else is
    // alias-normalized first ("flower" finds "Flowers").
    let current_category = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
        .map(catalog::normalize_category);

    let search = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());

    let plants = plant_db::list_in_stock(&state.pool, current_category.as_deref(), search)
        .await
        .map_err(AppError::internal)?;

    let categories = plant_db::distinct_categories(&state.pool)
        .await
        .map_err(AppError::internal)?;

    Ok(Json(CatalogResponse {
        plants,
        categories,
        current_category: current_category.unwrap_or_else(|| "all".to_string()),
    })
    .into_response())
}

async fn get_plant_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<axum::response::Response, AppError> {
    let plant = plant_db::get_plant(&state.pool, id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("plant {id} not found")))?;

    Ok(Json(plant).into_response())
}

async fn create_contact_message(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Result<axum::response::Response, AppError> {
    let new = input::validate_contact(form).map_err(AppError::validation)?;

    let message = contact_db::insert_contact_message(&state.pool, &new)
        .await
        .map_err(AppError::internal)?;

    Ok((StatusCode::CREATED, Json(message)).into_response())
}

async fn admin_overview(
    State(state): State<AppState>,
) -> Result<axum::response::Response, AppError> {
    let messages = contact_db::list_contact_messages(&state.pool)
        .await
        .map_err(AppError::internal)?;

    let unread = contact_db::count_unread(&state.pool)
        .await
        .map_err(AppError::internal)?;

    let plants = plant_db::list_all_plants(&state.pool)
        .await
        .map_err(AppError::internal)?;

    Ok(Json(AdminOverviewResponse {
        messages,
        unread,
        plants,
    })
    .into_response())
}

async fn mark_message_read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<axum::response::Response, AppError> {
    let updated = contact_db::mark_message_read(&state.pool, id)
        .await
        .map_err(AppError::internal)?;

    if !updated {
        return Err(AppError::not_found(format!("message {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<axum::response::Response, AppError> {
    let deleted = contact_db::delete_contact_message(&state.pool, id)
        .await
        .map_err(AppError::internal)?;

    if !deleted {
        return Err(AppError::not_found(format!("message {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}

// ---------------------------------------------------------------------------
// Blog handlers
// ---------------------------------------------------------------------------

async fn list_blog(State(state): State<AppState>) -> Result<axum::response::Response, AppError> {
    let posts = blog_db::list_published(&state.pool)
        .await
        .map_err(AppError::internal)?;

    Ok(Json(posts).into_response())
}

async fn get_blog_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<axum::response::Response, AppError> {
    let post = blog_db::get_published(&state.pool, id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("blog post {id} not found")))?;

    Ok(Json(post).into_response())
}

async fn list_blog_tags(
    State(state): State<AppState>,
) -> Result<axum::response::Response, AppError> {
    let posts = blog_db::list_published(&state.pool)
        .await
        .map_err(AppError::internal)?;

    let ranked = tags::rank_tags(posts.iter().filter_map(|p: &BlogPost| p.tags.as_deref()));

    Ok(Json(BlogTagsResponse { tags: ranked }).into_response())
}

// ---------------------------------------------------------------------------
// Garden logbook handlers
// ---------------------------------------------------------------------------

async fn list_garden(
    State(state): State<AppState>,
    Query(params): Query<GardenListParams>,
) -> Result<axum::response::Response, AppError> {
    let status = match params.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(s) => Some(input::parse_status(s).map_err(AppError::validation)?),
    };

    // The logbook uses exact category matching; no storefront aliasing here.
    let category = match params.category.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(c) => Some(
            c.to_lowercase()
                .parse::<PlantCategory>()
                .map_err(|_| AppError::validation(ValidationError::InvalidCategory(c.to_string())))?,
        ),
    };

    let filter = garden_db::GardenPlantFilter {
        status,
        category,
        search: params
            .q
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty()),
    };

    let plants = garden_db::list_garden_plants(&state.pool, &filter)
        .await
        .map_err(AppError::internal)?;

    Ok(Json(plants).into_response())
}

async fn create_garden_plant(
    State(state): State<AppState>,
    Form(form): Form<GardenPlantForm>,
) -> Result<axum::response::Response, AppError> {
    let new = input::validate_garden_plant(form).map_err(AppError::validation)?;

    let plant = garden_db::insert_garden_plant(&state.pool, &new)
        .await
        .map_err(AppError::internal)?;

    Ok((StatusCode::CREATED, Json(plant)).into_response())
}

/// Load a garden plant's complete history and compute its insight set.
async fn load_detail(pool: &PgPool, id: i64) -> Result<GardenPlantDetailResponse, AppError> {
    let plant = garden_db::get_garden_plant(pool, id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("garden plant {id} not found")))?;

    let observations = obs_db::list_observations_for_plant(pool, id)
        .await
        .map_err(AppError::internal)?;
    let care_events = care_db::list_care_events_for_plant(pool, id)
        .await
        .map_err(AppError::internal)?;
    let harvests = harvest_db::list_harvests_for_plant(pool, id)
        .await
        .map_err(AppError::internal)?;

    let insights = insight::compute_insights(&plant, &observations, &care_events, &harvests, today());
    let timeline = insight::merge_timeline(&observations, &care_events, &harvests);

    Ok(GardenPlantDetailResponse {
        plant,
        insights,
        timeline,
    })
}

async fn get_garden_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<axum::response::Response, AppError> {
    let detail = load_detail(&state.pool, id).await?;
    Ok(Json(detail).into_response())
}

async fn set_garden_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<StatusForm>,
) -> Result<axum::response::Response, AppError> {
    let raw = form
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::validation(ValidationError::MissingField("status")))?;
    let status = input::parse_status(raw).map_err(AppError::validation)?;

    // Distinguish "not found" from other failures before updating.
    garden_db::get_garden_plant(&state.pool, id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("garden plant {id} not found")))?;

    garden_db::update_garden_plant_status(&state.pool, id, status)
        .await
        .map_err(AppError::internal)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Check the parent plant exists before appending a child record.
async fn require_plant(pool: &PgPool, id: i64) -> Result<(), AppError> {
    garden_db::get_garden_plant(pool, id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("garden plant {id} not found")))?;
    Ok(())
}

async fn add_observation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ObservationForm>,
) -> Result<axum::response::Response, AppError> {
    require_plant(&state.pool, id).await?;
    let new = input::validate_observation(id, form, today()).map_err(AppError::validation)?;

    let observation = obs_db::insert_observation(&state.pool, &new)
        .await
        .map_err(AppError::internal)?;

    Ok((StatusCode::CREATED, Json(observation)).into_response())
}

async fn add_care_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<CareEventForm>,
) -> Result<axum::response::Response, AppError> {
    require_plant(&state.pool, id).await?;
    let new = input::validate_care_event(id, form, today()).map_err(AppError::validation)?;

    let event = care_db::insert_care_event(&state.pool, &new)
        .await
        .map_err(AppError::internal)?;

    Ok((StatusCode::CREATED, Json(event)).into_response())
}

async fn add_harvest(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<HarvestForm>,
) -> Result<axum::response::Response, AppError> {
    require_plant(&state.pool, id).await?;
    let new = input::validate_harvest(id, form, today()).map_err(AppError::validation)?;

    let harvest = harvest_db::insert_harvest(&state.pool, &new)
        .await
        .map_err(AppError::internal)?;

    Ok((StatusCode::CREATED, Json(harvest)).into_response())
}

// ---------------------------------------------------------------------------
// Bulk quick actions
// ---------------------------------------------------------------------------

/// Log a care event dated today for every existing plant in the id list.
/// Unknown ids are skipped, not failed.
async fn run_quick_action(
    pool: &PgPool,
    form: QuickActionForm,
    care_type: &str,
) -> Result<QuickActionResponse, AppError> {
    let raw = form.ids.unwrap_or_default();
    let ids = input::parse_id_list(&raw).map_err(AppError::validation)?;

    let existing = garden_db::filter_existing_ids(pool, &ids)
        .await
        .map_err(AppError::internal)?;

    for &plant_id in &existing {
        let new = care_db::NewCareEvent {
            plant_id,
            date: today(),
            care_type: care_type.to_string(),
            amount: None,
            notes: None,
        };
        care_db::insert_care_event(pool, &new)
            .await
            .map_err(AppError::internal)?;
    }

    Ok(QuickActionResponse {
        care_type: care_type.to_string(),
        logged: existing.len(),
        skipped: ids.len() - existing.len(),
    })
}

async fn quick_water(
    State(state): State<AppState>,
    Form(form): Form<QuickActionForm>,
) -> Result<axum::response::Response, AppError> {
    let result = run_quick_action(&state.pool, form, insight::WATERING).await?;
    Ok(Json(result).into_response())
}

async fn quick_fertilize(
    State(state): State<AppState>,
    Form(form): Form<QuickActionForm>,
) -> Result<axum::response::Response, AppError> {
    let result = run_quick_action(&state.pool, form, insight::FERTILIZING).await?;
    Ok(Json(result).into_response())
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

async fn export_garden_csv(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<axum::response::Response, AppError> {
    let detail = load_detail(&state.pool, id).await?;
    let csv = export::plant_log_csv(&detail.timeline);
    let filename = export::log_filename(id);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use crate::feedback::{Feedback, FeedbackStore};
use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};
use unimatch_core::{Error as CoreError, QueryProfile};
use unimatch_similarity::Recommender;

const REQUIRED_FIELDS: [&str; 5] = ["stream", "gpa", "preferred_program", "location", "budget_range"];

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub feedback: Arc<dyn FeedbackStore>,
}

impl AppState {
    pub fn new(recommender: Arc<Recommender>, feedback: Arc<dyn FeedbackStore>) -> Self {
        Self { recommender, feedback }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RequestError {
    #[error("Request body must be a JSON object")]
    NotAnObject,
    #[error("Missing required fields")]
    Missing(Vec<String>),
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}

impl RequestError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        RequestError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    fn to_response(&self) -> HttpResponse {
        match self {
            RequestError::Missing(fields) => HttpResponse::BadRequest().json(json!({
                "error": self.to_string(),
                "missing": fields,
            })),
            _ => HttpResponse::BadRequest().json(json!({
                "error": self.to_string()
            })),
        }
    }
}

#[derive(Deserialize)]
struct CompareRequest {
    #[serde(default)]
    college_ids: Vec<u64>,
}

#[derive(Deserialize)]
struct FeedbackRequest {
    college_id: u64,
    rating: i64,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    timestamp: Option<String>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: AppState, host: &str, port: u16) -> std::io::Result<()> {
        let data = web::Data::new(state);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .configure(Self::configure(data.clone()))
        })
        .bind((host, port))?
        .run()
        .await
    }

    /// Register state and every `/api` route
    pub fn configure(state: web::Data<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
        move |cfg| {
            cfg.app_data(state).app_data(json_config()).service(
                web::scope("/api")
                    .route("/health", web::get().to(health))
                    .route("/colleges", web::get().to(list_institutions))
                    .route("/colleges/{id}", web::get().to(get_institution))
                    .route("/recommend", web::post().to(recommend))
                    .route("/compare", web::post().to(compare))
                    .route("/statistics", web::get().to(statistics))
                    .route("/feedback", web::post().to(submit_feedback))
                    .route("/feedback", web::get().to(list_feedback)),
            );
        }
    }
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        warn!("Rejected request body: {}", message);
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(json!({
                "error": "Invalid JSON body",
                "message": message,
            })),
        )
        .into()
    })
}

async fn health(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "Institution recommendation API is running",
        "colleges_count": state.recommender.dataset().len(),
    })))
}

async fn list_institutions(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.recommender.dataset().institutions()))
}

async fn get_institution(state: web::Data<AppState>, path: web::Path<u64>) -> ActixResult<HttpResponse> {
    let id = path.into_inner();

    match state.recommender.dataset().get(id) {
        Some(institution) => Ok(HttpResponse::Ok().json(institution)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "error": "College not found"
        }))),
    }
}

async fn recommend(state: web::Data<AppState>, body: web::Json<Value>) -> ActixResult<HttpResponse> {
    let body = body.into_inner();
    let max_qualification = state.recommender.config().max_qualification;

    let profile = match parse_profile(&body, max_qualification) {
        Ok(profile) => profile,
        Err(e) => {
            warn!("Invalid recommendation request: {}", e);
            return Ok(e.to_response());
        }
    };

    let (recommendations, summary) = state.recommender.recommend_with_summary(&profile);

    Ok(HttpResponse::Ok().json(json!({
        "recommendations": recommendations,
        "count": recommendations.len(),
        "summary": summary,
        "user_profile": body,
    })))
}

/// Validate a raw recommendation request and build the query profile
pub fn parse_profile(body: &Value, max_qualification: f64) -> Result<QueryProfile, RequestError> {
    let obj = body.as_object().ok_or(RequestError::NotAnObject)?;

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| is_blank(obj.get(**field)))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(RequestError::Missing(missing));
    }

    let gpa = parse_gpa(&obj["gpa"], max_qualification)?;

    let mut profile = QueryProfile::new(
        text_field(obj, "stream")?,
        gpa,
        text_field(obj, "preferred_program")?,
        text_field(obj, "location")?,
        text_field(obj, "budget_range")?,
    );

    if let Some(top_n) = parse_top_n(obj.get("top_n"))? {
        profile = profile.with_top_n(top_n);
    }
    if let Some(interests) = optional_text(obj, "interests")? {
        profile = profile.with_interests(interests);
    }
    let career_goals = match optional_text(obj, "career_goals")? {
        Some(goals) => Some(goals),
        None => optional_text(obj, "career_goal")?,
    };
    if let Some(goals) = career_goals {
        profile = profile.with_career_goals(goals);
    }

    Ok(profile)
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

fn text_field(obj: &Map<String, Value>, field: &str) -> Result<String, RequestError> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(RequestError::invalid(field, "expected a string")),
    }
}

fn optional_text(obj: &Map<String, Value>, field: &str) -> Result<Option<String>, RequestError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(RequestError::invalid(field, "expected a string")),
    }
}

fn parse_gpa(value: &Value, max_qualification: f64) -> Result<f64, RequestError> {
    let gpa = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| RequestError::invalid("gpa", "expected a number"))?;

    if !gpa.is_finite() || gpa < 0.0 || gpa > max_qualification {
        return Err(RequestError::invalid(
            "gpa",
            format!("must be between 0 and {}", max_qualification),
        ));
    }
    Ok(gpa)
}

fn parse_top_n(value: Option<&Value>) -> Result<Option<usize>, RequestError> {
    let parsed = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(_) => None,
    };
    parsed
        .map(|n| Some(n as usize))
        .ok_or_else(|| RequestError::invalid("top_n", "expected a non-negative integer"))
}

async fn compare(state: web::Data<AppState>, req: web::Json<CompareRequest>) -> ActixResult<HttpResponse> {
    match state.recommender.compare(&req.college_ids) {
        Ok(comparison) => Ok(HttpResponse::Ok().json(comparison)),
        Err(e @ CoreError::InsufficientIds { .. }) => Ok(HttpResponse::BadRequest().json(json!({
            "error": e.to_string()
        }))),
        Err(e @ CoreError::NoMatchingInstitutions) => Ok(HttpResponse::NotFound().json(json!({
            "error": e.to_string()
        }))),
        Err(e) => {
            error!("Comparison failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "error": "Error comparing colleges",
                "message": e.to_string(),
            })))
        }
    }
}

async fn statistics(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.recommender.statistics()))
}

async fn submit_feedback(
    state: web::Data<AppState>,
    req: web::Json<FeedbackRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();

    let feedback = match Feedback::new(req.college_id, req.rating, req.comment, req.timestamp) {
        Ok(feedback) => feedback,
        Err(e) => {
            warn!("Rejected feedback: {}", e);
            return Ok(HttpResponse::BadRequest().json(json!({
                "error": e.to_string()
            })));
        }
    };

    state.feedback.append(feedback.clone());

    Ok(HttpResponse::Ok().json(json!({
        "message": "Feedback submitted successfully",
        "feedback": feedback,
    })))
}

async fn list_feedback(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let feedback = state.feedback.list();
    Ok(HttpResponse::Ok().json(json!({
        "count": feedback.len(),
        "feedback": feedback,
    })))
}

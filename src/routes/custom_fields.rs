use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde_json::json;

use crate::domain::custom_field::{EntityType, FieldContext};
use crate::dto::custom_fields::{CreateFieldRequest, FieldListParams, UpdateFieldRequest};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{error_response, validate_payload};
use crate::services::custom_fields as field_service;

fn parse_entity_type(raw: &str) -> Result<EntityType, HttpResponse> {
    raw.parse::<EntityType>()
        .map_err(|e| HttpResponse::BadRequest().json(json!({ "error": e.to_string() })))
}

#[get("/{entity_type}")]
pub async fn list_fields(
    path: web::Path<String>,
    params: web::Query<FieldListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let entity_type = match parse_entity_type(&path) {
        Ok(entity_type) => entity_type,
        Err(resp) => return resp,
    };
    let params = params.into_inner();

    let context = match params.context.as_deref() {
        Some(raw) => match raw.parse::<FieldContext>() {
            Ok(context) => Some(context),
            Err(e) => {
                return HttpResponse::BadRequest().json(json!({ "error": e.to_string() }));
            }
        },
        None => None,
    };

    match field_service::list_fields(
        repo.get_ref(),
        &user,
        entity_type,
        context,
        params.include_inactive,
    ) {
        Ok(fields) => HttpResponse::Ok().json(fields),
        Err(e) => error_response(e),
    }
}

#[post("/{entity_type}")]
pub async fn create_field(
    path: web::Path<String>,
    payload: web::Json<CreateFieldRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let entity_type = match parse_entity_type(&path) {
        Ok(entity_type) => entity_type,
        Err(resp) => return resp,
    };
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }
    let new_field = payload.into_inner().into_new_field(entity_type);
    match field_service::create_field(repo.get_ref(), &user, new_field) {
        Ok(field) => HttpResponse::Created().json(field),
        Err(e) => error_response(e),
    }
}

#[put("/{entity_type}/{field_id}")]
pub async fn update_field(
    path: web::Path<(String, i32)>,
    payload: web::Json<UpdateFieldRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (entity_type, field_id) = path.into_inner();
    if let Err(resp) = parse_entity_type(&entity_type) {
        return resp;
    }
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }
    let updates = payload.into_inner().into_update();
    match field_service::update_field(repo.get_ref(), &user, field_id, updates) {
        Ok(field) => HttpResponse::Ok().json(field),
        Err(e) => error_response(e),
    }
}

#[delete("/{entity_type}/{field_id}")]
pub async fn deactivate_field(
    path: web::Path<(String, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (entity_type, field_id) = path.into_inner();
    if let Err(resp) = parse_entity_type(&entity_type) {
        return resp;
    }
    match field_service::deactivate_field(repo.get_ref(), &user, field_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

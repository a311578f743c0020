use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::user::UpdateUser;
use crate::dto::users::{CreateUserRequest, UpdateUserRequest};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{error_response, validate_payload};
use crate::services::users as user_service;
use crate::services::users::CreateUser;

#[get("")]
pub async fn list_users(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match user_service::list_users(repo.get_ref(), &user) {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => error_response(e),
    }
}

#[get("/{user_id}")]
pub async fn get_user(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match user_service::get_user(repo.get_ref(), &user, path.into_inner()) {
        Ok(found) => HttpResponse::Ok().json(found),
        Err(e) => error_response(e),
    }
}

#[post("")]
pub async fn create_user(
    payload: web::Json<CreateUserRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }
    let payload = payload.into_inner();
    let request = CreateUser {
        email: payload.email,
        password: payload.password,
        first_name: payload.first_name,
        last_name: payload.last_name,
        role: payload.role,
    };
    match user_service::create_user(repo.get_ref(), &user, request) {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => error_response(e),
    }
}

#[put("/{user_id}")]
pub async fn update_user(
    path: web::Path<i32>,
    payload: web::Json<UpdateUserRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }
    let payload = payload.into_inner();
    let updates = UpdateUser {
        first_name: payload.first_name,
        last_name: payload.last_name,
        role: payload.role,
    };
    match user_service::update_user(repo.get_ref(), &user, path.into_inner(), &updates) {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => error_response(e),
    }
}

#[delete("/{user_id}")]
pub async fn delete_user(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match user_service::delete_user(repo.get_ref(), &user, path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

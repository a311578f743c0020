use actix_web::{HttpResponse, Responder, get, post, web};
use log::error;

use crate::dto::auth::{AuthResponse, LoginRequest, RegisterRequest, RegisterResponse};
use crate::models::auth::{AuthenticatedUser, issue_token};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{error_response, validate_payload};
use crate::services::auth as auth_service;
use crate::services::auth::RegisterOrganization;

#[post("/register")]
pub async fn register(
    payload: web::Json<RegisterRequest>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }
    let payload = payload.into_inner();

    let request = RegisterOrganization {
        organization_name: payload.organization_name,
        slug: payload.slug,
        email: payload.email,
        password: payload.password,
        first_name: payload.first_name,
        last_name: payload.last_name,
    };

    match auth_service::register_organization(repo.get_ref(), request) {
        Ok((organization, user)) => match issue_token(&user, &config.secret) {
            Ok(token) => HttpResponse::Created().json(RegisterResponse {
                token,
                organization,
                user,
            }),
            Err(e) => {
                error!("Failed to issue token: {e}");
                HttpResponse::InternalServerError().finish()
            }
        },
        Err(e) => error_response(e),
    }
}

#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }

    match auth_service::login(repo.get_ref(), &payload.slug, &payload.email, &payload.password) {
        Ok(user) => match issue_token(&user, &config.secret) {
            Ok(token) => HttpResponse::Ok().json(AuthResponse { token, user }),
            Err(e) => {
                error!("Failed to issue token: {e}");
                HttpResponse::InternalServerError().finish()
            }
        },
        Err(e) => error_response(e),
    }
}

#[get("/me")]
pub async fn me(user: AuthenticatedUser, repo: web::Data<DieselRepository>) -> impl Responder {
    match auth_service::current_user(repo.get_ref(), user.user_id, user.organization_id) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => error_response(e),
    }
}

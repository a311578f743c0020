use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::accounts::{AccountListParams, CreateAccountRequest, UpdateAccountRequest};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{AccountListQuery, DieselRepository};
use crate::routes::{error_response, validate_payload};
use crate::services::accounts as account_service;

#[get("")]
pub async fn list_accounts(
    params: web::Query<AccountListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = params.into_inner();
    let page = params.page.normalized();

    let mut query = AccountListQuery::new(user.organization_id).paginate(page.page, page.per_page);
    if let Some(search) = params.search.filter(|s| !s.trim().is_empty()) {
        query = query.search(search.trim());
    }

    match account_service::list_accounts(repo.get_ref(), query) {
        Ok((total, accounts)) => {
            HttpResponse::Ok().json(Paginated::new(accounts, total, page.page, page.per_page))
        }
        Err(e) => error_response(e),
    }
}

#[get("/{account_id}")]
pub async fn get_account(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match account_service::get_account(repo.get_ref(), &user, path.into_inner()) {
        Ok(account) => HttpResponse::Ok().json(account),
        Err(e) => error_response(e),
    }
}

#[post("")]
pub async fn create_account(
    payload: web::Json<CreateAccountRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }
    let new_account = payload.into_inner().into_new_account();
    match account_service::create_account(repo.get_ref(), &user, new_account) {
        Ok(account) => HttpResponse::Created().json(account),
        Err(e) => error_response(e),
    }
}

#[put("/{account_id}")]
pub async fn update_account(
    path: web::Path<i32>,
    payload: web::Json<UpdateAccountRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }
    let updates = payload.into_inner().into_update();
    match account_service::update_account(repo.get_ref(), &user, path.into_inner(), &updates) {
        Ok(account) => HttpResponse::Ok().json(account),
        Err(e) => error_response(e),
    }
}

#[delete("/{account_id}")]
pub async fn delete_account(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match account_service::delete_account(repo.get_ref(), &user, path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

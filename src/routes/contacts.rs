use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::contacts::{ContactListParams, CreateContactRequest, UpdateContactRequest};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{ContactListQuery, DieselRepository};
use crate::routes::{error_response, validate_payload};
use crate::services::contacts as contact_service;

#[get("")]
pub async fn list_contacts(
    params: web::Query<ContactListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = params.into_inner();
    let page = params.page.normalized();

    let mut query = ContactListQuery::new(user.organization_id).paginate(page.page, page.per_page);
    if let Some(search) = params.search.filter(|s| !s.trim().is_empty()) {
        query = query.search(search.trim());
    }
    if let Some(account_id) = params.account_id {
        query = query.account_id(account_id);
    }

    match contact_service::list_contacts(repo.get_ref(), query) {
        Ok((total, contacts)) => {
            HttpResponse::Ok().json(Paginated::new(contacts, total, page.page, page.per_page))
        }
        Err(e) => error_response(e),
    }
}

#[get("/{contact_id}")]
pub async fn get_contact(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match contact_service::get_contact(repo.get_ref(), &user, path.into_inner()) {
        Ok(contact) => HttpResponse::Ok().json(contact),
        Err(e) => error_response(e),
    }
}

#[post("")]
pub async fn create_contact(
    payload: web::Json<CreateContactRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }
    let new_contact = payload.into_inner().into_new_contact();
    match contact_service::create_contact(repo.get_ref(), &user, new_contact) {
        Ok(contact) => HttpResponse::Created().json(contact),
        Err(e) => error_response(e),
    }
}

#[put("/{contact_id}")]
pub async fn update_contact(
    path: web::Path<i32>,
    payload: web::Json<UpdateContactRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }
    let updates = payload.into_inner().into_update();
    match contact_service::update_contact(repo.get_ref(), &user, path.into_inner(), &updates) {
        Ok(contact) => HttpResponse::Ok().json(contact),
        Err(e) => error_response(e),
    }
}

#[delete("/{contact_id}")]
pub async fn delete_contact(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match contact_service::delete_contact(repo.get_ref(), &user, path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::lead_event::LeadEventType;
use crate::dto::leads::{
    ConvertLeadResponse, CreateLeadEventRequest, CreateLeadRequest, LeadEventListParams,
    LeadEventResponse, LeadListParams, UpdateLeadRequest,
};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{DieselRepository, LeadEventListQuery, LeadListQuery};
use crate::routes::{error_response, validate_payload};
use crate::services::leads as lead_service;

#[get("")]
pub async fn list_leads(
    params: web::Query<LeadListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = params.into_inner();
    let page = params.page.normalized();

    let mut query = LeadListQuery::new(user.organization_id).paginate(page.page, page.per_page);
    if let Some(search) = params.search.filter(|s| !s.trim().is_empty()) {
        query = query.search(search.trim());
    }
    if let Some(status) = params.status {
        query = query.status(status);
    }
    if let Some(assigned_to) = params.assigned_to {
        query = query.assigned_to(assigned_to);
    }

    match lead_service::list_leads(repo.get_ref(), query) {
        Ok((total, leads)) => {
            HttpResponse::Ok().json(Paginated::new(leads, total, page.page, page.per_page))
        }
        Err(e) => error_response(e),
    }
}

#[get("/{lead_id}")]
pub async fn get_lead(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match lead_service::get_lead(repo.get_ref(), &user, path.into_inner()) {
        Ok(lead) => HttpResponse::Ok().json(lead),
        Err(e) => error_response(e),
    }
}

#[post("")]
pub async fn create_lead(
    payload: web::Json<CreateLeadRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }
    let new_lead = payload.into_inner().into_new_lead();
    match lead_service::create_lead(repo.get_ref(), &user, new_lead) {
        Ok(lead) => HttpResponse::Created().json(lead),
        Err(e) => error_response(e),
    }
}

#[put("/{lead_id}")]
pub async fn update_lead(
    path: web::Path<i32>,
    payload: web::Json<UpdateLeadRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }
    let updates = payload.into_inner().into_update();
    match lead_service::update_lead(repo.get_ref(), &user, path.into_inner(), &updates) {
        Ok(lead) => HttpResponse::Ok().json(lead),
        Err(e) => error_response(e),
    }
}

#[delete("/{lead_id}")]
pub async fn delete_lead(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match lead_service::delete_lead(repo.get_ref(), &user, path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

#[post("/{lead_id}/convert")]
pub async fn convert_lead(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match lead_service::convert_lead(repo.get_ref(), &user, path.into_inner()) {
        Ok((lead, account, contact)) => HttpResponse::Ok().json(ConvertLeadResponse {
            lead,
            account,
            contact,
        }),
        Err(e) => error_response(e),
    }
}

#[get("/{lead_id}/events")]
pub async fn list_lead_events(
    path: web::Path<i32>,
    params: web::Query<LeadEventListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = params.into_inner();
    let page = params.page.normalized();

    let mut query =
        LeadEventListQuery::new(path.into_inner()).paginate(page.page, page.per_page);
    if let Some(event_type) = params.event_type.filter(|s| !s.is_empty()) {
        query = query.event_type(LeadEventType::from(event_type.as_str()));
    }

    match lead_service::list_lead_events(repo.get_ref(), &user, query) {
        Ok((total, events)) => {
            let items = events
                .into_iter()
                .map(|(event, author)| LeadEventResponse {
                    event,
                    user_name: author.full_name(),
                })
                .collect();
            HttpResponse::Ok().json(Paginated::new(items, total, page.page, page.per_page))
        }
        Err(e) => error_response(e),
    }
}

#[post("/{lead_id}/events")]
pub async fn create_lead_event(
    path: web::Path<i32>,
    payload: web::Json<CreateLeadEventRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }
    let payload = payload.into_inner();
    let event_type = LeadEventType::from(payload.event_type.as_str());

    match lead_service::add_lead_event(
        repo.get_ref(),
        &user,
        path.into_inner(),
        event_type,
        &payload.text,
    ) {
        Ok(event) => HttpResponse::Created().json(event),
        Err(e) => error_response(e),
    }
}

use actix_web::{HttpResponse, Responder, get, post, web};

use crate::dto::PageParams;
use crate::dto::mac_search::{MacSearchRequest, PortalSummary, SaveCredentialsRequest};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::pagination::Paginated;
use crate::repository::{DieselRepository, Pagination};
use crate::routes::{error_response, validate_payload};
use crate::services::mac_search as search_service;

#[post("/search")]
pub async fn search(
    payload: web::Json<MacSearchRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }
    match search_service::search(
        repo.get_ref(),
        config.get_ref(),
        &user,
        &payload.mac_address,
    )
    .await
    {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => error_response(e),
    }
}

#[get("/results/{search_id}")]
pub async fn search_result(
    path: web::Path<uuid::Uuid>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match search_service::get_search_result(repo.get_ref(), &user, &path.into_inner()) {
        Ok(entry) => HttpResponse::Ok().json(entry),
        Err(e) => error_response(e),
    }
}

#[get("/history")]
pub async fn history(
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let page = params.into_inner().normalized();
    let pagination = Pagination {
        page: page.page,
        per_page: page.per_page,
    };

    match search_service::list_history(repo.get_ref(), &user, Some(pagination)) {
        Ok((total, entries)) => {
            HttpResponse::Ok().json(Paginated::new(entries, total, page.page, page.per_page))
        }
        Err(e) => error_response(e),
    }
}

#[get("/portals")]
pub async fn list_portals(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    match search_service::list_portals(repo.get_ref(), config.get_ref(), &user) {
        Ok(portals) => {
            let summaries: Vec<PortalSummary> = portals
                .into_iter()
                .map(|(portal, credentials_configured)| PortalSummary {
                    id: portal.id,
                    name: portal.name,
                    base_url: portal.base_url,
                    credentials_configured,
                })
                .collect();
            HttpResponse::Ok().json(summaries)
        }
        Err(e) => error_response(e),
    }
}

#[post("/credentials")]
pub async fn save_credentials(
    payload: web::Json<SaveCredentialsRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }
    match search_service::save_credentials(
        repo.get_ref(),
        config.get_ref(),
        &user,
        &payload.portal_id,
        &payload.username,
        &payload.password,
    ) {
        Ok(saved) => HttpResponse::Ok().json(saved),
        Err(e) => error_response(e),
    }
}

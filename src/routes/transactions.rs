use actix_web::{HttpResponse, Responder, get, post, put, web};

use crate::dto::transactions::{
    CreateTransactionRequest, TransactionListParams, UpdateTransactionRequest,
};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{DieselRepository, TransactionListQuery};
use crate::routes::{error_response, validate_payload};
use crate::services::transactions as transaction_service;

#[get("")]
pub async fn list_transactions(
    params: web::Query<TransactionListParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = params.into_inner();
    let page = params.page.normalized();

    let mut query =
        TransactionListQuery::new(user.organization_id).paginate(page.page, page.per_page);
    if let Some(status) = params.status {
        query = query.status(status);
    }

    match transaction_service::list_transactions(repo.get_ref(), query) {
        Ok((total, records)) => {
            HttpResponse::Ok().json(Paginated::new(records, total, page.page, page.per_page))
        }
        Err(e) => error_response(e),
    }
}

#[get("/{transaction_id}")]
pub async fn get_transaction(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match transaction_service::get_transaction(repo.get_ref(), &user, path.into_inner()) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => error_response(e),
    }
}

#[post("")]
pub async fn create_transaction(
    payload: web::Json<CreateTransactionRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }
    let new_tx = payload.into_inner().into_new_transaction();
    match transaction_service::create_transaction(repo.get_ref(), &user, new_tx) {
        Ok(record) => HttpResponse::Created().json(record),
        Err(e) => error_response(e),
    }
}

#[put("/{transaction_id}")]
pub async fn update_transaction(
    path: web::Path<i32>,
    payload: web::Json<UpdateTransactionRequest>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(resp) = validate_payload(&*payload) {
        return resp;
    }
    let updates = payload.into_inner().into_update();
    match transaction_service::update_transaction(
        repo.get_ref(),
        &user,
        path.into_inner(),
        &updates,
    ) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => error_response(e),
    }
}

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, put},
};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::{
    application::{
        usecases::invoices::{INVOICES_PATH, InvoiceMutationError, InvoiceUseCase},
        validation::FieldErrors,
    },
    domain::{repositories::invoices::InvoiceRepository, value_objects::invoices::InvoiceFormData},
    infrastructure::{
        axum_http::error_responses::AppError,
        caching::InMemoryPageCache,
        postgres::{postgres_connection::PgPoolSquad, repositories::invoices::InvoicePostgres},
    },
};

/// Mirrors the shape the invoice form renders: field errors inline next to
/// the inputs, one operation-level message.
#[derive(Debug, Serialize)]
pub struct InvoiceFormState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    pub message: String,
}

pub struct InvoicesState<R>
where
    R: InvoiceRepository + Send + Sync + 'static,
{
    usecase: InvoiceUseCase<R, InMemoryPageCache>,
    page_cache: Arc<InMemoryPageCache>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>, page_cache: Arc<InMemoryPageCache>) -> Router {
    let invoice_repository = InvoicePostgres::new(Arc::clone(&db_pool));
    let invoice_usecase = InvoiceUseCase::new(Arc::new(invoice_repository), Arc::clone(&page_cache));

    Router::new()
        .route("/", get(list_invoices).post(create_invoice))
        .route("/:id", put(update_invoice).delete(delete_invoice))
        .with_state(Arc::new(InvoicesState {
            usecase: invoice_usecase,
            page_cache,
        }))
}

pub async fn list_invoices<R>(State(state): State<Arc<InvoicesState<R>>>) -> Response
where
    R: InvoiceRepository + Send + Sync + 'static,
{
    if let Some(cached) = state.page_cache.get(INVOICES_PATH) {
        return Json(cached).into_response();
    }

    match state.usecase.list_invoices().await {
        Ok(invoices) => {
            let payload = match serde_json::to_value(&invoices) {
                Ok(payload) => payload,
                Err(err) => return AppError::Internal(err.into()).into_response(),
            };
            state.page_cache.put(INVOICES_PATH, payload.clone());
            Json(payload).into_response()
        }
        Err(err) => {
            error!(db_error = ?err, "invoices: list failed");
            AppError::Internal(err).into_response()
        }
    }
}

pub async fn create_invoice<R>(
    State(state): State<Arc<InvoicesState<R>>>,
    Form(form): Form<InvoiceFormData>,
) -> Response
where
    R: InvoiceRepository + Send + Sync + 'static,
{
    match state.usecase.create_invoice(form).await {
        Ok(_) => Redirect::to(INVOICES_PATH).into_response(),
        Err(err) => invoice_error_response(err),
    }
}

pub async fn update_invoice<R>(
    State(state): State<Arc<InvoicesState<R>>>,
    Path(id): Path<String>,
    Form(form): Form<InvoiceFormData>,
) -> Response
where
    R: InvoiceRepository + Send + Sync + 'static,
{
    match state.usecase.update_invoice(&id, form).await {
        Ok(()) => Redirect::to(INVOICES_PATH).into_response(),
        Err(err) => invoice_error_response(err),
    }
}

pub async fn delete_invoice<R>(
    State(state): State<Arc<InvoicesState<R>>>,
    Path(id): Path<Uuid>,
) -> Response
where
    R: InvoiceRepository + Send + Sync + 'static,
{
    match state.usecase.delete_invoice(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => invoice_error_response(err),
    }
}

fn invoice_error_response(err: InvoiceMutationError) -> Response {
    let status = err.status_code();
    let message = err.to_string();
    match err {
        InvoiceMutationError::InvalidFields(errors) => (
            status,
            Json(InvoiceFormState {
                errors: Some(errors),
                message,
            }),
        )
            .into_response(),
        InvoiceMutationError::Integrity(fault) => {
            error!(error = ?fault, "invoices: integrity fault");
            AppError::Internal(fault).into_response()
        }
        _ => (
            status,
            Json(InvoiceFormState {
                errors: None,
                message,
            }),
        )
            .into_response(),
    }
}

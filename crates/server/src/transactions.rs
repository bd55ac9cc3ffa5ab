//! Transactions API endpoints

use api_types::{
    Pagination, RestResponse,
    transaction::{
        DateRangeView, DetailView, SummaryView, TransactionCreated, TransactionDraft,
        TransactionListResponse, TransactionView,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{ServerError, server::ServerState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// 0-based page index.
    #[serde(default)]
    pub page: u64,
    pub size: Option<u64>,
    /// `yyyy-mm-dd`; defaults to one month ago.
    pub start_date: Option<String>,
    /// `yyyy-mm-dd`; defaults to today.
    pub end_date: Option<String>,
    pub status: Option<String>,
}

pub async fn list(
    State(state): State<ServerState>,
    Path(merchant_id): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<RestResponse<TransactionListResponse>>, ServerError> {
    let size = params.size.unwrap_or(20);
    if !(1..=100).contains(&size) {
        return Err(ServerError::Generic(
            "size must be between 1 and 100".to_string(),
        ));
    }

    let listing = state
        .engine
        .list_transactions(engine::TransactionQuery {
            merchant_id,
            start_date: params.start_date,
            end_date: params.end_date,
            status: params.status,
            page: params.page,
            size,
        })
        .await?;

    Ok(Json(RestResponse::success(map_listing(listing))))
}

pub async fn create(
    State(state): State<ServerState>,
    Path(merchant_id): Path<String>,
    Json(payload): Json<Option<TransactionDraft>>,
) -> Result<(StatusCode, Json<RestResponse<TransactionCreated>>), ServerError> {
    let created = state
        .engine
        .create_transaction(&merchant_id, payload.map(map_draft))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RestResponse::success(TransactionCreated {
            merchant_id: created.merchant_id,
            transaction_id: created.txn_id,
        })),
    ))
}

fn map_listing(listing: engine::TransactionListing) -> TransactionListResponse {
    TransactionListResponse {
        merchant_id: listing.merchant_id,
        date_range: DateRangeView {
            start: listing.range.start,
            end: listing.range.end_exclusive,
        },
        summary: SummaryView {
            total_transactions: listing.summary.total_transactions,
            total_amount_minor: listing.summary.total_amount_minor,
            currency: listing.summary.currency,
            by_status: listing.summary.by_status,
        },
        transactions: listing
            .transactions
            .into_iter()
            .map(map_transaction)
            .collect(),
        pagination: Pagination {
            page: listing.pagination.page,
            page_size: listing.pagination.page_size,
            total_pages: listing.pagination.total_pages,
            total_elements: listing.pagination.total_elements,
        },
    }
}

fn map_transaction(tx: engine::TransactionWithDetails) -> TransactionView {
    let engine::TransactionWithDetails { master, details } = tx;
    TransactionView {
        txn_id: master.txn_id,
        amount_minor: master.amount_minor,
        currency: master.currency,
        status: master.status,
        timestamp: master.created_at,
        card_type: master.card_type,
        card_last4: master.card_last4,
        acquirer: master.acquirer,
        issuer: master.issuer,
        details: details
            .into_iter()
            .map(|detail| DetailView {
                detail_id: detail.txn_detail_id,
                detail_type: detail.detail_type,
                amount_minor: detail.amount_minor,
                description: detail.description,
            })
            .collect(),
    }
}

fn map_draft(draft: TransactionDraft) -> engine::TransactionDraft {
    engine::TransactionDraft {
        txn_id: draft.txn_id,
        amount_minor: draft.amount_minor,
        currency: draft.currency,
        status: draft.status,
        created_at: draft.created_at,
        local_txn_date_time: draft.local_txn_date_time,
        txn_date: draft.txn_date,
        card_type: draft.card_type,
        card_last4: draft.card_last4,
    }
}

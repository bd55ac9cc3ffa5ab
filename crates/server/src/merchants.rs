//! Merchants API endpoints

use api_types::{
    Pagination, RestResponse,
    merchant::{
        CreateMerchantRequest, CreateMerchantResponse, MerchantListResponse, MerchantView,
        UpdateMerchantRequest, UpdateMerchantResponse,
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
pub struct ListParams {
    #[serde(default)]
    pub page: u64,
    pub size: Option<u64>,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<RestResponse<MerchantListResponse>>, ServerError> {
    let page = state
        .engine
        .list_merchants(params.page, params.size.unwrap_or(10))
        .await?;

    Ok(Json(RestResponse::success(MerchantListResponse {
        merchants: page.merchants.into_iter().map(map_merchant).collect(),
        pagination: Pagination {
            page: page.pagination.page,
            page_size: page.pagination.page_size,
            total_pages: page.pagination.total_pages,
            total_elements: page.pagination.total_elements,
        },
    })))
}

pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<RestResponse<MerchantView>>, ServerError> {
    let merchant = state.engine.merchant(id).await?;
    Ok(Json(RestResponse::success(map_merchant(merchant))))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateMerchantRequest>,
) -> Result<(StatusCode, Json<RestResponse<CreateMerchantResponse>>), ServerError> {
    let created = state
        .engine
        .create_merchant(engine::MerchantDraft {
            merchant_name: payload.merchant_name,
            business_type: payload.business_type,
            website_url: payload.website_url,
            contact_email: payload.contact_email,
            contact_phone: payload.contact_phone,
            registration_number: payload.registration_number,
            country: payload.country,
            address_line1: payload.address_line1,
            address_line2: payload.address_line2,
            city: payload.city,
            state: payload.state,
            postal_code: payload.postal_code,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RestResponse::success(CreateMerchantResponse {
            merchant_id: created.merchant_id,
            merchant_code: created.merchant_code,
            status: created.status,
        })),
    ))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateMerchantRequest>,
) -> Result<Json<RestResponse<UpdateMerchantResponse>>, ServerError> {
    let updated = state
        .engine
        .update_merchant(
            id,
            engine::MerchantPatch {
                merchant_name: payload.merchant_name,
                contact_email: payload.contact_email,
                contact_phone: payload.contact_phone,
                settlement_cycle: payload.settlement_cycle,
                payout_account_number: payload.payout_account_number,
                payout_bank_name: payload.payout_bank_name,
                payout_bank_country: payload.payout_bank_country,
                daily_txn_limit_minor: payload.daily_txn_limit_minor,
                monthly_txn_limit_minor: payload.monthly_txn_limit_minor,
            },
        )
        .await?;

    Ok(Json(RestResponse::success(UpdateMerchantResponse {
        merchant_id: updated.merchant_id,
        status: updated.status,
        message: "Merchant updated successfully".to_string(),
    })))
}

pub async fn deactivate(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<RestResponse<()>>, ServerError> {
    state.engine.deactivate_merchant(id).await?;
    Ok(Json(RestResponse::empty()))
}

fn map_merchant(merchant: engine::merchants::Model) -> MerchantView {
    MerchantView {
        merchant_id: merchant.merchant_id,
        merchant_code: merchant.merchant_code,
        merchant_name: merchant.merchant_name,
        business_type: merchant.business_type,
        website_url: merchant.website_url,
        contact_email: merchant.contact_email,
        contact_phone: merchant.contact_phone,
        registration_number: merchant.registration_number,
        country: merchant.country,
        address_line1: merchant.address_line1,
        address_line2: merchant.address_line2,
        city: merchant.city,
        state: merchant.state,
        postal_code: merchant.postal_code,
        settlement_currency: merchant.settlement_currency,
        settlement_cycle: merchant.settlement_cycle,
        payout_account_number: merchant.payout_account_number,
        payout_bank_name: merchant.payout_bank_name,
        payout_bank_country: merchant.payout_bank_country,
        risk_level: merchant.risk_level,
        daily_txn_limit_minor: merchant.daily_txn_limit_minor,
        monthly_txn_limit_minor: merchant.monthly_txn_limit_minor,
        status: merchant.status,
        created_at: merchant.created_at,
        updated_at: merchant.updated_at,
    }
}

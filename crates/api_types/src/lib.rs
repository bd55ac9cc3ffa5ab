use serde::{Deserialize, Serialize};

/// Envelope shared by every endpoint.
///
/// Errors reuse the same shape: `code` mirrors the HTTP status, `message`
/// carries the failure text and `data` is omitted.
#[derive(Debug, Serialize, Deserialize)]
pub struct RestResponse<T> {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> RestResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: "200".to_string(),
            message: "Success".to_string(),
            data: Some(data),
        }
    }
}

impl RestResponse<()> {
    /// Success without a payload.
    pub fn empty() -> Self {
        Self {
            code: "200".to_string(),
            message: "Success".to_string(),
            data: None,
        }
    }

    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            data: None,
        }
    }
}

/// Page window plus totals of the whole filtered set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub total_elements: u64,
}

pub mod transaction {
    use std::collections::HashMap;

    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Serialize};

    use super::Pagination;

    /// The resolved half-open UTC interval the listing covered.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DateRangeView {
        pub start: DateTime<Utc>,
        pub end: DateTime<Utc>,
    }

    /// One itemized component of a master transaction.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DetailView {
        pub detail_id: i64,
        #[serde(rename = "type")]
        pub detail_type: String,
        pub amount_minor: i64,
        pub description: Option<String>,
    }

    /// A master transaction with its detail rows.
    ///
    /// `acquirer`/`issuer` are always absent: the enrichment feeding them
    /// does not exist yet.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub txn_id: i64,
        pub amount_minor: i64,
        pub currency: String,
        pub status: String,
        /// RFC3339 UTC creation instant.
        pub timestamp: DateTime<Utc>,
        pub card_type: Option<String>,
        pub card_last4: Option<String>,
        pub acquirer: Option<String>,
        pub issuer: Option<String>,
        pub details: Vec<DetailView>,
    }

    /// Status totals over the entire filtered range, not just the page.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SummaryView {
        pub total_transactions: i64,
        pub total_amount_minor: i64,
        pub currency: String,
        pub by_status: HashMap<String, i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionListResponse {
        pub merchant_id: String,
        pub date_range: DateRangeView,
        pub summary: SummaryView,
        pub transactions: Vec<TransactionView>,
        pub pagination: Pagination,
    }

    /// Create request body: a possibly partially filled master record.
    ///
    /// A supplied `txn_id` is ignored; the store assigns the identifier.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionDraft {
        pub txn_id: Option<i64>,
        pub amount_minor: i64,
        pub currency: String,
        pub status: Option<String>,
        pub created_at: Option<DateTime<Utc>>,
        pub local_txn_date_time: Option<DateTime<Utc>>,
        pub txn_date: Option<NaiveDate>,
        pub card_type: Option<String>,
        pub card_last4: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionCreated {
        pub merchant_id: String,
        pub transaction_id: i64,
    }
}

pub mod merchant {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    use super::Pagination;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MerchantView {
        pub merchant_id: i64,
        pub merchant_code: String,
        pub merchant_name: String,
        pub business_type: String,
        pub website_url: Option<String>,
        pub contact_email: String,
        pub contact_phone: String,
        pub registration_number: Option<String>,
        pub country: String,
        pub address_line1: Option<String>,
        pub address_line2: Option<String>,
        pub city: Option<String>,
        pub state: Option<String>,
        pub postal_code: Option<String>,
        pub settlement_currency: String,
        pub settlement_cycle: String,
        pub payout_account_number: Option<String>,
        pub payout_bank_name: Option<String>,
        pub payout_bank_country: Option<String>,
        pub risk_level: String,
        pub daily_txn_limit_minor: Option<i64>,
        pub monthly_txn_limit_minor: Option<i64>,
        pub status: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MerchantListResponse {
        pub merchants: Vec<MerchantView>,
        pub pagination: Pagination,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateMerchantRequest {
        pub merchant_name: String,
        pub business_type: String,
        pub website_url: Option<String>,
        pub contact_email: String,
        pub contact_phone: String,
        pub registration_number: Option<String>,
        pub country: String,
        pub address_line1: Option<String>,
        pub address_line2: Option<String>,
        pub city: Option<String>,
        pub state: Option<String>,
        pub postal_code: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateMerchantResponse {
        pub merchant_id: i64,
        pub merchant_code: String,
        pub status: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UpdateMerchantRequest {
        pub merchant_name: Option<String>,
        pub contact_email: Option<String>,
        pub contact_phone: Option<String>,
        pub settlement_cycle: Option<String>,
        pub payout_account_number: Option<String>,
        pub payout_bank_name: Option<String>,
        pub payout_bank_country: Option<String>,
        pub daily_txn_limit_minor: Option<i64>,
        pub monthly_txn_limit_minor: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UpdateMerchantResponse {
        pub merchant_id: i64,
        pub status: String,
        pub message: String,
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue};

use crate::{EngineError, ResultEngine, transaction_masters};

use super::super::Engine;

/// A caller-supplied, possibly partially filled master record.
///
/// A supplied `txn_id` is discarded on ingestion so the store always performs
/// an insert, never an update by id.
#[derive(Clone, Debug, Default)]
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

impl Engine {
    /// Normalizes and persists a newly submitted transaction.
    ///
    /// Missing timing fields default to now, a missing status to `PENDING`.
    /// No business validation (limits, currency checks, duplicate detection)
    /// happens here, and there is no idempotency: two identical submissions
    /// produce two records.
    pub async fn create_transaction(
        &self,
        merchant_id: &str,
        draft: Option<TransactionDraft>,
    ) -> ResultEngine<transaction_masters::Model> {
        let draft = draft.ok_or_else(|| {
            EngineError::Validation("transaction details are required".to_string())
        })?;
        let now = Utc::now();

        let model = transaction_masters::ActiveModel {
            txn_id: ActiveValue::NotSet,
            merchant_id: ActiveValue::Set(merchant_id.to_string()),
            amount_minor: ActiveValue::Set(draft.amount_minor),
            currency: ActiveValue::Set(draft.currency),
            status: ActiveValue::Set(draft.status.unwrap_or_else(|| "PENDING".to_string())),
            created_at: ActiveValue::Set(draft.created_at.unwrap_or(now)),
            local_txn_date_time: ActiveValue::Set(draft.local_txn_date_time.unwrap_or(now)),
            txn_date: ActiveValue::Set(draft.txn_date.unwrap_or_else(|| now.date_naive())),
            card_type: ActiveValue::Set(draft.card_type),
            card_last4: ActiveValue::Set(draft.card_last4),
            acquirer: ActiveValue::Set(None),
            issuer: ActiveValue::Set(None),
        };

        Ok(model.insert(&self.database).await?)
    }
}

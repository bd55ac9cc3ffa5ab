//! Merchant operations: plain field copy to and from the record store.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, EntityTrait, PaginatorTrait, QueryOrder, TransactionTrait,
};

use crate::{EngineError, PageInfo, ResultEngine, merchants};

use super::{Engine, with_tx};

/// Fields accepted when onboarding a merchant. Everything else is defaulted
/// by the engine (status `pending`, USD daily settlement, low risk, standard
/// limits) until operations review the account.
#[derive(Clone, Debug)]
pub struct MerchantDraft {
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

/// Partial merchant update; `None` keeps the stored value.
#[derive(Clone, Debug, Default)]
pub struct MerchantPatch {
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

#[derive(Clone, Debug)]
pub struct MerchantPage {
    pub merchants: Vec<merchants::Model>,
    pub pagination: PageInfo,
}

impl Engine {
    /// One page of merchants ordered by id, with totals for the whole table.
    pub async fn list_merchants(&self, page: u64, size: u64) -> ResultEngine<MerchantPage> {
        if size == 0 {
            return Err(EngineError::Validation("size must be > 0".to_string()));
        }

        let query = merchants::Entity::find().order_by_asc(merchants::Column::MerchantId);
        let total_elements = query.clone().count(&self.database).await?;
        let rows = query.paginate(&self.database, size).fetch_page(page).await?;

        Ok(MerchantPage {
            merchants: rows,
            pagination: PageInfo::new(page, size, total_elements),
        })
    }

    pub async fn merchant(&self, merchant_id: i64) -> ResultEngine<merchants::Model> {
        merchants::Entity::find_by_id(merchant_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("merchant not exists".to_string()))
    }

    /// Onboards a merchant. The merchant code derives from the store-assigned
    /// id, so the insert and the code update commit together.
    pub async fn create_merchant(&self, draft: MerchantDraft) -> ResultEngine<merchants::Model> {
        let now = Utc::now();

        with_tx!(self, |db_tx| {
            let inserted = merchants::ActiveModel {
                merchant_id: ActiveValue::NotSet,
                merchant_code: ActiveValue::Set(String::new()),
                merchant_name: ActiveValue::Set(draft.merchant_name),
                business_type: ActiveValue::Set(draft.business_type),
                website_url: ActiveValue::Set(draft.website_url),
                contact_email: ActiveValue::Set(draft.contact_email),
                contact_phone: ActiveValue::Set(draft.contact_phone),
                registration_number: ActiveValue::Set(draft.registration_number),
                country: ActiveValue::Set(draft.country),
                address_line1: ActiveValue::Set(draft.address_line1),
                address_line2: ActiveValue::Set(draft.address_line2),
                city: ActiveValue::Set(draft.city),
                state: ActiveValue::Set(draft.state),
                postal_code: ActiveValue::Set(draft.postal_code),
                settlement_currency: ActiveValue::Set("USD".to_string()),
                settlement_cycle: ActiveValue::Set("daily".to_string()),
                payout_account_number: ActiveValue::Set(None),
                payout_bank_name: ActiveValue::Set(None),
                payout_bank_country: ActiveValue::Set(None),
                risk_level: ActiveValue::Set("low".to_string()),
                daily_txn_limit_minor: ActiveValue::Set(Some(1_000_000)),
                monthly_txn_limit_minor: ActiveValue::Set(Some(10_000_000)),
                status: ActiveValue::Set("pending".to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            let with_code = merchants::ActiveModel {
                merchant_id: ActiveValue::Set(inserted.merchant_id),
                merchant_code: ActiveValue::Set(format!("MCH-{:05}", inserted.merchant_id)),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;

            Ok(with_code)
        })
    }

    /// Applies a partial update and marks the merchant active.
    pub async fn update_merchant(
        &self,
        merchant_id: i64,
        patch: MerchantPatch,
    ) -> ResultEngine<merchants::Model> {
        let existing = self.merchant(merchant_id).await?;

        let mut model = merchants::ActiveModel {
            merchant_id: ActiveValue::Set(existing.merchant_id),
            status: ActiveValue::Set("active".to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        if let Some(name) = patch.merchant_name {
            model.merchant_name = ActiveValue::Set(name);
        }
        if let Some(email) = patch.contact_email {
            model.contact_email = ActiveValue::Set(email);
        }
        if let Some(phone) = patch.contact_phone {
            model.contact_phone = ActiveValue::Set(phone);
        }
        if let Some(cycle) = patch.settlement_cycle {
            model.settlement_cycle = ActiveValue::Set(cycle);
        }
        if let Some(account) = patch.payout_account_number {
            model.payout_account_number = ActiveValue::Set(Some(account));
        }
        if let Some(bank) = patch.payout_bank_name {
            model.payout_bank_name = ActiveValue::Set(Some(bank));
        }
        if let Some(country) = patch.payout_bank_country {
            model.payout_bank_country = ActiveValue::Set(Some(country));
        }
        if let Some(limit) = patch.daily_txn_limit_minor {
            model.daily_txn_limit_minor = ActiveValue::Set(Some(limit));
        }
        if let Some(limit) = patch.monthly_txn_limit_minor {
            model.monthly_txn_limit_minor = ActiveValue::Set(Some(limit));
        }

        Ok(model.update(&self.database).await?)
    }

    /// Soft removal: the record stays, status becomes `inactive`.
    pub async fn deactivate_merchant(&self, merchant_id: i64) -> ResultEngine<()> {
        let existing = self.merchant(merchant_id).await?;

        merchants::ActiveModel {
            merchant_id: ActiveValue::Set(existing.merchant_id),
            status: ActiveValue::Set("inactive".to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.database)
        .await?;

        Ok(())
    }
}

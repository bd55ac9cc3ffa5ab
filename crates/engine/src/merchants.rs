//! Merchant records.
//!
//! Merchants are plain records: the engine copies fields in and out without
//! business rules. Monetary limits are integer minor units.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "merchants")]
pub struct Model {
    #[sea_orm(primary_key)]
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
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

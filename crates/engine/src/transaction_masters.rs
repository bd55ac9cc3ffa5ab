//! Transaction master rows.
//!
//! A master is the primary record of a card transaction: amount, status and
//! timing. Itemized components (fees, taxes) live in
//! [`transaction_details`](super::transaction_details) as child rows.

use sea_orm::entity::prelude::*;

/// Amounts are integer minor units; `status` is free-form text from the
/// gateway and is compared case-insensitively when filtering.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transaction_masters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub txn_id: i64,
    pub merchant_id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub local_txn_date_time: DateTimeUtc,
    pub txn_date: Date,
    pub card_type: Option<String>,
    pub card_last4: Option<String>,
    /// Populated by an external enrichment step that does not exist yet.
    pub acquirer: Option<String>,
    pub issuer: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transaction_details::Entity")]
    TransactionDetails,
}

impl Related<super::transaction_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransactionDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

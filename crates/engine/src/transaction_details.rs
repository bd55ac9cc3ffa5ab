//! Transaction detail rows.
//!
//! A detail itemizes one component of a master transaction (fee line, tax
//! line, ...). Details only exist under a master and are fetched in one
//! batch per listed page.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transaction_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub txn_detail_id: i64,
    pub master_txn_id: i64,
    pub detail_type: String,
    pub amount_minor: i64,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::transaction_masters::Entity",
        from = "Column::MasterTxnId",
        to = "super::transaction_masters::Column::TxnId"
    )]
    TransactionMasters,
}

impl Related<super::transaction_masters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransactionMasters.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

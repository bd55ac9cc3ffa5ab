use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum TransactionMasters {
    Table,
    TxnId,
    MerchantId,
    AmountMinor,
    Currency,
    Status,
    CreatedAt,
    LocalTxnDateTime,
    TxnDate,
    CardType,
    CardLast4,
    Acquirer,
    Issuer,
}

#[derive(Iden)]
enum TransactionDetails {
    Table,
    TxnDetailId,
    MasterTxnId,
    DetailType,
    AmountMinor,
    Description,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TransactionMasters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransactionMasters::TxnId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TransactionMasters::MerchantId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionMasters::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionMasters::Currency)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionMasters::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionMasters::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionMasters::LocalTxnDateTime)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionMasters::TxnDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TransactionMasters::CardType).string())
                    .col(ColumnDef::new(TransactionMasters::CardLast4).string())
                    .col(ColumnDef::new(TransactionMasters::Acquirer).string())
                    .col(ColumnDef::new(TransactionMasters::Issuer).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transaction_masters-merchant_id-created_at")
                    .table(TransactionMasters::Table)
                    .col(TransactionMasters::MerchantId)
                    .col(TransactionMasters::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransactionDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransactionDetails::TxnDetailId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TransactionDetails::MasterTxnId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionDetails::DetailType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionDetails::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TransactionDetails::Description).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transaction_details-master_txn_id")
                            .from(TransactionDetails::Table, TransactionDetails::MasterTxnId)
                            .to(TransactionMasters::Table, TransactionMasters::TxnId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transaction_details-master_txn_id")
                    .table(TransactionDetails::Table)
                    .col(TransactionDetails::MasterTxnId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TransactionDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TransactionMasters::Table).to_owned())
            .await?;
        Ok(())
    }
}

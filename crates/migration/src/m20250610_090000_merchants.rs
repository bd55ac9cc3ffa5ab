use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Merchants {
    Table,
    MerchantId,
    MerchantCode,
    MerchantName,
    BusinessType,
    WebsiteUrl,
    ContactEmail,
    ContactPhone,
    RegistrationNumber,
    Country,
    AddressLine1,
    AddressLine2,
    City,
    State,
    PostalCode,
    SettlementCurrency,
    SettlementCycle,
    PayoutAccountNumber,
    PayoutBankName,
    PayoutBankCountry,
    RiskLevel,
    DailyTxnLimitMinor,
    MonthlyTxnLimitMinor,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Merchants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Merchants::MerchantId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Merchants::MerchantCode).string().not_null())
                    .col(ColumnDef::new(Merchants::MerchantName).string().not_null())
                    .col(ColumnDef::new(Merchants::BusinessType).string().not_null())
                    .col(ColumnDef::new(Merchants::WebsiteUrl).string())
                    .col(ColumnDef::new(Merchants::ContactEmail).string().not_null())
                    .col(ColumnDef::new(Merchants::ContactPhone).string().not_null())
                    .col(ColumnDef::new(Merchants::RegistrationNumber).string())
                    .col(ColumnDef::new(Merchants::Country).string().not_null())
                    .col(ColumnDef::new(Merchants::AddressLine1).string())
                    .col(ColumnDef::new(Merchants::AddressLine2).string())
                    .col(ColumnDef::new(Merchants::City).string())
                    .col(ColumnDef::new(Merchants::State).string())
                    .col(ColumnDef::new(Merchants::PostalCode).string())
                    .col(
                        ColumnDef::new(Merchants::SettlementCurrency)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Merchants::SettlementCycle)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Merchants::PayoutAccountNumber).string())
                    .col(ColumnDef::new(Merchants::PayoutBankName).string())
                    .col(ColumnDef::new(Merchants::PayoutBankCountry).string())
                    .col(ColumnDef::new(Merchants::RiskLevel).string().not_null())
                    .col(ColumnDef::new(Merchants::DailyTxnLimitMinor).big_integer())
                    .col(ColumnDef::new(Merchants::MonthlyTxnLimitMinor).big_integer())
                    .col(ColumnDef::new(Merchants::Status).string().not_null())
                    .col(ColumnDef::new(Merchants::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Merchants::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Merchants::Table).to_owned())
            .await?;
        Ok(())
    }
}

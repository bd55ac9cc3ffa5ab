use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Statement, Value,
    sea_query::{Expr, Func},
};

use crate::{
    DateRange, EngineError, PageInfo, ResultEngine, StatusRow, Summary, transaction_details,
    transaction_masters,
};

use super::super::Engine;

/// Parameters for the merchant transaction listing.
///
/// Dates are optional `yyyy-mm-dd` text. The status filter is
/// case-insensitive; absent matches all statuses.
#[derive(Clone, Debug, Default)]
pub struct TransactionQuery {
    pub merchant_id: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    /// 0-based page index.
    pub page: u64,
    pub size: u64,
}

/// A master merged with its detail rows.
///
/// `details` is empty (never absent) when the master has no child rows, and
/// is ordered by detail id. The store does not guarantee an order, so we
/// impose one for stable output.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionWithDetails {
    pub master: transaction_masters::Model,
    pub details: Vec<transaction_details::Model>,
}

/// One page of enriched transactions plus totals over the whole filtered
/// range. Pagination and summary are independent of the page window.
#[derive(Clone, Debug)]
pub struct TransactionListing {
    pub merchant_id: String,
    pub range: DateRange,
    pub transactions: Vec<TransactionWithDetails>,
    pub pagination: PageInfo,
    pub summary: Summary,
}

/// Applies the shared merchant + range + status filter to any master query,
/// so page fetch and count can never drift apart.
trait ApplyListFilters: QueryFilter + Sized {
    fn apply_list_filters(self, query: &TransactionQuery, range: &DateRange) -> Self;
}

impl<T> ApplyListFilters for T
where
    T: QueryFilter + Sized,
{
    fn apply_list_filters(mut self, query: &TransactionQuery, range: &DateRange) -> Self {
        self = self
            .filter(transaction_masters::Column::MerchantId.eq(query.merchant_id.as_str()))
            .filter(transaction_masters::Column::CreatedAt.gte(range.start))
            .filter(transaction_masters::Column::CreatedAt.lt(range.end_exclusive));

        if let Some(status) = &query.status {
            self = self.filter(
                Expr::expr(Func::lower(Expr::col(transaction_masters::Column::Status)))
                    .eq(status.to_lowercase()),
            );
        }

        self
    }
}

impl Engine {
    /// Lists one page of a merchant's transactions enriched with their detail
    /// rows, plus pagination metadata and a status summary computed over the
    /// entire filtered range.
    ///
    /// The page fetch, total count and status aggregate are three independent
    /// reads issued concurrently and joined all-or-nothing under the
    /// engine's read deadline. The detail batch read only happens for a
    /// non-empty page.
    pub async fn list_transactions(
        &self,
        query: TransactionQuery,
    ) -> ResultEngine<TransactionListing> {
        if query.size == 0 {
            return Err(EngineError::Validation("size must be > 0".to_string()));
        }
        let range = DateRange::resolve(query.start_date.as_deref(), query.end_date.as_deref())?;

        let reads = async {
            tokio::try_join!(
                self.fetch_page(&query, &range),
                self.count_matching(&query, &range),
                self.status_aggregate(&query, &range),
            )
        };
        let (masters, total_elements, status_rows) =
            tokio::time::timeout(self.read_deadline, reads)
                .await
                .map_err(|_| EngineError::DeadlineExceeded(self.read_deadline))??;

        let mut details_by_parent = if masters.is_empty() {
            HashMap::new()
        } else {
            self.details_by_parent(&masters).await?
        };

        let transactions = masters
            .into_iter()
            .map(|master| {
                let details = details_by_parent.remove(&master.txn_id).unwrap_or_default();
                TransactionWithDetails { master, details }
            })
            .collect();

        Ok(TransactionListing {
            pagination: PageInfo::new(query.page, query.size, total_elements),
            summary: Summary::from_rows(&status_rows),
            merchant_id: query.merchant_id,
            range,
            transactions,
        })
    }

    /// Matching masters, newest first; ties on `created_at` break by id
    /// ascending so pages stay deterministic.
    async fn fetch_page(
        &self,
        query: &TransactionQuery,
        range: &DateRange,
    ) -> ResultEngine<Vec<transaction_masters::Model>> {
        let models = transaction_masters::Entity::find()
            .apply_list_filters(query, range)
            .order_by_desc(transaction_masters::Column::CreatedAt)
            .order_by_asc(transaction_masters::Column::TxnId)
            .limit(query.size)
            .offset(query.page.saturating_mul(query.size))
            .all(&self.database)
            .await?;
        Ok(models)
    }

    async fn count_matching(
        &self,
        query: &TransactionQuery,
        range: &DateRange,
    ) -> ResultEngine<u64> {
        let count = transaction_masters::Entity::find()
            .apply_list_filters(query, range)
            .count(&self.database)
            .await?;
        Ok(count)
    }

    async fn status_aggregate(
        &self,
        query: &TransactionQuery,
        range: &DateRange,
    ) -> ResultEngine<Vec<StatusRow>> {
        let backend = self.database.get_database_backend();
        let status_cond = if query.status.is_some() {
            " AND LOWER(status) = ?"
        } else {
            ""
        };
        let stmt = Statement::from_sql_and_values(
            backend,
            format!(
                "SELECT status, COUNT(*) AS txn_count, \
                 COALESCE(SUM(amount_minor), 0) AS total_amount_minor \
                 FROM transaction_masters \
                 WHERE merchant_id = ? AND created_at >= ? AND created_at < ?{status_cond} \
                 GROUP BY status"
            ),
            {
                let mut values: Vec<Value> = vec![
                    query.merchant_id.clone().into(),
                    range.start.into(),
                    range.end_exclusive.into(),
                ];
                if let Some(status) = &query.status {
                    values.push(status.to_lowercase().into());
                }
                values
            },
        );

        let rows = self.database.query_all(stmt).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(StatusRow {
                status: row.try_get("", "status")?,
                txn_count: row.try_get("", "txn_count")?,
                total_amount_minor: row.try_get("", "total_amount_minor").unwrap_or(0),
            });
        }
        Ok(out)
    }

    /// One batch read for all detail rows of the page, grouped by parent id.
    async fn details_by_parent(
        &self,
        masters: &[transaction_masters::Model],
    ) -> ResultEngine<HashMap<i64, Vec<transaction_details::Model>>> {
        let parent_ids: Vec<i64> = masters.iter().map(|m| m.txn_id).collect();
        let rows = transaction_details::Entity::find()
            .filter(transaction_details::Column::MasterTxnId.is_in(parent_ids))
            .order_by_asc(transaction_details::Column::TxnDetailId)
            .all(&self.database)
            .await?;

        let mut grouped: HashMap<i64, Vec<transaction_details::Model>> = HashMap::new();
        for row in rows {
            grouped.entry(row.master_txn_id).or_default().push(row);
        }
        Ok(grouped)
    }
}

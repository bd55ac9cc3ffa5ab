use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::ResultEngine;

pub mod merchants;
pub mod transactions;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

const DEFAULT_READ_DEADLINE: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    read_deadline: Duration,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
pub struct EngineBuilder {
    database: DatabaseConnection,
    read_deadline: Duration,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            database: DatabaseConnection::default(),
            read_deadline: DEFAULT_READ_DEADLINE,
        }
    }
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Deadline for the concurrent read set of one listing request.
    pub fn read_deadline(mut self, deadline: Duration) -> EngineBuilder {
        self.read_deadline = deadline;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            read_deadline: self.read_deadline,
        })
    }
}

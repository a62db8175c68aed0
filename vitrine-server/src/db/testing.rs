//! Scripted in-memory executor for tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::pool::{DbError, QueryExecutor, QueryOutput, Statement};

/// Replays canned replies in order and records every statement it sees.
///
/// Runs out of replies -> behaves like a closed pool.
#[derive(Default)]
pub struct ScriptedExecutor {
    replies: Mutex<VecDeque<Result<QueryOutput, DbError>>>,
    seen: Mutex<Vec<Statement>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, output: QueryOutput) -> Self {
        self.replies.lock().unwrap().push_back(Ok(output));
        self
    }

    pub fn fail(self) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(DbError::Sqlx(sqlx::Error::PoolClosed)));
        self
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn query(&self, statement: &Statement) -> Result<QueryOutput, DbError> {
        self.seen.lock().unwrap().push(statement.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(DbError::Sqlx(sqlx::Error::PoolClosed)))
    }
}

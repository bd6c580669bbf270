/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The identity on whose behalf an operation runs.
///
/// Passed explicitly into every owner-scoped operation instead of being read
/// from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: DbId,
}

impl Session {
    pub fn new(user_id: DbId) -> Self {
        Self { user_id }
    }
}

/// All database primary keys are SQLite INTEGER rowids.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Currency amounts in minor units (poisha, 1/100 taka).
pub type Cents = i64;

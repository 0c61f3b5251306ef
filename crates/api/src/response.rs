//! Success envelope. Everything except `/health` and `/auth/login` answers
//! with `{"data": ...}`.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

use serde::Serialize;

/// Discriminant of an operation result as seen by the transport layer.
///
/// Every failure is mapped to exactly one kind at the service boundary; the HTTP
/// layer only translates kinds to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeKind {
    Ok,
    BadRequest,
    Unauthorized,
    NotFound,
    Conflict,
    Internal,
}

impl OutcomeKind {
    pub fn is_ok(&self) -> bool {
        matches!(self, OutcomeKind::Ok)
    }
}

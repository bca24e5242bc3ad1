use crate::ParamError;

/// Largest page the events endpoint serves per request.
pub const MAX_LIMIT: u32 = 300;

const DEFAULT_LIMIT: u32 = 20;

/// Pagination window shared by every request made for one caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientParams {
    offset: u32,
    limit: u32,
}

impl ClientParams {
    pub fn new(offset: u32, limit: u32) -> Result<Self, ParamError> {
        if limit == 0 {
            return Err(ParamError::invalid_value(
                "limit",
                limit.to_string(),
                "limit must be greater than zero",
            ));
        }
        if limit > MAX_LIMIT {
            return Err(ParamError::invalid_value(
                "limit",
                limit.to_string(),
                format!("limit must not exceed {MAX_LIMIT}"),
            ));
        }
        Ok(Self { offset, limit })
    }

    pub const fn offset(&self) -> u32 {
        self.offset
    }

    pub const fn limit(&self) -> u32 {
        self.limit
    }
}

impl Default for ClientParams {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

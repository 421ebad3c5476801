/// Numeric response codes shared by the backend envelope and client errors

/// `code` value of a successful envelope
pub const SUCCESS_CODE: i64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    SystemError,
    NetworkError,
    TimeoutError,
    Unauthorized,
    Forbidden,
    TokenExpired,
    InvalidParams,
    MissingParams,
    BusinessError,
    ResourceNotFound,
    ThirdPartyError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 11] = [
        ErrorCode::SystemError,
        ErrorCode::NetworkError,
        ErrorCode::TimeoutError,
        ErrorCode::Unauthorized,
        ErrorCode::Forbidden,
        ErrorCode::TokenExpired,
        ErrorCode::InvalidParams,
        ErrorCode::MissingParams,
        ErrorCode::BusinessError,
        ErrorCode::ResourceNotFound,
        ErrorCode::ThirdPartyError,
    ];

    pub const fn code(self) -> i64 {
        match self {
            ErrorCode::SystemError => 10000,
            ErrorCode::NetworkError => 10001,
            ErrorCode::TimeoutError => 10002,
            ErrorCode::Unauthorized => 20001,
            ErrorCode::Forbidden => 20002,
            ErrorCode::TokenExpired => 20003,
            ErrorCode::InvalidParams => 30001,
            ErrorCode::MissingParams => 30002,
            ErrorCode::BusinessError => 40001,
            ErrorCode::ResourceNotFound => 40004,
            ErrorCode::ThirdPartyError => 50001,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorCode::SystemError => "SYSTEM_ERROR",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::TimeoutError => "TIMEOUT_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::TokenExpired => "TOKEN_EXPIRED",
            ErrorCode::InvalidParams => "INVALID_PARAMS",
            ErrorCode::MissingParams => "MISSING_PARAMS",
            ErrorCode::BusinessError => "BUSINESS_ERROR",
            ErrorCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ErrorCode::ThirdPartyError => "THIRD_PARTY_ERROR",
        }
    }

    /// Generic user-facing message used when the server supplies none
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorCode::SystemError => "System error, please try again later",
            ErrorCode::NetworkError => "Network error, please check your connection",
            ErrorCode::TimeoutError => "Request timed out, please try again",
            ErrorCode::Unauthorized => "Not signed in or session invalid",
            ErrorCode::Forbidden => "No permission to access this resource",
            ErrorCode::TokenExpired => "Session expired, please sign in again",
            ErrorCode::InvalidParams => "Invalid request parameters",
            ErrorCode::MissingParams => "Missing required parameters",
            ErrorCode::BusinessError => "Operation failed",
            ErrorCode::ResourceNotFound => "Resource not found",
            ErrorCode::ThirdPartyError => "Third-party service error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_lookup_round_trip() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::from_code(code.code()), Some(code));
        }
        assert_eq!(ErrorCode::from_code(SUCCESS_CODE), None);
        assert_eq!(ErrorCode::ResourceNotFound.code(), 40004);
        assert_eq!(ErrorCode::TimeoutError.to_string(), "TIMEOUT_ERROR(10002)");
    }
}

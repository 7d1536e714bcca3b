/// Error code registry for shiftrank
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Transport errors
/// - 3000-3999: Response shape errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_PARSE_ERROR: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1003;
    pub const CONFIG_INVALID_URL: u16 = 1004;

    // Transport errors (2000-2999)
    pub const TRANSPORT_STATUS: u16 = 2000;
    pub const TRANSPORT_REQUEST_FAILED: u16 = 2001;
    pub const TRANSPORT_CLIENT_BUILD: u16 = 2002;

    // Response shape errors (3000-3999)
    pub const RESPONSE_SHAPE: u16 = 3000;
    pub const RESPONSE_NOT_JSON: u16 = 3001;
    pub const RESPONSE_BAD_CURSOR: u16 = 3002;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Generic configuration error",
        1001 => "Configuration file not found",
        1002 => "Failed to parse configuration",
        1003 => "Invalid value in configuration",
        1004 => "Invalid API base URL",

        2000 => "Upstream API returned a non-success status",
        2001 => "Request to upstream API could not be completed",
        2002 => "Failed to build HTTP client",

        3000 => "Response did not match the expected shape",
        3001 => "Response body is not valid JSON",
        3002 => "Page cursor could not be resolved to a URL",

        _ => "Unknown error code",
    }
}

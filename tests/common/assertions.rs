//! Custom assertion macros
//!
//! Shorter assertions for API responses.

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert a response status and return its JSON body
///
/// The body must carry a `code` field equal to the status.
#[macro_export]
macro_rules! assert_json_status {
    ($response:expr, $status:expr) => {{
        let response = &$response;
        assert_eq!(
            response.status_code(),
            $status,
            "unexpected status, body: {}",
            response.text()
        );
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], $status.as_u16(), "code field mismatch: {}", body);
        body
    }};
}

/// Assert an error response with the given status and message
#[macro_export]
macro_rules! assert_api_error {
    ($response:expr, $status:expr, $message:expr) => {{
        let body = $crate::assert_json_status!($response, $status);
        assert_eq!(body["message"], $message, "unexpected body: {}", body);
    }};
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

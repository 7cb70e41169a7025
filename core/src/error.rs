//! Error types for the TMDB client.
//!
//! # Design
//! The three failure kinds a call can hit stay distinguishable: a URL that
//! never parsed (`InvalidUrl`, raised before any I/O), a rejected or
//! undelivered response (`InvalidStatusCode`, with `-1` when the transport
//! produced no status at all), and a body that did not match the expected
//! shape (`Decode`). Each call site decides how much to collapse them.

use thiserror::Error;

/// Status code reported when the transport failed before a status existed.
pub const NO_STATUS: i32 = -1;

/// Errors returned by the request pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The constructed URL did not parse. Carries the offending string.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The status was outside 200..=299, or `NO_STATUS` when none was received.
    #[error("invalid status code {0}: {msg}", msg = describe_status(.0))]
    InvalidStatusCode(i32),

    /// The response body could not be decoded into the expected type.
    #[error("decode failed: {0}")]
    Decode(String),

    /// A request payload could not be encoded to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The service answered 2xx but reported `success: false`.
    #[error("{0} was not successful")]
    Unsuccessful(&'static str),
}

impl ApiError {
    /// The status code carried by `InvalidStatusCode`, if any.
    pub fn status_code(&self) -> Option<i32> {
        match self {
            ApiError::InvalidStatusCode(code) => Some(*code),
            _ => None,
        }
    }

    /// Human readable meaning of an HTTP status as documented by the service.
    pub fn status_definition(status: i32) -> &'static str {
        match status {
            NO_STATUS => "No HTTP status was received.",
            200 => "Successful.",
            201 => "The item/record was updated successfully.",
            400 => "Validation failed.",
            401 => "Authentication failed: You do not have permissions to access the service.",
            403 => "Duplicate entry: The data you tried to submit already exists.",
            404 => "Invalid id: The pre-requisite id is invalid or not found.",
            405 => "Invalid format: This service doesn't exist in that format.",
            406 => "Invalid accept header.",
            422 => "Invalid parameters: Your request parameters are incorrect.",
            429 => "Your request count (#) is over the allowed limit of (40).",
            500 => "Internal error: Something went wrong, contact TMDB.",
            501 => "Invalid service: this service does not exist.",
            503 => "Service offline: This service is temporarily offline, try again later.",
            504 => "Your request to the backend server timed out. Try again.",
            _ => "An unknown error occurred.",
        }
    }

    /// Human readable meaning of the service's own `status_code` field.
    pub fn service_code_definition(code: i32) -> &'static str {
        match code {
            1 => "Success.",
            2 => "Invalid service: this service does not exist.",
            3 => "Authentication failed: You do not have permissions to access the service.",
            4 => "Invalid format: This service doesn't exist in that format.",
            5 => "Invalid parameters: Your request parameters are incorrect.",
            6 => "Invalid id: The pre-requisite id is invalid or not found.",
            7 => "Invalid API key: You must be granted a valid key.",
            8 => "Duplicate entry: The data you tried to submit already exists.",
            9 => "Service offline: This service is temporarily offline, try again later.",
            10 => "Suspended API key: Access to your account has been suspended, contact TMDB.",
            11 => "Internal error: Something went wrong, contact TMDB.",
            12 => "The item/record was updated successfully.",
            13 => "The item/record was deleted successfully.",
            14 => "Authentication failed.",
            15 => "Failed.",
            16 => "Device denied.",
            17 => "Session denied.",
            18 => "Validation failed.",
            19 => "Invalid accept header.",
            20 => "Invalid date range: Should be a range no longer than 14 days.",
            21 => "Entry not found: The item you are trying to edit cannot be found.",
            22 => "Invalid page: Pages start at 1 and max at 500. They are expected to be an integer.",
            23 => "Invalid date: Format needs to be YYYY-MM-DD.",
            24 => "Your request to the backend server timed out. Try again.",
            25 => "Your request count (#) is over the allowed limit of (40).",
            26 => "You must provide a username and password.",
            27 => "Too many append to response objects: The maximum number of remote calls is 20.",
            28 => "Invalid timezone: Please consult the documentation for a valid timezone.",
            29 => "You must confirm this action: Please provide a confirm=true parameter.",
            30 => "Invalid username and/or password: You did not provide a valid login.",
            31 => "Account disabled: Your account is no longer active. Contact TMDB if this is an error.",
            32 => "Email not verified: Your email address has not been verified.",
            33 => "Invalid request token: The request token is either expired or invalid.",
            34 => "The resource you requested could not be found.",
            35 => "Invalid token.",
            36 => "This token hasn't been granted write permission by the user.",
            37 => "The requested session could not be found.",
            38 => "You don't have permission to edit this resource.",
            39 => "This resource is private.",
            40 => "Nothing to update.",
            41 => "This request token hasn't been approved by the user.",
            42 => "This request method is not supported for this resource.",
            43 => "Couldn't connect to the backend server.",
            44 => "The ID is invalid.",
            45 => "This user has been suspended.",
            46 => "The API is undergoing maintenance. Try again later.",
            47 => "The input is not valid.",
            _ => "An unknown error occurred.",
        }
    }
}

fn describe_status(status: &i32) -> &'static str {
    ApiError::status_definition(*status)
}

/// The single success rule: 200..=299 inclusive, everything else fails with
/// its own code.
pub fn classify_status(status: i32) -> Result<(), ApiError> {
    if (200..=299).contains(&status) {
        Ok(())
    } else {
        Err(ApiError::InvalidStatusCode(status))
    }
}

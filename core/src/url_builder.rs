//! Request URL assembly.
//!
//! # Design
//! A URL is the endpoint, then zero or more non-empty path segments, then
//! `?api_key=<key>` and each named parameter as `&name=value` in insertion
//! order. Empty string values are dropped so callers can pass "" for "no
//! filter". Values are percent-encoded outside the RFC 3986 unreserved set,
//! which always turns `&` into `%26`, so a value can never split into two
//! parameters.

use std::fmt::Display;

use url::Url;

use crate::error::ApiError;

/// Lossless stringification for query and body parameter values.
pub trait ParamValue {
    fn to_param(&self) -> String;
}

impl ParamValue for str {
    fn to_param(&self) -> String {
        self.to_string()
    }
}

impl ParamValue for String {
    fn to_param(&self) -> String {
        self.clone()
    }
}

impl ParamValue for bool {
    fn to_param(&self) -> String {
        let text = if *self { "true" } else { "false" };
        text.to_string()
    }
}

macro_rules! display_param {
    ($($ty:ty),+) => {
        $(impl ParamValue for $ty {
            fn to_param(&self) -> String {
                self.to_string()
            }
        })+
    };
}

display_param!(i32, i64, u32, u64, usize);

// `Debug` keeps the fractional part, so 7.0 goes out as "7.0" and not "7".
macro_rules! float_param {
    ($($ty:ty),+) => {
        $(impl ParamValue for $ty {
            fn to_param(&self) -> String {
                format!("{self:?}")
            }
        })+
    };
}

float_param!(f32, f64);

impl<T: ParamValue + ?Sized> ParamValue for &T {
    fn to_param(&self) -> String {
        (**self).to_param()
    }
}

/// Percent-encode a single query value.
pub fn encode_value(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Builder for a single request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    endpoint: String,
    api_key: String,
    params: Vec<(String, String)>,
}

impl UrlBuilder {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            params: Vec::new(),
        }
    }

    /// Appends `/segment`, skipping empty segments.
    pub fn path(mut self, segment: impl Display) -> Self {
        let segment = segment.to_string();
        if segment.is_empty() {
            return self;
        }
        self.endpoint.push('/');
        self.endpoint.push_str(&segment);
        self
    }

    /// Adds `name=value`, skipping values that stringify to "".
    pub fn param(mut self, name: &str, value: impl ParamValue) -> Self {
        let value = value.to_param();
        if value.is_empty() {
            return self;
        }
        self.params.push((name.to_string(), value));
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Unencoded parameters in insertion order, without the API key.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn url_string(&self) -> String {
        let mut url = format!("{}?api_key={}", self.endpoint, encode_value(&self.api_key));
        for (name, value) in &self.params {
            url.push('&');
            url.push_str(name);
            url.push('=');
            url.push_str(&encode_value(value));
        }
        url
    }

    /// Produces the final URL, or `InvalidUrl` with the constructed string
    /// if it does not parse.
    pub fn build(&self) -> Result<String, ApiError> {
        let url = self.url_string();
        match Url::parse(&url) {
            Ok(_) => Ok(url),
            Err(_) => Err(ApiError::InvalidUrl(url)),
        }
    }
}

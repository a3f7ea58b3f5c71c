//! Request parameter validation
//!
//! Handlers declare the shape of the path parameters they expect. Validation
//! runs before the handler; a failure short-circuits with a 400 response and
//! the handler never sees the request.

use std::collections::HashMap;

use crate::error::{ApiError, ParamIssue};
use crate::routing::PathParams;

/// Declared shape of a single parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape {
    /// Any text that percent-decodes to valid UTF-8
    String,
}

impl ParamShape {
    const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
        }
    }
}

/// Parameters that passed validation, decoded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidParams(HashMap<&'static str, String>);

impl ValidParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// Validator for path parameters
#[derive(Debug, Clone, Copy)]
pub struct ParamsValidator {
    fields: &'static [(&'static str, ParamShape)],
}

impl ParamsValidator {
    pub const fn new(fields: &'static [(&'static str, ParamShape)]) -> Self {
        Self { fields }
    }

    /// Check every declared field, collecting all issues before failing
    pub fn validate(&self, params: &PathParams) -> Result<ValidParams, ApiError> {
        let mut valid = HashMap::with_capacity(self.fields.len());
        let mut issues = Vec::new();

        for &(name, shape) in self.fields {
            let issue = |reason: &str| ParamIssue {
                param: name.to_string(),
                expected: shape.name(),
                reason: reason.to_string(),
            };

            match (shape, params.get(name)) {
                (_, None) => issues.push(issue("missing")),
                (ParamShape::String, Some(raw)) => match percent_decode(raw) {
                    Some(value) => {
                        valid.insert(name, value);
                    }
                    None => issues.push(issue("not a valid percent-encoded UTF-8 string")),
                },
            }
        }

        if issues.is_empty() {
            Ok(ValidParams(valid))
        } else {
            Err(ApiError::Validation { issues })
        }
    }
}

/// Decode `%XX` escapes; `None` on a malformed escape or non-UTF-8 result
fn percent_decode(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            if !hex.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            let hex = std::str::from_utf8(hex).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

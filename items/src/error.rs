// Copyright 2021-2022 Leafish Developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::convert;
use std::fmt;

use crate::protocol;

/// Everything that stops a registry from being built.
#[derive(Debug)]
pub enum Error {
    Err(String),
    MissingResource(String),
    Json {
        resource: String,
        err: serde_json::Error,
    },
    Base64 {
        resource: String,
        err: base64::DecodeError,
    },
    MissingBedrockId {
        protocol_version: i32,
        java_identifier: String,
        bedrock_identifier: String,
    },
    Protocol(protocol::Error),
}

impl convert::From<protocol::Error> for Error {
    fn from(e: protocol::Error) -> Error {
        Error::Protocol(e)
    }
}

impl ::std::error::Error for Error {
    fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
        match *self {
            Error::Json { ref err, .. } => Some(err),
            Error::Base64 { ref err, .. } => Some(err),
            Error::Protocol(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Err(ref val) => write!(f, "registry error: {}", val),
            Error::MissingResource(ref name) => write!(f, "missing resource {}", name),
            Error::Json {
                ref resource,
                ref err,
            } => write!(f, "failed to parse {}: {}", resource, err),
            Error::Base64 {
                ref resource,
                ref err,
            } => write!(f, "invalid base64 in {}: {}", resource, err),
            Error::MissingBedrockId {
                protocol_version,
                ref java_identifier,
                ref bedrock_identifier,
            } => write!(
                f,
                "missing bedrock id in mappings for protocol {}: {} (java {})",
                protocol_version, bedrock_identifier, java_identifier
            ),
            Error::Protocol(ref err) => err.fmt(f),
        }
    }
}

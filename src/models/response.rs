//! JSON bodies returned by the HTTP endpoints

use serde::{Deserialize, Serialize};

pub const MESSAGE_LINK_CREATED: &str = "The provided url will expire in 24 hours.";
pub const MESSAGE_DATA: &str =
    "The 'Data' entry of this JSON-object contains the base64-encoded png-file data of your chart-plot.";
pub const MESSAGE_PONG: &str = "Pong.";
pub const MESSAGE_NOT_IMPLEMENTED: &str = "The used HTTP-Method is not implemented.";

/// Response to a successful chart creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LinkResponse {
    pub link: String,
    pub message: String,
}

/// Response carrying a base64-encoded image
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataResponse {
    pub message: String,
    pub data: String,
}

/// Message-only response (errors, ping, unsupported methods)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Formtree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Formtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Info-popup image uploads.
//!
//! The storage backend is a host concern; this module only fixes the two-phase contract (ask for a
//! presigned target, then send the bytes) and hands back the object path that ends up in
//! `infoPopup.images`. Nothing here touches a graph: a failed or abandoned upload simply never
//! produces the follow-up append.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Metadata sent when asking the backend for an upload target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub name: String,
    pub size: u64,
    pub content_type: String,
}

/// Where to send the bytes, and the path the stored object will be known by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTicket {
    #[serde(rename = "uploadURL")]
    pub upload_url: String,
    pub object_path: String,
}

/// Backend port for image uploads.
pub trait UploadService {
    fn request_upload(&self, request: &UploadRequest) -> Result<UploadTicket, UploadError>;

    fn transfer(&self, ticket: &UploadTicket, bytes: &[u8]) -> Result<(), UploadError>;
}

#[derive(Debug)]
pub enum UploadError {
    /// The file was rejected before contacting the backend.
    Rejected { name: String, reason: String },
    /// The backend refused to issue an upload target.
    Request {
        name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Sending the bytes to the issued target failed.
    Transfer {
        upload_url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl UploadError {
    pub fn request(name: impl Into<String>, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Request {
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn transfer(
        upload_url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Transfer {
            upload_url: upload_url.into(),
            source: source.into(),
        }
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { name, reason } => write!(f, "upload of {name} rejected: {reason}"),
            Self::Request { name, .. } => write!(f, "failed to request upload target for {name}"),
            Self::Transfer { upload_url, .. } => write!(f, "failed to transfer bytes to {upload_url}"),
        }
    }
}

impl std::error::Error for UploadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rejected { .. } => None,
            Self::Request { source, .. } | Self::Transfer { source, .. } => Some(source.as_ref()),
        }
    }
}

/// Uploads one image and returns the object path to append to a step's info popup.
pub fn upload_image<S: UploadService + ?Sized>(
    service: &S,
    name: &str,
    content_type: &str,
    bytes: &[u8],
) -> Result<String, UploadError> {
    if !content_type.starts_with("image/") {
        return Err(UploadError::Rejected {
            name: name.to_owned(),
            reason: format!("unsupported content type {content_type}"),
        });
    }

    let request = UploadRequest {
        name: name.to_owned(),
        size: bytes.len() as u64,
        content_type: content_type.to_owned(),
    };
    let ticket = service.request_upload(&request)?;
    service.transfer(&ticket, bytes)?;

    tracing::debug!(
        name,
        size = request.size,
        object_path = %ticket.object_path,
        "image uploaded"
    );
    Ok(ticket.object_path)
}

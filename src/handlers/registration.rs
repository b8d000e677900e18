use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::Redirect,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;
use crate::gateway::{self, NewMember};
use crate::password;
use crate::schemas::{AppState, ErrorResponse};
use crate::uploads::PhotoUploads;

/// Multipart field carrying the member photo.
const PHOTO_FIELD: &str = "foto";

/// Registration request as sent by the form (documentation only; the
/// handler reads the multipart stream directly)
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegistrationRequest {
    pub nomor_keanggotaan: String,
    pub nama: String,
    pub divisi: String,
    pub password: String,
    /// Member photo
    #[schema(value_type = String, format = Binary)]
    pub foto: Vec<u8>,
}

/// Text fields of the registration form.
#[derive(Debug, Validate)]
struct MemberFields {
    #[validate(length(min = 1))]
    nomor_keanggotaan: String,
    #[validate(length(min = 1))]
    nama: String,
    #[validate(length(min = 1))]
    divisi: String,
    #[validate(length(min = 1))]
    password: String,
}

impl MemberFields {
    fn from_map(mut fields: HashMap<String, String>) -> Self {
        let mut take = |name: &str| fields.remove(name).unwrap_or_default();
        Self {
            nomor_keanggotaan: take("nomor_keanggotaan").trim().to_string(),
            nama: take("nama").trim().to_string(),
            divisi: take("divisi").trim().to_string(),
            // Passwords are kept exactly as typed unless there is nothing but whitespace
            password: Some(take("password"))
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_default(),
        }
    }
}

struct UploadedPhoto {
    file_name: String,
    bytes: Vec<u8>,
}

fn malformed(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(err.body_text());
    }
    AppError::IncompleteData(format!("malformed form body ({})", err.body_text()))
}

/// Register a new member with a photo
#[utoipa::path(
    post,
    path = "/daftar",
    tag = "auth",
    request_body(content = RegistrationRequest, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Registered, redirect to /login"),
        (status = 400, description = "Missing photo or form fields, or a body that is not multipart", body = ErrorResponse),
        (status = 413, description = "Body exceeds the upload limit", body = ErrorResponse),
        (status = 500, description = "Photo or user could not be stored", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Redirect, AppError> {
    trace!("Entering register function");

    // Without a multipart body there is no file to read
    let mut multipart = multipart.map_err(|rejection| {
        debug!("Registration body is not multipart: {}", rejection.body_text());
        AppError::MissingFile
    })?;

    let mut text_fields = HashMap::new();
    let mut photo = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == PHOTO_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.map_err(malformed)?;
            match file_name.filter(|n| !n.trim().is_empty()) {
                Some(file_name) => {
                    debug!("Received photo '{}' ({} bytes)", file_name, bytes.len());
                    photo = Some(UploadedPhoto {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
                None => debug!("Photo field present without a file"),
            }
        } else {
            let value = field.text().await.map_err(malformed)?;
            text_fields.insert(name, value);
        }
    }

    let photo = photo.ok_or(AppError::MissingFile)?;

    let fields = MemberFields::from_map(text_fields);
    fields.validate()?;

    let password_hash = password::hash_password(fields.password).await?;

    let uploads = PhotoUploads::new(&state.settings.upload_dir);
    let stored = uploads
        .save(&photo.file_name, &photo.bytes)
        .await
        .map_err(AppError::FileWrite)?;

    let member = NewMember {
        nomor_keanggotaan: fields.nomor_keanggotaan,
        nama: fields.nama,
        divisi: fields.divisi,
        password_hash,
        foto: stored.public_path.clone(),
    };

    match gateway::insert_user(&state.db, member).await {
        Ok(user) => {
            info!("User registered with ID: {}, photo: {}", user.id, user.foto);
            Ok(Redirect::to("/login"))
        }
        Err(e) => {
            error!("Registration failed after storing photo, removing {}", stored.public_path);
            uploads.discard(&stored).await;
            Err(e)
        }
    }
}

//! Multipart form reading for blog create/update.
//!
//! Files are checked (type, size, count) and kept in memory; nothing is
//! written to disk here.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::Multipart;
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::blogs::dtos::{
    media_extension, CreateBlogDto, MediaChanges, MediaUpload, UpdateBlogDto,
};
use crate::shared::constants::MAX_MEDIA_FILES_PER_FIELD;

const MEDIAS_FIELD: &str = "medias";
const NEW_MEDIAS_FIELD: &str = "new_medias";

/// Parsed multipart body of a blog request
#[derive(Debug, Default)]
pub struct BlogForm {
    fields: HashMap<String, String>,
    medias: Vec<MediaUpload>,
    new_medias: Vec<MediaUpload>,
}

impl BlogForm {
    pub async fn read(mut multipart: Multipart, max_file_size: usize) -> Result<Self> {
        let mut form = BlogForm::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            debug!("Failed to read multipart field: {}", e);
            AppError::BadRequest(format!("Failed to read multipart data: {}", e))
        })? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                MEDIAS_FIELD | NEW_MEDIAS_FIELD => {
                    let extension = field
                        .content_type()
                        .and_then(media_extension)
                        .ok_or_else(|| {
                            AppError::BadRequest(
                                "Only image and video files are allowed".to_string(),
                            )
                        })?;

                    let data = field.bytes().await.map_err(|e| {
                        debug!("Failed to read file bytes: {}", e);
                        AppError::BadRequest(format!("Failed to read file data: {}", e))
                    })?;

                    if data.len() > max_file_size {
                        return Err(AppError::BadRequest(format!(
                            "File too large. Maximum size is {} bytes",
                            max_file_size
                        )));
                    }

                    let files = if name == MEDIAS_FIELD {
                        &mut form.medias
                    } else {
                        &mut form.new_medias
                    };

                    if files.len() >= MAX_MEDIA_FILES_PER_FIELD {
                        return Err(AppError::BadRequest(format!(
                            "At most {} files are allowed in `{}`",
                            MAX_MEDIA_FILES_PER_FIELD, name
                        )));
                    }

                    files.push(MediaUpload { extension, data });
                }
                "" => debug!("Ignoring unnamed multipart field"),
                _ => {
                    let value = field.text().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read field `{}`: {}", name, e))
                    })?;
                    // older clients send the replace list as `mediasIndices`
                    let key = if name == "mediasIndices" {
                        "media_indices".to_string()
                    } else {
                        name.clone()
                    };
                    form.fields.insert(key, value);
                }
            }
        }

        Ok(form)
    }

    /// Value of a text field, `None` when missing or blank
    fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .filter(|value| !value.trim().is_empty())
            .cloned()
    }

    fn required(&self, name: &str) -> Result<String> {
        self.text(name)
            .ok_or_else(|| AppError::Validation(format!("{} is required", name)))
    }

    fn parsed<T: FromStr>(&self, name: &str) -> Result<Option<T>> {
        self.text(name)
            .map(|value| {
                value
                    .trim()
                    .parse::<T>()
                    .map_err(|_| AppError::Validation(format!("Invalid value for {}", name)))
            })
            .transpose()
    }

    fn index_list(&self, name: &str) -> Result<Vec<i64>> {
        match self.fields.get(name) {
            Some(raw) => parse_index_list(name, raw),
            None => Ok(Vec::new()),
        }
    }

    /// Scalar fields, uploads and requested primary index of a new blog
    pub fn into_create(self) -> Result<(CreateBlogDto, Vec<MediaUpload>, Option<i64>)> {
        let category_id = self
            .parsed::<Uuid>("category_id")?
            .ok_or_else(|| AppError::Validation("category_id is required".to_string()))?;

        let dto = CreateBlogDto {
            title: self.required("title")?,
            content: self.required("content")?,
            external_link: self.required("external_link")?,
            message_link: self.required("message_link")?,
            category_id,
            rank: self.parsed("rank")?,
        };
        let main_media_index = self.parsed("main_media_index")?;

        Ok((dto, self.medias, main_media_index))
    }

    /// Scalar changes and media instructions of an update
    pub fn into_update(self) -> Result<(UpdateBlogDto, MediaChanges)> {
        let dto = UpdateBlogDto {
            title: self.text("title"),
            content: self.text("content"),
            external_link: self.text("external_link"),
            message_link: self.text("message_link"),
            category_id: self.parsed("category_id")?,
            rank: self.parsed("rank")?,
        };

        let changes = MediaChanges {
            replace_indices: self.index_list("media_indices")?,
            remove_indices: self.index_list("medias_to_remove")?,
            main_media_index: self.parsed("main_media_index")?,
            replacements: self.medias,
            appended: self.new_medias,
        };

        Ok((dto, changes))
    }
}

/// Parse a JSON array of indices such as `[0,2]`.
///
/// A value wrapped in one extra pair of double quotes (`"[0,2]"`) is
/// accepted, and a blank value means no indices.
pub fn parse_index_list(field: &str, raw: &str) -> Result<Vec<i64>> {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(trimmed);

    if unquoted.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str::<Vec<i64>>(unquoted).map_err(|e| {
        AppError::Validation(format!(
            "{} must be a JSON array of indices: {}",
            field, e
        ))
    })
}

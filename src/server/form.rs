//! Multipart form collection.

use std::collections::HashMap;

use axum::extract::multipart::{Multipart, MultipartError};

use crate::imaging::{ImageError, UploadedFile};

/// Parts of a `multipart/form-data` body, split into file uploads and
/// plain text fields
#[derive(Debug, Default)]
pub struct UploadForm {
    files: HashMap<String, UploadedFile>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Read every part of the body into memory
    ///
    /// A part carrying a `filename` parameter is a file upload, even when
    /// the filename is empty. Later parts with the same name replace
    /// earlier ones.
    pub async fn collect(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let data = field.bytes().await?;
                    form.files.insert(name, UploadedFile::new(Some(filename), data));
                }
                None => {
                    let text = field.text().await?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// Remove and return the file uploaded under `name`
    pub fn take_file(&mut self, name: &str) -> Result<UploadedFile, ImageError> {
        if let Some(file) = self.files.remove(name) {
            return Ok(file);
        }

        if self.fields.contains_key(name) {
            Err(ImageError::invalid_param(name, "expected a file upload"))
        } else {
            Err(ImageError::invalid_param(name, "field required"))
        }
    }

    /// Text value of a non-file field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

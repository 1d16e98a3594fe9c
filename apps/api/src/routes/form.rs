//! Form-field extraction shared by every POST endpoint.
//!
//! Browsers post `multipart/form-data`; scripted clients often send
//! `application/x-www-form-urlencoded`. Both end up in `FormFields`.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use bytes::Bytes;

use crate::errors::AppError;

/// A file part of a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
pub struct FormFields {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormFields {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Like `text`, but a missing field is a 400.
    pub fn require(&self, name: &str) -> Result<&str, AppError> {
        self.text(name)
            .ok_or_else(|| AppError::Validation(format!("Missing required field: {name}")))
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = FormFields::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(String::from) else {
                continue;
            };
            let file_name = field.file_name().map(String::from);

            match file_name {
                Some(file_name) => {
                    let bytes = field.bytes().await?;
                    // An untouched <input type="file"> posts an empty, unnamed part.
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name: Some(file_name).filter(|n| !n.is_empty()),
                            bytes,
                        },
                    );
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::from_rejection(e.status(), e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
            .await
            .map_err(|e| AppError::from_rejection(e.status(), e.body_text()))?;

        Ok(FormFields {
            fields,
            files: HashMap::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    const BOUNDARY: &str = "X-FORM-BOUNDARY";

    fn multipart_request(body: String) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_multipart_fields_and_files() {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"text\"\r\n\r\n\
             hello\r\n\
             --{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"cv.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             resume body\r\n\
             --{BOUNDARY}--\r\n"
        );
        let form = FormFields::from_request(multipart_request(body), &())
            .await
            .unwrap();

        assert_eq!(form.text("text"), Some("hello"));
        let file = form.file("file").unwrap();
        assert_eq!(file.file_name.as_deref(), Some("cv.txt"));
        assert_eq!(&file.bytes[..], b"resume body");
    }

    #[tokio::test]
    async fn test_empty_file_input_is_ignored() {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             \r\n\
             --{BOUNDARY}--\r\n"
        );
        let form = FormFields::from_request(multipart_request(body), &())
            .await
            .unwrap();
        assert!(form.file("file").is_none());
    }

    #[tokio::test]
    async fn test_urlencoded_fields() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("text=Fix+me&purpose=other"))
            .unwrap();
        let form = FormFields::from_request(req, &()).await.unwrap();

        assert_eq!(form.text("text"), Some("Fix me"));
        assert_eq!(form.require("purpose").unwrap(), "other");
        assert!(matches!(
            form.require("name"),
            Err(AppError::Validation(msg)) if msg.contains("name")
        ));
    }
}

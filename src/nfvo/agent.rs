//! Typed resource agent
//!
//! [`ResourceAgent`] is the typed face of the REST engine: generic over a
//! resource type it serializes on the way out and deserializes on the way
//! in, without ever inspecting the type's fields. The five generic call
//! shapes carry the orchestrator's status contract; the `*_at` variants
//! reach nested resources under caller-built sub-paths.

use std::marker::PhantomData;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::http::{ApiError, RestClient};
use crate::catalogue::ResourceKind;

/// Create accepts 201, or 204 when the orchestrator answers without a body.
pub const CREATED_OR_NO_CONTENT: &[StatusCode] =
    &[StatusCode::CREATED, StatusCode::NO_CONTENT];
pub const OK: &[StatusCode] = &[StatusCode::OK];
pub const ACCEPTED: &[StatusCode] = &[StatusCode::ACCEPTED];
pub const NO_CONTENT: &[StatusCode] = &[StatusCode::NO_CONTENT];

/// Typed requester for one resource collection.
pub struct ResourceAgent<T> {
    rest: RestClient,
    _resource: PhantomData<fn() -> T>,
}

impl<T: ResourceKind> ResourceAgent<T> {
    pub(crate) fn new(rest: RestClient) -> Self {
        Self {
            rest,
            _resource: PhantomData,
        }
    }

    /// POST the object to the collection root. 201 returns the stored
    /// object, 204 is a valid success without a body.
    pub async fn create(&self, object: &T) -> Result<Option<T>, ApiError> {
        let body = to_body(object)?;
        match self
            .rest
            .exchange(Method::POST, "", Some(&body), CREATED_OR_NO_CONTENT)
            .await?
        {
            Some(value) => Ok(Some(from_body(value)?)),
            None => Ok(None),
        }
    }

    /// DELETE `{base}/{id}`, expect 204.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.rest
            .exchange(Method::DELETE, &encode(id), None, NO_CONTENT)
            .await
            .map(|_| ())
    }

    /// GET the collection root, expect 200 with a JSON array.
    pub async fn find_all(&self) -> Result<Vec<T>, ApiError> {
        match self.rest.exchange(Method::GET, "", None, OK).await? {
            Some(value) => from_body(value),
            None => Ok(Vec::new()),
        }
    }

    /// GET `{base}/{id}`, expect 200.
    pub async fn find_by_id(&self, id: &str) -> Result<T, ApiError> {
        let value = self
            .rest
            .exchange(Method::GET, &encode(id), None, OK)
            .await?
            .ok_or_else(|| ApiError::Malformed {
                reason: "expected a body but received none".to_string(),
            })?;
        from_body(value)
    }

    /// PUT the object to `{base}/{id}`, expect 202.
    pub async fn update(&self, id: &str, object: &T) -> Result<T, ApiError> {
        let body = to_body(object)?;
        let value = self
            .rest
            .exchange(Method::PUT, &encode(id), Some(&body), ACCEPTED)
            .await?
            .ok_or_else(|| ApiError::Malformed {
                reason: "expected a body but received none".to_string(),
            })?;
        from_body(value)
    }

    // Sub-path variants for nested resources. The expected status is the
    // caller's to choose; otherwise the retry and parse behavior is the
    // same as for the root operations.

    pub async fn create_at<B, R>(
        &self,
        subpath: &str,
        body: &B,
        expected: &[StatusCode],
    ) -> Result<Option<R>, ApiError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let body = to_body(body)?;
        match self
            .rest
            .exchange(Method::POST, subpath, Some(&body), expected)
            .await?
        {
            Some(value) => Ok(Some(from_body(value)?)),
            None => Ok(None),
        }
    }

    pub async fn fetch_at<R: DeserializeOwned>(&self, subpath: &str) -> Result<R, ApiError> {
        let value = self
            .rest
            .exchange(Method::GET, subpath, None, OK)
            .await?
            .ok_or_else(|| ApiError::Malformed {
                reason: "expected a body but received none".to_string(),
            })?;
        from_body(value)
    }

    pub async fn fetch_all_at<R: DeserializeOwned>(
        &self,
        subpath: &str,
    ) -> Result<Vec<R>, ApiError> {
        match self.rest.exchange(Method::GET, subpath, None, OK).await? {
            Some(value) => from_body(value),
            None => Ok(Vec::new()),
        }
    }

    pub async fn update_at<B, R>(&self, subpath: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let body = to_body(body)?;
        let value = self
            .rest
            .exchange(Method::PUT, subpath, Some(&body), ACCEPTED)
            .await?
            .ok_or_else(|| ApiError::Malformed {
                reason: "expected a body but received none".to_string(),
            })?;
        from_body(value)
    }

    pub async fn delete_at(&self, subpath: &str) -> Result<(), ApiError> {
        self.rest
            .exchange(Method::DELETE, subpath, None, NO_CONTENT)
            .await
            .map(|_| ())
    }
}

/// Percent-encode an identifier for use as a single path segment.
pub fn encode(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

fn to_body<B: Serialize>(object: &B) -> Result<Value, ApiError> {
    serde_json::to_value(object).map_err(|e| ApiError::malformed(&e))
}

fn from_body<R: DeserializeOwned>(value: Value) -> Result<R, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::malformed(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_path_encoded() {
        assert_eq!(encode("abc-123"), "abc-123");
        assert_eq!(encode("a b/c"), "a%20b%2Fc");
    }
}

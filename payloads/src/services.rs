//! Generic CRUD operations for any resource endpoint.
//!
//! Every call only performs the request: errors come back exactly as the
//! [`APIClient`] produced them and no client state is touched.

use crate::{
    APIClient, ClientError, Entity, EntityId,
    api_client::{ok_body, ok_body_or_default},
    requests::{RequestBody, ResourceForm, SubmitMode},
    responses::{ApiResponse, MessageResponse},
};
use reqwest::{Method, header::HeaderMap};
use std::{collections::BTreeMap, marker::PhantomData};

/// Query parameters for a collection read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams(pub BTreeMap<String, String>);

impl ListParams {
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

/// Per-request options for writes.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Sent in addition to the client's default headers.
    pub headers: HeaderMap,
}

/// CRUD calls for the collection behind `E`.
///
/// JSON forms are updated with `PUT /{resource}/{id}`. Multipart forms (the
/// project form with its image) go through `POST /{resource}/{id}` since the
/// API does not accept multipart bodies on PUT.
pub struct ResourceService<E> {
    client: APIClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for ResourceService<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> ResourceService<E> {
    pub fn new(client: APIClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    fn collection_path(&self) -> String {
        E::RESOURCE.path().to_string()
    }

    fn record_path(&self, id: EntityId) -> String {
        format!("{}/{id}", E::RESOURCE.path())
    }

    /// `GET /{resource}`
    pub async fn get_all(
        &self,
        params: &ListParams,
    ) -> Result<ApiResponse<Vec<E>>, ClientError> {
        let url = self.client.format_url(&self.collection_path());
        let request = self.client.request(Method::GET, &url).query(&params.0);
        let response = self.client.send(request).await?;
        ok_body(response).await
    }

    /// `GET /{resource}/{id}`
    pub async fn get_by_id(
        &self,
        id: EntityId,
    ) -> Result<ApiResponse<E>, ClientError> {
        let url = self.client.format_url(&self.record_path(id));
        let response =
            self.client.send(self.client.request(Method::GET, &url)).await?;
        ok_body(response).await
    }

    /// `POST /{resource}`
    pub async fn create(
        &self,
        form: &E::Form,
        options: &RequestOptions,
    ) -> Result<ApiResponse<E>, ClientError> {
        form.validate(SubmitMode::Create)?;
        let path = self.collection_path();
        self.submit(Method::POST, &path, form.encode()?, options).await
    }

    /// `PUT /{resource}/{id}`, or `POST` for multipart forms.
    pub async fn update(
        &self,
        id: EntityId,
        form: &E::Form,
        options: &RequestOptions,
    ) -> Result<ApiResponse<E>, ClientError> {
        form.validate(SubmitMode::Update)?;
        let body = form.encode()?;
        let method = match body {
            RequestBody::Json(_) => Method::PUT,
            RequestBody::Multipart(_) => Method::POST,
        };
        self.submit(method, &self.record_path(id), body, options).await
    }

    /// `DELETE /{resource}/{id}`
    pub async fn delete(
        &self,
        id: EntityId,
    ) -> Result<MessageResponse, ClientError> {
        let url = self.client.format_url(&self.record_path(id));
        let response = self
            .client
            .send(self.client.request(Method::DELETE, &url))
            .await?;
        ok_body_or_default(response).await
    }

    async fn submit(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        options: &RequestOptions,
    ) -> Result<ApiResponse<E>, ClientError> {
        let url = self.client.format_url(path);
        let request = self
            .client
            .request(method, &url)
            .headers(options.headers.clone());
        let request = match body {
            RequestBody::Json(json) => request.json(&json),
            RequestBody::Multipart(form) => request.multipart(form),
        };
        let response = self.client.send(request).await?;
        ok_body(response).await
    }
}

//! HTTP implementation of [`Backend`] over reqwest

use super::backend::Backend;
use super::error::ClientError;
use crate::config::ClientConfig;
use crate::core::error::{ErrorResponse, FieldValidationError};
use crate::entities::employee::{Employee, EmployeePatch, NewEmployee};
use crate::entities::order::{NewOrder, Order, OrderPatch};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// `base_url` is the service root including any base path, e.g.
    /// `http://localhost:5000/api`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a response into a value or a typed error
    async fn decode<T: DeserializeOwned>(
        response: Response,
        entity: &str,
        id: Option<&str>,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()));
        }
        Err(Self::failure(response, status, entity, id).await)
    }

    async fn failure(
        response: Response,
        status: StatusCode,
        entity: &str,
        id: Option<&str>,
    ) -> ClientError {
        let body = response.json::<ErrorResponse>().await.ok();

        if status == StatusCode::NOT_FOUND {
            return ClientError::NotFound {
                entity: entity.to_string(),
                id: id.unwrap_or_default().to_string(),
            };
        }

        let fields = body
            .as_ref()
            .and_then(|b| b.details.as_ref())
            .and_then(|d| d.get("fields"))
            .and_then(|f| serde_json::from_value::<Vec<FieldValidationError>>(f.clone()).ok());

        match (status, fields) {
            (StatusCode::BAD_REQUEST, Some(fields)) if !fields.is_empty() => {
                ClientError::Invalid(fields)
            }
            _ => ClientError::Server {
                status: status.as_u16(),
                message: body
                    .map(|b| b.message)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
            },
        }
    }

    async fn expect_success(response: Response, entity: &str, id: &str) -> Result<(), ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::failure(response, status, entity, Some(id)).await)
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_orders(&self) -> Result<Vec<Order>, ClientError> {
        let response = self.client.get(self.url("/orders")).send().await?;
        Self::decode(response, "order", None).await
    }

    async fn get_order(&self, id: &str) -> Result<Order, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/orders/{}", id)))
            .send()
            .await?;
        Self::decode(response, "order", Some(id)).await
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Order, ClientError> {
        let response = self
            .client
            .post(self.url("/orders"))
            .json(order)
            .send()
            .await?;
        Self::decode(response, "order", None).await
    }

    async fn update_order(&self, id: &str, patch: &OrderPatch) -> Result<Order, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/orders/{}", id)))
            .json(patch)
            .send()
            .await?;
        Self::decode(response, "order", Some(id)).await
    }

    async fn delete_order(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/orders/{}", id)))
            .send()
            .await?;
        Self::expect_success(response, "order", id).await
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, ClientError> {
        let response = self.client.get(self.url("/employees")).send().await?;
        Self::decode(response, "employee", None).await
    }

    async fn get_employee(&self, id: &str) -> Result<Employee, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/employees/{}", id)))
            .send()
            .await?;
        Self::decode(response, "employee", Some(id)).await
    }

    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee, ClientError> {
        let response = self
            .client
            .post(self.url("/employees"))
            .json(employee)
            .send()
            .await?;
        Self::decode(response, "employee", None).await
    }

    async fn update_employee(
        &self,
        id: &str,
        patch: &EmployeePatch,
    ) -> Result<Employee, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/employees/{}", id)))
            .json(patch)
            .send()
            .await?;
        Self::decode(response, "employee", Some(id)).await
    }

    async fn delete_employee(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/employees/{}", id)))
            .send()
            .await?;
        Self::expect_success(response, "employee", id).await
    }
}

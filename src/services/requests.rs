//! Request board service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::request::{CreateRequest, RequestResponse, RequestRow},
    repository::Repository,
    services::items::ItemsService,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
    items: ItemsService,
}

impl RequestsService {
    pub fn new(repository: Repository, items: ItemsService) -> Self {
        Self { repository, items }
    }

    /// Post a request describing a desired item
    pub async fn create_request(
        &self,
        user_id: i32,
        request: CreateRequest,
    ) -> AppResult<RequestResponse> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let requestor = self.repository.users.get_by_id(user_id).await?;

        tracing::info!("User {} posts an item request", requestor.id);
        let created = self
            .repository
            .requests
            .create(requestor.id, &request.description, Utc::now())
            .await?;
        Ok(RequestResponse::from_row(created, Vec::new()))
    }

    /// Requests posted by the user, newest first, with fulfilling items
    pub async fn get_user_requests(&self, user_id: i32) -> AppResult<Vec<RequestResponse>> {
        self.repository.users.get_by_id(user_id).await?;
        let requests = self.repository.requests.find_by_requestor(user_id).await?;
        self.with_items(requests).await
    }

    /// Page of other users' requests, newest first, with fulfilling items
    pub async fn get_all_requests(
        &self,
        user_id: i32,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<RequestResponse>> {
        if from < 0 || size < 1 {
            return Err(AppError::Validation("Invalid page parameters".to_string()));
        }
        self.repository.users.get_by_id(user_id).await?;
        let requests = self
            .repository
            .requests
            .find_all_excluding(user_id, from, size)
            .await?;
        self.with_items(requests).await
    }

    /// Fetch one request with its fulfilling items
    pub async fn get_request_by_id(
        &self,
        user_id: i32,
        request_id: i32,
    ) -> AppResult<RequestResponse> {
        self.repository.users.get_by_id(user_id).await?;
        let request = self.repository.requests.get_by_id(request_id).await?;
        let items = self.items.find_by_request_id(request.id).await?;
        Ok(RequestResponse::from_row(
            request,
            items.into_iter().map(Into::into).collect(),
        ))
    }

    async fn with_items(&self, requests: Vec<RequestRow>) -> AppResult<Vec<RequestResponse>> {
        let mut responses = Vec::with_capacity(requests.len());
        for request in requests {
            let items = self.items.find_by_request_id(request.id).await?;
            responses.push(RequestResponse::from_row(
                request,
                items.into_iter().map(Into::into).collect(),
            ));
        }
        Ok(responses)
    }
}

use super::{Action, Resource, ResourceKind};
use crate::{AccessToken, ApiClient, Error, http::Params};

impl<'a, K: ResourceKind> Resource<'a, K> {
    /// `CREATE`: sends `params` and returns the created resource.
    pub async fn create(client: &'a ApiClient, token: &'a AccessToken, params: Params) -> Result<Self, Error> {
        Self::request_resource(Action::Create, client, token, &[], params).await
    }

    /// `READ`: fetches a single resource by id.
    pub async fn get(client: &'a ApiClient, token: &'a AccessToken, id: &str, params: Params) -> Result<Self, Error> {
        Self::request_resource(Action::Read, client, token, &[id], params).await
    }

    /// `UPDATE`: sends `params` to the resource identified by `id`.
    pub async fn update(
        client: &'a ApiClient,
        token: &'a AccessToken,
        id: &str,
        params: Params,
    ) -> Result<Self, Error> {
        Self::request_resource(Action::Update, client, token, &[id], params).await
    }

    /// `DELETE`: removes the resource identified by `id`.
    pub async fn delete(client: &'a ApiClient, token: &'a AccessToken, id: &str) -> Result<Self, Error> {
        Self::request_resource(Action::Delete, client, token, &[id], Params::new()).await
    }

    /// `LIST`: the listing document itself. Item collections are read from it with
    /// [`collection`](Resource::collection).
    pub async fn list(client: &'a ApiClient, token: &'a AccessToken, params: Params) -> Result<Self, Error> {
        Self::request_resource(Action::List, client, token, &[], params).await
    }
}

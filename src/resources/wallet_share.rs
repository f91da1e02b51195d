use crate::{
    AccessToken, ApiClient, Error,
    http::Params,
    resource::{Action, Endpoint, EndpointTable, Resource, ResourceKind},
};

pub struct WalletShareKind;

impl ResourceKind for WalletShareKind {
    const NAME: &'static str = "wallet share";
    const ENDPOINTS: EndpointTable = EndpointTable::new(&[
        (Action::List, Endpoint::new("walletshare", "GET")),
        (Action::Read, Endpoint::new("walletshare/:id", "GET")),
        (Action::Delete, Endpoint::new("walletshare/:id", "DELETE")),
    ]);
}

/// An invitation to access a wallet, sent to (incoming) or by (outgoing) the current user.
///
/// Sharing and accepting require re-encrypting the wallet's private key on the client and are not
/// provided here. Outgoing shares can be cancelled with [`remove`](Resource::remove).
pub type WalletShare<'a> = Resource<'a, WalletShareKind>;

impl<'a> Resource<'a, WalletShareKind> {
    /// Shares addressed to the current user. Only meaningful on a listing.
    pub fn incoming(&self) -> Result<Vec<Self>, Error> {
        self.collection("incoming")
    }

    /// Shares the current user has sent. Only meaningful on a listing.
    pub fn outgoing(&self) -> Result<Vec<Self>, Error> {
        self.collection("outgoing")
    }

    /// Fetches the listing of incoming and outgoing shares.
    pub async fn list_shares(client: &'a ApiClient, token: &'a AccessToken) -> Result<Self, Error> {
        Self::list(client, token, Params::new()).await
    }

    pub fn wallet_id(&self) -> Result<String, Error> {
        self.property_as("wallet")
    }

    pub fn wallet_label(&self) -> Result<String, Error> {
        self.property_as("walletLabel")
    }

    pub fn from_user(&self) -> Result<String, Error> {
        self.property_as("fromUser")
    }

    pub fn to_user(&self) -> Result<String, Error> {
        self.property_as("toUser")
    }

    /// Comma separated permissions, e.g. `view,spend`.
    pub fn permissions(&self) -> Result<Vec<String>, Error> {
        let permissions: String = self.property_as("permissions")?;
        Ok(permissions
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub fn state(&self) -> Result<String, Error> {
        self.property_as("state")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ClientConfig;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(ClientConfig::default().with_base_url(format!("{}/api/v1", server.uri()))).unwrap()
    }

    #[tokio::test]
    async fn listing_splits_incoming_and_outgoing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/walletshare"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "incoming": [{
                    "id": "s1",
                    "wallet": "w1",
                    "walletLabel": "team funds",
                    "fromUser": "u1",
                    "toUser": "u2",
                    "permissions": "view,spend",
                    "state": "active",
                }],
                "outgoing": [],
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let token = AccessToken::from("t");
        let listing = WalletShare::list_shares(&client, &token).await.unwrap();

        assert!(listing.outgoing().unwrap().is_empty());
        let incoming = listing.incoming().unwrap();
        assert_eq!(incoming.len(), 1);
        let share = &incoming[0];
        assert_eq!(share.id().unwrap(), "s1");
        assert_eq!(share.wallet_id().unwrap(), "w1");
        assert_eq!(share.wallet_label().unwrap(), "team funds");
        assert_eq!(share.from_user().unwrap(), "u1");
        assert_eq!(share.to_user().unwrap(), "u2");
        assert_eq!(share.permissions().unwrap(), ["view", "spend"]);
        assert_eq!(share.state().unwrap(), "active");
    }

    #[tokio::test]
    async fn outgoing_share_can_be_cancelled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/walletshare/s9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "s9", "state": "pendingapproval"})))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/walletshare/s9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "s9", "state": "canceled"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let token = AccessToken::from("t");
        let share = WalletShare::get(&client, &token, "s9", Params::new()).await.unwrap();
        let cancelled = share.remove().await.unwrap();
        assert_eq!(cancelled.state().unwrap(), "canceled");
    }

    #[tokio::test]
    async fn shares_cannot_be_created_remotely() {
        let client = ApiClient::configure(None, None, None).unwrap();
        let token = AccessToken::from("t");
        let err = WalletShare::create(&client, &token, Params::new()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint(_)));
    }
}

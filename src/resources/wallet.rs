use serde_json::Value;

use super::PendingApproval;
use crate::{
    AccessToken, ApiClient, Error,
    http::Params,
    resource::{Action, Endpoint, EndpointTable, Resource, ResourceKind, endpoint::encode_path_segment},
};

pub struct WalletKind;

impl ResourceKind for WalletKind {
    const NAME: &'static str = "wallet";
    const ENDPOINTS: EndpointTable = EndpointTable::new(&[
        (Action::List, Endpoint::new("wallet", "GET")),
        (Action::Read, Endpoint::new("wallet/:id", "GET")),
        (Action::Create, Endpoint::new("wallet", "POST")),
        (Action::Update, Endpoint::new("wallet/:id", "PUT")),
        (Action::Delete, Endpoint::new("wallet/:id", "DELETE")),
    ]);
}

/// A multi-signature wallet. Balances are in satoshis.
pub type Wallet<'a> = Resource<'a, WalletKind>;

impl<'a> Resource<'a, WalletKind> {
    /// Lists the wallets of the authenticated user, unwrapping the `wallets` property of the
    /// listing document.
    pub async fn list_all(client: &'a ApiClient, token: &'a AccessToken, params: Params) -> Result<Vec<Self>, Error> {
        Self::list(client, token, params).await?.collection::<WalletKind>("wallets")
    }

    pub fn label(&self) -> Result<String, Error> {
        self.property_as("label")
    }

    pub fn balance(&self) -> Result<u64, Error> {
        self.property_as("balance")
    }

    pub fn confirmed_balance(&self) -> Result<u64, Error> {
        self.property_as("confirmedBalance")
    }

    pub fn unconfirmed_sends(&self) -> Result<u64, Error> {
        self.property_as("unconfirmedSends")
    }

    pub fn unconfirmed_receives(&self) -> Result<u64, Error> {
        self.property_as("unconfirmedReceives")
    }

    /// Wallet flavour reported by BitGo, e.g. `safehd`.
    pub fn wallet_type(&self) -> Result<String, Error> {
        self.property_as("type")
    }

    /// Absolute API url of this wallet with `extra` appended (e.g. `/tx`).
    pub fn url(&self, extra: &str) -> Result<String, Error> {
        let id = encode_path_segment(&self.id()?);
        Ok(self.client().build_url(&format!("wallet/{id}{extra}")))
    }

    /// Approvals embedded in the wallet document. Wallets without policy approvals carry none.
    pub fn pending_approvals(&self) -> Result<Vec<PendingApproval<'a>>, Error> {
        match self.properties().get("pendingApprovals") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(_) => self.collection("pendingApprovals"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::{HttpError, config::ClientConfig, params};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(ClientConfig::default().with_base_url(format!("{}/api/v1", server.uri()))).unwrap()
    }

    fn wallet_json() -> Value {
        json!({
            "id": "2N8ryDAob6Qn8uCsWvkkQDhyeCQTqybGUFe",
            "label": "my wallet",
            "balance": 150000,
            "confirmedBalance": 100000,
            "unconfirmedSends": 0,
            "unconfirmedReceives": 50000,
            "type": "safehd",
            "pendingApprovals": [
                {"id": "pa1", "walletId": "2N8ryDAob6Qn8uCsWvkkQDhyeCQTqybGUFe", "state": "pending"}
            ],
        })
    }

    #[tokio::test]
    async fn empty_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/wallet"))
            .and(header("Authorization", "Bearer t"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"wallets": []})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let token = AccessToken::from("t");

        let listing = Wallet::list(&client, &token, Params::new()).await.unwrap();
        assert_eq!(listing.property("wallets").unwrap(), &json!([]));
        assert!(Wallet::list_all(&client, &token, Params::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_filters_travel_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/wallet"))
            .and(query_param("limit", "2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"wallets": [{"id": "a"}, {"id": "b"}], "limit": 2})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let token = AccessToken::from("t");
        let wallets = Wallet::list_all(&client, &token, params! { "limit" => 2 }).await.unwrap();
        let ids: Vec<String> = wallets.iter().map(|w| w.id().unwrap()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[tokio::test]
    async fn get_reads_typed_accessors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/wallet/2N8ryDAob6Qn8uCsWvkkQDhyeCQTqybGUFe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(wallet_json()))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let token = AccessToken::from("t");
        let wallet = Wallet::get(&client, &token, "2N8ryDAob6Qn8uCsWvkkQDhyeCQTqybGUFe", Params::new())
            .await
            .unwrap();

        assert_eq!(wallet.label().unwrap(), "my wallet");
        assert_eq!(wallet.balance().unwrap(), 150000);
        assert_eq!(wallet.confirmed_balance().unwrap(), 100000);
        assert_eq!(wallet.unconfirmed_sends().unwrap(), 0);
        assert_eq!(wallet.unconfirmed_receives().unwrap(), 50000);
        assert_eq!(wallet.wallet_type().unwrap(), "safehd");
        assert_eq!(
            wallet.url("/tx").unwrap(),
            format!("{}/api/v1/wallet/2N8ryDAob6Qn8uCsWvkkQDhyeCQTqybGUFe/tx", server.uri())
        );

        let approvals = wallet.pending_approvals().unwrap();
        assert_eq!(approvals.len(), 1);
        assert_eq!(approvals[0].id().unwrap(), "pa1");
    }

    #[tokio::test]
    async fn missing_wallet_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/wallet/nope"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "wallet not found"})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let token = AccessToken::from("t");
        let err = Wallet::get(&client, &token, "nope", Params::new()).await.unwrap_err();
        match err {
            Error::Http(HttpError::NotFound { message }) => assert_eq!(message, "wallet not found"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn reserved_characters_in_ids_are_escaped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/wallet/a%2Fb%23c"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "a/b#c"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let token = AccessToken::from("t");
        let wallet = Wallet::get(&client, &token, "a/b#c", Params::new()).await.unwrap();
        assert_eq!(
            wallet.url("/tx").unwrap(),
            format!("{}/api/v1/wallet/a%2Fb%23c/tx", server.uri())
        );
    }

    #[tokio::test]
    async fn save_changes_puts_to_the_wallet() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/wallet/w1"))
            .and(body_json(json!({"label": "cold storage"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "w1", "label": "cold storage"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let token = AccessToken::from("t");
        let wallet = Wallet::from_json(&client, &token, json!({"id": "w1", "label": "hot"})).unwrap();
        let renamed = wallet.save_changes(params! { "label" => "cold storage" }).await.unwrap();
        assert_eq!(renamed.label().unwrap(), "cold storage");
        assert_eq!(wallet.label().unwrap(), "hot");
    }

    #[test]
    fn wallets_without_approvals_have_none() {
        let client = ApiClient::configure(None, None, None).unwrap();
        let token = AccessToken::from("t");
        let wallet = Wallet::from_json(&client, &token, json!({"id": "w1", "pendingApprovals": null})).unwrap();
        assert!(wallet.pending_approvals().unwrap().is_empty());

        let wallet = Wallet::from_json(&client, &token, json!({"id": "w1"})).unwrap();
        assert!(wallet.pending_approvals().unwrap().is_empty());
        assert!(matches!(wallet.balance(), Err(Error::UnknownProperty(_))));
    }
}

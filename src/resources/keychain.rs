use crate::{
    AccessToken, ApiClient, Error,
    http::Params,
    resource::{Action, Endpoint, EndpointTable, Resource, ResourceKind},
};

const CREATE_BITGO: Action = Action::Custom("CREATE_BITGO");
const CREATE_BACKUP: Action = Action::Custom("CREATE_BACKUP");

pub struct KeychainKind;

impl ResourceKind for KeychainKind {
    const NAME: &'static str = "keychain";
    // BitGo reads a single keychain with POST.
    const ENDPOINTS: EndpointTable = EndpointTable::new(&[
        (Action::List, Endpoint::new("keychain", "GET")),
        (Action::Create, Endpoint::new("keychain", "POST")),
        (Action::Read, Endpoint::new("keychain/:xpub", "POST")),
        (Action::Update, Endpoint::new("keychain/:xpub", "PUT")),
        (CREATE_BITGO, Endpoint::new("keychain/bitgo", "POST")),
        (CREATE_BACKUP, Endpoint::new("keychain/backup", "POST")),
    ]);
    const ID_PROPERTY: &'static str = "xpub";
}

/// An extended public key registered with BitGo, optionally with its encrypted private key.
pub type Keychain<'a> = Resource<'a, KeychainKind>;

impl<'a> Resource<'a, KeychainKind> {
    /// Registers an existing extended public key.
    pub async fn add(
        client: &'a ApiClient,
        token: &'a AccessToken,
        xpub: &str,
        encrypted_xprv: Option<&str>,
    ) -> Result<Self, Error> {
        let mut params = Params::new();
        params.insert("xpub".to_string(), xpub.into());
        if let Some(encrypted_xprv) = encrypted_xprv {
            params.insert("encryptedXprv".to_string(), encrypted_xprv.into());
        }
        Self::create(client, token, params).await
    }

    /// Asks BitGo to generate its own server-side keychain.
    pub async fn create_bitgo(client: &'a ApiClient, token: &'a AccessToken, params: Params) -> Result<Self, Error> {
        Self::request_resource(CREATE_BITGO, client, token, &[], params).await
    }

    /// Asks BitGo's key recovery service to create a backup keychain.
    pub async fn create_backup(client: &'a ApiClient, token: &'a AccessToken, params: Params) -> Result<Self, Error> {
        Self::request_resource(CREATE_BACKUP, client, token, &[], params).await
    }

    pub fn xpub(&self) -> Result<String, Error> {
        self.id()
    }

    /// `None` for public-only keychains.
    pub fn encrypted_xprv(&self) -> Result<Option<String>, Error> {
        if !self.has_property("encryptedXprv") {
            return Ok(None);
        }
        self.property_as("encryptedXprv")
    }
}

use std::fmt::Display;

use serde_json::Value;

use crate::{
    AccessToken, ApiClient, Error,
    http::Params,
    resource::{Action, Endpoint, EndpointTable, Resource, ResourceKind, endpoint::encode_path_segment},
};

pub struct PendingApprovalKind;

impl ResourceKind for PendingApprovalKind {
    const NAME: &'static str = "pending approval";
    const ENDPOINTS: EndpointTable = EndpointTable::new(&[
        (Action::List, Endpoint::new("pendingapprovals", "GET")),
        (Action::Read, Endpoint::new("pendingapprovals/:id", "GET")),
        (Action::Update, Endpoint::new("pendingapprovals/:id", "PUT")),
    ]);
}

/// A policy-triggered request (transaction, policy or user change) awaiting a decision.
pub type PendingApproval<'a> = Resource<'a, PendingApprovalKind>;

/// Decision written to an approval's `state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalState {
    Approved,
    Rejected,
}

impl Display for ApprovalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalState::Approved => write!(f, "approved"),
            ApprovalState::Rejected => write!(f, "rejected"),
        }
    }
}

impl<'a> Resource<'a, PendingApprovalKind> {
    /// Pending approvals visible to the user, optionally filtered by `walletId` or `enterprise`.
    pub async fn list_all(client: &'a ApiClient, token: &'a AccessToken, params: Params) -> Result<Vec<Self>, Error> {
        Self::list(client, token, params)
            .await?
            .collection::<PendingApprovalKind>("pendingApprovals")
    }

    pub fn wallet_id(&self) -> Result<Option<String>, Error> {
        self.optional("walletId")
    }

    pub fn enterprise_id(&self) -> Result<Option<String>, Error> {
        self.optional("enterprise")
    }

    /// `wallet` or `enterprise`, whichever the approval belongs to.
    pub fn owner_type(&self) -> Result<&'static str, Error> {
        if self.has_property("walletId") {
            Ok("wallet")
        } else if self.has_property("enterprise") {
            Ok("enterprise")
        } else {
            Err(Error::Resource("pending approval has neither a wallet nor an enterprise".to_string()))
        }
    }

    pub fn state(&self) -> Result<String, Error> {
        self.property_as("state")
    }

    pub fn creator(&self) -> Result<String, Error> {
        self.property_as("creator")
    }

    /// e.g. `transactionRequest`, `userChangeRequest`, `policyRuleRequest`.
    pub fn approval_type(&self) -> Result<String, Error> {
        self.property_as("type")
    }

    pub fn info(&self) -> Result<&Value, Error> {
        self.property("info")
    }

    pub fn url(&self, extra: &str) -> Result<String, Error> {
        let id = encode_path_segment(&self.id()?);
        Ok(self.client().build_url(&format!("pendingapprovals/{id}{extra}")))
    }

    pub async fn approve(&self, params: Params) -> Result<Self, Error> {
        self.decide(ApprovalState::Approved, params).await
    }

    pub async fn reject(&self, params: Params) -> Result<Self, Error> {
        self.decide(ApprovalState::Rejected, params).await
    }

    /// Withdraws an approval created by the current user. BitGo records this as a rejection.
    pub async fn cancel(&self, params: Params) -> Result<Self, Error> {
        self.decide(ApprovalState::Rejected, params).await
    }

    async fn decide(&self, state: ApprovalState, mut params: Params) -> Result<Self, Error> {
        params.insert("state".to_string(), state.to_string().into());
        self.save_changes(params).await
    }

    fn optional(&self, name: &str) -> Result<Option<String>, Error> {
        match self.properties().get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.property_as(name).map(Some),
        }
    }
}

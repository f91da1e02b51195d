// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use log::{debug, warn};
use reqwest::{
    Method,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde_json::Value;
use url::Url;

use super::{
    error::HttpError,
    types::Params,
    utils::{carries_body, classify_transport_error, error_message, is_supported_method, parse_method, query_pairs},
};
use crate::{
    AccessToken, Error,
    config::{ClientConfig, Environment, ProxyConfig},
};

/// BitGo REST API client.
///
/// Each call performs exactly one HTTP request: no retries, no caching, no background work.
/// The client is cheap to share by reference across tasks; changing its proxy requires
/// exclusive access, so reconfiguration can never race an in-flight request.
#[derive(Debug)]
pub struct ApiClient {
    config: ClientConfig,
    base_url: Url,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        config.validate()?;
        let base_url = config.resolve_base_url()?;
        let client = build_http_client(&config)?;
        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// Builds a client for a named environment (`test` when omitted), with an optional user agent
    /// and proxy.
    pub fn configure(
        environment: Option<Environment>,
        user_agent: Option<&str>,
        proxy: Option<ProxyConfig>,
    ) -> Result<Self, Error> {
        let mut config = ClientConfig::new(environment.unwrap_or_default());
        if let Some(user_agent) = user_agent {
            config.user_agent = user_agent.to_string();
        }
        config.proxy = proxy;
        Self::new(config)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn user_agent(&self) -> &str {
        &self.config.user_agent
    }

    pub fn proxy(&self) -> Option<&ProxyConfig> {
        self.config.proxy.as_ref()
    }

    /// Replaces the proxy used for subsequent requests. Passing `None` removes it.
    pub fn set_proxy(&mut self, proxy: Option<ProxyConfig>) -> Result<(), Error> {
        let config = ClientConfig {
            proxy,
            ..self.config.clone()
        };
        self.client = build_http_client(&config)?;
        self.config = config;
        Ok(())
    }

    /// Joins the base URL and `path` with exactly one `/`.
    pub fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Sends a request with a textual verb, which is validated case-insensitively.
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        params: Option<&Params>,
        token: Option<&AccessToken>,
    ) -> Result<Value, Error> {
        let method = parse_method(method)?;
        self.send_request(method, path, params, token).await
    }

    /// Sends one request and returns the decoded JSON body.
    ///
    /// POST and PUT send `params` as a JSON body; GET and DELETE never carry a body and send
    /// `params` as a query string instead. The `Authorization` header is only set when a non-empty
    /// token is supplied.
    pub async fn send_request(
        &self,
        method: Method,
        path: &str,
        params: Option<&Params>,
        token: Option<&AccessToken>,
    ) -> Result<Value, Error> {
        if !is_supported_method(&method) {
            return Err(Error::InvalidMethod(method.to_string()));
        }
        let authorization = token.map(AccessToken::bearer_header).transpose()?.flatten();
        let authenticated = authorization.is_some();

        let raw_url = self.build_url(path);
        let url = Url::parse(&raw_url).map_err(|e| Error::InvalidEndpointUrl(format!("{raw_url}: {e}")))?;

        let mut req = self
            .client
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(authorization) = authorization {
            req = req.header(AUTHORIZATION, authorization);
        }
        req = match params.filter(|p| !p.is_empty()) {
            Some(params) if carries_body(&method) => req.body(Value::Object(params.clone()).to_string()),
            Some(params) => req.query(&query_pairs(params)),
            None => req,
        };

        debug!(
            method:% = method,
            url:% = url,
            authenticated = authenticated;
            "HTTP: Sending request"
        );

        let resp = req.send().await.map_err(|e| self.transport_error(e))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        if status.is_client_error() || status.is_server_error() {
            let message = error_message(&body);
            warn!(
                status = status.as_u16(),
                url:% = url,
                error = &*message;
                "HTTP: Request rejected"
            );
            return Err(HttpError::from_response(status, message, body).into());
        }

        debug!(status = status.as_u16(); "HTTP: Request succeeded");
        serde_json::from_str(&body).map_err(|source| HttpError::InvalidBody { status, source }.into())
    }

    /// Sends a GET request with or without an access token.
    pub async fn get(&self, path: &str, token: Option<&AccessToken>) -> Result<Value, Error> {
        self.send_request(Method::GET, path, None, token).await
    }

    /// Sends a DELETE request with or without an access token.
    pub async fn delete(&self, path: &str, token: Option<&AccessToken>) -> Result<Value, Error> {
        self.send_request(Method::DELETE, path, None, token).await
    }

    pub async fn post(&self, path: &str, data: &Params, token: Option<&AccessToken>) -> Result<Value, Error> {
        self.send_request(Method::POST, path, Some(data), token).await
    }

    pub async fn put(&self, path: &str, data: &Params, token: Option<&AccessToken>) -> Result<Value, Error> {
        self.send_request(Method::PUT, path, Some(data), token).await
    }

    fn transport_error(&self, source: reqwest::Error) -> Error {
        let cause = classify_transport_error(&source, self.config.proxy.is_some());
        warn!(
            cause:% = cause,
            error:% = source;
            "HTTP: Transport failure"
        );
        Error::Transport { cause, source }
    }
}

fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client, Error> {
    let builder = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout());

    let builder = match &config.proxy {
        Some(proxy) => {
            proxy.validate()?;
            let proxy_url = proxy.url();
            let invalid = |e: reqwest::Error| Error::Config(format!("Invalid proxy settings: {e}"));
            builder
                .proxy(reqwest::Proxy::http(&proxy_url).map_err(invalid)?)
                .proxy(reqwest::Proxy::https(&proxy_url).map_err(invalid)?)
        },
        None => builder.no_proxy(),
    };

    builder
        .build()
        .map_err(|e| Error::Config(format!("Could not build HTTP client: {e}")))
}

//! Shared application state.

use gantry_audit::AuditRecorder;
use gantry_core::GatewayConfig;
use gantry_jwt::TokenValidator;

use crate::proxy::ProxyClient;

/// State shared by all request tasks. Everything here is read-only after
/// startup; per-request state lives in request extensions.
pub struct AppState {
    pub config: GatewayConfig,
    pub validator: TokenValidator,
    pub recorder: AuditRecorder,
    pub proxy: ProxyClient,
}

impl AppState {
    pub async fn init(config: GatewayConfig) -> anyhow::Result<Self> {
        let validator = TokenValidator::new(&config.auth.secret);
        let recorder = AuditRecorder::from_config(&config.audit).await?;
        let proxy = ProxyClient::new(config.upstream.clone())?;

        Ok(Self {
            config,
            validator,
            recorder,
            proxy,
        })
    }
}

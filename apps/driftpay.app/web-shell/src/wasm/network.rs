use super::*;

    pub(super) fn snapshot_state() -> AppState {
        APP_STATE.with(|state| state.borrow().clone())
    }

    pub(super) fn plan_http_request(
        intent: &CommandIntent,
        state: &AppState,
    ) -> Result<HttpCommandRequest, ControlApiError> {
        map_intent_to_http(intent, state).map_err(ControlApiError::from_command_error)
    }

    pub(super) async fn send_json_request<T: for<'de> Deserialize<'de>>(
        request: &HttpCommandRequest,
        state: &AppState,
    ) -> Result<T, ControlApiError> {
        let mut request_builder = match request.method {
            HttpMethod::Get => Request::get(&request.path),
            HttpMethod::Post => {
                Request::post(&request.path).header("content-type", "application/json")
            }
        };

        if let Some(token) = resolve_bearer_token(&request.auth, state) {
            request_builder = request_builder.header("authorization", &format!("Bearer {token}"));
        }

        let response = if let Some(body) = request.body.as_ref() {
            let body = serde_json::to_string(body).map_err(|error| ControlApiError {
                status_code: 500,
                code: Some("request_body_serialize_failed".to_string()),
                message: format!("failed to serialize request body: {error}"),
                kind: CommandErrorKind::Decode,
                retryable: false,
            })?;
            let request = request_builder
                .body(body)
                .map_err(|error| ControlApiError {
                    status_code: 500,
                    code: Some("request_build_failed".to_string()),
                    message: format!("failed to build request body: {error}"),
                    kind: CommandErrorKind::Unknown,
                    retryable: false,
                })?;
            request.send().await.map_err(map_network_error)?
        } else {
            request_builder.send().await.map_err(map_network_error)?
        };

        decode_json_response(response).await
    }

    pub(super) fn resolve_bearer_token(auth: &AuthRequirement, state: &AppState) -> Option<String> {
        match auth {
            AuthRequirement::None => None,
            AuthRequirement::AccessToken => state.wallet.access_token.clone(),
        }
    }

    pub(super) fn map_network_error(error: gloo_net::Error) -> ControlApiError {
        let classified = classify_http_error(0, Some("network_error"), error.to_string());
        ControlApiError {
            status_code: 0,
            code: Some("network_error".to_string()),
            message: classified.message,
            kind: classified.kind,
            retryable: classified.retryable,
        }
    }

    pub(super) async fn decode_json_response<T: for<'de> Deserialize<'de>>(
        response: gloo_net::http::Response,
    ) -> Result<T, ControlApiError> {
        let status = response.status();
        let raw = response.text().await.map_err(|error| ControlApiError {
            status_code: status,
            code: Some("response_read_failed".to_string()),
            message: error.to_string(),
            kind: CommandErrorKind::Unknown,
            retryable: false,
        })?;

        if !(200..=299).contains(&status) {
            let parsed_error: Option<ApiErrorBody> = serde_json::from_str(&raw).ok();
            let code = parsed_error
                .as_ref()
                .and_then(|error| error.error.as_ref())
                .and_then(|detail| detail.code.clone());
            let message = parsed_error
                .as_ref()
                .and_then(|error| error.message.clone())
                .or_else(|| {
                    parsed_error
                        .as_ref()
                        .and_then(|error| error.error.as_ref())
                        .and_then(|detail| detail.message.clone())
                })
                .unwrap_or_else(|| format!("request failed with status {status}"));
            let classified = classify_http_error(status, code.as_deref(), message);
            return Err(ControlApiError {
                status_code: status,
                code,
                message: classified.message,
                kind: classified.kind,
                retryable: classified.retryable,
            });
        }

        serde_json::from_str(&raw).map_err(|error| {
            let code = Some("decode_failed".to_string());
            let classified = classify_http_error(
                status,
                code.as_deref(),
                format!("failed to decode response: {error}"),
            );
            ControlApiError {
                status_code: status,
                code,
                message: classified.message,
                kind: classified.kind,
                retryable: classified.retryable,
            }
        })
    }

    pub(super) fn storage_error(message: String) -> ControlApiError {
        ControlApiError {
            status_code: 500,
            code: Some("storage_error".to_string()),
            message,
            kind: CommandErrorKind::Unknown,
            retryable: false,
        }
    }

    pub(super) fn wallet_input_validation_error(
        error: driftpay_client_core::wallet::WalletInputError,
    ) -> ControlApiError {
        ControlApiError {
            status_code: 422,
            code: Some("validation_error".to_string()),
            message: error.to_string(),
            kind: CommandErrorKind::Validation,
            retryable: false,
        }
    }

    pub(super) fn send_input_validation_error(
        error: driftpay_client_core::send::SendInputError,
    ) -> ControlApiError {
        ControlApiError {
            status_code: 422,
            code: Some("validation_error".to_string()),
            message: error.to_string(),
            kind: CommandErrorKind::Validation,
            retryable: false,
        }
    }

    pub(super) fn command_error_code(kind: &CommandErrorKind) -> &'static str {
        match kind {
            CommandErrorKind::MissingCredential => "missing_credential",
            CommandErrorKind::Unauthorized => "unauthorized",
            CommandErrorKind::Forbidden => "forbidden",
            CommandErrorKind::Validation => "validation",
            CommandErrorKind::ServiceUnavailable => "service_unavailable",
            CommandErrorKind::RateLimited => "rate_limited",
            CommandErrorKind::Network => "network",
            CommandErrorKind::Decode => "decode",
            CommandErrorKind::Unsupported => "unsupported",
            CommandErrorKind::Unknown => "unknown",
        }
    }

    pub(super) async fn post_wallet_connect(
        account_id: &str,
    ) -> Result<WalletSessionPayload, ControlApiError> {
        let normalized_account =
            normalize_account_id(account_id).map_err(wallet_input_validation_error)?;
        let state = snapshot_state();
        let intent = CommandIntent::ConnectWallet {
            account_id: normalized_account,
        };
        let request = plan_http_request(&intent, &state)?;
        let response: WalletConnectEnvelope = send_json_request(&request, &state).await?;
        Ok(response.data)
    }

    pub(super) async fn get_wallet_session(
        access_token: &str,
    ) -> Result<WalletSessionPayload, ControlApiError> {
        let mut state = snapshot_state();
        state.wallet.access_token = Some(access_token.to_string());
        let intent = CommandIntent::RestoreWalletSession;
        let request = plan_http_request(&intent, &state)?;
        let response: WalletSessionEnvelope = send_json_request(&request, &state).await?;
        if response.data.status.as_deref() == Some("revoked") {
            return Err(ControlApiError::unauthorized(
                "Wallet session has been revoked.",
            ));
        }
        Ok(response.data.session)
    }

    pub(super) async fn post_wallet_disconnect(
        access_token: &str,
    ) -> Result<(), ControlApiError> {
        let mut state = snapshot_state();
        state.wallet.access_token = Some(access_token.to_string());
        let intent = CommandIntent::DisconnectWallet;
        let request = plan_http_request(&intent, &state)?;
        let _: JsonDataEnvelope = send_json_request(&request, &state).await?;
        Ok(())
    }

    pub(super) async fn get_streams() -> Result<Vec<Stream>, ControlApiError> {
        let state = snapshot_state();
        let intent = CommandIntent::RefreshStreams;
        let request = plan_http_request(&intent, &state)?;
        let response: StreamsEnvelope = send_json_request(&request, &state).await?;
        Ok(response.data.streams)
    }

    pub(super) async fn post_auto_deposit_toggle(
        stream_id: &str,
        enabled: bool,
    ) -> Result<(), ControlApiError> {
        let state = snapshot_state();
        let intent = CommandIntent::ToggleAutoDeposit {
            stream_id: stream_id.to_string(),
            enabled,
        };
        let request = plan_http_request(&intent, &state)?;
        let _: JsonDataEnvelope = send_json_request(&request, &state).await?;
        Ok(())
    }

    pub(super) async fn post_create_stream(
        request_body: &CreateStreamRequest,
    ) -> Result<CreatedStreamPayload, ControlApiError> {
        let state = snapshot_state();
        let intent = CommandIntent::CreateStream {
            request: request_body.clone(),
        };
        let request = plan_http_request(&intent, &state)?;
        let response: CreateStreamEnvelope = send_json_request(&request, &state).await?;
        Ok(response.data)
    }

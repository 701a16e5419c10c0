#![allow(clippy::needless_pass_by_value)]

#[cfg(any(target_arch = "wasm32", test))]
mod stream_control;
#[cfg(target_arch = "wasm32")]
mod wasm_constants;
#[cfg(target_arch = "wasm32")]
mod wasm_state;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::{Cell, RefCell};
    use web_time::Instant;

    use driftpay_app_state::{
        apply_action, classify_http_error, command_latency_metric, map_intent_to_http,
        AppAction, AppRoute, AppState, AuthRequirement, AutoDepositView, CommandError,
        CommandErrorKind, CommandIntent, CreateStreamRequest, HttpCommandRequest, HttpMethod,
        Stream, WalletAuthStatus, WalletState,
    };
    use driftpay_client_core::send::normalize_stream_draft;
    use driftpay_client_core::wallet::{normalize_account_id, WalletSessionState};
    use gloo_net::http::Request;
    use gloo_timers::future::sleep;
    use serde::{Deserialize, Serialize};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{HtmlAnchorElement, HtmlElement, HtmlInputElement, MouseEvent};

    use crate::stream_control::{
        route_header_title, stream_rows, streams_surface_cards, StreamRow, SurfaceCard,
        SurfaceCardTone,
    };
    use crate::wasm_constants::*;
    use crate::wasm_state::SendSurfaceState;

    mod dom;
    mod lifecycle;
    mod network;
    mod routing;

    use dom::*;
    use lifecycle::*;
    use network::*;
    use routing::*;

    thread_local! {
        static APP_STATE: RefCell<AppState> = RefCell::new(AppState::default());
        static DIAGNOSTICS: RefCell<BootDiagnostics> = RefCell::new(BootDiagnostics::default());
        static COMMAND_LOOP_ACTIVE: Cell<bool> = const { Cell::new(false) };
        static RENDER_SCHEDULED: Cell<bool> = const { Cell::new(false) };
        static STREAMS_POLL_ENABLED: Cell<bool> = const { Cell::new(false) };
        static STREAMS_POLL_RUNNING: Cell<bool> = const { Cell::new(false) };
        static SEND_SURFACE_STATE: RefCell<SendSurfaceState> = RefCell::new(SendSurfaceState::default());
        static NAV_TOGGLE_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static SEND_SUBMIT_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static ROUTE_POPSTATE_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static ROUTE_LINK_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static AUTH_CONTROL_HANDLERS: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>> = RefCell::new(Vec::new());
        static STREAM_TOGGLE_HANDLERS: RefCell<Vec<Closure<dyn FnMut(web_sys::Event)>>> = RefCell::new(Vec::new());
    }

    #[derive(Debug, Clone, Serialize)]
    struct BootDiagnostics {
        phase: String,
        detail: String,
        boot_started_at_unix_ms: Option<u64>,
        dom_ready_latency_ms: Option<u64>,
        boot_total_latency_ms: Option<u64>,
        budget_breaches: Vec<String>,
        route_path: String,
        pending_intents: usize,
        command_total: u64,
        command_failures: u64,
        last_command: Option<String>,
        last_command_latency_ms: Option<u64>,
        last_command_error_kind: Option<String>,
        last_error: Option<String>,
    }

    impl Default for BootDiagnostics {
        fn default() -> Self {
            Self {
                phase: "idle".to_string(),
                detail: "web shell not started".to_string(),
                boot_started_at_unix_ms: None,
                dom_ready_latency_ms: None,
                boot_total_latency_ms: None,
                budget_breaches: Vec::new(),
                route_path: "/".to_string(),
                pending_intents: 0,
                command_total: 0,
                command_failures: 0,
                last_command: None,
                last_command_latency_ms: None,
                last_command_error_kind: None,
                last_error: None,
            }
        }
    }

    #[derive(Debug, Clone)]
    struct ControlApiError {
        status_code: u16,
        code: Option<String>,
        message: String,
        kind: CommandErrorKind,
        retryable: bool,
    }

    impl ControlApiError {
        fn unauthorized(message: impl Into<String>) -> Self {
            Self {
                status_code: 401,
                code: Some("unauthorized".to_string()),
                message: message.into(),
                kind: CommandErrorKind::Unauthorized,
                retryable: false,
            }
        }

        fn is_unauthorized(&self) -> bool {
            self.status_code == 401
        }

        fn from_command_error(error: CommandError) -> Self {
            Self {
                status_code: 0,
                code: Some(command_error_code(&error.kind).to_string()),
                message: error.message,
                kind: error.kind,
                retryable: error.retryable,
            }
        }

        fn to_command_error(&self) -> CommandError {
            CommandError {
                kind: self.kind.clone(),
                message: self.message.clone(),
                retryable: self.retryable,
            }
        }
    }

    impl std::fmt::Display for ControlApiError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            if let Some(code) = &self.code {
                write!(
                    f,
                    "{} ({code}, status={}, kind={:?}, retryable={})",
                    self.message, self.status_code, self.kind, self.retryable
                )
            } else {
                write!(
                    f,
                    "{} (status={}, kind={:?}, retryable={})",
                    self.message, self.status_code, self.kind, self.retryable
                )
            }
        }
    }

    #[derive(Debug, Deserialize)]
    struct ApiErrorBody {
        message: Option<String>,
        error: Option<ApiErrorDetail>,
    }

    #[derive(Debug, Deserialize)]
    struct ApiErrorDetail {
        code: Option<String>,
        message: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    struct WalletConnectEnvelope {
        data: WalletSessionPayload,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub(super) struct WalletSessionPayload {
        #[serde(rename = "accountId")]
        account_id: String,
        #[serde(default)]
        token: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    struct WalletSessionEnvelope {
        data: WalletSessionData,
    }

    #[derive(Debug, Clone, Deserialize)]
    struct WalletSessionData {
        session: WalletSessionPayload,
        #[serde(default)]
        status: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    struct StreamsEnvelope {
        data: StreamsPayload,
    }

    #[derive(Debug, Clone, Deserialize)]
    struct StreamsPayload {
        #[serde(default)]
        streams: Vec<Stream>,
    }

    #[derive(Debug, Clone, Deserialize)]
    struct CreateStreamEnvelope {
        data: CreatedStreamPayload,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub(super) struct CreatedStreamPayload {
        #[serde(rename = "streamId")]
        stream_id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    struct JsonDataEnvelope {
        data: serde_json::Value,
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        set_boot_phase("booting", "initializing Driftpay web shell runtime");
        spawn_local(async {
            if let Err(error) = boot().await {
                set_boot_error(&error);
            }
        });
    }

    #[wasm_bindgen]
    pub fn boot_diagnostics_json() -> String {
        DIAGNOSTICS.with(|state| {
            serde_json::to_string(&*state.borrow()).unwrap_or_else(|_| {
                "{\"phase\":\"error\",\"detail\":\"diagnostics serialization failed\"}".to_string()
            })
        })
    }

    #[wasm_bindgen]
    pub fn app_state_json() -> String {
        APP_STATE.with(|state| {
            serde_json::to_string(&*state.borrow()).unwrap_or_else(|_| "{}".to_string())
        })
    }

    #[wasm_bindgen]
    pub fn wallet_state_json() -> String {
        APP_STATE.with(|state| {
            serde_json::to_string(&state.borrow().wallet).unwrap_or_else(|_| "{}".to_string())
        })
    }

    #[wasm_bindgen]
    pub fn navigate(path: String) {
        let route = AppRoute::from_path(&path);
        queue_intent(CommandIntent::Navigate { route });
    }

    #[wasm_bindgen]
    pub fn wallet_connect(account_id: String) {
        queue_intent(CommandIntent::ConnectWallet { account_id });
    }

    #[wasm_bindgen]
    pub fn wallet_disconnect() {
        queue_intent(CommandIntent::DisconnectWallet);
    }

    #[wasm_bindgen]
    pub fn streams_refresh() {
        queue_intent(CommandIntent::RefreshStreams);
    }

    #[wasm_bindgen]
    pub fn stream_set_auto_deposit(stream_id: String, enabled: bool) {
        queue_intent(CommandIntent::ToggleAutoDeposit { stream_id, enabled });
    }

    async fn boot() -> Result<(), String> {
        if should_force_boot_failure() {
            return Err("forced startup failure because query contains dp_boot_fail=1".to_string());
        }

        let boot_started_at = Instant::now();
        let boot_started_at_unix_ms = now_unix_ms();
        DIAGNOSTICS.with(|state| {
            let mut state = state.borrow_mut();
            state.boot_started_at_unix_ms = Some(boot_started_at_unix_ms);
            state.dom_ready_latency_ms = None;
            state.boot_total_latency_ms = None;
            state.budget_breaches.clear();
        });

        ensure_status_dom()?;
        ensure_app_dom()?;
        install_browser_navigation_handlers();

        let dom_ready_latency_ms =
            u64::try_from(boot_started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        record_boot_milestone(
            "dom_ready_latency_ms",
            dom_ready_latency_ms,
            DOM_READY_BUDGET_MS,
        );

        let current_path = current_pathname();
        APP_STATE.with(|state| {
            let mut state = state.borrow_mut();
            let _ = apply_action(
                &mut state,
                AppAction::BootstrapFromPath {
                    path: current_path.clone(),
                },
            );
            let _ = apply_action(
                &mut state,
                AppAction::QueueIntent {
                    intent: CommandIntent::Bootstrap,
                },
            );
            let _ = apply_action(
                &mut state,
                AppAction::QueueIntent {
                    intent: CommandIntent::RestoreWalletSession,
                },
            );
            update_diagnostics_from_state(state.route.to_path(), state.intent_queue.len());
        });
        APP_STATE.with(|state| replace_route_in_browser_history(&state.borrow().route));
        render_app_dom();

        let boot_total_latency_ms =
            u64::try_from(boot_started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        record_boot_milestone(
            "boot_total_latency_ms",
            boot_total_latency_ms,
            BOOT_TOTAL_BUDGET_MS,
        );

        set_boot_phase("ready", "command loop active");
        schedule_command_processing();

        Ok(())
    }

    fn queue_intent(intent: CommandIntent) {
        APP_STATE.with(|state| {
            let mut state = state.borrow_mut();
            let _ = apply_action(&mut state, AppAction::QueueIntent { intent });
            update_diagnostics_from_state(state.route.to_path(), state.intent_queue.len());
        });
        schedule_render();
        schedule_command_processing();
    }

    /// Re-render on the next microtask instead of inline. queue_intent runs
    /// inside DOM click handlers whose closures live in the per-render
    /// handler slots; rendering inline would drop the closure that is
    /// currently executing.
    fn schedule_render() {
        let already_scheduled = RENDER_SCHEDULED.with(|scheduled| {
            if scheduled.get() {
                true
            } else {
                scheduled.set(true);
                false
            }
        });
        if already_scheduled {
            return;
        }
        spawn_local(async {
            RENDER_SCHEDULED.with(|scheduled| scheduled.set(false));
            render_app_dom();
        });
    }

    fn schedule_command_processing() {
        let already_active = COMMAND_LOOP_ACTIVE.with(|active| {
            if active.get() {
                true
            } else {
                active.set(true);
                false
            }
        });

        if already_active {
            return;
        }

        spawn_local(async {
            loop {
                let intents = APP_STATE.with(|state| {
                    let mut state = state.borrow_mut();
                    let drained = apply_action(&mut state, AppAction::DrainIntents).drained_intents;
                    update_diagnostics_from_state(state.route.to_path(), state.intent_queue.len());
                    drained
                });

                if intents.is_empty() {
                    break;
                }

                for queued_intent in intents {
                    let intent = queued_intent.intent;
                    let started_at = Instant::now();
                    let outcome = handle_intent(intent.clone()).await;
                    let latency_ms =
                        u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let metric = match &outcome {
                        Ok(()) => command_latency_metric(&intent, latency_ms, Ok(())),
                        Err(error) => {
                            let command_error = error.to_command_error();
                            command_latency_metric(&intent, latency_ms, Err(&command_error))
                        }
                    };
                    record_command_metric(metric);

                    APP_STATE.with(|state| {
                        let mut state = state.borrow_mut();
                        match outcome {
                            Ok(()) => {
                                let _ = apply_action(
                                    &mut state,
                                    AppAction::IntentCompleted {
                                        id: queued_intent.id,
                                    },
                                );
                            }
                            Err(error) => {
                                let _ = apply_action(
                                    &mut state,
                                    AppAction::IntentFailed {
                                        id: queued_intent.id,
                                        message: error.to_string(),
                                    },
                                );
                            }
                        }
                        update_diagnostics_from_state(
                            state.route.to_path(),
                            state.intent_queue.len(),
                        );
                    });
                    render_app_dom();
                }
            }

            COMMAND_LOOP_ACTIVE.with(|active| active.set(false));

            let has_pending = APP_STATE.with(|state| !state.borrow().intent_queue.is_empty());
            if has_pending {
                schedule_command_processing();
            }
        });
    }

    fn record_command_metric(metric: driftpay_app_state::CommandLatencyMetric) {
        DIAGNOSTICS.with(|diagnostics| {
            let mut diagnostics = diagnostics.borrow_mut();
            diagnostics.command_total = diagnostics.command_total.saturating_add(1);
            diagnostics.last_command = Some(metric.intent.clone());
            diagnostics.last_command_latency_ms = Some(metric.latency_ms);
            diagnostics.last_command_error_kind = metric
                .error_kind
                .as_ref()
                .map(|kind| command_error_code(kind).to_string());
            if !metric.success {
                diagnostics.command_failures = diagnostics.command_failures.saturating_add(1);
            }
        });
    }

    async fn handle_intent(intent: CommandIntent) -> Result<(), ControlApiError> {
        match intent {
            CommandIntent::Bootstrap => Ok(()),
            CommandIntent::ConnectWallet { account_id } => connect_wallet_flow(account_id).await,
            CommandIntent::RestoreWalletSession => restore_wallet_session_flow().await,
            CommandIntent::DisconnectWallet => disconnect_wallet_flow().await,
            CommandIntent::RefreshStreams => refresh_streams_flow().await,
            CommandIntent::ToggleAutoDeposit { stream_id, enabled } => {
                toggle_auto_deposit_flow(stream_id, enabled).await
            }
            CommandIntent::CreateStream { request } => create_stream_flow(request).await,
            CommandIntent::Navigate { route } => {
                apply_route_transition(route, true);
                Ok(())
            }
        }
    }

    async fn connect_wallet_flow(account_id: String) -> Result<(), ControlApiError> {
        apply_wallet_action(AppAction::WalletConnectRequested {
            account_id: account_id.clone(),
        });

        let result = try_connect_wallet(&account_id).await;
        if let Err(error) = &result {
            apply_wallet_action(AppAction::WalletAuthFailed {
                message: error.message.clone(),
            });
        }
        result
    }

    async fn try_connect_wallet(account_id: &str) -> Result<(), ControlApiError> {
        let payload = post_wallet_connect(account_id).await?;
        let Some(access_token) = payload.token.clone().filter(|token| !token.is_empty()) else {
            return Err(ControlApiError {
                status_code: 500,
                code: Some("missing_session_token".to_string()),
                message: "connect response did not include a session token".to_string(),
                kind: CommandErrorKind::Decode,
                retryable: false,
            });
        };

        let session = WalletSessionState {
            account_id: payload.account_id.clone(),
            access_token: access_token.clone(),
            issued_at: None,
        };
        persist_wallet_session(&session).map_err(storage_error)?;
        apply_wallet_action(AppAction::WalletSessionEstablished {
            account_id: payload.account_id,
            access_token,
        });
        on_wallet_session_established();
        Ok(())
    }

    async fn restore_wallet_session_flow() -> Result<(), ControlApiError> {
        apply_wallet_action(AppAction::WalletSessionRestoreRequested);

        let Some(stored) = load_wallet_session() else {
            stop_streams_poll();
            apply_wallet_action(AppAction::WalletSignedOut);
            return Ok(());
        };

        match get_wallet_session(&stored.access_token).await {
            Ok(session) => {
                apply_wallet_action(AppAction::WalletSessionEstablished {
                    account_id: session.account_id,
                    access_token: stored.access_token,
                });
                on_wallet_session_established();
                Ok(())
            }
            Err(error) if error.is_unauthorized() => {
                clear_wallet_session();
                stop_streams_poll();
                apply_wallet_action(AppAction::WalletReauthRequired {
                    message: "Wallet session expired. Connect again.".to_string(),
                });
                Err(error)
            }
            Err(error) => {
                apply_wallet_action(AppAction::WalletAuthFailed {
                    message: error.message.clone(),
                });
                Err(error)
            }
        }
    }

    async fn disconnect_wallet_flow() -> Result<(), ControlApiError> {
        let access_token = APP_STATE
            .with(|state| state.borrow().wallet.access_token.clone())
            .unwrap_or_default();

        if !access_token.is_empty() {
            match post_wallet_disconnect(&access_token).await {
                Ok(()) => {}
                // A dead session is already disconnected as far as the
                // backend is concerned.
                Err(error) if error.is_unauthorized() => {}
                Err(error) => return Err(error),
            }
        }

        clear_wallet_session();
        stop_streams_poll();
        apply_wallet_action(AppAction::WalletSignedOut);
        Ok(())
    }

    async fn refresh_streams_flow() -> Result<(), ControlApiError> {
        let state = snapshot_state();
        if !state.wallet.has_active_session() {
            return Ok(());
        }

        match get_streams().await {
            Ok(streams) => {
                apply_streams_action(AppAction::StreamsLoaded { streams });
                Ok(())
            }
            Err(error) if error.is_unauthorized() => {
                clear_wallet_session();
                stop_streams_poll();
                apply_wallet_action(AppAction::WalletReauthRequired {
                    message: "Wallet session expired. Connect again.".to_string(),
                });
                Err(error)
            }
            Err(error) => {
                apply_streams_action(AppAction::StreamsLoadFailed {
                    message: error.message.clone(),
                });
                Err(error)
            }
        }
    }

    async fn toggle_auto_deposit_flow(
        stream_id: String,
        enabled: bool,
    ) -> Result<(), ControlApiError> {
        match post_auto_deposit_toggle(&stream_id, enabled).await {
            Ok(()) => {
                apply_streams_action(AppAction::AutoDepositToggleSettled { stream_id });
                // The toggle never updates stream data locally; a refresh
                // supplies the new auto_deposit_enabled value.
                queue_intent(CommandIntent::RefreshStreams);
                Ok(())
            }
            Err(error) => {
                apply_streams_action(AppAction::AutoDepositToggleFailed {
                    stream_id,
                    message: error.message.clone(),
                });
                Err(error)
            }
        }
    }

    async fn create_stream_flow(request: CreateStreamRequest) -> Result<(), ControlApiError> {
        match post_create_stream(&request).await {
            Ok(created) => {
                SEND_SURFACE_STATE.with(|surface| {
                    let mut surface = surface.borrow_mut();
                    surface.last_error = None;
                    surface.last_status = Some(format!("Stream {} created.", created.stream_id));
                });
                clear_send_form_inputs();
                // The transition to My Streams queues the refresh that
                // picks up the new stream.
                apply_route_transition(AppRoute::MyStreams, true);
                Ok(())
            }
            Err(error) => {
                SEND_SURFACE_STATE.with(|surface| {
                    let mut surface = surface.borrow_mut();
                    surface.last_status = None;
                    surface.last_error = Some(error.message.clone());
                });
                Err(error)
            }
        }
    }

    fn apply_wallet_action(action: AppAction) {
        APP_STATE.with(|state| {
            let mut state = state.borrow_mut();
            let _ = apply_action(&mut state, action);
            update_diagnostics_from_state(state.route.to_path(), state.intent_queue.len());
        });
        render_app_dom();
    }

    fn apply_streams_action(action: AppAction) {
        APP_STATE.with(|state| {
            let mut state = state.borrow_mut();
            let _ = apply_action(&mut state, action);
            update_diagnostics_from_state(state.route.to_path(), state.intent_queue.len());
        });
        render_app_dom();
    }

    fn on_wallet_session_established() {
        queue_intent(CommandIntent::RefreshStreams);
        ensure_streams_poll_running();
    }

    /// Background refresh so balances tick while the streams surface is
    /// open. Stops when the wallet signs out.
    fn ensure_streams_poll_running() {
        STREAMS_POLL_ENABLED.with(|enabled| enabled.set(true));

        let already_running = STREAMS_POLL_RUNNING.with(|running| {
            if running.get() {
                true
            } else {
                running.set(true);
                false
            }
        });

        if already_running {
            return;
        }

        spawn_local(async {
            loop {
                sleep(STREAMS_POLL_INTERVAL).await;
                if !STREAMS_POLL_ENABLED.with(Cell::get) {
                    break;
                }
                let state = snapshot_state();
                if state.wallet.has_active_session() && state.route == AppRoute::MyStreams {
                    queue_intent(CommandIntent::RefreshStreams);
                }
            }
            STREAMS_POLL_RUNNING.with(|running| running.set(false));
        });
    }

    fn stop_streams_poll() {
        STREAMS_POLL_ENABLED.with(|enabled| enabled.set(false));
    }

    fn connect_wallet_from_input(input_id: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(input) = document
            .get_element_by_id(input_id)
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        queue_intent(CommandIntent::ConnectWallet {
            account_id: input.value(),
        });
    }

    fn submit_send_form() {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let draft = normalize_stream_draft(
            &read_input_value(&document, SEND_DESCRIPTION_ID),
            &read_input_value(&document, SEND_RECEIVER_ID),
            &read_input_value(&document, SEND_TOKEN_ID),
            &read_input_value(&document, SEND_BALANCE_ID),
            &read_input_value(&document, SEND_TOKENS_PER_TICK_ID),
            read_checkbox_value(&document, SEND_AUTO_DEPOSIT_ID),
        );

        match draft {
            Ok(draft) => {
                SEND_SURFACE_STATE.with(|surface| {
                    let mut surface = surface.borrow_mut();
                    surface.last_error = None;
                    surface.last_status = Some("Creating stream...".to_string());
                });
                queue_intent(CommandIntent::CreateStream {
                    request: CreateStreamRequest {
                        description: draft.description,
                        receiver_id: draft.receiver_id,
                        token_name: draft.token_name,
                        initial_balance: draft.initial_balance,
                        tokens_per_tick: draft.tokens_per_tick,
                        auto_deposit_enabled: draft.auto_deposit_enabled,
                    },
                });
            }
            Err(error) => {
                SEND_SURFACE_STATE.with(|surface| {
                    let mut surface = surface.borrow_mut();
                    surface.last_status = None;
                    surface.last_error = Some(error.to_string());
                });
                render_app_dom();
            }
        }
    }

    fn read_input_value(document: &web_sys::Document, id: &str) -> String {
        document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn read_checkbox_value(document: &web_sys::Document, id: &str) -> bool {
        document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.checked())
            .unwrap_or(false)
    }

    fn clear_send_form_inputs() {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        for id in [
            SEND_DESCRIPTION_ID,
            SEND_RECEIVER_ID,
            SEND_BALANCE_ID,
            SEND_TOKENS_PER_TICK_ID,
        ] {
            if let Some(input) = document
                .get_element_by_id(id)
                .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
            {
                input.set_value("");
            }
        }
        if let Some(token) = document
            .get_element_by_id(SEND_TOKEN_ID)
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
        {
            token.set_value("NEAR");
        }
        if let Some(auto_deposit) = document
            .get_element_by_id(SEND_AUTO_DEPOSIT_ID)
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
        {
            auto_deposit.set_checked(false);
        }
    }

    fn browser_local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    fn persist_wallet_session(session: &WalletSessionState) -> Result<(), String> {
        let storage = browser_local_storage()
            .ok_or_else(|| "local storage is unavailable".to_string())?;
        let raw = serde_json::to_string(session)
            .map_err(|error| format!("failed to serialize wallet session: {error}"))?;
        storage
            .set_item(WALLET_STORAGE_KEY, &raw)
            .map_err(|_| "failed to persist wallet session".to_string())
    }

    fn load_wallet_session() -> Option<WalletSessionState> {
        let storage = browser_local_storage()?;
        let raw = storage.get_item(WALLET_STORAGE_KEY).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }

    fn clear_wallet_session() {
        if let Some(storage) = browser_local_storage() {
            let _ = storage.remove_item(WALLET_STORAGE_KEY);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::boot_diagnostics_json;

#[cfg(not(target_arch = "wasm32"))]
pub fn boot_diagnostics_json() -> String {
    "{\"phase\":\"native\",\"detail\":\"web shell diagnostics only available on wasm\"}".to_string()
}

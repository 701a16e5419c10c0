use super::*;

const NAV_DESKTOP_PREFIX: &str = "driftpay-nav-desktop";
const NAV_MOBILE_PREFIX: &str = "driftpay-nav-mobile";

pub(super) fn ensure_app_dom() -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
    let document = window
        .document()
        .ok_or_else(|| "document is unavailable".to_string())?;
    let body = document
        .body()
        .ok_or_else(|| "document body is unavailable".to_string())?;

    ensure_style_rules(&document, &body)?;
    ensure_header_dom(&document, &body)?;
    ensure_main_dom(&document, &body)?;
    install_nav_toggle_handler(&document);
    install_send_submit_handler(&document);
    Ok(())
}

fn ensure_style_rules(
    document: &web_sys::Document,
    body: &HtmlElement,
) -> Result<(), String> {
    if document.get_element_by_id(SHELL_STYLE_ID).is_some() {
        return Ok(());
    }
    let style = document
        .create_element("style")
        .map_err(|_| "failed to create style element".to_string())?;
    style.set_id(SHELL_STYLE_ID);
    // The two header variants share one stylesheet rule pair so exactly
    // one of them is visible at any viewport width.
    style.set_text_content(Some(&format!(
        "body {{ margin: 0; background: #080a10; color: #e2e8f0; \
         font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; }}\n\
         #{HEADER_DESKTOP_ID} {{ display: none; }}\n\
         #{HEADER_MOBILE_ID} {{ display: block; }}\n\
         @media (min-width: {HEADER_BREAKPOINT_PX}px) {{\n\
           #{HEADER_DESKTOP_ID} {{ display: grid; }}\n\
           #{HEADER_MOBILE_ID} {{ display: none; }}\n\
         }}\n\
         .driftpay-nav-list {{ list-style: none; display: flex; gap: 8px; \
         margin: 0; padding: 0; justify-content: center; }}\n\
         #{HEADER_MOBILE_PANEL_ID} .driftpay-nav-list {{ flex-direction: column; }}\n"
    )));
    body.append_child(&style)
        .map_err(|_| "failed to append style element".to_string())?;
    Ok(())
}

fn ensure_header_dom(
    document: &web_sys::Document,
    body: &HtmlElement,
) -> Result<(), String> {
    if document.get_element_by_id(HEADER_ROOT_ID).is_some() {
        return Ok(());
    }

    let header = document
        .create_element("header")
        .map_err(|_| "failed to create header".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "header is not HtmlElement".to_string())?;
    header.set_id(HEADER_ROOT_ID);
    let _ = header.style().set_property("padding", "16px 24px");
    let _ = header
        .style()
        .set_property("border-bottom", "1px solid #1f2937");

    // Wide layout: logo | links | auth in one grid row.
    let desktop = document
        .create_element("div")
        .map_err(|_| "failed to create desktop header".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "desktop header is not HtmlElement".to_string())?;
    desktop.set_id(HEADER_DESKTOP_ID);
    let _ = desktop
        .style()
        .set_property("grid-template-columns", "1fr auto 1fr");
    let _ = desktop.style().set_property("align-items", "center");
    let _ = desktop.style().set_property("gap", "12px");

    let _ = desktop.append_child(&build_logo(document)?);
    let _ = desktop.append_child(&build_nav_list(document, NAV_DESKTOP_PREFIX)?);

    let desktop_auth = document
        .create_element("div")
        .map_err(|_| "failed to create desktop auth slot".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "desktop auth slot is not HtmlElement".to_string())?;
    desktop_auth.set_id(AUTH_SLOT_DESKTOP_ID);
    let _ = desktop_auth.style().set_property("display", "flex");
    let _ = desktop_auth
        .style()
        .set_property("justify-content", "flex-end");
    let _ = desktop_auth.style().set_property("gap", "8px");
    let _ = desktop.append_child(&desktop_auth);
    let _ = header.append_child(&desktop);

    // Narrow layout: logo plus a toggler revealing the same links and
    // auth control in a collapsible panel.
    let mobile = document
        .create_element("div")
        .map_err(|_| "failed to create mobile header".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "mobile header is not HtmlElement".to_string())?;
    mobile.set_id(HEADER_MOBILE_ID);

    let bar = document
        .create_element("div")
        .map_err(|_| "failed to create mobile header bar".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "mobile header bar is not HtmlElement".to_string())?;
    let _ = bar.style().set_property("display", "flex");
    let _ = bar.style().set_property("justify-content", "space-between");
    let _ = bar.style().set_property("align-items", "center");
    let _ = bar.append_child(&build_logo(document)?);

    let toggle = document
        .create_element("button")
        .map_err(|_| "failed to create nav toggle".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "nav toggle is not HtmlElement".to_string())?;
    toggle.set_id(HEADER_MOBILE_TOGGLE_ID);
    let _ = toggle.set_attribute("type", "button");
    let _ = toggle.set_attribute("aria-controls", HEADER_MOBILE_PANEL_ID);
    let _ = toggle.set_attribute("aria-expanded", "false");
    let _ = toggle.set_attribute("aria-label", "Toggle navigation");
    toggle.set_inner_text("Menu");
    let _ = toggle.style().set_property("padding", "6px 12px");
    let _ = toggle.style().set_property("border-radius", "8px");
    let _ = toggle.style().set_property("border", "1px solid #1f2937");
    let _ = toggle.style().set_property("background", "#111827");
    let _ = toggle.style().set_property("color", "#cbd5e1");
    let _ = toggle.style().set_property("cursor", "pointer");
    let _ = bar.append_child(&toggle);
    let _ = mobile.append_child(&bar);

    let panel = document
        .create_element("div")
        .map_err(|_| "failed to create nav panel".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "nav panel is not HtmlElement".to_string())?;
    panel.set_id(HEADER_MOBILE_PANEL_ID);
    let _ = panel.style().set_property("display", "none");
    let _ = panel.style().set_property("flex-direction", "column");
    let _ = panel.style().set_property("gap", "12px");
    let _ = panel.style().set_property("margin-top", "16px");
    let _ = panel.append_child(&build_nav_list(document, NAV_MOBILE_PREFIX)?);

    let mobile_auth = document
        .create_element("div")
        .map_err(|_| "failed to create mobile auth slot".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "mobile auth slot is not HtmlElement".to_string())?;
    mobile_auth.set_id(AUTH_SLOT_MOBILE_ID);
    let _ = mobile_auth.style().set_property("display", "flex");
    let _ = mobile_auth.style().set_property("gap", "8px");
    let _ = panel.append_child(&mobile_auth);
    let _ = mobile.append_child(&panel);
    let _ = header.append_child(&mobile);

    body.append_child(&header)
        .map_err(|_| "failed to append header".to_string())?;
    Ok(())
}

fn build_logo(document: &web_sys::Document) -> Result<HtmlElement, String> {
    let logo = document
        .create_element("a")
        .map_err(|_| "failed to create logo".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "logo is not HtmlElement".to_string())?;
    let _ = logo.set_attribute("href", "/streams");
    logo.set_inner_text("Driftpay");
    let _ = logo.style().set_property("font-weight", "700");
    let _ = logo.style().set_property("font-size", "18px");
    let _ = logo.style().set_property("letter-spacing", "0.04em");
    let _ = logo.style().set_property("color", "#e2e8f0");
    let _ = logo.style().set_property("text-decoration", "none");
    Ok(logo)
}

/// Both header variants call this with a distinct id prefix, so the link
/// semantics are identical by construction and only presentation differs.
fn build_nav_list(
    document: &web_sys::Document,
    id_prefix: &str,
) -> Result<HtmlElement, String> {
    let list = document
        .create_element("ul")
        .map_err(|_| "failed to create nav list".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "nav list is not HtmlElement".to_string())?;
    let _ = list.set_attribute("class", "driftpay-nav-list");

    for (index, (label, path)) in NAV_LINKS.iter().enumerate() {
        let item = document
            .create_element("li")
            .map_err(|_| "failed to create nav item".to_string())?;
        let link = document
            .create_element("a")
            .map_err(|_| "failed to create nav link".to_string())?
            .dyn_into::<HtmlElement>()
            .map_err(|_| "nav link is not HtmlElement".to_string())?;
        link.set_id(&nav_link_id(id_prefix, index));
        let _ = link.set_attribute("href", path);
        link.set_inner_text(label);
        let _ = link.style().set_property("display", "inline-block");
        let _ = link.style().set_property("padding", "8px 14px");
        let _ = link.style().set_property("border-radius", "8px");
        let _ = link.style().set_property("color", "#cbd5e1");
        let _ = link.style().set_property("text-decoration", "none");
        let _ = item.append_child(&link);
        let _ = list.append_child(&item);
    }
    Ok(list)
}

fn nav_link_id(id_prefix: &str, index: usize) -> String {
    format!("{id_prefix}-link-{index}")
}

fn ensure_main_dom(
    document: &web_sys::Document,
    body: &HtmlElement,
) -> Result<(), String> {
    if document.get_element_by_id(MAIN_ROOT_ID).is_some() {
        return Ok(());
    }

    let main = document
        .create_element("main")
        .map_err(|_| "failed to create main".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "main is not HtmlElement".to_string())?;
    main.set_id(MAIN_ROOT_ID);
    let _ = main.style().set_property("max-width", "760px");
    let _ = main.style().set_property("margin", "0 auto");
    let _ = main.style().set_property("padding", "24px 16px 96px");

    let streams = document
        .create_element("section")
        .map_err(|_| "failed to create streams section".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "streams section is not HtmlElement".to_string())?;
    streams.set_id(STREAMS_ROOT_ID);
    let _ = streams.append_child(&build_surface_heading(document, "My Streams")?);

    let cards = document
        .create_element("div")
        .map_err(|_| "failed to create streams cards".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "streams cards is not HtmlElement".to_string())?;
    cards.set_id(STREAMS_CARDS_ID);
    let _ = cards.style().set_property("display", "flex");
    let _ = cards.style().set_property("flex-direction", "column");
    let _ = cards.style().set_property("gap", "10px");
    let _ = streams.append_child(&cards);
    let _ = main.append_child(&streams);

    let send = document
        .create_element("section")
        .map_err(|_| "failed to create send section".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "send section is not HtmlElement".to_string())?;
    send.set_id(SEND_ROOT_ID);
    let _ = send.style().set_property("display", "none");
    let _ = send.append_child(&build_surface_heading(document, "Send")?);

    let form = document
        .create_element("div")
        .map_err(|_| "failed to create send form".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "send form is not HtmlElement".to_string())?;
    let _ = form.style().set_property("display", "flex");
    let _ = form.style().set_property("flex-direction", "column");
    let _ = form.style().set_property("gap", "10px");

    append_send_input(document, &form, SEND_DESCRIPTION_ID, "Description (optional)")?;
    append_send_input(document, &form, SEND_RECEIVER_ID, "Receiver account id")?;
    let token = append_send_input(document, &form, SEND_TOKEN_ID, "Token (NEAR, DACHA, TARAS)")?;
    token.set_value("NEAR");
    append_send_input(document, &form, SEND_BALANCE_ID, "Initial balance")?;
    append_send_input(document, &form, SEND_TOKENS_PER_TICK_ID, "Tokens per tick")?;

    let auto_deposit_row = document
        .create_element("label")
        .map_err(|_| "failed to create auto-deposit row".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "auto-deposit row is not HtmlElement".to_string())?;
    let _ = auto_deposit_row.style().set_property("display", "flex");
    let _ = auto_deposit_row.style().set_property("gap", "8px");
    let _ = auto_deposit_row.style().set_property("align-items", "center");
    let _ = auto_deposit_row.style().set_property("color", "#cbd5e1");
    let _ = auto_deposit_row.style().set_property("font-size", "14px");

    let auto_deposit = document
        .create_element("input")
        .map_err(|_| "failed to create auto-deposit checkbox".to_string())?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| "auto-deposit checkbox is not HtmlInputElement".to_string())?;
    auto_deposit.set_id(SEND_AUTO_DEPOSIT_ID);
    auto_deposit.set_type("checkbox");
    let _ = auto_deposit_row.append_child(&auto_deposit);

    let auto_deposit_label = document
        .create_element("span")
        .map_err(|_| "failed to create auto-deposit label".to_string())?;
    auto_deposit_label.set_text_content(Some("Enable auto-deposit"));
    let _ = auto_deposit_row.append_child(&auto_deposit_label);
    let _ = form.append_child(&auto_deposit_row);

    let submit = document
        .create_element("button")
        .map_err(|_| "failed to create send submit".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "send submit is not HtmlElement".to_string())?;
    submit.set_id(SEND_SUBMIT_ID);
    let _ = submit.set_attribute("type", "button");
    submit.set_inner_text("Create Stream");
    let _ = submit.style().set_property("height", "40px");
    let _ = submit.style().set_property("padding", "0 16px");
    let _ = submit.style().set_property("border-radius", "10px");
    let _ = submit.style().set_property("border", "1px solid #2563eb");
    let _ = submit.style().set_property("background", "#2563eb");
    let _ = submit.style().set_property("color", "#ffffff");
    let _ = submit.style().set_property("font-weight", "600");
    let _ = submit.style().set_property("cursor", "pointer");
    let _ = form.append_child(&submit);

    let status = document
        .create_element("div")
        .map_err(|_| "failed to create send status".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "send status is not HtmlElement".to_string())?;
    status.set_id(SEND_STATUS_ID);
    let _ = status.style().set_property("font-size", "13px");
    let _ = status.style().set_property("min-height", "18px");
    let _ = status.style().set_property("color", "#94a3b8");
    let _ = form.append_child(&status);

    let _ = send.append_child(&form);
    let _ = main.append_child(&send);

    body.append_child(&main)
        .map_err(|_| "failed to append main".to_string())?;
    Ok(())
}

fn build_surface_heading(
    document: &web_sys::Document,
    title: &str,
) -> Result<HtmlElement, String> {
    let heading = document
        .create_element("h2")
        .map_err(|_| "failed to create surface heading".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "surface heading is not HtmlElement".to_string())?;
    heading.set_inner_text(title);
    let _ = heading.style().set_property("font-size", "18px");
    let _ = heading.style().set_property("margin", "0 0 16px");
    Ok(heading)
}

fn append_send_input(
    document: &web_sys::Document,
    form: &HtmlElement,
    id: &str,
    placeholder: &str,
) -> Result<HtmlInputElement, String> {
    let input = document
        .create_element("input")
        .map_err(|_| "failed to create send input".to_string())?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| "send input is not HtmlInputElement".to_string())?;
    input.set_id(id);
    input.set_placeholder(placeholder);
    let _ = input.set_attribute("aria-label", placeholder);
    let _ = input.style().set_property("height", "40px");
    let _ = input.style().set_property("padding", "0 12px");
    let _ = input.style().set_property("border-radius", "10px");
    let _ = input.style().set_property("border", "1px solid #1f2937");
    let _ = input.style().set_property("background", "#0f172a");
    let _ = input.style().set_property("color", "#e2e8f0");
    let _ = input.style().set_property("font-size", "15px");
    form.append_child(&input)
        .map_err(|_| "failed to append send input".to_string())?;
    Ok(input)
}

fn install_nav_toggle_handler(document: &web_sys::Document) {
    NAV_TOGGLE_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let Some(toggle) = document.get_element_by_id(HEADER_MOBILE_TOGGLE_ID) else {
            return;
        };
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            toggle_mobile_nav_panel();
        }));
        let _ = toggle
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });
}

fn toggle_mobile_nav_panel() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(panel) = document
        .get_element_by_id(HEADER_MOBILE_PANEL_ID)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let collapsed = panel
        .style()
        .get_property_value("display")
        .map(|value| value == "none")
        .unwrap_or(true);
    let _ = panel
        .style()
        .set_property("display", if collapsed { "flex" } else { "none" });
    if let Some(toggle) = document.get_element_by_id(HEADER_MOBILE_TOGGLE_ID) {
        let _ = toggle.set_attribute("aria-expanded", if collapsed { "true" } else { "false" });
    }
}

fn install_send_submit_handler(document: &web_sys::Document) {
    SEND_SUBMIT_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let Some(submit) = document.get_element_by_id(SEND_SUBMIT_ID) else {
            return;
        };
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            submit_send_form();
        }));
        let _ = submit
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });
}

pub(super) fn render_app_dom() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let state = snapshot_state();
    let send_state = SEND_SURFACE_STATE.with(|surface| surface.borrow().clone());

    document.set_title(&format!("{} | Driftpay", route_header_title(&state.route)));

    set_display(
        &document,
        STREAMS_ROOT_ID,
        if state.route == AppRoute::MyStreams {
            "block"
        } else {
            "none"
        },
    );
    set_display(
        &document,
        SEND_ROOT_ID,
        if state.route == AppRoute::Send {
            "block"
        } else {
            "none"
        },
    );

    render_nav_links(&document, &state.route);

    AUTH_CONTROL_HANDLERS.with(|handlers| handlers.borrow_mut().clear());
    render_auth_slot(&document, AUTH_SLOT_DESKTOP_ID, &state.wallet);
    render_auth_slot(&document, AUTH_SLOT_MOBILE_ID, &state.wallet);

    if state.route == AppRoute::MyStreams {
        render_streams_dom(&document, &state);
    }
    if state.route == AppRoute::Send {
        render_send_status(&document, &send_state);
    }
}

fn render_nav_links(document: &web_sys::Document, route: &AppRoute) {
    let active_path = route.to_path();
    for prefix in [NAV_DESKTOP_PREFIX, NAV_MOBILE_PREFIX] {
        for (index, (_, path)) in NAV_LINKS.iter().enumerate() {
            let Some(link) = document
                .get_element_by_id(&nav_link_id(prefix, index))
                .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            if *path == active_path {
                let _ = link.style().set_property("background", "#1f2937");
                let _ = link.style().set_property("color", "#f8fafc");
            } else {
                let _ = link.style().set_property("background", "transparent");
                let _ = link.style().set_property("color", "#cbd5e1");
            }
        }
    }
}

fn render_auth_slot(document: &web_sys::Document, slot_id: &str, wallet: &WalletState) {
    let Some(slot) = document
        .get_element_by_id(slot_id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    slot.set_inner_html("");

    match wallet.status {
        WalletAuthStatus::Connecting => {
            append_auth_text(document, &slot, "Connecting wallet...");
        }
        WalletAuthStatus::Restoring => {
            append_auth_text(document, &slot, "Restoring session...");
        }
        WalletAuthStatus::SignedIn => {
            let account = wallet.account_id.clone().unwrap_or_default();
            append_auth_text(document, &slot, &account);
            append_auth_button(document, &slot, "Sign Out", move || {
                queue_intent(CommandIntent::DisconnectWallet);
            });
        }
        WalletAuthStatus::SignedOut | WalletAuthStatus::ReauthRequired => {
            let input_id = auth_input_id(slot_id);
            let Ok(input) = document.create_element("input") else {
                return;
            };
            let Ok(input) = input.dyn_into::<HtmlInputElement>() else {
                return;
            };
            input.set_id(&input_id);
            let _ = input.set_attribute("class", AUTH_ACCOUNT_INPUT_CLASS);
            input.set_placeholder("account.near");
            let _ = input.set_attribute("aria-label", "Wallet account id");
            let _ = input.style().set_property("height", "34px");
            let _ = input.style().set_property("padding", "0 10px");
            let _ = input.style().set_property("border-radius", "8px");
            let _ = input.style().set_property("border", "1px solid #1f2937");
            let _ = input.style().set_property("background", "#0f172a");
            let _ = input.style().set_property("color", "#e2e8f0");
            let _ = input.style().set_property("width", "150px");
            if let Some(error) = wallet.last_error.as_ref() {
                let _ = input.set_attribute("title", error);
                let _ = input.style().set_property("border", "1px solid #f87171");
            }
            let _ = slot.append_child(&input);

            append_auth_button(document, &slot, "Connect Wallet", move || {
                connect_wallet_from_input(&input_id);
            });
        }
    }
}

fn auth_input_id(slot_id: &str) -> String {
    format!("{slot_id}-input")
}

fn append_auth_text(document: &web_sys::Document, slot: &HtmlElement, text: &str) {
    let Ok(label) = document.create_element("span") else {
        return;
    };
    let Ok(label) = label.dyn_into::<HtmlElement>() else {
        return;
    };
    label.set_inner_text(text);
    let _ = label.style().set_property("align-self", "center");
    let _ = label.style().set_property("color", "#cbd5e1");
    let _ = label.style().set_property("font-size", "14px");
    let _ = slot.append_child(&label);
}

fn append_auth_button(
    document: &web_sys::Document,
    slot: &HtmlElement,
    label: &str,
    on_click: impl Fn() + 'static,
) {
    let Ok(button) = document.create_element("button") else {
        return;
    };
    let Ok(button) = button.dyn_into::<HtmlElement>() else {
        return;
    };
    let _ = button.set_attribute("type", "button");
    button.set_inner_text(label);
    let _ = button.style().set_property("height", "34px");
    let _ = button.style().set_property("padding", "0 12px");
    let _ = button.style().set_property("border-radius", "8px");
    let _ = button.style().set_property("border", "1px solid #2563eb");
    let _ = button.style().set_property("background", "#2563eb");
    let _ = button.style().set_property("color", "#ffffff");
    let _ = button.style().set_property("cursor", "pointer");

    let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
        on_click();
    }));
    let _ = button.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
    AUTH_CONTROL_HANDLERS.with(|handlers| handlers.borrow_mut().push(callback));

    let _ = slot.append_child(&button);
}

fn render_streams_dom(document: &web_sys::Document, state: &AppState) {
    let Some(cards_container) = document
        .get_element_by_id(STREAMS_CARDS_ID)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    cards_container.set_inner_html("");
    STREAM_TOGGLE_HANDLERS.with(|handlers| handlers.borrow_mut().clear());

    for card in streams_surface_cards(&state.wallet, &state.streams) {
        append_surface_card(document, &cards_container, card);
    }
    for row in stream_rows(&state.streams) {
        append_stream_row(document, &cards_container, row);
    }
}

fn append_stream_row(
    document: &web_sys::Document,
    container: &HtmlElement,
    row: StreamRow,
) {
    let Ok(card) = document.create_element("div") else {
        return;
    };
    let Ok(card) = card.dyn_into::<HtmlElement>() else {
        return;
    };
    let _ = card.style().set_property("display", "flex");
    let _ = card.style().set_property("justify-content", "space-between");
    let _ = card.style().set_property("align-items", "center");
    let _ = card.style().set_property("gap", "12px");
    let _ = card.style().set_property("padding", "12px 14px");
    let _ = card.style().set_property("border-radius", "12px");
    let _ = card.style().set_property("background", "#111827");

    let Ok(details) = document.create_element("div") else {
        return;
    };
    let Ok(details) = details.dyn_into::<HtmlElement>() else {
        return;
    };

    let Ok(title) = document.create_element("div") else {
        return;
    };
    let Ok(title) = title.dyn_into::<HtmlElement>() else {
        return;
    };
    title.set_inner_text(&row.title);
    let _ = title.style().set_property("font-weight", "600");
    let _ = title.style().set_property("font-size", "15px");
    let _ = details.append_child(&title);

    let Ok(summary) = document.create_element("div") else {
        return;
    };
    let Ok(summary) = summary.dyn_into::<HtmlElement>() else {
        return;
    };
    summary.set_inner_text(&row.summary);
    let _ = summary.style().set_property("font-size", "13px");
    let _ = summary.style().set_property("color", "#94a3b8");
    let _ = details.append_child(&summary);
    let _ = card.append_child(&details);

    match row.view {
        AutoDepositView::Loading => {
            let Ok(loading) = document.create_element("span") else {
                return;
            };
            let Ok(loading) = loading.dyn_into::<HtmlElement>() else {
                return;
            };
            loading.set_inner_text("Loading!");
            let _ = loading.style().set_property("color", "#93c5fd");
            let _ = loading.style().set_property("font-size", "13px");
            let _ = card.append_child(&loading);
        }
        AutoDepositView::Status { status, label } => {
            let Ok(note) = document.create_element("span") else {
                return;
            };
            let Ok(note) = note.dyn_into::<HtmlElement>() else {
                return;
            };
            note.set_inner_text(&format!("{} - auto-deposit {label}", status.label()));
            let _ = note.style().set_property("color", "#94a3b8");
            let _ = note.style().set_property("font-size", "13px");
            let _ = card.append_child(&note);
        }
        AutoDepositView::Toggle { label, enable } => {
            let Ok(button) = document.create_element("button") else {
                return;
            };
            let Ok(button) = button.dyn_into::<HtmlElement>() else {
                return;
            };
            let _ = button.set_attribute("type", "button");
            button.set_inner_text(&label);
            let _ = button.style().set_property("height", "32px");
            let _ = button.style().set_property("padding", "0 14px");
            let _ = button.style().set_property("border-radius", "8px");
            let _ = button.style().set_property("border", "1px solid #2563eb");
            let _ = button.style().set_property("background", "#2563eb");
            let _ = button.style().set_property("color", "#ffffff");
            let _ = button.style().set_property("cursor", "pointer");

            let stream_id = row.stream_id.clone();
            let callback =
                Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
                    queue_intent(CommandIntent::ToggleAutoDeposit {
                        stream_id: stream_id.clone(),
                        enabled: enable,
                    });
                }));
            let _ = button
                .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
            STREAM_TOGGLE_HANDLERS.with(|handlers| handlers.borrow_mut().push(callback));
            let _ = card.append_child(&button);
        }
    }

    let _ = container.append_child(&card);
}

fn render_send_status(document: &web_sys::Document, send_state: &SendSurfaceState) {
    let Some(status) = document
        .get_element_by_id(SEND_STATUS_ID)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    if let Some(error) = send_state.last_error.as_ref() {
        status.set_inner_text(error);
        let _ = status.style().set_property("color", "#f87171");
    } else if let Some(message) = send_state.last_status.as_ref() {
        status.set_inner_text(message);
        let _ = status.style().set_property("color", "#86efac");
    } else {
        status.set_inner_text("");
        let _ = status.style().set_property("color", "#94a3b8");
    }
}

pub(super) fn append_surface_card(
    document: &web_sys::Document,
    container: &HtmlElement,
    card: SurfaceCard,
) {
    let Ok(bubble) = document.create_element("div") else {
        return;
    };
    let Ok(bubble) = bubble.dyn_into::<HtmlElement>() else {
        return;
    };
    let _ = bubble.style().set_property("padding", "10px 12px");
    let _ = bubble.style().set_property("border-radius", "12px");
    let _ = bubble.style().set_property("white-space", "pre-wrap");
    let _ = bubble.style().set_property("line-height", "1.4");
    let _ = bubble.style().set_property("font-size", "14px");

    let (bg, fg) = match card.tone {
        SurfaceCardTone::Neutral => ("#111827", "#e5e7eb"),
        SurfaceCardTone::Info => ("#0f172a", "#bfdbfe"),
        SurfaceCardTone::Success => ("#052e16", "#bbf7d0"),
        SurfaceCardTone::Warning => ("#3f2f0a", "#fde68a"),
        SurfaceCardTone::Error => ("#3f1d1d", "#fecaca"),
    };
    let _ = bubble.style().set_property("background", bg);
    let _ = bubble.style().set_property("color", fg);
    bubble.set_inner_text(&format!("{}\n{}", card.title, card.body));

    let _ = container.append_child(&bubble);
}

fn set_display(document: &web_sys::Document, id: &str, value: &str) {
    if let Some(element) = document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    {
        let _ = element.style().set_property("display", value);
    }
}

use dioxus::prelude::*;
use crate::constants::*;

/// Collapsible right-hand panel. Collapses to a thin rail that reopens on click.
#[component]
pub fn SidePanel(
    title: &'static str,
    width: f64,
    collapsed: bool,
    on_toggle: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    let icon = if collapsed { "◀" } else { "▶" };
    let width = if collapsed { 36.0 } else { width };
    let rail_cursor = if collapsed { "pointer" } else { "default" };
    let panel_class = if collapsed { "collapsed-rail" } else { "" };

    rsx! {
        div {
            class: "{panel_class}",
            style: "
                display: flex; flex-direction: column;
                width: {width}px; min-width: {width}px;
                background-color: {BG_ELEVATED}; border-left: 1px solid {BORDER_DEFAULT};
                transition: width 0.2s ease, min-width 0.2s ease;
                overflow: hidden;
                cursor: {rail_cursor};
            ",
            onclick: move |e| {
                if collapsed {
                    on_toggle.call(e);
                }
            },

            div {
                style: "
                    display: flex; align-items: center;
                    height: 32px; padding: 0 8px;
                    background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                    flex-shrink: 0;
                ",
                button {
                    class: "collapse-btn",
                    style: "
                        width: 24px; height: 24px; border: none; border-radius: 4px;
                        background: transparent; color: {TEXT_MUTED}; font-size: 10px;
                        cursor: pointer; display: flex; align-items: center; justify-content: center;
                        margin-right: 8px;
                    ",
                    onclick: move |e| {
                        e.stop_propagation();
                        on_toggle.call(e);
                    },
                    "{icon}"
                }
                if !collapsed {
                    span {
                        style: "font-size: 11px; font-weight: 500; color: {TEXT_MUTED}; text-transform: uppercase; letter-spacing: 0.5px; flex: 1;",
                        "{title}"
                    }
                }
            }

            if !collapsed {
                div {
                    style: "flex: 1; overflow-y: auto;",
                    {children}
                }
            }
        }
    }
}

/// Titled block inside the side panel.
#[component]
pub fn PanelSection(
    title: &'static str,
    #[props(default)] aside: Option<String>,
    children: Element,
) -> Element {
    rsx! {
        div {
            style: "padding: 12px 14px; border-bottom: 1px solid {BORDER_SUBTLE}; display: flex; flex-direction: column; gap: 10px;",
            div {
                style: "display: flex; align-items: center; justify-content: space-between;",
                span {
                    style: "font-size: 10px; font-weight: 600; color: {TEXT_DIM}; text-transform: uppercase; letter-spacing: 0.6px;",
                    "{title}"
                }
                if let Some(aside) = aside {
                    span { style: "font-size: 10px; color: {TEXT_DIM};", "{aside}" }
                }
            }
            {children}
        }
    }
}

use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn StatusBar(status: String, #[props(default)] detail: Option<String>) -> Element {
    rsx! {
        div {
            style: "display: flex; align-items: center; justify-content: space-between; height: 22px; padding: 0 14px; background-color: {BG_SURFACE}; border-top: 1px solid {BORDER_DEFAULT}; font-size: 11px; color: {TEXT_DIM};",
            span { "{status}" }
            if let Some(detail) = detail {
                span {
                    style: "font-family: 'SF Mono', Consolas, monospace;",
                    "{detail}"
                }
            }
        }
    }
}

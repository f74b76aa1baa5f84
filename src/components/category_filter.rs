use dioxus::prelude::*;

use crate::constants::*;
use crate::state::{CategoryFilter, FeedbackCategory};

/// Category chips for the timeline. Click toggles, double-click shows only that category.
#[component]
pub fn CategoryFilterBar(
    filter: CategoryFilter,
    counts: [usize; 4],
    on_change: EventHandler<CategoryFilter>,
) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 6px;",
            for category in FeedbackCategory::ALL {
                {
                    let enabled = filter.is_enabled(category);
                    let count = counts[category.index()];
                    let color = category.color();
                    let opacity = if enabled { 1.0 } else { 0.45 };
                    let background = if enabled { BG_HOVER } else { "transparent" };
                    let description = category.info().description;
                    rsx! {
                        button {
                            key: "{category}",
                            class: "collapse-btn",
                            title: "{description}",
                            style: "
                                display: flex; align-items: center; gap: 6px;
                                padding: 4px 10px; border-radius: 999px;
                                border: 1px solid {BORDER_DEFAULT}; background-color: {background};
                                color: {TEXT_PRIMARY}; font-size: 11px; cursor: pointer;
                                opacity: {opacity};
                            ",
                            onclick: move |_| {
                                let mut next = filter;
                                next.toggle(category);
                                on_change.call(next);
                            },
                            ondoubleclick: move |_| {
                                let mut next = filter;
                                next.solo(category);
                                on_change.call(next);
                            },
                            span { style: "width: 8px; height: 8px; border-radius: 50%; background-color: {color};" }
                            "{category.label()}"
                            span { style: "color: {TEXT_DIM};", "{count}" }
                        }
                    }
                }
            }
            if !filter.all_enabled() {
                button {
                    class: "collapse-btn",
                    style: "
                        padding: 4px 10px; border-radius: 999px; border: none;
                        background: transparent; color: {TEXT_MUTED}; font-size: 11px; cursor: pointer;
                    ",
                    onclick: move |_| on_change.call(CategoryFilter::default()),
                    "Show all"
                }
            }
        }
    }
}

use dioxus::prelude::*;

use crate::constants::*;
use crate::state::{FeedbackCategory, Scores, CATEGORY_SCORE_MAX, TOTAL_SCORE_MAX};

#[component]
pub fn ScoreCard(scores: Scores) -> Element {
    let total_percent = scores.total_ratio() * 100.0;

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 10px;",
            div {
                style: "display: flex; align-items: baseline; gap: 6px;",
                span { style: "font-size: 28px; font-weight: 700; color: {TEXT_PRIMARY};", "{scores.total}" }
                span { style: "font-size: 12px; color: {TEXT_DIM};", "/ {TOTAL_SCORE_MAX}" }
            }
            ScoreBar { percent: total_percent, color: ACCENT_PRIMARY }
            for category in FeedbackCategory::ALL {
                {
                    let value = scores.for_category(category);
                    let percent = scores.category_ratio(category) * 100.0;
                    rsx! {
                        div {
                            key: "{category}",
                            style: "display: flex; flex-direction: column; gap: 4px;",
                            div {
                                style: "display: flex; justify-content: space-between; font-size: 11px;",
                                span { style: "color: {TEXT_SECONDARY};", "{category.label()}" }
                                span {
                                    style: "color: {TEXT_MUTED}; font-family: 'SF Mono', Consolas, monospace;",
                                    "{value} / {CATEGORY_SCORE_MAX}"
                                }
                            }
                            ScoreBar { percent: percent, color: category.color() }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ScoreBar(percent: f64, color: &'static str) -> Element {
    let percent = percent.clamp(0.0, 100.0);
    rsx! {
        div {
            style: "height: 4px; border-radius: 2px; background-color: {BG_SURFACE}; overflow: hidden;",
            div {
                style: "height: 100%; width: {percent}%; background-color: {color}; transition: width 0.3s ease;",
            }
        }
    }
}

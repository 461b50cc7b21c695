use chrono::Datelike;
use shared::Period;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::services::dates;

fn month_short_name(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "Jan",
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub period: Period,
    pub selected_month: u32,
    pub selected_year: i32,
    pub on_select_weekly: Callback<()>,
    pub on_select_monthly: Callback<()>,
    /// Requested (month, year); clamping happens in the handler
    pub on_month_change: Callback<(u32, i32)>,
}

/// App header: logo, weekly/monthly period pills and the month/year picker.
#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let on_weekly = {
        let on_select_weekly = props.on_select_weekly.clone();
        Callback::from(move |_: MouseEvent| on_select_weekly.emit(()))
    };

    let on_monthly = {
        let on_select_monthly = props.on_select_monthly.clone();
        Callback::from(move |_: MouseEvent| on_select_monthly.emit(()))
    };

    let on_month_select = {
        let on_month_change = props.on_month_change.clone();
        let year = props.selected_year;
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(month) = select.value().parse::<u32>() {
                on_month_change.emit((month, year));
            }
        })
    };

    let on_year_select = {
        let on_month_change = props.on_month_change.clone();
        let month = props.selected_month;
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(year) = select.value().parse::<i32>() {
                on_month_change.emit((month, year));
            }
        })
    };

    let current_year = dates::today().year();

    html! {
        <header class="app-header">
            <div>
                <div class="logo">{"Money"}<span>{"Notes"}</span></div>
                <div class="punchline">{"A quiet place to understand your spending"}</div>
            </div>

            <div class="header-actions">
                <div class="period-toggle">
                    <button
                        class={if props.period == Period::Weekly { "pill pill-active" } else { "pill" }}
                        onclick={on_weekly}
                    >
                        {"Weekly"}
                    </button>
                    <button
                        class={if props.period == Period::Monthly { "pill pill-active" } else { "pill" }}
                        onclick={on_monthly}
                    >
                        {"Monthly"}
                    </button>
                </div>

                <div class="month-picker-container">
                    <select class="month-input-pill" onchange={on_month_select}>
                        {for (1..=12u32).map(|m| html! {
                            <option value={m.to_string()} selected={m == props.selected_month}>
                                {month_short_name(m)}
                            </option>
                        })}
                    </select>
                    <select class="month-input-pill" onchange={on_year_select}>
                        {for (0..5).map(|offset| {
                            let year = current_year - offset;
                            html! {
                                <option value={year.to_string()} selected={year == props.selected_year}>
                                    {year}
                                </option>
                            }
                        })}
                    </select>
                </div>
            </div>
        </header>
    }
}

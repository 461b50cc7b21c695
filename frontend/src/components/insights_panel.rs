use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct InsightsPanelProps {
    pub insight_text: Option<String>,
    pub loading: bool,
}

/// AI narrative panel. Renders whatever insight text is currently held;
/// insights load slower than the summary and may lag behind it.
#[function_component(InsightsPanel)]
pub fn insights_panel(props: &InsightsPanelProps) -> Html {
    html! {
        <div class="card insights-panel">
            <div class="card-header">
                <h2 class="card-title">{"AI Insights"}</h2>
                <p class="card-subtext">{"Personalized notes on your spending"}</p>
            </div>
            <div class="card-content">
                {if props.loading {
                    html! {
                        <div class="insights-skeleton">
                            <div class="skeleton-line long"></div>
                            <div class="skeleton-line long"></div>
                            <div class="skeleton-line short"></div>
                        </div>
                    }
                } else if let Some(text) = &props.insight_text {
                    html! { <p class="insight-text">{text}</p> }
                } else {
                    html! { <p class="insight-empty">{"No insights yet. Add a few expenses to get started."}</p> }
                }}
            </div>
        </div>
    }
}

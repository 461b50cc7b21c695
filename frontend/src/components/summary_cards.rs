use shared::Period;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryCardsProps {
    pub total_spent: Option<f64>,
    pub top_category: Option<String>,
    pub expense_count: u64,
    pub period: Period,
    /// Range covered by the displayed summary, if the server reported one
    pub range: Option<(String, String)>,
    pub loading: bool,
}

fn period_label(period: Period) -> &'static str {
    match period {
        Period::Weekly => "this week",
        _ => "this month",
    }
}

fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// The three headline cards: total spent, top category and expense count.
#[function_component(SummaryCards)]
pub fn summary_cards(props: &SummaryCardsProps) -> Html {
    let skeleton = || html! { <div class="skeleton-line medium"></div> };

    html! {
        <div class="summary-cards">
            <div class="card">
                <div class="card-header">
                    <div class="card-label">
                        {format!("Total spent ({})", period_label(props.period))}
                    </div>
                    <div class="card-value">
                        {if props.loading {
                            skeleton()
                        } else if let Some(total) = props.total_spent {
                            html! { {format!("₹{:.2}", total)} }
                        } else {
                            html! { {"–"} }
                        }}
                    </div>
                    {if let Some((start, end)) = &props.range {
                        html! { <p class="card-subtext">{format!("{} → {}", start, end)}</p> }
                    } else {
                        html! {}
                    }}
                </div>
            </div>

            <div class="card">
                <div class="card-header">
                    <div class="card-label">{"Top category"}</div>
                    <div class="card-value">
                        {if props.loading {
                            skeleton()
                        } else if let Some(category) = &props.top_category {
                            html! { {category} }
                        } else {
                            html! { {"No data"} }
                        }}
                    </div>
                </div>
            </div>

            <div class="card">
                <div class="card-header">
                    <div class="card-label">{"Total expenses"}</div>
                    <div class="card-value">
                        {if props.loading {
                            skeleton()
                        } else {
                            html! { {props.expense_count} }
                        }}
                    </div>
                    <p class="card-subtext">
                        {capitalized(period_label(props.period))}
                    </p>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_label_per_period() {
        assert_eq!(period_label(Period::Weekly), "this week");
        assert_eq!(period_label(Period::Monthly), "this month");
        assert_eq!(period_label(Period::All), "this month");
    }

    #[test]
    fn test_capitalized_label() {
        assert_eq!(capitalized(period_label(Period::Weekly)), "This week");
        assert_eq!(capitalized(period_label(Period::Monthly)), "This month");
    }
}

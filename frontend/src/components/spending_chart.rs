use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::Expense;
use std::collections::BTreeMap;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

// App primary color, matching the stylesheet
const LINE_COLOR: RGBColor = RGBColor(102, 126, 234);

#[derive(Properties, PartialEq)]
pub struct SpendingChartProps {
    pub expenses: Vec<Expense>,
    pub loading: bool,
}

/// Area chart of spending per day, drawn with plotters onto a canvas.
/// Dateless expenses are not plottable and are skipped.
pub struct SpendingChart {
    canvas_ref: NodeRef,
}

impl Component for SpendingChart {
    type Message = ();
    type Properties = SpendingChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().expenses != old_props.expenses {
            self.draw_chart(&ctx.props().expenses);
        }
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if !ctx.props().expenses.is_empty() {
            self.draw_chart(&ctx.props().expenses);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let expenses = &ctx.props().expenses;
        let loading = ctx.props().loading;

        html! {
            <div class="card chart-card">
                <div class="card-header">
                    <h2 class="card-title">{"Spending Trend"}</h2>
                    <p class="card-subtext">{"Your financial activity over time"}</p>
                </div>
                {if loading {
                    html! { <div class="chart-loading">{"Loading chart data..."}</div> }
                } else if daily_totals(expenses).is_empty() {
                    html! { <div class="chart-empty">{"No transaction data to display."}</div> }
                } else {
                    html! {
                        <div class="chart-content">
                            <canvas
                                ref={self.canvas_ref.clone()}
                                class="spending-chart-canvas"
                                width="800"
                                height="300"
                            ></canvas>
                        </div>
                    }
                }}
            </div>
        }
    }
}

/// Sum amounts per calendar day, ordered by date.
fn daily_totals(expenses: &[Expense]) -> BTreeMap<NaiveDate, f64> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        let Some(date) = expense.date.as_deref() else {
            continue;
        };
        let Ok(date) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
            continue;
        };
        *totals.entry(date).or_insert(0.0) += expense.amount;
    }
    totals
}

impl SpendingChart {
    fn draw_chart(&self, expenses: &[Expense]) {
        let totals = daily_totals(expenses);
        if totals.is_empty() {
            return;
        }

        let canvas = match self.canvas_ref.cast::<HtmlCanvasElement>() {
            Some(canvas) => canvas,
            None => return,
        };
        canvas.set_width(800);
        canvas.set_height(300);

        let backend = match CanvasBackend::with_canvas_object(canvas) {
            Some(backend) => backend,
            None => return,
        };
        let root = backend.into_drawing_area();
        if root.fill(&WHITE).is_err() {
            return;
        }

        let points: Vec<(NaiveDate, f64)> = totals.into_iter().collect();
        let first = points[0].0;
        let mut last = points[points.len() - 1].0;
        if first == last {
            // A single day still needs a non-empty x range
            last = last + Duration::days(1);
        }
        let max_amount = points.iter().map(|&(_, v)| v).fold(0.0f64, f64::max);
        let y_max = (max_amount * 1.1).max(1.0);

        let mut chart = match ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(35)
            .y_label_area_size(60)
            .build_cartesian_2d(first..last, 0.0..y_max)
        {
            Ok(chart) => chart,
            Err(_) => return,
        };

        if chart
            .configure_mesh()
            .y_label_formatter(&|v| format!("₹{:.0}", v))
            .x_label_formatter(&|d| d.format("%b %d").to_string())
            .label_style(("sans-serif", 12, &LINE_COLOR))
            .axis_style(&RGBColor(230, 230, 230))
            .bold_line_style(&RGBColor(245, 245, 245))
            .light_line_style(&RGBColor(250, 250, 250))
            .x_labels(6)
            .y_labels(6)
            .draw()
            .is_err()
        {
            return;
        }

        let _ = chart.draw_series(
            AreaSeries::new(points.iter().copied(), 0.0, LINE_COLOR.mix(0.2))
                .border_style(LINE_COLOR.stroke_width(2)),
        );

        for &(date, amount) in &points {
            let _ = chart.draw_series(std::iter::once(Circle::new(
                (date, amount),
                3,
                LINE_COLOR.filled(),
            )));
        }
    }
}

//! Instance renderer: dispatch-by-kind from an instance to a leptos view.
//!
//! DESIGN
//! ======
//! Rendering is a pure function of `(instance, is_selected)`. Every kind gets
//! the same absolutely positioned wrapper carrying the shared appearance; the
//! per-kind body is cosmetic. Unknown kinds render a placeholder box so a
//! persisted row is never dropped from the canvas.
//!
//! Wrapper class and inline style are computed by plain functions so they can
//! be checked without rendering.

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;

use leptos::prelude::*;
use leptos::tachys::view::any_view::{AnyView, IntoAny};

use super::widget::{Appearance, Instance, Position, Widget};

pub const SELECTED_CLASS: &str = "selected";
pub const HOVER_CLASS: &str = "hoverable";
pub const HIDDEN_OPACITY: &str = "0.5";

/// One instance at its canvas position.
#[component]
pub fn InstanceView(instance: Instance, selected: bool) -> impl IntoView {
    let look = instance.properties.appearance();
    let widget = Widget::from_instance(&instance);
    let class = instance_class(&instance, &widget, selected);
    let style = instance_style(&instance.position, &look);

    view! {
        <div class=class style=style data-instance-id=instance.id>
            {widget_body(widget, look.enabled)}
        </div>
    }
}

/// Wrapper classes: kind, selection outline, and placeholder styling.
#[must_use]
pub fn instance_class(instance: &Instance, widget: &Widget, selected: bool) -> String {
    let mut classes = vec![
        "instance".to_owned(),
        format!("instance-{}", instance.kind.as_str()),
        (if selected { SELECTED_CLASS } else { HOVER_CLASS }).to_owned(),
    ];
    if let Some(extra) = extra_class(widget) {
        classes.push(extra.to_owned());
    }
    classes.join(" ")
}

fn extra_class(widget: &Widget) -> Option<&'static str> {
    match widget {
        Widget::Heading { .. } => Some("heading"),
        Widget::Paragraph { .. } => Some("prose"),
        Widget::Quote { .. } => Some("quote"),
        Widget::Link { .. } => Some("link"),
        Widget::Image | Widget::WebView | Widget::ListView | Widget::Unknown { .. } => Some("placeholder"),
        _ => None,
    }
}

/// Inline style shared by every kind. Hidden instances stay interactive;
/// disabled ones stop receiving pointer events.
#[must_use]
pub fn instance_style(position: &Position, look: &Appearance) -> String {
    [
        ("position", "absolute".to_owned()),
        ("left", px(position.x)),
        ("top", px(position.y)),
        ("width", look.width.clone()),
        ("height", look.height.clone()),
        ("font-size", px(look.font_size)),
        ("background-color", look.background_color.clone()),
        ("color", look.text_color.clone()),
        ("opacity", (if look.visible { "1" } else { HIDDEN_OPACITY }).to_owned()),
        ("pointer-events", (if look.enabled { "auto" } else { "none" }).to_owned()),
    ]
    .iter()
    .map(|(property, value)| format!("{property}:{value}"))
    .collect::<Vec<_>>()
    .join(";")
}

fn widget_body(widget: Widget, enabled: bool) -> AnyView {
    match widget {
        Widget::Button { text } => view! { <button type="button" disabled=!enabled>{text}</button> }.into_any(),
        Widget::Text { text } => view! { <p>{text}</p> }.into_any(),
        Widget::Heading { text } => view! { <h2>{text}</h2> }.into_any(),
        Widget::Paragraph { text } => view! { <p>{text}</p> }.into_any(),
        Widget::Quote { text } => view! { <blockquote>{text}</blockquote> }.into_any(),
        Widget::Label { text } => view! { <label>{text}</label> }.into_any(),
        Widget::Checkbox { checked, text } => view! {
            <input type="checkbox" checked=checked disabled=!enabled />
            <span>{text}</span>
        }
        .into_any(),
        Widget::Radio { text } => view! {
            <label class="radio-option">
                <input type="radio" checked=true disabled=!enabled />
                <span>{text}</span>
            </label>
        }
        .into_any(),
        Widget::Slider { value } => view! {
            <input type="range" min="0" max="100" step="1" value=format_number(value) disabled=!enabled />
        }
        .into_any(),
        Widget::Image => view! { <span class="placeholder-label">"Image"</span> }.into_any(),
        Widget::Link { text, href } => view! { <a href=href>{text}</a> }.into_any(),
        Widget::DatePicker => view! {
            <div class="calendar">
                <div class="calendar-header">"Calendar"</div>
                <div class="calendar-grid"></div>
            </div>
        }
        .into_any(),
        Widget::ListView => view! {
            <ul class="list-placeholder">
                {(1..=3).map(|i| view! { <li>{format!("Item {i}")}</li> }).collect_view()}
            </ul>
        }
        .into_any(),
        Widget::Password { text } => {
            view! { <input type="password" placeholder=text disabled=!enabled /> }.into_any()
        }
        Widget::WebView => view! { <span class="placeholder-label">"Web View"</span> }.into_any(),
        Widget::Timer => view! { <div class="timer">"00:00"</div> }.into_any(),
        Widget::Unknown { tag } => {
            view! { <span>{format!("Unsupported component type: {tag}")}</span> }.into_any()
        }
    }
}

/// Format a pixel quantity without a trailing `.0` for whole numbers.
#[must_use]
pub fn px(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}px")
    } else {
        format!("{value}px")
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 { format!("{value:.0}") } else { value.to_string() }
}

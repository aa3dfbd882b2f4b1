//! Light/dark theme switch.

use leptos::prelude::*;
use leptos_icons::Icon;
use pitchside_core::Theme;

stylance::import_crate_style!(css, "src/components/theme_toggle/theme_toggle.module.css");

/// Button flipping between light and dark.
///
/// Shows the icon of the theme a click switches to.
#[component]
pub fn ThemeToggle(#[prop(into)] theme: Signal<Theme>, on_toggle: Callback<Theme>) -> impl IntoView {
    let icon = Signal::derive(move || match theme.get() {
        Theme::Light => icondata::LuMoon,
        Theme::Dark => icondata::LuSun,
    });
    let title = Signal::derive(move || match theme.get() {
        Theme::Light => "Switch to dark theme",
        Theme::Dark => "Switch to light theme",
    });

    view! {
        <button
            class=css::toggle
            title=title
            aria-label=title
            on:click=move |_| on_toggle.run(theme.get_untracked().toggled())
        >
            <Icon icon=icon />
        </button>
    }
}

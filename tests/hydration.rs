//! Browser tests for the hydration and theme passes.
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use pitchside::utils::dom::document;
use pitchside::{ThemeSyncObserver, hydrate, normalize_embeds, sync_images};
use pitchside_core::config::{FALLBACK_LOGO, image_attrs, messages};
use pitchside_core::{Theme, render_content};
use serde_json::json;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Element, Event};

wasm_bindgen_test_configure!(run_in_browser);

const TEAM_LIGHT: &str = "https://media.api-sports.io/football/teams/33.png";
const TEAM_DARK: &str = "https://media.api-sports.io/football/teams/dark/33.png";

fn container(html: &str) -> Element {
    let document = document().expect("document");
    let div = document.create_element("div").expect("create div");
    div.set_inner_html(html);
    document
        .body()
        .expect("body")
        .append_child(&div)
        .expect("append container");
    div
}

fn first(root: &Element, selector: &str) -> Element {
    root.query_selector(selector)
        .expect("valid selector")
        .expect("element present")
}

#[wasm_bindgen_test]
fn test_second_pass_is_noop() {
    let html = render_content(&json!({
        "type": "doc",
        "content": [
            {"type": "paragraph", "content": [{"type": "text", "text": "recap"}]},
            {"type": "matchCard", "attrs": {
                "matchId": "5",
                "matchData": {"teams": {"home": {"id": 33, "name": "Man Utd"}}}
            }},
            {"type": "youtube", "attrs": {"src": "https://youtu.be/dQw4w9WgXcQ"}},
            {"type": "matchCard", "attrs": {"matchId": "6"}}
        ]
    }));
    let root = container(&html);

    let first_pass = hydrate(&root, Theme::Light, false);
    assert_eq!(first_pass.materialized, 1);
    assert_eq!(first_pass.failed, 1);
    assert_eq!(first_pass.wrapped, 1);
    let after_first = root.inner_html();

    let second_pass = hydrate(&root, Theme::Light, false);
    assert!(second_pass.is_noop());
    assert_eq!(root.inner_html(), after_first);
}

#[wasm_bindgen_test]
fn test_placeholder_replaced_in_place() {
    let root = container(
        r#"<p>before</p><div data-type="match" data-match-id="9" data-payload="%7B%7D"></div><p>after</p>"#,
    );
    hydrate(&root, Theme::Light, false);

    let card = first(&root, r#"[data-type="match"]"#);
    assert_eq!(card.tag_name(), "A");
    assert_eq!(card.get_attribute("data-hydrated").as_deref(), Some("true"));
    let previous = card.previous_element_sibling().expect("previous sibling");
    let next = card.next_element_sibling().expect("next sibling");
    assert_eq!(previous.text_content().as_deref(), Some("before"));
    assert_eq!(next.text_content().as_deref(), Some("after"));
}

#[wasm_bindgen_test]
fn test_missing_payload_shows_local_placeholder() {
    let root = container(r#"<div data-type="match" data-match-id="7"></div><p>ok</p>"#);
    let report = hydrate(&root, Theme::Light, false);

    assert_eq!(report.failed, 1);
    let text = root.text_content().unwrap_or_default();
    assert!(text.contains(messages::DATA_UNAVAILABLE));
    assert!(text.contains("ok"));
}

#[wasm_bindgen_test]
fn test_editable_cards_are_inert() {
    let root = container(r#"<div data-type="match" data-match-id="3" data-payload="%7B%7D"></div>"#);
    hydrate(&root, Theme::Light, true);

    let card = first(&root, r#"[data-type="match"]"#);
    assert_eq!(card.tag_name(), "DIV");
    assert_eq!(card.get_attribute("contenteditable").as_deref(), Some("false"));
}

#[wasm_bindgen_test]
fn test_iframe_wrapped_once() {
    let root = container(r#"<iframe src="https://www.youtube-nocookie.com/embed/abc"></iframe>"#);

    assert_eq!(normalize_embeds(&root), 1);
    assert_eq!(normalize_embeds(&root), 0);

    let iframe = first(&root, "iframe");
    assert_eq!(iframe.get_attribute("loading").as_deref(), Some("lazy"));
    assert!(iframe.has_attribute("allowfullscreen"));
    assert_eq!(root.query_selector_all(".pc-embed-responsive").unwrap().length(), 1);
}

#[wasm_bindgen_test]
fn test_video_gets_playback_attributes() {
    let root = container(r#"<video src="https://cdn.example/clip.mp4" preload="auto"></video>"#);
    normalize_embeds(&root);

    let video = first(&root, "video");
    assert!(video.has_attribute("controls"));
    assert!(video.has_attribute("playsinline"));
    assert_eq!(video.get_attribute("preload").as_deref(), Some("auto"));
}

#[wasm_bindgen_test]
fn test_theme_swap_caches_variants() {
    let root = container(&format!(r#"<img src="{TEAM_LIGHT}">"#));
    let image = first(&root, "img");

    assert_eq!(sync_images(&root, Theme::Dark), 1);
    assert_eq!(image.get_attribute(image_attrs::LIGHT).as_deref(), Some(TEAM_LIGHT));
    assert_eq!(image.get_attribute(image_attrs::DARK).as_deref(), Some(TEAM_DARK));
    assert_eq!(image.get_attribute("src").as_deref(), Some(TEAM_DARK));

    assert_eq!(sync_images(&root, Theme::Light), 1);
    assert_eq!(image.get_attribute("src").as_deref(), Some(TEAM_LIGHT));
    assert_eq!(sync_images(&root, Theme::Light), 0);
}

#[wasm_bindgen_test]
fn test_unrecognized_image_untouched() {
    let root = container(r#"<img class="pc-logo" src="https://cdn.example/crest.png">"#);
    assert_eq!(sync_images(&root, Theme::Dark), 0);

    let image = first(&root, "img");
    assert_eq!(image.get_attribute("src").as_deref(), Some("https://cdn.example/crest.png"));
    assert!(!image.has_attribute(image_attrs::LIGHT));
}

#[wasm_bindgen_test]
fn test_observer_set_theme_and_fallback() {
    let root = container(&format!(
        r#"<img class="pc-logo" src="{TEAM_LIGHT}" {}="{FALLBACK_LOGO}">"#,
        image_attrs::FALLBACK
    ));
    let observer = ThemeSyncObserver::attach(root.clone(), Theme::Light).expect("attach");
    let image = first(&root, "img");

    assert_eq!(observer.set_theme(Theme::Dark), 1);
    assert_eq!(image.get_attribute("src").as_deref(), Some(TEAM_DARK));

    let error = Event::new("error").expect("event");
    image.dispatch_event(&error).expect("dispatch");
    assert_eq!(image.get_attribute("src").as_deref(), Some(FALLBACK_LOGO));
    assert!(image.has_attribute(image_attrs::FAILED));

    // Failed logos keep their fallback across theme changes.
    assert_eq!(observer.set_theme(Theme::Light), 0);
    assert_eq!(image.get_attribute("src").as_deref(), Some(FALLBACK_LOGO));

    drop(observer);
    image.remove_attribute(image_attrs::FAILED).expect("remove marker");
    image.set_attribute("src", TEAM_LIGHT).expect("reset src");
    image.dispatch_event(&Event::new("error").expect("event")).expect("dispatch");
    assert_eq!(image.get_attribute("src").as_deref(), Some(TEAM_LIGHT));
}

/// Let queued microtasks (mutation observer deliveries) run.
async fn settle() {
    for _ in 0..2 {
        JsFuture::from(js_sys::Promise::resolve(&JsValue::UNDEFINED))
            .await
            .expect("resolved promise");
    }
}

fn append_logo(root: &Element, src: &str) -> Element {
    let image = document()
        .expect("document")
        .create_element("img")
        .expect("create img");
    image.set_attribute("src", src).expect("set src");
    root.append_child(&image).expect("append img");
    image
}

#[wasm_bindgen_test]
async fn test_observer_syncs_inserted_logos_until_dropped() {
    let root = container("<p>before widgets</p>");
    let observer = ThemeSyncObserver::attach(root.clone(), Theme::Dark).expect("attach");

    let inserted = append_logo(&root, TEAM_LIGHT);
    settle().await;
    assert_eq!(inserted.get_attribute("src").as_deref(), Some(TEAM_DARK));
    assert_eq!(inserted.get_attribute(image_attrs::LIGHT).as_deref(), Some(TEAM_LIGHT));
    assert_eq!(inserted.get_attribute(image_attrs::DARK).as_deref(), Some(TEAM_DARK));

    drop(observer);
    let late = append_logo(&root, TEAM_LIGHT);
    settle().await;
    assert_eq!(late.get_attribute("src").as_deref(), Some(TEAM_LIGHT));
    assert!(!late.has_attribute(image_attrs::LIGHT));
    assert!(!late.has_attribute(image_attrs::DARK));
}

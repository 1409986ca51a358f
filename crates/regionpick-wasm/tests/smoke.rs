#![cfg(target_arch = "wasm32")]

use regionpick_core::i18n::{FnLocalizer, Localizer};
use regionpick_core::options::SelectableOptions;
use regionpick_core::{Country, CountryDataset, RegionPicker};
use regionpick_wasm::{
    cache_name, embedded_manifest, infer_default_country, DomSelect, JsLocalizer, LanguageSource,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn embedded_manifest_is_valid() {
    let manifest = embedded_manifest().unwrap();
    assert!(!manifest.assets.is_empty());
    assert_eq!(cache_name().unwrap(), manifest.cache_name);
}

#[wasm_bindgen_test]
fn infers_default_country() {
    assert_eq!(infer_default_country("hu-HU"), "HU");
    assert_eq!(infer_default_country("fr"), "SK");
}

fn add_select(id: &str) {
    let document = web_sys::window().unwrap().document().unwrap();
    if document.get_element_by_id(id).is_some() {
        return;
    }
    let select = document
        .create_element("select")
        .unwrap()
        .dyn_into::<web_sys::HtmlSelectElement>()
        .unwrap();
    select.set_id(id);
    document.body().unwrap().append_child(&select).unwrap();
}

#[wasm_bindgen_test]
fn dom_picker_renders_sorted_regions() {
    add_select("smoke-country");
    add_select("smoke-region");

    let dataset = CountryDataset::from_countries(vec![
        Country::new("SK", "sk")
            .with_region("r1", "k1")
            .with_region("r2", "k2"),
        Country::new("CZ", "cz"),
    ])
    .unwrap();
    let localizer = FnLocalizer::new("sk", |key: &str| match key {
        "k1" => "Zemplín".to_string(),
        "k2" => "Abov".to_string(),
        other => other.to_string(),
    });

    let mut picker = RegionPicker::with_dataset(
        DomSelect::new("smoke-country"),
        DomSelect::new("smoke-region"),
        localizer,
        dataset,
    );

    assert_eq!(picker.selected_country().as_deref(), Some("SK"));
    let region = DomSelect::new("smoke-region");
    assert!(region.is_attached());
    assert_eq!(region.selected().as_deref(), Some(""));

    let names: Vec<_> = picker
        .region_entries("SK")
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(names, ["r2", "r1"]);

    assert!(picker.select_country("CZ"));
    assert_eq!(picker.selected_region(), None);
}

#[wasm_bindgen_test]
fn missing_control_is_detached() {
    let select = DomSelect::new("does-not-exist");
    assert!(!select.is_attached());
    assert_eq!(select.selected(), None);
}

fn select_element(id: &str) -> web_sys::HtmlSelectElement {
    web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .get_element_by_id(id)
        .unwrap()
        .dyn_into()
        .unwrap()
}

fn fire_change(id: &str) {
    let init = web_sys::EventInit::new();
    init.set_bubbles(true);
    let event = web_sys::Event::new_with_event_init_dict("change", &init).unwrap();
    select_element(id).dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn change_on_late_country_control_recomputes_regions() {
    let dataset = CountryDataset::from_countries(vec![
        Country::new("SK", "sk")
            .with_region("r1", "k1")
            .with_region("r2", "k2"),
        Country::new("CZ", "cz"),
    ])
    .unwrap();

    // Attached before the form exists
    let picker = RegionPicker::new(
        DomSelect::new("late-country"),
        DomSelect::new("late-region"),
        FnLocalizer::new("sk", |key: &str| key.to_string()),
    )
    .attach();

    add_select("late-country");
    add_select("late-region");
    picker.borrow_mut().install_dataset(dataset);
    assert_eq!(select_element("late-region").length(), 3);

    select_element("late-country").set_value("CZ");
    fire_change("late-country");
    assert_eq!(select_element("late-region").length(), 1);

    select_element("late-country").set_value("SK");
    fire_change("late-country");
    assert_eq!(select_element("late-region").length(), 3);
}

#[wasm_bindgen_test]
fn language_getter_is_read_on_demand() {
    let global = js_sys::global();
    js_sys::Reflect::set(&global, &"smokeLang".into(), &"sk".into()).unwrap();

    let getter = js_sys::Function::new_no_args("return globalThis.smokeLang;");
    let translate = js_sys::Function::new_with_args("key", "return key;");
    let localizer = JsLocalizer::new(translate, LanguageSource::from_js(getter.into()));
    assert_eq!(localizer.current_language(), "sk");

    js_sys::Reflect::set(&global, &"smokeLang".into(), &"cs-CZ".into()).unwrap();
    assert_eq!(localizer.current_language(), "cs-CZ");

    let fixed = LanguageSource::from_js("de".into());
    assert!(matches!(fixed, LanguageSource::Fixed(ref tag) if tag == "de"));
}

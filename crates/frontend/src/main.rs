mod api;
mod components;
mod coords;
mod pages;
mod shortcuts;

use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
    #[route("/event/:id")]
    EventView { id: String },
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::home::Home {}
    }
}

#[component]
fn EventView(id: String) -> Element {
    rsx! {
        pages::floor_plan::FloorPlanPage { key: "{id}", event_id: id.clone() }
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    launch(App);
}

use dioxus::prelude::*;

use store::AdminConfig;
use ui::AuthProvider;
use views::{Admin, Login, NotFound};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[redirect("/", || Route::Login {})]
    #[redirect("/dashboard", || Route::Login {})]
    #[route("/dashboard/login")]
    Login {},
    #[route("/dashboard/admin")]
    Admin {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Bundled at build time; `PORTFOLIO_API_URL` overrides the backend address.
const CONFIG_TOML: &str = include_str!("../portfolio-admin.toml");

fn load_config() -> AdminConfig {
    let config = AdminConfig::from_toml(CONFIG_TOML).unwrap_or_else(|e| {
        tracing::error!("Invalid {}: {e}, using defaults", AdminConfig::filename());
        AdminConfig::default()
    });
    match option_env!("PORTFOLIO_API_URL") {
        Some(url) if !url.is_empty() => config.with_base_url(url),
        _ => config,
    }
}

fn main() {
    dioxus::logger::init(dioxus::logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);
    tracing::debug!("Backend at {}", config.api.base_url);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider { config,
            Router::<Route> {}
        }
    }
}

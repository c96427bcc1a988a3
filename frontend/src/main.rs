mod components;
mod pages;
mod router;
mod services;

use shared::api::ShellConfig;
use yew::prelude::*;
use yew_router::BrowserRouter;

use crate::components::outlet::{GuardHandle, RouteOutlet};
use crate::services::api::ApiService;

#[derive(Clone, PartialEq)]
enum AppState {
    Loading,
    Ready(GuardHandle),
    Failed(String),
}

/// Build the guard, falling back to the default login path if the
/// configured one is not a public route.
fn build_guard(config: &ShellConfig) -> Result<GuardHandle, String> {
    GuardHandle::from_config(config).or_else(|e| {
        tracing::error!("Invalid shell config: {}", e);
        let fallback = ShellConfig {
            login_path: ShellConfig::default().login_path,
            ..config.clone()
        };
        GuardHandle::from_config(&fallback).map_err(|e| e.to_string())
    })
}

#[function_component(App)]
fn app() -> Html {
    let app_state = use_state(|| AppState::Loading);

    {
        let app_state = app_state.clone();

        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let config = match ApiService::get_shell_config().await {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::error!("Failed to fetch shell config: {:?}", e);
                        ShellConfig::default()
                    }
                };

                match build_guard(&config) {
                    Ok(guard) => app_state.set(AppState::Ready(guard)),
                    Err(e) => app_state.set(AppState::Failed(e)),
                }
            });
            || ()
        });
    }

    html! {
        <BrowserRouter>
            <div id="app">
                <components::header::Header />
                {match &*app_state {
                    AppState::Loading => html! {
                        <div class="loading">
                            <div class="spinner"></div>
                        </div>
                    },
                    AppState::Ready(guard) => html! { <RouteOutlet guard={guard.clone()} /> },
                    AppState::Failed(message) => html! {
                        <div class="container">
                            <div class="error">{ message.clone() }</div>
                        </div>
                    },
                }}
            </div>
        </BrowserRouter>
    }
}

fn main() {
    // Initialize tracing
    tracing_wasm::set_as_global_default();

    yew::Renderer::<App>::new().render();
}

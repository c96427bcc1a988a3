//! Guard-driven replacement for `Switch`.
//!
//! Every location change runs the navigation guard first. Nothing but a
//! spinner is rendered until the guard has answered, and answers for
//! navigations that have since been replaced are dropped.

use std::rc::Rc;

use shared::api::ShellConfig;
use shared::{
    Decision, GuardError, NavigationGuard, NavigationRequest, RedirectReason, RouteError,
    RouteTable, View,
};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::notice::Notice;
use crate::router::{render_view, Route};
use crate::services::session::{GlooTimer, SupabaseSessionProvider};

pub type AppGuard = NavigationGuard<SupabaseSessionProvider, GlooTimer>;

#[derive(Clone)]
pub struct GuardHandle(pub Rc<AppGuard>);

impl GuardHandle {
    pub fn from_config(config: &ShellConfig) -> Result<Self, RouteError> {
        let table = Rc::new(RouteTable::standard(config.root_route));
        let provider = SupabaseSessionProvider::from_config(config);
        tracing::debug!("Reading sessions from localStorage key {}", provider.storage_key());
        let guard = NavigationGuard::new(table, provider, GlooTimer, config.guard_config())?;
        Ok(Self(Rc::new(guard)))
    }
}

impl PartialEq for GuardHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Properties, PartialEq)]
pub struct RouteOutletProps {
    pub guard: GuardHandle,
}

#[derive(Clone, PartialEq)]
enum OutletState {
    Pending,
    Ready(Option<View>),
    Failed(String),
}

#[function_component(RouteOutlet)]
pub fn route_outlet(props: &RouteOutletProps) -> Html {
    let location = use_location();
    let navigator = use_navigator();
    let state = use_state(|| OutletState::Pending);
    let notice = use_state(|| None::<String>);
    let previous = use_mut_ref(|| NavigationRequest::new("/"));

    let path = location
        .map(|l| l.path().to_string())
        .unwrap_or_else(|| "/".to_string());

    {
        let guard = props.guard.clone();
        let state = state.clone();
        let notice = notice.clone();
        let previous = previous.clone();

        use_effect_with(path, move |path| {
            let to = NavigationRequest::new(path.clone());
            state.set(OutletState::Pending);

            wasm_bindgen_futures::spawn_local(async move {
                let from = previous.borrow().clone();
                let guard = guard.0;

                match guard.check(&to, &from).await {
                    Ok(Decision::Proceed { path }) => {
                        let view = guard.table().resolve(&path).and_then(|e| e.view());
                        *previous.borrow_mut() = to;
                        state.set(OutletState::Ready(view));
                    }
                    Ok(Decision::NotFound { path }) => {
                        tracing::debug!("No route for {}", path);
                        *previous.borrow_mut() = to;
                        state.set(OutletState::Ready(None));
                    }
                    Ok(Decision::Redirect { path, reason }) => {
                        if reason == RedirectReason::SessionUnavailable {
                            notice.set(Some(
                                "We couldn't confirm your session. Please sign in again."
                                    .to_string(),
                            ));
                        }
                        match navigator {
                            Some(navigator) => navigator.replace(&Route::from_path(&path)),
                            None => {
                                tracing::error!("Redirect to {} outside of a router", path);
                                state.set(OutletState::Failed(format!(
                                    "Unable to redirect to {}",
                                    path
                                )));
                            }
                        }
                    }
                    // a newer navigation owns the outlet now
                    Err(GuardError::Superseded) => {}
                    Err(e) => {
                        tracing::error!("Navigation to {} failed: {:?}", to.target_path, e);
                        state.set(OutletState::Failed(e.to_string()));
                    }
                }
            });
            || ()
        });
    }

    let on_dismiss = {
        let notice = notice.clone();
        Callback::from(move |_| notice.set(None))
    };

    html! {
        <main>
            if let Some(message) = (*notice).clone() {
                <Notice message={message} on_dismiss={on_dismiss} />
            }
            {match &*state {
                OutletState::Pending => html! {
                    <div class="loading">
                        <div class="spinner"></div>
                    </div>
                },
                OutletState::Ready(view) => render_view(*view),
                OutletState::Failed(message) => html! {
                    <div class="container">
                        <div class="error">{ message.clone() }</div>
                    </div>
                },
            }}
        </main>
    }
}

use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

/// Where the "Back to start" button leads; the guard decides what `/` shows.
const START: Route = Route::Root;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="container">
            <div class="empty-state">
                <h2>{ "Nothing lives at this address" }</h2>
                <p>{ "Check the link, or start again from the portal's front page." }</p>
                <Link<Route> to={START}>
                    <button class="btn btn-primary">{ "Back to start" }</button>
                </Link<Route>>
            </div>
        </div>
    }
}

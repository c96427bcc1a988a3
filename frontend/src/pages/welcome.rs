use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(Welcome)]
pub fn welcome() -> Html {
    html! {
        <div class="container">
            <h2>{ "Welcome" }</h2>
            <p>{ "Create an account or sign in to continue." }</p>
            <Link<Route> to={Route::SignUp}>
                <button class="btn btn-primary">{ "Sign up" }</button>
            </Link<Route>>
            <Link<Route> to={Route::Login}>
                <button class="btn">{ "Log in" }</button>
            </Link<Route>>
        </div>
    }
}

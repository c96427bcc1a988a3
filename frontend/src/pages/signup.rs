use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(SignUp)]
pub fn sign_up() -> Html {
    html! {
        <div class="container">
            <h2>{ "Sign up" }</h2>
            <div id="auth-signup" class="auth-widget"></div>
            <p>
                { "Already have an account? " }
                <Link<Route> to={Route::Login}>{ "Log in" }</Link<Route>>
            </p>
        </div>
    }
}

use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(Login)]
pub fn login() -> Html {
    html! {
        <div class="container">
            <h2>{ "Log in" }</h2>
            <div id="auth-login" class="auth-widget"></div>
            <p>
                <Link<Route> to={Route::ForgotPassword}>{ "Forgot your password?" }</Link<Route>>
                { " | " }
                <Link<Route> to={Route::SignUp}>{ "Create an account" }</Link<Route>>
            </p>
        </div>
    }
}

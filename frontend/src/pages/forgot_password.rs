use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(ForgotPassword)]
pub fn forgot_password() -> Html {
    html! {
        <div class="container">
            <h2>{ "Reset your password" }</h2>
            <div id="auth-reset" class="auth-widget"></div>
            <Link<Route> to={Route::Login}>{ "Back to log in" }</Link<Route>>
        </div>
    }
}

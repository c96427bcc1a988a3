use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{ "Portal" }</h1>
                <nav>
                    <Link<Route> to={Route::Root}>{ "Welcome" }</Link<Route>>
                    { " | " }
                    <Link<Route> to={Route::Home}>{ "Home" }</Link<Route>>
                    { " | " }
                    <Link<Route> to={Route::Login}>{ "Log in" }</Link<Route>>
                    { " | " }
                    <Link<Route> to={Route::SignUp}>{ "Sign up" }</Link<Route>>
                </nav>
            </div>
        </header>
    }
}

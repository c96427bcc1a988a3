use shared::View;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{
    forgot_password::ForgotPassword, home::Home, login::Login, not_found::NotFound,
    signup::SignUp, welcome::Welcome,
};

/// Typed paths for links and redirects. Which view a path renders, and
/// whether it needs a session, is decided by the guard's route table.
#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Root,
    #[at("/signup")]
    SignUp,
    #[at("/login")]
    Login,
    #[at("/forgot-password")]
    ForgotPassword,
    #[at("/home")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Route for a path the guard resolved to.
    pub fn from_path(path: &str) -> Self {
        Self::recognize(path).unwrap_or(Self::NotFound)
    }
}

pub fn render_view(view: Option<View>) -> Html {
    match view {
        Some(View::SignUp) => html! { <SignUp /> },
        Some(View::Login) => html! { <Login /> },
        Some(View::ForgotPassword) => html! { <ForgotPassword /> },
        Some(View::Home) => html! { <Home /> },
        Some(View::Welcome) => html! { <Welcome /> },
        None => html! { <NotFound /> },
    }
}

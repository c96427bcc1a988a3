use yew::prelude::*;

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <div class="container">
            <h2>{ "Home" }</h2>
            <p>{ "You are signed in." }</p>
        </div>
    }
}

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct NoticeProps {
    pub message: String,
    pub on_dismiss: Callback<MouseEvent>,
}

/// Dismissable, non-blocking banner.
#[function_component(Notice)]
pub fn notice(props: &NoticeProps) -> Html {
    html! {
        <div class="notice" role="status">
            <span>{ props.message.clone() }</span>
            <button class="btn btn-link" onclick={props.on_dismiss.clone()}>{ "Dismiss" }</button>
        </div>
    }
}

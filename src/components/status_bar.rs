use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusBarProps {
    pub message: String,
}

#[function_component(StatusBar)]
pub fn status_bar(props: &StatusBarProps) -> Html {
    html! {
        <div style="font-size:18px; font-weight:600; min-height:24px;">{ props.message.clone() }</div>
    }
}

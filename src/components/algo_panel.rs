use yew::prelude::*;

use crate::model::Algorithm;

#[derive(Properties, PartialEq, Clone)]
pub struct AlgoPanelProps {
    pub active: Algorithm,
    pub on_select: Callback<Algorithm>,
    pub on_reset: Callback<()>,
}

#[function_component(AlgoPanel)]
pub fn algo_panel(props: &AlgoPanelProps) -> Html {
    let algo_button = |algorithm: Algorithm| {
        let cb = props.on_select.clone();
        let active = props.active == algorithm;
        let onclick = Callback::from(move |_| cb.emit(algorithm));
        let style = if active {
            "flex:1; padding:6px 10px; background:#1f6feb; border:1px solid #1f6feb; border-radius:6px; color:#ffffff; cursor:pointer;"
        } else {
            "flex:1; padding:6px 10px; background:#21262d; border:1px solid #30363d; border-radius:6px; color:#c9d1d9; cursor:pointer;"
        };
        html! { <button onclick={onclick} style={style}>{ algorithm.label() }</button> }
    };
    let reset = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style="display:flex; flex-direction:column; gap:8px;">
            <div style="display:flex; gap:8px;">
                { algo_button(Algorithm::MinMax) }
                { algo_button(Algorithm::AlphaBeta) }
            </div>
            <button onclick={reset} style="padding:6px 10px; background:#21262d; border:1px solid #30363d; border-radius:6px; color:#c9d1d9; cursor:pointer;">{"New Game"}</button>
        </div>
    }
}

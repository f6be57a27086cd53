use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub nodes_explored: Option<u64>,
    pub max_depth: Option<u32>,
    pub algorithm: &'static str,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;";
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let nodes = props
        .nodes_explored
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());
    let depth = props
        .max_depth
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    html! {
        <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; display:flex; flex-direction:column; gap:10px; font-size:14px;">
            <div style={row_style}>
                <span style={label_style}>{"Nodes explored"}</span>
                <span style={value_style}>{ nodes }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Tree depth"}</span>
                <span style={value_style}>{ depth }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Algorithm"}</span>
                <span style={value_style}>{ props.algorithm }</span>
            </div>
        </div>
    }
}

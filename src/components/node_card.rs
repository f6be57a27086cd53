use yew::prelude::*;

use crate::model::{Board, Mark, ScoreTone, TreeNode, format_score};

#[derive(Properties, PartialEq, Clone)]
pub struct NodeCardProps {
    pub node: TreeNode,
    /// Registered into the tree view's element map so connectors can read
    /// this card's live bounding box.
    pub node_ref: NodeRef,
}

fn mark_color(mark: Mark) -> &'static str {
    match mark {
        Mark::X => "#58a6ff",
        Mark::O => "#f0883e",
        Mark::Empty => "transparent",
    }
}

fn mini_board(board: &Board) -> Html {
    html! {
        <div class="mini-board" style="display:grid; grid-template-columns:repeat(3, 18px); grid-template-rows:repeat(3, 18px); gap:2px;">
            { for board.iter().enumerate().map(|(i, mark)| html! {
                <div key={i.to_string()}
                    style={format!("display:flex; align-items:center; justify-content:center; background:#0e1116; border:1px solid #30363d; border-radius:2px; font-size:11px; font-weight:700; color:{};", mark_color(*mark))}>
                    { mark.as_str() }
                </div>
            }) }
        </div>
    }
}

#[function_component(NodeCard)]
pub fn node_card(props: &NodeCardProps) -> Html {
    let node = &props.node;
    let next = node.next_player();
    let tone = ScoreTone::for_score(node.score);
    let tone_color = match tone {
        ScoreTone::Positive => "#2ea043",
        ScoreTone::Negative => "#f85149",
        ScoreTone::Neutral => "#8b949e",
    };
    let card_style = if node.is_pruned {
        "display:flex; flex-direction:column; align-items:center; gap:4px; background:#161b22; border:1px dashed #6e7681; border-radius:8px; padding:8px; opacity:0.55;"
    } else {
        "display:flex; flex-direction:column; align-items:center; gap:4px; background:#161b22; border:1px solid #30363d; border-radius:8px; padding:8px;"
    };
    html! {
        <div ref={props.node_ref.clone()} style={card_style}>
            <div style={format!("font-size:11px; font-weight:600; color:{};", mark_color(next))}>
                { format!("{}'s turn", next.as_str()) }
            </div>
            { mini_board(&node.board) }
            <div class={tone.css_class()} style={format!("font-size:12px; font-weight:700; color:{tone_color};")}>
                { format_score(node.score) }
            </div>
            { if node.is_pruned {
                html! { <div style="font-size:10px; text-transform:uppercase; letter-spacing:0.5px; color:#f0883e;">{"Pruned"}</div> }
            } else {
                html! {}
            } }
        </div>
    }
}

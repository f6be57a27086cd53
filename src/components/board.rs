use yew::prelude::*;

use crate::model::{Board, Mark};

#[derive(Properties, PartialEq, Clone)]
pub struct GameBoardProps {
    pub board: Board,
    pub on_cell_click: Callback<usize>,
}

#[function_component(GameBoard)]
pub fn game_board(props: &GameBoardProps) -> Html {
    html! {
        <div class="board" style="display:grid; grid-template-columns:repeat(3, 72px); grid-template-rows:repeat(3, 72px); gap:6px;">
            { for props.board.iter().enumerate().map(|(i, mark)| {
                let mark = *mark;
                let onclick = {
                    let cb = props.on_cell_click.clone();
                    // Occupied cells never submit a move
                    Callback::from(move |_: MouseEvent| {
                        if mark == Mark::Empty {
                            cb.emit(i);
                        }
                    })
                };
                let color = match mark {
                    Mark::X => "#58a6ff",
                    Mark::O => "#f0883e",
                    Mark::Empty => "#c9d1d9",
                };
                let cursor = if mark == Mark::Empty { "pointer" } else { "default" };
                html! {
                    <div key={i.to_string()} onclick={onclick}
                        style={format!("display:flex; align-items:center; justify-content:center; background:#161b22; border:1px solid #30363d; border-radius:8px; font-size:32px; font-weight:700; color:{color}; cursor:{cursor}; user-select:none;")}>
                        { mark.as_str() }
                    </div>
                }
            }) }
        </div>
    }
}

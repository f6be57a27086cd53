use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::model::{Algorithm, GameState, Session, SessionAction, status_text};
use crate::util::cerror;

use super::{
    algo_panel::AlgoPanel, board::GameBoard, stats_panel::StatsPanel, status_bar::StatusBar,
    tree_view::TreeView,
};

const ALGORITHM_STORAGE_KEY: &str = "ttt_algorithm";

// Connector paths are tagged by the overlay renderer and styled here.
const CONNECTOR_CSS: &str = "
.connections-layer .connection-line { fill:none; stroke:#58a6ff; stroke-width:2; }
.connections-layer .connection-line.pruned { stroke:#6e7681; stroke-dasharray:6 4; }
";

fn load_algorithm() -> Algorithm {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(Some(raw)) = store.get_item(ALGORITHM_STORAGE_KEY) {
                if let Some(algorithm) = Algorithm::from_wire(&raw) {
                    return algorithm;
                }
            }
        }
    }
    Algorithm::MinMax
}

/// Apply a fresh game state, then fetch and apply the matching tree snapshot.
/// The board update always lands before the tree request starts.
async fn apply_state_and_refresh_tree(
    session: UseReducerHandle<Session>,
    game: GameState,
    algorithm: Algorithm,
) {
    let board = game.board;
    session.dispatch(SessionAction::ApplyGame(game));
    match api::fetch_tree(&board, algorithm).await {
        Ok(tree) => session.dispatch(SessionAction::ApplyTree(tree)),
        Err(err) => cerror(&format!("tree fetch failed: {err}")),
    }
}

fn run_reset(session: UseReducerHandle<Session>, algorithm: Algorithm) {
    spawn_local(async move {
        match api::reset().await {
            Ok(game) => apply_state_and_refresh_tree(session, game, algorithm).await,
            Err(err) => cerror(&format!("reset failed: {err}")),
        }
    });
}

#[function_component(App)]
pub fn app() -> Html {
    let session = use_reducer(|| Session::new(load_algorithm()));

    // Initial round trip: fresh game + tree for the empty board
    {
        let session = session.clone();
        use_effect_with((), move |_| {
            let algorithm = session.algorithm;
            run_reset(session, algorithm);
            || ()
        });
    }

    // Persist the algorithm selection
    {
        let algorithm = session.algorithm;
        use_effect_with(algorithm, move |algorithm| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    let _ = store.set_item(ALGORITHM_STORAGE_KEY, algorithm.as_str());
                }
            }
            || ()
        });
    }

    let on_cell_click = {
        let session = session.clone();
        Callback::from(move |position: usize| {
            let session = session.clone();
            let algorithm = session.algorithm;
            spawn_local(async move {
                match api::make_move(position, algorithm).await {
                    Ok(game) => apply_state_and_refresh_tree(session, game, algorithm).await,
                    Err(err) => cerror(&format!("move failed: {err}")),
                }
            });
        })
    };

    let on_select_algorithm = {
        let session = session.clone();
        Callback::from(move |algorithm: Algorithm| {
            session.dispatch(SessionAction::SelectAlgorithm(algorithm));
            run_reset(session.clone(), algorithm);
        })
    };

    let on_reset = {
        let session = session.clone();
        Callback::from(move |_| {
            run_reset(session.clone(), session.algorithm);
        })
    };

    let status = status_text(&session.game);
    let nodes_explored = session
        .game
        .ai_stats
        .as_ref()
        .map(|s| s.nodes_explored)
        .or(session.tree.nodes_explored);
    let algorithm_label = session
        .game
        .ai_stats
        .as_ref()
        .and_then(|s| Algorithm::from_wire(&s.algorithm))
        .unwrap_or(session.algorithm)
        .label();

    html! {
        <div id="root" style="display:flex; gap:16px; padding:16px; height:100vh; box-sizing:border-box; background:#0d1117; color:#c9d1d9; font-family:sans-serif;">
            <style>{ CONNECTOR_CSS }</style>
            <div style="display:flex; flex-direction:column; gap:12px; min-width:260px;">
                <h2 style="margin:0;">{"Minimax Explorer"}</h2>
                <StatusBar message={status} />
                <GameBoard board={session.game.board} on_cell_click={on_cell_click} />
                <AlgoPanel active={session.algorithm} on_select={on_select_algorithm} on_reset={on_reset} />
                <StatsPanel
                    nodes_explored={nodes_explored}
                    max_depth={session.tree.max_depth}
                    algorithm={algorithm_label}
                />
            </div>
            <TreeView tree={session.tree.clone()} version={session.tree_version} />
        </div>
    }
}

//! Round trips against the game service. Each operation is a single POST with
//! a JSON body; failures are returned to the caller, which logs them and
//! leaves the last good state on screen. Nothing is retried.

use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::model::{Algorithm, Board, GameState, Tree};

#[derive(Serialize)]
struct MoveRequest {
    position: usize,
    algorithm: Algorithm,
}

#[derive(Serialize)]
struct TreeRequest<'a> {
    board: &'a Board,
    algorithm: Algorithm,
}

/// Submit the player's move; the service answers with the full game state
/// after its own reply move.
pub async fn make_move(position: usize, algorithm: Algorithm) -> Result<GameState, String> {
    let body = encode(&MoveRequest { position, algorithm })?;
    post_json("/make_move", Some(body)).await
}

/// Fetch a fresh search-tree snapshot for the given board.
pub async fn fetch_tree(board: &Board, algorithm: Algorithm) -> Result<Tree, String> {
    let body = encode(&TreeRequest { board, algorithm })?;
    post_json("/get_tree", Some(body)).await
}

/// Start a new game and return its initial state.
pub async fn reset() -> Result<GameState, String> {
    post_json("/reset", None).await
}

fn encode<T: Serialize>(payload: &T) -> Result<String, String> {
    serde_json::to_string(payload).map_err(|e| format!("request encode failed: {e}"))
}

async fn post_json<T: DeserializeOwned>(url: &str, body: Option<String>) -> Result<T, String> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }
    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| format!("{url}: failed to build request"))?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|_| format!("{url}: failed to set content type"))?;
    }

    let window = web_sys::window().ok_or_else(|| format!("{url}: no window"))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| format!("{url}: network error"))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| format!("{url}: unexpected response object"))?;
    if !response.ok() {
        return Err(format!("{url}: status {}", response.status()));
    }

    let body = JsFuture::from(
        response
            .text()
            .map_err(|_| format!("{url}: missing response body"))?,
    )
    .await
    .map_err(|_| format!("{url}: failed reading response body"))?;
    let body = body
        .as_string()
        .ok_or_else(|| format!("{url}: response body is not text"))?;
    serde_json::from_str(&body).map_err(|e| format!("{url}: bad payload: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mark;

    #[test]
    fn move_request_body_shape() {
        let body = encode(&MoveRequest {
            position: 4,
            algorithm: Algorithm::AlphaBeta,
        })
        .unwrap();
        assert_eq!(body, r#"{"position":4,"algorithm":"alphabeta"}"#);
    }

    #[test]
    fn tree_request_carries_the_board_as_cell_strings() {
        let mut board = [Mark::Empty; 9];
        board[4] = Mark::X;
        board[0] = Mark::O;
        let body = encode(&TreeRequest {
            board: &board,
            algorithm: Algorithm::MinMax,
        })
        .unwrap();
        assert_eq!(
            body,
            r#"{"board":["O","","","","X","","","",""],"algorithm":"minmax"}"#
        );
    }
}

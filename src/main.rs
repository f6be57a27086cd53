mod api;
mod components;
mod connectors;
mod layout;
mod model;
mod state;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}

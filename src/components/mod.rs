pub mod algo_panel;
pub mod app;
pub mod board;
pub mod camera_controls;
pub mod node_card;
pub mod stats_panel;
pub mod status_bar;
pub mod tree_view;

pub mod history_panel;
pub mod permission_item;

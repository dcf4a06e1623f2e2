mod api;
mod app;
mod bindings;
mod components;
mod view;

fn main() {
    app::start();
}

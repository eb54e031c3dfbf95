mod anim;
mod app;
mod assets;
mod camera;
mod config;
mod light;
mod overlay;
mod render;
mod scenario;

fn main() {
    env_logger::init();
    log::info!("Trolley Problem viewer starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

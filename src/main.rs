//! A terminal font browser built with Rust, skrifa and ratatui.

use glyphsheet::core;

fn main() {
    core::platform::init_panic_handling();
    let cli_args = core::platform::get_cli_args();
    if let Err(error) = core::run_app(cli_args) {
        core::platform::handle_error(error);
    }
}

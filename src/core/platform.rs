//! Process-level setup and error reporting.

/// Restore the terminal before a panic message is printed.
///
/// A panic inside the TUI would otherwise leave the terminal in raw mode on
/// the alternate screen, hiding the message.
pub fn init_panic_handling() {
    #[cfg(feature = "tui")]
    {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            crate::tui::restore_terminal();
            default_hook(info);
        }));
    }
}

/// Print `error` with its causes to stderr and exit with code 1.
pub fn handle_error(error: anyhow::Error) -> ! {
    eprintln!();
    eprintln!("Error running glyphsheet:");
    eprintln!("{error}");
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(1);
}

/// Parse the command line.
pub fn get_cli_args() -> crate::core::cli::CliArgs {
    use clap::Parser;
    crate::core::cli::CliArgs::parse()
}

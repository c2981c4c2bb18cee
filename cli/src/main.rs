//! Entry-point for the `dotnet-tool-wrapper` binary.
//!
//! The launcher owns no flags: every argument after argv[0] belongs to the
//! delegate program and is forwarded untouched, so the arguments are read
//! with `args_os` and never parsed.

fn main() {
    toolwrap_cli::init_logging();
    let args = std::env::args_os().skip(1).collect();
    let exit_code = toolwrap_cli::run_main(args);
    std::process::exit(exit_code);
}

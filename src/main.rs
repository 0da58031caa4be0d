//! create-dmg - builds a compressed macOS disk image from a folder.
//!
//! Exit code 0 guarantees the image exists at the requested path.

use kodegen_bundler_dmg::cli;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            let output = cli::OutputManager::new(false, false);
            let _ = output.error(&e.to_string());
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            e.exit_code()
        }
    };

    process::exit(exit_code);
}

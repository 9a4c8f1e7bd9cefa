//! # printcost
//!
//! Entry point of the command-line launcher. Everything besides the
//! runtime lives in the library so commands can be tested.

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    printcost_cli::run().await
}

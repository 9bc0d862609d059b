// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Loadscope CLI entry point.

use colored::Colorize;

fn main() {
    if let Err(e) = loadscope_cli::run() {
        let code = loadscope_cli::exit_code(&e);
        if code == loadscope_cli::EXIT_NO_DATA {
            eprintln!("{} {}", "No data:".yellow().bold(), e);
        } else {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
        }
        std::process::exit(code);
    }
}

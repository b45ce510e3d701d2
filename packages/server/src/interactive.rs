//! Interactive mode for the server.
//!
//! Prompts for the listen address, the fallback default city and, when no
//! provider credential is present, a Gemini API key before starting the
//! server.

use dialoguer::{Confirm, Input, Password};
use smarthood_profile_models::{DEFAULT_CITY, DEFAULT_STATE};

const CREDENTIAL_VARS: &[&str] = &[
    "GOOGLE_AI_API_KEY",
    "GEMINI_API_KEY",
    "OPENAI_API_KEY",
    "ANTHROPIC_API_KEY",
    "AI_BASE_URL",
];

/// Runs the server in interactive mode, prompting for configuration.
///
/// Answers are exported as the environment variables the server reads
/// (`BIND_ADDR`, `PORT`, `SMARTHOOD_DEFAULT_CITY`,
/// `SMARTHOOD_DEFAULT_STATE`, `GOOGLE_AI_API_KEY`) before delegating to
/// [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("SmartHood Server");
    println!();

    let bind_addr = prompt_text("Bind address", "BIND_ADDR", "127.0.0.1");

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(env_or("PORT", "8080").parse().unwrap_or(8080))
        .interact_text()
        .unwrap_or(8080);

    let city = prompt_text("Default city", "SMARTHOOD_DEFAULT_CITY", DEFAULT_CITY);
    let state = prompt_text("Default state", "SMARTHOOD_DEFAULT_STATE", DEFAULT_STATE);

    let api_key = if CREDENTIAL_VARS.iter().any(|v| std::env::var(v).is_ok()) {
        None
    } else {
        println!("No AI provider credentials found; requests will fail until one is set.");
        Password::new()
            .with_prompt("Gemini API key (leave empty to skip)")
            .allow_empty_password(true)
            .interact()
            .ok()
            .filter(|key| !key.trim().is_empty())
    };

    // SAFETY: We are single-threaded at this point (before server starts) and
    // these variables are only read once during server initialisation.
    unsafe {
        std::env::set_var("BIND_ADDR", &bind_addr);
        std::env::set_var("PORT", port.to_string());
        std::env::set_var("SMARTHOOD_DEFAULT_CITY", &city);
        std::env::set_var("SMARTHOOD_DEFAULT_STATE", &state);
        if let Some(key) = &api_key {
            std::env::set_var("GOOGLE_AI_API_KEY", key);
        }
    }

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server().await
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn prompt_text(prompt: &str, env_name: &str, default: &str) -> String {
    let default = env_or(env_name, default);
    Input::new()
        .with_prompt(prompt)
        .default(default.clone())
        .interact_text()
        .unwrap_or(default)
}

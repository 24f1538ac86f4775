use std::io::{self, Write};

use crate::config::{Config, DEFAULT_BASE_URL};
use crate::error::{GraphbookError, Result};
use crate::session::validate_email;

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

fn render_config(email: &str, first_name: &str, last_name: &str, base_url: &str) -> String {
    let mut content = format!("email = {}\n", toml_string(email));
    for (key, value) in [
        ("first_name", first_name),
        ("last_name", last_name),
        ("base_url", base_url),
    ] {
        if !value.is_empty() {
            content.push_str(&format!("{key} = {}\n", toml_string(value)));
        }
    }
    content
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;
        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Graphbook CLI Configuration");
    println!("===========================\n");

    let email = prompt("Enter your Graphbook email address: ")?;
    if email.is_empty() {
        return Err(GraphbookError::MissingEmail);
    }
    validate_email(&email)?;

    let first_name = prompt("First name [optional]: ")?;
    let last_name = prompt("Last name [optional]: ")?;
    let base_url = prompt(&format!("Backend URL [{DEFAULT_BASE_URL}]: "))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| GraphbookError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let content = render_config(&email, &first_name, &last_name, &base_url);
    std::fs::write(&config_path, content).map_err(|e| GraphbookError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now run 'graphbook home'!");

    Ok(())
}

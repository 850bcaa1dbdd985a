//! Agent card loading.
//!
//! The card is a static JSON document describing the agent, served from a
//! well-known route. Candidate file paths are checked in order; when none
//! exists a built-in card is used so the route always has something to serve.

use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// Try each candidate path in order and return the first parseable card.
pub fn load_card(paths: &[String]) -> Option<Value> {
    for path in paths {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(_) => {
                debug!(path, "No agent card at candidate path");
                continue;
            }
        };
        match serde_json::from_str::<Value>(&data) {
            Ok(card) => {
                info!(path, "Agent card loaded");
                return Some(card);
            }
            Err(e) => {
                warn!(path, error = %e, "Agent card file is not valid JSON; skipping");
            }
        }
    }
    None
}

/// Load the card from disk, or fall back to the built-in one.
pub fn load_or_default(paths: &[String]) -> Value {
    load_card(paths).unwrap_or_else(|| {
        info!("No agent card file found; using built-in card");
        default_card()
    })
}

/// The built-in agent card.
pub fn default_card() -> Value {
    json!({
        "name": "Jubilee",
        "description": "A birthday assistant that remembers birthdays, lists upcoming \
                        ones, and generates personalised birthday wishes.",
        "version": "0.1.0",
        "capabilities": ["remember_birthday", "list_birthdays", "upcoming_birthdays", "generate_wish"],
        "defaultInputModes": ["text"],
        "defaultOutputModes": ["text"]
    })
}

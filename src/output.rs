use serde::Serialize;
use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("RESTAURANT_REVIEWS_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_flag(json: bool) -> Self {
        if json { OutputMode::Json } else { OutputMode::Human }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

/// Build the JSON envelope printed for a successful command
pub fn success_envelope<T: Serialize>(command: &str, data: T) -> anyhow::Result<serde_json::Value> {
    Ok(serde_json::json!({
        "ok": true,
        "command": command,
        "data": serde_json::to_value(data)?,
    }))
}

/// Build the JSON envelope printed for a failed command
pub fn error_envelope(command: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "ok": false,
        "command": command,
        "error": message,
    })
}

pub fn emit_success<T: Serialize>(mode: OutputMode, command: &str, data: T) -> anyhow::Result<()> {
    if mode == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(&success_envelope(command, data)?)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let value = success_envelope("stats", serde_json::json!({"reviews": 2})).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["command"], "stats");
        assert_eq!(value["data"]["reviews"], 2);
    }

    #[test]
    fn test_error_envelope_shape() {
        let value = error_envelope("favorite", "Empty collection: no reviews to choose from");
        assert_eq!(value["ok"], false);
        assert_eq!(value["error"], "Empty collection: no reviews to choose from");
    }

    #[test]
    fn test_mode_from_flag() {
        assert!(OutputMode::from_flag(false).is_human());
        assert_eq!(OutputMode::from_flag(true), OutputMode::Json);
    }
}

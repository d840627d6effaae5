//! Interaction script parsing.
//!
//! One command per line:
//!
//! ```text
//! click k2-tab
//! click quote-table row=0 column=color
//! enter k2-batch-input value=Red type=fabric field=color
//! input location-input-box value="Bed 1"
//! state
//! quit
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. `value=` sets the
//! element value; every other `key=value` pair becomes a data attribute.

use anyhow::{anyhow, bail, Result};
use shade_engine::input::{Interaction, InteractionKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Interact(Interaction),
    /// Print the state snapshot.
    State,
    Quit,
}

/// Parses one line. `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let tokens = tokenize(line)?;
    let Some((verb, rest)) = tokens.split_first() else {
        return Ok(None);
    };

    let kind = match verb.as_str() {
        "state" => return Ok(Some(ScriptCommand::State)),
        "quit" | "exit" => return Ok(Some(ScriptCommand::Quit)),
        "click" => InteractionKind::Click,
        "enter" => InteractionKind::KeyEnter,
        "blur" => InteractionKind::Blur,
        "input" => InteractionKind::Input,
        other => bail!("unknown command '{}'", other),
    };

    let (target, attributes) = rest
        .split_first()
        .ok_or_else(|| anyhow!("'{}' needs an element id", verb))?;

    let mut interaction = match kind {
        InteractionKind::Click => Interaction::click(target.as_str()),
        InteractionKind::KeyEnter => Interaction::enter(target.as_str(), ""),
        InteractionKind::Blur => Interaction::blur(target.as_str(), ""),
        InteractionKind::Input => Interaction::input(target.as_str(), ""),
    };
    for attribute in attributes {
        let (key, value) = attribute
            .split_once('=')
            .ok_or_else(|| anyhow!("expected key=value, got '{}'", attribute))?;
        if key == "value" {
            interaction.value = value.to_string();
        } else {
            interaction = interaction.with_data(key, value);
        }
    }
    Ok(Some(ScriptCommand::Interact(interaction)))
}

/// Splits on whitespace, keeping double-quoted runs together.
fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if quoted {
        bail!("unterminated quote");
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_with_data() {
        let command = parse_line("click quote-table row=0 column=color").unwrap();
        let expected = Interaction::click("quote-table")
            .with_data("row", "0")
            .with_data("column", "color");
        assert_eq!(command, Some(ScriptCommand::Interact(expected)));
    }

    #[test]
    fn test_quoted_value() {
        let command = parse_line(r#"input location-input-box value="Bed 1""#).unwrap();
        assert_eq!(
            command,
            Some(ScriptCommand::Interact(Interaction::input("location-input-box", "Bed 1")))
        );
    }

    #[test]
    fn test_comments_and_keywords() {
        assert_eq!(parse_line("  # setup").unwrap(), None);
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("state").unwrap(), Some(ScriptCommand::State));
        assert_eq!(parse_line("quit").unwrap(), Some(ScriptCommand::Quit));
    }

    #[test]
    fn test_malformed_lines() {
        assert!(parse_line("hover k1-tab").is_err());
        assert!(parse_line("click").is_err());
        assert!(parse_line("enter k2-batch-input red").is_err());
        assert!(parse_line(r#"input location-input-box value="Bed"#).is_err());
    }
}

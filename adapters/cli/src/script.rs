//! Move script parsing.

use anyhow::{bail, Result};
use gridlock_core::Direction;
use gridlock_system_control::ControlInput;

/// Parses a move script into control inputs, one per step.
///
/// `R`, `D`, `L` and `U` move the selected hero; `n` or the word `tab`
/// selects the next hero. Case and whitespace are ignored.
pub(crate) fn parse_script(script: &str) -> Result<Vec<ControlInput>> {
    let mut inputs = Vec::new();
    for word in script.split_whitespace() {
        if word.eq_ignore_ascii_case("tab") {
            inputs.push(ControlInput::new(None, true));
            continue;
        }
        for symbol in word.chars() {
            let input = match symbol.to_ascii_uppercase() {
                'R' => ControlInput::new(Some(Direction::Right), false),
                'D' => ControlInput::new(Some(Direction::Down), false),
                'L' => ControlInput::new(Some(Direction::Left), false),
                'U' => ControlInput::new(Some(Direction::Up), false),
                'N' => ControlInput::new(None, true),
                _ => bail!("unknown move `{symbol}` in script"),
            };
            inputs.push(input);
        }
    }
    Ok(inputs)
}

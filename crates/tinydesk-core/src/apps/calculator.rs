//! Calculator window content and its expression evaluator.

use std::any::Any;

use tinydesk_types::error::{DeskError, Result};
use tinydesk_wm::ContentSurface;

/// Keypad layout, row by row.
pub const BUTTON_LABELS: [&str; 16] = [
    "7", "8", "9", "/", "4", "5", "6", "*", "1", "2", "3", "-", "0", ".", "=", "+",
];

/// Shown when the expression cannot be evaluated.
const ERROR_DISPLAY: &str = "ERR";

/// Display plus keypad. Keys append to the display; `=` replaces it with
/// the value of the expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculatorPad {
    display: String,
}

impl CalculatorPad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// Press one keypad button.
    pub fn press(&mut self, label: &str) -> Result<()> {
        if !BUTTON_LABELS.contains(&label) {
            return Err(DeskError::Command(format!("no calculator key '{label}'")));
        }
        if label == "=" {
            if !self.display.is_empty() {
                self.display = match evaluate(&self.display) {
                    Ok(value) => format_number(value),
                    Err(_) => ERROR_DISPLAY.to_string(),
                };
            }
            return Ok(());
        }
        if self.display == ERROR_DISPLAY {
            self.display.clear();
        }
        self.display.push_str(label);
        Ok(())
    }

    /// Press each character of `keys` in turn.
    pub fn press_all(&mut self, keys: &str) -> Result<()> {
        let mut buf = [0u8; 4];
        for c in keys.chars().filter(|c| !c.is_whitespace()) {
            self.press(c.encode_utf8(&mut buf))?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.display.clear();
    }
}

impl ContentSurface for CalculatorPad {
    fn summary(&self) -> String {
        if self.display.is_empty() {
            "display: 0".to_string()
        } else {
            format!("display: {}", self.display)
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Evaluate `+ - * /` over decimal numbers with the usual precedence.
/// Unary signs are allowed. Non-finite results are errors.
pub fn evaluate(expr: &str) -> Result<f64> {
    let mut parser = Parser {
        chars: expr.chars().filter(|c| !c.is_whitespace()).collect(),
        pos: 0,
    };
    let value = parser.expr()?;
    if let Some(c) = parser.peek() {
        return Err(DeskError::Command(format!("unexpected '{c}'")));
    }
    if !value.is_finite() {
        return Err(DeskError::Command("result is not a number".to_string()));
    }
    Ok(value)
}

/// Whole values print without a fractional part.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn expr(&mut self) -> Result<f64> {
        let mut acc = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            acc = if op == '+' { acc + rhs } else { acc - rhs };
        }
        Ok(acc)
    }

    fn term(&mut self) -> Result<f64> {
        let mut acc = self.factor()?;
        while let Some(op @ ('*' | '/')) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            acc = if op == '*' { acc * rhs } else { acc / rhs };
        }
        Ok(acc)
    }

    fn factor(&mut self) -> Result<f64> {
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            },
            Some('+') => {
                self.pos += 1;
                self.factor()
            },
            _ => self.number(),
        }
    }

    fn number(&mut self) -> Result<f64> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        if literal.is_empty() {
            return Err(match self.peek() {
                Some(c) => DeskError::Command(format!("unexpected '{c}'")),
                None => DeskError::Command("expression ends early".to_string()),
            });
        }
        literal
            .parse()
            .map_err(|_| DeskError::Command(format!("bad number '{literal}'")))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn precedence_is_respected() {
        assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
        assert_eq!(evaluate("10-4/2").unwrap(), 8.0);
        assert_eq!(evaluate("-3*-2").unwrap(), 6.0);
        assert_eq!(evaluate("1.5+.5").unwrap(), 2.0);
    }

    #[test]
    fn malformed_expressions_fail() {
        assert!(evaluate("1+").is_err());
        assert!(evaluate("*2").is_err());
        assert!(evaluate("1..2").is_err());
        assert!(evaluate("4/0").is_err());
    }

    #[test]
    fn pad_evaluates_on_equals() {
        let mut pad = CalculatorPad::new();
        pad.press_all("12+3*2=").unwrap();
        assert_eq!(pad.display(), "18");
        pad.press_all("/4=").unwrap();
        assert_eq!(pad.display(), "4.5");
    }

    #[test]
    fn pad_shows_err_and_recovers() {
        let mut pad = CalculatorPad::new();
        pad.press_all("9/=").unwrap();
        assert_eq!(pad.display(), "ERR");
        pad.press("7").unwrap();
        assert_eq!(pad.display(), "7");
    }

    #[test]
    fn equals_on_empty_display_is_a_no_op() {
        let mut pad = CalculatorPad::new();
        pad.press("=").unwrap();
        assert_eq!(pad.display(), "");
        assert_eq!(pad.summary(), "display: 0");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut pad = CalculatorPad::new();
        assert!(pad.press("(").is_err());
        assert!(pad.press_all("1x").is_err());
        assert_eq!(pad.display(), "1");
    }

    proptest! {
        #[test]
        fn integer_sums_match(a in 0u32..100_000, b in 0u32..100_000) {
            let value = evaluate(&format!("{a}+{b}")).unwrap();
            prop_assert_eq!(format_number(value), (u64::from(a) + u64::from(b)).to_string());
        }
    }
}

//! Default commands registered at kernel startup.

use tinydesk_platform::TimeService;
use tinydesk_types::error::{DeskError, Result};

use crate::interpreter::{Command, CommandRegistry};

/// Register the default command set: `help`, `echo`, `time`, `sum`.
///
/// The registered `help` prints a fixed listing and takes precedence over
/// the live listing a [`crate::Terminal`] session falls back to.
pub fn register_builtins<T>(reg: &mut CommandRegistry, clock: T)
where
    T: TimeService + 'static,
{
    reg.register(
        "help",
        Command::new(|_| Ok("Available commands: help, echo, time, clear, sum".to_string()))
            .describe("List available commands", "help [command]"),
    );
    reg.register(
        "echo",
        Command::new(|args| Ok(args.join(" "))).describe("Print arguments", "echo [text...]"),
    );
    reg.register(
        "time",
        Command::new(move |_| {
            let now = clock.now()?;
            Ok(format!("Now: {now}"))
        })
        .describe("Show the current UTC time", "time"),
    );
    reg.register(
        "sum",
        Command::new(sum).describe("Add integer arguments", "sum <n> [n...]"),
    );
}

fn sum(args: &[&str]) -> Result<String> {
    let mut total: i64 = 0;
    for arg in args {
        let n: i64 = arg
            .parse()
            .map_err(|_| DeskError::Command(format!("invalid number: {arg}")))?;
        total = total
            .checked_add(n)
            .ok_or_else(|| DeskError::Command("sum overflowed".to_string()))?;
    }
    Ok(format!("Sum: {total}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{LineOutcome, Terminal};
    use tinydesk_platform::WallTime;

    struct FixedClock;
    impl TimeService for FixedClock {
        fn now(&self) -> Result<WallTime> {
            Ok(WallTime {
                year: 2025,
                month: 6,
                day: 1,
                hour: 12,
                minute: 30,
                second: 0,
            })
        }
    }

    fn registry() -> CommandRegistry {
        let mut reg = CommandRegistry::new();
        register_builtins(&mut reg, FixedClock);
        reg
    }

    fn run(reg: &CommandRegistry, name: &str, args: &[&str]) -> Result<String> {
        reg.resolve(name).expect("builtin registered").execute(args)
    }

    #[test]
    fn builtins_are_registered() {
        let reg = registry();
        assert_eq!(reg.list_names(), vec!["echo", "help", "sum", "time"]);
    }

    #[test]
    fn sum_adds_arguments() {
        let reg = registry();
        assert_eq!(run(&reg, "sum", &["3", "4", "5"]).unwrap(), "Sum: 12");
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        let reg = registry();
        assert_eq!(run(&reg, "sum", &[]).unwrap(), "Sum: 0");
    }

    #[test]
    fn sum_handles_negatives() {
        let reg = registry();
        assert_eq!(run(&reg, "SUM", &["-3", "10"]).unwrap(), "Sum: 7");
    }

    #[test]
    fn sum_rejects_non_numeric_argument() {
        let reg = registry();
        let err = run(&reg, "sum", &["3", "x"]).unwrap_err();
        assert!(matches!(err, DeskError::Command(_)));
        assert!(err.to_string().contains("x"));
    }

    #[test]
    fn sum_reports_overflow() {
        let reg = registry();
        let max = i64::MAX.to_string();
        assert!(run(&reg, "sum", &[max.as_str(), "1"]).is_err());
    }

    #[test]
    fn echo_joins_arguments() {
        let reg = registry();
        assert_eq!(run(&reg, "echo", &["a", "b"]).unwrap(), "a b");
        assert_eq!(run(&reg, "echo", &[]).unwrap(), "");
    }

    #[test]
    fn time_uses_the_clock() {
        let reg = registry();
        assert_eq!(run(&reg, "time", &[]).unwrap(), "Now: 2025-06-01T12:30:00Z");
    }

    #[test]
    fn terminal_help_is_the_registered_listing() {
        let reg = registry();
        let mut term = Terminal::new("> ");
        assert_eq!(
            term.submit("help", &reg),
            LineOutcome::Output("Available commands: help, echo, time, clear, sum".to_string())
        );
    }

    #[test]
    fn terminal_renders_sum_error() {
        let reg = registry();
        let mut term = Terminal::new("> ");
        let outcome = term.submit("sum 3 x", &reg);
        assert_eq!(outcome, LineOutcome::Failed("invalid number: x".to_string()));
        assert_eq!(term.output().last().unwrap(), "Command error: invalid number: x");
    }
}

//! The `scorecast interactive` command.
//!
//! Reads one command per line from stdin. A submitted request runs alongside
//! the prompt, so edits keep working while it is pending.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use scorecast_core::render::{render_outcome, render_screen, UNSET};
use scorecast_core::traits::PredictionClient;
use scorecast_core::{
    FieldName, PredictionResult, StepButton, SubmissionController, SubmissionFailure,
    SubmissionTicket,
};

type Outcome = Result<PredictionResult, SubmissionFailure>;
type InFlight<'a> = (SubmissionTicket, Pin<Box<dyn Future<Output = Outcome> + 'a>>);

const HELP: &str = "\
Commands:
  + <field>            increment a numeric field
  - <field>            decrement a numeric field
  set <field> <value>  set a field (numbers are clamped, choices by name)
  clear <field>        forget an edit
  show                 print the form
  submit               ask the model for a prediction
  help                 print this help
  quit                 leave
Fields may be abbreviated to any unique prefix (e.g. `study_h`, `att`).";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Step(FieldName, StepButton),
    Set(FieldName, String),
    Clear(FieldName),
    Show,
    Submit,
    Help,
    Quit,
}

pub async fn execute(endpoint: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let client = super::build_client(endpoint, config_path)?;
    let client: &dyn PredictionClient = &client;
    println!("Posting to {}", client.endpoint());

    let mut controller = SubmissionController::new();
    println!("{}", render_screen(&controller));
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: Option<InFlight<'_>> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    // Input closed: let an outstanding request finish first.
                    if let Some((ticket, request)) = in_flight.take() {
                        let outcome = request.await;
                        settle(&mut controller, ticket, outcome);
                    }
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{message}");
                        continue;
                    }
                };
                match command {
                    Command::Quit => break,
                    Command::Submit => match controller.begin_submit() {
                        Some(pending) => {
                            let payload = pending.payload;
                            let request: Pin<Box<dyn Future<Output = Outcome> + '_>> =
                                Box::pin(async move { client.predict(&payload).await });
                            in_flight = Some((pending.ticket, request));
                            println!("{}", controller.submit_label());
                        }
                        None => println!("Still predicting, please wait."),
                    },
                    other => apply(&mut controller, other),
                }
            }
            (ticket, outcome) = wait_for(&mut in_flight) => {
                in_flight = None;
                settle(&mut controller, ticket, outcome);
            }
        }
    }

    Ok(())
}

/// Resolves when the in-flight request settles; never resolves if there is none.
async fn wait_for(in_flight: &mut Option<InFlight<'_>>) -> (SubmissionTicket, Outcome) {
    match in_flight {
        Some((ticket, request)) => (*ticket, request.await),
        None => std::future::pending().await,
    }
}

fn settle(controller: &mut SubmissionController, ticket: SubmissionTicket, outcome: Outcome) {
    if controller.complete(ticket, outcome) {
        print!("{}", render_outcome(controller));
    }
}

fn apply(controller: &mut SubmissionController, command: Command) {
    match command {
        Command::Step(name, button) => match controller.step(name, button) {
            Some(value) => println!("{}: {value}", name.spec().label),
            None => println!("{} has no stepper, use `set {name} <value>`", name.spec().label),
        },
        Command::Set(name, raw) => match name.parse_value(&raw) {
            Ok(value) => {
                controller.update_value(name, value);
                println!("{}: {value}", name.spec().label);
            }
            Err(e) => println!("{e}"),
        },
        Command::Clear(name) => {
            controller.clear_value(name);
            let shown = controller
                .form()
                .effective_value(name)
                .map(|v| v.to_string())
                .unwrap_or_else(|| UNSET.to_string());
            println!("{}: {shown}", name.spec().label);
        }
        Command::Show => println!("{}", render_screen(controller)),
        Command::Help => println!("{HELP}"),
        Command::Submit | Command::Quit => {}
    }
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let rest: Vec<&str> = words.collect();

    let field_arg = |rest: &[&str]| match rest {
        [field] => resolve_field(field),
        _ => Err(format!("usage: {verb} <field>")),
    };

    match verb.to_lowercase().as_str() {
        "+" | "inc" => Ok(Command::Step(field_arg(&rest)?, StepButton::Increment)),
        "-" | "dec" => Ok(Command::Step(field_arg(&rest)?, StepButton::Decrement)),
        "set" => match rest.as_slice() {
            [field, value] => Ok(Command::Set(resolve_field(field)?, value.to_string())),
            _ => Err("usage: set <field> <value>".to_string()),
        },
        "clear" => Ok(Command::Clear(field_arg(&rest)?)),
        "show" => Ok(Command::Show),
        "submit" | "predict" => Ok(Command::Submit),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command: {other} (try `help`)")),
    }
}

/// Match a field by exact key or unique prefix.
fn resolve_field(input: &str) -> Result<FieldName, String> {
    let input = input.to_lowercase();
    if let Ok(name) = input.parse::<FieldName>() {
        return Ok(name);
    }
    let matches: Vec<FieldName> = FieldName::ALL
        .into_iter()
        .filter(|name| name.key().starts_with(&input))
        .collect();
    match matches.as_slice() {
        [name] => Ok(*name),
        [] => Err(format!("unknown field: {input}")),
        many => Err(format!(
            "ambiguous field '{input}': {}",
            many.iter()
                .map(|n| n.key())
                .collect::<Vec<_>>()
                .join(", ")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stepper_commands() {
        assert_eq!(
            parse_command("+ study_hours_per_day"),
            Ok(Command::Step(FieldName::StudyHoursPerDay, StepButton::Increment))
        );
        assert_eq!(
            parse_command("dec sleep"),
            Ok(Command::Step(FieldName::SleepHours, StepButton::Decrement))
        );
    }

    #[test]
    fn parses_set_and_clear() {
        assert_eq!(
            parse_command("set learning Visual"),
            Ok(Command::Set(FieldName::LearningStyle, "Visual".into()))
        );
        assert_eq!(
            parse_command("clear stress"),
            Ok(Command::Clear(FieldName::StressLevel))
        );
        assert!(parse_command("set stress").is_err());
    }

    #[test]
    fn ambiguous_and_unknown_fields_are_rejected() {
        let err = resolve_field("study").unwrap_err();
        assert!(err.contains("study_hours_per_day"));
        assert!(err.contains("study_environment"));
        assert!(resolve_field("gpa").is_err());
        assert_eq!(resolve_field("SCREEN"), Ok(FieldName::ScreenTime));
    }

    #[test]
    fn unknown_command_mentions_help() {
        assert!(parse_command("fly away").unwrap_err().contains("help"));
    }

    #[test]
    fn apply_step_then_clear() {
        let mut ctl = SubmissionController::new();
        apply(
            &mut ctl,
            Command::Step(FieldName::MotivationLevel, StepButton::Increment),
        );
        assert_eq!(
            ctl.form().get(FieldName::MotivationLevel),
            Some(scorecast_core::FieldValue::Number(8))
        );
        apply(&mut ctl, Command::Clear(FieldName::MotivationLevel));
        assert!(ctl.form().is_empty());
    }
}

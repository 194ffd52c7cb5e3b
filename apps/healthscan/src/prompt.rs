//! # Prompt Module
//!
//! Line-oriented terminal front end for the wizard. Reads commands from any
//! `BufRead` and writes screens to any `Write`, so the whole flow can be
//! driven from tests.
//!
//! Commands on a question screen:
//! - a number: select that option and move on
//! - empty line: continue (fails if unanswered)
//! - `b`: back, `q`: quit (progress is kept)
//! - `r`: reset everything, after a `y/N` confirmation

use healthscan_core::wizard::{Clock, ScanSession, Screen};
use healthscan_core::{Question, RecommendationResult, StateSlot};
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};

const INVALID_CHOICE: &str = "Please choose one of the listed options.";

/// Why the wizard loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardExit {
    /// The user typed `q`.
    Quit,
    /// Input ran out.
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Select(usize),
    Continue,
    Back,
    Reset,
    Quit,
    Invalid,
}

fn parse_command(line: &str) -> Command {
    match line.trim() {
        "" => Command::Continue,
        "b" | "back" => Command::Back,
        "r" | "reset" => Command::Reset,
        "q" | "quit" => Command::Quit,
        other => other
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map_or(Command::Invalid, |n| Command::Select(n - 1)),
    }
}

// =============================================================================
// RENDERING
// =============================================================================

fn render_question<S: StateSlot, C: Clock>(
    session: &ScanSession<S, C>,
    question: &Question,
    out: &mut impl Write,
) -> io::Result<()> {
    let selected = session.answers().get(question.id);

    writeln!(out, "{}", question.section().title())?;
    writeln!(out, "{}", question.title)?;
    if let Some(subtitle) = question.subtitle {
        writeln!(out, "{subtitle}")?;
    }
    writeln!(out)?;

    let options = question.options();
    for (index, option) in options.iter().enumerate() {
        let marker = if selected == Some(*option) { '*' } else { ' ' };
        writeln!(out, " {marker} {}) {}", index + 1, option.label())?;
    }
    writeln!(out)?;

    let back = if session.step() == 0 { "" } else { " · b back" };
    writeln!(
        out,
        "[1-{}] select · Enter {}{back} · r reset · q quit",
        options.len(),
        session.continue_label()
    )
}

fn render_recommendation(result: &RecommendationResult, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Recommendation")?;
    writeln!(out, "Your next best step")?;
    writeln!(
        out,
        "Based on stability signals across finance, sales, operations, and founder dependency."
    )?;
    writeln!(out)?;
    writeln!(out, "What we recommend")?;
    writeln!(out, "{}", result.message)?;
    writeln!(out, "{} {}", result.cta_text, result.cta_url)?;
    writeln!(out, "No scores shown. Just one clear next step.")?;
    writeln!(out)?;
    writeln!(out, "Enter Update Answers · b back · r reset · q quit")
}

/// Write the current screen.
pub fn render_screen<S: StateSlot, C: Clock>(
    session: &ScanSession<S, C>,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}% complete", session.progress_percent())?;
    match session.screen() {
        Screen::Question(question) => render_question(session, question, out),
        Screen::Recommendation(result) => render_recommendation(&result, out),
    }
}

// =============================================================================
// LOOP
// =============================================================================

fn log_persist_error<S: StateSlot, C: Clock>(session: &mut ScanSession<S, C>) {
    if let Some(e) = session.take_persist_error() {
        warn!(error = %e, "could not save scan progress");
    }
}

/// Select option `index` of the current question, then advance.
fn select_option<S: StateSlot, C: Clock>(
    session: &mut ScanSession<S, C>,
    index: usize,
) -> Result<(), &'static str> {
    let Some(question) = session.current_question() else {
        return Err(INVALID_CHOICE);
    };
    let Some(option) = question.options().get(index).copied() else {
        return Err(INVALID_CHOICE);
    };

    session
        .set(question.id, option.label())
        .map_err(|_| INVALID_CHOICE)?;
    debug!(question = %question.id, answer = option.label(), "answer recorded");
    session.advance().map_err(|_| INVALID_CHOICE)
}

/// Ask before wiping every answer. Anything but `y`/`yes` declines,
/// including end of input.
fn confirm_reset(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    write!(out, "Clear all answers and start over? [y/N] ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(false);
    }
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Run the wizard until the user quits or input ends.
pub fn run_wizard<S: StateSlot, C: Clock>(
    session: &mut ScanSession<S, C>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<WizardExit> {
    log_persist_error(session);

    loop {
        render_screen(session, out)?;
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(WizardExit::EndOfInput);
        }

        let outcome = match parse_command(&line) {
            Command::Quit => {
                info!(step = session.step(), "wizard closed, progress saved");
                writeln!(out, "Your progress is saved automatically.")?;
                return Ok(WizardExit::Quit);
            }
            Command::Continue => session.advance().map_err(|e| e.to_string()),
            Command::Back => {
                session.back();
                Ok(())
            }
            Command::Reset => {
                if confirm_reset(input, out)? {
                    session.reset();
                    info!("scan reset");
                } else {
                    writeln!(out, "Reset cancelled. Your answers are unchanged.")?;
                }
                Ok(())
            }
            Command::Select(index) if !session.is_on_recommendation() => {
                select_option(session, index).map_err(str::to_string)
            }
            Command::Select(_) | Command::Invalid => Err(INVALID_CHOICE.to_string()),
        };

        log_persist_error(session);
        if let Err(message) = outcome {
            writeln!(out, "! {message}")?;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use healthscan_core::{FixedClock, MemorySlot, QuestionId};
    use std::io::Cursor;

    fn drive(script: &str) -> (ScanSession<MemorySlot, FixedClock>, String, WizardExit) {
        let mut session = ScanSession::open(MemorySlot::new(), FixedClock::default());
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let exit = run_wizard(&mut session, &mut input, &mut out).unwrap();
        (session, String::from_utf8(out).unwrap(), exit)
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("\n"), Command::Continue);
        assert_eq!(parse_command("2\n"), Command::Select(1));
        assert_eq!(parse_command("0"), Command::Invalid);
        assert_eq!(parse_command("x"), Command::Invalid);
        assert_eq!(parse_command(" b "), Command::Back);
        assert_eq!(parse_command("q"), Command::Quit);
    }

    #[test]
    fn continue_without_answer_shows_validation() {
        let (session, output, exit) = drive("\nq\n");
        assert_eq!(exit, WizardExit::Quit);
        assert_eq!(session.step(), 0);
        assert!(output.contains("Please answer the question to continue."));
    }

    #[test]
    fn numbers_answer_and_advance() {
        let (session, output, _) = drive("4\n1\n");
        assert_eq!(session.step(), 2);
        assert_eq!(session.get(QuestionId::Q1), "5+ years");
        assert_eq!(session.get(QuestionId::Q2), "Founder / Owner");
        assert!(output.contains("Section B — Finance & Cash Flow"));
    }

    #[test]
    fn out_of_range_option_is_rejected() {
        let (session, output, exit) = drive("9\n");
        assert_eq!(exit, WizardExit::EndOfInput);
        assert_eq!(session.step(), 0);
        assert!(output.contains(INVALID_CHOICE));
    }

    #[test]
    fn full_run_reaches_recommendation() {
        // q13 "No" triggers the hard stop.
        let script = "4\n1\n1\n1\n1\n1\n2\n1\n1\n1\n1\n1\n3\n";
        let (session, output, _) = drive(script);
        assert!(session.is_on_recommendation());
        assert!(output.contains("What we recommend"));
        assert!(output.contains("Financial clarity comes first."));
        assert!(output.contains("https://boltzmenn.com/finance-clarity"));
        assert!(output.contains("100% complete"));
    }

    #[test]
    fn update_answers_returns_to_first_question() {
        let script = "4\n1\n1\n1\n1\n1\n2\n1\n1\n1\n1\n1\n1\n\n";
        let (session, _, _) = drive(script);
        assert_eq!(session.step(), 0);
        assert!(session.answers().is_complete());
    }

    #[test]
    fn reset_clears_answers_once_confirmed() {
        let (session, output, _) = drive("4\n1\nr\ny\n");
        assert!(output.contains("Clear all answers and start over? [y/N]"));
        assert_eq!(session.step(), 0);
        assert_eq!(session.answers().answered_count(), 0);
    }

    #[test]
    fn reset_needs_an_explicit_yes() {
        for reply in ["\n", "n\n", "no\n", "r\n", ""] {
            let script = format!("4\n1\nr\n{reply}");
            let (session, _, _) = drive(&script);
            assert_eq!(session.step(), 2, "reply {reply:?}");
            assert_eq!(session.answers().answered_count(), 2, "reply {reply:?}");
        }

        let (_, output, _) = drive("4\nr\nn\n");
        assert!(output.contains("Reset cancelled. Your answers are unchanged."));
    }
}

//! Command-line surface: argument parsing, the plain line-based shell, and
//! one-shot subcommands.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use mealpick_core::recommend::{MAX_BUDGET, MIN_BUDGET};
use mealpick_core::{
    Budget, HealthCondition, MealContext, MealEntry, MealError, Recommendation, RecommendError,
};

use crate::app::NO_MATCHES_NOTICE;
use crate::utils::format_naira;

#[derive(Debug, Parser)]
#[command(
    name = "mealpick",
    version,
    about = "Local meal recommendations by health condition and budget"
)]
pub struct Cli {
    /// Username to pre-fill or sign in with
    #[arg(long, short, global = true, env = "MEALPICK_USERNAME")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Line-based interactive session without the full-screen UI
    Shell,
    /// Sign in and print recommendations once
    Recommend {
        /// Health condition label, e.g. "Hypertension"
        #[arg(long, short)]
        condition: String,
        /// Budget in naira
        #[arg(long, short, allow_hyphen_values = true)]
        budget: i64,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        #[arg(long, env = "MEALPICK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// List the recognised health conditions
    Conditions,
}

/// Print condition labels, one per line
pub fn print_conditions(out: &mut impl Write) -> Result<()> {
    for condition in HealthCondition::ALL {
        writeln!(out, "{}", condition.label())?;
    }
    Ok(())
}

/// Write recommendations in the same shape the form shows them
pub fn print_recommendations(out: &mut impl Write, meals: &[&MealEntry]) -> Result<()> {
    if meals.is_empty() {
        writeln!(out, "{}", NO_MATCHES_NOTICE)?;
        return Ok(());
    }
    for entry in meals {
        writeln!(out, "Meal: {}  |  Cost: {}", entry.meal, format_naira(entry.cost))?;
        writeln!(out, "Foods to avoid: {}", entry.avoid)?;
        writeln!(out, "---")?;
    }
    Ok(())
}

/// One-shot: authenticate, filter, print
pub fn run_recommend(
    ctx: &mut MealContext,
    user: Option<String>,
    password: Option<String>,
    condition: &str,
    budget: i64,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    // Validate inputs before asking for a password
    let condition: HealthCondition = condition.parse()?;
    let budget = Budget::new(budget)?;

    let user = match user {
        Some(user) => user,
        None => prompt_line("Username: ")?,
    };
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ").context("Failed to read password")?,
    };

    ctx.login(&user, &password)?;
    let meals = ctx.recommend(condition, budget)?;
    info!(%condition, budget = budget.amount(), count = meals.len(), "Recommendations printed");

    if json {
        let recs: Vec<Recommendation> = meals.iter().copied().map(Recommendation::from).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&recs)?)?;
    } else {
        print_recommendations(out, &meals)?;
    }
    Ok(())
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

const CREDENTIALS_REQUIRED: &str = "Username and password required";

/// What the shell should do after a line of input
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Line-based session over any reader/writer.
///
/// Passwords are read with `rpassword` when `hide_passwords` is set and from
/// `input` otherwise.
pub struct Shell<'a, R, W> {
    ctx: &'a mut MealContext,
    input: R,
    output: W,
    hide_passwords: bool,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(ctx: &'a mut MealContext, input: R, output: W, hide_passwords: bool) -> Self {
        Self {
            ctx,
            input,
            output,
            hide_passwords,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Local Meal Recommendation System")?;
        loop {
            let flow = if self.ctx.session().is_authenticated() {
                self.recommend_step()?
            } else {
                self.menu_step()?
            };
            if flow == Flow::Quit {
                writeln!(self.output, "Goodbye.")?;
                return Ok(());
            }
        }
    }

    /// Read one trimmed line. `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask_password(&mut self) -> Result<Option<String>> {
        if self.hide_passwords {
            let password =
                rpassword::prompt_password("Password: ").context("Failed to read password")?;
            Ok(Some(password))
        } else {
            self.ask("Password: ")
        }
    }

    fn ask_credentials(&mut self) -> Result<Option<(String, String)>> {
        let Some(username) = self.ask("Username: ")? else {
            return Ok(None);
        };
        let Some(password) = self.ask_password()? else {
            return Ok(None);
        };
        Ok(Some((username, password)))
    }

    fn menu_step(&mut self) -> Result<Flow> {
        writeln!(self.output)?;
        writeln!(self.output, "[1] Login  [2] Sign Up  [q] Quit")?;
        let Some(choice) = self.ask("> ")? else {
            return Ok(Flow::Quit);
        };

        match choice.as_str() {
            "1" | "login" => {
                let Some((username, password)) = self.ask_credentials()? else {
                    return Ok(Flow::Quit);
                };
                if username.is_empty() || password.is_empty() {
                    writeln!(self.output, "{}", CREDENTIALS_REQUIRED)?;
                    return Ok(Flow::Continue);
                }
                match self.ctx.login(&username, &password) {
                    Ok(()) => writeln!(self.output, "Welcome {}!", username)?,
                    Err(e) => writeln!(self.output, "{}", MealError::from(e).user_message())?,
                }
            }
            "2" | "signup" | "sign up" => {
                let Some((username, password)) = self.ask_credentials()? else {
                    return Ok(Flow::Quit);
                };
                if username.is_empty() || password.is_empty() {
                    writeln!(self.output, "{}", CREDENTIALS_REQUIRED)?;
                    return Ok(Flow::Continue);
                }
                match self.ctx.register(&username, &password) {
                    Ok(()) => writeln!(self.output, "User registered! You can now log in.")?,
                    Err(e) => writeln!(self.output, "{}", MealError::from(e).user_message())?,
                }
            }
            "q" | "quit" | "exit" => return Ok(Flow::Quit),
            other => {
                debug!(input = %other, "Unknown menu choice");
                writeln!(self.output, "Please choose 1, 2 or q.")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn recommend_step(&mut self) -> Result<Flow> {
        writeln!(self.output)?;
        for (i, condition) in HealthCondition::ALL.iter().enumerate() {
            writeln!(self.output, "  {:>2}. {}", i + 1, condition.label())?;
        }
        let Some(answer) = self.ask("Condition (number or name, 'logout', 'quit'): ")? else {
            return Ok(Flow::Quit);
        };

        match answer.as_str() {
            "quit" | "q" | "exit" => return Ok(Flow::Quit),
            "logout" => {
                self.ctx.logout();
                writeln!(self.output, "Logged out.")?;
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        let condition = match parse_condition_choice(&answer) {
            Ok(condition) => condition,
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                return Ok(Flow::Continue);
            }
        };

        let prompt = format!("Budget ({}-{}): ", MIN_BUDGET, MAX_BUDGET);
        let Some(answer) = self.ask(&prompt)? else {
            return Ok(Flow::Quit);
        };
        let budget = answer
            .parse::<i64>()
            .ok()
            .and_then(|amount| Budget::new(amount).ok());
        let budget = match budget {
            Some(budget) => budget,
            None => {
                writeln!(
                    self.output,
                    "Enter a whole number between {} and {}.",
                    MIN_BUDGET, MAX_BUDGET
                )?;
                return Ok(Flow::Continue);
            }
        };

        let meals = self.ctx.recommend(condition, budget)?;
        writeln!(self.output)?;
        writeln!(self.output, "AI Meal Recommendation:")?;
        print_recommendations(&mut self.output, &meals)?;
        Ok(Flow::Continue)
    }
}

/// Accept either a 1-based menu number or a label
fn parse_condition_choice(answer: &str) -> Result<HealthCondition, RecommendError> {
    if let Ok(n) = answer.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| HealthCondition::ALL.get(i).copied())
            .ok_or_else(|| RecommendError::InvalidCondition(answer.to_string()));
    }
    answer.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn run_shell(script: &str) -> (String, MealContext) {
        let mut ctx = MealContext::with_default_store();
        let mut out = Vec::new();
        Shell::new(&mut ctx, script.as_bytes(), &mut out, false)
            .run()
            .unwrap();
        (String::from_utf8(out).unwrap(), ctx)
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_recommend() {
        let cli = Cli::parse_from([
            "mealpick",
            "recommend",
            "--condition",
            "Hypertension",
            "--budget",
            "4000",
            "--json",
        ]);
        match cli.command {
            Some(Command::Recommend {
                condition,
                budget,
                json,
                ..
            }) => {
                assert_eq!(condition, "Hypertension");
                assert_eq!(budget, 4000);
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_run_recommend_json() {
        let mut ctx = MealContext::with_default_store();
        let mut out = Vec::new();
        run_recommend(
            &mut ctx,
            Some("admin".to_string()),
            Some("admin123".to_string()),
            "Hypertension",
            4000,
            true,
            &mut out,
        )
        .unwrap();

        let recs: Vec<serde_json::Value> = serde_json::from_slice(&out).unwrap();
        let costs: Vec<u64> = recs.iter().map(|r| r["cost"].as_u64().unwrap()).collect();
        assert_eq!(costs, vec![4000, 3500, 3800]);
    }

    #[test]
    fn test_run_recommend_rejects_bad_input_before_login() {
        let mut ctx = MealContext::with_default_store();
        let mut out = Vec::new();
        let err = run_recommend(&mut ctx, None, None, "Gout", 4000, false, &mut out).unwrap_err();
        assert!(err.to_string().contains("Gout"));

        let err = run_recommend(&mut ctx, None, None, "Celiac", 500, false, &mut out).unwrap_err();
        assert!(err.to_string().contains("500"));
        assert!(!ctx.session().is_authenticated());
    }

    #[test]
    fn test_run_recommend_bad_password() {
        let mut ctx = MealContext::with_default_store();
        let mut out = Vec::new();
        let err = run_recommend(
            &mut ctx,
            Some("admin".to_string()),
            Some("wrong".to_string()),
            "Celiac",
            4000,
            false,
            &mut out,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(out.is_empty());
    }

    #[test]
    fn test_print_recommendations_empty() {
        let mut out = Vec::new();
        print_recommendations(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), NO_MATCHES_NOTICE);
    }

    #[test]
    fn test_print_conditions() {
        let mut out = Vec::new();
        print_conditions(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 10);
        assert_eq!(text.lines().nth(6), Some("Lactose Intolerance"));
    }

    #[test]
    fn test_shell_login_and_recommend() {
        let (out, ctx) = run_shell("1\nadmin\nadmin123\n2\n4000\nquit\n");
        assert!(out.contains("Welcome admin!"));
        assert!(out.contains("Meal: Eba & Egusi Soup  |  Cost: ₦4,000"));
        assert!(out.contains("Foods to avoid: Sugary drinks"));
        assert!(out.contains("Goodbye."));
        assert!(ctx.session().is_authenticated());
    }

    #[test]
    fn test_shell_empty_result() {
        let (out, _) = run_shell("1\nadmin\nadmin123\nCeliac\n1000\nquit\n");
        assert!(out.contains(NO_MATCHES_NOTICE));
    }

    #[test]
    fn test_shell_sign_up_flow() {
        let (out, ctx) = run_shell("2\nada\npw\n2\nada\nx\n1\nada\npw\nlogout\nq\n");
        assert!(out.contains("User registered! You can now log in."));
        assert!(out.contains("User already exists!"));
        assert!(out.contains("Welcome ada!"));
        assert!(out.contains("Logged out."));
        assert!(!ctx.session().is_authenticated());
        assert!(ctx.store().authenticate("ada", "pw").is_ok());
    }

    #[test]
    fn test_shell_rejects_bad_inputs() {
        let (out, _) = run_shell(
            "1\nadmin\nbad\n1\nadmin\nadmin123\n11\nGout\nUlcer\nlots\nUlcer\n99999\nquit\n",
        );
        assert!(out.contains("Invalid credentials!"));
        assert!(out.contains("Unrecognized health condition: 11"));
        assert!(out.contains("Unrecognized health condition: Gout"));
        assert!(out.contains("Enter a whole number between 1000 and 10000."));
    }

    #[test]
    fn test_shell_requires_both_fields() {
        let (out, ctx) = run_shell("2\n\npw\n1\nadmin\n\nq\n");
        assert_eq!(out.matches(CREDENTIALS_REQUIRED).count(), 2);
        assert!(!ctx.store().contains(""));
        assert!(!ctx.session().is_authenticated());
    }

    #[test]
    fn test_shell_quits_at_end_of_input() {
        let (out, _) = run_shell("1\nadmin\n");
        assert!(out.contains("Goodbye."));
    }

    #[test]
    fn test_parse_condition_choice() {
        assert_eq!(parse_condition_choice("1"), Ok(HealthCondition::Diabetes));
        assert_eq!(parse_condition_choice("10"), Ok(HealthCondition::HighCholesterol));
        assert_eq!(parse_condition_choice("ibs"), Ok(HealthCondition::Ibs));
        assert!(parse_condition_choice("0").is_err());
    }
}

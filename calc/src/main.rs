mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::rc::Rc;

use clap::{Args, Parser};
use cli::{print_error, print_evaluated, print_session, print_stopped};
use calc_core::{
    environment::prelude::{Environment, UserId},
    interpreter::prelude::{Interpreter, Settings, DEFAULT_PRECISION},
    parser::prelude::DEFAULT_MAX_DEPTH,
    utils::prelude::{Warning, WarningEmitterIO}
};

#[derive(Parser)]
enum Command {
    /// Evaluates formulas typed at the prompt
    Repl {
        /// Numeric id of the user whose variables are used
        #[arg(short, long)]
        user: Option<u64>,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Evaluates every expression as one line, in order, sharing variables
    Eval {
        /// Expressions to evaluate
        #[arg(required = true, allow_hyphen_values = true)]
        expressions: Vec<String>,
        /// Numeric id of the user whose variables are used
        #[arg(short, long)]
        user: Option<u64>,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl {
        /// Print trees in reverse Polish notation
        #[arg(long, default_value_t = false)]
        postfix: bool,
    }
}

#[derive(Args)]
struct SettingsArgs {
    /// Significant digits kept by division
    #[arg(long, default_value_t = DEFAULT_PRECISION, value_parser = clap::value_parser!(u64).range(1..))]
    precision: u64,
    /// Deepest nesting of parentheses and operators accepted
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl From<SettingsArgs> for Settings {
    fn from(value: SettingsArgs) -> Self {
        Settings {
            precision: value.precision,
            max_depth: value.max_depth,
        }
    }
}

fn main() {
    if let Err(err) = ctrlc::set_handler(|| {
        print_stopped();
        std::process::exit(130);
    }) {
        eprintln!("Unable to handle Ctrl-C: {err}");
    }

    let warning_emitter = Rc::new(ConsoleWarningEmitter);

    let result = match Command::parse() {
        Command::Repl { user, settings } => {
            let user = UserId::from(user);
            let interpreter = Interpreter::new(settings.into(), warning_emitter);

            print_session(user);
            repl::start(&interpreter, user)
        },
        Command::Eval { expressions, user, settings } => {
            let user = UserId::from(user);
            let interpreter = Interpreter::new(settings.into(), warning_emitter);
            let mut env = Environment::new();
            let mut failed = 0;

            let start = std::time::Instant::now();

            for expression in &expressions {
                match interpreter.parse(expression, user, &mut env) {
                    Ok(output) => println!("{output}"),
                    Err(err) => {
                        failed += 1;
                        print_error(&err);
                    }
                }
            }

            print_evaluated(expressions.len(), failed, std::time::Instant::now() - start);

            if failed > 0 {
                std::process::exit(1);
            }

            Ok(())
        },
        Command::Rlpl => {
            rlpl::start(&Interpreter::new(Settings::default(), warning_emitter))
        },
        Command::Rppl { postfix } => {
            rppl::start(&Interpreter::new(Settings::default(), warning_emitter), postfix)
        }
    };

    if let Err(err) = result {
        eprintln!("Unable to read input: {err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleWarningEmitter;

impl WarningEmitterIO for ConsoleWarningEmitter {
    fn emit_warning(&self, warning: Warning) {
        let buffer_writer = crate::cli::stderr_buffer_writer();
        let mut buffer = buffer_writer.buffer();
        warning.pretty(&mut buffer);
        buffer_writer
            .print(&buffer)
            .expect("Writing warning to stderr");
    }
}

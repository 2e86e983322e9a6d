use std::{cell::RefCell, path::Path, process, rc::Rc};

use ariadne::{Report, Source};
use ast::{program_to_sass, Options, Program};
use clap::Parser as CParser;
use interpreter::Interpreter;
use runtime::{Environment, Value};
use rustyline::error::ReadlineError;
use rustyline::Editor;

use crate::cli::{Cli, Commands};

pub struct Sassy;

impl Sassy {
    pub fn new() -> Sassy {
        Sassy
    }

    pub fn run(&mut self) {
        let cli = Cli::parse();

        match &cli.command {
            Commands::Run {
                file,
                dump_ast,
                to_sass,
                output,
            } => self.run_file(file, *dump_ast, *to_sass, &output.options()),
            Commands::Eval { expression, output } => {
                self.eval(expression, &output.options())
            }
            Commands::Repl { output } => {
                if let Err(e) = self.run_repl(&output.options()) {
                    eprintln!("{}", e);
                }
            }
        }
    }

    pub fn run_file(&mut self, file_path: &Path, dump_ast: bool, to_sass: bool, opts: &Options) {
        let source = match std::fs::read_to_string(file_path) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("{}: {}", file_path.display(), e);
                process::exit(1);
            }
        };

        let program = match self.parse_contents(&source) {
            Ok(program) => program,
            Err(_) => process::exit(1),
        };

        if dump_ast {
            println!("{program:#?}");
            return;
        }
        if to_sass {
            println!("{}", program_to_sass(&program, opts));
            return;
        }

        let mut interpreter = Interpreter::new().with_precision(opts.precision);
        let res = interpreter.run(&program);
        print_debug_output(&mut interpreter);

        match res {
            Ok(Value::Null) => {}
            Ok(val) => println!("{}", format_value(&val, opts)),
            Err(err) => {
                print_report(err.into_report(), &source);
                process::exit(1);
            }
        }
    }

    pub fn eval(&mut self, expression: &str, opts: &Options) {
        let expr = match parser::parse_expression(expression) {
            Ok(expr) => expr,
            Err(err) => {
                print_report(err.into_report(), expression);
                process::exit(1);
            }
        };

        let mut interpreter = Interpreter::new().with_precision(opts.precision);
        match interpreter.eval_expression(expr.as_ref()) {
            Ok(val) => println!("{}", format_value(&val, opts)),
            Err(err) => {
                print_report(err.into_report(), expression);
                process::exit(1);
            }
        }
    }

    pub fn run_repl(&mut self, opts: &Options) -> rustyline::Result<()> {
        let mut rl = Editor::<()>::new()?;
        let env = Rc::new(RefCell::new(Environment::global()));
        println!("sassy repl, ctrl-d to quit.");
        loop {
            let mut interpreter = Interpreter::with_env(env.clone()).with_precision(opts.precision);
            match rl.readline("> ") {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line.as_str());

                    let program = match self.parse_contents(&line) {
                        Ok(program) => program,
                        Err(_) => continue,
                    };
                    let res = interpreter.run(&program);
                    print_debug_output(&mut interpreter);

                    match res {
                        Ok(Value::Null) => {}
                        Ok(val) => println!("{}", format_value(&val, opts)),
                        Err(err) => print_report(err.into_report(), &line),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("Error: {:#?}", err);
                    break;
                }
            }
        }
        rustyline::Result::Ok(())
    }

    pub fn parse_contents(&mut self, source: &str) -> Result<Program, String> {
        let (program, errors) = parser::parse(source);

        if !errors.is_empty() {
            for err in errors.iter() {
                print_report(err.into_report(), source);
            }
            return Err("Parser error".to_string());
        }

        Ok(program)
    }
}

fn print_report(report: Report, source: &str) {
    if let Err(err) = report.print(Source::from(source.to_string())) {
        eprintln!("{}", err);
    }
}

fn print_debug_output(interpreter: &mut Interpreter) {
    for line in interpreter.take_debug_output() {
        eprintln!("{}", line);
    }
}

/// Numbers follow the output style, everything else prints as inspected.
fn format_value(value: &Value, opts: &Options) -> String {
    match value {
        Value::Number(n) => opts.format_number(n),
        v => v.inspect(opts.precision),
    }
}

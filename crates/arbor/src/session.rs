use std::io::{BufRead, IsTerminal as _, Write as _};

use anyhow::Context as _;
use arbor_errors::{Diagnostic, Renderer};
use arbor_math::{Binding, Engine, Environment, EvalError, evaluate_str};
use arbor_parse::Parsed;
use camino::Utf8Path;
use tracing::debug;

pub(crate) struct Session {
    engine: Engine,
    env: Environment,
    renderer: Renderer,
}

impl Session {
    pub(crate) fn new(engine: Engine, bindings: Vec<Binding>) -> Self {
        let mut env = Environment::new();
        env.extend(bindings);
        let renderer = if std::io::stderr().is_terminal() { Renderer::styled() } else { Renderer::plain() };
        Self { engine, env, renderer }
    }

    /// Prints the value of `text`. Returns `false` if it could not be computed.
    pub(crate) fn eval(&self, origin: &str, text: &str) -> bool {
        match evaluate_str(&self.engine, text, &self.env) {
            Ok(value) => {
                println!("{value}");
                true
            }
            Err(error) => {
                self.report(origin, text, &error);
                false
            }
        }
    }

    pub(crate) fn tree(&self, origin: &str, text: &str) -> bool {
        match self.engine.process(text) {
            Ok(Parsed { tokens, tree }) => {
                print!("{}", tree.display(&tokens));
                true
            }
            Err(error) => {
                self.report(origin, text, &error.into());
                false
            }
        }
    }

    /// Evaluates every non-blank line of `path`, going on after failures.
    pub(crate) fn run(&self, path: &Utf8Path) -> anyhow::Result<bool> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read `{path}`"))?;

        let mut ok = true;
        for (number, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            ok &= self.eval(&format!("{path}:{}", number + 1), line);
        }
        debug!(%path, ok, "file evaluated");
        Ok(ok)
    }

    /// Reads expressions from stdin until it is closed. A `name=value` line
    /// binds a variable for the lines after it.
    pub(crate) fn repl(&mut self) -> anyhow::Result<()> {
        let stdin = std::io::stdin();
        let interactive = stdin.is_terminal();
        let mut lines = stdin.lock().lines();

        loop {
            if interactive {
                print!("> ");
                std::io::stdout().flush().context("failed to write prompt")?;
            }
            let Some(line) = lines.next() else { break };
            let line = line.context("failed to read from stdin")?;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }
            if let Ok(Binding { name, value }) = line.parse() {
                self.env.set(name, value);
                continue;
            }
            self.eval("<stdin>", line);
        }
        Ok(())
    }

    fn report(&self, origin: &str, text: &str, error: &EvalError) {
        let diagnostic = Diagnostic::from(error);
        eprintln!("{}", diagnostic.render(&self.renderer, origin, text));
    }
}

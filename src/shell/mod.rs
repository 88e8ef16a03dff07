use std::path::PathBuf;

use rustyline::{config::Configurer, error::ReadlineError, history::FileHistory, Editor};

use crate::{
    core::{
        commands::{CommandExecutor, Flow},
        config::Config,
        state::{ShellState, DEFAULT_PROMPT},
    },
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::{tokenizer, ShellHelper},
    path::PathExpander,
    process::signal::{ignore_terminal_output_stops, install_interrupt_handler},
};

const HISTORY_FILE: &str = ".mysh_history";

pub struct Shell {
    pub(crate) editor: Editor<ShellHelper, FileHistory>,
    pub(crate) state: ShellState,
    pub(crate) executor: CommandExecutor,
    pub(crate) highlighter: SyntaxHighlighter,
    pub(crate) history_path: PathBuf,
}

impl Shell {
    pub fn new(flags: &Flags) -> Result<Self, ShellError> {
        ignore_terminal_output_stops()?;
        install_interrupt_handler()?;

        let paths = PathExpander::new();
        let config = Config::from_flags(flags, paths.home());
        let state = ShellState::bootstrap(&config, paths.clone());

        let mut helper = ShellHelper::new(paths);
        helper.set_search_path(state.env.search_path());

        let mut editor = Editor::<ShellHelper, FileHistory>::new()?;
        editor.set_helper(Some(helper));
        editor.set_auto_add_history(true);

        let history_path = state.home().join(HISTORY_FILE);
        if let Err(e) = editor.load_history(&history_path) {
            log::debug!("no history loaded from {}: {}", history_path.display(), e);
        }

        Ok(Shell {
            editor,
            state,
            executor: CommandExecutor::new(),
            highlighter: SyntaxHighlighter::new(),
            history_path,
        })
    }

    /// Reads and runs lines until end of input or `exit`. Returns the status
    /// requested by `exit CODE`, if any.
    pub fn run(&mut self) -> Result<Option<i32>, ShellError> {
        let code = loop {
            if let Some(helper) = self.editor.helper_mut() {
                helper.set_search_path(self.state.env.search_path());
            }

            let prompt = self
                .state
                .env
                .get("PROMPT")
                .unwrap_or(DEFAULT_PROMPT)
                .to_string();
            match self.editor.readline(&prompt) {
                Ok(line) => match self.execute_line(&line) {
                    Flow::Continue => {}
                    Flow::Quit => break None,
                    Flow::Exit(code) => break Some(code),
                },
                Err(ReadlineError::Interrupted) => {
                    println!();
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break None;
                }
                Err(e) => return Err(e.into()),
            }
        };

        self.save_history();
        Ok(code)
    }

    /// Tokenizes and dispatches one line, printing any diagnostic it
    /// produces.
    pub fn execute_line(&mut self, line: &str) -> Flow {
        let args = match tokenizer::split(line) {
            Ok(args) => args,
            Err(e) => {
                self.report(&e.to_string());
                return Flow::Continue;
            }
        };

        match self.executor.execute(&args, &mut self.state) {
            Ok(flow) => flow,
            Err(e) => {
                self.report(&e.to_string());
                Flow::Continue
            }
        }
    }

    fn report(&self, message: &str) {
        eprintln!("{}", self.highlighter.highlight_error(message));
    }

    fn save_history(&mut self) {
        if let Err(e) = self.editor.save_history(&self.history_path) {
            log::warn!("could not save history to {}: {}", self.history_path.display(), e);
        }
    }
}

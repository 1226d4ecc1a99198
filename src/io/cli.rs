//! Command-line interface and the interactive command loop

use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing::{info, warn};

use crate::algorithm::editor::Editor;
use crate::algorithm::trainer::{Trainer, TrainingStart};
use crate::io::command::{Command, HELP};
use crate::io::configuration::{
    DEFAULT_MAX_CORRECTIONS, DEFAULT_SEED, DEFAULT_SETTLE_MS, DEFAULT_STORE_FILE,
    DEFAULT_TRAINING_ROUNDS, EEPROM_ADDRESS, EditorConfig, GRID_SIZE, MAX_CORRECTION_EDITS,
    STORE_CAPACITY, settle_delay,
};
use crate::io::error::{Result, WithPath};
use crate::io::logging;
use crate::io::progress::TrainingProgress;
use crate::io::render::{
    describe_components, render_correction, render_grid, render_legend, render_report,
};
use crate::io::store::{FileByteStore, MemoryByteStore, PersistentByteStore, WritePacing};

#[derive(Parser)]
#[command(name = "circuit-trainer")]
#[command(
    author,
    version,
    about = "Edit, test and train random circuit diagrams on a fixed grid"
)]
/// Command-line arguments for the editor
pub struct Cli {
    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Side length of the square grid
    #[arg(short, long, default_value_t = GRID_SIZE)]
    pub grid_size: usize,

    /// EEPROM image file holding the feedback record
    #[arg(long, value_name = "PATH", default_value = DEFAULT_STORE_FILE)]
    pub store: PathBuf,

    /// Keep feedback in memory only (lost on exit)
    #[arg(long)]
    pub volatile: bool,

    /// Settling delay after each persisted byte, in milliseconds
    #[arg(long, default_value_t = DEFAULT_SETTLE_MS)]
    pub settle_ms: u64,

    /// Byte address of the feedback record
    #[arg(long, default_value_t = EEPROM_ADDRESS)]
    pub address: usize,

    /// Maximum cells changed by one correction
    #[arg(long, default_value_t = MAX_CORRECTION_EDITS)]
    pub max_edits: usize,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output and non-error logs
    #[arg(short, long)]
    pub quiet: bool,

    /// Operating mode (defaults to the interactive editor)
    #[command(subcommand)]
    pub mode: Option<Mode>,
}

/// Operating modes
#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Read commands from standard input
    Repl,
    /// Run unattended generate/test/correct rounds
    Train {
        /// Number of rounds
        #[arg(short, long, default_value_t = DEFAULT_TRAINING_ROUNDS)]
        rounds: usize,

        /// Corrections attempted per round before rejecting it
        #[arg(short, long, default_value_t = DEFAULT_MAX_CORRECTIONS)]
        max_corrections: usize,

        /// Start each round from an empty grid instead of a random one
        #[arg(long)]
        from_blank: bool,
    },
}

impl Cli {
    /// Editor settings derived from the arguments
    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            grid_size: self.grid_size,
            seed: self.seed,
            feedback_address: self.address,
            max_correction_edits: self.max_edits,
            ..EditorConfig::default()
        }
    }

    /// Log filter used when `RUST_LOG` is unset
    pub const fn log_directive(&self) -> &'static str {
        logging::default_directive(self.verbose, self.quiet)
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Write pacing for the file store
    pub const fn pacing(&self) -> WritePacing {
        if self.settle_ms == 0 {
            WritePacing::Immediate
        } else {
            WritePacing::Delay(settle_delay(self.settle_ms))
        }
    }
}

/// Builds the store and editor, then runs the selected mode
pub struct Application {
    cli: Cli,
}

impl Application {
    /// Create an application from parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected mode to completion
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the store cannot be
    /// opened, or standard output cannot be written
    pub fn run(&self) -> Result<()> {
        if self.cli.volatile {
            self.run_with(MemoryByteStore::new(STORE_CAPACITY))
        } else {
            let store = FileByteStore::open(&self.cli.store, STORE_CAPACITY, self.cli.pacing())?;
            info!(path = %store.path().display(), "feedback store opened");
            self.run_with(store)
        }
    }

    fn run_with<S: PersistentByteStore>(&self, store: S) -> Result<()> {
        let mut editor = Editor::new(&self.cli.editor_config(), store)?;

        match self.cli.mode.clone().unwrap_or(Mode::Repl) {
            Mode::Repl => {
                let stdin = std::io::stdin();
                let interactive = stdin.is_terminal();
                let mut session = Session::new(&mut editor, interactive);
                session.run(stdin.lock(), std::io::stdout().lock())
            }
            Mode::Train {
                rounds,
                max_corrections,
                from_blank,
            } => {
                let start = if from_blank {
                    TrainingStart::Blank
                } else {
                    TrainingStart::Generated
                };
                let progress = if self.cli.should_show_progress() {
                    TrainingProgress::new(rounds)
                } else {
                    TrainingProgress::hidden(rounds)
                };

                let summary =
                    Trainer::new(rounds, max_corrections, start).run(&mut editor, &progress)?;

                let mut out = std::io::stdout().lock();
                writeln!(
                    out,
                    "Trained {} round(s): {} passed, {} correction(s) applied",
                    summary.rounds, summary.passed, summary.corrections
                )
                .with_path("<stdout>", "write")?;
                write!(out, "{}", render_grid(editor.grid())).with_path("<stdout>", "write")
            }
        }
    }
}

/// Text produced by one command
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reply {
    /// Lines to show the operator
    pub text: String,
    /// Whether the loop should stop
    pub quit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }
}

/// Command loop over an editor
///
/// Every command runs to completion before the next line is read. Errors
/// are reported to the operator and the loop continues.
pub struct Session<'a, S> {
    editor: &'a mut Editor<S>,
    prompt: bool,
}

impl<'a, S: PersistentByteStore> Session<'a, S> {
    /// Wrap an editor; `prompt` prints `> ` before each line
    pub const fn new(editor: &'a mut Editor<S>, prompt: bool) -> Self {
        Self { editor, prompt }
    }

    /// Execute one decoded command
    ///
    /// # Errors
    ///
    /// Returns the editor's error; the grid is unchanged when it fails
    pub fn execute(&mut self, command: Command) -> Result<Reply> {
        let editor = &mut *self.editor;

        let reply = match command {
            Command::Generate => {
                editor.generate();
                Reply::text(format!("Generated a random diagram\n{}", render_grid(editor.grid())))
            }
            Command::Add { row, col, kind } => {
                let previous = editor.place(row, col, &kind)?;
                let placed = editor.grid().get(row, col)?;
                if previous.is_component() && previous != placed {
                    Reply::text(format!("({row}, {col}) = {placed} (replaced {previous})\n"))
                } else {
                    Reply::text(format!("({row}, {col}) = {placed}\n"))
                }
            }
            Command::Remove { row, col } => {
                let previous = editor.remove(row, col)?;
                if previous.is_component() {
                    Reply::text(format!("Removed {previous} from ({row}, {col})\n"))
                } else {
                    Reply::text(format!("({row}, {col}) was already empty\n"))
                }
            }
            Command::Test => Reply::text(render_report(&editor.test())),
            Command::Feedback(verdict) => {
                let correction = editor.record_feedback(verdict)?;
                let mut text = format!("Feedback {verdict} saved\n");
                if let Some(result) = correction {
                    text.push_str(&render_correction(&result));
                    text.push_str(&render_grid(editor.grid()));
                }
                Reply::text(text)
            }
            Command::Correct => {
                let result = editor.correct();
                Reply::text(format!(
                    "{}{}",
                    render_correction(&result),
                    render_grid(editor.grid())
                ))
            }
            Command::Print => Reply::text(format!(
                "{}{}",
                render_grid(editor.grid()),
                describe_components(editor.grid(), editor.catalog())
            )),
            Command::Clear => {
                editor.initialize();
                Reply::text("Grid cleared\n")
            }
            Command::Status => {
                let verdict = if editor.last_feedback() {
                    "accepted"
                } else {
                    "none or rejected"
                };
                Reply::text(format!(
                    "State: {}\nLast feedback: {verdict}\nCorrections since last accept: {}\n",
                    editor.state(),
                    editor.correction().consecutive_corrections()
                ))
            }
            Command::Legend => Reply::text(render_legend(editor.catalog())),
            Command::Help => Reply::text(format!("{HELP}\n")),
            Command::Quit => Reply {
                text: String::new(),
                quit: true,
            },
        };

        Ok(reply)
    }

    /// Read commands from `input` until it ends or `quit` is entered
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` when reading input or writing output fails;
    /// command errors are written to `output` instead
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        let mut buffer = Vec::new();

        loop {
            if self.prompt {
                write!(output, "> ").with_path("<output>", "write")?;
                output.flush().with_path("<output>", "flush")?;
            }

            buffer.clear();
            if input
                .read_until(b'\n', &mut buffer)
                .with_path("<input>", "read")?
                == 0
            {
                break;
            }
            // Undecodable bytes become U+FFFD and fail to parse like any typo
            let line = String::from_utf8_lossy(&buffer);

            let outcome = Command::parse(&line)
                .and_then(|command| command.map(|command| self.execute(command)).transpose());

            match outcome {
                Ok(Some(reply)) => {
                    write!(output, "{}", reply.text).with_path("<output>", "write")?;
                    if reply.quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    if error.is_input_error() {
                        info!(%error, "command rejected");
                    } else {
                        warn!(%error, "command failed");
                    }
                    writeln!(output, "error: {error}").with_path("<output>", "write")?;
                }
            }
        }

        Ok(())
    }
}

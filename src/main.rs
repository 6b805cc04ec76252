use clap::Parser;
use crossterm::{
    cursor,
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyModifiers},
    execute, queue,
    style::Stylize,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{Write, stdout};
use std::path::PathBuf;
use tracing::{info, warn};
use vi_field::{EditorConfig, EditorController, EditorMessage, Mode, RcLoader, logging};

/// A single modal input field in the terminal. Prints the text on submit.
#[derive(Parser, Debug)]
#[command(name = "vi-field", version, about)]
struct Args {
    /// Plain text input without modal editing
    #[arg(long)]
    no_vim: bool,

    /// Start in Insert mode
    #[arg(long)]
    insert: bool,

    /// Maximum characters, 0 for unlimited
    #[arg(long)]
    char_limit: Option<usize>,

    /// Maximum visible rows
    #[arg(long)]
    max_height: Option<usize>,

    /// Enter submits from Insert mode too
    #[arg(long)]
    single_line: bool,

    #[arg(long)]
    placeholder: Option<String>,

    /// Log file, or a directory to put one in
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print a sample .vifieldrc and exit
    #[arg(long)]
    sample_rc: bool,
}

impl Args {
    /// Flags win over the rc file.
    fn apply(&self, config: &mut EditorConfig) {
        if self.no_vim {
            config.vim_enabled = false;
        }
        if self.insert {
            config.default_mode = Mode::Insert;
        }
        if let Some(limit) = self.char_limit {
            config.char_limit = limit;
        }
        if let Some(height) = self.max_height {
            config.max_height = height;
        }
        if self.single_line {
            config.submit_in_insert = true;
        }
        if let Some(placeholder) = &self.placeholder {
            config.placeholder = placeholder.clone();
        }
    }
}

fn main() -> vi_field::Result<()> {
    let args = Args::parse();
    if args.sample_rc {
        print!("{}", RcLoader::generate_sample_rc());
        return Ok(());
    }

    let _log_guard = match logging::init(args.log_file.clone()) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("vi-field: {err}");
            None
        }
    };

    let mut config = RcLoader::load_config();
    args.apply(&mut config);
    info!(?config, "starting");

    let mut editor = EditorController::new(config);
    editor.focus();

    terminal::enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste)?;

    let result = run_loop(&mut editor);

    execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    match result? {
        Some(text) => println!("{text}"),
        None => warn!("aborted without submitting"),
    }
    Ok(())
}

/// Returns the submitted text, or `None` when the user aborts with Ctrl-C.
fn run_loop(editor: &mut EditorController) -> vi_field::Result<Option<String>> {
    let (width, height) = terminal::size()?;
    editor.set_size(width as usize, (height as usize).saturating_sub(1));

    loop {
        draw(editor)?;

        let event = event::read()?;
        match &event {
            Event::Key(key)
                if key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                return Ok(None);
            }
            Event::Resize(width, height) => {
                editor.set_size(*width as usize, (*height as usize).saturating_sub(1));
                continue;
            }
            _ => {}
        }

        if let Some(message) = editor.update(&event) {
            match message.run() {
                EditorMessage::Submit(text) => return Ok(Some(text)),
            }
        }
    }
}

fn draw(editor: &EditorController) -> vi_field::Result<()> {
    let mut out = stdout();
    queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0), cursor::Hide)?;
    for line in editor.view().lines() {
        write!(out, "{line}\r\n")?;
    }

    let pending = editor
        .pending_operator()
        .map(|chord| format!(" {chord}"))
        .unwrap_or_default();
    let status = format!("-- {} --{pending} {}", editor.mode_indicator(), editor.status_message());
    write!(out, "{}", status.dim())?;
    out.flush()?;
    Ok(())
}

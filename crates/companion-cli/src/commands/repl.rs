//! Interactive terminal host for the widget.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use chrono::Utc;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;

use companion_application::views::{
    DiscoveryMessage, DiscoveryPage, HistoryClick, HistoryFilter, MindMapMode, QuizProgress,
};
use companion_core::chat::MessageType;
use companion_core::panel::NoteFilter;
use companion_core::state::View;
use companion_execution::logging::init_console_tracing;
use companion_execution::{ConsoleEvent, ConsoleLayer};
use companion_interaction::AgentReply;
use companion_widget::{CourseCompanionWidget, MemoryDocument, WidgetApp};

use super::catalog::print_course;
use super::config;

/// Longest time the prompt waits for a scheduled reply.
const REPLY_WAIT: Duration = Duration::from_secs(3);

const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/help", "Show this help"),
    ("/state", "Show surface, selection and current chat"),
    ("/menu", "Toggle the menu"),
    ("/open", "Open a panel: discovery | search | chat"),
    ("/close", "Close the panel"),
    ("/browse", "Browse owned courses [query]"),
    ("/add", "Select a course by id"),
    ("/remove", "Deselect a course by id"),
    ("/clear", "Clear the selection"),
    ("/courses", "List selected courses"),
    ("/decide", "Talk to the discovery assistant"),
    ("/option", "Pick a quick reply by number"),
    ("/search", "Search the catalog"),
    ("/new", "Start a chat about the selection [title]"),
    ("/chats", "Chat history [related | exact | all]"),
    ("/resume", "Open a chat from history by id"),
    ("/continue", "Continue with the chat's original courses"),
    ("/fresh", "Start a new chat with the current courses"),
    ("/dismiss", "Dismiss the course prompt"),
    ("/notes", "List notes [all | chat | manual]"),
    ("/note", "Add a note: <title> | <content>"),
    ("/save", "Save the last bot message as a note"),
    ("/quiz", "List quizzes or start one by id"),
    ("/answer", "Answer the current question by number"),
    ("/next", "Next question"),
    ("/mindmap", "List mind maps or open one by id"),
    ("/config", "Show the configuration"),
    ("/set", "Update a configuration key"),
    ("/reset", "Reset the widget"),
];

/// Completion, highlighting and hints for slash commands.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: SLASH_COMMANDS.iter().map(|(c, _)| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

enum Flow {
    Continue,
    Quit,
}

struct Repl {
    widget: CourseCompanionWidget<MemoryDocument, WidgetApp>,
    console: UnboundedReceiver<ConsoleEvent>,
    /// Messages already printed, per conversation
    shown_chat: usize,
    shown_discovery: usize,
}

pub async fn run(file: Option<PathBuf>) -> Result<()> {
    let (layer, console) = ConsoleLayer::channel();
    init_console_tracing("warn", layer)?;

    let patch = config::storage(file)?
        .load()?
        .unwrap_or_else(|| json!({}));

    let mut repl = Repl {
        widget: CourseCompanionWidget::new(MemoryDocument::new(), WidgetApp::new),
        console,
        shown_chat: 0,
        shown_discovery: 0,
    };
    repl.widget.init(&patch);
    repl.flush_console();
    if !repl.widget.is_initialized() {
        anyhow::bail!("Widget failed to initialize");
    }

    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== CourseCompanion ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/help' for commands, plain text to chat, or 'quit' to exit.".bright_black()
    );
    println!();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let flow = match repl.handle(trimmed).await {
                    Ok(flow) => flow,
                    Err(e) => {
                        eprintln!("{}", format!("Error: {:#}", e).red());
                        Flow::Continue
                    }
                };
                repl.flush_console();
                if matches!(flow, Flow::Quit) {
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    repl.widget.destroy();
    Ok(())
}

impl Repl {
    fn app(&mut self) -> Result<&mut WidgetApp> {
        self.widget.root_mut().context("Widget is not initialized")
    }

    async fn handle(&mut self, line: &str) -> Result<Flow> {
        if line == "quit" || line == "exit" {
            println!("{}", "Goodbye!".bright_green());
            return Ok(Flow::Quit);
        }
        if !line.starts_with('/') {
            self.send(line).await?;
            return Ok(Flow::Continue);
        }

        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "/help" => print_help(),
            "/state" => self.print_state()?,
            "/menu" => {
                self.app()?.store().toggle_menu();
                self.print_state()?;
            }
            "/open" => {
                let view: View = arg
                    .parse()
                    .with_context(|| format!("Unknown view '{}'", arg))?;
                self.app()?.store().open_panel(view);
                println!("{}", view.title().bold());
            }
            "/close" => self.app()?.store().close_panel(),
            "/browse" => self.browse(arg)?,
            "/add" => self.select_course(arg)?,
            "/remove" => self.app()?.store().remove_course(arg),
            "/clear" => self.app()?.store().clear_courses(),
            "/courses" => self.print_selection()?,
            "/decide" => {
                let app = self.app()?;
                app.store().open_panel(View::Discovery);
                app.discovery.open_help_me_decide();
                self.shown_discovery = 0;
                self.print_discovery()?;
            }
            "/option" => self.choose_option(arg).await?,
            "/search" => self.search(arg)?,
            "/new" => self.new_chat(arg)?,
            "/chats" => self.print_history(arg)?,
            "/resume" => self.resume(arg)?,
            "/continue" => {
                if self.app()?.chat.history_mut().continue_with_original().is_some() {
                    self.shown_chat = 0;
                    self.print_chat()?;
                }
            }
            "/fresh" => {
                if let Some(chat_id) = self.app()?.chat.history_mut().start_new_with_current() {
                    println!("{}", format!("Started {}", chat_id).green());
                    self.shown_chat = 0;
                }
            }
            "/dismiss" => self.app()?.chat.history_mut().dismiss(),
            "/notes" => self.print_notes(arg)?,
            "/note" => self.add_note(arg)?,
            "/save" => self.save_last_reply()?,
            "/quiz" => self.quiz(arg)?,
            "/answer" => self.answer(arg)?,
            "/next" => self.next_question()?,
            "/mindmap" => self.mind_map(arg)?,
            "/config" => self.print_config()?,
            "/set" => {
                let (key, raw) = arg
                    .split_once(char::is_whitespace)
                    .context("Usage: /set <key> <value>")?;
                self.widget
                    .update_config(&json!({ key: config::parse_value(raw.trim()) }));
                self.print_config()?;
            }
            "/reset" => {
                self.app()?.store().reset_widget();
                self.shown_chat = 0;
                println!("{}", "Widget reset".green());
            }
            other => println!("{}", format!("Unknown command: {}", other).bright_black()),
        }
        Ok(Flow::Continue)
    }

    /// Routes plain text to the assistant or the course chat.
    async fn send(&mut self, text: &str) -> Result<()> {
        println!("{}", format!("> {}", text).green());
        let app = self.app()?;
        let surface = app.store().read(|state| state.surface);
        let to_assistant = surface.current_view() == Some(View::Discovery)
            && app.discovery.page() == DiscoveryPage::HelpMeDecide;

        if to_assistant {
            if !app.discovery.send_message(text) {
                println!("{}", "The assistant is still typing".bright_black());
                return Ok(());
            }
            self.shown_discovery += 1;
        } else {
            app.chat.send_message(text);
            self.shown_chat = self.app()?.chat.messages().len();
        }
        self.wait_for_reply().await?;

        if to_assistant {
            self.print_discovery()
        } else {
            self.print_chat()
        }
    }

    async fn wait_for_reply(&mut self) -> Result<()> {
        let started = Instant::now();
        loop {
            let app = self.app()?;
            if !app.chat.is_typing() && !app.discovery.is_typing() {
                return Ok(());
            }
            if started.elapsed() > REPLY_WAIT {
                println!("{}", "No reply yet".bright_black());
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }

    fn flush_console(&mut self) {
        while let Ok(event) = self.console.try_recv() {
            if event.is_error() {
                eprintln!("{}", format!("[error] {}", event.message).red());
            } else if event.is_warning() {
                eprintln!("{}", format!("[warn] {}", event.message).yellow());
            } else {
                eprintln!("{}", format!("[{}] {}", event.level.to_lowercase(), event.message).bright_black());
            }
        }
    }

    // ============================================================================
    // Surface and selection
    // ============================================================================

    fn print_state(&mut self) -> Result<()> {
        let state = self.app()?.state();
        let surface = match state.surface.current_view() {
            Some(view) => format!("panel: {}", view.title()),
            None if state.is_menu_open() => "menu open".to_string(),
            None => "closed".to_string(),
        };
        println!("{} {}", "surface:".bright_black(), surface);
        println!(
            "{} {}",
            "courses:".bright_black(),
            state.selected_course_ids().join(", ")
        );
        let chat = state
            .current_chat()
            .map(|c| format!("{} ({})", c.title, c.chat_id))
            .unwrap_or_else(|| "none".to_string());
        println!("{} {}", "chat:".bright_black(), chat);
        Ok(())
    }

    fn print_selection(&mut self) -> Result<()> {
        let courses = self.app()?.store().read(|state| state.selected_courses.clone());
        if courses.is_empty() {
            println!("{}", "No courses selected".bright_black());
        }
        for course in courses {
            println!("{} {}", course.id.bright_cyan(), course.name);
        }
        Ok(())
    }

    fn browse(&mut self, query: &str) -> Result<()> {
        let app = self.app()?;
        app.store().open_panel(View::Discovery);
        app.discovery.open_know_what_i_want();
        app.discovery.set_query(query);
        for course in app.discovery.available_courses() {
            let marker = if app.discovery.is_selected(&course.id) {
                "[x]".green()
            } else {
                "[ ]".normal()
            };
            println!("{} {} {}", marker, course.id.bright_cyan(), course.title);
        }
        Ok(())
    }

    fn select_course(&mut self, course_id: &str) -> Result<()> {
        let app = self.app()?;
        let course = app
            .catalog()
            .find_by_id(course_id)
            .with_context(|| format!("Unknown course '{}'", course_id))?;
        if app.discovery.is_selected(&course.id) {
            return Ok(());
        }
        if app.discovery.toggle_course(&course) {
            println!("{}", format!("Selected {}", course.title).green());
        }
        Ok(())
    }

    fn search(&mut self, query: &str) -> Result<()> {
        let app = self.app()?;
        app.store().open_panel(View::Search);
        app.search.set_query(query);
        let results = app.search.results();
        if results.is_empty() {
            println!("{}", "No courses found".bright_black());
        }
        for course in &results {
            print_course(course);
        }
        Ok(())
    }

    // ============================================================================
    // Discovery assistant
    // ============================================================================

    fn print_discovery(&mut self) -> Result<()> {
        let messages = self.app()?.discovery.messages();
        for message in messages.iter().skip(self.shown_discovery) {
            if let DiscoveryMessage::Agent(reply) = message {
                print_agent_reply(reply);
            }
        }
        self.shown_discovery = messages.len();
        Ok(())
    }

    async fn choose_option(&mut self, arg: &str) -> Result<()> {
        let index: usize = arg.parse().context("Usage: /option <number>")?;
        let messages = self.app()?.discovery.messages();
        let option = messages
            .iter()
            .rev()
            .find_map(|m| match m {
                DiscoveryMessage::Agent(reply) => Some(reply.options()),
                DiscoveryMessage::User(_) => None,
            })
            .and_then(|options| options.get(index.checked_sub(1)?))
            .cloned()
            .context("No such option")?;

        println!("{}", format!("> {}", option.label).green());
        if !self.app()?.discovery.choose_option(&option) {
            println!("{}", "The assistant is still typing".bright_black());
            return Ok(());
        }
        self.shown_discovery += 1;
        self.wait_for_reply().await?;
        self.print_discovery()
    }

    // ============================================================================
    // Chat
    // ============================================================================

    fn print_chat(&mut self) -> Result<()> {
        let messages = self.app()?.chat.messages();
        if messages.len() < self.shown_chat {
            self.shown_chat = 0;
        }
        for message in messages.iter().skip(self.shown_chat) {
            match message.message_type {
                MessageType::Bot => println!("{}", message.content.bright_blue()),
                MessageType::User => println!("{}", format!("> {}", message.content).green()),
            }
        }
        self.shown_chat = messages.len();
        Ok(())
    }

    fn new_chat(&mut self, title: &str) -> Result<()> {
        let app = self.app()?;
        if !app.store().can_proceed() {
            println!("{}", "Select at least one course first (/browse, /add)".yellow());
            return Ok(());
        }
        app.store().open_panel(View::Chat);
        let title = (!title.is_empty()).then_some(title);
        if app.chat.start_new_chat(title).is_some() {
            self.shown_chat = 0;
            self.print_chat()?;
        }
        Ok(())
    }

    fn print_history(&mut self, arg: &str) -> Result<()> {
        let history = self.app()?.chat.history_mut();
        if !arg.is_empty() {
            let filter: HistoryFilter = arg
                .parse()
                .with_context(|| format!("Unknown filter '{}'", arg))?;
            history.set_filter(filter);
        }

        let counts: Vec<String> = [HistoryFilter::Related, HistoryFilter::Exact, HistoryFilter::All]
            .into_iter()
            .map(|f| format!("{} ({})", f, history.count(f)))
            .collect();
        println!("{}", counts.join("  ").bright_black());

        for entry in history.entries() {
            println!(
                "{} {} [{}] {}",
                entry.chat.chat_id.bright_cyan(),
                entry.chat.title.bold(),
                entry.course_match,
                format!("{} messages", entry.chat.message_count).bright_black()
            );
        }
        Ok(())
    }

    fn resume(&mut self, chat_id: &str) -> Result<()> {
        let click = self.app()?.chat.history_mut().click(chat_id);
        match click {
            HistoryClick::Opened(_) => {
                self.shown_chat = 0;
                self.print_chat()?;
            }
            HistoryClick::NeedsConfirmation(prompt) => {
                let names = |courses: &[companion_core::catalog::SelectedCourse]| {
                    courses
                        .iter()
                        .map(|c| c.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                println!("{}", format!("\"{}\" was about different courses.", prompt.title).yellow());
                println!("  original: {}", names(&prompt.original_courses));
                println!("  current:  {}", names(&prompt.current_courses));
                println!("{}", "/continue, /fresh or /dismiss".bright_black());
            }
            HistoryClick::Missing => {}
        }
        Ok(())
    }

    // ============================================================================
    // Side panels
    // ============================================================================

    fn print_notes(&mut self, arg: &str) -> Result<()> {
        let notes = &mut self.app()?.notes;
        if !arg.is_empty() {
            let filter: NoteFilter = arg
                .parse()
                .with_context(|| format!("Unknown filter '{}'", arg))?;
            notes.set_filter(filter);
        }
        for note in notes.visible_notes() {
            println!(
                "{} {} {}",
                note.timestamp.format("%Y-%m-%d").to_string().bright_black(),
                note.title.bold(),
                format!("[{}]", note.source).bright_black()
            );
            println!("    {}", note.content);
        }
        Ok(())
    }

    fn add_note(&mut self, arg: &str) -> Result<()> {
        let (title, content) = arg
            .split_once('|')
            .context("Usage: /note <title> | <content>")?;
        match self.app()?.notes.add_note(title, content, Utc::now()) {
            Some(_) => println!("{}", "Note added".green()),
            None => println!("{}", "Title and content are required".yellow()),
        }
        Ok(())
    }

    fn save_last_reply(&mut self) -> Result<()> {
        let app = self.app()?;
        let last = app
            .chat
            .messages()
            .into_iter()
            .rev()
            .find(|m| m.message_type == MessageType::Bot)
            .context("No bot message to save")?;
        app.notes.save_chat_message(&last.content, Utc::now());
        println!("{}", "Saved to notes".green());
        Ok(())
    }

    fn quiz(&mut self, arg: &str) -> Result<()> {
        let quiz = &mut self.app()?.quiz;
        if arg.is_empty() {
            quiz.back_to_list();
            for summary in quiz.summaries() {
                println!(
                    "{} {} {} {}",
                    summary.id.to_string().bright_cyan(),
                    summary.title.bold(),
                    summary.status.label().bright_black(),
                    format!("{}%", summary.progress()).bright_black()
                );
            }
            return Ok(());
        }
        let id: u32 = arg.parse().context("Usage: /quiz [id]")?;
        if quiz.start(id) {
            self.print_question()?;
        }
        Ok(())
    }

    fn print_question(&mut self) -> Result<()> {
        let quiz = &self.app()?.quiz;
        let Some(session) = quiz.session() else {
            return Ok(());
        };
        let Some(question) = session.current_question() else {
            return Ok(());
        };
        println!(
            "{}",
            format!("Question {} of {}", session.index + 1, session.total()).bright_black()
        );
        println!("{}", question.question.bold());
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }
        Ok(())
    }

    fn answer(&mut self, arg: &str) -> Result<()> {
        let number: usize = arg.parse().context("Usage: /answer <number>")?;
        let quiz = &mut self.app()?.quiz;
        if !number.checked_sub(1).is_some_and(|i| quiz.select_answer(i)) {
            println!("{}", "Cannot select that answer".yellow());
            return Ok(());
        }
        if let Some(result) = quiz.submit() {
            if result.correct {
                println!("{}", "Correct!".green());
            } else {
                println!(
                    "{}",
                    format!("Incorrect. The answer is {}.", result.correct_answer + 1).red()
                );
            }
            println!("{}", result.explanation.bright_black());
        }
        Ok(())
    }

    fn next_question(&mut self) -> Result<()> {
        let progress = self.app()?.quiz.next();
        match progress {
            Some(QuizProgress::Question(_)) => self.print_question()?,
            Some(QuizProgress::Finished { correct, total }) => {
                println!("{}", format!("Quiz complete: {}/{} correct", correct, total).green());
                self.app()?.quiz.back_to_list();
            }
            None => println!("{}", "Submit an answer first".yellow()),
        }
        Ok(())
    }

    fn mind_map(&mut self, arg: &str) -> Result<()> {
        let view = &mut self.app()?.mind_map;
        if arg.is_empty() {
            view.back_to_list();
            for map in view.maps() {
                println!(
                    "{} {} {} {}",
                    map.id.to_string().bright_cyan(),
                    map.thumbnail,
                    map.title.bold(),
                    format!("{} nodes", map.node_count).bright_black()
                );
            }
            return Ok(());
        }
        let id: u32 = arg.parse().context("Usage: /mindmap [id]")?;
        if !view.view(id) {
            println!("{}", "No such mind map".yellow());
            return Ok(());
        }
        if let MindMapMode::Canvas(map) = view.mode() {
            println!("{}", map.center_node.label.bold());
            for root in map.roots() {
                println!("  {}", root.label.bright_cyan());
                for child in map.children_of(&root.id) {
                    println!("    {}", child.label);
                }
            }
        }
        Ok(())
    }

    fn print_config(&self) -> Result<()> {
        let config = self.widget.get_config().context("Widget is not initialized")?;
        println!("{}", serde_json::to_string_pretty(&config)?);
        Ok(())
    }
}

fn print_help() {
    for (command, description) in SLASH_COMMANDS {
        println!("{:<10} {}", command.bright_cyan(), description);
    }
    println!("{:<10} {}", "quit".bright_cyan(), "Exit");
}

fn print_agent_reply(reply: &AgentReply) {
    println!("{}", reply.content().bright_blue());
    for (i, option) in reply.options().iter().enumerate() {
        println!("  {}. {}", i + 1, option.label);
    }
    for recommendation in reply.courses() {
        let owned = if recommendation.course.is_purchased {
            "owned".green()
        } else {
            "purchase".yellow()
        };
        println!(
            "  {} {} ({}) [{}]",
            recommendation.course.id.bright_cyan(),
            recommendation.course.title.bold(),
            recommendation.match_label(),
            owned
        );
    }
}

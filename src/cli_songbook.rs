use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use walkdir::WalkDir;

mod cli_style;

use chapelsite_server::client::{
    distinct_categories, distinct_languages, sort_by_title, CatalogFilter, SongBookClient,
};
use chapelsite_server::songbook::{Song, SongId};
use cli_style::get_styles;

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

const DEFAULT_SERVER_URL: &str = "http://localhost:4000";

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Base URL of the site server.
    #[clap(default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,
}

#[derive(Parser)]
#[command(styles=get_styles(), name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Searches songs by title or lyrics text.
    Search {
        query: Vec<String>,

        /// Restrict matches to one language.
        #[clap(long)]
        language: Option<String>,
    },

    /// Lists the whole catalog, optionally narrowed down.
    List {
        #[clap(long)]
        language: Option<String>,

        #[clap(long)]
        category: Option<String>,
    },

    /// Shows one song with its full lyrics.
    Show { id: SongId },

    /// Shows the languages present in the catalog.
    Languages,

    /// Shows the categories present in the catalog.
    Categories,

    /// Adds one song from a plain-text lyrics file. The title is the
    /// file name without its extension.
    Add {
        path: PathBuf,

        #[clap(long, default_value = "")]
        language: String,

        #[clap(long, default_value = "")]
        category: String,
    },

    /// Uploads many lyrics files at once. Directories are walked for
    /// .txt files. Failures are tallied, not rolled back.
    Upload {
        paths: Vec<PathBuf>,

        #[clap(long, default_value = "")]
        language: String,
    },

    /// Deletes one song after confirmation.
    Delete { id: SongId },

    /// Deletes several songs, tallying the successes.
    DeleteMany { ids: Vec<SongId> },

    /// Shows the server this console talks to.
    Where,

    /// Close this program.
    Exit,
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

fn print_song_table(songs: &[Song]) {
    if songs.is_empty() {
        cli_style::print_empty_list("No songs found.");
        return;
    }
    let mut table = cli_style::SongTable::new(vec!["ID", "TITLE", "LANGUAGE", "CATEGORY"]);
    for song in songs {
        table.add_row(vec![
            song.id.to_string(),
            song.title.clone(),
            song.language.clone(),
            song.category.clone(),
        ]);
    }
    table.print();
}

fn fetch_sorted(
    rt: &Runtime,
    client: &SongBookClient,
    q: Option<&str>,
    language: Option<&str>,
) -> Result<Vec<Song>, String> {
    let mut songs = rt
        .block_on(client.list_songs(q, language))
        .map_err(|err| err.to_string())?;
    sort_by_title(&mut songs);
    Ok(songs)
}

fn confirm(question: &str) -> bool {
    print!("{} [y/N] ", question);
    cli_style::flush();
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn collect_lyrics_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).into_iter().flatten() {
                let entry_path = entry.path();
                if entry_path.is_file()
                    && entry_path
                        .extension()
                        .map(|ext| ext.eq_ignore_ascii_case("txt"))
                        .unwrap_or(false)
                {
                    files.push(entry_path.to_path_buf());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    files
}

fn upload_progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("  {bar:30} {pos}/{len} {msg}")
            .expect("Invalid progress template, this should be fixed at compile time."),
    );
    bar
}

fn execute_command(
    line: String,
    rt: &Runtime,
    client: &SongBookClient,
) -> CommandExecutionResult {
    if line.is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(&line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    match cli {
        Ok(cli) => match cli.command {
            InnerCommand::Search { query, language } => {
                let query = query.join(" ");
                match fetch_sorted(rt, client, Some(query.as_str()), language.as_deref()) {
                    Ok(songs) => print_song_table(&songs),
                    Err(err) => return CommandExecutionResult::Error(err),
                }
            }
            InnerCommand::List { language, category } => {
                match fetch_sorted(rt, client, None, None) {
                    Ok(songs) => {
                        let filter = CatalogFilter { language, category };
                        print_song_table(&filter.apply(&songs));
                    }
                    Err(err) => return CommandExecutionResult::Error(err),
                }
            }
            InnerCommand::Show { id } => match rt.block_on(client.get_song(id)) {
                Ok(song) => {
                    cli_style::print_key_value("Title", &song.title);
                    cli_style::print_key_value("Language", &song.language);
                    cli_style::print_key_value("Category", &song.category);
                    cli_style::print_lyrics(&song.lyrics);
                }
                Err(err) => return CommandExecutionResult::Error(err.to_string()),
            },
            InnerCommand::Languages => match fetch_sorted(rt, client, None, None) {
                Ok(songs) => {
                    let languages = distinct_languages(&songs);
                    if languages.is_empty() {
                        cli_style::print_empty_list("No languages yet.");
                    }
                    for language in languages {
                        cli_style::print_key_value("language", &language);
                    }
                }
                Err(err) => return CommandExecutionResult::Error(err),
            },
            InnerCommand::Categories => match fetch_sorted(rt, client, None, None) {
                Ok(songs) => {
                    let categories = distinct_categories(&songs);
                    if categories.is_empty() {
                        cli_style::print_empty_list("No categories yet.");
                    }
                    for category in categories {
                        cli_style::print_key_value("category", &category);
                    }
                }
                Err(err) => return CommandExecutionResult::Error(err),
            },
            InnerCommand::Add {
                path,
                language,
                category,
            } => match rt.block_on(client.add_song_from_file(&path, &language, &category)) {
                Ok(song) => {
                    cli_style::print_success(&format!("Added \"{}\" (id {})", song.title, song.id))
                }
                Err(err) => return CommandExecutionResult::Error(err.to_string()),
            },
            InnerCommand::Upload { paths, language } => {
                let files = collect_lyrics_files(&paths);
                if files.is_empty() {
                    cli_style::print_warning("No lyrics files to upload.");
                    return CommandExecutionResult::Ok;
                }

                let bar = upload_progress_bar(files.len() as u64);
                let mut success_count = 0usize;
                let mut fail_count = 0usize;
                for file in &files {
                    match rt.block_on(client.add_song_from_file(file, &language, "")) {
                        Ok(_) => success_count += 1,
                        Err(err) => {
                            fail_count += 1;
                            bar.println(format!("  {}: {}", file.display(), err));
                        }
                    }
                    bar.inc(1);
                }
                bar.finish_and_clear();

                let summary =
                    format!("{} song(s) added, {} failed.", success_count, fail_count);
                if fail_count == 0 {
                    cli_style::print_success(&summary);
                } else {
                    cli_style::print_warning(&summary);
                }
            }
            InnerCommand::Delete { id } => {
                if !confirm(&format!("Are you sure you want to delete song {}?", id)) {
                    cli_style::print_info("Nothing deleted.");
                    return CommandExecutionResult::Ok;
                }
                match rt.block_on(client.delete_song(id)) {
                    Ok(()) => cli_style::print_success("Song deleted."),
                    Err(err) => return CommandExecutionResult::Error(err.to_string()),
                }
            }
            InnerCommand::DeleteMany { ids } => {
                if ids.is_empty() {
                    cli_style::print_warning("No ids given.");
                    return CommandExecutionResult::Ok;
                }
                if !confirm(&format!("Delete {} selected song(s)?", ids.len())) {
                    cli_style::print_info("Nothing deleted.");
                    return CommandExecutionResult::Ok;
                }
                let mut success_count = 0usize;
                for id in &ids {
                    match rt.block_on(client.delete_song(*id)) {
                        Ok(()) => success_count += 1,
                        Err(err) => cli_style::print_error(&format!("id {}: {}", id, err)),
                    }
                }
                cli_style::print_success(&format!("{} song(s) deleted.", success_count));
            }
            InnerCommand::Where => {
                cli_style::print_key_value("server", client.base_url());
            }
            InnerCommand::Exit => return CommandExecutionResult::Exit,
        },

        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
        }
    }
    CommandExecutionResult::Ok
}

#[derive(rustyline_derive::Hinter)]
struct MyHelper {
    commands_names: Vec<String>,
}

impl MyHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        MyHelper { commands_names }
    }
}

impl Completer for MyHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .map(|c| c.to_string())
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for MyHelper {}
impl Validator for MyHelper {}
impl Helper for MyHelper {}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let rt = Runtime::new()?;
    let client = SongBookClient::new(cli_args.server_url.clone())?;

    cli_style::print_welcome(client.base_url());
    InnerCli::command().print_long_help()?;

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<MyHelper, FileHistory>::with_config(config)?;

    let helper = MyHelper::new();
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(&cli_style::get_prompt());

        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match execute_command(line, &rt, &client) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => {
                        break;
                    }
                    CommandExecutionResult::Error(err) => {
                        cli_style::print_error(&err);
                        continue;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                println!("Error: {:?}", e);
                break;
            }
        }
    }
    cli_style::print_goodbye();
    Ok(())
}

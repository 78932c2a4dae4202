use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_style;

use cli_style::{get_styles, CommandHelp};
use pezzottify_recommender::config::{AppConfig, CliConfig, FileConfig};
use pezzottify_recommender::{load_engine, Pillar, RecommendationEngine};

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Path to the JSON snapshot with tracks, artists, users and interactions.
    #[clap(value_parser = parse_path)]
    pub snapshot: Option<PathBuf>,

    /// Path to a TOML config file, its values override the CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Default number of results shown per query.
    #[clap(short, long, default_value_t = 10)]
    pub limit: usize,
}

#[derive(Parser)]
#[command(styles=get_styles(),name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Fused recommendations for the given user.
    Recommend {
        user_id: String,
        #[clap(short)]
        n: Option<usize>,
    },

    /// Shows the output of every scoring pillar separately.
    Pillars {
        user_id: String,
        #[clap(short)]
        n: Option<usize>,
    },

    /// Autocompletes track titles and artist names.
    Search {
        #[arg(required = true, num_args = 1..)]
        prefix: Vec<String>,
        #[clap(short)]
        n: Option<usize>,
    },

    /// Shows the taste community of a user.
    Community { user_id: String },

    /// Shows likes, similar users and favorite artists of a user.
    User { user_id: String },

    /// Shows the size of every index.
    Stats,

    /// Close this program.
    Exit,
}

const COMMANDS_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "recommend",
        args: "<user> [-n N]",
        description: "Fused recommendations",
    },
    CommandHelp {
        name: "pillars",
        args: "<user> [-n N]",
        description: "Recommendations of each pillar",
    },
    CommandHelp {
        name: "search",
        args: "<prefix> [-n N]",
        description: "Autocomplete titles and artists",
    },
    CommandHelp {
        name: "community",
        args: "<user>",
        description: "Taste community of a user",
    },
    CommandHelp {
        name: "user",
        args: "<user>",
        description: "Likes, similar users and top artists",
    },
    CommandHelp {
        name: "stats",
        args: "",
        description: "Index sizes",
    },
    CommandHelp {
        name: "help",
        args: "[command]",
        description: "Detailed help",
    },
    CommandHelp {
        name: "exit",
        args: "",
        description: "Close this program",
    },
];

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

const PROMPT: &str = ">> ";

fn show_recommend(engine: &RecommendationEngine, user_id: &str, n: usize) -> CommandExecutionResult {
    if engine.user(user_id).is_none() {
        return CommandExecutionResult::Error(format!("User {} not found.", user_id));
    }
    let recommendations = engine.generate_recommendations(user_id, n);
    cli_style::print_section_header(&format!("Top recommendations for {}", user_id));
    if recommendations.is_empty() {
        cli_style::print_empty_list("No recommendations available.");
    } else {
        cli_style::print_recommendations_table(&recommendations);
    }
    CommandExecutionResult::Ok
}

fn show_pillars(engine: &RecommendationEngine, user_id: &str, n: usize) -> CommandExecutionResult {
    if engine.user(user_id).is_none() {
        return CommandExecutionResult::Error(format!("User {} not found.", user_id));
    }
    cli_style::print_section_header(&format!("Pillars for {}", user_id));
    for pillar in Pillar::ALL {
        cli_style::print_pillar_header(pillar.tag());
        cli_style::print_ranked_list(&engine.pillar_recommendations(pillar, user_id, n));
    }
    println!();
    CommandExecutionResult::Ok
}

fn show_community(engine: &RecommendationEngine, user_id: &str) -> CommandExecutionResult {
    let Some(community) = engine.user_community(user_id) else {
        return CommandExecutionResult::Error(format!("User {} not found.", user_id));
    };
    cli_style::print_section_header("Community");
    cli_style::print_key_value_highlight("Community", community);
    cli_style::print_key_value("Size", &engine.community_size(user_id).to_string());
    for member in engine.community_members(user_id) {
        let name = engine
            .user(member)
            .map(|u| format!("{} ({})", u.username, member))
            .unwrap_or_else(|| member.to_string());
        cli_style::print_list_item(&name, 1);
    }
    cli_style::print_section_footer();
    CommandExecutionResult::Ok
}

fn show_user(engine: &RecommendationEngine, user_id: &str, n: usize) -> CommandExecutionResult {
    let Some(user) = engine.user(user_id) else {
        return CommandExecutionResult::Error(format!("User {} not found.", user_id));
    };
    cli_style::print_section_header(&user.username);
    cli_style::print_key_value("Id", &user.id);
    cli_style::print_key_value("Plays", &user.play_history.len().to_string());
    if let Some(community) = user.community_id.as_deref() {
        cli_style::print_key_value(
            "Community",
            &format!("{} ({} members)", community, engine.community_size(user_id)),
        );
    }

    cli_style::print_key_value_highlight("Liked tracks", &user.liked_tracks.len().to_string());
    if user.liked_tracks.is_empty() {
        cli_style::print_empty_list("No liked tracks.");
    }
    for track_id in &user.liked_tracks {
        let title = engine
            .track(track_id)
            .map(|t| t.title.as_str())
            .unwrap_or(track_id.as_str());
        cli_style::print_list_item(title, 1);
    }

    cli_style::print_key_value_highlight("Similar users", "");
    let similar = engine.similar_users(user_id, n);
    if similar.is_empty() {
        cli_style::print_empty_list("No similar users.");
    }
    for (other, similarity) in similar {
        let plays = engine.listening_similarity(user_id, &other);
        cli_style::print_list_item(
            &format!("{} (likes {:.2}, plays {:.2})", other, similarity, plays),
            1,
        );
    }

    cli_style::print_key_value_highlight("Top artists", "");
    let artists = engine.top_artists(user_id, n);
    if artists.is_empty() {
        cli_style::print_empty_list("No artist plays.");
    }
    for (artist_id, affinity) in artists {
        let name = engine
            .artist(&artist_id)
            .map(|a| a.name.clone())
            .unwrap_or(artist_id);
        cli_style::print_list_item(&format!("{} ({:.2})", name, affinity), 1);
    }
    cli_style::print_section_footer();
    CommandExecutionResult::Ok
}

fn show_stats(engine: &RecommendationEngine) {
    let stats = engine.stats();
    cli_style::print_section_header("Engine");
    cli_style::print_key_value("Tracks", &stats.tracks.to_string());
    cli_style::print_key_value("Artists", &stats.artists.to_string());
    cli_style::print_key_value("Users", &stats.users.to_string());
    cli_style::print_key_value("Similarity edges", &stats.similarity_edges.to_string());
    cli_style::print_key_value("Communities", &stats.communities.to_string());
    cli_style::print_key_value("Affinity edges", &stats.affinity_edges.to_string());
    cli_style::print_section_footer();
}

fn execute_command(
    line: String,
    engine: &RecommendationEngine,
    default_limit: usize,
) -> CommandExecutionResult {
    if line.is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(&line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    match cli {
        Ok(cli) => {
            cli_style::print_command_echo(&line);
            match cli.command {
                InnerCommand::Recommend { user_id, n } => {
                    return show_recommend(engine, &user_id, n.unwrap_or(default_limit));
                }
                InnerCommand::Pillars { user_id, n } => {
                    return show_pillars(engine, &user_id, n.unwrap_or(default_limit));
                }
                InnerCommand::Search { prefix, n } => {
                    let prefix = prefix.join(" ");
                    let matches = engine.search_autocomplete(&prefix, n.unwrap_or(default_limit));
                    if matches.is_empty() {
                        cli_style::print_warning(&format!("Nothing starts with '{}'.", prefix));
                    } else {
                        cli_style::print_success(&format!("{} matches", matches.len()));
                        for value in matches {
                            cli_style::print_list_item(&value, 1);
                        }
                    }
                }
                InnerCommand::Community { user_id } => return show_community(engine, &user_id),
                InnerCommand::User { user_id } => {
                    return show_user(engine, &user_id, default_limit);
                }
                InnerCommand::Stats => show_stats(engine),
                InnerCommand::Exit => return CommandExecutionResult::Exit,
            }
        }

        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
        }
    }
    CommandExecutionResult::Ok
}

#[derive(rustyline_derive::Hinter)]
struct CommandHelper {
    commands_names: Vec<String>,
}

impl CommandHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        CommandHelper { commands_names }
    }
}

impl Completer for CommandHelper {
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
            .cloned()
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for CommandHelper {}
impl Validator for CommandHelper {}
impl Helper for CommandHelper {}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Could not install the tracing subscriber")?;

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        snapshot_path: cli_args.snapshot.clone(),
        limit: cli_args.limit,
    };
    let app_config = AppConfig::resolve(&cli_config, file_config)?;

    let engine = load_engine(&app_config.snapshot_path, app_config.recommender.clone())?;

    cli_style::print_welcome(&app_config.snapshot_path.display().to_string(), &engine.stats());
    cli_style::print_help(COMMANDS_HELP);

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<CommandHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(CommandHelper::new()));

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim().to_string();
                let _ = rl.add_history_entry(&line);
                match execute_command(line, &engine, app_config.limit) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
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
                cli_style::print_error(&format!("{:?}", e));
                break;
            }
        }
    }
    cli_style::print_goodbye();
    Ok(())
}

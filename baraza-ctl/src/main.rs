use std::{path::PathBuf, str::FromStr};

use anyhow::{anyhow, Context};
use baraza_client::{
    api::{Error, ForumId, OpinionId},
    ForumView, Role, ViewConfig,
};
use baraza_mock_server::MockServer;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(structopt::StructOpt)]
struct Opt {
    /// JSON fixture file to use instead of the built-in forums
    #[structopt(long, env = "BARAZA_FIXTURES", parse(from_os_str))]
    fixtures: Option<PathBuf>,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// List forums
    Forums {
        /// Only list forums whose title contains this
        #[structopt(short, long, default_value = "")]
        search: String,
    },

    /// Show the discussion of a forum, given by id or by exact title
    Show {
        forum: String,

        /// Open the forum as an administrator (read-only)
        #[structopt(long)]
        admin: bool,

        /// Never offer the forum report
        #[structopt(long)]
        no_reports: bool,

        /// Post a top-level opinion before showing the discussion
        #[structopt(long)]
        post: Vec<String>,

        /// Reply to an opinion before showing the discussion, as PARENT=TEXT
        #[structopt(long)]
        reply: Vec<ReplyArg>,

        /// Print the discussion as JSON
        #[structopt(long)]
        json: bool,
    },

    /// Show the report of a forum, given by id or by exact title
    Report {
        forum: String,

        /// Generate the report first, as an administrator
        #[structopt(long)]
        generate: bool,
    },
}

struct ReplyArg {
    parent: OpinionId,
    content: String,
}

impl FromStr for ReplyArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<ReplyArg> {
        let (parent, content) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected PARENT=TEXT, got {s:?}"))?;
        let parent = parent
            .trim()
            .trim_start_matches('#')
            .parse()
            .with_context(|| format!("parsing reply target {parent:?}"))?;
        Ok(ReplyArg {
            parent: OpinionId(parent),
            content: String::from(content),
        })
    }
}

fn resolve_forum(server: &MockServer, forum: &str) -> anyhow::Result<ForumId> {
    match forum.trim().parse() {
        Ok(id) => Ok(ForumId(id)),
        Err(_) => server
            .find_forum(forum)
            .ok_or_else(|| anyhow!("no forum titled {forum:?}")),
    }
}

fn report_rejection(what: &str, err: &Error) {
    match err.keeps_input() {
        true => eprintln!("rejected {what}: {err} (edit the text and try again)"),
        false => eprintln!("rejected {what}: {err}"),
    }
}

fn apply_posts(view: &mut ForumView, posts: Vec<String>, replies: Vec<ReplyArg>) {
    for p in posts {
        if let Err(err) = view.submit_opinion(&p, chrono::Utc::now()) {
            report_rejection("opinion", &err);
        }
    }
    for r in replies {
        if let Err(err) = view.submit_reply(r.parent, &r.content, chrono::Utc::now()) {
            report_rejection(&format!("reply to {}", r.parent), &err);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();

    let mut server = match &opt.fixtures {
        Some(path) => MockServer::load_fixtures(path)?,
        None => MockServer::with_fixtures(),
    };

    match opt.cmd {
        Command::Forums { search } => {
            print!("{}", render::forum_list(&server.fetch_forums(&search))?);
        }
        Command::Show {
            forum,
            admin,
            no_reports,
            post,
            reply,
            json,
        } => {
            let mut config = match admin {
                true => ViewConfig::admin(),
                false => ViewConfig::citizen(),
            };
            config.reporting_enabled = !no_reports;
            let forum = resolve_forum(&server, &forum)?;
            let mut view = server
                .open_forum(forum, config)
                .with_context(|| format!("opening forum {forum}"))?;
            apply_posts(&mut view, post, reply);
            match json {
                true => println!(
                    "{}",
                    serde_json::to_string_pretty(&view.thread().to_forest())
                        .context("serializing discussion")?
                ),
                false => print!("{}", render::forum_view(&view)?),
            }
        }
        Command::Report { forum, generate } => {
            let forum = resolve_forum(&server, &forum)?;
            if generate {
                eprintln!("Generating report, this may take a moment...");
                server
                    .generate_report(Role::Admin, forum)
                    .await
                    .with_context(|| format!("generating report for forum {forum}"))?;
            }
            let report = server
                .fetch_report(forum)
                .with_context(|| format!("fetching report for forum {forum}"))?;
            print!("{}", render::report(&report)?);
        }
    }

    Ok(())
}

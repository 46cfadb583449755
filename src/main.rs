use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use team_records::dataset::{DEFAULT_MATCH_FILE, DEFAULT_PLAYER_FILE};
use team_records::query::{self, available_options, Evaluation, PlayerSummary, Summary, TeamSummary};
use team_records::records::duplicate_keys;
use team_records::view;
use team_records::xlsx;
use team_records::{evaluate, parse_score, Dataset, Dimension, FilterSelection};

#[derive(Parser)]
#[command(name = "team-records")]
#[command(about = "Filter and summarise the club's match and player records", long_about = None)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DataArgs {
    /// Player appearance sheet (CSV)
    #[arg(long = "players", global = true, env = "TEAM_RECORDS_PLAYERS", default_value = DEFAULT_PLAYER_FILE)]
    player_file: PathBuf,

    /// Match result sheet (CSV)
    #[arg(long = "matches", global = true, env = "TEAM_RECORDS_MATCHES", default_value = DEFAULT_MATCH_FILE)]
    match_file: PathBuf,
}

#[derive(Args)]
struct SelectionArgs {
    /// Season(s) to include; all seasons when omitted
    #[arg(short, long = "year")]
    years: Vec<i32>,

    /// Match date(s), e.g. 2024-03-15
    #[arg(short, long = "date")]
    dates: Vec<String>,

    /// Tournament / league name(s)
    #[arg(short, long = "tournament")]
    tournaments: Vec<String>,

    /// Opponent(s)
    #[arg(short, long = "opponent")]
    opponents: Vec<String>,

    /// Player name(s); switches the summary to player mode
    #[arg(short, long = "player")]
    players: Vec<String>,
}

impl SelectionArgs {
    fn to_selection(&self) -> FilterSelection {
        FilterSelection::new()
            .with_years(self.years.iter().copied())
            .with_dates(&self.dates)
            .with_tournaments(self.tournaments.iter().cloned())
            .with_opponents(self.opponents.iter().cloned())
            .with_players(self.players.iter().cloned())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show headline figures and the team or player summary
    Summary {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// List the values on offer for a filter, given the filters above it
    Options {
        /// year, date, tournament, opponent or player
        dimension: String,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Print the matching player appearances
    Players {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Print the matches the selected appearances belong to
    Matches {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Write the selection to an Excel workbook
    Export {
        /// Output .xlsx file
        #[arg(short = 'O', long)]
        output: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Load both sheets and report data-quality issues
    Validate,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let data = load(&cli.data)?;

    match cli.command {
        Commands::Summary { selection } => {
            let eval = run_query(&data, &selection);
            print_summary(&eval);
        }
        Commands::Options { dimension, selection } => {
            let dim = Dimension::from_str(&dimension)
                .ok_or_else(|| anyhow::anyhow!("Unknown filter '{}'", dimension))?;
            let sel = selection.to_selection();
            warn_unavailable(&data, &sel);
            for value in available_options(&data.players, &sel, dim) {
                println!("{}", value);
            }
        }
        Commands::Players { selection } => {
            let eval = run_query(&data, &selection);
            if eval.filtered_players.is_empty() {
                println!("No player records match this selection");
            } else {
                let rows: Vec<_> = eval.filtered_players.iter().map(view::player_row).collect();
                print!("{}", view::to_tsv(&view::PLAYER_HEADERS, &rows));
            }
        }
        Commands::Matches { selection } => {
            let eval = run_query(&data, &selection);
            if eval.correlated_matches.is_empty() {
                println!("No match records match this selection");
            } else {
                let rows: Vec<_> = eval.correlated_matches.iter().map(view::match_row).collect();
                print!("{}", view::to_tsv(&view::MATCH_HEADERS, &rows));
            }
        }
        Commands::Export { output, selection } => {
            let eval = run_query(&data, &selection);
            println!("Writing Excel file: {}", output.display());
            xlsx::write_evaluation_to_xlsx(&eval, &output).context("Failed to write Excel file")?;
            println!("Done!");
        }
        Commands::Validate => {
            validate(&data);
        }
    }

    Ok(())
}

fn load(args: &DataArgs) -> Result<Dataset> {
    Dataset::from_paths(&args.player_file, &args.match_file).with_context(|| {
        format!(
            "Failed to load records from {} and {}",
            args.player_file.display(),
            args.match_file.display()
        )
    })
}

fn run_query(data: &Dataset, args: &SelectionArgs) -> Evaluation {
    let sel = args.to_selection();
    warn_unavailable(data, &sel);
    evaluate(data, &sel)
}

/// Point out chosen values the filters above them rule out
fn warn_unavailable(data: &Dataset, sel: &FilterSelection) {
    if sel.pruned(&data.players) != *sel {
        log::warn!("Some filter values match nothing under the filters above them");
    }
}

fn print_summary(eval: &Evaluation) {
    let h = &eval.headline;
    println!("Matches: {}", h.matches);
    println!("Player goals: {}", h.goals);
    println!("MOM awards: {}", h.mom_awards);
    println!();

    if eval.is_empty() {
        println!("No records match this selection");
        return;
    }

    match &eval.summary {
        Summary::Team(team) => print_team_summary(team),
        Summary::Player(player) => print_player_summary(player),
    }
}

fn print_team_summary(team: &TeamSummary) {
    let r = &team.record;
    println!("Record: {}", r);
    println!("Win rate: {:.1}%", r.win_rate());
    if r.unparsed > 0 {
        println!("  ({} matches without a readable score)", r.unparsed);
    }

    match &team.top_mom {
        Some(top) => println!("Top MOM: {} ({})", top.name, top.count),
        None => println!("Top MOM: none"),
    }
    println!();

    println!("{:>4}  {:<16} {:>4} {:>4} {:>4} {:>4}", "Rank", "Player", "Apps", "G", "A", "MOM");
    for row in &team.ranking {
        let t = &row.tally;
        println!(
            "{:>4}  {:<16} {:>4} {:>4} {:>4} {:>4}",
            row.rank,
            truncate_name(&t.name, 16),
            t.appearances,
            t.goals,
            t.assists,
            t.mom
        );
    }
}

fn print_player_summary(player: &PlayerSummary) {
    let t = &player.totals;
    println!(
        "{} ({})",
        player.players.join(", "),
        if player.goalkeeper { "GK" } else { "outfield" }
    );
    println!(
        "Apps {} (start {}, sub {})  Goals {}  {} {}  MOM {}  Minutes {}  Cautions {}",
        t.appearances,
        t.starts,
        t.substitutes,
        t.goals,
        player.secondary.label(),
        player.secondary.value(),
        t.mom,
        t.minutes,
        t.cautions
    );

    if let Some(by_year) = &player.by_year {
        println!();
        let rows: Vec<_> = by_year.iter().map(view::year_row).collect();
        print!("{}", view::to_tsv(&view::year_headers(player.goalkeeper), &rows));
    }

    println!();
    let rows: Vec<_> = player
        .match_log
        .iter()
        .map(|e| view::match_log_row(e, player.goalkeeper))
        .collect();
    print!("{}", view::to_tsv(&view::match_log_headers(player.goalkeeper), &rows));
}

fn validate(data: &Dataset) {
    println!("Player records: {}", data.players.len());
    println!("Match records: {}", data.matches.len());

    let mut issues = Vec::new();

    for m in &data.matches {
        if !parse_score(&m.score).outcome.is_known() {
            issues.push(format!("{} vs {}: unreadable score '{}'", m.match_date, m.opponent, m.score));
        }
        if !m.match_date.is_calendar_date() {
            issues.push(format!("Match vs {}: date '{}' is not a calendar date", m.opponent, m.match_date));
        }
    }

    for key in duplicate_keys(&data.matches) {
        issues.push(format!("{} vs {}: more than one match row", key.date, key.opponent));
    }

    let keys = query::match_keys(&data.players);
    let orphaned = keys
        .iter()
        .filter(|k| !data.matches.iter().any(|m| m.key() == **k))
        .count();
    if orphaned > 0 {
        issues.push(format!("{} appearance date/opponent pairs have no match row", orphaned));
    }

    if issues.is_empty() {
        println!("  No issues found");
    } else {
        println!("  Issues found:");
        for issue in issues {
            println!("    - {}", issue);
        }
    }
}

fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else {
        let head: String = name.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

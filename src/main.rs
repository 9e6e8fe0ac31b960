use chrono::Local;
use clap::{Parser, Subcommand};
use prophet_tracker::{data, report, serve, Role};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "prophet-tracker")]
#[command(author, version, about = "Render apostle succession-probability charts from a simulation artifact")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to the simulation artifact
    #[arg(default_value = "public/apostles.json")]
    artifact: PathBuf,

    /// Output report file (.html, .json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for auto-generated reports
    #[arg(long, default_value = "prophet-reports")]
    report_dir: PathBuf,

    /// Don't auto-generate an HTML report
    #[arg(long)]
    no_report: bool,

    /// Don't prompt to open the report
    #[arg(long)]
    no_open: bool,

    /// Show leadership-era annotations in the terminal
    #[arg(short, long)]
    verbose: bool,

    /// Only write the report, no terminal summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a local web UI over the rendered report
    Serve {
        /// Path to the simulation artifact
        #[arg(default_value = "public/apostles.json")]
        artifact: PathBuf,

        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,
    },

    /// Check artifact invariants the renderer does not enforce
    Check {
        /// Path to the simulation artifact
        #[arg(default_value = "public/apostles.json")]
        artifact: PathBuf,
    },
}

fn main() {
    let args = Args::parse();

    if let Some(cmd) = args.command {
        match cmd {
            Command::Serve { artifact, port } => {
                if let Err(e) = serve::start(port, artifact) {
                    eprintln!("Server error: {}", e);
                    std::process::exit(1);
                }
                return;
            }
            Command::Check { artifact } => {
                check_artifact(&artifact);
                return;
            }
        }
    }

    let data = match data::load(&args.artifact) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Failed to load {}: {}", args.artifact.display(), e);
            std::process::exit(1);
        }
    };

    if !args.quiet {
        eprintln!("\x1b[1mProphet Tracker - Succession Probabilities\x1b[0m");
        eprintln!("{}", "─".repeat(70));
        eprintln!(
            "{} apostles | average age {} | {} simulation runs\n",
            data.metadata.total_apostles,
            data.mean_age().round() as i64,
            data.metadata.simulation_runs
        );

        for apostle in &data.apostles {
            let (color, chance) = match apostle.role {
                Role::Incumbent => ("\x1b[34m", "incumbent".to_string()),
                Role::Contender {
                    probability_percent,
                    ..
                } => ("\x1b[0m", format!("{:.1}%", probability_percent)),
            };
            println!(
                "{}#{:<3}{} {:<28} {:>3} yrs  {:>2} in quorum  {:>10}",
                color,
                apostle.seniority,
                "\x1b[0m",
                apostle.full_name,
                apostle.age.floor() as i64,
                apostle.years_in_quorum,
                chance
            );
        }

        if args.verbose {
            let sampled = prophet_tracker::downsample(&data.timeline);
            let names = data.last_names();
            let annotations =
                prophet_tracker::leader_annotations(&sampled, &names, |_| String::new());
            if !annotations.is_empty() {
                eprintln!("\n\x1b[1mLeadership eras:\x1b[0m");
                for ann in annotations {
                    eprintln!("  {:<12} from {} ({:.1}%)", ann.name, ann.date, ann.probability);
                }
            }
        }
    }

    let report_path = if let Some(ref output) = args.output {
        Some(output.clone())
    } else if !args.no_report {
        std::fs::create_dir_all(&args.report_dir).ok();
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        Some(args.report_dir.join(format!("prophet_report_{}.html", timestamp)))
    } else {
        None
    };

    if let Some(ref output_path) = report_path {
        if let Err(e) = report::generate(output_path, &data) {
            eprintln!("Failed to write report: {}", e);
            std::process::exit(1);
        }
        if !args.quiet {
            eprintln!("\n\x1b[32mReport saved: {}\x1b[0m", output_path.display());
        }

        if !args.no_open && !args.quiet {
            eprint!("\nOpen report in browser? [Y/n] ");
            io::stderr().flush().ok();

            let mut input = String::new();
            if io::stdin().read_line(&mut input).is_ok() {
                let input = input.trim().to_lowercase();
                if input.is_empty() || input == "y" || input == "yes" {
                    if let Err(e) = open::that(output_path) {
                        eprintln!("Failed to open report: {}", e);
                    }
                }
            }
        }
    }
}

fn check_artifact(artifact: &PathBuf) {
    let data = match data::load(artifact) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Failed to load {}: {}", artifact.display(), e);
            std::process::exit(1);
        }
    };

    let issues = data::validate(&data);
    if issues.is_empty() {
        println!("{}: no issues found", artifact.display());
        return;
    }

    eprintln!("{}: {} issue(s)", artifact.display(), issues.len());
    for issue in &issues {
        eprintln!("  \x1b[33m!\x1b[0m {}", issue);
    }
    std::process::exit(1);
}

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use symnmf::{io, silhouette_score, Goal, KMeans, Output, SymNmf, SymNmfError, SymNmfParams};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Symmetric NMF clustering of a comma-separated dataset.
#[derive(Parser, Debug)]
#[command(name = "symnmf")]
#[command(about = "Compute SymNMF similarity, degree, normalized or factor matrices")]
struct Args {
    /// Number of clusters (columns of H). Only used by the symnmf goal and --analyze.
    k: usize,

    /// One of: sym, ddg, norm, symnmf. Ignored with --analyze.
    goal: String,

    /// Dataset file, one comma-separated point per line.
    file: PathBuf,

    /// Seed for the random initial factor matrix.
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Maximum number of update steps.
    #[arg(long, default_value = "300")]
    max_iter: usize,

    /// Convergence threshold on the squared Frobenius norm between iterates.
    #[arg(long, default_value = "0.0001")]
    epsilon: f64,

    /// Wall-clock limit for the factorization, in milliseconds.
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Print silhouette scores of SymNMF and k-means labellings instead of a matrix.
    #[arg(long)]
    analyze: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Help and version requests exit cleanly unless they could not be printed
            let code = match err.print() {
                Ok(()) if !err.use_stderr() => 0,
                _ => 1,
            };
            process::exit(code);
        }
    };

    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: logging disabled: {err}");
    }

    match run(&args) {
        Ok(output) => print!("{output}"),
        Err(err) => {
            tracing::error!(%err, "symnmf failed");
            eprintln!("Error: {err}");
            process::exit(err.exit_code());
        }
    }
}

fn run(args: &Args) -> Result<String, SymNmfError> {
    let goal = if args.analyze {
        None
    } else {
        Some(args.goal.parse::<Goal>()?)
    };
    let data = io::read_dataset(&args.file)?;

    let mut builder = SymNmfParams::builder()
        .seed(args.seed)
        .max_iter(args.max_iter)
        .epsilon(args.epsilon);
    if let Some(ms) = args.time_limit_ms {
        builder = builder.time_limit(Duration::from_millis(ms));
    }
    let model = SymNmf::new(&data, builder.build());

    match goal {
        Some(goal) => Ok(model.run(goal, args.k, Output::Text)?.into_text().unwrap_or_default()),
        None => {
            let nmf_labels = model.cluster(args.k)?;
            let kmeans_labels = KMeans::new(args.k).fit(&data)?.labels;
            let nmf = silhouette_score(&data, &nmf_labels)?;
            let kmeans = silhouette_score(&data, &kmeans_labels)?;
            Ok(format!("nmf: {nmf:.4}\nkmeans: {kmeans:.4}\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TWO_BLOBS: &str = "0.0,0.0\n0.5,0.0\n0.0,0.5\n4.0,4.0\n4.5,4.0\n4.0,4.5\n";

    fn write_dataset(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("symnmf-{}-{name}.txt", process::id()));
        fs::write(&path, TWO_BLOBS).unwrap();
        path
    }

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn analyze_ignores_the_goal() {
        let path = write_dataset("analyze");
        let file = path.to_str().unwrap();
        let result = run(&args(&["symnmf", "2", "not-a-goal", file, "--analyze"]));
        fs::remove_file(&path).unwrap();

        let text = result.unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(2, lines.len());
        assert!(lines[0].starts_with("nmf: "));
        assert!(lines[1].starts_with("kmeans: "));
    }

    #[test]
    fn goal_is_checked_before_reading_the_file() {
        let result = run(&args(&["symnmf", "2", "not-a-goal", "/nonexistent/points.txt"]));
        assert_eq!(Err(SymNmfError::InvalidGoal(String::from("not-a-goal"))), result);
    }

    #[test]
    fn goal_output_is_rendered_as_text() {
        let path = write_dataset("ddg");
        let file = path.to_str().unwrap();
        let result = run(&args(&["symnmf", "2", "ddg", file]));
        fs::remove_file(&path).unwrap();

        let text = result.unwrap();
        assert_eq!(6, text.lines().count());
        assert!(text.lines().all(|line| line.split(',').count() == 6));
    }
}

//! Colorful console output for experiment progress.
//!
//! Provides a custom `tracing` layer that formats solve and experiment events
//! with colors. Enabled by the `console` feature.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "lpbench=info,lpbench_solver=info,lpbench_benchmark=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the lpbench banner and sets up tracing. `RUST_LOG` overrides the
/// default filter.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ExperimentConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 _       _                     _
| |_ __ | |__   ___ _ __   ___| |__
| | '_ \| '_ \ / _ \ '_ \ / __| '_ \
| | |_) | |_) |  __/ | | | (__| | | |
|_| .__/|_.__/ \___|_| |_|\___|_| |_|
  |_|
"#;

    let version_line = format!(
        "        v{} - Sylvester-LP Solver Experiments\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{}", banner.bright_cyan());
    let _ = writeln!(stderr, "{}", version_line.bright_white().bold());
    let _ = stderr.flush();
}

/// A tracing layer that formats lpbench events with colors.
pub struct ExperimentConsoleLayer;

impl<S: Subscriber> Layer<S> for ExperimentConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();

        // Only handle lpbench events
        if !target.starts_with("lpbench") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    solver: Option<String>,
    precision: Option<String>,
    status: Option<String>,
    run: Option<String>,
    formulation: Option<String>,
    error: Option<String>,
    path: Option<String>,
    variables: Option<u64>,
    rows: Option<u64>,
    nnz: Option<u64>,
    dense_nnz: Option<u64>,
    stored_nnz: Option<u64>,
    n: Option<u64>,
    m: Option<u64>,
    seed: Option<u64>,
    runs: Option<u64>,
    passes: Option<u64>,
    samples: Option<u64>,
    iterations: Option<u64>,
    duration_ms: Option<u64>,
    objective: Option<f64>,
    cost: Option<f64>,
    spread: Option<f64>,
}

impl EventVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "message" => self.message = Some(value),
            "solver" => self.solver = Some(value),
            "precision" => self.precision = Some(value),
            "status" => self.status = Some(value),
            "run" => self.run = Some(value),
            "formulation" => self.formulation = Some(value),
            "error" => self.error = Some(value),
            "path" => self.path = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "variables" => self.variables = Some(value),
            "rows" => self.rows = Some(value),
            "nnz" => self.nnz = Some(value),
            "dense_nnz" => self.dense_nnz = Some(value),
            "stored_nnz" => self.stored_nnz = Some(value),
            "n" => self.n = Some(value),
            "m" => self.m = Some(value),
            "seed" => self.seed = Some(value),
            "runs" => self.runs = Some(value),
            "passes" => self.passes = Some(value),
            "samples" => self.samples = Some(value),
            "iterations" => self.iterations = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "objective" => self.objective = Some(value),
            "cost" => self.cost = Some(value),
            "spread" => self.spread = Some(value),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    let msg = v.message.as_deref().unwrap_or("");

    match msg {
        "Experiment started" => format_experiment_started(v),
        "Solve started" => format_solve_started(v),
        "Preconditioned" => format_preconditioned(v),
        "Solve ended" => format_solve_ended(v),
        "Run finished" => format_run_finished(v),
        "Run failed" => format_run_failed(v),
        "Experiment ended" => format_experiment_ended(v),
        _ => String::new(),
    }
}

fn format_experiment_started(v: &EventVisitor) -> String {
    format!(
        "{} {} {} n ({}), m ({}), seed ({}), nonzeros ({} dense), runs ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Experiment]".bright_cyan(),
        v.n.unwrap_or(0).to_string().yellow(),
        v.m.unwrap_or(0).to_string().yellow(),
        v.seed.unwrap_or(0).to_string().yellow(),
        count(v.dense_nnz).bright_yellow(),
        v.runs.unwrap_or(0).to_string().white().bold()
    )
}

fn format_solve_started(v: &EventVisitor) -> String {
    format!(
        "{} {} {} variables ({}), rows ({}), nonzeros ({}), precision ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        solver_tag(v).bright_cyan(),
        count(v.variables).bright_yellow(),
        count(v.rows).bright_yellow(),
        count(v.nnz).bright_yellow(),
        v.precision.as_deref().unwrap_or("double").bright_magenta()
    )
}

fn format_preconditioned(v: &EventVisitor) -> String {
    let samples = match v.samples {
        Some(0) | None => "exact".to_string(),
        Some(s) => format!("{} probes", s.to_formatted_string(&Locale::en)),
    };
    format!(
        "{} {} {} passes ({}), norms ({}), scale spread ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Precond]".bright_cyan(),
        v.passes.unwrap_or(0).to_string().yellow(),
        samples.white(),
        format!("{:.3e}", v.spread.unwrap_or(1.0)).bright_magenta()
    )
}

fn format_solve_ended(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("unknown");
    let status = if status == "solved" {
        status.bright_green().to_string()
    } else {
        status.yellow().to_string()
    };
    format!(
        "{} {} {} Solve ended: status ({}), objective ({}), iterations ({}), time spent ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        solver_tag(v).bright_cyan(),
        status,
        format_objective(v.objective),
        count(v.iterations).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_run_finished(v: &EventVisitor) -> String {
    let run = v.run.as_deref().unwrap_or("run");
    format!(
        "    {} {:<24} {:<7} obj {} | cost {} | {} iterations",
        "->".bright_blue(),
        run.white().bold(),
        v.formulation.as_deref().unwrap_or(""),
        format_objective(v.objective),
        format_objective(v.cost),
        count(v.iterations)
    )
}

fn format_run_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} failed: {}",
        timestamp().bright_black(),
        "ERROR".bright_red().bold(),
        "[Experiment]".bright_cyan(),
        v.run.as_deref().unwrap_or("run").white().bold(),
        v.error.as_deref().unwrap_or("unknown error").bright_red()
    )
}

fn format_experiment_ended(v: &EventVisitor) -> String {
    let runs = v.runs.unwrap_or(0);
    let spread = v.spread.unwrap_or(0.0);
    let agree = spread <= 1e-2;

    let mut output = format!(
        "{} {} {} Experiment ended: runs ({}), stored nonzeros ({}), time spent ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Experiment]".bright_cyan(),
        runs.to_string().white().bold(),
        count(v.stored_nnz).bright_yellow(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    );

    output.push_str("\n\n");
    output.push_str(&"╔══════════════════════════════════════════════════════════╗".bright_cyan().to_string());
    output.push('\n');

    let status_text = if agree {
        "ALL RUNS AGREE"
    } else {
        "OBJECTIVES DISAGREE"
    };
    let status_colored = if agree {
        format!("  {}  ", status_text).bright_green().bold().to_string()
    } else {
        format!("  {}  ", status_text).bright_red().bold().to_string()
    };
    let status_padding = 56 - status_text.len() - 4;
    let left_pad = status_padding / 2;
    let right_pad = status_padding - left_pad;
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(&"╠══════════════════════════════════════════════════════════╣".bright_cyan().to_string());
    output.push('\n');

    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Objective Spread:",
        format!("{:.3e}", spread),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(&"╚══════════════════════════════════════════════════════════╝".bright_cyan().to_string());
    output.push('\n');

    output
}

fn solver_tag(v: &EventVisitor) -> String {
    format!("[{}]", v.solver.as_deref().unwrap_or("solver"))
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_objective(value: Option<f64>) -> String {
    match value {
        Some(x) if x < 0.0 => format!("{:.6}", x).bright_green().to_string(),
        Some(x) => format!("{:.6}", x).white().to_string(),
        None => "N/A".white().to_string(),
    }
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
